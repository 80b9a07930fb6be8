//! Legacy advertising payload.
//!
//! Connectable undirected advertising carrying, in order:
//! flags (LE General Discoverable, BR/EDR not supported), the complete
//! 16-bit service UUID list, the GAP appearance and the complete local name.

use heapless::Vec;

use crate::ble::adv_parser::{AD_APPEARANCE, AD_COMPLETE_NAME, AD_COMPLETE_UUID16, AD_FLAGS};
use crate::config::{
    ADV_APPEARANCE_GENERIC_THERMOMETER, ADV_INTERVAL_MS, DEVICE_NAME, ENV_SENSING_SERVICE_UUID16,
};
use crate::error::Error;

/// Legacy advertising PDU payload limit.
pub const MAX_ADV_LEN: usize = 31;

/// LE General Discoverable Mode | BR/EDR Not Supported.
const FLAGS_GENERAL_DISC_NO_BREDR: u8 = 0x06;

pub type AdvertisementData = Vec<u8, MAX_ADV_LEN>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvertisingConfig {
    pub name: &'static str,
    pub interval_ms: u32,
    pub service_uuid16: u16,
    pub appearance: u16,
}

impl AdvertisingConfig {
    /// The robot's advertising identity.
    pub const fn robot() -> Self {
        Self {
            name: DEVICE_NAME,
            interval_ms: ADV_INTERVAL_MS,
            service_uuid16: ENV_SENSING_SERVICE_UUID16,
            appearance: ADV_APPEARANCE_GENERIC_THERMOMETER,
        }
    }

    /// Interval in the stack's 0.625 ms units.
    pub const fn interval_units(&self) -> u32 {
        self.interval_ms * 1000 / 625
    }
}

impl Default for AdvertisingConfig {
    fn default() -> Self {
        Self::robot()
    }
}

/// Encode the advertising payload for `config`.
pub fn build(config: &AdvertisingConfig) -> Result<AdvertisementData, Error> {
    let mut data = AdvertisementData::new();

    push_field(&mut data, AD_FLAGS, &[FLAGS_GENERAL_DISC_NO_BREDR])?;
    push_field(&mut data, AD_COMPLETE_UUID16, &config.service_uuid16.to_le_bytes())?;
    push_field(&mut data, AD_APPEARANCE, &config.appearance.to_le_bytes())?;
    push_field(&mut data, AD_COMPLETE_NAME, config.name.as_bytes())?;

    Ok(data)
}

fn push_field(data: &mut AdvertisementData, ad_type: u8, value: &[u8]) -> Result<(), Error> {
    let len = u8::try_from(value.len() + 1).map_err(|_| Error::AdvertisementTooLong)?;
    data.push(len).map_err(|_| Error::AdvertisementTooLong)?;
    data.push(ad_type).map_err(|_| Error::AdvertisementTooLong)?;
    data.extend_from_slice(value)
        .map_err(|_| Error::AdvertisementTooLong)
}

//! Indicator light command handling.
//!
//! A two-state toggle: `10` lights both indicators in the "on" colour,
//! `0` turns them off. Any other value is ignored without error.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::codec;
use crate::config::{INDICATOR_OFF, INDICATOR_ON, INDICATOR_ON_COLOR};
use crate::error::Error;
use crate::gatt::WriteSource;
use crate::robot::{Rgb, Robot, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorCommand {
    Off,
    On,
}

impl IndicatorCommand {
    /// `None` for values outside the defined set.
    pub fn from_raw(raw: i16) -> Option<Self> {
        match raw {
            INDICATOR_OFF => Some(Self::Off),
            INDICATOR_ON => Some(Self::On),
            _ => None,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Self::Off => Rgb::OFF,
            Self::On => INDICATOR_ON_COLOR,
        }
    }
}

/// Decode one indicator write and apply it to both lights.
///
/// Returns `Ok(None)` when the value is well-formed but undefined.
pub async fn handle_write<M, R>(
    robot: &Mutex<M, R>,
    payload: &[u8],
) -> Result<Option<IndicatorCommand>, Error>
where
    M: RawMutex,
    R: Robot,
{
    let raw = codec::decode_indicator_command(payload)?;
    info!("Indicator: raw={}", raw);

    let Some(command) = IndicatorCommand::from_raw(raw) else {
        debug!("Indicator value {} undefined - ignored", raw);
        return Ok(None);
    };

    let mut robot = robot.lock().await;
    for side in Side::BOTH {
        robot.set_indicator(side, command.color()).await;
    }
    Ok(Some(command))
}

/// Listen on the indicator characteristic forever.
pub async fn run<M, R, W>(writes: &mut W, robot: &Mutex<M, R>) -> !
where
    M: RawMutex,
    R: Robot,
    W: WriteSource,
{
    info!("Indicator listener started");

    loop {
        let payload = writes.written().await;
        if let Err(e) = handle_write(robot, &payload).await {
            warn!("Indicator command discarded: {:?}", e);
        }
    }
}

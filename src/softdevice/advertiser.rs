//! [`Peripheral`] over the SoftDevice: connectable undirected advertising,
//! then GATT serving until the central drops.

use defmt::{info, warn};
use nrf_softdevice::ble::{peripheral, Connection};
use nrf_softdevice::Softdevice;

use alvik_ble::ble::advertising::{self, AdvertisementData, AdvertisingConfig};
use alvik_ble::lifecycle::Peripheral;
use alvik_ble::{BleError, Error};

use super::link;
use super::server::{self, Server};

pub struct Advertiser {
    sd: &'static Softdevice,
    server: &'static Server,
    adv_data: AdvertisementData,
    name: &'static str,
    interval: u32,
}

impl Advertiser {
    pub fn new(
        sd: &'static Softdevice,
        server: &'static Server,
        config: &AdvertisingConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            sd,
            server,
            adv_data: advertising::build(config)?,
            name: config.name,
            interval: config.interval_units(),
        })
    }
}

impl Peripheral for Advertiser {
    type Link = Connection;

    async fn advertise(&mut self) -> Result<Connection, Error> {
        let adv = peripheral::ConnectableAdvertisement::ScannableUndirected {
            adv_data: &self.adv_data,
            scan_data: &[],
        };
        let config = peripheral::Config {
            interval: self.interval,
            ..Default::default()
        };

        info!("Advertising as {} (interval {} units)", self.name, self.interval);
        let conn = peripheral::advertise_connectable(self.sd, adv, &config)
            .await
            .map_err(|e| {
                warn!("advertise_connectable: {:?}", e);
                BleError::AdvertiseFailed
            })?;

        info!("Central connected: {}", conn.peer_address());
        link::set(conn.clone());
        Ok(conn)
    }

    async fn disconnected(&mut self, conn: Connection) {
        server::serve(&conn, self.server).await;
        link::clear();
        info!("Central disconnected");
    }
}

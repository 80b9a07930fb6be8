//! GATT server: three services, write capture and telemetry sinks.
//!
//! ```text
//! Environmental Sensing (0x181A)
//!   Temperature (0x2A6E)          read, notify        2 bytes
//! Motion  19b10000-…
//!   Acceleration   19b10001-…     read, notify       12 bytes
//!   Angular rate   19b10002-…     read, notify       12 bytes
//! Control 19b10003-…
//!   Drive command  19b10004-…     read, write, notify   ≤ 20 bytes
//!   Indicator      19b10005-…     read, write, notify   ≤ 20 bytes
//! ```
//!
//! The write characteristics are variable length so that a wrong-sized
//! write reaches the decoder (and is discarded there) instead of failing
//! inside the stack.

use core::sync::atomic::Ordering;

use defmt::{debug, info, warn};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use nrf_softdevice::ble::gatt_server;

use alvik_ble::codec::{self, VECTOR3_LEN};
use alvik_ble::config::{TEMPERATURE_PLACEHOLDER_CENTI, WRITE_QUEUE_DEPTH};
use alvik_ble::gatt::{NotifySink, Payload};
use alvik_ble::{BleError, Error};

use super::link;

#[nrf_softdevice::gatt_service(uuid = "181a")]
pub struct EnvSensingService {
    #[characteristic(uuid = "2a6e", read, notify)]
    pub temperature: [u8; 2],
}

#[nrf_softdevice::gatt_service(uuid = "19b10000-e8f2-537e-4f6c-d104768a1214")]
pub struct MotionService {
    #[characteristic(uuid = "19b10001-e8f2-537e-4f6c-d104768a1214", read, notify)]
    pub acceleration: [u8; 12],

    #[characteristic(uuid = "19b10002-e8f2-537e-4f6c-d104768a1214", read, notify)]
    pub angular_rate: [u8; 12],
}

#[nrf_softdevice::gatt_service(uuid = "19b10003-e8f2-537e-4f6c-d104768a1214")]
pub struct ControlService {
    #[characteristic(uuid = "19b10004-e8f2-537e-4f6c-d104768a1214", read, write, notify)]
    pub drive_command: Payload,

    #[characteristic(uuid = "19b10005-e8f2-537e-4f6c-d104768a1214", read, write, notify)]
    pub indicator_command: Payload,
}

#[nrf_softdevice::gatt_server]
pub struct Server {
    pub env: EnvSensingService,
    pub motion: MotionService,
    pub control: ControlService,
}

pub type WriteQueue = Channel<CriticalSectionRawMutex, Payload, WRITE_QUEUE_DEPTH>;

/// Raw writes to the drive command characteristic, in arrival order.
pub static DRIVE_WRITES: WriteQueue = Channel::new();

/// Raw writes to the indicator characteristic, in arrival order.
pub static INDICATOR_WRITES: WriteQueue = Channel::new();

impl Server {
    /// Give the temperature characteristic its placeholder value.
    pub fn init_values(&self) -> Result<(), Error> {
        self.env
            .temperature_set(&codec::encode_temperature(TEMPERATURE_PLACEHOLDER_CENTI))
            .map_err(|_| BleError::SetValueFailed)?;
        Ok(())
    }
}

/// GATT event callback. Runs inside `gatt_server::run`, so it must not
/// block: writes are queued and handled by their own tasks.
pub fn dispatch(event: ServerEvent) {
    match event {
        ServerEvent::Control(ControlServiceEvent::DriveCommandWrite(payload)) => {
            capture(&DRIVE_WRITES, "drive", payload)
        }
        ServerEvent::Control(ControlServiceEvent::IndicatorCommandWrite(payload)) => {
            capture(&INDICATOR_WRITES, "indicator", payload)
        }
        ServerEvent::Motion(MotionServiceEvent::AccelerationCccdWrite { notifications }) => {
            info!("Acceleration notifications: {}", notifications);
            link::ACCELERATION_SUBSCRIBED.store(notifications, Ordering::Relaxed);
        }
        ServerEvent::Motion(MotionServiceEvent::AngularRateCccdWrite { notifications }) => {
            info!("Angular rate notifications: {}", notifications);
            link::ANGULAR_RATE_SUBSCRIBED.store(notifications, Ordering::Relaxed);
        }
        ServerEvent::Env(_) | ServerEvent::Control(_) => {
            debug!("CCCD write ignored");
        }
    }
}

fn capture(queue: &WriteQueue, name: &str, payload: Payload) {
    if queue.try_send(payload).is_err() {
        warn!("{} write queue full - write dropped", name);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum MotionChannel {
    Acceleration,
    AngularRate,
}

/// One of the two telemetry characteristics, as seen by the publisher.
pub struct MotionNotifier {
    server: &'static Server,
    channel: MotionChannel,
}

impl MotionNotifier {
    pub fn new(server: &'static Server, channel: MotionChannel) -> Self {
        Self { server, channel }
    }

    fn subscribed(&self) -> bool {
        match self.channel {
            MotionChannel::Acceleration => link::ACCELERATION_SUBSCRIBED.load(Ordering::Relaxed),
            MotionChannel::AngularRate => link::ANGULAR_RATE_SUBSCRIBED.load(Ordering::Relaxed),
        }
    }
}

impl NotifySink for MotionNotifier {
    fn write_notify(&mut self, value: &[u8]) -> Result<(), Error> {
        let value: [u8; VECTOR3_LEN] = value.try_into().map_err(|_| Error::MalformedPayload {
            expected: VECTOR3_LEN,
            actual: value.len(),
        })?;
        let motion = &self.server.motion;

        match self.channel {
            MotionChannel::Acceleration => motion.acceleration_set(&value),
            MotionChannel::AngularRate => motion.angular_rate_set(&value),
        }
        .map_err(|_| BleError::SetValueFailed)?;

        let Some(conn) = link::current() else {
            return Ok(());
        };
        if !self.subscribed() {
            return Ok(());
        }

        match self.channel {
            MotionChannel::Acceleration => motion.acceleration_notify(&conn, &value),
            MotionChannel::AngularRate => motion.angular_rate_notify(&conn, &value),
        }
        .map_err(|_| BleError::NotifyFailed)?;
        Ok(())
    }
}

/// Serve GATT requests on `conn` until it disconnects.
pub async fn serve(conn: &nrf_softdevice::ble::Connection, server: &Server) {
    let reason = gatt_server::run(conn, server, dispatch).await;
    debug!("GATT server stopped: {:?}", reason);
}

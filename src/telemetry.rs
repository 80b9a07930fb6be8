//! Motion telemetry publisher.
//!
//! Every period: read acceleration and angular rate, encode each as three
//! little-endian `f32`s and write them to their characteristics with a
//! notify request. Fire-and-continue: nothing waits on the remote side,
//! and a failed characteristic update is logged and skipped.
//!
//! Each run starts by initialising the sensor, so a supervisor restart
//! also re-initialises it. A sensor failure has no recovery path inside
//! the loop and ends it with the error, leaving the decision to the task
//! supervisor.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::codec;
use crate::error::Error;
use crate::gatt::NotifySink;
use crate::robot::{Robot, Vector3};

/// Periodic wake-up source for the publisher.
#[allow(async_fn_in_trait)]
pub trait Tick {
    /// Suspend until the next period boundary.
    async fn tick(&mut self);
}

#[cfg(feature = "embedded")]
impl Tick for embassy_time::Ticker {
    async fn tick(&mut self) {
        self.next().await
    }
}

/// One motion sample. Transient: encoded and dropped.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetrySample {
    pub acceleration: Vector3,
    pub angular_rate: Vector3,
}

/// Read both motion triples from the driver.
pub async fn sample<R: Robot>(robot: &mut R) -> Result<TelemetrySample, Error> {
    let acceleration = robot.read_acceleration().await?;
    let angular_rate = robot.read_angular_rate().await?;
    Ok(TelemetrySample {
        acceleration,
        angular_rate,
    })
}

/// Sample once and push both readings.
pub async fn publish_once<M, R, A, G>(
    robot: &Mutex<M, R>,
    acceleration: &mut A,
    angular_rate: &mut G,
) -> Result<TelemetrySample, Error>
where
    M: RawMutex,
    R: Robot,
    A: NotifySink,
    G: NotifySink,
{
    let reading = {
        let mut robot = robot.lock().await;
        sample(&mut *robot).await?
    };

    if let Err(e) = acceleration.write_notify(&codec::encode_vector3(reading.acceleration)) {
        warn!("Acceleration update failed: {:?}", e);
    }
    if let Err(e) = angular_rate.write_notify(&codec::encode_vector3(reading.angular_rate)) {
        warn!("Angular rate update failed: {:?}", e);
    }

    Ok(reading)
}

/// Initialise the sensor, then publish forever on `ticker`'s period.
/// Returns only on a sensor failure.
pub async fn run<M, R, A, G, T>(
    robot: &Mutex<M, R>,
    acceleration: &mut A,
    angular_rate: &mut G,
    ticker: &mut T,
) -> Result<Infallible, Error>
where
    M: RawMutex,
    R: Robot,
    A: NotifySink,
    G: NotifySink,
    T: Tick,
{
    if let Err(e) = robot.lock().await.init_sensors().await {
        error!("Sensor init failed: {:?}", e);
        return Err(e);
    }
    info!("Telemetry publisher started");

    loop {
        if let Err(e) = publish_once(robot, acceleration, angular_rate).await {
            error!("Telemetry stopped: {:?}", e);
            return Err(e);
        }
        ticker.tick().await;
    }
}

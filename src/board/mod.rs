//! The physical robot behind [`Robot`].
//!
//! ```text
//!   IMU        LSM6DSOX on TWIM0 (SDA P0.26, SCL P0.27)
//!   Motors     PWM0 ch0..3 (P0.02, P0.03, P0.04, P0.28)
//!   LEDs       left P0.13/14/15, right P0.16/17/19
//! ```

pub mod imu;
pub mod leds;
pub mod motors;

use defmt::{debug, warn};
use embassy_nrf::gpio::Output;
use embassy_nrf::peripherals::TWISPI0;
use embassy_nrf::twim::Twim;

use alvik_ble::config::MOTOR_FULL_SCALE_SPEED;
use alvik_ble::robot::{mix, Rgb, Robot, Side, Vector3};
use alvik_ble::Error;

use imu::Lsm6dsox;
use leds::RgbLed;
use motors::Motors;

pub type Imu = Lsm6dsox<Twim<'static, TWISPI0>>;

pub struct AlvikBoard {
    imu: Imu,
    motors: Motors,
    leds: [RgbLed<Output<'static>>; 2],
}

impl AlvikBoard {
    pub fn new(imu: Imu, motors: Motors, leds: [RgbLed<Output<'static>>; 2]) -> Self {
        Self { imu, motors, leds }
    }
}

impl Robot for AlvikBoard {
    async fn init_sensors(&mut self) -> Result<(), Error> {
        self.imu.init().await.map_err(|e| {
            warn!("IMU init: {}", e);
            Error::SensorReadFailure
        })
    }

    async fn read_acceleration(&mut self) -> Result<Vector3, Error> {
        self.imu.acceleration().await.map_err(|e| {
            warn!("IMU acceleration read: {}", e);
            Error::SensorReadFailure
        })
    }

    async fn read_angular_rate(&mut self) -> Result<Vector3, Error> {
        self.imu.angular_rate().await.map_err(|e| {
            warn!("IMU angular rate read: {}", e);
            Error::SensorReadFailure
        })
    }

    async fn drive(&mut self, speed: f32, angle_degrees: f32) {
        let duty = mix::differential(speed, angle_degrees, MOTOR_FULL_SCALE_SPEED);
        debug!("Motors: L={} R={}", duty.left, duty.right);
        self.motors.set(duty);
    }

    async fn set_indicator(&mut self, side: Side, color: Rgb) {
        self.leds[side.index()].set(color);
    }
}

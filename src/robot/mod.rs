//! Hardware facade - the robot as the core tasks see it.
//!
//! Sensors, motors and indicator lights sit behind one [`Robot`] trait so
//! the command and telemetry loops can run against the real board on
//! target or a [`sim::SimulatedRobot`] on the host.
//!
//! The facade is shared by several tasks through an
//! `embassy_sync::mutex::Mutex`; each task holds the lock for a single
//! facade call only.

pub mod mix;
pub mod sim;

use crate::error::Error;

/// Three-axis reading (acceleration in g, angular rate in °/s).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// On/off state of the three channels of one indicator light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: bool,
    pub g: bool,
    pub b: bool,
}

impl Rgb {
    pub const OFF: Self = Self::new(false, false, false);
    pub const BLUE: Self = Self::new(false, false, true);

    pub const fn new(r: bool, g: bool, b: bool) -> Self {
        Self { r, g, b }
    }

    pub fn is_off(&self) -> bool {
        *self == Self::OFF
    }
}

/// Which of the two indicator lights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub const fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Sensor, actuator and LED surface of the robot.
///
/// `drive` and `set_indicator` are fire-and-forget: actuator faults are
/// the driver's business, not the caller's.
#[allow(async_fn_in_trait)]
pub trait Robot {
    /// Bring the motion sensor into its measuring configuration.
    /// Safe to call again after a failure.
    async fn init_sensors(&mut self) -> Result<(), Error>;

    /// Read the three-axis acceleration (g).
    async fn read_acceleration(&mut self) -> Result<Vector3, Error>;

    /// Read the three-axis angular rate (°/s).
    async fn read_angular_rate(&mut self) -> Result<Vector3, Error>;

    /// Command a signed speed and a heading angle in degrees.
    async fn drive(&mut self, speed: f32, angle_degrees: f32);

    /// Set one indicator light.
    async fn set_indicator(&mut self, side: Side, color: Rgb);
}

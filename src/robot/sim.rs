//! Simulated robot for host tests and bring-up without hardware.
//!
//! Sensor readings are fixed values set by the caller; drive commands and
//! indicator states are recorded so tests can assert on them.

use heapless::Vec;

use super::{Rgb, Robot, Side, Vector3};
use crate::error::Error;

/// Number of drive commands kept in the history (oldest dropped first).
pub const DRIVE_HISTORY: usize = 32;

/// One recorded `drive` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveCall {
    pub speed: f32,
    pub angle_degrees: f32,
}

pub struct SimulatedRobot {
    acceleration: Vector3,
    angular_rate: Vector3,
    sensor_fault: bool,
    init_fault: bool,
    sensor_inits: u32,
    samples_taken: u32,
    drives: Vec<DriveCall, DRIVE_HISTORY>,
    indicators: [Rgb; 2],
}

impl SimulatedRobot {
    /// Robot at rest: zero readings, lights off, no drive history.
    pub const fn new() -> Self {
        Self {
            acceleration: Vector3::new(0.0, 0.0, 0.0),
            angular_rate: Vector3::new(0.0, 0.0, 0.0),
            sensor_fault: false,
            init_fault: false,
            sensor_inits: 0,
            samples_taken: 0,
            drives: Vec::new(),
            indicators: [Rgb::OFF; 2],
        }
    }

    pub fn set_motion(&mut self, acceleration: Vector3, angular_rate: Vector3) {
        self.acceleration = acceleration;
        self.angular_rate = angular_rate;
    }

    /// Make every subsequent sensor read fail (or recover).
    pub fn set_sensor_fault(&mut self, faulty: bool) {
        self.sensor_fault = faulty;
    }

    /// Make sensor initialisation fail (or recover).
    pub fn set_init_fault(&mut self, faulty: bool) {
        self.init_fault = faulty;
    }

    /// Number of `init_sensors` calls, failed ones included.
    pub fn sensor_inits(&self) -> u32 {
        self.sensor_inits
    }

    /// Number of successful acceleration reads.
    pub fn samples_taken(&self) -> u32 {
        self.samples_taken
    }

    pub fn drives(&self) -> &[DriveCall] {
        &self.drives
    }

    pub fn last_drive(&self) -> Option<DriveCall> {
        self.drives.last().copied()
    }

    pub fn indicator(&self, side: Side) -> Rgb {
        self.indicators[side.index()]
    }
}

impl Default for SimulatedRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl Robot for SimulatedRobot {
    async fn init_sensors(&mut self) -> Result<(), Error> {
        self.sensor_inits += 1;
        if self.init_fault {
            return Err(Error::SensorReadFailure);
        }
        Ok(())
    }

    async fn read_acceleration(&mut self) -> Result<Vector3, Error> {
        if self.sensor_fault {
            return Err(Error::SensorReadFailure);
        }
        self.samples_taken += 1;
        Ok(self.acceleration)
    }

    async fn read_angular_rate(&mut self) -> Result<Vector3, Error> {
        if self.sensor_fault {
            return Err(Error::SensorReadFailure);
        }
        Ok(self.angular_rate)
    }

    async fn drive(&mut self, speed: f32, angle_degrees: f32) {
        if self.drives.is_full() {
            self.drives.remove(0);
        }
        let _ = self.drives.push(DriveCall {
            speed,
            angle_degrees,
        });
    }

    async fn set_indicator(&mut self, side: Side, color: Rgb) {
        self.indicators[side.index()] = color;
    }
}

//! Application-wide constants and compile-time configuration.
//!
//! There is no runtime configuration surface: every timing parameter,
//! protocol constant and tuning value lives here so it can be changed in
//! one place and rebuilt.

use crate::robot::Rgb;

// BLE advertising

/// GAP device name, sent as the Complete Local Name AD field.
pub const DEVICE_NAME: &str = "Arduino_Alvik";

/// Advertising interval (ms). Converted to 0.625 ms units for the stack.
pub const ADV_INTERVAL_MS: u32 = 250;

/// org.bluetooth.service.environmental_sensing - the only advertised service.
pub const ENV_SENSING_SERVICE_UUID16: u16 = 0x181A;

/// org.bluetooth.characteristic.temperature.
pub const TEMPERATURE_CHAR_UUID16: u16 = 0x2A6E;

/// GAP appearance: Generic Thermometer.
pub const ADV_APPEARANCE_GENERIC_THERMOMETER: u16 = 768;

// GATT

/// Largest write accepted on the control characteristics.
/// 20 bytes = payload of the default 23-byte ATT MTU.
pub const MAX_WRITE_LEN: usize = 20;

/// Depth of each write-capture queue (writes buffered while a handler is busy).
pub const WRITE_QUEUE_DEPTH: usize = 8;

/// Initial temperature characteristic value (hundredths of a degree).
/// No sensor drives it; the bit pattern 0xABCD marks it as a placeholder.
pub const TEMPERATURE_PLACEHOLDER_CENTI: i16 = 0xABCDu16 as i16;

// Telemetry

/// Motion telemetry sampling period (ms).
pub const TELEMETRY_PERIOD_MS: u64 = 100;

// Drive command

/// Headings beyond ±this value (degrees) are rejected.
pub const MAX_HEADING_DEG: i16 = 180;

/// Raw joystick magnitude is divided by this...
pub const SPEED_DIVISOR: f64 = 10.0;

/// ...then multiplied by this to get the physical drive speed.
/// Chosen empirically on the robot.
pub const SPEED_SCALE: f64 = 1.3;

/// Drive speed that maps to 100 % motor duty (100 raw joystick units).
pub const MOTOR_FULL_SCALE_SPEED: f32 = 13.0;

// Indicator command

/// Indicator command value that turns both lights off.
pub const INDICATOR_OFF: i16 = 0;

/// Indicator command value that turns both lights on.
pub const INDICATOR_ON: i16 = 10;

/// Colour shown while the indicator is on.
pub const INDICATOR_ON_COLOR: Rgb = Rgb::BLUE;

// Task supervision

/// Fatal exits tolerated per task before a full system reset.
pub const MAX_TASK_RESTARTS: u8 = 3;

/// Delay before a failed task is re-run (ms).
pub const TASK_RESTART_BACKOFF_MS: u64 = 500;

/// A task that ran at least this long before failing gets its budget back (ms).
pub const TASK_HEALTHY_RUN_MS: u64 = 60_000;

// GPIO / bus assignments (nRF52840-DK defaults)
//
// Logical names only; the concrete `embassy_nrf::peripherals::*` are
// picked in `main.rs`. Adjust for the robot's carrier board.
//
//   IMU SDA            → P0.26
//   IMU SCL            → P0.27
//   Left motor IN1/IN2 → P0.02 / P0.03
//   Right motor IN1/IN2→ P0.04 / P0.28
//   Left LED R/G/B     → P0.13 / P0.14 / P0.15
//   Right LED R/G/B    → P0.16 / P0.17 / P0.19

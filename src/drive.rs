//! Drive command decoding.
//!
//! The remote sends a full-circle heading plus a joystick position. The
//! robot only steers within a half circle, so a heading pointing behind it
//! is folded forward and the travel direction moves into the sign of the
//! magnitude. Quadrants are checked in this order:
//!
//! ```text
//!   90 < angle <= 180    heading = angle - 180   magnitude +
//!    0 < angle <= 90     heading = angle         magnitude -
//! -180 <= angle < -90    heading = angle + 180   magnitude +
//!   anything else        heading = angle         magnitude -
//! ```
//!
//! Speed is then `round(magnitude) / 10 * 1.3`.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;

use crate::codec;
use crate::config::{MAX_HEADING_DEG, SPEED_DIVISOR, SPEED_SCALE};
use crate::error::Error;
use crate::gatt::WriteSource;
use crate::robot::Robot;

/// Drive command as it arrives on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    pub angle_raw: i16,
    pub pos_x_raw: i16,
    pub pos_y_raw: i16,
}

impl DriveCommand {
    /// Euclidean length of the joystick position.
    ///
    /// Stays `f64` until after rounding: narrowing first can land a
    /// length just below `n.5` exactly on it.
    pub fn magnitude(&self) -> f64 {
        let x = f64::from(self.pos_x_raw);
        let y = f64::from(self.pos_y_raw);
        libm::sqrt(x * x + y * y)
    }
}

/// Decoded drive request: heading in `-90..=90` and a signed magnitude
/// (negative = reverse).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveIntent {
    pub angle: i16,
    pub magnitude: f64,
}

impl DriveIntent {
    /// Validate the heading and fold it into the front half circle.
    pub fn from_command(cmd: &DriveCommand) -> Result<Self, Error> {
        if !(-MAX_HEADING_DEG..=MAX_HEADING_DEG).contains(&cmd.angle_raw) {
            return Err(Error::AngleOutOfRange(cmd.angle_raw));
        }
        let (angle, magnitude) = normalize_quadrant(cmd.angle_raw, cmd.magnitude());
        Ok(Self { angle, magnitude })
    }

    /// Physical drive speed for this intent.
    pub fn speed(&self) -> f32 {
        scale_speed(self.magnitude)
    }
}

/// Map a full-circle heading/magnitude pair onto the front half circle.
///
/// Total over `i16`: values outside ±180 land in the last arm unchanged.
pub fn normalize_quadrant(angle_raw: i16, magnitude: f64) -> (i16, f64) {
    match angle_raw {
        91..=180 => (angle_raw - 180, magnitude),
        1..=90 => (angle_raw, -magnitude),
        -180..=-91 => (angle_raw + 180, magnitude),
        _ => (angle_raw, -magnitude),
    }
}

/// Convert a raw joystick magnitude into drive speed units.
pub fn scale_speed(magnitude: f64) -> f32 {
    (libm::round(magnitude) / SPEED_DIVISOR * SPEED_SCALE) as f32
}

/// Decode one control write and issue the drive command.
pub async fn handle_write<M, R>(robot: &Mutex<M, R>, payload: &[u8]) -> Result<DriveIntent, Error>
where
    M: RawMutex,
    R: Robot,
{
    let command = codec::decode_drive_command(payload)?;
    let intent = DriveIntent::from_command(&command)?;
    let speed = intent.speed();

    info!(
        "Drive: angle={} x={} y={} -> heading={} speed={}",
        command.angle_raw,
        command.pos_x_raw,
        command.pos_y_raw,
        intent.angle,
        speed
    );

    robot.lock().await.drive(speed, f32::from(intent.angle)).await;
    Ok(intent)
}

/// Listen on the control characteristic forever.
///
/// Bad writes are logged and dropped; the loop always goes back to
/// waiting for the next write.
pub async fn run<M, R, W>(writes: &mut W, robot: &Mutex<M, R>) -> !
where
    M: RawMutex,
    R: Robot,
    W: WriteSource,
{
    info!("Drive command listener started");

    loop {
        let payload = writes.written().await;
        if let Err(e) = handle_write(robot, &payload).await {
            warn!("Drive command discarded: {:?}", e);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::sim::SimulatedRobot;
    use embassy_futures::block_on;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn intent(angle_raw: i16, x: i16, y: i16) -> DriveIntent {
        DriveIntent::from_command(&DriveCommand {
            angle_raw,
            pos_x_raw: x,
            pos_y_raw: y,
        })
        .unwrap()
    }

    #[test]
    fn front_right_quadrant_reverses() {
        let i = intent(45, 0, 10);
        assert_eq!(i.angle, 45);
        assert_eq!(i.magnitude, -10.0);
    }

    #[test]
    fn back_right_quadrant_folds_forward() {
        let i = intent(135, 0, 10);
        assert_eq!(i.angle, -45);
        assert_eq!(i.magnitude, 10.0);
    }

    #[test]
    fn front_left_quadrant_reverses() {
        let i = intent(-45, 3, 4);
        assert_eq!(i.angle, -45);
        assert_eq!(i.magnitude, -5.0);
    }

    #[test]
    fn back_left_quadrant_folds_forward() {
        let i = intent(-135, 3, 4);
        assert_eq!(i.angle, 45);
        assert_eq!(i.magnitude, 5.0);
    }

    #[test]
    fn quadrant_boundaries() {
        assert_eq!(normalize_quadrant(180, 1.0), (0, 1.0));
        assert_eq!(normalize_quadrant(91, 1.0), (-89, 1.0));
        assert_eq!(normalize_quadrant(90, 1.0), (90, -1.0));
        assert_eq!(normalize_quadrant(1, 1.0), (1, -1.0));
        assert_eq!(normalize_quadrant(0, 1.0), (0, -1.0));
        assert_eq!(normalize_quadrant(-90, 1.0), (-90, -1.0));
        assert_eq!(normalize_quadrant(-91, 1.0), (89, 1.0));
        assert_eq!(normalize_quadrant(-180, 1.0), (0, 1.0));
    }

    #[test]
    fn normalized_heading_stays_within_half_circle() {
        for angle in -180..=180i16 {
            let (heading, _) = normalize_quadrant(angle, 1.0);
            assert!((-90..=90).contains(&heading), "angle {} -> {}", angle, heading);
        }
    }

    #[test]
    fn quadrant_fallback_passes_out_of_range_through() {
        assert_eq!(normalize_quadrant(181, 2.0), (181, -2.0));
        assert_eq!(normalize_quadrant(i16::MIN, 2.0), (i16::MIN, -2.0));
    }

    #[test]
    fn out_of_range_heading_is_rejected() {
        let cmd = DriveCommand {
            angle_raw: 181,
            pos_x_raw: 0,
            pos_y_raw: 10,
        };
        assert_eq!(
            DriveIntent::from_command(&cmd),
            Err(Error::AngleOutOfRange(181))
        );
        let cmd = DriveCommand {
            angle_raw: -181,
            ..cmd
        };
        assert_eq!(
            DriveIntent::from_command(&cmd),
            Err(Error::AngleOutOfRange(-181))
        );
    }

    #[test]
    fn speed_scaling_matches_reference_value() {
        assert_eq!(scale_speed(10.0), 1.3);
        assert_eq!(scale_speed(-10.0), -1.3);
        assert_eq!(scale_speed(0.0), 0.0);
    }

    #[test]
    fn speed_rounds_magnitude_first() {
        // |(1, 1)| = 1.414 rounds to 1 before scaling.
        let cmd = DriveCommand {
            angle_raw: 135,
            pos_x_raw: 1,
            pos_y_raw: 1,
        };
        let i = DriveIntent::from_command(&cmd).unwrap();
        assert_eq!(i.speed(), scale_speed(1.0));
    }

    #[test]
    fn magnitude_rounds_before_narrowing() {
        // |(316, 3988)| = 4000.49997, which is 4000.5 once narrowed to f32.
        let cmd = DriveCommand {
            angle_raw: 135,
            pos_x_raw: 316,
            pos_y_raw: 3988,
        };
        let i = DriveIntent::from_command(&cmd).unwrap();
        assert_eq!(i.speed(), 520.0);
    }

    #[test]
    fn magnitude_is_exact_at_i16_extremes() {
        let cmd = DriveCommand {
            angle_raw: 0,
            pos_x_raw: i16::MIN,
            pos_y_raw: 0,
        };
        assert_eq!(cmd.magnitude(), 32768.0);
    }

    #[test]
    fn handle_write_drives_robot() {
        let robot: Mutex<NoopRawMutex, _> = Mutex::new(SimulatedRobot::new());
        let payload = codec::encode_drive_command(&DriveCommand {
            angle_raw: 135,
            pos_x_raw: 0,
            pos_y_raw: 10,
        });

        let result = block_on(handle_write(&robot, &payload));
        assert_eq!(
            result,
            Ok(DriveIntent {
                angle: -45,
                magnitude: 10.0
            })
        );

        let robot = robot.try_lock().unwrap();
        let call = robot.last_drive().unwrap();
        assert_eq!(call.speed, 1.3);
        assert_eq!(call.angle_degrees, -45.0);
    }

    #[test]
    fn handle_write_rejects_malformed_without_driving() {
        let robot: Mutex<NoopRawMutex, _> = Mutex::new(SimulatedRobot::new());

        let result = block_on(handle_write(&robot, &[0x00, 0x2D, 0x00]));
        assert_eq!(
            result,
            Err(Error::MalformedPayload {
                expected: 6,
                actual: 3
            })
        );
        assert!(robot.try_lock().unwrap().drives().is_empty());
    }
}

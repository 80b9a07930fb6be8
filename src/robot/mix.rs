//! Differential drive mixing.
//!
//! Turns a (speed, heading) pair into per-side motor fractions:
//!
//! ```text
//! forward = speed / full_scale          (clamped to -1..1)
//! steer   = heading / 90°               (clamped to -1..1)
//! left    = forward * (1 + steer)
//! right   = forward * (1 - steer)
//! ```
//!
//! A positive heading turns right, a negative one left; at ±90° the inner
//! wheel stops and the outer one runs at twice the forward value
//! (clamped). The sign of `speed` selects forward or reverse travel.

/// Per-side motor command, each in `-1.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WheelDuty {
    pub left: f32,
    pub right: f32,
}

/// Mix a signed speed and a heading (degrees) into wheel duties.
pub fn differential(speed: f32, angle_degrees: f32, full_scale: f32) -> WheelDuty {
    if full_scale <= 0.0 {
        return WheelDuty {
            left: 0.0,
            right: 0.0,
        };
    }

    let forward = (speed / full_scale).clamp(-1.0, 1.0);
    let steer = (angle_degrees / 90.0).clamp(-1.0, 1.0);

    WheelDuty {
        left: (forward * (1.0 + steer)).clamp(-1.0, 1.0),
        right: (forward * (1.0 - steer)).clamp(-1.0, 1.0),
    }
}

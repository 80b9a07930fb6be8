//! Characteristic payload codec.
//!
//! Stateless mapping between application values and the fixed-length
//! byte layouts the companion app expects:
//!
//! ```text
//! Temperature      2 bytes   i16 big-endian, hundredths of a degree
//! Acceleration    12 bytes   3 x f32 little-endian (x, y, z)
//! Angular rate    12 bytes   3 x f32 little-endian (x, y, z)
//! Drive command    6 bytes   3 x i16 big-endian (angle, pos_x, pos_y)
//! Indicator        2 bytes   i16 big-endian (0 = off, 10 = on)
//! ```
//!
//! Integers and floats use opposite byte orders on the wire. That
//! asymmetry is part of the protocol and must not be "fixed".

use crate::drive::DriveCommand;
use crate::error::Error;
use crate::robot::Vector3;

/// Temperature payload size in bytes.
pub const TEMPERATURE_LEN: usize = 2;
/// Motion vector payload size in bytes.
pub const VECTOR3_LEN: usize = 12;
/// Drive command payload size in bytes.
pub const DRIVE_COMMAND_LEN: usize = 6;
/// Indicator command payload size in bytes.
pub const INDICATOR_COMMAND_LEN: usize = 2;

pub fn encode_temperature(centi_degrees: i16) -> [u8; TEMPERATURE_LEN] {
    centi_degrees.to_be_bytes()
}

pub fn encode_vector3(v: Vector3) -> [u8; VECTOR3_LEN] {
    let mut buf = [0u8; VECTOR3_LEN];
    buf[0..4].copy_from_slice(&v.x.to_le_bytes());
    buf[4..8].copy_from_slice(&v.y.to_le_bytes());
    buf[8..12].copy_from_slice(&v.z.to_le_bytes());
    buf
}

pub fn decode_vector3(data: &[u8]) -> Result<Vector3, Error> {
    let buf: [u8; VECTOR3_LEN] = exact(data)?;
    let axis = |i: usize| f32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
    Ok(Vector3::new(axis(0), axis(4), axis(8)))
}

pub fn encode_drive_command(cmd: &DriveCommand) -> [u8; DRIVE_COMMAND_LEN] {
    let mut buf = [0u8; DRIVE_COMMAND_LEN];
    buf[0..2].copy_from_slice(&cmd.angle_raw.to_be_bytes());
    buf[2..4].copy_from_slice(&cmd.pos_x_raw.to_be_bytes());
    buf[4..6].copy_from_slice(&cmd.pos_y_raw.to_be_bytes());
    buf
}

/// Decode a drive command write. Anything but exactly 6 bytes is malformed.
pub fn decode_drive_command(data: &[u8]) -> Result<DriveCommand, Error> {
    let buf: [u8; DRIVE_COMMAND_LEN] = exact(data)?;
    Ok(DriveCommand {
        angle_raw: i16::from_be_bytes([buf[0], buf[1]]),
        pos_x_raw: i16::from_be_bytes([buf[2], buf[3]]),
        pos_y_raw: i16::from_be_bytes([buf[4], buf[5]]),
    })
}

pub fn encode_indicator_command(value: i16) -> [u8; INDICATOR_COMMAND_LEN] {
    value.to_be_bytes()
}

/// Decode an indicator command write. Anything but exactly 2 bytes is malformed.
pub fn decode_indicator_command(data: &[u8]) -> Result<i16, Error> {
    let buf: [u8; INDICATOR_COMMAND_LEN] = exact(data)?;
    Ok(i16::from_be_bytes(buf))
}

fn exact<const N: usize>(data: &[u8]) -> Result<[u8; N], Error> {
    data.try_into().map_err(|_| Error::MalformedPayload {
        expected: N,
        actual: data.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_is_big_endian() {
        assert_eq!(encode_temperature(2150), [0x08, 0x66]);
        assert_eq!(encode_temperature(-1), [0xFF, 0xFF]);
    }

    #[test]
    fn temperature_placeholder_keeps_marker_bits() {
        let bytes = encode_temperature(crate::config::TEMPERATURE_PLACEHOLDER_CENTI);
        assert_eq!(bytes, [0xAB, 0xCD]);
    }

    #[test]
    fn vector3_is_three_little_endian_floats() {
        let bytes = encode_vector3(Vector3::new(1.0, -2.0, 0.5));
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x00, 0xC0]);
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x00, 0x3F]);
    }

    #[test]
    fn vector3_decodes_what_it_encodes() {
        let v = Vector3::new(0.012, -9.81, 123.456);
        assert_eq!(decode_vector3(&encode_vector3(v)), Ok(v));
    }

    #[test]
    fn vector3_rejects_short_input() {
        assert_eq!(
            decode_vector3(&[0u8; 8]),
            Err(Error::MalformedPayload {
                expected: 12,
                actual: 8
            })
        );
    }

    #[test]
    fn drive_command_fields_are_big_endian_in_order() {
        let data = [0x00, 0x2D, 0xFF, 0xFD, 0x01, 0x00];
        let cmd = decode_drive_command(&data).unwrap();
        assert_eq!(cmd.angle_raw, 45);
        assert_eq!(cmd.pos_x_raw, -3);
        assert_eq!(cmd.pos_y_raw, 256);
    }

    #[test]
    fn drive_command_extremes_survive_encoding() {
        for (a, x, y) in [
            (i16::MIN, i16::MAX, 0),
            (i16::MAX, i16::MIN, -1),
            (-180, 180, 90),
        ] {
            let cmd = DriveCommand {
                angle_raw: a,
                pos_x_raw: x,
                pos_y_raw: y,
            };
            assert_eq!(decode_drive_command(&encode_drive_command(&cmd)), Ok(cmd));
        }
    }

    fn i16_sweep() -> impl Iterator<Item = i16> {
        (i16::MIN..=i16::MAX).step_by(97).chain([i16::MAX, -1, 0, 1])
    }

    #[test]
    fn drive_command_survives_i16_sweep_on_every_field() {
        for v in i16_sweep() {
            for cmd in [
                DriveCommand {
                    angle_raw: v,
                    pos_x_raw: 7,
                    pos_y_raw: -7,
                },
                DriveCommand {
                    angle_raw: 7,
                    pos_x_raw: v,
                    pos_y_raw: -7,
                },
                DriveCommand {
                    angle_raw: 7,
                    pos_x_raw: -7,
                    pos_y_raw: v,
                },
            ] {
                assert_eq!(decode_drive_command(&encode_drive_command(&cmd)), Ok(cmd));
            }
        }
    }

    #[test]
    fn indicator_command_survives_full_i16_range() {
        for v in i16::MIN..=i16::MAX {
            assert_eq!(decode_indicator_command(&encode_indicator_command(v)), Ok(v));
        }
    }

    #[test]
    fn drive_command_wrong_length_is_malformed() {
        assert_eq!(
            decode_drive_command(&[]),
            Err(Error::MalformedPayload {
                expected: 6,
                actual: 0
            })
        );
        assert_eq!(
            decode_drive_command(&[0u8; 5]),
            Err(Error::MalformedPayload {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(
            decode_drive_command(&[0u8; 7]),
            Err(Error::MalformedPayload {
                expected: 6,
                actual: 7
            })
        );
    }

    #[test]
    fn indicator_command_is_big_endian() {
        assert_eq!(decode_indicator_command(&[0x00, 0x0A]), Ok(10));
        assert_eq!(decode_indicator_command(&[0x80, 0x00]), Ok(i16::MIN));
        assert_eq!(encode_indicator_command(10), [0x00, 0x0A]);
    }

    #[test]
    fn indicator_command_wrong_length_is_malformed() {
        assert_eq!(
            decode_indicator_command(&[0x0A]),
            Err(Error::MalformedPayload {
                expected: 2,
                actual: 1
            })
        );
        assert!(decode_indicator_command(&[0, 0, 0]).is_err());
    }
}

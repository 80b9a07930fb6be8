//! LSM6DSOX 6-axis IMU over I²C.
//!
//! Configured for 104 Hz, ±4 g and ±500 dps; readings are converted to g
//! and °/s.

use defmt::info;
use embedded_hal_async::i2c::I2c;

use alvik_ble::robot::Vector3;

const ADDR: u8 = 0x6A;

const WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_VALUE: u8 = 0x6C;
const CTRL1_XL: u8 = 0x10;
const CTRL2_G: u8 = 0x11;
const CTRL3_C: u8 = 0x12;
const OUTX_L_G: u8 = 0x22;
const OUTX_L_A: u8 = 0x28;

/// 104 Hz, ±4 g.
const CTRL1_XL_104HZ_4G: u8 = 0x48;
/// 104 Hz, ±500 dps.
const CTRL2_G_104HZ_500DPS: u8 = 0x44;
/// Block data update, register auto-increment.
const CTRL3_C_BDU_IF_INC: u8 = 0x44;

/// g per LSB at ±4 g.
const ACCEL_SENSITIVITY: f32 = 0.000_122;
/// °/s per LSB at ±500 dps.
const GYRO_SENSITIVITY: f32 = 0.017_5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ImuError {
    Bus,
    DeviceMissing,
}

pub struct Lsm6dsox<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Lsm6dsox<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub async fn init(&mut self) -> Result<(), ImuError> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(ADDR, &[WHO_AM_I], &mut id)
            .await
            .map_err(|_| ImuError::Bus)?;
        if id[0] != WHO_AM_I_VALUE {
            return Err(ImuError::DeviceMissing);
        }

        for (reg, value) in [
            (CTRL3_C, CTRL3_C_BDU_IF_INC),
            (CTRL1_XL, CTRL1_XL_104HZ_4G),
            (CTRL2_G, CTRL2_G_104HZ_500DPS),
        ] {
            self.i2c
                .write(ADDR, &[reg, value])
                .await
                .map_err(|_| ImuError::Bus)?;
        }

        info!("LSM6DSOX: online (+/-4g, 500dps)");
        Ok(())
    }

    /// Acceleration in g.
    pub async fn acceleration(&mut self) -> Result<Vector3, ImuError> {
        self.read_axes(OUTX_L_A, ACCEL_SENSITIVITY).await
    }

    /// Angular rate in °/s.
    pub async fn angular_rate(&mut self) -> Result<Vector3, ImuError> {
        self.read_axes(OUTX_L_G, GYRO_SENSITIVITY).await
    }

    async fn read_axes(&mut self, first_reg: u8, scale: f32) -> Result<Vector3, ImuError> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(ADDR, &[first_reg], &mut buf)
            .await
            .map_err(|_| ImuError::Bus)?;

        let axis = |i: usize| f32::from(i16::from_le_bytes([buf[i], buf[i + 1]])) * scale;
        Ok(Vector3::new(axis(0), axis(2), axis(4)))
    }
}

//! Two brushed motors on H-bridges, driven by one 4-channel PWM.
//!
//! Channel layout: 0/1 = left IN1/IN2, 2/3 = right IN1/IN2. Forward drives
//! IN1 with the duty and holds IN2 low; reverse swaps them.

use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::{Prescaler, SimplePwm};

use alvik_ble::robot::mix::WheelDuty;

/// 16 MHz / 1000 = 16 kHz, above the audible range.
const MAX_DUTY: u16 = 1000;

pub struct Motors {
    pwm: SimplePwm<'static, PWM0>,
}

impl Motors {
    pub fn new(mut pwm: SimplePwm<'static, PWM0>) -> Self {
        pwm.set_prescaler(Prescaler::Div1);
        pwm.set_max_duty(MAX_DUTY);
        let mut motors = Self { pwm };
        motors.stop();
        motors
    }

    pub fn set(&mut self, duty: WheelDuty) {
        self.set_side(0, duty.left);
        self.set_side(2, duty.right);
    }

    pub fn stop(&mut self) {
        self.set(WheelDuty {
            left: 0.0,
            right: 0.0,
        });
    }

    fn set_side(&mut self, in1: usize, fraction: f32) {
        let level = (libm::fabsf(fraction).min(1.0) * f32::from(MAX_DUTY)) as u16;
        let (fwd, rev) = if fraction >= 0.0 { (level, 0) } else { (0, level) };
        self.pwm.set_duty(in1, fwd);
        self.pwm.set_duty(in1 + 1, rev);
    }
}

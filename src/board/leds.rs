//! RGB indicator LEDs, one GPIO per colour channel (active high).

use embedded_hal::digital::{OutputPin, PinState};

use alvik_ble::robot::Rgb;

pub struct RgbLed<P> {
    r: P,
    g: P,
    b: P,
}

impl<P: OutputPin> RgbLed<P> {
    pub fn new(r: P, g: P, b: P) -> Self {
        Self { r, g, b }
    }

    pub fn set(&mut self, color: Rgb) {
        // GPIO writes on the nRF are infallible.
        let _ = self.r.set_state(PinState::from(color.r));
        let _ = self.g.set_state(PinState::from(color.g));
        let _ = self.b.set_state(PinState::from(color.b));
    }
}

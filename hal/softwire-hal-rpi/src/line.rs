//! Mode-switched GPIO line
//!
//! An `IoPin` in input mode is tri-stated and the pull-up takes the
//! line high; switching it to output mode drives the line to whatever
//! the output latch holds. [`RpiLine::preset_low`] programs that latch
//! LOW while the pin is still an input, so the switch to the driven
//! state never transiently asserts HIGH.

use rppal::gpio::{Gpio, IoPin, Level, Mode};
use softwire_hal::line::{BusLine, LineState};

/// One open-drain bus line on the Raspberry Pi expansion header.
pub struct RpiLine {
    pin: IoPin,
}

impl RpiLine {
    /// Claim a GPIO (BCM numbering) as a bus line.
    ///
    /// The pin starts released. Call [`BusLine::preset_low`] before the
    /// first drive; the bus engine's `init` does this for both lines.
    pub fn new(gpio: &Gpio, pin: u8) -> Result<Self, rppal::gpio::Error> {
        let pin = gpio.get(pin)?.into_io(Mode::Input);
        Ok(Self { pin })
    }
}

impl BusLine for RpiLine {
    fn set_state(&mut self, state: LineState) {
        match state {
            LineState::Released => self.pin.set_mode(Mode::Input),
            LineState::DrivenLow => self.pin.set_mode(Mode::Output),
        }
    }

    fn preset_low(&mut self) {
        // Writes the output latch only; the pin stays in its current mode.
        self.pin.set_low();
    }

    fn is_high(&self) -> bool {
        self.pin.read() == Level::High
    }
}

//! Open-drain bus line abstraction
//!
//! A two-wire bus line is never driven high: a device may only pull it
//! low or let go of it, and the external pull-up supplies the high
//! level. These traits express that contract so the bus engine cannot
//! request an active high drive even by accident.

/// Logical state of an open-drain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Tri-stated; the external pull-up takes the line HIGH.
    Released,
    /// Actively driven LOW.
    DrivenLow,
}

/// One open-drain line of a two-wire bus.
///
/// Implementations map the two states onto the platform's pin mode
/// switch: input mode releases the line, output mode drives it to the
/// pin's latched output value.
///
/// # Glitch-free contract
///
/// Switching to [`LineState::DrivenLow`] applies the pin's currently
/// latched output value the instant the line becomes driven. Callers
/// must invoke [`preset_low`](BusLine::preset_low) once, while the line
/// is still released, before the first switch to the driven state;
/// implementations must then guarantee the transition never transiently
/// asserts HIGH.
pub trait BusLine {
    /// Put the line in the given state.
    fn set_state(&mut self, state: LineState);

    /// Release the line; the pull-up takes it HIGH.
    fn release(&mut self) {
        self.set_state(LineState::Released);
    }

    /// Drive the line LOW.
    fn drive_low(&mut self) {
        self.set_state(LineState::DrivenLow);
    }

    /// Program the output latch LOW without changing the current state.
    fn preset_low(&mut self);

    /// Sample the electrical level. `true` = HIGH.
    fn is_high(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal line that just remembers its state
    struct StubLine {
        state: LineState,
        latch_low: bool,
    }

    impl BusLine for StubLine {
        fn set_state(&mut self, state: LineState) {
            self.state = state;
        }

        fn preset_low(&mut self) {
            self.latch_low = true;
        }

        fn is_high(&self) -> bool {
            self.state == LineState::Released
        }
    }

    #[test]
    fn test_convenience_methods_map_to_set_state() {
        let mut line = StubLine {
            state: LineState::Released,
            latch_low: false,
        };

        line.drive_low();
        assert_eq!(line.state, LineState::DrivenLow);
        assert!(!line.is_high());

        line.release();
        assert_eq!(line.state, LineState::Released);
        assert!(line.is_high());
    }

    #[test]
    fn test_preset_does_not_change_state() {
        let mut line = StubLine {
            state: LineState::Released,
            latch_low: false,
        };

        line.preset_low();
        assert_eq!(line.state, LineState::Released);
        assert!(line.latch_low);
    }
}

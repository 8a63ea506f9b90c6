//! Bit-banged two-wire master
//!
//! The engine owns the two open-drain lines of a bus and a target
//! device address, and produces every signal transition in software.
//! There is no clock source: the clock line is toggled explicitly, and
//! a pluggable [`Wait`] hook runs between edges (a no-op by default).
//!
//! # Framing
//!
//! ```text
//! START:          SDA ‾‾\___   while SCL high, then SCL drops
//! STOP:           SCL rises, then SDA ___/‾‾ while SCL high
//! REPEATED-START: SCL rises, then a START
//! ```
//!
//! Bytes move most-significant-bit first in both directions. Data may
//! change only while the clock is held low and must be stable before
//! the clock rises. After each byte the data line is handed to the
//! receiving side for one acknowledge clock: LOW means acknowledged,
//! a released (HIGH) line means no device answered.

use softwire_hal::delay::{NoWait, Wait};
use softwire_hal::line::BusLine;

/// Highest valid 7-bit device address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Transfer direction encoded in the low bit of the address byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master writes to the device (R/W bit = 0).
    Write,
    /// Master reads from the device (R/W bit = 1).
    Read,
}

/// Build the first byte of a transaction: the 7-bit address shifted up
/// one, with the direction in the low bit.
pub fn address_byte(address: u8, direction: Direction) -> u8 {
    debug_assert!(address <= MAX_ADDRESS);
    (address << 1)
        | match direction {
            Direction::Write => 0,
            Direction::Read => 1,
        }
}

/// Software two-wire master over a pair of open-drain lines.
///
/// `C` is the clock line, `D` the data line. A value of this type has
/// exclusive ownership of both lines; nothing else may toggle them
/// while it exists. All operations are synchronous and run to
/// completion on the calling thread.
pub struct SoftI2c<C, D, W = NoWait> {
    scl: C,
    sda: D,
    wait: W,
    address: u8,
}

impl<C: BusLine, D: BusLine> SoftI2c<C, D> {
    /// Create a master for the device at `address` with the default
    /// no-op wait strategy.
    pub fn new(scl: C, sda: D, address: u8) -> Self {
        Self::with_wait(scl, sda, address, NoWait)
    }
}

impl<C: BusLine, D: BusLine, W: Wait> SoftI2c<C, D, W> {
    /// Create a master with an explicit wait strategy.
    pub fn with_wait(scl: C, sda: D, address: u8, wait: W) -> Self {
        debug_assert!(address <= MAX_ADDRESS);
        Self {
            scl,
            sda,
            wait,
            address,
        }
    }

    /// Bring both lines to the idle state: released, with the output
    /// latches preset LOW.
    ///
    /// The preset happens while the lines are still released, so a
    /// later switch to the driven state cannot glitch HIGH. Calling
    /// this twice leaves the bus exactly as one call does.
    pub fn init(&mut self) {
        self.scl.release();
        self.sda.release();
        self.scl.preset_low();
        self.sda.preset_low();
    }

    /// Start condition: data falls while the clock is high.
    fn start(&mut self) {
        self.sda.drive_low();
        self.wait.wait();
        self.scl.drive_low();
        self.wait.wait();
    }

    /// Stop condition: clock rises first, then data releases while the
    /// clock is high.
    fn stop(&mut self) {
        self.scl.release();
        self.wait.wait();
        self.sda.release();
        self.wait.wait();
    }

    /// Repeated start: release the clock, then a start, without an
    /// intervening stop.
    fn repeated_start(&mut self) {
        self.scl.release();
        self.wait.wait();
        self.sda.drive_low();
        self.wait.wait();
        self.scl.drive_low();
        self.wait.wait();
    }

    /// Shift one byte out, most-significant bit first, then sample the
    /// acknowledge bit. Returns `true` if no device pulled the data
    /// line low (NACK).
    fn write_byte(&mut self, value: u8) -> bool {
        let mut value = value;
        self.wait.wait();

        for _ in 0..8 {
            if value & 0x80 != 0 {
                self.sda.release();
            } else {
                self.sda.drive_low();
            }
            value <<= 1;
            self.wait.wait();
            self.scl.release();
            self.wait.wait();
            self.scl.drive_low();
            self.wait.wait();
        }

        // Hand the data line to the addressed device for the
        // acknowledge clock.
        self.sda.release();
        self.wait.wait();
        self.scl.release();
        self.wait.wait();
        let nack = self.sda.is_high();
        self.scl.drive_low();

        nack
    }

    /// Shift one byte in, most-significant bit first, then drive the
    /// acknowledge bit: LOW to acknowledge, released for the final
    /// byte of a read (`nack = true`).
    fn read_byte(&mut self, nack: bool) -> u8 {
        self.sda.release();
        self.wait.wait();

        let mut value = 0u8;
        for _ in 0..8 {
            self.scl.release();
            self.wait.wait();
            value <<= 1;
            if self.sda.is_high() {
                value |= 1;
            }
            self.scl.drive_low();
            self.wait.wait();
        }

        if nack {
            self.sda.release();
        } else {
            self.sda.drive_low();
        }
        self.wait.wait();
        self.scl.release();
        self.wait.wait();
        self.scl.drive_low();
        self.wait.wait();

        value
    }

    /// Address `addr` in write direction and report whether it
    /// acknowledged. This is the only operation that interprets the
    /// acknowledge bit.
    pub fn probe(&mut self, addr: u8) -> bool {
        self.start();
        let nack = self.write_byte(address_byte(addr, Direction::Write));
        self.stop();
        !nack
    }

    /// Probe every address 0..=[`MAX_ADDRESS`] in order and collect the
    /// responders.
    pub fn scan(&mut self) -> heapless::Vec<u8, 128> {
        let mut found = heapless::Vec::new();
        for addr in 0..=MAX_ADDRESS {
            if self.probe(addr) {
                let _ = found.push(addr);
            }
        }
        found
    }

    /// Write one byte to a device register. `None` skips the register
    /// byte for devices that take data directly after the address.
    ///
    /// Acknowledge bits are not checked; every phase runs regardless.
    pub fn write_register(&mut self, register: Option<u8>, data: u8) {
        self.start();
        self.write_byte(address_byte(self.address, Direction::Write));
        if let Some(register) = register {
            self.write_byte(register);
        }
        self.write_byte(data);
        self.stop();
    }

    /// Read one byte from a device register: select the register in
    /// write direction, repeated-start into read direction, read a
    /// single byte and leave it unacknowledged.
    ///
    /// Acknowledge bits are not checked; every phase runs regardless.
    pub fn read_register(&mut self, register: u8) -> u8 {
        self.start();
        self.write_byte(address_byte(self.address, Direction::Write));
        self.write_byte(register);
        self.repeated_start();
        self.write_byte(address_byte(self.address, Direction::Read));
        let value = self.read_byte(true);
        self.stop();
        value
    }
}

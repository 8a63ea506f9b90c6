//! Board-agnostic bus engine for the Softwire two-wire master
//!
//! This crate contains the protocol logic and nothing else: open-drain
//! line handling, start/stop/repeated-start framing, byte transfer with
//! acknowledgment, and the register operations built on top. It is
//! generic over the `softwire-hal` line driver traits, so the same
//! engine runs against real header pins or a simulated wire in tests.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod master;

pub use master::{address_byte, Direction, SoftI2c, MAX_ADDRESS};

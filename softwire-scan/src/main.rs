//! Bus scanner for the Raspberry Pi expansion header
//!
//! Probes every 7-bit address on the bit-banged two-wire bus and
//! prints a presence grid: the address in hex for responders, `--`
//! otherwise, sixteen entries per row.
//!
//! ```text
//! $ softwire-scan
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! 50 -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! -- -- -- -- -- -- -- -- -- -- -- -- -- -- -- --
//! ```

use anyhow::Result;
use rppal::gpio::Gpio;
use softwire_core::{SoftI2c, MAX_ADDRESS};
use softwire_hal_rpi::RpiLine;

/// Clock on BCM GPIO 3 (header pin 5), data on BCM GPIO 2 (header
/// pin 3): the header's dedicated bus pins with on-board pull-ups.
const SCL_PIN: u8 = 3;
const SDA_PIN: u8 = 2;

/// Entries per output row.
const ROW_WIDTH: u8 = 16;

fn main() -> Result<()> {
    let gpio = Gpio::new()?;
    let scl = RpiLine::new(&gpio, SCL_PIN)?;
    let sda = RpiLine::new(&gpio, SDA_PIN)?;

    let mut bus = SoftI2c::new(scl, sda, 0);
    bus.init();

    print!("{}", render_grid(|addr| bus.probe(addr)));
    Ok(())
}

/// Render the presence grid over addresses `0..=MAX_ADDRESS`.
///
/// Each entry is followed by a space, except every [`ROW_WIDTH`]th,
/// which is followed by a newline.
fn render_grid(mut probe: impl FnMut(u8) -> bool) -> String {
    let mut grid = String::new();
    for addr in 0..=MAX_ADDRESS {
        if probe(addr) {
            grid.push_str(&format!("{addr:02x}"));
        } else {
            grid.push_str("--");
        }
        grid.push(if addr % ROW_WIDTH < ROW_WIDTH - 1 {
            ' '
        } else {
            '\n'
        });
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_places_device_at_row_and_column() {
        let grid = render_grid(|addr| addr == 0x50);

        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 8);
        // 0x50 = 80 = 5 * 16 + 0: row 5, column 0.
        assert!(rows[5].starts_with("50 --"));
        for (i, row) in rows.iter().enumerate() {
            if i != 5 {
                assert_eq!(*row, "-- ".repeat(15) + "--");
            }
        }
        assert_eq!(grid.matches("50").count(), 1);
    }

    #[test]
    fn test_grid_of_empty_bus() {
        let grid = render_grid(|_| false);

        // 128 entries of two characters plus one separator each.
        assert_eq!(grid.len(), 128 * 3);
        assert_eq!(grid.chars().filter(|c| *c == '\n').count(), 8);
        assert!(!grid.contains(|c: char| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_grid_row_format() {
        let grid = render_grid(|addr| addr == 0x00 || addr == 0x0F);

        let first = grid.lines().next().unwrap();
        assert_eq!(first, "00 -- -- -- -- -- -- -- -- -- -- -- -- -- -- 0f");
    }
}

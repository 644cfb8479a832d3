//! Linux spidev transport
//!
//! Opens `/dev/spidev0.<bus>` through `linux-embedded-hal` and claims the
//! data/command GPIO line, returning a ready [`Interface`] for
//! [`Display`](crate::display::Display). This is the transport used on the
//! Raspberry Pi class of hosts; on bare-metal targets, construct
//! [`Interface`] directly from the HAL's SPI device and pin types.
//!
//! Opening the device can fail and is fatal to session startup. Applying
//! the bus configuration cannot: the mode, word size, and clock rate are
//! each applied separately, and a rejected setting is logged while the bus
//! carries on with whatever configuration remains in effect.
//!
//! The DC line is requested as an output at its default data level. Both
//! the bus handle and the line are released when the interface (or the
//! handles returned by [`Interface::release`]) is dropped; a double release
//! is harmless.
//!
//! ## Example
//!
//! ```rust,no_run
//! use linux_embedded_hal::Delay;
//! use st7789::{spidev, Builder, Dimensions, Display};
//!
//! let interface = match spidev::open(0, &spidev::BusConfig::default()) {
//!     Ok(interface) => interface,
//!     Err(_) => return,
//! };
//! let dims = match Dimensions::new(240, 240) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! display.init(&mut Delay);
//! ```

use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags, errors};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, SPIError, SpidevDevice};
use log::warn;
use std::format;
use std::string::String;

use crate::interface::Interface;

/// Default SPI clock rate in Hz (62.5 MHz)
pub const DEFAULT_CLOCK_HZ: u32 = 62_500_000;

/// Default GPIO line for the data/command select signal
pub const DEFAULT_DC_LINE: u32 = 17;

/// SPI word size; the ST7789 serial interface is byte oriented
const WORD_BITS: u8 = 8;

/// Consumer label attached to the requested GPIO line
const DC_CONSUMER: &str = "st7789-dc";

/// Bus parameters for [`open`]
#[derive(Clone, Debug)]
pub struct BusConfig {
    /// SPI clock rate in Hz
    pub clock_hz: u32,
    /// SPI mode flags (clock polarity/phase)
    pub mode: SpiModeFlags,
    /// GPIO character device holding the DC line
    pub gpio_chip: String,
    /// GPIO line number of the DC signal
    pub dc_line: u32,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            clock_hz: DEFAULT_CLOCK_HZ,
            // Mode 0: no inversion, sample on leading edge
            mode: SpiModeFlags::SPI_MODE_0,
            gpio_chip: String::from("/dev/gpiochip0"),
            dc_line: DEFAULT_DC_LINE,
        }
    }
}

/// The interface type produced by [`open`]
pub type SpidevInterface = Interface<SpidevDevice, CdevPin>;

/// Errors that prevent the transport from opening
#[derive(Debug)]
pub enum OpenError {
    /// The spidev device node could not be opened
    Spi(SPIError),
    /// The DC GPIO line could not be claimed
    Gpio(errors::Error),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI device could not be opened: {e}"),
            Self::Gpio(e) => write!(f, "DC line could not be claimed: {e}"),
        }
    }
}

impl std::error::Error for OpenError {}

/// Open SPI bus `spidev0.<bus>` and claim the DC line.
///
/// Configuration is applied parameter by parameter; a rejected parameter is
/// logged and skipped rather than failing the open, so the bus may run with
/// a configuration that differs from the requested one.
///
/// # Errors
///
/// Returns [`OpenError`] if the device node or the GPIO line cannot be
/// obtained. No draw call is valid after that.
pub fn open(bus: u8, config: &BusConfig) -> Result<SpidevInterface, OpenError> {
    let mut spi = SpidevDevice::open(format!("/dev/spidev0.{bus}")).map_err(OpenError::Spi)?;

    let settings = [
        ("SPI mode", SpidevOptions::new().mode(config.mode).build()),
        (
            "word size",
            SpidevOptions::new().bits_per_word(WORD_BITS).build(),
        ),
        (
            "clock rate",
            SpidevOptions::new().max_speed_hz(config.clock_hz).build(),
        ),
    ];
    for (name, options) in &settings {
        if let Err(e) = spi.configure(options) {
            warn!("bus {name} configuration rejected: {e}");
        }
    }

    let mut chip = Chip::new(&config.gpio_chip).map_err(OpenError::Gpio)?;
    let handle = chip
        .get_line(config.dc_line)
        .map_err(OpenError::Gpio)?
        .request(LineRequestFlags::OUTPUT, 1, DC_CONSUMER)
        .map_err(OpenError::Gpio)?;
    let dc = CdevPin::new(handle).map_err(OpenError::Gpio)?;

    Ok(Interface::new(spi, dc))
}

//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`]
//! struct for communicating with the ST7789 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The ST7789 requires:
//! - SPI bus (MOSI + SCK, chip select handled by the SPI device)
//! - 1 GPIO pin:
//!   - **DC**: Data/Command select (output, low = command, high = data)
//!
//! The DC line is a shared mode latch, not a per-byte strobe: the controller
//! samples it per byte, but consecutive transfers of the same kind need no
//! edge. [`Interface`] therefore writes the pin only when the transfer kind
//! changes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7789::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Create interface with SPI device and DC pin
//! let mut interface = Interface::new(MockSpi, MockPin);
//!
//! // Send command
//! let _ = interface.send_command(0x01); // Soft reset
//!
//! // Send data
//! let _ = interface.send_data(&[0x00, 0x0A, 0x00, 0x14]);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use log::warn;

/// Trait for hardware interface to the ST7789 controller
///
/// This trait abstracts over different hardware implementations, allowing
/// [`Display`](crate::display::Display) to work with any SPI + GPIO
/// implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need custom
/// behavior (e.g., a parallel bus or an inverted DC line), implement this
/// trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting. Callers in this crate
    /// log interface errors and continue; they never propagate them.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Put the bus in command mode (DC low)
    /// 2. Send the command byte over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Put the bus in data mode (DC high)
    /// 2. Send the data bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// DC pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Transfer kind latched on the DC line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// DC low
    Command,
    /// DC high
    Data,
}

/// Hardware interface implementation for the ST7789
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO
/// traits, tracking the DC level so the line is only written on a
/// command/data transition.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
pub struct Interface<SPI, DC> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Kind of the previous transfer; the DC line currently holds this level
    mode: Mode,
}

impl<SPI, DC> Interface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    /// Create a new Interface
    ///
    /// Drives the DC pin to its default data level. A pin failure here is
    /// logged rather than propagated; the first command transfer rewrites
    /// the line anyway.
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    pub fn new(spi: SPI, mut dc: DC) -> Self {
        if let Err(e) = dc.set_high() {
            warn!("DC line could not be driven to data level: {e:?}");
        }
        Self {
            spi,
            dc,
            mode: Mode::Data,
        }
    }

    /// Release the underlying SPI device and DC pin.
    ///
    /// Dropping the returned handles closes the bus; both closes are
    /// idempotent at the resource level, so releasing an interface whose
    /// bus already vanished is harmless.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    /// Write the DC line, but only on a command/data transition.
    fn set_mode(&mut self, mode: Mode) -> Result<(), InterfaceError<SPI::Error, DC::Error>> {
        if self.mode == mode {
            return Ok(());
        }
        match mode {
            Mode::Command => self.dc.set_low().map_err(InterfaceError::Pin)?,
            Mode::Data => self.dc.set_high().map_err(InterfaceError::Pin)?,
        }
        self.mode = mode;
        Ok(())
    }
}

impl<SPI, DC> DisplayInterface for Interface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.set_mode(Mode::Command)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.set_mode(Mode::Data)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }
}

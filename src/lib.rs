//! ST7789 TFT-LCD Display Driver
//!
//! A driver for the ST7789 TFT-LCD controller behind the 240x240 panels of
//! small monitoring devices, covering windowed pixel blits, pre-encoded
//! icon drawing with optional recoloring, and bitmap-font text rendering.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Windowed address protocol with bounded pixel-stream chunking
//! - Stencil recoloring: one bitmap drawn in any color at draw time
//! - Two-pass glyph compositing (whole strings blitted as one rectangle)
//! - Linux `spidev` transport (with the `spidev` feature)
//!
//! ## Design
//!
//! The session is strictly single-owner and synchronous: every operation
//! takes `&mut self`, blocks for the bus exchange plus any settle delay,
//! and two consecutive draw calls reach the panel in issue order. Bus
//! transfer failures are logged and swallowed (the panel tolerates an
//! occasional dropped write), so draw calls only fail on requests that are
//! invalid before touching the bus.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7789::{Builder, Dimensions, Display, Icon, Interface, Rgb565};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc);
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
//! display.init(&mut delay);
//!
//! // A 2x2 stencil drawn in red.
//! static DOT: [u16; 4] = [0, 0xFFFF, 0xFFFF, 0];
//! let icon = match Icon::new(2, &DOT) {
//!     Ok(icon) => icon,
//!     Err(_) => return,
//! };
//! let _ = display.draw_icon_recolored(10, 10, &icon, Rgb565::RED, &mut delay);
//!
//! display.sleep(&mut delay);
//! let _ = display.release();
//! ```
//!
//! On a Linux host with the `spidev` feature, replace the mock wiring with
//! [`spidev::open`] and `linux_embedded_hal::Delay`.

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// 16-bit color handling for the 5-6-5 pixel format
pub mod color;
/// ST7789 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display session and blit operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Bitmap font asset interface
pub mod font;
/// Pre-encoded icon asset interface
pub mod icon;
/// Hardware interface abstraction
pub mod interface;
/// Bounded pixel-stream writer
pub mod writer;

/// Glyph compositing for string rendering (requires `text` feature)
#[cfg(feature = "text")]
mod text;

/// Linux spidev transport (requires `spidev` feature)
#[cfg(feature = "spidev")]
pub mod spidev;

pub use color::Rgb565;
pub use config::{Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS};
pub use display::{Display, Window};
pub use error::{BuilderError, Error};
pub use font::{Font, Glyph};
pub use icon::Icon;
pub use interface::{DisplayInterface, Interface, InterfaceError};
pub use writer::{CHUNK_BYTES, ChunkWriter};

//! Error types for the driver
//!
//! This module defines error types for configuration building
//! ([`BuilderError`]) and draw-call validation ([`Error`]).
//!
//! Bus-level failures are deliberately absent here: the panel tolerates an
//! occasional dropped write, so transfers that fail are logged through the
//! `log` crate and the draw call carries on. [`Error`] covers only caller
//! mistakes the driver can detect before touching the bus.
//!
//! ## Example
//!
//! ```
//! use st7789::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(500, 100); // Too wide
//! assert!(result.is_err());
//! ```

/// Maximum columns (source outputs) supported by the ST7789 controller
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows addressable through the one-byte window bounds
///
/// The controller itself drives up to 320 gate outputs, but the window
/// protocol encodes each bound as a single zero-extended byte.
pub const MAX_ROWS: u16 = 256;

/// Errors a draw call can detect before touching the bus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested blit does not fit on the panel
    WindowOutOfBounds {
        /// Left column of the blit
        x: u8,
        /// Top row of the blit
        y: u8,
        /// Blit width in pixels
        width: u32,
        /// Blit height in pixels
        height: u32,
    },
    /// A window rectangle ended before it started
    InvalidWindow,
    /// A character code falls outside the font's contiguous glyph range
    UnsupportedCharacter {
        /// The offending character code
        code: u8,
    },
    /// An icon's pixel count is not a multiple of its declared width
    InvalidIconGeometry {
        /// Number of pixel words supplied
        len: usize,
        /// Declared icon width
        width: u16,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WindowOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Blit out of bounds: {width}x{height} at ({x}, {y})"
                )
            }
            Self::InvalidWindow => write!(f, "Window end precedes its start"),
            Self::UnsupportedCharacter { code } => {
                write!(f, "Character code {code:#04X} not covered by font")
            }
            Self::InvalidIconGeometry { len, width } => {
                write!(
                    f,
                    "Icon of {len} pixels cannot have width {width}"
                )
            }
        }
    }
}

impl core::error::Error for Error {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of columns (width) requested
        cols: u16,
        /// Number of rows (height) requested
        rows: u16,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { cols, rows } => write!(
                f,
                "Invalid dimensions {cols}x{rows} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns (width in pixels, corresponds to source outputs)
    pub cols: u16,
    /// Number of rows (height in pixels, corresponds to gate outputs)
    pub rows: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - cols == 0 or cols > MAX_COLUMNS
    /// - rows == 0 or rows > MAX_ROWS (the window protocol encodes each
    ///   bound in a single byte)
    pub fn new(cols: u16, rows: u16) -> Result<Self, BuilderError> {
        if cols == 0 || cols > MAX_COLUMNS || rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    /// Total number of pixels on the panel
    pub fn pixel_count(&self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }
}

/// Display configuration
///
/// This struct holds all configurable parameters for the ST7789 session.
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Memory data access control byte (scan direction / color order)
    pub memory_access: u8,
    /// Whether to enable display inversion during wake-up
    ///
    /// Most ST7789 modules need inversion for their native pixel polarity.
    pub invert_colors: bool,
    /// Settle delay applied after command bytes, in microseconds
    pub command_settle_us: u32,
    /// Settle delay after software reset, in milliseconds
    pub reset_settle_ms: u32,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use st7789::{Builder, Dimensions};
///
/// let dims = match Dimensions::new(240, 240) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Memory data access control byte
    memory_access: u8,
    /// Whether to enable display inversion during wake-up
    invert_colors: bool,
    /// Settle delay applied after command bytes, in microseconds
    command_settle_us: u32,
    /// Settle delay after software reset, in milliseconds
    reset_settle_ms: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Default: top-to-bottom, left-to-right, RGB order
            memory_access: 0x00,
            // Default: inverted drive (normal colors on common modules)
            invert_colors: true,
            // Default: 10ms settle after each command
            command_settle_us: 10_000,
            // Default: 500ms recovery after software reset
            reset_settle_ms: 500,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the memory data access control byte
    pub fn memory_access(mut self, value: u8) -> Self {
        self.memory_access = value;
        self
    }

    /// Set whether wake-up enables display inversion
    pub fn invert_colors(mut self, value: bool) -> Self {
        self.invert_colors = value;
        self
    }

    /// Set the per-command settle delay in microseconds
    pub fn command_settle_us(mut self, value: u32) -> Self {
        self.command_settle_us = value;
        self
    }

    /// Set the post-reset settle delay in milliseconds
    pub fn reset_settle_ms(mut self, value: u32) -> Self {
        self.reset_settle_ms = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set
    pub fn build(self) -> Result<Config, BuilderError> {
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            memory_access: self.memory_access,
            invert_colors: self.invert_colors,
            command_settle_us: self.command_settle_us,
            reset_settle_ms: self.reset_settle_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validated() {
        assert!(Dimensions::new(240, 240).is_ok());
        assert!(Dimensions::new(240, 256).is_ok());
        assert_eq!(
            Dimensions::new(0, 240),
            Err(BuilderError::InvalidDimensions { cols: 0, rows: 240 })
        );
        assert_eq!(
            Dimensions::new(241, 240),
            Err(BuilderError::InvalidDimensions {
                cols: 241,
                rows: 240
            })
        );
        assert_eq!(
            Dimensions::new(240, 257),
            Err(BuilderError::InvalidDimensions {
                cols: 240,
                rows: 257
            })
        );
    }

    #[test]
    fn test_pixel_count() {
        let dims = Dimensions::new(240, 240).unwrap();
        assert_eq!(dims.pixel_count(), 57_600);
    }

    #[test]
    fn test_builder_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.memory_access, 0x00);
        assert!(config.invert_colors);
        assert_eq!(config.command_settle_us, 10_000);
        assert_eq!(config.reset_settle_ms, 500);
    }
}

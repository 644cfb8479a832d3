//! ST7789 command definitions
//!
//! This module defines the command bytes used to control the ST7789
//! TFT-LCD controller. Commands are sent over SPI with the DC pin low for
//! commands and high for data.
//!
//! ## Command Structure
//!
//! All commands follow the pattern:
//! 1. Set DC low (command mode)
//! 2. Send command byte
//! 3. Set DC high (data mode)
//! 4. Send parameter bytes (if any)
//!
//! The panel needs time to settle after most commands; the driver inserts a
//! configurable delay (see [`Config::command_settle_us`](crate::config::Config))
//! after each command byte outside the pixel-streaming path.

// System control commands

/// Software reset command (0x01)
///
/// Resets the controller to default state. The panel needs roughly 500ms
/// before it accepts further commands.
pub const SOFT_RESET: u8 = 0x01;

/// Sleep-out command (0x11)
///
/// Exits the minimum-power sleep mode entered at reset or via [`SLEEP_IN`].
pub const SLEEP_OUT: u8 = 0x11;

/// Sleep-in command (0x10)
///
/// Enters minimum-power sleep mode. Display RAM is retained.
pub const SLEEP_IN: u8 = 0x10;

/// Interface pixel format command (0x3A)
///
/// Selects the color depth. Requires 1 byte; this driver always sends
/// [`COLOR_MODE_16BPP`].
pub const COLOR_MODE: u8 = 0x3A;

/// 16 bits/pixel (5-6-5) parameter for [`COLOR_MODE`]
pub const COLOR_MODE_16BPP: u8 = 0x55;

/// Memory data access control command (0x36)
///
/// Sets scan direction and RGB/BGR order. Requires 1 byte; the default
/// `0x00` is top-to-bottom, left-to-right, RGB.
pub const MEMORY_ACCESS_CTRL: u8 = 0x36;

/// Display inversion on command (0x21)
///
/// Most ST7789 panel modules wire the liquid crystal such that inverted
/// drive produces normal colors.
pub const INVERSION_ON: u8 = 0x21;

/// Normal display mode on command (0x13)
pub const NORMAL_MODE_ON: u8 = 0x13;

/// Display on command (0x29)
pub const DISPLAY_ON: u8 = 0x29;

/// Display off command (0x28)
///
/// Blanks the panel without losing RAM contents.
pub const DISPLAY_OFF: u8 = 0x28;

/// Idle mode on command (0x39)
///
/// Reduced-color low-power mode.
pub const IDLE_MODE_ON: u8 = 0x39;

// RAM addressing commands

/// Column address set command (0x2A)
///
/// Defines the column range of the drawing window. Requires 4 bytes:
/// `[start_MSB, start_LSB, end_MSB, end_LSB]`. The driver's coordinates fit
/// in one byte, so the MSB of each bound is always `0x00`.
pub const COLUMN_ADDR_SET: u8 = 0x2A;

/// Row address set command (0x2B)
///
/// Defines the row range of the drawing window. Same 4-byte layout as
/// [`COLUMN_ADDR_SET`].
pub const ROW_ADDR_SET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Arms the controller to accept the pixel stream that follows as
/// sequential data at the addressed window, auto-incrementing column then
/// row. The controller does not remember a window across unrelated draws;
/// every pixel stream is preceded by a fresh window setup ending in this
/// command.
pub const MEMORY_WRITE: u8 = 0x2C;

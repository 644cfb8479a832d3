//! Core display session and blit operations
//!
//! [`Display`] owns the hardware interface for the lifetime of a panel
//! session: it wakes the panel and clears it to the background color,
//! draws icons and text into windowed regions, and puts the panel back to
//! sleep before releasing the bus.
//!
//! Bus failures inside a session are best-effort by design: the panel
//! tolerates an occasional dropped write, so failed transfers are logged
//! and the call carries on. Draw calls return an error only for requests
//! the driver can reject up front (blit outside the panel, malformed
//! assets).
//!
//! The session is built for a single owning thread; every operation takes
//! `&mut self`, transfers are strictly sequential on the one interface, and
//! consecutive draw calls reach the panel in issue order.

use embedded_hal::delay::DelayNs;
use log::warn;

use crate::color::Rgb565;
use crate::command::{
    COLOR_MODE, COLOR_MODE_16BPP, COLUMN_ADDR_SET, DISPLAY_OFF, DISPLAY_ON, IDLE_MODE_ON,
    INVERSION_ON, MEMORY_ACCESS_CTRL, MEMORY_WRITE, NORMAL_MODE_ON, ROW_ADDR_SET, SLEEP_IN,
    SLEEP_OUT, SOFT_RESET,
};
use crate::config::Config;
use crate::error::Error;
use crate::icon::Icon;
use crate::interface::DisplayInterface;
use crate::writer::{CHUNK_BYTES, ChunkWriter};

#[cfg(feature = "text")]
use crate::font::Font;

/// Rectangular column/row address range armed on the controller before a
/// pixel stream
///
/// Bounds are inclusive. Each bound is sent as a zero-extended byte pair,
/// so coordinates are limited to one byte. A window is recomputed for every
/// draw call and never persisted; the controller forgets it across
/// unrelated draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// First column of the window
    pub col_start: u8,
    /// Last column of the window (inclusive)
    pub col_end: u8,
    /// First row of the window
    pub row_start: u8,
    /// Last row of the window (inclusive)
    pub row_end: u8,
}

impl Window {
    /// Create a window, validating that each end bound is at or after its
    /// start bound.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidWindow`] when a range is reversed.
    pub fn new(col_start: u8, col_end: u8, row_start: u8, row_end: u8) -> Result<Self, Error> {
        if col_end < col_start || row_end < row_start {
            return Err(Error::InvalidWindow);
        }
        Ok(Self {
            col_start,
            col_end,
            row_start,
            row_end,
        })
    }

    /// Parameter bytes for the column address command
    fn column_bytes(&self) -> [u8; 4] {
        [0x00, self.col_start, 0x00, self.col_end]
    }

    /// Parameter bytes for the row address command
    fn row_bytes(&self) -> [u8; 4] {
        [0x00, self.row_start, 0x00, self.row_end]
    }
}

/// Panel session: lifecycle, windowing, and blits
///
/// ## Type Parameters
///
/// * `I` - Hardware interface implementing [`DisplayInterface`]
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Whether the panel has been woken by [`init`](Self::init)
    awake: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display session over an open interface.
    ///
    /// The panel stays untouched until [`init`](Self::init) runs the wake
    /// sequence.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            awake: false,
        }
    }

    /// Wake the panel and clear it to the background color.
    ///
    /// Runs the ST7789 wake sequence: software reset, reset recovery wait,
    /// sleep-out, 16-bit color mode, memory access mode, display inversion
    /// (if configured), normal drive mode, display on, memory write. The
    /// controller reset leaves the address window covering the whole panel,
    /// so the background fill that follows streams the full pixel count
    /// through the bounded writer without a window setup.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        self.command(SOFT_RESET);
        delay.delay_ms(self.config.reset_settle_ms);

        self.command_settled(SLEEP_OUT, delay);
        self.command_settled(COLOR_MODE, delay);
        self.data_settled(&[COLOR_MODE_16BPP], delay);
        self.command_settled(MEMORY_ACCESS_CTRL, delay);
        self.data_settled(&[self.config.memory_access], delay);
        if self.config.invert_colors {
            self.command_settled(INVERSION_ON, delay);
        }
        self.command_settled(NORMAL_MODE_ON, delay);
        self.command_settled(DISPLAY_ON, delay);
        self.command_settled(MEMORY_WRITE, delay);

        let background = Rgb565::BACKGROUND.to_wire();
        let mut writer = ChunkWriter::<_, CHUNK_BYTES>::opaque(&mut self.interface);
        for _ in 0..self.config.dimensions.pixel_count() {
            writer.pixel(background);
        }
        writer.finish();

        self.awake = true;
    }

    /// Put the panel into sleep mode.
    ///
    /// Display RAM is retained; a later [`init`](Self::init) wakes the
    /// panel again.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) {
        self.command_settled(SLEEP_IN, delay);
        self.awake = false;
    }

    /// Blank the panel without losing RAM contents.
    pub fn display_off<D: DelayNs>(&mut self, delay: &mut D) {
        self.command_settled(DISPLAY_OFF, delay);
    }

    /// Turn the panel back on after [`display_off`](Self::display_off).
    pub fn display_on<D: DelayNs>(&mut self, delay: &mut D) {
        self.command_settled(DISPLAY_ON, delay);
    }

    /// Enter the controller's reduced-color idle mode.
    pub fn idle_mode_on<D: DelayNs>(&mut self, delay: &mut D) {
        self.command_settled(IDLE_MODE_ON, delay);
    }

    /// Whether the panel has been woken and not yet put to sleep
    pub fn is_awake(&self) -> bool {
        self.awake
    }

    /// Access the session configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Release the underlying interface.
    ///
    /// The caller is expected to have put the panel to sleep first.
    /// Dropping the returned interface closes the transport; the same
    /// interface can instead be handed to a fresh session.
    pub fn release(self) -> I {
        self.interface
    }

    /// Draw a pre-encoded icon with its own colors.
    ///
    /// Every source pixel is streamed verbatim, low stored byte first,
    /// through the bounded writer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WindowOutOfBounds`] if the icon does not fit on the
    /// panel at `(x, y)`.
    pub fn draw_icon<D: DelayNs>(
        &mut self,
        x: u8,
        y: u8,
        icon: &Icon<'_>,
        delay: &mut D,
    ) -> Result<(), Error> {
        let window = self.blit_window(x, y, icon.width().into(), icon.height().into())?;
        self.set_window(&window, delay);

        let mut writer = ChunkWriter::<_, CHUNK_BYTES>::opaque(&mut self.interface);
        for &word in icon.pixels() {
            writer.pixel(word.to_le_bytes());
        }
        writer.finish();
        Ok(())
    }

    /// Draw an icon as a stencil, overriding its color.
    ///
    /// Source pixels equal to the background sentinel re-emit the
    /// background color; every other pixel emits `color`. A byte pair is
    /// produced for every pixel either way, which is what keeps the
    /// controller's write cursor aligned with the source. One bitmap can
    /// therefore serve as a reusable stencil recolored at draw time.
    ///
    /// Note that "transparent" pixels overwrite the panel with the
    /// background color; they do not preserve prior panel contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WindowOutOfBounds`] if the icon does not fit on the
    /// panel at `(x, y)`.
    pub fn draw_icon_recolored<D: DelayNs>(
        &mut self,
        x: u8,
        y: u8,
        icon: &Icon<'_>,
        color: Rgb565,
        delay: &mut D,
    ) -> Result<(), Error> {
        let window = self.blit_window(x, y, icon.width().into(), icon.height().into())?;
        self.set_window(&window, delay);

        let stencil_background = Rgb565::BACKGROUND.wire_word();
        let wire = color.to_wire();
        let mut writer =
            ChunkWriter::<_, CHUNK_BYTES>::stencil(&mut self.interface, Rgb565::BACKGROUND);
        for &word in icon.pixels() {
            writer.masked_pixel((word != stencil_background).then_some(wire));
        }
        writer.finish();
        Ok(())
    }

    /// Render a text string in the given font and color.
    ///
    /// The whole string is composed into one off-screen line buffer and
    /// blitted as a single rectangle: background slots re-emit the
    /// background color, glyph pixels emit `color`. One window setup per
    /// string rather than per character keeps the bus transaction count
    /// low.
    ///
    /// Character codes are single bytes; an empty string (or one whose
    /// glyphs have no area) draws nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedCharacter`] for codes outside the font
    /// range and [`Error::WindowOutOfBounds`] if the composed line does not
    /// fit on the panel at `(x, y)`.
    #[cfg(feature = "text")]
    pub fn draw_text<D: DelayNs>(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        color: Rgb565,
        font: &Font<'_>,
        delay: &mut D,
    ) -> Result<(), Error> {
        let Some(line) = crate::text::compose(text, color, font)? else {
            return Ok(());
        };
        let window = self.blit_window(x, y, line.width, line.height)?;
        self.set_window(&window, delay);

        let mut writer =
            ChunkWriter::<_, CHUNK_BYTES>::stencil(&mut self.interface, Rgb565::BACKGROUND);
        for &pixel in &line.pixels {
            writer.masked_pixel(pixel.map(Rgb565::to_wire));
        }
        writer.finish();
        Ok(())
    }

    /// Compute the window for a blit of `width x height` pixels at `(x, y)`,
    /// validating it against the panel dimensions.
    fn blit_window(&self, x: u8, y: u8, width: u32, height: u32) -> Result<Window, Error> {
        let out_of_bounds = Error::WindowOutOfBounds {
            x,
            y,
            width,
            height,
        };
        if width == 0 || height == 0 {
            return Err(out_of_bounds);
        }
        if u32::from(x) + width > u32::from(self.config.dimensions.cols)
            || u32::from(y) + height > u32::from(self.config.dimensions.rows)
        {
            return Err(out_of_bounds);
        }
        // In-bounds extents end at most at 255 (dimension limits), so the
        // narrowing is exact.
        Window::new(
            x,
            (u32::from(x) + width - 1) as u8,
            y,
            (u32::from(y) + height - 1) as u8,
        )
    }

    /// Arm the controller with the window for the next pixel stream.
    ///
    /// Column range, row range, then memory-write. Each bound pair is sent
    /// as `[0x00, start, 0x00, end]`: the leading zero byte is always sent
    /// even though coordinates fit in one byte, matching the controller's
    /// fixed 16-bit-per-bound addressing.
    fn set_window<D: DelayNs>(&mut self, window: &Window, delay: &mut D) {
        self.command_settled(COLUMN_ADDR_SET, delay);
        self.data(&window.column_bytes());
        self.command_settled(ROW_ADDR_SET, delay);
        self.data(&window.row_bytes());
        self.command_settled(MEMORY_WRITE, delay);
    }

    /// Send a command byte, logging a dropped transfer.
    fn command(&mut self, command: u8) {
        if let Err(e) = self.interface.send_command(command) {
            warn!("command {command:#04X} dropped: {e:?}");
        }
    }

    /// Send data bytes, logging a dropped transfer.
    fn data(&mut self, data: &[u8]) {
        if let Err(e) = self.interface.send_data(data) {
            warn!("{} data bytes dropped: {e:?}", data.len());
        }
    }

    /// Send a command byte and hold for the configured settle time.
    fn command_settled<D: DelayNs>(&mut self, command: u8, delay: &mut D) {
        self.command(command);
        delay.delay_us(self.config.command_settle_us);
    }

    /// Send data bytes and hold for the configured settle time.
    fn data_settled<D: DelayNs>(&mut self, data: &[u8], delay: &mut D) {
        self.data(data);
        delay.delay_us(self.config.command_settle_us);
    }
}

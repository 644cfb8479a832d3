//! Bounded pixel-stream writer
//!
//! The panel accepts arbitrarily long pixel streams, but the bus layer
//! transfers at most [`CHUNK_BYTES`] bytes at a time to stay under the
//! peripheral buffer limit. [`ChunkWriter`] accumulates a pixel stream into
//! fixed-capacity chunks and flushes each full chunk as one data-mode
//! transfer with no settle delay, followed by a shorter final transfer for
//! any remainder.
//!
//! Guarantees, for any byte source:
//! - wire-level byte order exactly matches source order
//! - the byte total across all flushes equals the source length
//! - no flush is ever empty
//!
//! A writer created with [`ChunkWriter::stencil`] additionally keeps its
//! chunk buffer pre-filled with the background wire pattern, so a pixel can
//! be "skipped" by advancing over the pre-filled slot. The skipped pixel
//! still occupies two bytes on the wire; re-emitting background is what
//! keeps the controller's write cursor in step with the source.

use log::warn;

use crate::color::Rgb565;
use crate::interface::DisplayInterface;

/// Chunk capacity used by all driver paths: 16 pixels, 32 bytes
pub const CHUNK_BYTES: usize = 32;

/// Splits a pixel-byte stream into bounded data-mode transfers
///
/// Transfer failures follow the driver's best-effort policy: the dropped
/// chunk is logged and the stream continues.
///
/// ## Type Parameters
///
/// * `I` - Interface the chunks are flushed to
/// * `CAP` - Chunk capacity in bytes ([`CHUNK_BYTES`] in the driver paths;
///   must be even when using the stencil mode)
pub struct ChunkWriter<'a, I: DisplayInterface, const CAP: usize> {
    interface: &'a mut I,
    buf: [u8; CAP],
    len: usize,
    /// Background wire pattern restored after every flush (stencil mode)
    prefill: Option<[u8; 2]>,
}

impl<'a, I: DisplayInterface, const CAP: usize> ChunkWriter<'a, I, CAP> {
    /// Writer for opaque streams: every byte comes from the source.
    pub fn opaque(interface: &'a mut I) -> Self {
        Self {
            interface,
            buf: [0; CAP],
            len: 0,
            prefill: None,
        }
    }

    /// Writer for stencil streams: slots not written by the source hold the
    /// background pattern.
    pub fn stencil(interface: &'a mut I, background: Rgb565) -> Self {
        debug_assert!(CAP % 2 == 0, "stencil chunks must hold whole pixels");
        let pattern = background.to_wire();
        let mut buf = [0; CAP];
        fill_pattern(&mut buf, pattern);
        Self {
            interface,
            buf,
            len: 0,
            prefill: Some(pattern),
        }
    }

    /// Append one byte, flushing if the chunk fills.
    pub fn push(&mut self, byte: u8) {
        self.buf[self.len] = byte;
        self.advance();
    }

    /// Append one pixel's wire byte pair.
    pub fn pixel(&mut self, wire: [u8; 2]) {
        self.push(wire[0]);
        self.push(wire[1]);
    }

    /// Append one possibly-transparent pixel.
    ///
    /// `Some(bytes)` writes the pixel; `None` leaves the slot at the
    /// stencil's background pattern while still advancing the stream by one
    /// pixel. Only meaningful on a writer created with
    /// [`stencil`](Self::stencil).
    pub fn masked_pixel(&mut self, pixel: Option<[u8; 2]>) {
        match pixel {
            Some(wire) => self.pixel(wire),
            None => {
                debug_assert!(self.prefill.is_some(), "masked write on an opaque writer");
                self.advance();
                self.advance();
            }
        }
    }

    /// Flush any non-empty remainder and drop the writer.
    pub fn finish(mut self) {
        self.flush();
    }

    /// Count one buffered byte, flushing the chunk when it fills.
    fn advance(&mut self) {
        self.len += 1;
        if self.len == CAP {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.len == 0 {
            return;
        }
        if let Err(e) = self.interface.send_data(&self.buf[..self.len]) {
            warn!("pixel chunk of {} bytes dropped: {:?}", self.len, e);
        }
        self.len = 0;
        if let Some(pattern) = self.prefill {
            fill_pattern(&mut self.buf, pattern);
        }
    }
}

fn fill_pattern(buf: &mut [u8], pattern: [u8; 2]) {
    for (i, byte) in buf.iter_mut().enumerate() {
        *byte = pattern[i % 2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct MockInterface {
        data: Vec<Vec<u8>>,
    }

    impl DisplayInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn send_command(&mut self, _command: u8) -> Result<(), Self::Error> {
            Ok(())
        }

        fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.data.push(data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_exact_multiple_produces_only_full_chunks() {
        let mut interface = MockInterface::default();
        let mut writer = ChunkWriter::<_, 8>::opaque(&mut interface);
        for byte in 0..16u8 {
            writer.push(byte);
        }
        writer.finish();

        assert_eq!(interface.data.len(), 2);
        assert!(interface.data.iter().all(|chunk| chunk.len() == 8));
    }

    #[test]
    fn test_remainder_is_flushed_short() {
        let mut interface = MockInterface::default();
        let mut writer = ChunkWriter::<_, 8>::opaque(&mut interface);
        for byte in 0..11u8 {
            writer.push(byte);
        }
        writer.finish();

        let lengths: Vec<usize> = interface.data.iter().map(Vec::len).collect();
        assert_eq!(lengths, [8, 3]);
    }

    #[test]
    fn test_order_and_total_are_preserved() {
        let mut interface = MockInterface::default();
        let source: Vec<u8> = (0..77u8).collect();
        let mut writer = ChunkWriter::<_, CHUNK_BYTES>::opaque(&mut interface);
        for &byte in &source {
            writer.push(byte);
        }
        writer.finish();

        let flat: Vec<u8> = interface.data.concat();
        assert_eq!(flat, source);
    }

    #[test]
    fn test_no_empty_final_flush() {
        let mut interface = MockInterface::default();
        let mut writer = ChunkWriter::<_, 4>::opaque(&mut interface);
        for byte in 0..8u8 {
            writer.push(byte);
        }
        writer.finish();

        assert_eq!(interface.data.len(), 2);
        assert!(interface.data.iter().all(|chunk| !chunk.is_empty()));
    }

    #[test]
    fn test_stencil_skips_emit_background_pattern() {
        let mut interface = MockInterface::default();
        let mut writer = ChunkWriter::<_, 8>::stencil(&mut interface, Rgb565::BACKGROUND);
        writer.masked_pixel(None);
        writer.masked_pixel(Some([0x07, 0xE0]));
        writer.masked_pixel(None);
        writer.masked_pixel(None);
        writer.finish();

        assert_eq!(
            interface.data,
            [[0x00, 0x00, 0x07, 0xE0, 0x00, 0x00, 0x00, 0x00]]
        );
    }

    #[test]
    fn test_stencil_prefill_survives_a_flush() {
        let mut interface = MockInterface::default();
        // Nonzero background so stale pixel bytes would be visible if the
        // prefill were not restored between chunks.
        let background = Rgb565(0x1234);
        let mut writer = ChunkWriter::<_, 4>::stencil(&mut interface, background);
        writer.masked_pixel(Some([0xAB, 0xCD]));
        writer.masked_pixel(Some([0xEF, 0x01]));
        // Second chunk: all skipped.
        writer.masked_pixel(None);
        writer.masked_pixel(None);
        writer.finish();

        assert_eq!(
            interface.data,
            [[0xAB, 0xCD, 0xEF, 0x01], [0x12, 0x34, 0x12, 0x34]]
        );
    }
}

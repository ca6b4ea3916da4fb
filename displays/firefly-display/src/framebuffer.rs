//! Character framebuffer overlay
//!
//! A monochrome text layer kept in a page-major shadow buffer and
//! composited onto the panel on finalize. One byte covers eight
//! vertically stacked pixels (the usual mono OLED RAM layout), so text
//! rendering is a straight glyph-column copy into the page that holds
//! the target row.
//!
//! The overlay is sized at `init` from the panel's capability snapshot;
//! before that, `clear` is a no-op and every render call reports
//! `NotReady`.

use heapless::Vec;

use crate::backend::{DisplayBackend, DisplayError};
use crate::font;
use crate::geometry::{BufferDescriptor, Capabilities};

/// Largest frame the overlay can shadow (128x128 at 1 bpp)
pub const MAX_FRAME_BYTES: usize = 2048;

const PAGE_HEIGHT: u16 = 8;

/// Text rendering layer on top of a raw display
///
/// Split out as a trait so the sequencer can be driven against a
/// recording fake.
pub trait TextRender<D: DisplayBackend> {
    /// Size the overlay for the attached panel
    fn init(&mut self, caps: &Capabilities) -> Result<(), DisplayError>;

    /// Blank the overlay; when `flush` is set, push the blank frame to
    /// the panel immediately
    fn clear(&mut self, display: &mut D, flush: bool) -> Result<(), DisplayError>;

    /// Draw text with its top-left corner at pixel `(x, y)`
    ///
    /// `y` must be page-aligned. Text that runs past the right edge is
    /// clipped.
    fn print(&mut self, text: &str, x: u16, y: u16) -> Result<(), DisplayError>;

    /// Push the overlay buffer to the panel
    fn finalize(&mut self, display: &mut D) -> Result<(), DisplayError>;
}

/// Concrete overlay backed by a heapless page buffer
pub struct CharFramebuffer {
    buf: Vec<u8, MAX_FRAME_BYTES>,
    width: u16,
    height: u16,
    ready: bool,
}

impl CharFramebuffer {
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            width: 0,
            height: 0,
            ready: false,
        }
    }

    fn push<D: DisplayBackend>(&self, display: &mut D) -> Result<(), DisplayError> {
        let desc = BufferDescriptor {
            width: self.width,
            height: self.height,
            buf_size: self.width as u32 * self.height as u32,
            pitch: self.width,
        };
        display.write(0, 0, &desc, &self.buf)
    }
}

impl Default for CharFramebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DisplayBackend> TextRender<D> for CharFramebuffer {
    fn init(&mut self, caps: &Capabilities) -> Result<(), DisplayError> {
        if !caps.current_format.is_mono() {
            return Err(DisplayError::Unsupported);
        }
        if caps.y_resolution % PAGE_HEIGHT != 0 {
            return Err(DisplayError::Unsupported);
        }

        let bytes = caps.x_resolution as usize * caps.y_resolution as usize / 8;
        if self.buf.resize(bytes, 0).is_err() {
            return Err(DisplayError::Unsupported);
        }
        self.buf.fill(0);

        self.width = caps.x_resolution;
        self.height = caps.y_resolution;
        self.ready = true;
        Ok(())
    }

    fn clear(&mut self, display: &mut D, flush: bool) -> Result<(), DisplayError> {
        self.buf.fill(0);
        if flush && self.ready {
            self.push(display)
        } else {
            Ok(())
        }
    }

    fn print(&mut self, text: &str, x: u16, y: u16) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if x >= self.width || y >= self.height || y % PAGE_HEIGHT != 0 {
            return Err(DisplayError::OutOfBounds);
        }

        let row = (y / PAGE_HEIGHT) as usize * self.width as usize;
        let mut col = x as usize;
        for ch in text.chars() {
            if col + font::GLYPH_WIDTH > self.width as usize {
                break;
            }
            self.buf[row + col..row + col + font::GLYPH_WIDTH].copy_from_slice(font::glyph(ch));
            col += font::GLYPH_WIDTH;
        }
        Ok(())
    }

    fn finalize(&mut self, display: &mut D) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        self.push(display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Orientation, PixelFormat, PixelFormatSet, ScreenInfo};

    /// Mock panel recording the last raw write
    struct MockPanel {
        last_desc: Option<BufferDescriptor>,
        last_len: usize,
        writes: usize,
    }

    impl MockPanel {
        fn new() -> Self {
            Self {
                last_desc: None,
                last_len: 0,
                writes: 0,
            }
        }
    }

    impl DisplayBackend for MockPanel {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn is_ready(&self) -> bool {
            true
        }

        fn capabilities(&self) -> Capabilities {
            mono_caps(128, 64)
        }

        fn write(
            &mut self,
            _x: u16,
            _y: u16,
            desc: &BufferDescriptor,
            buf: &[u8],
        ) -> Result<(), DisplayError> {
            self.last_desc = Some(*desc);
            self.last_len = buf.len();
            self.writes += 1;
            Ok(())
        }

        fn set_contrast(&mut self, _level: u8) -> Result<(), DisplayError> {
            Ok(())
        }
    }

    fn mono_caps(x: u16, y: u16) -> Capabilities {
        Capabilities {
            x_resolution: x,
            y_resolution: y,
            supported_formats: PixelFormatSet::EMPTY.with(PixelFormat::Mono10),
            screen_info: ScreenInfo::MONO_VTILED,
            current_format: PixelFormat::Mono10,
            current_orientation: Orientation::Normal,
        }
    }

    fn color_caps() -> Capabilities {
        Capabilities {
            current_format: PixelFormat::Rgb565,
            ..mono_caps(128, 64)
        }
    }

    #[test]
    fn init_rejects_color_panels() {
        let mut fb = CharFramebuffer::new();
        assert_eq!(
            TextRender::<MockPanel>::init(&mut fb, &color_caps()),
            Err(DisplayError::Unsupported)
        );
    }

    #[test]
    fn init_rejects_unaligned_height() {
        let mut fb = CharFramebuffer::new();
        assert_eq!(
            TextRender::<MockPanel>::init(&mut fb, &mono_caps(128, 63)),
            Err(DisplayError::Unsupported)
        );
    }

    #[test]
    fn print_before_init_reports_not_ready() {
        let mut fb = CharFramebuffer::new();
        assert_eq!(
            TextRender::<MockPanel>::print(&mut fb, "hi", 0, 0),
            Err(DisplayError::NotReady)
        );
    }

    #[test]
    fn clear_before_init_flushes_nothing() {
        let mut fb = CharFramebuffer::new();
        let mut panel = MockPanel::new();
        assert_eq!(fb.clear(&mut panel, true), Ok(()));
        assert_eq!(panel.writes, 0);
    }

    #[test]
    fn print_copies_glyph_columns() {
        let mut fb = CharFramebuffer::new();
        TextRender::<MockPanel>::init(&mut fb, &mono_caps(128, 64)).unwrap();

        TextRender::<MockPanel>::print(&mut fb, "H", 0, 0).unwrap();
        assert_eq!(&fb.buf[0..6], font::glyph('H'));

        // Second page starts one full row of columns in
        TextRender::<MockPanel>::print(&mut fb, "i", 12, 8).unwrap();
        assert_eq!(&fb.buf[128 + 12..128 + 18], font::glyph('i'));
    }

    #[test]
    fn print_rejects_unaligned_y() {
        let mut fb = CharFramebuffer::new();
        TextRender::<MockPanel>::init(&mut fb, &mono_caps(128, 64)).unwrap();
        assert_eq!(
            TextRender::<MockPanel>::print(&mut fb, "x", 0, 3),
            Err(DisplayError::OutOfBounds)
        );
    }

    #[test]
    fn print_clips_at_right_edge() {
        let mut fb = CharFramebuffer::new();
        TextRender::<MockPanel>::init(&mut fb, &mono_caps(128, 64)).unwrap();

        // 128 / 6 = 21 glyphs fit; the rest is dropped silently
        let long = "aaaaaaaaaaaaaaaaaaaaaaaaaa";
        TextRender::<MockPanel>::print(&mut fb, long, 0, 0).unwrap();
        assert_eq!(&fb.buf[120..126], font::glyph('a'));
        assert_eq!(&fb.buf[126..128], &[0, 0]);
    }

    #[test]
    fn finalize_pushes_full_frame() {
        let mut fb = CharFramebuffer::new();
        let mut panel = MockPanel::new();
        TextRender::<MockPanel>::init(&mut fb, &mono_caps(128, 64)).unwrap();
        fb.finalize(&mut panel).unwrap();

        let desc = panel.last_desc.unwrap();
        assert_eq!(desc.width, 128);
        assert_eq!(desc.height, 64);
        assert_eq!(desc.buf_size, 8192);
        assert_eq!(desc.pitch, 128);
        assert_eq!(panel.last_len, 1024);
    }
}

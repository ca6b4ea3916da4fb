//! Panel capability and frame geometry types
//!
//! A `Capabilities` snapshot is queried once from the backend after its
//! readiness check and treated as immutable afterwards. Frame transfers
//! are described by a `BufferDescriptor` derived from that snapshot.

/// Pixel layouts a panel can report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 1 bpp, 0 = lit
    Mono01,
    /// 1 bpp, 1 = lit
    Mono10,
    Rgb565,
    Rgb888,
    Argb8888,
}

impl PixelFormat {
    /// Storage cost of one pixel
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Mono01 | PixelFormat::Mono10 => 1,
            PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb888 => 24,
            PixelFormat::Argb8888 => 32,
        }
    }

    /// Whether this is a 1 bpp format
    pub const fn is_mono(self) -> bool {
        matches!(self, PixelFormat::Mono01 | PixelFormat::Mono10)
    }

    const fn mask(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of pixel formats, packed as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelFormatSet(u8);

impl PixelFormatSet {
    pub const EMPTY: Self = Self(0);

    /// Add a format to the set
    pub const fn with(self, format: PixelFormat) -> Self {
        Self(self.0 | format.mask())
    }

    pub const fn contains(self, format: PixelFormat) -> bool {
        self.0 & format.mask() != 0
    }

    /// Raw bitmask, for logging
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Panel layout flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenInfo(u8);

impl ScreenInfo {
    pub const NONE: Self = Self(0);
    /// Mono buffers are page-major: each byte covers 8 vertically
    /// stacked pixels
    pub const MONO_VTILED: Self = Self(1 << 0);
    /// Most significant bit is the top pixel of a page
    pub const MONO_MSB_FIRST: Self = Self(1 << 1);
    /// Panel has a second hardware frame buffer
    pub const DOUBLE_BUFFER: Self = Self(1 << 2);

    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Raw bitmask, for logging
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// Panel mounting orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Normal,
    Rotated90,
    Rotated180,
    Rotated270,
}

/// Read-only snapshot of what the attached panel can do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    pub x_resolution: u16,
    pub y_resolution: u16,
    pub supported_formats: PixelFormatSet,
    pub screen_info: ScreenInfo,
    pub current_format: PixelFormat,
    pub current_orientation: Orientation,
}

/// Shape of one raw frame transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferDescriptor {
    /// Width of the written region in pixels
    pub width: u16,
    /// Height of the written region in pixels
    pub height: u16,
    /// Number of pixels in the buffer
    pub buf_size: u32,
    /// Row stride in pixels; at least `width`
    pub pitch: u16,
}

impl BufferDescriptor {
    /// Descriptor covering the panel's whole frame
    pub fn full_frame(caps: &Capabilities, pitch: u16) -> Self {
        Self {
            width: caps.x_resolution,
            height: caps.y_resolution,
            buf_size: caps.x_resolution as u32 * caps.y_resolution as u32,
            pitch,
        }
    }

    /// Byte length a buffer must have to satisfy this descriptor in the
    /// given pixel format
    pub fn required_bytes(&self, format: PixelFormat) -> usize {
        let bits = self.buf_size as u64 * format.bits_per_pixel() as u64;
        ((bits + 7) / 8) as usize
    }
}

//! SSD1306 OLED display driver
//!
//! Driver for 128x64 SSD1306-based OLED panels via blocking I2C. The
//! controller RAM is page-major: one byte covers eight vertically
//! stacked pixels, LSB on top, which is exactly the layout reported in
//! the capability snapshot (`MONO_VTILED`).

use embedded_hal::i2c::I2c;

use firefly_display::{
    BufferDescriptor, Capabilities, DisplayBackend, DisplayError, Orientation, PixelFormat,
    PixelFormatSet, ScreenInfo,
};

/// SSD1306 I2C address (0x3C, or 0x3D with the address pin high)
pub const DEFAULT_ADDR: u8 = 0x3C;

/// Panel dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// SSD1306 commands
#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    addr: u8,
    /// Shadow of the controller RAM, one array per page
    vram: [[u8; WIDTH]; PAGES],
    ready: bool,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Create a new driver; the panel reports not-ready until `init`
    /// succeeds
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            vram: [[0; WIDTH]; PAGES],
            ready: false,
        }
    }

    /// Run the power-up command sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            0x3F, // 64 lines
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE | 0x00,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x02,                  // Page addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF, // High contrast
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_FROM_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c)?;
        }

        self.ready = true;
        Ok(())
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.addr, &[0x00, cmd])
            .map_err(|_| DisplayError::Bus)
    }

    /// Send one page of the shadow RAM to the panel
    fn flush_page(&mut self, page: usize) -> Result<(), DisplayError> {
        self.command(cmd::SET_PAGE_ADDR | page as u8)?;
        self.command(cmd::SET_LOW_COLUMN)?;
        self.command(cmd::SET_HIGH_COLUMN)?;

        let mut data = [0u8; WIDTH + 1];
        data[0] = 0x40; // Data mode
        data[1..].copy_from_slice(&self.vram[page]);
        self.i2c
            .write(self.addr, &data)
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C> DisplayBackend for Ssd1306<I2C>
where
    I2C: I2c,
{
    fn name(&self) -> &'static str {
        "ssd1306"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            x_resolution: WIDTH as u16,
            y_resolution: HEIGHT as u16,
            supported_formats: PixelFormatSet::EMPTY
                .with(PixelFormat::Mono01)
                .with(PixelFormat::Mono10),
            screen_info: ScreenInfo::MONO_VTILED,
            current_format: PixelFormat::Mono10,
            current_orientation: Orientation::Normal,
        }
    }

    fn write(
        &mut self,
        x: u16,
        y: u16,
        desc: &BufferDescriptor,
        buf: &[u8],
    ) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if buf.len() != desc.required_bytes(PixelFormat::Mono10) {
            return Err(DisplayError::BufferMismatch);
        }
        if desc.pitch < desc.width {
            return Err(DisplayError::BufferMismatch);
        }
        // Page-major RAM: only page-aligned regions are addressable
        if y % 8 != 0 || desc.height % 8 != 0 {
            return Err(DisplayError::OutOfBounds);
        }

        let width = desc.width as usize;
        let pages = desc.height as usize / 8;
        if width == 0 || pages == 0 {
            return Ok(());
        }

        let x = x as usize;
        let first_page = y as usize / 8;
        if x + width > WIDTH || first_page + pages > PAGES {
            return Err(DisplayError::OutOfBounds);
        }

        let pitch = desc.pitch as usize;
        if (pages - 1) * pitch + width > buf.len() {
            return Err(DisplayError::BufferMismatch);
        }

        for row in 0..pages {
            let src = &buf[row * pitch..row * pitch + width];
            self.vram[first_page + row][x..x + width].copy_from_slice(src);
        }
        for page in first_page..first_page + pages {
            self.flush_page(page)?;
        }
        Ok(())
    }

    fn set_contrast(&mut self, level: u8) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        self.command(cmd::SET_CONTRAST)?;
        self.command(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    struct MockI2c {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                writes: Vec::new(),
                fail: true,
            }
        }
    }

    #[derive(Debug)]
    struct MockBusError;

    impl embedded_hal::i2c::Error for MockBusError {
        fn kind(&self) -> embedded_hal::i2c::ErrorKind {
            embedded_hal::i2c::ErrorKind::Other
        }
    }

    impl embedded_hal::i2c::ErrorType for MockI2c {
        type Error = MockBusError;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            _address: u8,
            operations: &mut [embedded_hal::i2c::Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockBusError);
            }
            for op in operations.iter_mut() {
                if let embedded_hal::i2c::Operation::Write(data) = op {
                    self.writes.push(data.to_vec());
                }
            }
            Ok(())
        }
    }

    fn full_frame_desc() -> BufferDescriptor {
        BufferDescriptor {
            width: 128,
            height: 64,
            buf_size: 128 * 64,
            pitch: 128,
        }
    }

    #[test]
    fn init_powers_on_and_marks_ready() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        assert!(!oled.is_ready());

        oled.init().unwrap();
        assert!(oled.is_ready());
        // Power-on ends with the display-on command
        assert_eq!(oled.i2c.writes.last().unwrap(), &[0x00, cmd::DISPLAY_ON]);
    }

    #[test]
    fn init_failure_leaves_not_ready() {
        let mut oled = Ssd1306::new(MockI2c::failing(), DEFAULT_ADDR);
        assert_eq!(oled.init(), Err(DisplayError::Bus));
        assert!(!oled.is_ready());
    }

    #[test]
    fn operations_require_init() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        let buf = [0u8; 1024];

        assert_eq!(
            oled.write(0, 0, &full_frame_desc(), &buf),
            Err(DisplayError::NotReady)
        );
        assert_eq!(oled.set_contrast(128), Err(DisplayError::NotReady));
    }

    #[test]
    fn set_contrast_sends_command_pair() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        oled.init().unwrap();
        oled.i2c.writes.clear();

        oled.set_contrast(0x7B).unwrap();
        assert_eq!(
            oled.i2c.writes,
            [[0x00, cmd::SET_CONTRAST].to_vec(), [0x00, 0x7B].to_vec()]
        );
    }

    #[test]
    fn full_frame_write_flushes_every_page() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        oled.init().unwrap();
        oled.i2c.writes.clear();

        let buf = [0xAA; 1024];
        oled.write(0, 0, &full_frame_desc(), &buf).unwrap();

        let data_writes: Vec<&Vec<u8>> = oled
            .i2c
            .writes
            .iter()
            .filter(|w| w[0] == 0x40)
            .collect();
        assert_eq!(data_writes.len(), 8);
        for w in data_writes {
            assert_eq!(w.len(), 129);
            assert!(w[1..].iter().all(|&b| b == 0xAA));
        }
    }

    #[test]
    fn write_validates_buffer_length() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        oled.init().unwrap();

        let short = [0u8; 100];
        assert_eq!(
            oled.write(0, 0, &full_frame_desc(), &short),
            Err(DisplayError::BufferMismatch)
        );
    }

    #[test]
    fn write_validates_bounds() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        oled.init().unwrap();

        let buf = [0u8; 1024];
        // Full-width frame shifted right falls off the panel
        assert_eq!(
            oled.write(64, 0, &full_frame_desc(), &buf),
            Err(DisplayError::OutOfBounds)
        );
        // Unaligned y is not addressable in page-major RAM
        assert_eq!(
            oled.write(0, 4, &full_frame_desc(), &buf),
            Err(DisplayError::OutOfBounds)
        );
    }

    #[test]
    fn partial_write_honors_pitch() {
        let mut oled = Ssd1306::new(MockI2c::new(), DEFAULT_ADDR);
        oled.init().unwrap();
        oled.i2c.writes.clear();

        // 16x8 region at (8, 8): one page, pitch equal to width
        let desc = BufferDescriptor {
            width: 16,
            height: 8,
            buf_size: 16 * 8,
            pitch: 16,
        };
        let buf = [0xFF; 16];
        oled.write(8, 8, &desc, &buf).unwrap();

        // Only page 1 is flushed
        let data_writes: Vec<&Vec<u8>> = oled
            .i2c
            .writes
            .iter()
            .filter(|w| w[0] == 0x40)
            .collect();
        assert_eq!(data_writes.len(), 1);
        let page = &data_writes[0][1..];
        assert!(page[..8].iter().all(|&b| b == 0));
        assert!(page[8..24].iter().all(|&b| b == 0xFF));
        assert!(page[24..].iter().all(|&b| b == 0));
    }
}

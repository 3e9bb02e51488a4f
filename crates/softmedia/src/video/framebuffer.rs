//! CPU-side pixel storage backing a window

use super::{FramebufferInfo, PixelFormat, VideoError, VideoResult};
use crate::foundation::geometry::Size;

/// Heap-allocated XRGB8888 pixel buffer matching a window's client area
///
/// The buffer is the application's draw target; [`super::VideoBackend::update_framebuffer`]
/// copies damaged regions out to the native surface. Rows are packed, so
/// the pitch is always `width * 4` bytes.
#[derive(Debug)]
pub struct WindowFramebuffer {
    size: Size,
    pixels: Vec<u32>,
}

impl WindowFramebuffer {
    pub(crate) fn new(size: Size) -> VideoResult<Self> {
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(size.area())
            .map_err(|_| VideoError::OutOfMemory)?;
        pixels.resize(size.area(), 0);
        Ok(Self { size, pixels })
    }

    /// Buffer dimensions
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Pixel format, always [`PixelFormat::Xrgb8888`]
    pub const fn format(&self) -> PixelFormat {
        PixelFormat::Xrgb8888
    }

    /// Bytes per row
    pub const fn pitch(&self) -> usize {
        self.size.width as usize * PixelFormat::Xrgb8888.bytes_per_pixel()
    }

    /// Pixels per row
    pub const fn pitch_pixels(&self) -> usize {
        self.size.width as usize
    }

    /// Pixel data in row-major order
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Mutable pixel data in row-major order
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Pixel data viewed as raw bytes
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Fill the whole buffer with one color
    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Write one pixel, ignoring coordinates outside the buffer
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        if x < self.size.width && y < self.size.height {
            let index = y as usize * self.pitch_pixels() + x as usize;
            self.pixels[index] = color;
        }
    }

    /// Format, size, and pitch in one report
    pub const fn info(&self) -> FramebufferInfo {
        FramebufferInfo {
            format: PixelFormat::Xrgb8888,
            size: self.size,
            pitch: self.pitch(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_is_width_times_bytes_per_pixel() {
        let fb = WindowFramebuffer::new(Size::new(640, 480)).unwrap();
        assert_eq!(fb.pitch(), 640 * 4);
        assert_eq!(fb.pitch_pixels(), 640);
        assert_eq!(fb.info().pitch, 2560);
    }

    #[test]
    fn test_buffer_starts_zeroed_and_fills() {
        let mut fb = WindowFramebuffer::new(Size::new(4, 4)).unwrap();
        assert!(fb.pixels().iter().all(|&p| p == 0));
        fb.fill(0x00ff_00ff);
        assert!(fb.pixels().iter().all(|&p| p == 0x00ff_00ff));
    }

    #[test]
    fn test_set_pixel_ignores_out_of_bounds() {
        let mut fb = WindowFramebuffer::new(Size::new(8, 8)).unwrap();
        fb.set_pixel(3, 2, 0xabcd);
        fb.set_pixel(8, 0, 0xffff);
        fb.set_pixel(0, 8, 0xffff);
        assert_eq!(fb.pixels()[2 * 8 + 3], 0xabcd);
        assert_eq!(fb.pixels().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn test_bytes_view_is_four_per_pixel() {
        let fb = WindowFramebuffer::new(Size::new(3, 2)).unwrap();
        assert_eq!(fb.bytes().len(), 3 * 2 * 4);
    }
}

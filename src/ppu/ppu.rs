//! Framebuffer and renderer.
//!
//! The framebuffer holds one 0-255 intensity per pixel, row-major. Rendering
//! turns each intensity into a gray pixel; the colour rule lives in
//! [`intensity_to_rgb`] so a palette lookup can replace it later.

use crate::{
    bus::Bus,
    config::{FrameSource, SCREEN_HEIGHT, SCREEN_WIDTH},
    error::EmuError,
    ppu::image::Image,
};

/// Gray: the intensity copied into all three channels, packed 0x00RRGGBB.
pub fn intensity_to_rgb(v: u8) -> u32 {
    let v = v as u32;
    (v << 16) | (v << 8) | v
}

/// PPU state: screen size and the current framebuffer.
pub struct PPU {
    width: usize,
    height: usize,
    /// Exactly `width * height` intensities.
    framebuffer: Vec<u8>,
}

impl PPU {
    /// 256x224 PPU with a black framebuffer.
    pub fn new() -> Self {
        Self::with_size(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            framebuffer: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    /// Replace the whole framebuffer. `values` must hold one entry per pixel.
    pub fn set_framebuffer(&mut self, values: &[u8]) -> Result<(), EmuError> {
        if values.len() != self.framebuffer.len() {
            return Err(EmuError::InvalidFramebufferSize {
                expected: self.framebuffer.len(),
                actual: values.len(),
            });
        }
        self.framebuffer.copy_from_slice(values);
        Ok(())
    }

    /// Placeholder picture: pixel `i` gets `i % 256`, so every row is a ramp.
    pub fn fill_test_pattern(&mut self) {
        for (i, px) in self.framebuffer.iter_mut().enumerate() {
            *px = (i % 256) as u8;
        }
    }

    /// Copy one frame's worth of bytes from the bus starting at `base`.
    /// The framebuffer is untouched if any of the region is out of range.
    pub fn copy_from_bus<B: Bus>(&mut self, bus: &mut B, base: u32) -> Result<(), EmuError> {
        let len = self.framebuffer.len();
        crate::bus::check_span(base, len, bus.size())?;
        let mut values = vec![0; len];
        for (offset, v) in values.iter_mut().enumerate() {
            *v = bus.read(base + offset as u32)?;
        }
        self.set_framebuffer(&values)
    }

    /// Refresh the framebuffer for the end of a frame.
    pub fn refresh<B: Bus>(&mut self, source: FrameSource, bus: &mut B) -> Result<(), EmuError> {
        match source {
            FrameSource::TestPattern => {
                self.fill_test_pattern();
                Ok(())
            }
            FrameSource::VideoRam { base } => self.copy_from_bus(bus, base),
        }
    }

    /// Build an image of the current framebuffer. Pixel `i` lands at
    /// `(i % width, i / width)`.
    pub fn render(&self) -> Image {
        let pixels = self
            .framebuffer
            .iter()
            .map(|&v| intensity_to_rgb(v))
            .collect();
        Image::from_pixels(self.width, self.height, pixels)
    }
}

impl Default for PPU {
    fn default() -> Self {
        Self::new()
    }
}

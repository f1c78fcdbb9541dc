//! PPU (display unit): a 256x224 intensity framebuffer and the renderer that
//! turns it into an [`image::Image`] once per frame.

pub mod image;
pub mod ppu;

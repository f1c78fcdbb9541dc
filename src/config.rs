//! Machine constants and run-time configuration.

use std::time::Duration;

/// Flat address space: 0x00000-0xFFFFF.
pub const BUS_SIZE: usize = 0x10_0000;

/// Program counter after power-on or reset.
pub const RESET_PC: u16 = 0x8000;
/// Stack pointer after power-on or reset. Nothing pushes yet.
pub const RESET_SP: u16 = 0x0100;

pub const SCREEN_WIDTH: usize = 256;
pub const SCREEN_HEIGHT: usize = 224;

/// Instructions executed per frame.
pub const STEPS_PER_FRAME: u32 = 100;
/// Delay between frames, roughly 60 Hz.
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Where program images are installed.
pub const PROGRAM_LOAD_ADDR: u32 = 0x8000;
/// Longest program image accepted; the rest of a file is ignored.
pub const PROGRAM_MAX_LEN: usize = 0x2_0000;

/// Where the PPU takes its pixels from at the end of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSource {
    /// Pixel `i` gets intensity `i % 256`, independent of the CPU.
    #[default]
    TestPattern,
    /// `width * height` bytes read from the bus starting at `base`.
    VideoRam { base: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorConfig {
    pub steps_per_frame: u32,
    pub frame_delay: Duration,
    pub load_addr: u32,
    pub max_program_len: usize,
    pub frame_source: FrameSource,
    /// Stop after this many frames. `None` runs until stopped.
    pub max_frames: Option<u64>,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: STEPS_PER_FRAME,
            frame_delay: FRAME_DELAY,
            load_addr: PROGRAM_LOAD_ADDR,
            max_program_len: PROGRAM_MAX_LEN,
            frame_source: FrameSource::TestPattern,
            max_frames: None,
        }
    }
}

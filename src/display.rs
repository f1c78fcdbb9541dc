//! Presentation surface seen by the scheduler.
//!
//! The scheduler draws through this trait and asks it for control commands
//! between frames, so it never needs to know what is on the other side.

use crate::{error::EmuError, ppu::image::Image};

/// Control requests coming from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Stop,
    Quit,
}

pub trait Display {
    /// Present one rendered frame.
    fn draw(&mut self, image: &Image) -> Result<(), EmuError>;

    /// Remove whatever is on screen.
    fn clear(&mut self);

    /// Commands issued since the last poll, oldest first.
    fn poll(&mut self) -> Vec<Command> {
        Vec::new()
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn draw(&mut self, _image: &Image) -> Result<(), EmuError> {
        Ok(())
    }

    fn clear(&mut self) {}
}

/// Keeps the most recent frame; used for headless runs and screenshots.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub last: Option<Image>,
    pub frames: u64,
    pub clears: u64,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for FrameRecorder {
    fn draw(&mut self, image: &Image) -> Result<(), EmuError> {
        self.last = Some(image.clone());
        self.frames += 1;
        Ok(())
    }

    fn clear(&mut self) {
        self.last = None;
        self.clears += 1;
    }
}

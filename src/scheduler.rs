//! Frame scheduler: runs frames while started and re-arms itself after a fixed
//! delay, yielding to the shell in between.
//!
//! Control commands are applied only between frames; a frame that has begun
//! always runs to completion or to its first error.

use std::thread;
use std::time::{Duration, Instant};

use crate::{
    bus::Bus,
    display::{Command, Display},
    emulator::Emulator,
    error::EmuError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Source of the delay between frames.
pub trait Clock {
    /// Wait until `delay` has passed since the previous call.
    fn rearm(&mut self, delay: Duration);
}

/// Wall-clock pacing: sleeps whatever is left of `delay` after the frame's work.
pub struct SystemClock {
    last: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn rearm(&mut self, delay: Duration) {
        let elapsed = self.last.elapsed();
        if elapsed < delay {
            thread::sleep(delay - elapsed);
        }
        self.last = Instant::now();
    }
}

/// Never sleeps; adds up the delays it was asked for.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub rearms: u64,
    pub elapsed: Duration,
}

impl Clock for ManualClock {
    fn rearm(&mut self, delay: Duration) {
        self.rearms += 1;
        self.elapsed += delay;
    }
}

pub struct Scheduler<B: Bus, C: Clock> {
    pub emulator: Emulator<B>,
    clock: C,
    state: RunState,
    frames: u64,
}

impl<B: Bus, C: Clock> Scheduler<B, C> {
    pub fn new(emulator: Emulator<B>, clock: C) -> Self {
        Self {
            emulator,
            clock,
            state: RunState::Stopped,
            frames: 0,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Frames completed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn start(&mut self) {
        if self.state != RunState::Running {
            log::info!("{:?} -> Running", self.state);
            self.state = RunState::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            log::info!("Running -> Paused");
            self.state = RunState::Paused;
        }
    }

    /// Stop and clear the presented output.
    pub fn stop<D: Display>(&mut self, display: &mut D) {
        if self.state != RunState::Stopped {
            log::info!("{:?} -> Stopped", self.state);
            self.state = RunState::Stopped;
            display.clear();
        }
    }

    /// Run one frame if running and present it. Returns whether a frame ran.
    ///
    /// An error stops the scheduler and is handed back to the caller.
    pub fn tick<D: Display>(&mut self, display: &mut D) -> Result<bool, EmuError> {
        if self.state != RunState::Running {
            return Ok(false);
        }
        let image = match self.emulator.run_frame() {
            Ok(image) => image,
            Err(err) => {
                log::error!("frame {} aborted: {}", self.frames, err);
                self.state = RunState::Stopped;
                return Err(err);
            }
        };
        if let Err(err) = display.draw(&image) {
            log::error!("frame {} not presented: {}", self.frames, err);
            self.state = RunState::Stopped;
            return Err(err);
        }
        self.frames += 1;
        log::debug!("frame {} done, pc=${:04X}", self.frames, self.emulator.cpu.pc);
        Ok(true)
    }

    /// Cooperative loop. Applies the display's commands between frames and
    /// re-arms after each pass while running or paused.
    ///
    /// Returns the total frame count once stopped, on `Quit`, or when the
    /// configured frame limit is reached.
    pub fn run<D: Display>(&mut self, display: &mut D) -> Result<u64, EmuError> {
        loop {
            for command in display.poll() {
                match command {
                    Command::Start => self.start(),
                    Command::Pause => self.pause(),
                    Command::Stop => self.stop(display),
                    Command::Quit => {
                        self.stop(display);
                        return Ok(self.frames);
                    }
                }
            }

            if self.state == RunState::Stopped {
                return Ok(self.frames);
            }
            if let Some(limit) = self.emulator.config.max_frames {
                if self.frames >= limit {
                    log::info!("frame limit {} reached", limit);
                    self.state = RunState::Stopped;
                    return Ok(self.frames);
                }
            }

            self.tick(display)?;
            self.clock.rearm(self.emulator.config.frame_delay);
        }
    }
}

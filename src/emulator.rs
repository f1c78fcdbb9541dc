//! The machine as one context object: CPU (which owns the bus), PPU, and the
//! configuration that drives a frame.

use crate::{
    bus::{Bus, MemoryBus},
    config::EmulatorConfig,
    cpu::cpu::CPU,
    error::EmuError,
    ppu::{image::Image, ppu::PPU},
};

pub struct Emulator<B: Bus = MemoryBus> {
    pub cpu: CPU<B>,
    pub ppu: PPU,
    pub config: EmulatorConfig,
}

impl Emulator<MemoryBus> {
    /// Fresh machine with a zeroed 1 MiB bus.
    pub fn new(config: EmulatorConfig) -> Self {
        Self::with_bus(MemoryBus::new(), config)
    }
}

impl<B: Bus> Emulator<B> {
    pub fn with_bus(bus: B, config: EmulatorConfig) -> Self {
        Self {
            cpu: CPU::new(bus),
            ppu: PPU::new(),
            config,
        }
    }

    /// Install a program image at `addr`. Nothing is written if it does not fit.
    pub fn load_program(&mut self, addr: u32, bytes: &[u8]) -> Result<(), EmuError> {
        self.cpu.bus.load_block(addr, bytes)?;
        log::info!(
            "loaded {} byte(s) at ${:05X}-${:05X}",
            bytes.len(),
            addr,
            addr as usize + bytes.len().saturating_sub(1)
        );
        Ok(())
    }

    /// Run one frame: the configured number of instructions, then a
    /// framebuffer refresh and render. The first error ends the frame.
    pub fn run_frame(&mut self) -> Result<Image, EmuError> {
        for _ in 0..self.config.steps_per_frame {
            self.cpu.step()?;
        }
        self.ppu
            .refresh(self.config.frame_source, &mut self.cpu.bus)?;
        Ok(self.ppu.render())
    }
}

//! Memory bus for the emulated machine.
//!
//! One flat byte store holds program code and data. Every access is bounds
//! checked; nothing wraps.

use crate::config::BUS_SIZE;
use crate::error::EmuError;

/// Trait for memory access used by the CPU and the PPU's video-RAM refresh.
pub trait Bus {
    fn read(&mut self, addr: u32) -> Result<u8, EmuError>;
    fn write(&mut self, addr: u32, data: u8) -> Result<(), EmuError>;
    /// Number of addressable bytes.
    fn size(&self) -> usize;

    /// Copy `bytes` in starting at `addr`. The whole span is checked before
    /// the first byte is written, so a failed load changes nothing.
    fn load_block(&mut self, addr: u32, bytes: &[u8]) -> Result<(), EmuError> {
        check_span(addr, bytes.len(), self.size())?;
        for (offset, &byte) in bytes.iter().enumerate() {
            self.write(addr + offset as u32, byte)?;
        }
        Ok(())
    }
}

/// Fails unless `[addr, addr + len)` lies inside a bus of `size` bytes.
pub(crate) fn check_span(addr: u32, len: usize, size: usize) -> Result<usize, EmuError> {
    let start = addr as usize;
    match start.checked_add(len) {
        Some(end) if end <= size => Ok(start),
        _ => Err(EmuError::AddressRange { addr, len, size }),
    }
}

/// Main bus: a fixed 1 MiB block, allocated once and never resized.
pub struct MemoryBus {
    mem: Box<[u8]>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            mem: vec![0; BUS_SIZE].into_boxed_slice(),
        }
    }

    /// Read-only view of `[addr, addr + len)`.
    pub fn slice(&self, addr: u32, len: usize) -> Result<&[u8], EmuError> {
        let start = check_span(addr, len, self.mem.len())?;
        Ok(&self.mem[start..start + len])
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MemoryBus {
    fn read(&mut self, addr: u32) -> Result<u8, EmuError> {
        let index = check_span(addr, 1, self.mem.len())?;
        Ok(self.mem[index])
    }

    fn write(&mut self, addr: u32, data: u8) -> Result<(), EmuError> {
        let index = check_span(addr, 1, self.mem.len())?;
        self.mem[index] = data;
        Ok(())
    }

    fn size(&self) -> usize {
        self.mem.len()
    }

    fn load_block(&mut self, addr: u32, bytes: &[u8]) -> Result<(), EmuError> {
        let start = check_span(addr, bytes.len(), self.mem.len())?;
        self.mem[start..start + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}

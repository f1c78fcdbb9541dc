//! Errors raised by the bus, the CPU, the PPU, and the file-facing helpers.
//!
//! All of them abort the operation in progress: a failing instruction leaves
//! registers and memory as they were, and a failing frame stops the scheduler.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmuError {
    /// Access to `[addr, addr + len)` falls outside the bus.
    #[error("access of {len} byte(s) at ${addr:05X} exceeds the {size:#X}-byte bus")]
    AddressRange { addr: u32, len: usize, size: usize },

    /// Byte fetched at `pc` is not a known instruction.
    #[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    #[error("framebuffer needs {expected} values, got {actual}")]
    InvalidFramebufferSize { expected: usize, actual: usize },

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("frame could not be presented: {0}")]
    Present(String),
}

//! CPU interpreter: 8-bit A/X/Y registers, 16-bit PC and SP, and a small
//! 6502-flavoured instruction set (loads, absolute stores, absolute jump).
//!
//! Bus trait used for every instruction and data access.

pub mod cpu;
pub mod opcode;

#[cfg(test)]
mod tests;

//! Kestrel: a minimal SNES-style machine written in Rust.
//!
//! A small 8-bit CPU interpreter runs a fixed batch of instructions per frame
//! against a flat 1 MiB bus; a display unit then turns a 256×224 intensity
//! framebuffer into an image, and the scheduler paces frames at ~60 Hz.
//!
//! ## Modules
//!
//! - **bus** – `Bus` trait and the bounds-checked 1 MiB `MemoryBus`
//! - **cpu** – A/X/Y, PC, SP, status; LDA/LDX/LDY immediate, STA/STX/STY and JMP absolute, NOP
//! - **ppu** – framebuffer, test pattern or video-RAM refresh, grayscale render
//! - **emulator** – context object owning CPU, bus and PPU; one frame at a time
//! - **scheduler** – start/pause/stop state machine and the frame loop
//! - **display** – presentation and control seam for the shell
//! - **rom**, **capture** – program images in, PNG screenshots out

pub mod bus;
pub mod capture;
pub mod config;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod error;
pub mod ppu;
pub mod rom;
pub mod scheduler;

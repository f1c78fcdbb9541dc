//! Program images: reading raw binaries from disk and the built-in demo.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::EmuError;

/// Run when no image is given. Loaded at $8000:
///
/// ```text
/// 8000  LDA #$05
/// 8002  STA $0200
/// 8005  JMP $8005
/// ```
pub const DEMO_PROGRAM: [u8; 8] = [0xA9, 0x05, 0x8D, 0x02, 0x00, 0x4C, 0x80, 0x05];

/// Read at most `max_len` bytes of a raw program image. Anything past that is
/// ignored with a warning.
pub fn read_program(path: &Path, max_len: usize) -> Result<Vec<u8>, EmuError> {
    let io_err = |source: std::io::Error| EmuError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let file_len = file.metadata().map_err(io_err)?.len();

    let mut data = Vec::new();
    file.take(max_len as u64)
        .read_to_end(&mut data)
        .map_err(io_err)?;

    if file_len > data.len() as u64 {
        log::warn!(
            "{} is {} bytes; only the first {} are loaded",
            path.display(),
            file_len,
            data.len()
        );
    }
    Ok(data)
}

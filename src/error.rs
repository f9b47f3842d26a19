//! Error types for the 8080 core.

use std::fmt;

/// Errors the core can raise. Only `UnknownOpcode` is raised from inside the
/// step loop; bus port errors surface only when a `Bus` is built in strict
/// mode (see `Bus::new`).
#[derive(Debug)]
pub enum EmulatorError {
    UnknownOpcode { opcode: u8, pc: u16 },
    InvalidReadPort(u8),
    InvalidWritePort(u8),
    RomTooLarge { size: usize },
    RomNotFound(std::io::Error),
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmulatorError::UnknownOpcode { opcode, pc } => {
                write!(f, "unknown opcode {:#04X} at PC={:#06X}", opcode, pc)
            }
            EmulatorError::InvalidReadPort(port) => {
                write!(f, "no handler registered for IN port {:#04X}", port)
            }
            EmulatorError::InvalidWritePort(port) => {
                write!(f, "no handler registered for OUT port {:#04X}", port)
            }
            EmulatorError::RomTooLarge { size } => {
                write!(f, "ROM is {} bytes, exceeds 65536 byte address space", size)
            }
            EmulatorError::RomNotFound(e) => write!(f, "could not read ROM file: {}", e),
        }
    }
}

impl std::error::Error for EmulatorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmulatorError::RomNotFound(e) => Some(e),
            _ => None,
        }
    }
}

pub type CpuResult<T> = Result<T, EmulatorError>;

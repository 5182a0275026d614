use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions a malformed program or image can put the machine in.
///
/// None of these are fatal; the caller decides whether to halt, reset or keep stepping.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown instruction {opcode:#06X} at {address:#06X}")]
    UnknownInstruction { opcode: u16, address: u16 },

    #[error("stack overflow: CALL at {address:#06X} with a full stack")]
    StackOverflow { address: u16 },

    #[error("stack underflow: RET at {address:#06X} with an empty stack")]
    StackUnderflow { address: u16 },

    #[error("program is {size} bytes but only {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),
}

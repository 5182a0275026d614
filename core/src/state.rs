use std::fmt;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
    STACK_DEPTH,
};
use crate::error::{Error, Result};

/// The FrameBuffer is indexed as [y][x]; every cell is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) the number of return addresses on the stack (0..=16)
///
/// Timers
/// - 2 8-bit timers (delay & sound), counted down at 60Hz by the driver
///
/// ## Memory
/// - 16 return addresses on the stack
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200.. holds the program
/// - 32x64 frame buffer
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        // 0x000 - 0x050 is reserved for the sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Borrows `len` bytes of memory starting at `addr`
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.memory
            .get(addr..addr + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: (addr + len).max(1) - 1,
            })
    }

    /// Mutably borrows `len` bytes of memory starting at `addr`
    pub fn read_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        self.memory
            .get_mut(addr..addr + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: (addr + len).max(1) - 1,
            })
    }

    /// The return addresses currently on the stack, oldest first
    pub fn active_stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Register and stack dump for debug inspectors
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..REGISTER_COUNT / 2 {
            let hi = row + REGISTER_COUNT / 2;
            writeln!(
                f,
                "V{:X} = #{:02X}    V{:X} = #{:02X}",
                row, self.v[row], hi, self.v[hi]
            )?;
        }
        writeln!(f, "PC = #{:04X}  SP = #{:02X}", self.pc, self.sp)?;
        writeln!(f, "DT = #{:02X}    ST = #{:02X}", self.delay_timer, self.sound_timer)?;
        writeln!(f, "I  = #{:04X}", self.i)?;
        for (depth, addr) in self.stack.iter().enumerate() {
            let marker = if depth < self.sp { "*" } else { " " };
            writeln!(f, "S{:X}{} #{:04X}", depth, marker, addr)?;
        }
        Ok(())
    }
}

//! An interpreter for the 8-bit, 4KB, 64x32 monochrome virtual machine commonly known as CHIP-8.
//!
//! The [`Machine`] is the whole core: a driver loads a program, calls [`Machine::step`] at
//! whatever rate it likes, calls [`Machine::tick_timers`] at a steady 60Hz, forwards keypad
//! events through [`Machine::set_key`] and renders [`Machine::frame_buffer`] whenever a step
//! reports a redraw.

pub use constants::{DEFAULT_INSTRUCTIONS_PER_FRAME, DISPLAY_HEIGHT, DISPLAY_WIDTH, TIMER_HZ};
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use machine::{Machine, Step};
pub use opcode::Opcode;
pub use quirks::{Quirks, ShiftQuirk};
pub use state::{FrameBuffer, State};

pub mod constants;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
mod quirks;
mod state;

use std::collections::VecDeque;
use std::fmt;
use std::io::Read;

use log::{debug, trace, warn};

use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, MAX_SAVED_STATES, PROGRAM_START, STACK_DEPTH};
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, State};

/// What a single call to [`Machine::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Where the instruction was fetched from
    pub address: u16,
    pub opcode: Opcode,
    pub instruction: Instruction,
    /// Whether the frame buffer changed and should be rendered again
    pub redraw: bool,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}  {}", self.address, self.instruction)
    }
}

/// # Machine
/// Owns the interpreter state and runs programs one instruction at a time.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - `pressed_keys` with public interfaces for manipulating them
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - stepping and rewinding the CPU
/// - ticking its timers, which the driver must do at 60Hz independently of stepping
/// - inspecting its frame buffer and registers for rendering and debugging
///
/// The machine is not synchronized; drive it from a single thread.
pub struct Machine {
    state: State,
    previous_states: VecDeque<State>,
    pressed_keys: [bool; KEY_COUNT],
    quirks: Quirks,
    program: Vec<u8>,
}

impl Machine {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Machine {
            state: State::new(),
            previous_states: VecDeque::new(),
            pressed_keys: [false; KEY_COUNT],
            quirks,
            program: Vec::new(),
        }
    }

    /// Loads a program image at 0x200 and resets the machine to run it.
    ///
    /// Images that don't fit are rejected and leave the machine untouched.
    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_PROGRAM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        self.program = rom.to_vec();
        self.reset();
        debug!("loaded {} byte program", rom.len());
        Ok(())
    }

    /// Load a program from some source, e.g. a ROM file
    ///
    /// # Arguments
    /// * `reader` a reader that yields the raw program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;
        self.load(&rom)
    }

    /// Restores power-on state with the last loaded program in place
    pub fn reset(&mut self) {
        self.state = State::new();
        let start = usize::from(PROGRAM_START);
        self.state.memory[start..start + self.program.len()].copy_from_slice(&self.program);
        self.previous_states.clear();
        debug!("reset");
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF
    /// * `pressed` whether the key is now down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        match self.pressed_keys.get_mut(usize::from(key)) {
            Some(slot) => *slot = pressed,
            None => warn!("ignoring key {:#X}, the keypad only has 0x0..=0xF", key),
        }
    }

    /// Advances the CPU by a single instruction
    /// - saves the current state for rewinding
    /// - fetches the word at PC and moves PC past it
    /// - decodes and executes it
    ///
    /// A failed fetch leaves PC where it was; any later failure leaves PC past the faulting word.
    pub fn step(&mut self) -> Result<Step> {
        self.save_state();
        let result = self.execute_next();
        match &result {
            Ok(step) => trace!("{}  {}  {}", step.opcode, step, if step.redraw { "*" } else { "" }),
            Err(e) => warn!("{}", e),
        }
        result
    }

    fn execute_next(&mut self) -> Result<Step> {
        let address = self.state.pc;
        let opcode = self.get_op()?;
        self.state.pc = address.wrapping_add(2);

        let instruction = Instruction::decode(opcode).ok_or(Error::UnknownInstruction {
            opcode: opcode.0,
            address,
        })?;
        let redraw =
            instruction.execute(&mut self.state, &self.pressed_keys, &self.quirks, address)?;

        Ok(Step {
            address,
            opcode,
            instruction,
            redraw,
        })
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode> {
        let word = self.state.read(usize::from(self.state.pc), 2)?;
        Ok(Opcode::from_bytes(word[0], word[1]))
    }

    /// Reverses the CPU by a single step if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - returns whether anything was restored
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                debug!("rewound to {:#06X}", state.pc);
                self.state = state;
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state.clone());
    }

    /// Counts both timers down by one, stopping at zero
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// V0..=VF
    pub fn registers(&self) -> &[u8; 16] {
        &self.state.v
    }

    /// Everything a debug inspector might want to show
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    /// Return addresses currently on the stack, oldest first (at most 16)
    pub fn stack(&self) -> &[u16] {
        debug_assert!(self.state.sp <= STACK_DEPTH);
        self.state.active_stack()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// The tone should play while the sound timer is running
    pub fn is_beeping(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Number of steps that can currently be rewound
    pub fn history_len(&self) -> usize {
        self.previous_states.len()
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

use std::fmt;

use crate::constants::KEY_COUNT;
use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::quirks::Quirks;
use crate::state::State;

/// Every instruction the machine understands, with its operands already pulled out of the word.
///
/// Register operands (`x`, `y`) are register indices 0x0..=0xF, not register values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Cls,
    /// `00EE`
    Ret,
    /// `1nnn`
    Jp { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    SeByte { x: u8, kk: u8 },
    /// `4xkk`
    SneByte { x: u8, kk: u8 },
    /// `5xy0`
    SeReg { x: u8, y: u8 },
    /// `6xkk`
    LdByte { x: u8, kk: u8 },
    /// `7xkk`
    AddByte { x: u8, kk: u8 },
    /// `8xy0`
    LdReg { x: u8, y: u8 },
    /// `8xy1`
    Or { x: u8, y: u8 },
    /// `8xy2`
    And { x: u8, y: u8 },
    /// `8xy3`
    Xor { x: u8, y: u8 },
    /// `8xy4`
    AddReg { x: u8, y: u8 },
    /// `8xy5`
    Sub { x: u8, y: u8 },
    /// `8xy6`
    Shr { x: u8, y: u8 },
    /// `8xy7`
    Subn { x: u8, y: u8 },
    /// `8xyE`
    Shl { x: u8, y: u8 },
    /// `9xy0`
    SneReg { x: u8, y: u8 },
    /// `Annn`
    LdI { addr: u16 },
    /// `Bnnn`
    JpV0 { addr: u16 },
    /// `Cxkk`
    Rnd { x: u8, kk: u8 },
    /// `Dxyn`
    Drw { x: u8, y: u8, n: u8 },
    /// `Ex9E`
    Skp { x: u8 },
    /// `ExA1`
    Sknp { x: u8 },
    /// `Fx07`
    LdVxDt { x: u8 },
    /// `Fx0A`
    LdVxKey { x: u8 },
    /// `Fx15`
    LdDtVx { x: u8 },
    /// `Fx18`
    LdStVx { x: u8 },
    /// `Fx1E`
    AddI { x: u8 },
    /// `Fx29`
    LdGlyph { x: u8 },
    /// `Fx33`
    LdBcd { x: u8 },
    /// `Fx55`
    StoreRegs { x: u8 },
    /// `Fx65`
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode, or `None` if the word isn't a known encoding
    pub fn decode(op: Opcode) -> Option<Self> {
        use Instruction::*;

        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x1, ..) => Jp { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SeByte { x, kk },
            (0x4, ..) => SneByte { x, kk },
            (0x5, .., 0x0) => SeReg { x, y },
            (0x6, ..) => LdByte { x, kk },
            (0x7, ..) => AddByte { x, kk },
            (0x8, .., 0x0) => LdReg { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => Shr { x, y },
            (0x8, .., 0x7) => Subn { x, y },
            (0x8, .., 0xE) => Shl { x, y },
            (0x9, .., 0x0) => SneReg { x, y },
            (0xA, ..) => LdI { addr },
            (0xB, ..) => JpV0 { addr },
            (0xC, ..) => Rnd { x, kk },
            (0xD, ..) => Drw { x, y, n },
            (0xE, _, 0x9, 0xE) => Skp { x },
            (0xE, _, 0xA, 0x1) => Sknp { x },
            (0xF, _, 0x0, 0x7) => LdVxDt { x },
            (0xF, _, 0x0, 0xA) => LdVxKey { x },
            (0xF, _, 0x1, 0x5) => LdDtVx { x },
            (0xF, _, 0x1, 0x8) => LdStVx { x },
            (0xF, _, 0x1, 0xE) => AddI { x },
            (0xF, _, 0x2, 0x9) => LdGlyph { x },
            (0xF, _, 0x3, 0x3) => LdBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegs { x },
            (0xF, _, 0x6, 0x5) => LoadRegs { x },
            _ => return None,
        };
        Some(instruction)
    }

    /// Applies the instruction to `state`.
    ///
    /// `at` is the address the instruction was fetched from; PC must already point past it.
    /// Returns whether the frame buffer changed.
    pub fn execute(
        self,
        state: &mut State,
        pressed_keys: &[bool; KEY_COUNT],
        quirks: &Quirks,
        at: u16,
    ) -> Result<bool> {
        use Instruction::*;

        let r = |register: u8| usize::from(register);
        match self {
            Cls => {
                clr(state);
                return Ok(true);
            }
            Ret => rts(state, at)?,
            Jp { addr } => jump(state, addr),
            Call { addr } => call(state, addr, at)?,
            SeByte { x, kk } => ske(state, r(x), kk),
            SneByte { x, kk } => skne(state, r(x), kk),
            SeReg { x, y } => skre(state, r(x), r(y)),
            LdByte { x, kk } => load(state, r(x), kk),
            AddByte { x, kk } => add(state, r(x), kk),
            LdReg { x, y } => mv(state, r(x), r(y)),
            Or { x, y } => or(state, r(x), r(y)),
            And { x, y } => and(state, r(x), r(y)),
            Xor { x, y } => xor(state, r(x), r(y)),
            AddReg { x, y } => addr(state, r(x), r(y)),
            Sub { x, y } => sub(state, r(x), r(y)),
            Shr { x, y } => shr(state, r(x), r(y), quirks.shift),
            Subn { x, y } => subn(state, r(x), r(y)),
            Shl { x, y } => shl(state, r(x), r(y), quirks.shift),
            SneReg { x, y } => skrne(state, r(x), r(y)),
            LdI { addr } => loadi(state, addr),
            JpV0 { addr } => jumpi(state, addr),
            Rnd { x, kk } => rand(state, r(x), kk),
            Drw { x, y, n } => {
                draw(state, r(x), r(y), n)?;
                return Ok(true);
            }
            Skp { x } => skpr(state, r(x), pressed_keys),
            Sknp { x } => skup(state, r(x), pressed_keys),
            LdVxDt { x } => moved(state, r(x)),
            LdVxKey { x } => keyd(state, r(x), pressed_keys),
            LdDtVx { x } => loads(state, r(x)),
            LdStVx { x } => ld(state, r(x)),
            AddI { x } => addi(state, r(x)),
            LdGlyph { x } => ldspr(state, r(x)),
            LdBcd { x } => bcd(state, r(x))?,
            StoreRegs { x } => stor(state, r(x))?,
            LoadRegs { x } => read(state, r(x))?,
        }
        Ok(false)
    }
}

/// Disassembly in the conventional `MNEMONIC dst, src` form
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp { addr } => write!(f, "JP 0x{:03X}", addr),
            Call { addr } => write!(f, "CALL 0x{:03X}", addr),
            SeByte { x, kk } => write!(f, "SE V{:X}, 0x{:02X}", x, kk),
            SneByte { x, kk } => write!(f, "SNE V{:X}, 0x{:02X}", x, kk),
            SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LdByte { x, kk } => write!(f, "LD V{:X}, 0x{:02X}", x, kk),
            AddByte { x, kk } => write!(f, "ADD V{:X}, 0x{:02X}", x, kk),
            LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI { addr } => write!(f, "LD I, 0x{:03X}", addr),
            JpV0 { addr } => write!(f, "JP V0, 0x{:03X}", addr),
            Rnd { x, kk } => write!(f, "RND V{:X}, 0x{:02X}", x, kk),
            Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Skp { x } => write!(f, "SKP V{:X}", x),
            Sknp { x } => write!(f, "SKNP V{:X}", x),
            LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            LdVxKey { x } => write!(f, "LD V{:X}, K", x),
            LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LdGlyph { x } => write!(f, "LD F, V{:X}", x),
            LdBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegs { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegs { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

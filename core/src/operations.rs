use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, GLYPH_SIZE, KEY_COUNT, STACK_DEPTH,
};
use crate::error::{Error, Result};
use crate::quirks::ShiftQuirk;
use crate::state::State;

// PC has already been moved past the instruction by the time any of these run,
// so skips only add the extra 2 and jumps/calls are absolute.

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
}

/// PC = STACK.pop()
pub fn rts(state: &mut State, at: u16) -> Result<()> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow { address: at });
    }
    state.sp -= 1;
    state.pc = state.stack[state.sp];
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16, at: u16) -> Result<()> {
    if state.sp == STACK_DEPTH {
        return Err(Error::StackOverflow { address: at });
    }
    state.stack[state.sp] = state.pc;
    state.sp += 1;
    state.pc = addr;
    Ok(())
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] == state.v[y];
    skip_if(state, condition);
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] != state.v[y];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) {
    state.v[x] = kk;
}

/// Vx += kk
/// Overflow wraps and is dropped; VF is untouched
pub fn add(state: &mut State, x: usize, kk: u8) {
    state.v[x] = state.v[x].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) {
    state.v[x] = state.v[y];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) {
    state.v[x] |= state.v[y];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) {
    state.v[x] &= state.v[y];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) {
    state.v[x] ^= state.v[y];
}

/// Vx += Vy; VF = overflow
/// VF is written first, so `8FY4` leaves the truncated sum in VF
pub fn addr(state: &mut State, x: usize, y: usize) {
    let (res, over) = state.v[x].overflowing_add(state.v[y]);
    state.v[FLAG_REGISTER] = u8::from(over);
    state.v[x] = res;
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: usize, y: usize) {
    let (res, under) = state.v[x].overflowing_sub(state.v[y]);
    state.v[FLAG_REGISTER] = u8::from(!under);
    state.v[x] = res;
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: usize, y: usize) {
    let (res, under) = state.v[y].overflowing_sub(state.v[x]);
    state.v[FLAG_REGISTER] = u8::from(!under);
    state.v[x] = res;
}

fn shift_source(state: &State, x: usize, y: usize, quirk: ShiftQuirk) -> u8 {
    match quirk {
        ShiftQuirk::Vx => state.v[x],
        ShiftQuirk::Vy => state.v[y],
    }
}

/// Vx = src >> 1; VF = lsb(src)
pub fn shr(state: &mut State, x: usize, y: usize, quirk: ShiftQuirk) {
    let src = shift_source(state, x, y, quirk);
    state.v[FLAG_REGISTER] = src & 0x1;
    state.v[x] = src >> 1;
}

/// Vx = src << 1; VF = msb(src)
pub fn shl(state: &mut State, x: usize, y: usize, quirk: ShiftQuirk) {
    let src = shift_source(state, x, y, quirk);
    state.v[FLAG_REGISTER] = src >> 7;
    state.v[x] = src << 1;
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = addr + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand(state: &mut State, x: usize, kk: u8) {
    let rand_byte: u8 = rand::random();
    state.v[x] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n-byte sprite at mem[I..I+n] onto the FrameBuffer, MSB as the leftmost pixel.
/// The origin wraps around the screen but the sprite itself is clipped at the edges.
/// Sets VF if any pixel is erased
pub fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<()> {
    let rows = usize::from(n);
    let mut sprite = [0u8; 16];
    sprite[..rows].copy_from_slice(state.read(usize::from(state.i), rows)?);

    let origin_x = usize::from(state.v[x]) % DISPLAY_WIDTH;
    let origin_y = usize::from(state.v[y]) % DISPLAY_HEIGHT;
    let mut collision = 0;

    for (row, byte) in sprite[..rows].iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            let pixel = (byte >> (7 - bit)) & 1;
            collision |= pixel & state.frame_buffer[py][px];
            state.frame_buffer[py][px] ^= pixel;
        }
    }

    state.v[FLAG_REGISTER] = collision;
    Ok(())
}

fn key_down(state: &State, x: usize, pressed_keys: &[bool; KEY_COUNT]) -> bool {
    pressed_keys[usize::from(state.v[x] & 0xF)]
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: usize, pressed_keys: &[bool; KEY_COUNT]) {
    let condition = key_down(state, x, pressed_keys);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: usize, pressed_keys: &[bool; KEY_COUNT]) {
    let condition = !key_down(state, x, pressed_keys);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) {
    state.v[x] = state.delay_timer;
}

/// await keypress for Vx
/// With no key down the PC is wound back so this instruction runs again next step
pub fn keyd(state: &mut State, x: usize, pressed_keys: &[bool; KEY_COUNT]) {
    match pressed_keys.iter().position(|&pressed| pressed) {
        Some(key) => state.v[x] = key as u8,
        None => state.pc = state.pc.wrapping_sub(2),
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: usize) {
    state.delay_timer = state.v[x];
}

/// ST = Vx
pub fn ld(state: &mut State, x: usize) {
    state.sound_timer = state.v[x];
}

/// I += Vx
pub fn addi(state: &mut State, x: usize) {
    state.i = state.i.wrapping_add(u16::from(state.v[x]));
}

/// I = Vx * 5
/// Set I to the address of the sprite sheet glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, x: usize) {
    state.i = u16::from(state.v[x] & 0xF) * GLYPH_SIZE;
}

/// mem[I..I+3] = bcd(Vx)
pub fn bcd(state: &mut State, x: usize) -> Result<()> {
    let value = state.v[x];
    let digits = [value / 100, value / 10 % 10, value % 10];
    let i = usize::from(state.i);
    state.read_mut(i, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) -> Result<()> {
    let v = state.v;
    let i = usize::from(state.i);
    state.read_mut(i, x + 1)?.copy_from_slice(&v[..=x]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) -> Result<()> {
    let mut v = state.v;
    v[..=x].copy_from_slice(state.read(usize::from(state.i), x + 1)?);
    state.v = v;
    Ok(())
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use chip8vm_core::{ShiftQuirk, DEFAULT_INSTRUCTIONS_PER_FRAME};

mod keymap;
mod run;
mod session;
mod sound;

/// Runs a program for the 64x32 hex-keypad virtual machine.
///
/// Keypad: 1234/QWER/ASDF/ZXCV. P pauses, N single-steps, Space fast-forwards,
/// Backspace rewinds, +/- change speed, F5 resets, Escape quits.
/// Set RUST_LOG=trace for a disassembly of every executed instruction.
#[derive(Parser, Debug)]
#[command(name = "chip8vm", version)]
struct Args {
    /// Program image to load at 0x200
    #[arg(value_name = "ROM")]
    rom: PathBuf,

    /// Instructions per 1/60th of a second
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_FRAME)]
    speed: u32,

    /// Window pixels per display pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Register the shift instructions read from: vx or vy
    #[arg(long, default_value_t = ShiftQuirk::Vx)]
    shift_quirk: ShiftQuirk,

    /// Start paused in single-step mode
    #[arg(long, default_value_t = false)]
    paused: bool,

    /// Don't play a tone while the sound timer runs
    #[arg(long, default_value_t = false)]
    mute: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let options = run::Options {
        rom: args.rom,
        speed: args.speed,
        scale: args.scale,
        shift_quirk: args.shift_quirk,
        paused: args.paused,
        mute: args.mute,
    };

    match run::run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{error, info};
use sdl2::event::Event;

use chip8vm_core::{Machine, Quirks, ShiftQuirk, TIMER_HZ};
use chip8vm_display::{Display, Palette};

use crate::keymap::{control, keypad};
use crate::session::Session;
use crate::sound::{Mute, Sound, Tone};

/// Everything needed to start a session
#[derive(Debug, Clone)]
pub struct Options {
    pub rom: PathBuf,
    pub speed: u32,
    pub scale: u32,
    pub shift_quirk: ShiftQuirk,
    pub paused: bool,
    pub mute: bool,
}

pub fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let mut machine = Machine::with_quirks(Quirks {
        shift: options.shift_quirk,
    });

    // Load ROM
    let file = File::open(&options.rom)?;
    machine.load_rom(&mut BufReader::new(file))?;
    info!(
        "loaded {} (shift quirk {}, {} instructions per frame)",
        options.rom.display(),
        options.shift_quirk,
        options.speed
    );

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, options.scale, Palette::default())?;
    let mut sound: Box<dyn Sound> = if options.mute {
        Box::new(Mute)
    } else {
        Box::new(Tone::new(&sdl)?)
    };
    let mut events = sdl.event_pump()?;

    let mut session = Session::new(options.speed, options.paused);
    let frame_time = Duration::from_secs(1) / TIMER_HZ;
    display.render(machine.frame_buffer())?;

    while session.running {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => session.running = false,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (keypad(key), control(key)) {
                    (Some(index), _) => machine.set_key(index, true),
                    (_, Some(c)) => session.handle(c, true),
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (keypad(key), control(key)) {
                    (Some(index), _) => machine.set_key(index, false),
                    (_, Some(c)) => session.handle(c, false),
                    _ => continue,
                },
                _ => continue,
            }
        }

        // Update state
        if advance(&mut machine, &mut session) {
            display.render(machine.frame_buffer())?;
        }
        sound.set(!session.paused && machine.is_beeping());

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !session.fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    sound.stop();
    Ok(())
}

/// Runs one frame's worth of the machine; returns whether the display needs redrawing.
///
/// A failing instruction pauses the session so it can be inspected or rewound.
fn advance(machine: &mut Machine, session: &mut Session) -> bool {
    if std::mem::take(&mut session.reset_requested) {
        machine.reset();
        return true;
    }

    if session.rewinding {
        for _ in 0..session.speed {
            if !machine.rewind() {
                break;
            }
        }
        return true;
    }

    let stepping = session.paused;
    let mut redraw = false;
    for _ in 0..session.steps_this_frame() {
        match machine.step() {
            Ok(step) => {
                redraw |= step.redraw;
                if stepping {
                    info!("{}\n{}", step, machine.state());
                }
            }
            Err(e) => {
                error!("halting: {}", e);
                session.paused = true;
                return redraw;
            }
        }
    }

    if !session.paused {
        machine.tick_timers();
    }
    redraw
}

use crate::keymap::Control;

/// Fast forward runs this many frames' worth of instructions per frame
const FAST_FORWARD_FACTOR: u32 = 4;

const MIN_SPEED: u32 = 1;
const MAX_SPEED: u32 = 1000;

/// # Session
/// Pacing and debugging flags for a single run of a program.
///
/// The run loop owns the session and hands it to input handling by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Instructions per 1/60th of a second
    pub speed: u32,
    pub paused: bool,
    /// Single-step request while paused; consumed by the next frame
    pub step_requested: bool,
    pub fast_forward: bool,
    pub rewinding: bool,
    pub reset_requested: bool,
    pub running: bool,
}

impl Session {
    pub fn new(speed: u32, paused: bool) -> Self {
        Session {
            speed: speed.clamp(MIN_SPEED, MAX_SPEED),
            paused,
            step_requested: false,
            fast_forward: false,
            rewinding: false,
            reset_requested: false,
            running: true,
        }
    }

    /// Applies a control key going down (`pressed`) or up.
    ///
    /// Fast forward and rewind last while their key is held; everything else acts on press.
    pub fn handle(&mut self, control: Control, pressed: bool) {
        match (control, pressed) {
            (Control::FastForward, held) => self.fast_forward = held,
            (Control::Rewind, held) => self.rewinding = held,
            (_, false) => {}
            (Control::Pause, true) => self.paused = !self.paused,
            (Control::Step, true) => {
                self.paused = true;
                self.step_requested = true;
            }
            (Control::SpeedUp, true) => self.speed = (self.speed * 2).min(MAX_SPEED),
            (Control::SpeedDown, true) => self.speed = (self.speed / 2).max(MIN_SPEED),
            (Control::Reset, true) => self.reset_requested = true,
            (Control::Quit, true) => self.running = false,
        }
    }

    /// How many instructions to run this frame; consumes a pending single step
    pub fn steps_this_frame(&mut self) -> u32 {
        if self.paused {
            u32::from(std::mem::take(&mut self.step_requested))
        } else if self.fast_forward {
            self.speed * FAST_FORWARD_FACTOR
        } else {
            self.speed
        }
    }
}

use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// Plays a tone while the machine's sound timer is running
pub trait Sound {
    fn beep(&mut self);
    fn stop(&mut self);

    fn set(&mut self, on: bool) {
        if on {
            self.beep()
        } else {
            self.stop()
        }
    }
}

const TONE_PITCH: f32 = 440.0;
const TONE_VOLUME: f32 = 0.2;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase < 0.5 {
                TONE_VOLUME
            } else {
                -TONE_VOLUME
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Square wave through the default SDL2 playback device
pub struct Tone {
    device: AudioDevice<SquareWave>,
    is_beeping: bool,
}

impl Tone {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_PITCH / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(Tone {
            device,
            is_beeping: false,
        })
    }
}

impl Sound for Tone {
    fn beep(&mut self) {
        if !self.is_beeping {
            self.device.resume();
            self.is_beeping = true;
        }
    }

    fn stop(&mut self) {
        if self.is_beeping {
            self.device.pause();
            self.is_beeping = false;
        }
    }
}

pub struct Mute;

impl Sound for Mute {
    fn beep(&mut self) {}

    fn stop(&mut self) {}
}

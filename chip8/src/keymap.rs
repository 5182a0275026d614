use sdl2::keyboard::Keycode;

/// # Keymap
/// Input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keypad(key: Keycode) -> Option<u8> {
    match key {
        Keycode::X => Some(0x0),
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::Z => Some(0xA),
        Keycode::C => Some(0xB),
        Keycode::Num4 => Some(0xC),
        Keycode::R => Some(0xD),
        Keycode::F => Some(0xE),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

/// Keys that drive the session rather than the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Step,
    FastForward,
    Rewind,
    SpeedUp,
    SpeedDown,
    Reset,
    Quit,
}

pub fn control(key: Keycode) -> Option<Control> {
    match key {
        Keycode::P => Some(Control::Pause),
        Keycode::N => Some(Control::Step),
        Keycode::Space => Some(Control::FastForward),
        Keycode::Backspace => Some(Control::Rewind),
        Keycode::Equals | Keycode::KpPlus => Some(Control::SpeedUp),
        Keycode::Minus | Keycode::KpMinus => Some(Control::SpeedDown),
        Keycode::F5 => Some(Control::Reset),
        Keycode::Escape => Some(Control::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[rustfmt::skip]
    fn test_keypad_covers_every_key_once() {
        let mut seen = [false; 16];
        for key in [
            Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4,
            Keycode::Q, Keycode::W, Keycode::E, Keycode::R,
            Keycode::A, Keycode::S, Keycode::D, Keycode::F,
            Keycode::Z, Keycode::X, Keycode::C, Keycode::V,
        ] {
            let index = usize::from(keypad(key).unwrap());
            assert!(!seen[index], "{:X} mapped twice", index);
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_controls_dont_overlap_keypad() {
        for key in [Keycode::P, Keycode::N, Keycode::Space, Keycode::Backspace, Keycode::Escape] {
            assert!(control(key).is_some());
            assert_eq!(keypad(key), None);
        }
    }
}

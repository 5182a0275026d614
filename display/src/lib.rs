use sdl2::pixels::PixelFormatEnum;

use chip8vm_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// RGB colors for lit and unlit pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub on: [u8; 3],
    pub off: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            on: [0x72, 0x89, 0xDA],
            off: [0x2C, 0x2F, 0x33],
        }
    }
}

/// # Display
/// The machine's display is composed of 64x32 monochrome pixels.
/// The on/off state of these pixels is encoded as 1/0 respectively in a 2d array of 64x32 bytes.
/// The display only gets a call to `render` when a step reports that the FrameBuffer changed.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    palette: Palette,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    /// * `palette` the colors to draw lit and unlit pixels with
    pub fn new(sdl: &sdl2::Sdl, scale: u32, palette: Palette) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chip8vm",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window
            .into_canvas()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Display { canvas, palette })
    }

    /// Formats a FrameBuffer as rows of RGB24 pixels.
    ///
    /// Each row occupies `pitch` bytes, of which the first `DISPLAY_WIDTH * 3` are pixels.
    ///
    /// # Arguments
    /// * `frame` the machine's FrameBuffer
    /// * `palette` the colors to use
    /// * `buffer` the texture's pixel memory
    /// * `pitch` the length of a row in `buffer`
    fn frame_to_texture(frame: &FrameBuffer, palette: &Palette, buffer: &mut [u8], pitch: usize) {
        for (y, row) in frame.iter().enumerate() {
            for (x, &pixel) in row.iter().enumerate() {
                let offset = y * pitch + x * 3;
                let color = if pixel == 1 { palette.on } else { palette.off };
                buffer[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }

    /// Formats the FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` the machine's FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let palette = self.palette;
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            Display::frame_to_texture(frame, &palette, buffer, pitch);
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: Palette = Palette {
        on: [255, 255, 255],
        off: [0, 0, 0],
    };

    #[test]
    fn test_frame_to_texture() {
        let mut frame: FrameBuffer = [[0; 64]; 32];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let mut buffer = vec![0x11; 6144];
        Display::frame_to_texture(&frame, &PALETTE, &mut buffer, 192);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_frame_to_texture_respects_pitch() {
        let mut frame: FrameBuffer = [[0; 64]; 32];
        frame[1][0] = 1;
        let pitch = 200;
        let mut buffer = vec![0x11; pitch * 32];
        Display::frame_to_texture(&frame, &PALETTE, &mut buffer, pitch);

        assert_eq!(buffer[pitch..pitch + 3], [255, 255, 255]);
        // padding at the end of each row is left alone
        assert_eq!(buffer[192..200], [0x11; 8]);
    }
}

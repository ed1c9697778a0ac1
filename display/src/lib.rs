use anyhow::{Context, Result};
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::FrameBuffer;

/// Bytes per pixel of an RGB24 texture
const RGB_CHANNELS: usize = 3;

/// # Screen
/// Renders Chip-8 frames into an sdl2 window.
///
/// The on/off state of each of the 64x32 pixels becomes white/black, each Chip-8 pixel
/// covering a `scale` x `scale` square of the window. The screen only needs a call to
/// `render` when the interpreter hands over a new frame.
pub struct Screen {
    canvas: WindowCanvas,
}

impl Screen {
    /// Opens a window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `title` the window title
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, title: &str, scale: u32) -> Result<Self> {
        let video_subsystem = sdl.video().map_err(anyhow::Error::msg)?;
        let window = video_subsystem
            .window(
                title,
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .context("unable to open window")?;
        let canvas = window
            .into_canvas()
            .build()
            .context("unable to create canvas")?;

        let mut screen = Screen { canvas };
        screen.render(&[[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT])?;
        Ok(screen)
    }

    /// Formats a Chip-8 FrameBuffer for rendering as an SDL2 texture.
    ///
    /// An SDL2 RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
    ///
    /// This creates a black and white rendering by:
    /// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
    /// - Triplicating each element of that 1D array to represent the RGB values of each pixel
    /// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|pixel| std::iter::repeat(pixel * 255).take(RGB_CHANNELS))
            .collect()
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<()> {
        let texture_creator = self.canvas.texture_creator();
        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .context("unable to create texture")?;

        let pixels = Screen::frame_to_sdl_texture(frame);
        let row_bytes = DISPLAY_WIDTH * RGB_CHANNELS;
        texture
            .with_lock(None, |buffer: &mut [u8], pitch: usize| {
                // rows may be padded out to `pitch` bytes
                for (row, source) in pixels.chunks(row_bytes).enumerate() {
                    let offset = row * pitch;
                    buffer[offset..offset + row_bytes].copy_from_slice(source);
                }
            })
            .map_err(anyhow::Error::msg)?;

        self.canvas
            .copy(&texture, None, None)
            .map_err(anyhow::Error::msg)?;
        self.canvas.present();
        Ok(())
    }
}

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// How sprites behave when they cross the edge of the screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteMode {
    /// Pixels past an edge reappear on the opposite edge
    Wrap,
    /// The sprite's origin wraps, but pixels past the right or bottom edge are dropped
    Clip,
}

impl Default for SpriteMode {
    fn default() -> Self {
        SpriteMode::Wrap
    }
}

/// # Display
/// The Chip-8 display is 64x32 monochrome pixels.
///
/// Sprites are XORed onto the frame buffer; a pixel being switched off by a draw is a
/// collision. Any change raises the redraw flag, which stays up until a renderer takes
/// the frame.
#[derive(Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    redraw: bool,
    sprite_mode: SpriteMode,
}

impl Display {
    pub fn new(sprite_mode: SpriteMode) -> Self {
        Display {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            redraw: false,
            sprite_mode,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.redraw = true;
    }

    /// XORs `sprite` onto the frame buffer with its top left corner at (x, y).
    ///
    /// Each byte of the sprite is a row of 8 pixels, most significant bit leftmost.
    /// Returns whether any pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let origin_x = x as usize % DISPLAY_WIDTH;
        let origin_y = y as usize % DISPLAY_HEIGHT;
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let target = match self.sprite_mode {
                    SpriteMode::Wrap => Some((
                        (origin_x + bit) % DISPLAY_WIDTH,
                        (origin_y + row) % DISPLAY_HEIGHT,
                    )),
                    SpriteMode::Clip => {
                        let (px, py) = (origin_x + bit, origin_y + row);
                        if px < DISPLAY_WIDTH && py < DISPLAY_HEIGHT {
                            Some((px, py))
                        } else {
                            None
                        }
                    }
                };
                if let Some((px, py)) = target {
                    let pixel = &mut self.frame_buffer[py][px];
                    collision |= *pixel == 1;
                    *pixel ^= 1;
                }
            }
        }

        self.redraw = true;
        collision
    }

    /// 1 if the pixel at (x, y) is on; coordinates outside the screen read as off
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub(crate) fn request_redraw(&mut self) {
        self.redraw = true;
    }

    pub fn redraw_pending(&self) -> bool {
        self.redraw
    }

    /// Returns the FrameBuffer if the display should be redrawn, lowering the redraw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.redraw {
            self.redraw = false;
            Some(self.frame_buffer)
        } else {
            None
        }
    }

    pub fn sprite_mode(&self) -> SpriteMode {
        self.sprite_mode
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new(SpriteMode::default())
    }
}

use crate::constants::MAX_SAVED_STATES;
use crate::display::SpriteMode;

/// Interpreter behaviour that differs between Chip-8 implementations or is up to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Whether sprites wrap around or are clipped at the screen edges
    pub sprite_mode: SpriteMode,
    /// How many past states to keep for rewinding; 0 disables rewinding
    pub history_depth: usize,
    /// Seed for `Cxnn`; `None` seeds from the operating system
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sprite_mode: SpriteMode::Wrap,
            history_depth: MAX_SAVED_STATES,
            seed: None,
        }
    }
}

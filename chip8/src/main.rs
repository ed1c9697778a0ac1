//! # chip8
//! Runs a Chip-8 ROM in an sdl2 window.
//!
//! ```text
//! chip8 roms/PONG --ips 700 --scale 12
//! ```
//!
//! Keys `1234/QWER/ASDF/ZXCV` are the keypad, Space fast forwards, Backspace rewinds while
//! held and Escape quits. Set `RUST_LOG=trace` to log every instruction as it executes.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use emu8_core::constants::{DEFAULT_INSTRUCTIONS_PER_SECOND, MAX_SAVED_STATES, TIMER_FREQUENCY};
use emu8_core::{Config, SpriteMode};

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(version, about = "A Chip-8 emulator")]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = DEFAULT_INSTRUCTIONS_PER_SECOND, value_parser = clap::value_parser!(u32).range(1..))]
    ips: u32,

    /// Rate at which the timers count down and the screen refreshes (Hz)
    #[arg(long, default_value_t = TIMER_FREQUENCY, value_parser = clap::value_parser!(u32).range(1..))]
    timer_hz: u32,

    /// Size of each Chip-8 pixel in screen pixels
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Drop sprite pixels that cross the screen edge instead of wrapping them
    #[arg(long)]
    clip_sprites: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    seed: Option<u64>,

    /// Number of instructions that can be rewound; 0 disables rewinding
    #[arg(long, default_value_t = MAX_SAVED_STATES)]
    history: usize,
}

impl Args {
    fn into_options(self) -> run::Options {
        let sprite_mode = if self.clip_sprites {
            SpriteMode::Clip
        } else {
            SpriteMode::Wrap
        };
        run::Options {
            rom: self.rom,
            instructions_per_second: self.ips,
            timer_frequency: self.timer_hz,
            scale: self.scale,
            config: Config {
                sprite_mode,
                history_depth: self.history,
                seed: self.seed,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run::run(args.into_options())
}

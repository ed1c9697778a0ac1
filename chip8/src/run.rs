use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;

use display::Screen;
use emu8_core::{Config, Interpreter};

use crate::keymap::keymap;

/// Everything the emulator needs to know to start
pub struct Options {
    pub rom: PathBuf,
    pub instructions_per_second: u32,
    pub timer_frequency: u32,
    pub scale: u32,
    pub config: Config,
}

/// Spreads the instruction rate over timer ticks; 700 instructions at 60Hz alternate
/// between frames of 11 and 12 instructions rather than drifting to 660 per second.
struct Pacer {
    instructions_per_second: u32,
    ticks_per_second: u32,
    carry: u32,
}

impl Pacer {
    fn new(instructions_per_second: u32, ticks_per_second: u32) -> Self {
        Pacer {
            instructions_per_second,
            ticks_per_second,
            carry: 0,
        }
    }

    /// Number of instructions to run before the next timer tick
    fn next_frame(&mut self) -> u32 {
        let total = self.instructions_per_second + self.carry;
        self.carry = total % self.ticks_per_second;
        total / self.ticks_per_second
    }
}

pub fn run(options: Options) -> Result<()> {
    let mut chip8 = Interpreter::with_config(options.config);

    // Load ROM
    let file = File::open(&options.rom)
        .with_context(|| format!("unable to open {}", options.rom.display()))?;
    chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", options.rom.display()))?;
    info!("successfully loaded {}", options.rom.display());
    let keypad = chip8.keypad();

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut screen = Screen::new(&sdl, "Emu-8", options.scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    // Set initial timing
    let frame_time = Duration::from_secs(1) / options.timer_frequency;
    let mut pacer = Pacer::new(options.instructions_per_second, options.timer_frequency);
    let mut last_frame = Instant::now();

    // Whether or not the default clock speed should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::Window {
                    win_event: WindowEvent::FocusLost,
                    ..
                } => keypad.release_all(),
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.press(kc),
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Backspace, _) => rewind = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => keypad.release(kc),
                    (Keycode::Space, _) => fast_forward = false,
                    (Keycode::Backspace, _) => rewind = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        let steps = pacer.next_frame();
        if rewind {
            for _ in 0..steps {
                if !chip8.rewind() {
                    debug!("nothing left to rewind");
                    break;
                }
            }
        } else {
            for _ in 0..steps {
                chip8
                    .step()
                    .with_context(|| format!("execution halted at {:#05X}", chip8.pc()))?;
            }
            chip8.tick_timers();
        }

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.take_frame() {
            screen.render(&frame)?;
        }

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
        last_frame = Instant::now();
    }

    info!("shutting down");
    Ok(())
}

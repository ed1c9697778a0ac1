use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a 16 key hexadecimal keypad.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// `Keypad` is a cheap handle; clones share the same key states so an input thread can
/// press and release keys while the interpreter reads them. Each key is an atomic flag,
/// so a read never observes a half written state.
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    keys: Arc<[AtomicBool; KEY_COUNT]>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key; keys outside 0x0..=0xF are ignored
    pub fn press(&self, key: u8) {
        if let Some(flag) = self.keys.get(key as usize) {
            flag.store(true, Ordering::Release);
        }
    }

    /// Unset the pressed status of key; keys outside 0x0..=0xF are ignored
    pub fn release(&self, key: u8) {
        if let Some(flag) = self.keys.get(key as usize) {
            flag.store(false, Ordering::Release);
        }
    }

    /// Keys outside 0x0..=0xF are never pressed
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys
            .get(key as usize)
            .map_or(false, |flag| flag.load(Ordering::Acquire))
    }

    /// The lowest numbered key currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys
            .iter()
            .position(|flag| flag.load(Ordering::Acquire))
            .map(|key| key as u8)
    }

    pub fn release_all(&self) {
        for flag in self.keys.iter() {
            flag.store(false, Ordering::Release);
        }
    }
}

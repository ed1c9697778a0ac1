/// # Timers
/// Two 8-bit counters that count down to zero at a fixed rate (conventionally 60Hz).
///
/// Counting is driven entirely by `tick`, which the scheduler calls on its own clock; executing
/// instructions never moves the timers. A non-zero sound timer means the buzzer is on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decrements both timers, stopping at 0
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

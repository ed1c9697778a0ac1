use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::display::{Display, FrameBuffer};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::operations::{add_immediate, alu, bcd, font_address};
use crate::registers::Registers;
use crate::state::State;
use crate::timers::Timers;

/// Where the program counter goes once an instruction has executed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = address
    Jump(u16),
    /// pc stays put so the instruction runs again
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Flow {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// # Interpreter
/// Executes Chip-8 programs one instruction at a time.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - a `keypad` handle shared with the input device
///  - the random source used by `Cxnn`
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing and reversing the CPU
/// - advancing its timers
/// - taking its frame buffer for rendering by some display
///
/// Pacing is entirely up to the caller: `step` runs exactly one instruction and
/// `tick_timers` should be called at 60Hz regardless of how many steps ran in between.
pub struct Interpreter {
    state: State,
    previous_states: VecDeque<State>,
    keypad: Keypad,
    rng: StdRng,
    config: Config,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            state: State::new(config.sprite_mode),
            previous_states: VecDeque::new(),
            keypad: Keypad::new(),
            rng,
            config,
        }
    }

    /// Copies `program` into memory at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.memory.load_program(program)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        self.state.memory.load_rom(reader)
    }

    /// Executes the instruction at the program counter.
    ///
    /// The program counter normally moves on by 2, or by 4 for a skip, or to wherever a
    /// jump, call or return sends it. The exception is `Fx0A`: while no key is held it leaves
    /// the program counter where it is, so callers must not assume every step advances.
    ///
    /// Returns the instruction that was executed. On error the state is left as it was
    /// before the instruction.
    pub fn step(&mut self) -> Result<Instruction> {
        let pc = self.state.pc;
        let op = self.state.memory.fetch_opcode(pc)?;
        let instruction = Instruction::decode(op);
        trace!("{:#05X}: {:04X} {}", pc, op, instruction);

        let snapshot = if self.config.history_depth > 0 {
            Some(self.state.clone())
        } else {
            None
        };

        let flow = execute(instruction, &mut self.state, &self.keypad, &mut self.rng)?;
        self.state.pc = match flow {
            Flow::Next => pc.wrapping_add(2),
            Flow::Skip => pc.wrapping_add(4),
            Flow::Jump(address) => address,
            Flow::Wait => pc,
        };

        if let Some(snapshot) = snapshot {
            self.save_state(snapshot);
        }
        Ok(instruction)
    }

    /// Counts both timers down by one; call at `TIMER_FREQUENCY`
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Reverses the CPU by a single instruction if possible
    /// - if there are previous states, pops the most recent one and restores it
    /// - returns whether there was a state to restore
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_back() {
            Some(state) => {
                self.state = state;
                self.state.display.request_redraw();
                debug!(
                    "rewound to {:#05X}, {} states left",
                    self.state.pc,
                    self.previous_states.len()
                );
                true
            }
            None => false,
        }
    }

    /// Puts a state in previous_states
    /// - if there are already `history_depth` saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.previous_states.len() >= self.config.history_depth {
            self.previous_states.pop_front();
        }
        self.previous_states.push_back(state);
    }

    /// Returns the FrameBuffer if the display should be redrawn and lowers the redraw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        self.state.display.take_frame()
    }

    /// A handle to the keypad; press and release keys through it from any thread
    pub fn keypad(&self) -> Keypad {
        self.keypad.clone()
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn stack_depth(&self) -> usize {
        self.state.stack.depth()
    }

    pub fn saved_states(&self) -> usize {
        self.previous_states.len()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the side effects of `instruction` to `state` and reports where the program
/// counter goes next. `state.pc` still holds the address of the instruction.
fn execute(
    instruction: Instruction,
    state: &mut State,
    keypad: &Keypad,
    rng: &mut StdRng,
) -> Result<Flow> {
    use Instruction::*;

    let registers = &mut state.registers;
    let flow = match instruction {
        Clear => {
            state.display.clear();
            Flow::Next
        }
        // PC = STACK.pop(), then continue after the call
        Return => Flow::Jump(state.stack.pop()?.wrapping_add(2)),
        Jump(address) => Flow::Jump(address),
        Call(address) => {
            state.stack.push(state.pc);
            Flow::Jump(address)
        }
        SkipIfEqual { x, nn } => Flow::skip_if(registers.get(x)? == nn),
        SkipIfNotEqual { x, nn } => Flow::skip_if(registers.get(x)? != nn),
        SkipIfRegistersEqual { x, y } => Flow::skip_if(registers.get(x)? == registers.get(y)?),
        Load { x, nn } => {
            registers.set(x, nn)?;
            Flow::Next
        }
        // VF is not touched
        AddImmediate { x, nn } => {
            registers.transform(x, |vx| add_immediate(vx, nn))?;
            Flow::Next
        }
        // VF is written before Vx, so with x = F the result wins over the flag
        Alu { op, x, y } => {
            let result = alu(op, registers.get(x)?, registers.get(y)?);
            if let Some(flag) = result.flag {
                registers.set_flag(flag);
            }
            registers.set(x, result.value)?;
            Flow::Next
        }
        SkipIfRegistersNotEqual { x, y } => {
            Flow::skip_if(registers.get(x)? != registers.get(y)?)
        }
        LoadIndex(address) => {
            registers.set_index(address);
            Flow::Next
        }
        JumpOffset(address) => Flow::Jump(address + u16::from(registers.get(0x0)?)),
        Random { x, nn } => {
            let byte: u8 = rng.gen();
            registers.set(x, byte & nn)?;
            Flow::Next
        }
        Draw { x, y, n } => {
            let (vx, vy) = (registers.get(x)?, registers.get(y)?);
            let sprite = state.memory.read_range(registers.index(), n as usize)?;
            let collision = state.display.draw_sprite(vx, vy, sprite);
            registers.set_flag(collision as u8);
            Flow::Next
        }
        SkipIfPressed { x } => Flow::skip_if(keypad.is_pressed(registers.get(x)?)),
        SkipIfNotPressed { x } => Flow::skip_if(!keypad.is_pressed(registers.get(x)?)),
        LoadDelay { x } => {
            registers.set(x, state.timers.delay())?;
            Flow::Next
        }
        WaitForKey { x } => match keypad.first_pressed() {
            Some(key) => {
                registers.set(x, key)?;
                Flow::Next
            }
            None => Flow::Wait,
        },
        SetDelay { x } => {
            state.timers.set_delay(registers.get(x)?);
            Flow::Next
        }
        SetSound { x } => {
            state.timers.set_sound(registers.get(x)?);
            Flow::Next
        }
        AddIndex { x } => {
            let index = registers.index().wrapping_add(u16::from(registers.get(x)?));
            registers.set_index(index);
            Flow::Next
        }
        LoadFont { x } => {
            registers.set_index(font_address(registers.get(x)?));
            Flow::Next
        }
        StoreBcd { x } => {
            state
                .memory
                .write_range(registers.index(), &bcd(registers.get(x)?))?;
            Flow::Next
        }
        // mem[I..=I+x] = V0..=Vx; I is left unchanged
        StoreRegisters { x } => {
            state
                .memory
                .write_range(registers.index(), registers.range(x)?)?;
            Flow::Next
        }
        // V0..=Vx = mem[I..=I+x]; I is left unchanged
        LoadRegisters { x } => {
            let values = state.memory.read_range(registers.index(), x + 1)?;
            registers.set_range(values)?;
            Flow::Next
        }
        Unknown(op) => {
            debug!("skipping unknown opcode {:04X} at {:#05X}", op, state.pc);
            Flow::Next
        }
    };
    Ok(flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLAG_REGISTER;
    use crate::display::SpriteMode;
    use crate::error::Error;
    use std::thread;

    const SEED: u64 = 7;

    fn config() -> Config {
        Config {
            seed: Some(SEED),
            ..Config::default()
        }
    }

    fn load(program: &[u8]) -> Interpreter {
        let mut interpreter = Interpreter::with_config(config());
        interpreter.load_program(program).unwrap();
        interpreter
    }

    fn run(program: &[u8], steps: usize) -> Interpreter {
        let mut interpreter = load(program);
        for _ in 0..steps {
            interpreter.step().unwrap();
        }
        interpreter
    }

    fn v(interpreter: &Interpreter, register: usize) -> u8 {
        interpreter.registers().get(register).unwrap()
    }

    #[test]
    fn test_starts_at_0x200() {
        let interpreter = Interpreter::new();
        assert_eq!(interpreter.pc(), 0x200);
        assert_eq!(interpreter.stack_depth(), 0);
    }

    #[test]
    fn test_load_then_add() {
        // V0 = 1; V0 += 1
        let interpreter = run(&[0x60, 0x01, 0x70, 0x01], 2);
        assert_eq!(v(&interpreter, 0x0), 2);
        assert_eq!(interpreter.pc(), 0x204);
    }

    #[test]
    fn test_step_returns_executed_instruction() {
        let mut interpreter = load(&[0x60, 0x01]);
        assert_eq!(
            interpreter.step().unwrap(),
            Instruction::Load { x: 0, nn: 0x01 }
        );
    }

    #[test]
    fn test_annn_sets_index() {
        let interpreter = run(&[0xA2, 0xFF], 1);
        assert_eq!(interpreter.registers().index(), 0x2FF);
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_00e0_clears_display() {
        // draw the 0 glyph then clear
        let mut interpreter = run(&[0xD0, 0x05, 0x00, 0xE0], 1);
        interpreter.take_frame();
        interpreter.step().unwrap();
        let frame = interpreter.take_frame().unwrap();
        assert!(frame.iter().flatten().all(|&pixel| pixel == 0));
    }

    #[test]
    fn test_1nnn_jumps() {
        // JP 0x204; LD V0, 0x01; LD V1, 0x01
        let interpreter = run(&[0x12, 0x04, 0x60, 0x01, 0x61, 0x01], 2);
        assert_eq!(v(&interpreter, 0x0), 0);
        assert_eq!(v(&interpreter, 0x1), 1);
    }

    #[test]
    fn test_call_and_return_round_trip() {
        // 0x200 CALL 0x206
        // 0x202 LD V1, 0x02
        // 0x204 JP 0x204
        // 0x206 LD V0, 0x01
        // 0x208 RET
        let mut interpreter = load(&[
            0x22, 0x06, 0x61, 0x02, 0x12, 0x04, 0x60, 0x01, 0x00, 0xEE,
        ]);
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(interpreter.stack_depth(), 1);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x202);
        assert_eq!(interpreter.stack_depth(), 0);
        interpreter.step().unwrap();
        assert_eq!(v(&interpreter, 0x0), 1);
        assert_eq!(v(&interpreter, 0x1), 2);
    }

    #[test]
    fn test_return_with_empty_stack_fails() {
        let mut interpreter = load(&[0x00, 0xEE]);
        assert!(matches!(interpreter.step(), Err(Error::StackUnderflow)));
        assert_eq!(interpreter.pc(), 0x200);
    }

    #[test]
    fn test_3xnn_skips() {
        let interpreter = run(&[0x60, 0x01, 0x30, 0x01], 2);
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_3xnn_doesnt_skip() {
        let interpreter = run(&[0x60, 0x01, 0x30, 0x02], 2);
        assert_eq!(interpreter.pc(), 0x204);
    }

    #[test]
    fn test_4xnn_skips() {
        let interpreter = run(&[0x60, 0x01, 0x40, 0x02], 2);
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_4xnn_doesnt_skip() {
        let interpreter = run(&[0x60, 0x01, 0x40, 0x01], 2);
        assert_eq!(interpreter.pc(), 0x204);
    }

    #[test]
    fn test_5xy0_skips() {
        let interpreter = run(&[0x60, 0x11, 0x61, 0x11, 0x50, 0x10], 3);
        assert_eq!(interpreter.pc(), 0x208);
    }

    #[test]
    fn test_9xy0_skips() {
        let interpreter = run(&[0x60, 0x11, 0x90, 0x10], 2);
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_9xy0_doesnt_skip() {
        let interpreter = run(&[0x90, 0x10], 1);
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_7xnn_wraps_without_touching_flag() {
        // VF = 0x05; V0 = 0xFF; V0 += 1
        let interpreter = run(&[0x6F, 0x05, 0x60, 0xFF, 0x70, 0x01], 3);
        assert_eq!(v(&interpreter, 0x0), 0x00);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0x05);
    }

    #[test]
    fn test_7x00_is_identity() {
        for value in 0..=255u8 {
            let interpreter = run(&[0x63, value, 0x73, 0x00], 2);
            assert_eq!(v(&interpreter, 0x3), value);
        }
    }

    #[test]
    fn test_8xy4_carry() {
        let interpreter = run(&[0x60, 0xFF, 0x61, 0x01, 0x80, 0x14], 3);
        assert_eq!(v(&interpreter, 0x0), 0x00);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 1);

        let interpreter = run(&[0x60, 0x01, 0x61, 0x01, 0x80, 0x14], 3);
        assert_eq!(v(&interpreter, 0x0), 0x02);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);
    }

    #[test]
    fn test_8xy5_borrow() {
        let interpreter = run(&[0x60, 0x02, 0x61, 0x03, 0x80, 0x15], 3);
        assert_eq!(v(&interpreter, 0x0), 0xFF);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);

        let interpreter = run(&[0x60, 0x03, 0x61, 0x02, 0x80, 0x15], 3);
        assert_eq!(v(&interpreter, 0x0), 0x01);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 1);
    }

    #[test]
    fn test_8xy7_borrow() {
        let interpreter = run(&[0x60, 0x03, 0x61, 0x02, 0x80, 0x17], 3);
        assert_eq!(v(&interpreter, 0x0), 0xFF);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);
    }

    #[test]
    fn test_shifts_use_pre_shift_bit() {
        // V0 = 0x81; SHR V0 -> 0x40, VF = 1
        let interpreter = run(&[0x60, 0x81, 0x80, 0x06], 2);
        assert_eq!(v(&interpreter, 0x0), 0x40);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 1);

        // V0 = 0x81; SHL V0 -> 0x02, VF = 1
        let interpreter = run(&[0x60, 0x81, 0x80, 0x0E], 2);
        assert_eq!(v(&interpreter, 0x0), 0x02);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 1);

        // V0 = 0x7E; SHL V0 -> 0xFC, VF = 0
        let interpreter = run(&[0x60, 0x7E, 0x80, 0x0E], 2);
        assert_eq!(v(&interpreter, 0x0), 0xFC);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);
    }

    #[test]
    fn test_alu_on_vf_keeps_result() {
        // VF = 0xFF; V1 = 0x01; ADD VF, V1 -> VF holds the sum, not the carry
        let interpreter = run(&[0x6F, 0xFF, 0x61, 0x01, 0x8F, 0x14], 3);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0x00);
    }

    #[test]
    fn test_8xy3_xor() {
        let interpreter = run(&[0x61, 0x06, 0x62, 0x03, 0x81, 0x23], 3);
        assert_eq!(v(&interpreter, 0x1), 0x05);
    }

    #[test]
    fn test_bnnn_jumps_with_offset() {
        let interpreter = run(&[0x60, 0x02, 0xB3, 0x00], 2);
        assert_eq!(interpreter.pc(), 0x302);
    }

    #[test]
    fn test_cxnn_masks_random_byte() {
        let interpreter = run(&[0xC3, 0x0F], 1);
        let expected = StdRng::seed_from_u64(SEED).gen::<u8>() & 0x0F;
        assert_eq!(v(&interpreter, 0x3), expected);

        let interpreter = run(&[0x63, 0xFF, 0xC3, 0x00], 2);
        assert_eq!(v(&interpreter, 0x3), 0);
    }

    #[test]
    fn test_cxnn_is_reproducible_with_a_seed() {
        let program = [0xC0, 0xFF, 0xC1, 0xFF, 0xC2, 0xFF];
        let first = run(&program, 3);
        let second = run(&program, 3);
        assert_eq!(first.registers(), second.registers());
    }

    #[test]
    fn test_dxyn_draws_font_glyph() {
        // V0 = 1; I = 0 (glyph 0); DRW V0, V0, 5
        let mut interpreter = run(&[0x60, 0x01, 0xA0, 0x00, 0xD0, 0x05], 3);
        let frame = interpreter.take_frame().unwrap();
        assert_eq!(frame[1][1..5], [1, 1, 1, 1]);
        assert_eq!(frame[2][1..5], [1, 0, 0, 1]);
        assert_eq!(frame[3][1..5], [1, 0, 0, 1]);
        assert_eq!(frame[4][1..5], [1, 0, 0, 1]);
        assert_eq!(frame[5][1..5], [1, 1, 1, 1]);
        assert_eq!(frame[1][5], 0);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);
    }

    #[test]
    fn test_dxyn_twice_collides_and_restores() {
        let mut interpreter = run(&[0xD0, 0x05, 0xD0, 0x05], 1);
        assert_eq!(v(&interpreter, FLAG_REGISTER), 0);
        interpreter.step().unwrap();
        assert_eq!(v(&interpreter, FLAG_REGISTER), 1);
        let frame = interpreter.take_frame().unwrap();
        assert!(frame.iter().flatten().all(|&pixel| pixel == 0));
    }

    #[test]
    fn test_dxyn_wraps_at_right_edge() {
        // V0 = 63; I = 0x208; DRW V0, V1, 1; sprite 0xFF at 0x208
        let interpreter = run(&[0x60, 0x3F, 0xA2, 0x08, 0xD0, 0x11, 0x00, 0x00, 0xFF], 3);
        let display = interpreter.display();
        assert_eq!(display.pixel(63, 0), 1);
        for x in 0..7 {
            assert_eq!(display.pixel(x, 0), 1);
        }
        assert_eq!(display.pixel(7, 0), 0);
    }

    #[test]
    fn test_dxyn_clips_when_configured() {
        let mut interpreter = Interpreter::with_config(Config {
            sprite_mode: SpriteMode::Clip,
            ..config()
        });
        interpreter
            .load_program(&[0x60, 0x3F, 0xA2, 0x08, 0xD0, 0x11, 0x00, 0x00, 0xFF])
            .unwrap();
        for _ in 0..3 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.display().pixel(63, 0), 1);
        assert_eq!(interpreter.display().pixel(0, 0), 0);
    }

    #[test]
    fn test_dxyn_sprite_out_of_memory_fails() {
        // I = 0xFFE; DRW V0, V0, 5
        let mut interpreter = run(&[0xAF, 0xFE, 0xD0, 0x05], 1);
        assert!(matches!(
            interpreter.step(),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(interpreter.take_frame().is_none());
    }

    #[test]
    fn test_ex9e_skips_when_pressed() {
        let mut interpreter = load(&[0x61, 0x0E, 0xE1, 0x9E]);
        interpreter.keypad().press(0xE);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_ex9e_doesnt_skip() {
        let interpreter = run(&[0x61, 0x0E, 0xE1, 0x9E], 2);
        assert_eq!(interpreter.pc(), 0x204);
    }

    #[test]
    fn test_exa1_skips_when_not_pressed() {
        let interpreter = run(&[0x61, 0x0E, 0xE1, 0xA1], 2);
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_exa1_doesnt_skip() {
        let mut interpreter = load(&[0x61, 0x0E, 0xE1, 0xA1]);
        interpreter.keypad().press(0xE);
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x204);
    }

    #[test]
    fn test_key_pressed_from_another_thread() {
        let mut interpreter = load(&[0x61, 0x0E, 0xE1, 0x9E]);
        let keypad = interpreter.keypad();
        thread::spawn(move || keypad.press(0xE)).join().unwrap();
        interpreter.step().unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.pc(), 0x206);
    }

    #[test]
    fn test_fx0a_waits_for_key() {
        let mut interpreter = load(&[0xF1, 0x0A]);
        for _ in 0..5 {
            interpreter.step().unwrap();
            assert_eq!(interpreter.pc(), 0x200);
        }
        interpreter.keypad().press(0xB);
        interpreter.step().unwrap();
        assert_eq!(v(&interpreter, 0x1), 0xB);
        assert_eq!(interpreter.pc(), 0x202);
    }

    #[test]
    fn test_timers_are_set_and_read() {
        // V1 = 0x0F; DT = V1; ST = V1; V2 = DT
        let mut interpreter = run(&[0x61, 0x0F, 0xF1, 0x15, 0xF1, 0x18, 0xF2, 0x07], 4);
        assert_eq!(interpreter.timers().delay(), 0x0F);
        assert_eq!(interpreter.timers().sound(), 0x0F);
        assert_eq!(v(&interpreter, 0x2), 0x0F);

        interpreter.tick_timers();
        assert_eq!(interpreter.timers().delay(), 0x0E);
        assert_eq!(interpreter.timers().sound(), 0x0E);
    }

    #[test]
    fn test_steps_dont_tick_timers() {
        // V1 = 0x0F; DT = V1; then a run of loads
        let interpreter = run(&[0x61, 0x0F, 0xF1, 0x15, 0x60, 0x00, 0x60, 0x00], 4);
        assert_eq!(interpreter.timers().delay(), 0x0F);
    }

    #[test]
    fn test_fx1e_adds_to_index() {
        let interpreter = run(&[0xA0, 0x01, 0x61, 0x01, 0xF1, 0x1E], 3);
        assert_eq!(interpreter.registers().index(), 0x2);
    }

    #[test]
    fn test_fx29_points_at_glyph() {
        let interpreter = run(&[0x61, 0x02, 0xF1, 0x29], 2);
        assert_eq!(interpreter.registers().index(), 0xA);
    }

    #[test]
    fn test_fx33_stores_bcd() {
        // V1 = 123; I = 0x300; LD B, V1
        let interpreter = run(&[0x61, 0x7B, 0xA3, 0x00, 0xF1, 0x33], 3);
        assert_eq!(interpreter.memory().read_range(0x300, 3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_fx55_and_fx65_round_trip_registers() {
        // V0..V2 = 1, 2, 3; I = 0x300; LD [I], V2; V0..V2 = 0; LD V2, [I]
        let program = [
            0x60, 0x01, 0x61, 0x02, 0x62, 0x03, 0xA3, 0x00, 0xF2, 0x55, 0x60, 0x00, 0x61, 0x00,
            0x62, 0x00, 0xF2, 0x65,
        ];
        let mut interpreter = run(&program, 5);
        assert_eq!(interpreter.memory().read_range(0x300, 4).unwrap(), &[1, 2, 3, 0]);
        assert_eq!(interpreter.registers().index(), 0x300);
        for _ in 0..4 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.registers().range(3).unwrap(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_fx55_out_of_memory_fails() {
        let mut interpreter = run(&[0xAF, 0xFE, 0xF3, 0x55], 1);
        assert!(matches!(
            interpreter.step(),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_unknown_opcode_is_skipped() {
        let interpreter = run(&[0xFF, 0xFF, 0x80, 0x08, 0x60, 0x01], 3);
        assert_eq!(interpreter.pc(), 0x206);
        assert_eq!(v(&interpreter, 0x0), 1);
    }

    #[test]
    fn test_fetch_past_end_of_memory_fails() {
        let mut interpreter = load(&[0x1F, 0xFF]);
        interpreter.step().unwrap();
        assert!(matches!(
            interpreter.step(),
            Err(Error::OutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_rewind_restores_previous_state() {
        let mut interpreter = run(&[0x60, 0x01, 0x70, 0x01], 2);
        assert_eq!(interpreter.saved_states(), 2);
        assert!(interpreter.rewind());
        assert_eq!(interpreter.pc(), 0x202);
        assert_eq!(v(&interpreter, 0x0), 1);
        assert!(interpreter.rewind());
        assert_eq!(interpreter.pc(), 0x200);
        assert_eq!(v(&interpreter, 0x0), 0);
        assert!(!interpreter.rewind());
    }

    #[test]
    fn test_rewind_requests_redraw() {
        let mut interpreter = run(&[0xD0, 0x05, 0x60, 0x01], 2);
        interpreter.take_frame();
        interpreter.rewind();
        assert!(interpreter.take_frame().is_some());
    }

    #[test]
    fn test_history_drops_oldest_states() {
        let mut interpreter = Interpreter::with_config(Config {
            history_depth: 3,
            ..config()
        });
        interpreter.load_program(&[[0x60u8, 0x00]; 5].concat()).unwrap();
        for _ in 0..5 {
            interpreter.step().unwrap();
        }
        assert_eq!(interpreter.saved_states(), 3);
        for expected in [0x208u16, 0x206, 0x204].iter() {
            assert!(interpreter.rewind());
            assert_eq!(interpreter.pc(), *expected);
        }
        assert!(!interpreter.rewind());
    }

    #[test]
    fn test_history_can_be_disabled() {
        let mut interpreter = Interpreter::with_config(Config {
            history_depth: 0,
            ..config()
        });
        interpreter.load_program(&[0x60, 0x01]).unwrap();
        interpreter.step().unwrap();
        assert_eq!(interpreter.saved_states(), 0);
        assert!(!interpreter.rewind());
    }

    #[test]
    fn test_failed_step_saves_no_state() {
        let mut interpreter = load(&[0x00, 0xEE]);
        assert!(interpreter.step().is_err());
        assert_eq!(interpreter.saved_states(), 0);
    }
}

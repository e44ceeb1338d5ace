/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

mod alu;
mod flags;
mod memory;
mod registers;
mod stack;

use std::fmt;

use log::{debug, error, trace, warn};

use crate::config::{CpuConfig, UndocumentedOpcodes};
use crate::error::{Error, Result};
use crate::opcode::OpCode::*;
use crate::opcode::{Instruction, Location, Reg16};
pub use self::flags::{parity, Flags};
pub use self::memory::{Memory, MEMORY_SIZE};
pub use self::registers::Registers;

/// Structure containing the processor state (flags, registers and memory) and logic.
///
/// The processor is either ready to run the instruction at PC, or stopped after a `HLT` or an
/// unimplemented opcode. Once stopped, every call to [`step`](#method.step) returns the same
/// error until [`reset`](#method.reset) is called.
pub struct Proc8080 {
    flags: Flags,
    registers: Registers,
    memory: Memory,
    cycles: u64,
    interrupt_enabled: bool,
    stopped: Option<Error>,
    config: CpuConfig,
}

impl Proc8080 {
    /// Builds a processor with zeroed registers and flags and zero-filled memory.
    pub fn new() -> Proc8080 {
        Proc8080::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Proc8080 {
        Proc8080 {
            flags: Default::default(),
            registers: power_on_registers(&config),
            memory: Memory::new(),
            cycles: 0,
            interrupt_enabled: false,
            stopped: None,
            config,
        }
    }

    /// Restores the power-on registers and flags and leaves the processor ready to run.
    /// Memory is kept.
    pub fn reset(&mut self) {
        self.flags = Default::default();
        self.registers = power_on_registers(&self.config);
        self.cycles = 0;
        self.interrupt_enabled = false;
        self.stopped = None;
    }

    /// Copies a binary image into memory at `offset`.
    pub fn load(&mut self, offset: u16, image: &[u8]) -> Result<()> {
        self.memory.load(offset, image)
    }

    /// Borrows the processor flags immutably.
    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut Flags {
        &mut self.flags
    }

    /// Borrows the processor registers immutably.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Borrows the memory immutably.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn interrupts_enabled(&self) -> bool {
        self.interrupt_enabled
    }

    pub fn is_halted(&self) -> bool {
        self.stopped.is_some()
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Cycles elapsed since the processor was created or reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Decodes the instruction at PC without executing it.
    ///
    /// This lets the host intercept an instruction between two steps, e.g. to service `IN`
    /// and `OUT` or to stand in for code missing from the ROM.
    pub fn peek(&self) -> Instruction {
        self.fetch(self.registers.pc)
    }

    /// Runs the instruction at PC and returns the number of cycles it took.
    ///
    /// # Errors
    /// `Halted` when the instruction is a `HLT` and `UnimplementedOpcode` when the opcode has no
    /// behaviour under the current configuration. Both are terminal.
    pub fn step(&mut self) -> Result<u32> {
        if let Some(ref stop) = self.stopped {
            return Err(stop.clone());
        }

        let pc = self.registers.pc;
        let instruction = self.fetch(pc);
        if !instruction.entry.documented {
            match self.config.undocumented {
                UndocumentedOpcodes::Trap => return Err(self.trap(instruction.opcode, pc)),
                UndocumentedOpcodes::Alias => warn!(
                    "undocumented opcode 0x{:02x} at 0x{:04x} run as {:?}",
                    instruction.opcode,
                    pc,
                    instruction.op()
                ),
            }
        }

        trace!("{:04x}  {:02x}  {:?}", pc, instruction.opcode, instruction.op());
        self.registers.pc = pc.wrapping_add(instruction.size());
        let taken = self.apply_op(&instruction);
        let cycles = u32::from(if taken {
            instruction.entry.cycles_taken
        } else {
            instruction.entry.cycles
        });
        self.cycles += cycles as u64;

        match self.stopped {
            Some(ref stop) => Err(stop.clone()),
            None => Ok(cycles),
        }
    }

    fn fetch(&self, pc: u16) -> Instruction {
        Instruction::decode([
            self.memory.read_byte(pc),
            self.memory.read_byte(pc.wrapping_add(1)),
            self.memory.read_byte(pc.wrapping_add(2)),
        ])
    }

    fn trap(&mut self, opcode: u8, pc: u16) -> Error {
        let registers = &self.registers;
        error!(
            "unimplemented opcode 0x{opcode:02x} at 0x{pc:04x} (SP=0x{sp:04x} A=0x{a:02x} BC=0x{bc:04x} DE=0x{de:04x} HL=0x{hl:04x})",
            opcode = opcode,
            pc = pc,
            sp = registers.sp,
            a = registers.a,
            bc = registers.reg_16_val(Reg16::B),
            de = registers.reg_16_val(Reg16::D),
            hl = registers.hl(),
        );
        let trap = Error::UnimplementedOpcode { opcode, pc };
        self.stopped = Some(trap.clone());
        trap
    }

    /// Applies `instruction` with PC already past it. Returns `true` when a conditional call or
    /// return was taken.
    fn apply_op(&mut self, instruction: &Instruction) -> bool {
        match instruction.op() {
            Nop => (),

            // Data transfer
            Mov(dst, src) => {
                let value = self.load_location(src);
                self.store_location(dst, value);
            }
            Mvi(dst) => self.store_location(dst, instruction.byte()),
            Lxi(reg) => self.registers.set_reg_16_val(reg, instruction.word()),
            Lda => self.registers.a = self.memory.read_byte(instruction.word()),
            Sta => self.memory.write_byte(instruction.word(), self.registers.a),
            Lhld => {
                let value = self.memory.read_word(instruction.word());
                self.registers.set_reg_16_val(Reg16::H, value);
            }
            Shld => self.memory.write_word(instruction.word(), self.registers.hl()),
            Ldax(reg) => {
                let addr = self.registers.reg_16_val(reg);
                self.registers.a = self.memory.read_byte(addr);
            }
            Stax(reg) => {
                let addr = self.registers.reg_16_val(reg);
                self.memory.write_byte(addr, self.registers.a);
            }
            Xchg => self.xchg(),

            // Arithmetic and logic
            Alu(op, src) => {
                let value = self.load_location(src);
                self.apply_alu(op, value);
            }
            AluImmediate(op) => self.apply_alu(op, instruction.byte()),
            Inr(location) => self.increment(location),
            Dcr(location) => self.decrement(location),
            Inx(reg) => self.registers.increment_pair(reg),
            Dcx(reg) => self.registers.decrement_pair(reg),
            Dad(reg) => self.add_register_pair_to_h(reg),
            Daa => self.decimal_adjust_accumulator(),
            Rlc => self.rotate_left(),
            Rrc => self.rotate_right(),
            Ral => self.rotate_left_through_carry(),
            Rar => self.rotate_right_through_carry(),
            Cma => self.registers.a = !self.registers.a,
            Cmc => self.flags.cy = !self.flags.cy,
            Stc => self.flags.cy = true,

            // Branch
            Jmp => self.registers.pc = instruction.word(),
            JmpIf(condition) => {
                if self.condition(condition) {
                    self.registers.pc = instruction.word();
                }
            }
            Call => self.apply_call(instruction.word()),
            CallIf(condition) => return self.call_if(condition, instruction.word()),
            Ret => self.apply_return(),
            RetIf(condition) => return self.return_if(condition),
            Rst(value) => self.apply_call(value as u16 * 8),
            Pchl => self.registers.pc = self.registers.hl(),

            // Stack, I/O and machine control
            Push(reg) => {
                let value = self.registers.reg_16_val(reg);
                self.push_stack(value);
            }
            PushPsw => self.push_processor_status_word(),
            Pop(reg) => {
                let value = self.pop_stack();
                self.registers.set_reg_16_val(reg, value);
            }
            PopPsw => self.pop_processor_status_word(),
            Xthl => self.xthl(),
            Sphl => self.registers.sp = self.registers.hl(),
            // Port traffic belongs to the host, see `peek`.
            In | Out => (),
            Ei => {
                debug!("interrupts enabled at 0x{:04x}", self.registers.pc);
                self.interrupt_enabled = true;
            }
            Di => {
                debug!("interrupts disabled at 0x{:04x}", self.registers.pc);
                self.interrupt_enabled = false;
            }
            Hlt => {
                debug!("halted at 0x{:04x}", self.registers.pc);
                self.stopped = Some(Error::Halted { pc: self.registers.pc });
            }
        }
        false
    }

    fn load_location(&self, location: Location) -> u8 {
        match location {
            Location::Reg(reg) => self.registers.reg_val(reg),
            Location::M => self.memory.read_byte(self.registers.hl()),
        }
    }

    fn store_location(&mut self, location: Location, value: u8) {
        match location {
            Location::Reg(reg) => self.registers.set_reg_val(reg, value),
            Location::M => self.memory.write_byte(self.registers.hl(), value),
        }
    }

    fn xchg(&mut self) {
        let d = self.registers.reg_16_val(Reg16::D);
        let h = self.registers.hl();

        self.registers.set_reg_16_val(Reg16::D, h);
        self.registers.set_reg_16_val(Reg16::H, d);
    }
}

fn power_on_registers(config: &CpuConfig) -> Registers {
    Registers {
        pc: config.entry_point,
        sp: config.stack_pointer,
        ..Default::default()
    }
}

impl Default for Proc8080 {
    fn default() -> Proc8080 {
        Proc8080::new()
    }
}

impl fmt::Debug for Proc8080 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Proc8080")
            .field("flags", &self.flags)
            .field("registers", &format_args!("{:x?}", self.registers))
            .field("interrupt_enabled", &self.interrupt_enabled)
            .field("stopped", &self.stopped)
            .finish()
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Stack and control transfer. The stack grows down: a push writes the high byte at `SP-1`
//! and the low byte at `SP-2`, a pop reads them back from `SP` and `SP+1`.

use super::{Flags, Proc8080};
use crate::opcode::{Condition, Reg16};

impl Proc8080 {
    pub(super) fn push_stack(&mut self, value: u16) {
        let sp = self.registers.sp;
        self.memory.write_byte(sp.wrapping_sub(1), (value >> 8) as u8);
        self.memory.write_byte(sp.wrapping_sub(2), value as u8);
        self.registers.sp = sp.wrapping_sub(2);
    }

    pub(super) fn pop_stack(&mut self) -> u16 {
        let sp = self.registers.sp;
        let value = self.memory.read_word(sp);
        self.registers.sp = sp.wrapping_add(2);
        value
    }

    pub(super) fn condition(&self, condition: Condition) -> bool {
        match condition {
            Condition::NotZero => !self.flags.z,
            Condition::Zero => self.flags.z,
            Condition::NoCarry => !self.flags.cy,
            Condition::Carry => self.flags.cy,
            Condition::ParityOdd => !self.flags.p,
            Condition::ParityEven => self.flags.p,
            Condition::Plus => !self.flags.s,
            Condition::Minus => self.flags.s,
        }
    }

    /// Pushes the address of the next instruction (PC is already past the call) and jumps.
    pub(super) fn apply_call(&mut self, addr: u16) {
        let pc = self.registers.pc;
        self.push_stack(pc);
        self.registers.pc = addr;
    }

    pub(super) fn call_if(&mut self, condition: Condition, addr: u16) -> bool {
        let taken = self.condition(condition);
        if taken {
            self.apply_call(addr);
        }
        taken
    }

    pub(super) fn apply_return(&mut self) {
        self.registers.pc = self.pop_stack();
    }

    pub(super) fn return_if(&mut self, condition: Condition) -> bool {
        let taken = self.condition(condition);
        if taken {
            self.apply_return();
        }
        taken
    }

    pub(super) fn push_processor_status_word(&mut self) {
        let value = ((self.registers.a as u16) << 8) | self.flags.to_psw() as u16;
        self.push_stack(value);
    }

    pub(super) fn pop_processor_status_word(&mut self) {
        let value = self.pop_stack();
        self.registers.a = (value >> 8) as u8;
        self.flags = Flags::from_psw(value as u8);
    }

    pub(super) fn xthl(&mut self) {
        let sp = self.registers.sp;
        let hl = self.registers.hl();
        let top = self.memory.read_word(sp);
        self.memory.write_word(sp, hl);
        self.registers.set_reg_16_val(Reg16::H, top);
    }
}

#[cfg(test)]
mod tests {
    use crate::proc_state::Proc8080;

    #[test]
    fn push_then_pop_round_trips() {
        for &value in [0x0000u16, 0x00ff, 0x1234, 0xff00, 0xffff].iter() {
            for &sp in [0x2400u16, 0x0002, 0x0000, 0xfffe].iter() {
                let mut proc8080 = Proc8080::new();
                proc8080.registers.sp = sp;
                proc8080.push_stack(value);
                assert_eq!(proc8080.registers.sp, sp.wrapping_sub(2));
                assert_eq!(proc8080.pop_stack(), value);
                assert_eq!(proc8080.registers.sp, sp);
            }
        }
    }

    #[test]
    fn push_writes_high_byte_first_below_sp() {
        let mut proc8080 = Proc8080::new();
        proc8080.registers.sp = 0x2400;
        proc8080.push_stack(0xabcd);
        assert_eq!(proc8080.memory.read_byte(0x23ff), 0xab);
        assert_eq!(proc8080.memory.read_byte(0x23fe), 0xcd);
    }

    #[test]
    fn push_wraps_below_zero() {
        let mut proc8080 = Proc8080::new();
        proc8080.push_stack(0xabcd);
        assert_eq!(proc8080.registers.sp, 0xfffe);
        assert_eq!(proc8080.memory.read_byte(0xffff), 0xab);
        assert_eq!(proc8080.memory.read_byte(0xfffe), 0xcd);
    }

    #[test]
    fn return_goes_after_the_call() {
        let mut proc8080 = Proc8080::new();
        proc8080.registers.sp = 0x2400;
        proc8080.registers.pc = 0x0103;
        proc8080.apply_call(0x0800);
        assert_eq!(proc8080.registers.pc, 0x0800);
        proc8080.apply_return();
        assert_eq!(proc8080.registers.pc, 0x0103);
        assert_eq!(proc8080.registers.sp, 0x2400);
    }
}

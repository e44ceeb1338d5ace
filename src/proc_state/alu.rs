/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use super::Proc8080;
use crate::opcode::{AluOp, Location, Reg16};

impl Proc8080 {
    pub(super) fn apply_alu(&mut self, op: AluOp, value: u8) {
        let a = self.registers.a;
        match op {
            AluOp::Add => self.add_to_accumulator(value, false),
            AluOp::Adc => self.add_to_accumulator(value, self.flags.cy),
            AluOp::Sub => self.registers.a = self.subtract(value, false),
            AluOp::Sbb => self.registers.a = self.subtract(value, self.flags.cy),
            AluOp::Ana => self.apply_logic(a & value),
            AluOp::Xra => self.apply_logic(a ^ value),
            AluOp::Ora => self.apply_logic(a | value),
            AluOp::Cmp => {
                self.subtract(value, false);
            }
        }
    }

    fn add_to_accumulator(&mut self, value: u8, carry: bool) {
        let a = self.registers.a;
        let carry = carry as u16;
        let result = a as u16 + value as u16 + carry;

        self.flags.ac = (a & 0x0f) as u16 + (value & 0x0f) as u16 + carry > 0x0f;
        self.flags.apply_arithmetic(result);
        self.registers.a = result as u8;
    }

    /// Computes `A - value - borrow` and sets the flags; the caller decides whether to keep the
    /// result. The adder works on `A + !value + !borrow`, so AC is the carry out of its bit 3.
    fn subtract(&mut self, value: u8, borrow: bool) -> u8 {
        let a = self.registers.a;
        let borrow = borrow as u16;
        let result = (a as u16).wrapping_sub(value as u16 + borrow);

        self.flags.ac = (a & 0x0f) as u16 + (!value & 0x0f) as u16 + (1 - borrow) > 0x0f;
        self.flags.apply_arithmetic(result);
        result as u8
    }

    fn apply_logic(&mut self, result: u8) {
        self.registers.a = result;
        self.flags.apply_logic(result);
    }

    pub(super) fn increment(&mut self, location: Location) {
        let value = self.load_location(location);
        let result = value.wrapping_add(1);

        self.flags.ac = value & 0x0f == 0x0f;
        self.flags.apply_zsp(result);
        self.store_location(location, result);
    }

    pub(super) fn decrement(&mut self, location: Location) {
        let value = self.load_location(location);
        let result = value.wrapping_sub(1);

        self.flags.ac = value & 0x0f != 0;
        self.flags.apply_zsp(result);
        self.store_location(location, result);
    }

    pub(super) fn add_register_pair_to_h(&mut self, reg: Reg16) {
        let h = self.registers.hl() as u32;
        let value = self.registers.reg_16_val(reg) as u32;
        let result = h + value;

        self.registers.set_reg_16_val(Reg16::H, result as u16);
        self.flags.cy = result > 0xffff;
    }

    pub(super) fn decimal_adjust_accumulator(&mut self) {
        let a = self.registers.a;
        let low = a & 0x0f;
        let high = a >> 4;

        let mut correction = 0u8;
        let mut carry = self.flags.cy;
        if self.flags.ac || low > 9 {
            correction |= 0x06;
        }
        if self.flags.cy || high > 9 || (high >= 9 && low > 9) {
            correction |= 0x60;
            carry = true;
        }

        let result = a.wrapping_add(correction);
        self.flags.ac = low + (correction & 0x0f) > 0x0f;
        self.flags.apply_zsp(result);
        self.flags.cy = carry;
        self.registers.a = result;
    }

    pub(super) fn rotate_left(&mut self) {
        let a = self.registers.a;
        self.registers.a = a.rotate_left(1);
        self.flags.cy = a & 0x80 != 0;
    }

    pub(super) fn rotate_right(&mut self) {
        let a = self.registers.a;
        self.registers.a = a.rotate_right(1);
        self.flags.cy = a & 0x01 != 0;
    }

    pub(super) fn rotate_left_through_carry(&mut self) {
        let a = self.registers.a;
        self.registers.a = (a << 1) | self.flags.cy as u8;
        self.flags.cy = a & 0x80 != 0;
    }

    pub(super) fn rotate_right_through_carry(&mut self) {
        let a = self.registers.a;
        self.registers.a = (a >> 1) | ((self.flags.cy as u8) << 7);
        self.flags.cy = a & 0x01 != 0;
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::opcode::{Reg16, Register};

/// The register file. A pair's value is `high * 256 + low`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    pub fn reg_val(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::B => self.b,
            Register::C => self.c,
            Register::D => self.d,
            Register::E => self.e,
            Register::H => self.h,
            Register::L => self.l,
        }
    }

    pub fn set_reg_val(&mut self, reg: Register, value: u8) {
        match reg {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
        }
    }

    pub fn reg_16_val(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::B => join(self.b, self.c),
            Reg16::D => join(self.d, self.e),
            Reg16::H => join(self.h, self.l),
            Reg16::SP => self.sp,
        }
    }

    pub fn set_reg_16_val(&mut self, reg: Reg16, value: u16) {
        let (high, low) = ((value >> 8) as u8, value as u8);
        match reg {
            Reg16::B => {
                self.b = high;
                self.c = low;
            }
            Reg16::D => {
                self.d = high;
                self.e = low;
            }
            Reg16::H => {
                self.h = high;
                self.l = low;
            }
            Reg16::SP => self.sp = value,
        }
    }

    /// `INX`: bumps the low half, carrying into the high half only when the low half wraps.
    pub fn increment_pair(&mut self, reg: Reg16) {
        match reg {
            Reg16::B => increment_halves(&mut self.b, &mut self.c),
            Reg16::D => increment_halves(&mut self.d, &mut self.e),
            Reg16::H => increment_halves(&mut self.h, &mut self.l),
            Reg16::SP => self.sp = self.sp.wrapping_add(1),
        }
    }

    /// `DCX`: the mirror of [`increment_pair`](#method.increment_pair).
    pub fn decrement_pair(&mut self, reg: Reg16) {
        match reg {
            Reg16::B => decrement_halves(&mut self.b, &mut self.c),
            Reg16::D => decrement_halves(&mut self.d, &mut self.e),
            Reg16::H => decrement_halves(&mut self.h, &mut self.l),
            Reg16::SP => self.sp = self.sp.wrapping_sub(1),
        }
    }

    pub fn hl(&self) -> u16 {
        self.reg_16_val(Reg16::H)
    }
}

fn join(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

fn increment_halves(high: &mut u8, low: &mut u8) {
    *low = low.wrapping_add(1);
    if *low == 0 {
        *high = high.wrapping_add(1);
    }
}

fn decrement_halves(high: &mut u8, low: &mut u8) {
    if *low == 0 {
        *high = high.wrapping_sub(1);
    }
    *low = low.wrapping_sub(1);
}

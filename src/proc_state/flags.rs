/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// Flag byte of the processor status word. Bits 5 to 7 are always 0.
const ZERO: u8 = 1;
const SIGN: u8 = 1 << 1;
const PARITY: u8 = 1 << 2;
const CARRY: u8 = 1 << 3;
const AUX_CARRY: u8 = 1 << 4;

/// The condition codes of the 8080.
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Flags {
    pub z: bool,
    pub s: bool,
    /// Set when the result has an even number of bits set.
    pub p: bool,
    pub cy: bool,
    pub ac: bool,
}

/// Returns `true` if the low `bit_width` bits of `value` contain an even number of ones.
pub fn parity(value: u32, bit_width: u32) -> bool {
    let masked = if bit_width >= 32 { value } else { value & ((1 << bit_width) - 1) };
    masked.count_ones() % 2 == 0
}

impl Flags {
    /// Flags after AND/XOR/OR: Z, S and P from `result`, carries cleared.
    pub fn apply_logic(&mut self, result: u8) {
        self.cy = false;
        self.ac = false;
        self.apply_zsp(result);
    }

    /// Flags after an 8-bit add or subtract computed as a wider intermediate. Bits above the
    /// low byte only signal the carry (or borrow) out. AC is left to the caller.
    pub fn apply_arithmetic(&mut self, result: u16) {
        self.cy = result > 0xff;
        self.apply_zsp(result as u8);
    }

    /// Z, S and P only. This is the INR/DCR path: the carry is never touched.
    pub fn apply_zsp(&mut self, result: u8) {
        self.z = result == 0;
        self.s = result & 0x80 != 0;
        self.p = parity(result as u32, 8);
    }

    /// Packs the flags into the low byte of the processor status word.
    pub fn to_psw(&self) -> u8 {
        let mut psw = 0;
        if self.s {
            psw |= SIGN;
        }
        if self.z {
            psw |= ZERO;
        }
        if self.ac {
            psw |= AUX_CARRY;
        }
        if self.p {
            psw |= PARITY;
        }
        if self.cy {
            psw |= CARRY;
        }
        psw
    }

    /// Inverse of [`to_psw`](#method.to_psw). The fixed bits are ignored.
    pub fn from_psw(psw: u8) -> Flags {
        Flags {
            z: psw & ZERO != 0,
            s: psw & SIGN != 0,
            p: psw & PARITY != 0,
            cy: psw & CARRY != 0,
            ac: psw & AUX_CARRY != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parity, Flags};

    #[test]
    fn parity_counts_low_bits() {
        assert!(parity(0x03, 8));
        assert!(!parity(0x01, 8));
        assert!(parity(0xff, 8));
        assert!(parity(0x00, 8));
        // only the low byte is considered
        assert!(parity(0x1ff, 8));
        assert!(!parity(0x1ff, 9));
    }

    #[test]
    fn logic_flags_clear_carries() {
        let mut flags = Flags { cy: true, ac: true, ..Default::default() };

        flags.apply_logic(0x00);
        assert_eq!(flags, Flags { z: true, s: false, p: true, cy: false, ac: false });
    }

    #[test]
    fn logic_flags_sign_and_parity() {
        let mut flags: Flags = Default::default();

        flags.apply_logic(0x81);
        assert!(!flags.z);
        assert!(flags.s);
        assert!(flags.p);
    }

    #[test]
    fn arithmetic_flags_carry() {
        let mut flags: Flags = Default::default();

        flags.apply_arithmetic(0x0101);
        assert!(!flags.z);
        assert!(!flags.s);
        assert!(!flags.p);
        assert!(flags.cy);
    }

    #[test]
    fn arithmetic_flags_zero_on_overflow() {
        let mut flags: Flags = Default::default();

        flags.apply_arithmetic(0x0100);
        assert!(flags.z);
        assert!(flags.cy);
        assert!(flags.p);
    }

    #[test]
    fn doubling_carries_iff_high_bit_set() {
        for a in 0..=0xffu16 {
            let mut flags: Flags = Default::default();
            flags.apply_arithmetic(a + a);
            assert_eq!(flags.cy, a >= 0x80, "carry for 0x{:02x} + 0x{:02x}", a, a);
        }
    }

    #[test]
    fn zsp_leaves_carry_untouched() {
        let mut flags = Flags { cy: true, ac: true, ..Default::default() };

        flags.apply_zsp(0xff);
        assert!(flags.cy);
        assert!(flags.ac);
        assert!(flags.s);
        assert!(flags.p);
        assert!(!flags.z);
    }

    #[test]
    fn psw_layout() {
        let flags = Flags { cy: true, s: true, ac: true, ..Default::default() };
        assert_eq!(flags.to_psw(), 0b0001_1010);
        assert_eq!(Flags::default().to_psw(), 0);
        assert_eq!(Flags { z: true, ..Default::default() }.to_psw(), 0x01);
    }

    #[test]
    fn psw_unpack_reads_each_flag_from_its_own_bit() {
        assert_eq!(Flags::from_psw(0x01), Flags { z: true, ..Default::default() });
        assert_eq!(Flags::from_psw(0x02), Flags { s: true, ..Default::default() });
        assert_eq!(Flags::from_psw(0x04), Flags { p: true, ..Default::default() });
        assert_eq!(Flags::from_psw(0x08), Flags { cy: true, ..Default::default() });
        assert_eq!(Flags::from_psw(0x10), Flags { ac: true, ..Default::default() });
        assert_eq!(Flags::from_psw(0xe0), Flags::default());
    }

    #[test]
    fn psw_round_trip_for_all_flag_combinations() {
        for bits in 0..32u8 {
            let flags = Flags {
                z: bits & 1 != 0,
                s: bits & 2 != 0,
                p: bits & 4 != 0,
                cy: bits & 8 != 0,
                ac: bits & 16 != 0,
            };
            assert_eq!(Flags::from_psw(flags.to_psw()), flags);
        }
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Opcode decoding.
//!
//! Every byte value maps to exactly one [`Entry`](struct.Entry.html) of
//! [`OPCODE_TABLE`](static.OPCODE_TABLE.html). The table is computed at compile time from the
//! bit fields of the opcode, so adding or fixing an instruction means changing `decode` only.

mod opcodes;
pub use self::opcodes::{AluOp, Condition, Location, OpCode, Operand, Reg16, Register};

use self::opcodes::OpCode::*;

/// One row of the opcode table.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Entry {
    pub op: OpCode,
    /// `false` for the twelve opcodes the 8080 reference leaves undefined. Their `op` is the
    /// documented instruction the silicon decodes them to.
    pub documented: bool,
    /// Cycle count in T-states (the not-taken cost for conditional calls and returns).
    pub cycles: u8,
    /// Cycle count when a conditional call or return is taken.
    pub cycles_taken: u8,
}

impl Entry {
    const fn new(op: OpCode, cycles: u8) -> Entry {
        Entry { op, documented: true, cycles, cycles_taken: cycles }
    }

    const fn conditional(op: OpCode, cycles: u8, cycles_taken: u8) -> Entry {
        Entry { op, documented: true, cycles, cycles_taken }
    }

    const fn undocumented(op: OpCode, cycles: u8) -> Entry {
        Entry { op, documented: false, cycles, cycles_taken: cycles }
    }
}

/// The 256-entry opcode table, indexed by opcode byte.
pub static OPCODE_TABLE: [Entry; 256] = build_table();

/// Returns the table entry for `opcode`.
pub fn entry(opcode: u8) -> &'static Entry {
    &OPCODE_TABLE[opcode as usize]
}

const fn build_table() -> [Entry; 256] {
    let mut table = [Entry::new(Nop, 4); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
}

const fn pair(p: u8) -> Reg16 {
    match p & 0x03 {
        0 => Reg16::B,
        1 => Reg16::D,
        2 => Reg16::H,
        _ => Reg16::SP,
    }
}

const fn is_memory(location: Location) -> bool {
    matches!(location, Location::M)
}

// Opcodes are read as `xx yyy zzz`; `p` and `q` split `yyy` into `pp q`.
const fn decode(opcode: u8) -> Entry {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    match x {
        0 => decode_block0(y, z),
        1 => {
            if opcode == 0x76 {
                Entry::new(Hlt, 7)
            } else {
                let dst = Location::from_bits(y);
                let src = Location::from_bits(z);
                let cycles = if is_memory(dst) || is_memory(src) { 7 } else { 5 };
                Entry::new(Mov(dst, src), cycles)
            }
        }
        2 => {
            let src = Location::from_bits(z);
            let cycles = if is_memory(src) { 7 } else { 4 };
            Entry::new(Alu(AluOp::from_bits(y), src), cycles)
        }
        _ => decode_block3(y, z),
    }
}

const fn decode_block0(y: u8, z: u8) -> Entry {
    let p = y >> 1;
    let q = y & 0x01;
    match z {
        0 => {
            if y == 0 {
                Entry::new(Nop, 4)
            } else {
                Entry::undocumented(Nop, 4)
            }
        }
        1 => {
            if q == 0 {
                Entry::new(Lxi(pair(p)), 10)
            } else {
                Entry::new(Dad(pair(p)), 10)
            }
        }
        2 => match (p, q) {
            (0, 0) => Entry::new(Stax(Reg16::B), 7),
            (1, 0) => Entry::new(Stax(Reg16::D), 7),
            (2, 0) => Entry::new(Shld, 16),
            (3, 0) => Entry::new(Sta, 13),
            (0, _) => Entry::new(Ldax(Reg16::B), 7),
            (1, _) => Entry::new(Ldax(Reg16::D), 7),
            (2, _) => Entry::new(Lhld, 16),
            _ => Entry::new(Lda, 13),
        },
        3 => {
            if q == 0 {
                Entry::new(Inx(pair(p)), 5)
            } else {
                Entry::new(Dcx(pair(p)), 5)
            }
        }
        4 | 5 | 6 => {
            let location = Location::from_bits(y);
            let m = is_memory(location);
            match z {
                4 => Entry::new(Inr(location), if m { 10 } else { 5 }),
                5 => Entry::new(Dcr(location), if m { 10 } else { 5 }),
                _ => Entry::new(Mvi(location), if m { 10 } else { 7 }),
            }
        }
        _ => {
            let op = match y {
                0 => Rlc,
                1 => Rrc,
                2 => Ral,
                3 => Rar,
                4 => Daa,
                5 => Cma,
                6 => Stc,
                _ => Cmc,
            };
            Entry::new(op, 4)
        }
    }
}

const fn decode_block3(y: u8, z: u8) -> Entry {
    let p = y >> 1;
    let q = y & 0x01;
    match z {
        0 => Entry::conditional(RetIf(Condition::from_bits(y)), 5, 11),
        1 => match (q, p) {
            (0, 3) => Entry::new(PopPsw, 10),
            (0, _) => Entry::new(Pop(pair(p)), 10),
            (_, 0) => Entry::new(Ret, 10),
            (_, 1) => Entry::undocumented(Ret, 10),
            (_, 2) => Entry::new(Pchl, 5),
            _ => Entry::new(Sphl, 5),
        },
        2 => Entry::new(JmpIf(Condition::from_bits(y)), 10),
        3 => match y {
            0 => Entry::new(Jmp, 10),
            1 => Entry::undocumented(Jmp, 10),
            2 => Entry::new(Out, 10),
            3 => Entry::new(In, 10),
            4 => Entry::new(Xthl, 18),
            5 => Entry::new(Xchg, 4),
            6 => Entry::new(Di, 4),
            _ => Entry::new(Ei, 4),
        },
        4 => Entry::conditional(CallIf(Condition::from_bits(y)), 11, 17),
        5 => match (q, p) {
            (0, 3) => Entry::new(PushPsw, 11),
            (0, _) => Entry::new(Push(pair(p)), 11),
            (_, 0) => Entry::new(Call, 17),
            _ => Entry::undocumented(Call, 17),
        },
        6 => Entry::new(AluImmediate(AluOp::from_bits(y)), 7),
        _ => Entry::new(Rst(y), 11),
    }
}

/// A decoded instruction: the opcode byte, its table entry and its immediate data.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Instruction {
    pub opcode: u8,
    pub entry: Entry,
    /// Immediate operand, little-endian as it appears in memory. Zero when the opcode takes no
    /// operand; only the low byte is meaningful for one-byte operands.
    pub data: u16,
}

impl Instruction {
    /// Decodes the instruction whose opcode is `bytes[0]`. Operand bytes not used by the
    /// opcode are ignored.
    pub fn decode(bytes: [u8; 3]) -> Instruction {
        let entry = *entry(bytes[0]);
        let data = match entry.op.operand() {
            Operand::None => 0,
            Operand::Byte => bytes[1] as u16,
            Operand::Word => ((bytes[2] as u16) << 8) | bytes[1] as u16,
        };
        Instruction { opcode: bytes[0], entry, data }
    }

    pub fn op(&self) -> OpCode {
        self.entry.op
    }

    pub fn size(&self) -> u16 {
        self.entry.op.size()
    }

    /// The one-byte immediate operand.
    pub fn byte(&self) -> u8 {
        self.data as u8
    }

    /// The two-byte immediate operand or address.
    pub fn word(&self) -> u16 {
        self.data
    }
}

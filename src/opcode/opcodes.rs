/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::fmt::{self, Display, Formatter};

/// The seven 8-bit registers addressable by an instruction.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Display for Register {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Register pairs. `B`, `D` and `H` name the pairs BC, DE and HL by their high register.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Reg16 {
    B,
    D,
    H,
    SP,
}

impl Display for Reg16 {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An 8-bit operand: either a register or the memory byte addressed by HL (`M`).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Location {
    Reg(Register),
    M,
}

impl Location {
    /// Decodes the 3-bit register field used across the instruction set
    /// (`000`=B ... `101`=L, `110`=M, `111`=A).
    pub const fn from_bits(bits: u8) -> Location {
        match bits & 0x07 {
            0 => Location::Reg(Register::B),
            1 => Location::Reg(Register::C),
            2 => Location::Reg(Register::D),
            3 => Location::Reg(Register::E),
            4 => Location::Reg(Register::H),
            5 => Location::Reg(Register::L),
            6 => Location::M,
            _ => Location::Reg(Register::A),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Location::Reg(reg) => write!(f, "{}", reg),
            Location::M => write!(f, "M"),
        }
    }
}

/// Branch conditions, in opcode-field order.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub const fn from_bits(bits: u8) -> Condition {
        match bits & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }
}

/// The accumulator operations sharing the `10xxxsss` / `11xxx110` encodings.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    pub const fn from_bits(bits: u8) -> AluOp {
        match bits & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbb,
            4 => AluOp::Ana,
            5 => AluOp::Xra,
            6 => AluOp::Ora,
            _ => AluOp::Cmp,
        }
    }
}

/// What an opcode does, independently of the immediate data following it.
///
/// Immediate bytes and addresses are not part of this type: they are described by
/// [`OpCode::operand`](#method.operand) and fetched by the processor at execution time.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum OpCode {
    Nop,

    // Data transfer
    Mov(Location, Location),
    Mvi(Location),
    Lxi(Reg16),
    Lda,
    Sta,
    Lhld,
    Shld,
    Ldax(Reg16),
    Stax(Reg16),
    Xchg,

    // Arithmetic and logic
    Alu(AluOp, Location),
    AluImmediate(AluOp),
    Inr(Location),
    Dcr(Location),
    Inx(Reg16),
    Dcx(Reg16),
    Dad(Reg16),
    Daa,
    Rlc,
    Rrc,
    Ral,
    Rar,
    Cma,
    Cmc,
    Stc,

    // Branch
    Jmp,
    JmpIf(Condition),
    Call,
    CallIf(Condition),
    Ret,
    RetIf(Condition),
    Rst(u8),
    Pchl,

    // Stack, I/O and machine control
    Push(Reg16),
    PushPsw,
    Pop(Reg16),
    PopPsw,
    Xthl,
    Sphl,
    In,
    Out,
    Ei,
    Di,
    Hlt,
}

/// The operand-fetch pattern of an opcode.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Operand {
    None,
    Byte,
    Word,
}

impl Operand {
    /// Number of bytes following the opcode byte.
    pub const fn len(self) -> u16 {
        match self {
            Operand::None => 0,
            Operand::Byte => 1,
            Operand::Word => 2,
        }
    }
}

impl OpCode {
    pub const fn operand(&self) -> Operand {
        match *self {
            OpCode::Lxi(_)
            | OpCode::Lda
            | OpCode::Sta
            | OpCode::Lhld
            | OpCode::Shld
            | OpCode::Jmp
            | OpCode::JmpIf(_)
            | OpCode::Call
            | OpCode::CallIf(_) => Operand::Word,
            OpCode::Mvi(_) | OpCode::AluImmediate(_) | OpCode::In | OpCode::Out => Operand::Byte,
            _ => Operand::None,
        }
    }

    /// Instruction length in bytes, opcode included.
    pub const fn size(&self) -> u16 {
        1 + self.operand().len()
    }

    /// `true` if the instruction may modify a condition flag.
    pub const fn affects_flags(&self) -> bool {
        matches!(
            *self,
            OpCode::Alu(_, _)
                | OpCode::AluImmediate(_)
                | OpCode::Inr(_)
                | OpCode::Dcr(_)
                | OpCode::Dad(_)
                | OpCode::Daa
                | OpCode::Rlc
                | OpCode::Rrc
                | OpCode::Ral
                | OpCode::Rar
                | OpCode::Cmc
                | OpCode::Stc
                | OpCode::PopPsw
        )
    }
}

/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions which stop the processor or reject a request from the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The opcode at `pc` has no modelled behaviour. The processor stays trapped until reset.
    #[error("unimplemented opcode 0x{opcode:02x} at 0x{pc:04x}")]
    UnimplementedOpcode { opcode: u8, pc: u16 },

    /// A `HLT` was executed. `pc` is the address following the `HLT`.
    #[error("processor halted at 0x{pc:04x}")]
    Halted { pc: u16 },

    /// A memory image does not fit in the 64 KiB address space.
    #[error("image of {len} bytes at 0x{offset:04x} does not fit in memory")]
    AddressOutOfRange { offset: u16, len: usize },
}

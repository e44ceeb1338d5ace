/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use typed_builder::TypedBuilder;

/// What the processor does with the opcodes left undefined by the 8080 reference
/// (`0x08`, `0x10` ... `0x38`, `0xcb`, `0xd9`, `0xdd`, `0xed`, `0xfd`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndocumentedOpcodes {
    /// Stop with [`Error::UnimplementedOpcode`](../error/enum.Error.html).
    #[default]
    Trap,
    /// Run them as the documented instruction they alias (`NOP`, `JMP`, `RET` or `CALL`).
    Alias,
}

/// Power-on configuration of a [`Proc8080`](../proc_state/struct.Proc8080.html).
///
/// ```
/// use intel_8080_core::{CpuConfig, UndocumentedOpcodes};
///
/// let config = CpuConfig::builder()
///     .undocumented(UndocumentedOpcodes::Alias)
///     .entry_point(0x0100)
///     .build();
/// assert_eq!(config.stack_pointer, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct CpuConfig {
    #[builder(default)]
    pub undocumented: UndocumentedOpcodes,
    /// Initial program counter.
    #[builder(default = 0)]
    pub entry_point: u16,
    /// Initial stack pointer.
    #[builder(default = 0)]
    pub stack_pointer: u16,
}

impl Default for CpuConfig {
    fn default() -> CpuConfig {
        CpuConfig::builder().build()
    }
}

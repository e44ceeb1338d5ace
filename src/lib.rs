/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! # Intel 8080 core
//!
//! An instruction-level emulation of the Intel 8080: registers, condition flags, the 64 KiB
//! address space and the semantics of all 256 opcodes.
//!
//! The main struct is [`Proc8080`](proc_state/struct.Proc8080.html). The host loads an image,
//! then calls [`step`](proc_state/struct.Proc8080.html#method.step) in its own run loop. A step
//! returns the cycles consumed, or an error when the processor halts or meets an opcode it
//! cannot run. Peripherals (I/O ports, interrupts, video) stay on the host side: they can look
//! at the next instruction with [`peek`](proc_state/struct.Proc8080.html#method.peek) and
//! change the state between two steps.
//!
//! ```
//! use intel_8080_core::{Error, Proc8080};
//!
//! let mut cpu = Proc8080::new();
//! // MVI A,$41 ; INR A ; HLT
//! cpu.load(0x0000, &[0x3e, 0x41, 0x3c, 0x76]).unwrap();
//!
//! let mut cycles = 0;
//! loop {
//!     match cpu.step() {
//!         Ok(n) => cycles += n,
//!         Err(Error::Halted { .. }) => break,
//!         Err(e) => panic!("{}", e),
//!     }
//! }
//! assert_eq!(cpu.registers().a, 0x42);
//! assert_eq!(cycles, 12);
//! assert_eq!(cpu.cycles(), 19);
//! ```

pub mod config;
pub mod error;
pub mod opcode;
pub mod proc_state;

pub use config::{CpuConfig, UndocumentedOpcodes};
pub use error::{Error, Result};
pub use proc_state::Proc8080;

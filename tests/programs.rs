/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use anyhow::bail;
use intel_8080_core::opcode::{OpCode, Reg16};
use intel_8080_core::{CpuConfig, Error, Proc8080};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_until_halt(cpu: &mut Proc8080, max_steps: usize) -> anyhow::Result<u64> {
    for _ in 0..max_steps {
        match cpu.step() {
            Ok(_) => {}
            Err(Error::Halted { .. }) => return Ok(cpu.cycles()),
            Err(e) => return Err(e.into()),
        }
    }
    bail!("program did not halt after {} steps", max_steps)
}

#[test]
fn multiply_by_repeated_addition() -> anyhow::Result<()> {
    init_logger();
    let mut cpu = Proc8080::new();
    cpu.load(
        0x0000,
        &[
            0x3e, 0x00, // MVI A,$00
            0x06, 0x07, // MVI B,$07
            0x0e, 0x06, // MVI C,$06
            0x80, // loop: ADD B
            0x0d, // DCR C
            0xc2, 0x06, 0x00, // JNZ loop
            0x32, 0x00, 0x20, // STA $2000
            0x76, // HLT
        ],
    )?;

    let cycles = run_until_halt(&mut cpu, 100)?;

    assert_eq!(cpu.registers().a, 42);
    assert_eq!(cpu.memory().read_byte(0x2000), 42);
    assert_eq!(cpu.registers().pc, 0x000f);
    assert_eq!(cycles, 21 + 6 * (4 + 5 + 10) + 13 + 7);
    Ok(())
}

#[test]
fn block_copy() -> anyhow::Result<()> {
    init_logger();
    let mut cpu = Proc8080::new();
    cpu.load(0x0100, &[0xde, 0xad, 0xbe, 0xef])?;
    cpu.load(
        0x0000,
        &[
            0x21, 0x00, 0x01, // LXI H,$0100
            0x11, 0x00, 0x02, // LXI D,$0200
            0x06, 0x04, // MVI B,$04
            0x7e, // loop: MOV A,M
            0x12, // STAX D
            0x23, // INX H
            0x13, // INX D
            0x05, // DCR B
            0xc2, 0x08, 0x00, // JNZ loop
            0x76, // HLT
        ],
    )?;

    run_until_halt(&mut cpu, 100)?;

    assert_eq!(&cpu.memory().as_slice()[0x0200..0x0204], &[0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(cpu.registers().reg_16_val(Reg16::H), 0x0104);
    assert_eq!(cpu.registers().reg_16_val(Reg16::D), 0x0204);
    Ok(())
}

#[test]
fn subroutine_preserves_psw() -> anyhow::Result<()> {
    init_logger();
    let mut cpu = Proc8080::new();
    cpu.load(
        0x0000,
        &[
            0x31, 0x00, 0x24, // LXI SP,$2400
            0x3e, 0x80, // MVI A,$80
            0xb7, // ORA A
            0xcd, 0x20, 0x00, // CALL $0020
            0x76, // HLT
        ],
    )?;
    cpu.load(
        0x0020,
        &[
            0xf5, // PUSH PSW
            0xaf, // XRA A
            0x06, 0xaa, // MVI B,$aa
            0xf1, // POP PSW
            0xc9, // RET
        ],
    )?;

    run_until_halt(&mut cpu, 100)?;

    let flags = cpu.flags();
    assert_eq!(cpu.registers().a, 0x80);
    assert_eq!(cpu.registers().b, 0xaa);
    assert!(flags.s);
    assert!(!flags.z);
    assert!(!flags.p);
    assert!(!flags.cy);
    assert_eq!(cpu.registers().sp, 0x2400);
    assert_eq!(cpu.registers().pc, 0x000a);
    Ok(())
}

/// Runs a CP/M style program, standing in for the BDOS entry point at $0005 the way a host
/// would: the call is intercepted with `peek` and skipped.
#[test]
fn bdos_print_string_is_intercepted() -> anyhow::Result<()> {
    init_logger();
    let config = CpuConfig::builder().entry_point(0x0100).build();
    let mut cpu = Proc8080::with_config(config);
    cpu.load(
        0x0100,
        &[
            0x31, 0x00, 0x24, // LXI SP,$2400
            0x11, 0x10, 0x01, // LXI D,message
            0x0e, 0x09, // MVI C,$09
            0xcd, 0x05, 0x00, // CALL $0005
            0x76, // HLT
        ],
    )?;
    cpu.load(0x0110, b"CPU IS OPERATIONAL$")?;

    let mut output = String::new();
    for _ in 0..100 {
        let instruction = cpu.peek();
        if instruction.op() == OpCode::Call && instruction.word() == 0x0005 {
            if cpu.registers().c == 9 {
                let start = cpu.registers().reg_16_val(Reg16::D) as usize;
                let message: String = cpu.memory().as_slice()[start..]
                    .iter()
                    .take_while(|value| **value != b'$')
                    .map(|value| char::from(*value))
                    .collect();
                output.push_str(&message);
            }
            cpu.registers_mut().pc += instruction.size();
            continue;
        }
        match cpu.step() {
            Ok(_) => {}
            Err(Error::Halted { pc }) => {
                assert_eq!(pc, 0x010c);
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    assert_eq!(output, "CPU IS OPERATIONAL");
    assert!(cpu.is_halted());
    Ok(())
}

#[test]
fn runaway_program_traps_on_undocumented_opcode() -> anyhow::Result<()> {
    init_logger();
    let mut cpu = Proc8080::new();
    cpu.load(0x0000, &[0x00, 0x00, 0x10])?;

    let result = run_until_halt(&mut cpu, 10);

    let error = result.expect_err("the trap should stop the program");
    assert_eq!(
        error.downcast_ref::<Error>(),
        Some(&Error::UnimplementedOpcode { opcode: 0x10, pc: 0x0002 })
    );
    assert_eq!(cpu.registers().pc, 0x0002);
    assert_eq!(cpu.cycles(), 8);
    Ok(())
}

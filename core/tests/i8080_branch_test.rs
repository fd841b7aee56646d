use altair_core::cpu::I8080;
mod common;
use common::{TestBus, run};

// --- JMP ---

#[test]
fn test_jmp() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    run(&mut cpu, &mut bus, &[0xC3, 0x34, 0x12], 1);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn test_jz_taken_and_not_taken() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // XRA A; JZ 0100
    run(&mut cpu, &mut bus, &[0xAF, 0xCA, 0x00, 0x01], 2);
    assert_eq!(cpu.regs.pc, 0x0100);

    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI A,01; ORA A; JZ 0100 falls through past the operand
    run(&mut cpu, &mut bus, &[0x3E, 0x01, 0xB7, 0xCA, 0x00, 0x01], 3);
    assert_eq!(cpu.regs.pc, 0x0006);
}

#[test]
fn test_conditions() {
    // Flags after ORA A with A=80: S set, Z clear, P clear, C clear.
    let cases = [
        (0xC2, true),  // JNZ
        (0xCA, false), // JZ
        (0xD2, true),  // JNC
        (0xDA, false), // JC
        (0xE2, true),  // JPO
        (0xEA, false), // JPE
        (0xF2, false), // JP
        (0xFA, true),  // JM
    ];
    for (opcode, taken) in cases {
        let mut cpu = I8080::new();
        let mut bus = TestBus::new();
        // MVI A,80; ORA A; Jcc 0200
        run(&mut cpu, &mut bus, &[0x3E, 0x80, 0xB7, opcode, 0x00, 0x02], 3);
        let expected = if taken { 0x0200 } else { 0x0006 };
        assert_eq!(cpu.regs.pc, expected, "opcode {opcode:#04X}");
    }
}

// --- CALL / RET ---

#[test]
fn test_call_and_ret() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    bus.memory[0x0300] = 0xC9; // RET
    // LXI SP,1000; CALL 0300
    run(&mut cpu, &mut bus, &[0x31, 0x00, 0x10, 0xCD, 0x00, 0x03], 2);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(cpu.regs.sp, 0x0FFE);
    assert_eq!(bus.memory[0x0FFF], 0x00); // return address high
    assert_eq!(bus.memory[0x0FFE], 0x06); // return address low

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0006);
    assert_eq!(cpu.regs.sp, 0x1000);
}

#[test]
fn test_conditional_call_not_taken() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // LXI SP,1000; CC 0300 (carry clear)
    run(&mut cpu, &mut bus, &[0x31, 0x00, 0x10, 0xDC, 0x00, 0x03], 2);
    assert_eq!(cpu.regs.pc, 0x0006);
    assert_eq!(cpu.regs.sp, 0x1000);
}

#[test]
fn test_conditional_return() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    bus.memory[0x0300] = 0xD8; // RC (not taken)
    bus.memory[0x0301] = 0x37; // STC
    bus.memory[0x0302] = 0xD8; // RC (taken)
    // LXI SP,1000; CALL 0300
    run(&mut cpu, &mut bus, &[0x31, 0x00, 0x10, 0xCD, 0x00, 0x03], 2);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0301);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0006);
}

// --- RST / PCHL ---

#[test]
fn test_rst_vectors() {
    for n in 0..8u8 {
        let mut cpu = I8080::new();
        let mut bus = TestBus::new();
        let opcode = 0xC7 | (n << 3);
        // LXI SP,1000; JMP 0400; at 0400: RST n
        bus.memory[0x0400] = opcode;
        run(&mut cpu, &mut bus, &[0x31, 0x00, 0x10, 0xC3, 0x00, 0x04], 3);
        assert_eq!(cpu.regs.pc, (n as u16) * 8, "RST {n}");
        assert_eq!(bus.memory[0x0FFE], 0x01);
        assert_eq!(bus.memory[0x0FFF], 0x04);
    }
}

#[test]
fn test_pchl() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    run(&mut cpu, &mut bus, &[0x21, 0x00, 0xF0, 0xE9], 2);
    assert_eq!(cpu.regs.pc, 0xF000);
}

use altair_core::cpu::I8080;
mod common;
use common::{TestBus, run};

// --- MOV / MVI ---

#[test]
fn test_mvi_all_registers() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI B..L,A with distinct values
    let program = [
        0x06, 0x11, 0x0E, 0x22, 0x16, 0x33, 0x1E, 0x44, 0x26, 0x55, 0x2E, 0x66, 0x3E, 0x77,
    ];
    run(&mut cpu, &mut bus, &program, 7);
    assert_eq!(cpu.regs.bc.get(), 0x1122);
    assert_eq!(cpu.regs.de.get(), 0x3344);
    assert_eq!(cpu.regs.hl.get(), 0x5566);
    assert_eq!(cpu.regs.a(), 0x77);
    assert_eq!(cpu.regs.pc, 14);
    assert_eq!(cpu.regs.flags(), 0, "MVI must not touch flags");
}

#[test]
fn test_mov_register_to_register() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI C,5A; MOV D,C; MOV A,D
    run(&mut cpu, &mut bus, &[0x0E, 0x5A, 0x51, 0x7A], 3);
    assert_eq!(cpu.regs.de.high(), 0x5A);
    assert_eq!(cpu.regs.a(), 0x5A);
}

#[test]
fn test_mov_through_memory() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    bus.memory[0x4000] = 0xC3;
    // LXI H,4000; MOV E,M; MVI A,99; MOV M,A
    run(&mut cpu, &mut bus, &[0x21, 0x00, 0x40, 0x5E, 0x3E, 0x99, 0x77], 4);
    assert_eq!(cpu.regs.de.low(), 0xC3);
    assert_eq!(bus.memory[0x4000], 0x99);
}

#[test]
fn test_mvi_m() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // LXI H,1234; MVI M,AB
    run(&mut cpu, &mut bus, &[0x21, 0x34, 0x12, 0x36, 0xAB], 2);
    assert_eq!(bus.memory[0x1234], 0xAB);
}

// --- LXI / STAX / LDAX ---

#[test]
fn test_lxi_sp_little_endian() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    run(&mut cpu, &mut bus, &[0x31, 0xCD, 0xAB], 1);
    assert_eq!(cpu.regs.sp, 0xABCD);
}

#[test]
fn test_stax_ldax() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    bus.memory[0x0600] = 0x42;
    // LXI B,0500; LXI D,0600; MVI A,17; STAX B; LDAX D
    let program = [0x01, 0x00, 0x05, 0x11, 0x00, 0x06, 0x3E, 0x17, 0x02, 0x1A];
    run(&mut cpu, &mut bus, &program, 5);
    assert_eq!(bus.memory[0x0500], 0x17);
    assert_eq!(cpu.regs.a(), 0x42);
}

// --- Direct addressing ---

#[test]
fn test_sta_lda() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI A,5C; STA 2345; MVI A,00; LDA 2345
    let program = [0x3E, 0x5C, 0x32, 0x45, 0x23, 0x3E, 0x00, 0x3A, 0x45, 0x23];
    run(&mut cpu, &mut bus, &program, 4);
    assert_eq!(bus.memory[0x2345], 0x5C);
    assert_eq!(cpu.regs.a(), 0x5C);
}

#[test]
fn test_shld_lhld() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // LXI H,BEEF; SHLD 3000; LXI H,0000; LHLD 3000
    let program = [
        0x21, 0xEF, 0xBE, 0x22, 0x00, 0x30, 0x21, 0x00, 0x00, 0x2A, 0x00, 0x30,
    ];
    run(&mut cpu, &mut bus, &program, 2);
    assert_eq!(bus.memory[0x3000], 0xEF); // L
    assert_eq!(bus.memory[0x3001], 0xBE); // H

    run(&mut cpu, &mut bus, &program, 2);
    assert_eq!(cpu.regs.hl.get(), 0xBEEF);
}

#[test]
fn test_xchg() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // LXI D,1111; LXI H,2222; XCHG
    run(
        &mut cpu,
        &mut bus,
        &[0x11, 0x11, 0x11, 0x21, 0x22, 0x22, 0xEB],
        3,
    );
    assert_eq!(cpu.regs.de.get(), 0x2222);
    assert_eq!(cpu.regs.hl.get(), 0x1111);
}

#[test]
fn test_memory_access_drives_bus_lights() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI A,3C; STA 8000
    run(&mut cpu, &mut bus, &[0x3E, 0x3C, 0x32, 0x00, 0x80], 2);
    assert_eq!(cpu.address_bus, 0x8000);
    assert_eq!(cpu.data_bus, 0x3C);
}

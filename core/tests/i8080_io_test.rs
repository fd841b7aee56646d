use altair_core::cpu::I8080;
mod common;
use common::{TestBus, run};

#[test]
fn test_in_loads_accumulator() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    bus.ports[0xFF] = 0x3C;
    // IN FF
    run(&mut cpu, &mut bus, &[0xDB, 0xFF], 1);
    assert_eq!(cpu.regs.a(), 0x3C);
    assert_eq!(cpu.address_bus, 0xFFFF, "port echoed on both address bytes");
    assert_eq!(cpu.data_bus, 0x3C);
    assert_eq!(cpu.regs.flags(), 0);
}

#[test]
fn test_out_sends_accumulator() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // MVI A,41; OUT 11; MVI A,42; OUT 11
    run(&mut cpu, &mut bus, &[0x3E, 0x41, 0xD3, 0x11, 0x3E, 0x42, 0xD3, 0x11], 4);
    assert_eq!(bus.io_writes, vec![(0x11, 0x41), (0x11, 0x42)]);
    assert_eq!(cpu.address_bus, 0x1111);
    assert_eq!(cpu.data_bus, 0x42);
}

#[test]
fn test_polling_loop_waits_for_status() {
    let mut cpu = I8080::new();
    let mut bus = TestBus::new();
    // loop: IN 10; ANI 01; JZ loop; IN 11
    bus.load(0, &[0xDB, 0x10, 0xE6, 0x01, 0xCA, 0x00, 0x00, 0xDB, 0x11]);
    bus.ports[0x11] = b'Y';
    for _ in 0..9 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.pc, 0x0000, "still polling");

    bus.ports[0x10] = 0x01;
    for _ in 0..4 {
        cpu.step(&mut bus);
    }
    assert_eq!(cpu.regs.a(), b'Y');
    assert_eq!(cpu.regs.pc, 0x0009);
}

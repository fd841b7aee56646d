#![allow(dead_code)]

use altair_core::core::Bus;
use altair_core::cpu::{I8080, StepResult};

/// Minimal bus for testing: flat 64KB read/write memory plus a scripted
/// port space that records every OUT.
pub struct TestBus {
    pub memory: [u8; 0x10000],
    pub ports: [u8; 0x100],
    pub io_writes: Vec<(u8, u8)>,
}

impl TestBus {
    pub fn new() -> Self {
        Self {
            memory: [0; 0x10000],
            ports: [0; 0x100],
            io_writes: Vec::new(),
        }
    }

    pub fn load(&mut self, addr: u16, data: &[u8]) {
        let start = addr as usize;
        self.memory[start..start + data.len()].copy_from_slice(data);
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }

    fn io_read(&mut self, port: u8) -> u8 {
        self.ports[port as usize]
    }

    fn io_write(&mut self, port: u8, data: u8) {
        self.io_writes.push((port, data));
    }
}

/// Load `program` at 0 and run `count` instructions.
pub fn run(cpu: &mut I8080, bus: &mut TestBus, program: &[u8], count: usize) -> StepResult {
    bus.load(0, program);
    let mut result = StepResult::Executed;
    for _ in 0..count {
        result = cpu.step(bus);
    }
    result
}

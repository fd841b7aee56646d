//! CPU state snapshot types and traits

/// Trait for CPU types that can provide state snapshots
pub trait CpuStateTrait {
    type Snapshot;
    fn snapshot(&self) -> Self::Snapshot;
}

/// I8080 CPU state snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct I8080State {
    pub a: u8,            // Accumulator
    pub f: u8,            // Flags (S Z - AC - P - C)
    pub b: u8,            // Register B
    pub c: u8,            // Register C
    pub d: u8,            // Register D
    pub e: u8,            // Register E
    pub h: u8,            // Register H
    pub l: u8,            // Register L
    pub sp: u16,          // Stack pointer
    pub pc: u16,          // Program counter
    pub inte: bool,       // Interrupt enable flip-flop
    pub halted: bool,     // HLT latched
    pub address_bus: u16, // Last address driven on the bus
    pub data_bus: u8,     // Last byte seen on the data bus
}

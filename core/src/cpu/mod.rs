use crate::core::Bus;

/// Outcome of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// An instruction ran to completion.
    Executed,
    /// The CPU is halted (HLT executed now or earlier); nothing was fetched
    /// unless this is the step that executed HLT.
    Halted,
    /// The opcode has no documented meaning. It was executed as a one-byte
    /// NOP; the host decides whether to keep going.
    UndefinedOpcode(u8),
}

/// Generic CPU interface
pub trait Cpu: CpuStateTrait {
    /// Power-on reset: registers, flags and PC to zero.
    fn reset(&mut self);

    /// Execute one complete instruction against `bus`.
    fn step_bus(&mut self, bus: &mut dyn Bus) -> StepResult;

    /// Query if the CPU is halted internally (HLT).
    fn is_halted(&self) -> bool;
}

// Re-export state types
pub mod state;
pub use state::{CpuStateTrait, I8080State};

pub mod i8080;
pub use i8080::I8080;

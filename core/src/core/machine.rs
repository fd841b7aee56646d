use crate::cpu::{StepResult, state::I8080State};

/// Why a bounded run returned control to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The step budget was used up with the CPU still running.
    BudgetExhausted,
    /// The CPU executed HLT (or the machine signalled completion).
    Halted,
    /// An undefined opcode was fetched; the run stops so the host can decide.
    UndefinedOpcode { opcode: u8, address: u16 },
}

/// Machine-agnostic interface for emulated 8080 systems.
///
/// The frontend drives any machine through this trait: it decides the
/// cadence (free-run or single-step) and never touches the bus directly.
pub trait Machine {
    /// Short machine name (matches the registry entry).
    fn name(&self) -> &'static str;

    /// Return CPU and devices to their power-on state. Memory is kept.
    fn reset(&mut self);

    /// Execute exactly one instruction.
    fn step(&mut self) -> StepResult;

    /// Copy an image into memory at `addr`.
    fn load(&mut self, addr: u16, data: &[u8]);

    /// Front panel EXAMINE: set the current address and boot entry point.
    fn examine(&mut self, addr: u16);

    /// Snapshot of the CPU registers.
    fn cpu_state(&self) -> I8080State;

    fn is_halted(&self) -> bool {
        self.cpu_state().halted
    }

    /// Step until the budget is spent, the CPU halts, or an undefined
    /// opcode is met. Returns the outcome and the number of steps taken.
    fn run(&mut self, max_steps: u64) -> (RunOutcome, u64) {
        let mut steps = 0;
        while steps < max_steps {
            let pc = self.cpu_state().pc;
            let result = self.step();
            steps += 1;
            match result {
                StepResult::Executed => {}
                StepResult::Halted => return (RunOutcome::Halted, steps),
                StepResult::UndefinedOpcode(opcode) => {
                    return (RunOutcome::UndefinedOpcode { opcode, address: pc }, steps);
                }
            }
        }
        (RunOutcome::BudgetExhausted, steps)
    }
}

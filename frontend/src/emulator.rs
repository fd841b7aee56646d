use altair_core::core::{Machine, RunOutcome};
use tracing::{info, warn};

/// Instructions per call into the machine between host checks.
const SLICE: u64 = 10_000;

/// Drive `machine` until it halts or `max_steps` instructions have run.
/// Undefined opcodes are logged and execution continues past them.
pub fn run(machine: &mut dyn Machine, max_steps: Option<u64>) -> (RunOutcome, u64) {
    let mut total: u64 = 0;
    loop {
        let budget = match max_steps {
            Some(max) if total >= max => return (RunOutcome::BudgetExhausted, total),
            Some(max) => (max - total).min(SLICE),
            None => SLICE,
        };
        let (outcome, steps) = machine.run(budget);
        total += steps;
        match outcome {
            RunOutcome::Halted => {
                let state = machine.cpu_state();
                info!("{} halted at {:#06X} after {total} instructions", machine.name(), state.pc);
                return (outcome, total);
            }
            RunOutcome::UndefinedOpcode { opcode, address } => {
                warn!("undefined opcode {opcode:#04X} at {address:#06X}, continuing");
            }
            RunOutcome::BudgetExhausted => {}
        }
    }
}

pub mod core;
pub mod cpu;
pub mod device;

pub mod prelude {
    pub use crate::core::{Bus, Machine, Memory, RunOutcome};
    pub use crate::cpu::{Cpu, I8080, StepResult};
    pub use crate::device::{
        DiskController, DiskImage, IoBindings, PortDispatcher, SenseSwitches, Terminal,
    };
}

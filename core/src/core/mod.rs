pub mod bus;
pub mod machine;
pub mod memory;

pub use bus::Bus;
pub use machine::{Machine, RunOutcome};
pub use memory::Memory;

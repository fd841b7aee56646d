pub mod altair8800;
pub mod config;
pub mod cpm;
pub mod error;
pub mod image;
pub mod registry;

pub use altair8800::{Altair8800System, AltairBus};
pub use config::MachineConfig;
pub use cpm::CpmSystem;
pub use error::MachineError;

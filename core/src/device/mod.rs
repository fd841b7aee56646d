pub mod dcdd;
pub mod disk;
pub mod port;
pub mod switches;
pub mod terminal;

pub use dcdd::{Dcdd88, DiskState};
pub use disk::{DiskImage, MemoryDisk};
pub use port::{DiskController, IoBindings, PortDispatcher, PortHandler, SenseSwitches, Terminal};
pub use switches::SwitchBank;
pub use terminal::BufferedTerminal;

//! Machine registry for front-end discovery.
//!
//! Each machine self-registers via [`inventory::submit!`] with a
//! [`MachineEntry`] holding its CLI name, a one-line description and a
//! factory function. The front-end finds machines at runtime without any
//! central list.

use altair_core::core::Machine;
use altair_core::device::IoBindings;

use crate::config::MachineConfig;
use crate::error::MachineError;

/// Factory: build a machine from its config and I/O collaborators.
pub type CreateFn = fn(&MachineConfig, IoBindings) -> Result<Box<dyn Machine>, MachineError>;

/// Describes a front-end-capable machine.
pub struct MachineEntry {
    /// CLI name used to select this machine (e.g., "altair8800").
    pub name: &'static str,
    pub description: &'static str,
    pub create: CreateFn,
}

impl MachineEntry {
    pub const fn new(name: &'static str, description: &'static str, create: CreateFn) -> Self {
        Self {
            name,
            description,
            create,
        }
    }
}

inventory::collect!(MachineEntry);

/// All registered machines, sorted by name.
pub fn all() -> Vec<&'static MachineEntry> {
    let mut entries: Vec<_> = inventory::iter::<MachineEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a machine by its CLI name.
pub fn find(name: &str) -> Option<&'static MachineEntry> {
    inventory::iter::<MachineEntry>
        .into_iter()
        .find(|e| e.name == name)
}

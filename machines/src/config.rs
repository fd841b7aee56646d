//! Machine configuration.
//!
//! Read from TOML; every field has a default so an empty file (or no file)
//! describes a bare 64K Altair with two empty drives:
//!
//! ```toml
//! memory_size = 65536
//! start_address = 0xFF00
//! sense_switches = 0x00
//! drive_count = 2
//!
//! [[rom]]
//! path = "roms/dbl.bin"
//! address = 0xFF00
//!
//! [[disk]]
//! drive = 0
//! path = "disks/cpm22.dsk"
//! ```

use std::path::{Path, PathBuf};

use altair_core::core::memory::ADDRESS_SPACE;
use altair_core::device::{Dcdd88, IoBindings, SwitchBank, Terminal};
use serde::Deserialize;

use crate::error::MachineError;

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Populated RAM in bytes, from address 0.
    pub memory_size: usize,
    /// Address EXAMINEd before the first step.
    pub start_address: u16,
    /// Initial sense switch positions.
    pub sense_switches: u8,
    pub drive_count: usize,
    pub rom: Vec<RomConfig>,
    pub disk: Vec<DiskConfig>,
    /// CP/M `.COM` program (cpm machine only).
    pub program: Option<PathBuf>,
}

/// An image copied into memory at boot.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RomConfig {
    pub path: PathBuf,
    pub address: u16,
}

/// A disk image file mounted in a drive at boot.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DiskConfig {
    pub drive: usize,
    pub path: PathBuf,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: ADDRESS_SPACE,
            start_address: 0,
            sense_switches: 0,
            drive_count: Dcdd88::DEFAULT_DRIVES,
            rom: Vec::new(),
            disk: Vec::new(),
            program: None,
        }
    }
}

impl MachineConfig {
    pub fn from_toml(text: &str) -> Result<Self, MachineError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a config file. Relative image paths are taken relative to the
    /// directory holding the file.
    pub fn load(path: &Path) -> Result<Self, MachineError> {
        let text = std::fs::read_to_string(path).map_err(|e| MachineError::io(path, e))?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for rom in &mut self.rom {
            rom.path = base.join(&rom.path);
        }
        for disk in &mut self.disk {
            disk.path = base.join(&disk.path);
        }
        if let Some(program) = &mut self.program {
            *program = base.join(&*program);
        }
    }

    /// I/O collaborators for this config: `terminal` as the console, sense
    /// switches preset, and a controller with `drive_count` drives.
    pub fn io_bindings(&self, terminal: Box<dyn Terminal>) -> IoBindings {
        IoBindings::new(
            terminal,
            Box::new(SwitchBank::new(self.sense_switches)),
            Box::new(Dcdd88::new(self.drive_count)),
        )
    }

    pub fn validate(&self) -> Result<(), MachineError> {
        if self.memory_size == 0 || self.memory_size > ADDRESS_SPACE {
            return Err(MachineError::InvalidMemorySize(self.memory_size));
        }
        for disk in &self.disk {
            if disk.drive >= self.drive_count {
                return Err(MachineError::DriveOutOfRange {
                    drive: disk.drive,
                    count: self.drive_count,
                });
            }
        }
        Ok(())
    }
}

use std::path::PathBuf;

use thiserror::Error;

/// Host-side failures while building or configuring a machine.
///
/// Emulation itself never fails; these only come from files and settings.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image {name} ({len} bytes) does not fit at {address:#06X} in {memory_size} bytes of memory")]
    ImageTooLarge {
        name: String,
        len: usize,
        address: u16,
        memory_size: usize,
    },

    #[error("drive {drive} out of range (controller has {count} drives)")]
    DriveOutOfRange { drive: usize, count: usize },

    #[error("invalid memory size {0}: expected 1..=65536 bytes")]
    InvalidMemorySize(usize),

    #[error("the {0} machine needs a program to run")]
    MissingProgram(&'static str),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

impl MachineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

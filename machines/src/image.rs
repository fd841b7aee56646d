//! Loading host files into the machine: memory images and disk media.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use altair_core::core::Memory;
use altair_core::device::DiskImage;
use tracing::{debug, warn};

use crate::error::MachineError;

/// Read a whole image file.
pub fn read_image(path: &Path) -> Result<Vec<u8>, MachineError> {
    std::fs::read(path).map_err(|e| MachineError::io(path, e))
}

/// Copy `data` into `memory` at `address`, refusing images that would run
/// past the populated memory.
pub fn load_into(
    memory: &mut Memory,
    name: &str,
    address: u16,
    data: &[u8],
) -> Result<(), MachineError> {
    let end = address as usize + data.len();
    if end > memory.size() {
        return Err(MachineError::ImageTooLarge {
            name: name.to_string(),
            len: data.len(),
            address,
            memory_size: memory.size(),
        });
    }
    memory.load(address, data);
    debug!("loaded {name} ({} bytes) at {address:#06X}", data.len());
    Ok(())
}

/// Disk image backed by a file.
///
/// The whole image is held in memory; each committed sector is written back
/// to the file. Files that cannot be opened for writing are mounted
/// write-protected.
pub struct FileDisk {
    path: PathBuf,
    file: File,
    data: Vec<u8>,
    read_only: bool,
}

impl FileDisk {
    pub fn open(path: &Path) -> Result<Self, MachineError> {
        let (mut file, read_only) = match OpenOptions::new().read(true).write(true).open(path) {
            Ok(file) => (file, false),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                let file = File::open(path).map_err(|e| MachineError::io(path, e))?;
                (file, true)
            }
            Err(e) => return Err(MachineError::io(path, e)),
        };
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| MachineError::io(path, e))?;
        if read_only {
            warn!("{} is read-only; mounting write-protected", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            file,
            data,
            read_only,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn flush_range(&mut self, range: Range<usize>) -> std::io::Result<()> {
        let Some(bytes) = self.data.get(range.clone()) else {
            return Ok(());
        };
        self.file.seek(SeekFrom::Start(range.start as u64))?;
        self.file.write_all(bytes)?;
        self.file.flush()
    }
}

impl DiskImage for FileDisk {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn read(&mut self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    fn write(&mut self, offset: usize, value: u8) -> bool {
        if self.read_only {
            return false;
        }
        match self.data.get_mut(offset) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    fn commit(&mut self, range: Range<usize>) {
        if self.read_only {
            return;
        }
        if let Err(e) = self.flush_range(range.clone()) {
            warn!(
                "failed to write sector at {} to {}: {e}",
                range.start,
                self.path.display()
            );
        }
    }
}

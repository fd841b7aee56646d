use std::ops::Range;

/// Tracks per 8" diskette.
pub const TRACKS: usize = 77;
/// Hard sectors per track.
pub const SECTORS_PER_TRACK: usize = 32;
/// Bytes per sector, including the controller's framing bytes.
pub const SECTOR_SIZE: usize = 137;
pub const TRACK_SIZE: usize = SECTORS_PER_TRACK * SECTOR_SIZE;
/// Size of a full raw disk image (337,568 bytes).
pub const DISK_SIZE: usize = TRACKS * TRACK_SIZE;

/// Fill byte of a freshly formatted diskette.
pub const FORMAT_FILL: u8 = 0xE5;

/// Byte-addressed backing store for one diskette.
///
/// Offsets are linear: `track * TRACK_SIZE + sector * SECTOR_SIZE + byte`.
pub trait DiskImage {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte at `offset`, or `None` past the end of the image.
    fn read(&mut self, offset: usize) -> Option<u8>;

    /// Store a byte. Returns false if `offset` is outside the image or the
    /// image is write-protected.
    fn write(&mut self, offset: usize, value: u8) -> bool;

    /// Called once a whole sector has been written. File-backed images
    /// flush here.
    fn commit(&mut self, _range: Range<usize>) {}
}

/// Image held entirely in memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryDisk {
    data: Vec<u8>,
    write_protected: bool,
}

impl MemoryDisk {
    /// A formatted, empty diskette.
    pub fn blank() -> Self {
        Self::from_bytes(vec![FORMAT_FILL; DISK_SIZE])
    }

    /// Wrap raw image bytes. Short images are allowed; reads past the end
    /// see no data.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            data,
            write_protected: false,
        }
    }

    pub fn set_write_protected(&mut self, protected: bool) {
        self.write_protected = protected;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl DiskImage for MemoryDisk {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn read(&mut self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    fn write(&mut self, offset: usize, value: u8) -> bool {
        if self.write_protected {
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
}

/// Linear offset of the first byte of `sector` on `track`.
pub fn sector_offset(track: usize, sector: usize) -> usize {
    track * TRACK_SIZE + sector * SECTOR_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry() {
        assert_eq!(DISK_SIZE, 337_568);
        assert_eq!(sector_offset(0, 1), 137);
        assert_eq!(sector_offset(1, 0), 4384);
        assert_eq!(sector_offset(76, 31) + SECTOR_SIZE, DISK_SIZE);
    }

    #[test]
    fn short_image_reads_none_past_end() {
        let mut disk = MemoryDisk::from_bytes(vec![1, 2, 3]);
        assert_eq!(disk.read(2), Some(3));
        assert_eq!(disk.read(3), None);
        assert!(!disk.write(3, 0xAA));
    }

    #[test]
    fn write_protect() {
        let mut disk = MemoryDisk::blank();
        disk.set_write_protected(true);
        assert!(!disk.write(0, 0x00));
        assert_eq!(disk.read(0), Some(FORMAT_FILL));
    }
}

use crate::core::Bus;

/// Full 8080 address space size.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Flat RAM backing the 8080 address space.
///
/// An Altair can be populated with less than 64K; addresses past the
/// populated size read as 0 and drop writes. There is no fault mechanism,
/// matching the bus of the real machine.
pub struct Memory {
    data: Vec<u8>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Fully populated 64K of zeroed RAM.
    pub fn new() -> Self {
        Self::with_size(ADDRESS_SPACE)
    }

    /// RAM populated from 0 up to `size` bytes (clamped to 64K).
    pub fn with_size(size: usize) -> Self {
        Self {
            data: vec![0; size.min(ADDRESS_SPACE)],
        }
    }

    /// Number of populated bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn read8(&self, addr: u16) -> u8 {
        self.data.get(addr as usize).copied().unwrap_or(0)
    }

    pub fn write8(&mut self, addr: u16, val: u8) {
        if let Some(byte) = self.data.get_mut(addr as usize) {
            *byte = val;
        }
    }

    /// Low byte at `addr`, high byte at `addr + 1` (wrapping to 0x0000).
    pub fn read16(&self, addr: u16) -> u16 {
        let low = self.read8(addr) as u16;
        let high = self.read8(addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub fn write16(&mut self, addr: u16, val: u16) {
        self.write8(addr, val as u8);
        self.write8(addr.wrapping_add(1), (val >> 8) as u8);
    }

    /// Copy `data` into memory starting at `addr`. Bytes that land past the
    /// populated size are dropped. Returns the number of bytes stored.
    pub fn load(&mut self, addr: u16, data: &[u8]) -> usize {
        let start = addr as usize;
        if start >= self.data.len() {
            return 0;
        }
        let end = (start + data.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&data[..end - start]);
        end - start
    }

    /// Zero all populated bytes.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Bus for Memory {
    fn read(&mut self, addr: u16) -> u8 {
        self.read8(addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.write8(addr, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read16_wraps_high_byte_to_zero() {
        let mut mem = Memory::new();
        mem.write8(0xFFFF, 0x34);
        mem.write8(0x0000, 0x12);
        assert_eq!(mem.read16(0xFFFF), 0x1234);
    }

    #[test]
    fn write16_wraps_high_byte_to_zero() {
        let mut mem = Memory::new();
        mem.write16(0xFFFF, 0xBEEF);
        assert_eq!(mem.read8(0xFFFF), 0xEF);
        assert_eq!(mem.read8(0x0000), 0xBE);
    }

    #[test]
    fn unpopulated_reads_zero_and_drops_writes() {
        let mut mem = Memory::with_size(0x1000);
        mem.write8(0x0FFF, 0xAA);
        mem.write8(0x1000, 0x55);
        assert_eq!(mem.read8(0x0FFF), 0xAA);
        assert_eq!(mem.read8(0x1000), 0x00);
        assert_eq!(mem.read16(0x0FFF), 0x00AA);
    }

    #[test]
    fn load_truncates_at_populated_size() {
        let mut mem = Memory::with_size(0x0100);
        assert_eq!(mem.load(0x00FE, &[1, 2, 3, 4]), 2);
        assert_eq!(mem.read8(0x00FE), 1);
        assert_eq!(mem.read8(0x00FF), 2);
        assert_eq!(mem.load(0x0200, &[9]), 0);
    }

    #[test]
    fn oversized_memory_is_clamped() {
        let mem = Memory::with_size(0x20000);
        assert_eq!(mem.size(), ADDRESS_SPACE);
    }
}

/// Memory and I/O port access for the 8080.
///
/// The 8080 has a 16-bit memory address space and a separate 8-bit I/O port
/// space reached only through IN/OUT. Implementations never fail: unpopulated
/// memory reads as 0 and swallows writes, unmapped ports read as 0 and ignore
/// writes.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Read from the I/O port space (IN). Default: nothing mapped.
    fn io_read(&mut self, _port: u8) -> u8 {
        0
    }

    /// Write to the I/O port space (OUT). Default: nothing mapped.
    fn io_write(&mut self, _port: u8, _data: u8) {}
}

use crate::core::Bus;
use crate::cpu::i8080::I8080;

impl I8080 {
    /// IN port: the port number is echoed on both halves of the address
    /// bus, the byte read lands on the data bus.
    pub fn op_in<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        let data = bus.io_read(port);
        self.address_bus = u16::from_le_bytes([port, port]);
        self.data_bus = data;
        self.regs.set_a(data);
    }

    /// OUT port
    pub fn op_out<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let port = self.fetch_byte(bus);
        let data = self.regs.a();
        bus.io_write(port, data);
        self.address_bus = u16::from_le_bytes([port, port]);
        self.data_bus = data;
    }
}

//! Front panel protocol.
//!
//! The panel works on a "current address" held on the address bus. The
//! operations run out-of-band from instruction execution and never fetch.
//! Only EXAMINE moves PC, which is how the host sets the boot entry point.

use crate::core::Bus;
use crate::cpu::i8080::I8080;

impl I8080 {
    /// Current panel address (the address bus LEDs).
    pub fn panel_address(&self) -> u16 {
        self.address_bus
    }

    /// EXAMINE: select `address`, point PC at it and show its contents.
    /// Also releases a HLT so the machine can be restarted from the panel.
    pub fn examine<B: Bus + ?Sized>(&mut self, bus: &mut B, address: u16) {
        self.regs.pc = address;
        self.halted = false;
        self.address_bus = address;
        self.data_bus = bus.read(address);
    }

    /// EXAMINE NEXT: advance the current address and show its contents.
    pub fn examine_next<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.address_bus = self.address_bus.wrapping_add(1);
        self.data_bus = bus.read(self.address_bus);
    }

    /// DEPOSIT: store `data` at the current address. The address stays.
    pub fn deposit<B: Bus + ?Sized>(&mut self, bus: &mut B, data: u8) {
        bus.write(self.address_bus, data);
        self.data_bus = data;
    }

    /// DEPOSIT NEXT: store `data` at the current address, then advance.
    pub fn deposit_next<B: Bus + ?Sized>(&mut self, bus: &mut B, data: u8) {
        self.deposit(bus, data);
        self.address_bus = self.address_bus.wrapping_add(1);
    }
}

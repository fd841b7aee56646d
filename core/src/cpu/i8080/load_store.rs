use crate::core::Bus;
use crate::cpu::i8080::I8080;

impl I8080 {
    /// MOV d,s: register/memory to register/memory, no flags.
    /// Opcode mask: 01 ddd sss (01 110 110 is HLT, decoded earlier)
    pub fn op_mov<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let value = self.read_operand(opcode & 0x07, bus);
        self.write_operand((opcode >> 3) & 0x07, value, bus);
    }

    /// MVI d,data
    /// Opcode mask: 00 ddd 110
    pub fn op_mvi<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let value = self.fetch_byte(bus);
        self.write_operand((opcode >> 3) & 0x07, value, bus);
    }

    /// LXI rp,data16
    /// Opcode mask: 00 rp0 001
    pub fn op_lxi<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let value = self.fetch_word(bus);
        self.set_rp((opcode >> 4) & 0x03, value);
    }

    /// STAX B / STAX D
    pub fn op_stax<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let addr = self.get_rp((opcode >> 4) & 0x01);
        self.mem_write(bus, addr, self.regs.a());
    }

    /// LDAX B / LDAX D
    pub fn op_ldax<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let addr = self.get_rp((opcode >> 4) & 0x01);
        let value = self.mem_read(bus, addr);
        self.regs.set_a(value);
    }

    /// STA addr
    pub fn op_sta<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.mem_write(bus, addr, self.regs.a());
    }

    /// LDA addr
    pub fn op_lda<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        let value = self.mem_read(bus, addr);
        self.regs.set_a(value);
    }

    /// SHLD addr: L to (addr), H to (addr+1)
    pub fn op_shld<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.mem_write_word(bus, addr, self.regs.hl.get());
    }

    /// LHLD addr: (addr) to L, (addr+1) to H
    pub fn op_lhld<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        let value = self.mem_read_word(bus, addr);
        self.regs.hl.set(value);
    }

    /// XCHG: swap DE and HL
    pub fn op_xchg(&mut self) {
        std::mem::swap(&mut self.regs.de, &mut self.regs.hl);
    }
}

use crate::core::Bus;
use crate::cpu::i8080::I8080;

impl I8080 {
    /// Push high byte at SP-1, low byte at SP-2.
    pub(crate) fn push_word<B: Bus + ?Sized>(&mut self, bus: &mut B, val: u16) {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.mem_write(bus, self.regs.sp, (val >> 8) as u8);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.mem_write(bus, self.regs.sp, val as u8);
    }

    pub(crate) fn pop_word<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u16 {
        let low = self.mem_read(bus, self.regs.sp) as u16;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let high = self.mem_read(bus, self.regs.sp) as u16;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        (high << 8) | low
    }

    /// PUSH rp
    /// Opcode mask: 11 rp0 101 (rp: 0=BC, 1=DE, 2=HL, 3=PSW)
    pub fn op_push<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let val = self.get_rp_psw((opcode >> 4) & 0x03);
        self.push_word(bus, val);
    }

    /// POP rp
    /// Opcode mask: 11 rp0 001 (rp: 0=BC, 1=DE, 2=HL, 3=PSW)
    pub fn op_pop<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let val = self.pop_word(bus);
        self.set_rp_psw((opcode >> 4) & 0x03, val);
    }

    /// XTHL: exchange HL with the word at the top of the stack
    pub fn op_xthl<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let sp = self.regs.sp;
        let top = self.mem_read_word(bus, sp);
        self.mem_write_word(bus, sp, self.regs.hl.get());
        self.regs.hl.set(top);
    }

    /// SPHL: SP = HL
    pub fn op_sphl(&mut self) {
        self.regs.sp = self.regs.hl.get();
    }
}

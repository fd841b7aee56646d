use crate::core::Bus;
use crate::cpu::i8080::I8080;

impl I8080 {
    /// JMP addr
    pub fn op_jmp<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.regs.pc = self.fetch_word(bus);
    }

    /// Jcc addr: the operand is always fetched; PC changes only when taken.
    /// Opcode mask: 11 ccc 010
    pub fn op_jmp_cc<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let addr = self.fetch_word(bus);
        if self.eval_condition((opcode >> 3) & 0x07) {
            self.regs.pc = addr;
        }
    }

    /// CALL addr
    pub fn op_call<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        let addr = self.fetch_word(bus);
        self.push_word(bus, self.regs.pc);
        self.regs.pc = addr;
    }

    /// Ccc addr
    /// Opcode mask: 11 ccc 100
    pub fn op_call_cc<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let addr = self.fetch_word(bus);
        if self.eval_condition((opcode >> 3) & 0x07) {
            self.push_word(bus, self.regs.pc);
            self.regs.pc = addr;
        }
    }

    /// RET
    pub fn op_ret<B: Bus + ?Sized>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_word(bus);
    }

    /// Rcc
    /// Opcode mask: 11 ccc 000
    pub fn op_ret_cc<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        if self.eval_condition((opcode >> 3) & 0x07) {
            self.regs.pc = self.pop_word(bus);
        }
    }

    /// RST n: call to n * 8
    /// Opcode mask: 11 nnn 111
    pub fn op_rst<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        self.push_word(bus, self.regs.pc);
        self.regs.pc = (opcode & 0x38) as u16;
    }

    /// PCHL: PC = HL
    pub fn op_pchl(&mut self) {
        self.regs.pc = self.regs.hl.get();
    }
}

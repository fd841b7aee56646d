pub mod alu;
mod branch;
mod io;
mod load_store;
mod panel;
pub mod registers;
mod stack;

pub use registers::{Pair, RegisterPair, Registers};

use crate::core::Bus;
use crate::cpu::{
    Cpu, StepResult,
    state::{CpuStateTrait, I8080State},
};

/// Flag bits of the low byte of PSW.
///
/// Bits 1, 3 and 5 are not flags. They are never stored; PUSH PSW presents
/// them the way the silicon does (bit 1 high, bits 3 and 5 low).
#[repr(u8)]
#[derive(Copy, Clone, Debug)]
pub enum Flag {
    C = 0x01,  // Carry
    P = 0x04,  // Parity (even)
    AC = 0x10, // Auxiliary carry
    Z = 0x40,  // Zero
    S = 0x80,  // Sign
}

/// Mask of the flag bits that carry meaning.
pub const FLAG_MASK: u8 = 0xD5;

pub struct I8080 {
    // Registers
    pub regs: Registers,

    // Processor control
    pub inte: bool,
    pub halted: bool,

    // Bus observables (front panel LEDs)
    pub address_bus: u16,
    pub data_bus: u8,

    pub(crate) opcode: u8,
}

impl Default for I8080 {
    fn default() -> Self {
        Self::new()
    }
}

impl I8080 {
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            inte: false,
            halted: false,
            address_bus: 0,
            data_bus: 0,
            opcode: 0,
        }
    }

    /// Opcode of the most recently fetched instruction.
    pub fn current_opcode(&self) -> u8 {
        self.opcode
    }

    // --- Flag helpers ---

    #[inline]
    pub(crate) fn set_flag(&mut self, flag: Flag, set: bool) {
        let f = self.regs.flags();
        if set {
            self.regs.set_flags(f | flag as u8);
        } else {
            self.regs.set_flags(f & !(flag as u8));
        }
    }

    #[inline]
    pub fn flag_set(&self, flag: Flag) -> bool {
        self.regs.flags() & (flag as u8) != 0
    }

    /// Evaluate a condition code (opcode bits 5-3).
    /// 0=NZ, 1=Z, 2=NC, 3=C, 4=PO, 5=PE, 6=P, 7=M
    pub(crate) fn eval_condition(&self, cc: u8) -> bool {
        match cc {
            0 => !self.flag_set(Flag::Z),
            1 => self.flag_set(Flag::Z),
            2 => !self.flag_set(Flag::C),
            3 => self.flag_set(Flag::C),
            4 => !self.flag_set(Flag::P),
            5 => self.flag_set(Flag::P),
            6 => !self.flag_set(Flag::S),
            7 => self.flag_set(Flag::S),
            _ => unreachable!(),
        }
    }

    // --- Register access ---

    /// 8-bit register by index: 0=B 1=C 2=D 3=E 4=H 5=L 7=A.
    /// Index 6 (M) is memory at HL; use `read_operand` for it.
    pub fn get_reg8(&self, index: u8) -> u8 {
        match index {
            0 => self.regs.bc.high(),
            1 => self.regs.bc.low(),
            2 => self.regs.de.high(),
            3 => self.regs.de.low(),
            4 => self.regs.hl.high(),
            5 => self.regs.hl.low(),
            7 => self.regs.a(),
            _ => unreachable!("get_reg8 called with index {}", index),
        }
    }

    pub fn set_reg8(&mut self, index: u8, val: u8) {
        match index {
            0 => self.regs.bc.set_high(val),
            1 => self.regs.bc.set_low(val),
            2 => self.regs.de.set_high(val),
            3 => self.regs.de.set_low(val),
            4 => self.regs.hl.set_high(val),
            5 => self.regs.hl.set_low(val),
            7 => self.regs.set_a(val),
            _ => unreachable!("set_reg8 called with index {}", index),
        }
    }

    /// Register pair by index for LXI/INX/DCX/DAD (0=BC, 1=DE, 2=HL, 3=SP).
    pub(crate) fn get_rp(&self, index: u8) -> u16 {
        match index {
            0 => self.regs.bc.get(),
            1 => self.regs.de.get(),
            2 => self.regs.hl.get(),
            3 => self.regs.sp,
            _ => unreachable!("get_rp called with index {}", index),
        }
    }

    pub(crate) fn set_rp(&mut self, index: u8, val: u16) {
        match index {
            0 => self.regs.bc.set(val),
            1 => self.regs.de.set(val),
            2 => self.regs.hl.set(val),
            3 => self.regs.sp = val,
            _ => unreachable!("set_rp called with index {}", index),
        }
    }

    /// Register pair by index for PUSH/POP (0=BC, 1=DE, 2=HL, 3=PSW).
    pub(crate) fn get_rp_psw(&self, index: u8) -> u16 {
        match index {
            3 => {
                let f = (self.regs.flags() & FLAG_MASK) | 0x02;
                ((self.regs.a() as u16) << 8) | f as u16
            }
            _ => self.get_rp(index),
        }
    }

    pub(crate) fn set_rp_psw(&mut self, index: u8, val: u16) {
        match index {
            3 => {
                self.regs.set_a((val >> 8) as u8);
                self.regs.set_flags(val as u8 & FLAG_MASK);
            }
            _ => self.set_rp(index, val),
        }
    }

    // --- Bus access ---
    //
    // Every memory cycle drives the address and data bus observables.

    pub(crate) fn mem_read<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16) -> u8 {
        let data = bus.read(addr);
        self.address_bus = addr;
        self.data_bus = data;
        data
    }

    pub(crate) fn mem_write<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16, data: u8) {
        bus.write(addr, data);
        self.address_bus = addr;
        self.data_bus = data;
    }

    pub(crate) fn mem_read_word<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16) -> u16 {
        let low = self.mem_read(bus, addr) as u16;
        let high = self.mem_read(bus, addr.wrapping_add(1)) as u16;
        (high << 8) | low
    }

    pub(crate) fn mem_write_word<B: Bus + ?Sized>(&mut self, bus: &mut B, addr: u16, data: u16) {
        self.mem_write(bus, addr, data as u8);
        self.mem_write(bus, addr.wrapping_add(1), (data >> 8) as u8);
    }

    pub(crate) fn fetch_byte<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u8 {
        let data = self.mem_read(bus, self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        data
    }

    pub(crate) fn fetch_word<B: Bus + ?Sized>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch_byte(bus) as u16;
        let high = self.fetch_byte(bus) as u16;
        (high << 8) | low
    }

    /// Source operand by index; 6 reads memory at HL.
    pub(crate) fn read_operand<B: Bus + ?Sized>(&mut self, index: u8, bus: &mut B) -> u8 {
        if index == 6 {
            self.mem_read(bus, self.regs.hl.get())
        } else {
            self.get_reg8(index)
        }
    }

    /// Destination operand by index; 6 writes memory at HL.
    pub(crate) fn write_operand<B: Bus + ?Sized>(&mut self, index: u8, val: u8, bus: &mut B) {
        if index == 6 {
            self.mem_write(bus, self.regs.hl.get(), val);
        } else {
            self.set_reg8(index, val);
        }
    }

    // --- Execution ---

    /// Fetch, decode and execute one instruction.
    pub fn step<B: Bus + ?Sized>(&mut self, bus: &mut B) -> StepResult {
        if self.halted {
            return StepResult::Halted;
        }
        self.opcode = self.fetch_byte(bus);
        self.execute_instruction(self.opcode, bus)
    }

    fn execute_instruction<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) -> StepResult {
        match opcode {
            // ===== Control =====
            0x00 => {} // NOP
            0x76 => {
                // HLT
                self.halted = true;
                tracing::trace!("halt at {:#06X}", self.regs.pc.wrapping_sub(1));
                return StepResult::Halted;
            }
            0xF3 => self.inte = false, // DI
            0xFB => self.inte = true,  // EI

            // ===== Data transfer =====
            0x40..=0x7F => self.op_mov(opcode, bus),
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => self.op_mvi(opcode, bus),
            0x01 | 0x11 | 0x21 | 0x31 => self.op_lxi(opcode, bus),
            0x02 | 0x12 => self.op_stax(opcode, bus),
            0x0A | 0x1A => self.op_ldax(opcode, bus),
            0x22 => self.op_shld(bus),
            0x2A => self.op_lhld(bus),
            0x32 => self.op_sta(bus),
            0x3A => self.op_lda(bus),
            0xEB => self.op_xchg(),

            // ===== 8-bit arithmetic / logic =====
            0x80..=0xBF => self.op_alu_r(opcode, bus),
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => self.op_alu_imm(opcode, bus),
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => self.op_inr(opcode, bus),
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => self.op_dcr(opcode, bus),
            0x27 => self.op_daa(),

            // ===== 16-bit arithmetic =====
            0x03 | 0x13 | 0x23 | 0x33 => self.op_inx(opcode),
            0x0B | 0x1B | 0x2B | 0x3B => self.op_dcx(opcode),
            0x09 | 0x19 | 0x29 | 0x39 => self.op_dad(opcode),

            // ===== Rotate / accumulator / carry =====
            0x07 => self.op_rlc(),
            0x0F => self.op_rrc(),
            0x17 => self.op_ral(),
            0x1F => self.op_rar(),
            0x2F => self.op_cma(),
            0x37 => self.op_stc(),
            0x3F => self.op_cmc(),

            // ===== Branch =====
            0xC3 => self.op_jmp(bus),
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => self.op_jmp_cc(opcode, bus),
            0xCD => self.op_call(bus),
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => self.op_call_cc(opcode, bus),
            0xC9 => self.op_ret(bus),
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => self.op_ret_cc(opcode, bus),
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => self.op_rst(opcode, bus),
            0xE9 => self.op_pchl(),

            // ===== Stack =====
            0xC5 | 0xD5 | 0xE5 | 0xF5 => self.op_push(opcode, bus),
            0xC1 | 0xD1 | 0xE1 | 0xF1 => self.op_pop(opcode, bus),
            0xE3 => self.op_xthl(bus),
            0xF9 => self.op_sphl(),

            // ===== I/O =====
            0xDB => self.op_in(bus),
            0xD3 => self.op_out(bus),

            // ===== Undefined opcodes - execute as NOP, report to host =====
            // 0x08 0x10 0x18 0x20 0x28 0x30 0x38 0xCB 0xD9 0xDD 0xED 0xFD
            _ => {
                tracing::trace!(
                    "undefined opcode {opcode:#04X} at {:#06X}",
                    self.regs.pc.wrapping_sub(1)
                );
                return StepResult::UndefinedOpcode(opcode);
            }
        }
        StepResult::Executed
    }
}

impl Cpu for I8080 {
    fn reset(&mut self) {
        self.regs = Registers::default();
        self.inte = false;
        self.halted = false;
        self.address_bus = 0;
        self.data_bus = 0;
        self.opcode = 0;
    }

    fn step_bus(&mut self, bus: &mut dyn Bus) -> StepResult {
        self.step(bus)
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}

impl CpuStateTrait for I8080 {
    type Snapshot = I8080State;

    fn snapshot(&self) -> I8080State {
        I8080State {
            a: self.regs.a(),
            f: self.regs.flags(),
            b: self.regs.bc.high(),
            c: self.regs.bc.low(),
            d: self.regs.de.high(),
            e: self.regs.de.low(),
            h: self.regs.hl.high(),
            l: self.regs.hl.low(),
            sp: self.regs.sp,
            pc: self.regs.pc,
            inte: self.inte,
            halted: self.halted,
            address_bus: self.address_bus,
            data_bus: self.data_bus,
        }
    }
}

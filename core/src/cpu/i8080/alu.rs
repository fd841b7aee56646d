use crate::core::Bus;
use crate::cpu::i8080::{Flag, I8080};

// --- Flag ALU ---
//
// Pure functions of operands and carry-in. Each returns the 8-bit result and
// the complete flags byte it produces (only S, Z, AC, P, C bits). Callers
// that preserve flags (INR/DCR keep carry) merge them themselves.

/// Even parity: true when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

/// Sign, zero and parity bits for an 8-bit result.
#[inline]
pub fn szp(value: u8) -> u8 {
    let mut f = 0;
    if value == 0 { f |= Flag::Z as u8; }
    if value & 0x80 != 0 { f |= Flag::S as u8; }
    if parity(value) { f |= Flag::P as u8; }
    f
}

/// ADD/ADC: carry from bit 7, auxiliary carry from bit 3.
pub fn add(a: u8, value: u8, carry_in: bool) -> (u8, u8) {
    let c = carry_in as u16;
    let sum = a as u16 + value as u16 + c;
    let result = sum as u8;
    let mut f = szp(result);
    if (a & 0x0F) as u16 + (value & 0x0F) as u16 + c > 0x0F { f |= Flag::AC as u8; }
    if sum > 0xFF { f |= Flag::C as u8; }
    (result, f)
}

/// SUB/SBB/CMP: carry is the borrow out of bit 7. The 8080 subtracts by
/// adding the complement, so AC is the carry out of bit 3 of that addition,
/// which is set when the low nibble did not borrow.
pub fn sub(a: u8, value: u8, borrow_in: bool) -> (u8, u8) {
    let b = borrow_in as u16;
    let diff = (a as u16).wrapping_sub(value as u16).wrapping_sub(b);
    let result = diff as u8;
    let mut f = szp(result);
    if (a & 0x0F) as u16 + (!value & 0x0F) as u16 + (1 - b) > 0x0F { f |= Flag::AC as u8; }
    if diff > 0xFF { f |= Flag::C as u8; }
    (result, f)
}

/// ANA/XRA/ORA: carry and auxiliary carry cleared.
pub fn logic(result: u8) -> (u8, u8) {
    (result, szp(result))
}

/// INR: S, Z, P, AC from the increment. Carry is not produced.
pub fn inr(value: u8) -> (u8, u8) {
    let result = value.wrapping_add(1);
    let mut f = szp(result);
    if result & 0x0F == 0 { f |= Flag::AC as u8; }
    (result, f)
}

/// DCR: S, Z, P, AC (no borrow from the low nibble). Carry is not produced.
pub fn dcr(value: u8) -> (u8, u8) {
    let result = value.wrapping_sub(1);
    let mut f = szp(result);
    if result & 0x0F != 0x0F { f |= Flag::AC as u8; }
    (result, f)
}

/// DAA: decimal adjust using the incoming AC and C.
pub fn daa(a: u8, flags: u8) -> (u8, u8) {
    let ac = flags & Flag::AC as u8 != 0;
    let mut carry = flags & Flag::C as u8 != 0;
    let lsb = a & 0x0F;
    let msb = a >> 4;

    let mut correction = 0u8;
    if ac || lsb > 9 {
        correction |= 0x06;
    }
    if carry || msb > 9 || (msb >= 9 && lsb > 9) {
        correction |= 0x60;
        carry = true;
    }

    let (result, mut f) = add(a, correction, false);
    f &= !(Flag::C as u8);
    if carry { f |= Flag::C as u8; }
    (result, f)
}

impl I8080 {
    const CARRY_MASK: u8 = Flag::C as u8;

    fn perform_alu_op(&mut self, op: u8, value: u8) {
        let a = self.regs.a();
        let carry = self.flag_set(Flag::C);
        let (result, f) = match op {
            0 => add(a, value, false),   // ADD
            1 => add(a, value, carry),   // ADC
            2 => sub(a, value, false),   // SUB
            3 => sub(a, value, carry),   // SBB
            4 => logic(a & value),       // ANA
            5 => logic(a ^ value),       // XRA
            6 => logic(a | value),       // ORA
            7 => {
                // CMP: flags only
                let (_, f) = sub(a, value, false);
                self.regs.set_flags(f);
                return;
            }
            _ => unreachable!(),
        };
        self.regs.set_a(result);
        self.regs.set_flags(f);
    }

    // --- Instructions ---

    /// ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r|M
    /// Opcode mask: 10 ooo sss
    pub fn op_alu_r<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let value = self.read_operand(opcode & 0x07, bus);
        self.perform_alu_op((opcode >> 3) & 0x07, value);
    }

    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI data
    /// Opcode mask: 11 ooo 110
    pub fn op_alu_imm<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let value = self.fetch_byte(bus);
        self.perform_alu_op((opcode >> 3) & 0x07, value);
    }

    /// INR r|M: carry preserved
    /// Opcode mask: 00 ddd 100
    pub fn op_inr<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let r = (opcode >> 3) & 0x07;
        let (result, f) = inr(self.read_operand(r, bus));
        self.regs.set_flags((self.regs.flags() & Self::CARRY_MASK) | f);
        self.write_operand(r, result, bus);
    }

    /// DCR r|M: carry preserved
    /// Opcode mask: 00 ddd 101
    pub fn op_dcr<B: Bus + ?Sized>(&mut self, opcode: u8, bus: &mut B) {
        let r = (opcode >> 3) & 0x07;
        let (result, f) = dcr(self.read_operand(r, bus));
        self.regs.set_flags((self.regs.flags() & Self::CARRY_MASK) | f);
        self.write_operand(r, result, bus);
    }

    /// INX rp: no flags
    /// Opcode mask: 00 rp0 011
    pub fn op_inx(&mut self, opcode: u8) {
        let rp = (opcode >> 4) & 0x03;
        self.set_rp(rp, self.get_rp(rp).wrapping_add(1));
    }

    /// DCX rp: no flags
    /// Opcode mask: 00 rp1 011
    pub fn op_dcx(&mut self, opcode: u8) {
        let rp = (opcode >> 4) & 0x03;
        self.set_rp(rp, self.get_rp(rp).wrapping_sub(1));
    }

    /// DAD rp: HL += rp, only carry affected
    /// Opcode mask: 00 rp1 001
    pub fn op_dad(&mut self, opcode: u8) {
        let rp = (opcode >> 4) & 0x03;
        let sum = self.regs.hl.get() as u32 + self.get_rp(rp) as u32;
        self.regs.hl.set(sum as u16);
        self.set_flag(Flag::C, sum > 0xFFFF);
    }

    /// DAA
    pub fn op_daa(&mut self) {
        let (result, f) = daa(self.regs.a(), self.regs.flags());
        self.regs.set_a(result);
        self.regs.set_flags(f);
    }

    // --- Rotates (carry only) ---

    /// RLC: A7 -> C and A0
    pub fn op_rlc(&mut self) {
        let a = self.regs.a();
        self.regs.set_a(a.rotate_left(1));
        self.set_flag(Flag::C, a & 0x80 != 0);
    }

    /// RRC: A0 -> C and A7
    pub fn op_rrc(&mut self) {
        let a = self.regs.a();
        self.regs.set_a(a.rotate_right(1));
        self.set_flag(Flag::C, a & 0x01 != 0);
    }

    /// RAL: rotate left through carry
    pub fn op_ral(&mut self) {
        let a = self.regs.a();
        let carry = self.flag_set(Flag::C) as u8;
        self.regs.set_a((a << 1) | carry);
        self.set_flag(Flag::C, a & 0x80 != 0);
    }

    /// RAR: rotate right through carry
    pub fn op_rar(&mut self) {
        let a = self.regs.a();
        let carry = self.flag_set(Flag::C) as u8;
        self.regs.set_a((a >> 1) | (carry << 7));
        self.set_flag(Flag::C, a & 0x01 != 0);
    }

    // --- Accumulator / carry control ---

    /// CMA: no flags
    pub fn op_cma(&mut self) {
        self.regs.set_a(!self.regs.a());
    }

    /// STC
    pub fn op_stc(&mut self) {
        self.set_flag(Flag::C, true);
    }

    /// CMC
    pub fn op_cmc(&mut self) {
        let c = self.flag_set(Flag::C);
        self.set_flag(Flag::C, !c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_flag_matches_popcount_for_every_byte() {
        for value in 0..=255u8 {
            let expected = value.count_ones() % 2 == 0;
            assert_eq!(szp(value) & Flag::P as u8 != 0, expected, "value {value:#04X}");
        }
    }

    #[test]
    fn add_overflow_sets_carry_zero_and_aux() {
        let (result, f) = add(0xFF, 0x01, false);
        assert_eq!(result, 0x00);
        assert_eq!(f, Flag::C as u8 | Flag::Z as u8 | Flag::AC as u8 | Flag::P as u8);
    }

    #[test]
    fn sub_borrow_and_aux_follow_complement_addition() {
        // 0x10 - 0x01: low nibble borrows, so AC is clear
        let (result, f) = sub(0x10, 0x01, false);
        assert_eq!(result, 0x0F);
        assert_eq!(f & Flag::AC as u8, 0);
        assert_eq!(f & Flag::C as u8, 0);

        // 0x00 - 0x01: borrow out of bit 7
        let (result, f) = sub(0x00, 0x01, false);
        assert_eq!(result, 0xFF);
        assert_ne!(f & Flag::C as u8, 0);
        assert_ne!(f & Flag::S as u8, 0);

        // 0x3E - 0x3E: zero, no borrows, AC set
        let (result, f) = sub(0x3E, 0x3E, false);
        assert_eq!(result, 0);
        assert_eq!(f, Flag::Z as u8 | Flag::P as u8 | Flag::AC as u8);
    }

    #[test]
    fn logic_clears_carry_and_aux() {
        let (result, f) = logic(0x0F);
        assert_eq!(result, 0x0F);
        assert_eq!(f & (Flag::C as u8 | Flag::AC as u8), 0);
        assert_ne!(f & Flag::P as u8, 0);
    }

    #[test]
    fn inr_and_dcr_aux_carry() {
        assert_eq!(inr(0x0F).1 & Flag::AC as u8, Flag::AC as u8);
        assert_eq!(inr(0x0E).1 & Flag::AC as u8, 0);
        assert_eq!(dcr(0x10).1 & Flag::AC as u8, 0);
        assert_eq!(dcr(0x11).1 & Flag::AC as u8, Flag::AC as u8);
        assert_eq!(inr(0xFF), (0x00, Flag::Z as u8 | Flag::P as u8 | Flag::AC as u8));
    }

    #[test]
    fn daa_adjusts_bcd_sum() {
        // 0x19 + 0x28 = 0x41 with AC set -> 0x47
        let (sum, f) = add(0x19, 0x28, false);
        let (result, f) = daa(sum, f);
        assert_eq!(result, 0x47);
        assert_eq!(f & Flag::C as u8, 0);

        // 0x99 + 0x01 = 0x9A -> 0x00 with carry
        let (sum, f) = add(0x99, 0x01, false);
        let (result, f) = daa(sum, f);
        assert_eq!(result, 0x00);
        assert_ne!(f & Flag::C as u8, 0);
        assert_ne!(f & Flag::Z as u8, 0);
    }
}

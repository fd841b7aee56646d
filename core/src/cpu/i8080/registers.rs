//! 8080 register file.
//!
//! Each pair is stored once as a `u16`. The high half is bits 15..8 and the
//! low half bits 7..0, so B, D, H and A are high halves and C, E, L and the
//! flags are low halves. PUSH writes the high half at SP-1 and the low half
//! at SP-2, which is the 8080's little-endian memory order.

use super::FLAG_MASK;

/// A 16-bit register with explicit 8-bit half accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterPair(u16);

impl RegisterPair {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u16 {
        self.0
    }

    pub fn set(&mut self, value: u16) {
        self.0 = value;
    }

    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    pub fn set_high(&mut self, value: u8) {
        self.0 = (self.0 & 0x00FF) | ((value as u16) << 8);
    }

    pub fn set_low(&mut self, value: u8) {
        self.0 = (self.0 & 0xFF00) | value as u16;
    }
}

/// Register pair selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pair {
    Bc,
    De,
    Hl,
    /// Accumulator (high) and flags (low).
    Psw,
}

/// Register file: PSW, BC, DE, HL, SP and PC.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub psw: RegisterPair,
    pub bc: RegisterPair,
    pub de: RegisterPair,
    pub hl: RegisterPair,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    fn pair_ref(&self, pair: Pair) -> &RegisterPair {
        match pair {
            Pair::Bc => &self.bc,
            Pair::De => &self.de,
            Pair::Hl => &self.hl,
            Pair::Psw => &self.psw,
        }
    }

    fn pair_mut(&mut self, pair: Pair) -> &mut RegisterPair {
        match pair {
            Pair::Bc => &mut self.bc,
            Pair::De => &mut self.de,
            Pair::Hl => &mut self.hl,
            Pair::Psw => &mut self.psw,
        }
    }

    pub fn get16(&self, pair: Pair) -> u16 {
        self.pair_ref(pair).get()
    }

    pub fn set16(&mut self, pair: Pair, value: u16) {
        self.pair_mut(pair).set(value);
    }

    pub fn high(&self, pair: Pair) -> u8 {
        self.pair_ref(pair).high()
    }

    pub fn low(&self, pair: Pair) -> u8 {
        self.pair_ref(pair).low()
    }

    pub fn set_high(&mut self, pair: Pair, value: u8) {
        self.pair_mut(pair).set_high(value);
    }

    pub fn set_low(&mut self, pair: Pair, value: u8) {
        self.pair_mut(pair).set_low(value);
    }

    pub fn a(&self) -> u8 {
        self.psw.high()
    }

    pub fn set_a(&mut self, value: u8) {
        self.psw.set_high(value);
    }

    pub fn flags(&self) -> u8 {
        self.psw.low()
    }

    /// Store the flags byte. Bits 1, 3 and 5 are not flags and are dropped.
    pub fn set_flags(&mut self, value: u8) {
        self.psw.set_low(value & FLAG_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [Pair; 4] = [Pair::Bc, Pair::De, Pair::Hl, Pair::Psw];

    #[test]
    fn set16_splits_into_halves() {
        let mut regs = Registers::default();
        for (i, pair) in PAIRS.into_iter().enumerate() {
            let value = 0x1234u16.wrapping_mul(i as u16 + 3);
            regs.set16(pair, value);
            assert_eq!(regs.get16(pair), value);
            assert_eq!(regs.high(pair), (value >> 8) as u8);
            assert_eq!(regs.low(pair), value as u8);
        }
    }

    #[test]
    fn half_writes_leave_other_half_alone() {
        let mut pair = RegisterPair::new(0xABCD);
        pair.set_high(0x12);
        assert_eq!(pair.get(), 0x12CD);
        pair.set_low(0x34);
        assert_eq!(pair.get(), 0x1234);
    }

    #[test]
    fn halves_compose_the_pair() {
        let mut regs = Registers::default();
        regs.set_high(Pair::De, 0xBE);
        regs.set_low(Pair::De, 0xEF);
        assert_eq!(regs.get16(Pair::De), 0xBEEF);
        assert_eq!(regs.get16(Pair::Bc), 0);
        assert_eq!(regs.get16(Pair::Hl), 0);
    }

    #[test]
    fn accumulator_and_flags_share_psw() {
        let mut regs = Registers::default();
        regs.set_a(0x42);
        regs.set_flags(0xD5);
        assert_eq!(regs.get16(Pair::Psw), 0x42D5);
        regs.set16(Pair::Psw, 0x1001);
        assert_eq!(regs.a(), 0x10);
        assert_eq!(regs.flags(), 0x01);
    }

    #[test]
    fn set_flags_drops_unused_bits() {
        let mut regs = Registers::default();
        regs.set_flags(0xFF);
        assert_eq!(regs.flags(), FLAG_MASK);
        regs.set_flags(0x2A);
        assert_eq!(regs.flags(), 0x00);
    }
}

use super::{Cpu, Flag};

/// The eight shift/rotate operations of the CB table, in encoding order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Shift {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl Shift {
    pub(super) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Shift::Rlc,
            1 => Shift::Rrc,
            2 => Shift::Rl,
            3 => Shift::Rr,
            4 => Shift::Sla,
            5 => Shift::Sra,
            6 => Shift::Swap,
            _ => Shift::Srl,
        }
    }
}

impl Cpu {
    /// Replace all four flags at once.
    #[inline]
    pub(super) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = (u8::from(z) << Flag::Z as u8)
            | (u8::from(n) << Flag::N as u8)
            | (u8::from(h) << Flag::H as u8)
            | (u8::from(c) << Flag::C as u8);
    }

    #[inline]
    fn carry_bit(&self, use_carry: bool) -> u8 {
        u8::from(use_carry && self.get_flag(Flag::C))
    }

    /// ADD (`use_carry == false`) or ADC into A.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry = self.carry_bit(use_carry);
        let wide = a as u16 + value as u16 + carry as u16;
        let result = wide as u8;

        self.set_flags(
            result == 0,
            false,
            (a & 0x0F) + (value & 0x0F) + carry > 0x0F,
            wide > 0xFF,
        );
        self.regs.a = result;
    }

    /// `A - value (- carry)` with flags; A is only written when `store`.
    fn sub_with(&mut self, value: u8, use_carry: bool, store: bool) {
        let a = self.regs.a;
        let carry = self.carry_bit(use_carry);
        let result = a.wrapping_sub(value).wrapping_sub(carry);

        self.set_flags(
            result == 0,
            true,
            (a & 0x0F) < (value & 0x0F) + carry,
            (a as u16) < value as u16 + carry as u16,
        );
        if store {
            self.regs.a = result;
        }
    }

    /// SUB (`use_carry == false`) or SBC from A.
    #[inline]
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        self.sub_with(value, use_carry, true);
    }

    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_with(value, false, false);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_flags(self.regs.a == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    /// Dispatch one of the eight accumulator operations by its 3-bit
    /// encoding: ADD ADC SUB SBC AND XOR OR CP.
    pub(super) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// Hardware DAA: the correction is chosen from N, H, C and the value of
    /// A. N is preserved.
    pub(super) fn alu_daa(&mut self) {
        let subtract = self.get_flag(Flag::N);
        let mut carry = self.get_flag(Flag::C);
        let mut correction = 0u8;

        if self.get_flag(Flag::H) || (!subtract && (self.regs.a & 0x0F) > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && self.regs.a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        self.regs.a = if subtract {
            self.regs.a.wrapping_sub(correction)
        } else {
            self.regs.a.wrapping_add(correction)
        };
        self.set_flags(self.regs.a == 0, subtract, false, carry);
    }

    /// INC r: C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, value & 0x0F == 0x0F);
        result
    }

    /// DEC r: C is untouched.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, value & 0x0F == 0);
        result
    }

    /// ADD HL,rr: carries out of bit 11 and bit 15, Z untouched.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// `base + (offset as i8)` as used by ADD SP,r8 and LD HL,SP+r8.
    ///
    /// H and C come from the unsigned low-byte addition; Z and N are cleared.
    pub(super) fn alu_add16_signed(&mut self, base: u16, offset: u8) -> u16 {
        let low = base as u8;
        self.set_flags(
            false,
            false,
            (low & 0x0F) + (offset & 0x0F) > 0x0F,
            low.checked_add(offset).is_none(),
        );
        base.wrapping_add(offset as i8 as u16)
    }

    /// Shift or rotate `value`, moving the bit shifted out into C.
    ///
    /// N and H are cleared and Z follows the result.
    pub(super) fn alu_shift(&mut self, op: Shift, value: u8) -> u8 {
        let carry_in = u8::from(self.get_flag(Flag::C));
        let (result, carry) = match op {
            Shift::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Shift::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Shift::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            Shift::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            Shift::Sla => (value << 1, value & 0x80 != 0),
            Shift::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Shift::Swap => (value.rotate_left(4), false),
            Shift::Srl => (value >> 1, value & 0x01 != 0),
        };
        self.set_flags(result == 0, false, false, carry);
        result
    }

    /// BIT n: Z is the complement of the tested bit, C untouched.
    pub(super) fn alu_bit(&mut self, bit: u8, value: u8) {
        self.set_flag(Flag::Z, value & (1 << bit) == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, true);
    }
}

use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// JR r8 (0x18) and JR cc,r8. The displacement is relative to the
    /// address after the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let offset = self.fetch8(bus) as i8;
        if opcode == 0x18 || self.cc_condition(opcode >> 3) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
        }
    }

    /// JP a16 (0xC3) and JP cc,a16.
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let target = self.fetch16(bus);
        if opcode == 0xC3 || self.cc_condition(opcode >> 3) {
            self.regs.pc = target;
        }
    }

    /// CALL a16 (0xCD) and CALL cc,a16.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let target = self.fetch16(bus);
        if opcode == 0xCD || self.cc_condition(opcode >> 3) {
            self.call(bus, target);
        }
    }

    /// RET (0xC9) and RET cc.
    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        if opcode == 0xC9 || self.cc_condition(opcode >> 3) {
            self.regs.pc = self.pop_u16(bus);
        }
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.ime = true;
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        self.call(bus, (opcode & 0x38) as u16);
    }
}

use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// The PUSH/POP pair encoding swaps SP for AF.
    fn read_rp2(&self, index: u8) -> u16 {
        match index & 0x03 {
            3 => self.regs.af(),
            rp => self.read_rp(rp),
        }
    }

    pub(super) fn exec_push_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));
        let value = self.read_rp2(opcode >> 4);
        self.push_u16(bus, value);
    }

    pub(super) fn exec_pop_rr<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));
        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_af(value),
            rp => self.write_rp(rp, value),
        }
    }
}

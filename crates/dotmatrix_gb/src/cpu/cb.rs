use super::alu::Shift;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute the effect of a `0xCB`-prefixed opcode.
    ///
    /// `cb` is the byte after the prefix. Every one of the 256 encodings is
    /// defined: x selects shift/BIT/RES/SET, y the operation or bit, z the
    /// operand.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B, cb: u8) {
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let value = self.read_reg8(bus, z);

        match cb >> 6 {
            0 => {
                let result = self.alu_shift(Shift::from_index(y), value);
                self.write_reg8(bus, z, result);
            }
            1 => self.alu_bit(y, value),
            2 => self.write_reg8(bus, z, value & !(1 << y)),
            _ => self.write_reg8(bus, z, value | (1 << y)),
        }
    }
}

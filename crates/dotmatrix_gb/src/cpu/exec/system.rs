use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// STOP is two bytes long; the padding byte is consumed and ignored.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        let _padding = self.fetch8(bus);
        self.stopped = true;
        log::debug!("STOP at 0x{:04X}", self.prev_pc);
    }
}

use super::{Cpu, Registers};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// A CPU in the state the DMG boot ROM leaves behind at `0x0100`.
    pub fn new() -> Self {
        let mut cpu = Self::blank();
        cpu.apply_post_boot_state();
        cpu
    }

    /// A CPU that starts executing a boot ROM overlay at `0x0000`.
    ///
    /// The bus is told to unmap the overlay when PC first reaches `0x0100`.
    pub fn with_boot_rom() -> Self {
        let mut cpu = Self::blank();
        cpu.boot_rom_active = true;
        cpu
    }

    fn blank() -> Self {
        Self {
            regs: Registers::default(),
            ime: false,
            halted: false,
            stopped: false,
            break_next_step: false,
            break_hit: false,
            boot_rom_active: false,
            prev_pc: 0,
            clock: 0,
            trace: None,
        }
    }

    /// Return to the post-boot state. The trace setting survives, its
    /// contents do not.
    pub fn reset(&mut self) {
        let tracing = self.trace.is_some();
        *self = Self::new();
        self.set_trace(tracing);
    }

    /// Whether a boot overlay is still expected to be mapped.
    #[inline]
    pub fn boot_rom_active(&self) -> bool {
        self.boot_rom_active
    }

    fn apply_post_boot_state(&mut self) {
        self.regs = Registers {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        };
    }
}

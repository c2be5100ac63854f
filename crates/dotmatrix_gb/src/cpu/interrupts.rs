use bitflags::bitflags;

use super::{Bus, Cpu};

/// Interrupt request flags (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Interrupt enable mask (IE).
pub const IE_ADDR: u16 = 0xFFFF;

/// Cycles charged for dispatching an interrupt.
const DISPATCH_CYCLES: u32 = 5;

bitflags! {
    /// Bit layout shared by IF and IE.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Interrupt sources in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::LcdStat => InterruptFlags::LCD_STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Handler address: 0x40, 0x48, 0x50, 0x58, 0x60.
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self as u16
    }
}

impl Cpu {
    /// Post an interrupt request. Control is not transferred here.
    ///
    /// Only the source's bit changes; the unused upper bits of IF keep
    /// whatever the program or the boot state left there.
    pub fn request_interrupt<B: Bus>(&mut self, bus: &mut B, source: Interrupt) {
        let flags = bus.read8(IF_ADDR) | source.flag().bits();
        bus.write8(IF_ADDR, flags);
    }

    /// Service at most one pending and enabled interrupt.
    ///
    /// Any pending and enabled request wakes a halted CPU, even with IME
    /// clear. With IME set the highest-priority source is acknowledged in
    /// IF, PC is pushed and replaced by the vector, and IME is cleared.
    /// Returns the cycles spent (0 when nothing was dispatched).
    pub fn execute_interrupts<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let requested = InterruptFlags::from_bits_truncate(bus.read8(IF_ADDR));
        let enabled = InterruptFlags::from_bits_truncate(bus.read8(IE_ADDR));
        let pending = requested & enabled;
        if pending.is_empty() {
            return 0;
        }

        self.halted = false;
        if !self.ime {
            return 0;
        }

        let Some(source) = Interrupt::ALL
            .into_iter()
            .find(|source| pending.contains(source.flag()))
        else {
            return 0;
        };

        log::debug!(
            "interrupt {source:?}: PC=0x{pc:04X} -> 0x{vector:04X} IF={requested:?} IE={enabled:?}",
            pc = self.regs.pc,
            vector = source.vector(),
        );

        let raw = bus.read8(IF_ADDR);
        bus.write8(IF_ADDR, raw & !source.flag().bits());
        self.ime = false;
        self.call(bus, source.vector());
        self.clock = self.clock.wrapping_add(DISPATCH_CYCLES as u64);
        DISPATCH_CYCLES
    }
}

mod alu;
mod cb;
mod debug;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod opcodes;
mod regs;

use std::collections::BTreeMap;

pub use debug::disassemble;
pub use interrupts::{Interrupt, InterruptFlags, IE_ADDR, IF_ADDR};
pub use opcodes::{OpcodeInfo, CB_INSTRUCTIONS, INSTRUCTIONS};
pub use regs::{Flag, Register, Registers};

use crate::Result;

/// Abstraction over the DMG bus (memory and IO).
///
/// The CPU never touches memory any other way. Tests drive the core with a
/// flat 64 KiB array; the machine uses [`crate::Mmu`].
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Called once, the first time execution reaches `0x0100` while a boot
    /// ROM is mapped over the start of bank 0.
    ///
    /// Buses without a boot overlay can ignore it.
    fn unmap_boot_rom(&mut self) {}
}

/// The DMG CPU core (LR35902).
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable.
    pub ime: bool,
    /// Set by HALT; cleared when an enabled interrupt becomes pending.
    pub halted: bool,
    stopped: bool,
    /// External single-step request, consumed by the next `step`.
    break_next_step: bool,
    /// Latched when a step honoured `break_next_step`; read by `take_break`.
    break_hit: bool,
    boot_rom_active: bool,
    /// Address of the instruction executed by the last `step`.
    prev_pc: u16,
    /// Total cycles charged since reset.
    clock: u64,
    trace: Option<BTreeMap<u16, String>>,
}

impl Cpu {
    /// Execute one instruction and return the number of cycles it took.
    ///
    /// A halted CPU does not fetch and reports 0 cycles until
    /// `execute_interrupts` wakes it. Reaching an opcode hole is fatal and
    /// reported as [`crate::Error::IllegalInstruction`].
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let cycles = if self.halted {
            0
        } else {
            self.prev_pc = self.regs.pc;
            if self.trace.is_some() {
                self.record_trace(bus, self.prev_pc);
            }

            let opcode = self.fetch8(bus);
            let cycles = self.exec_opcode(bus, opcode)?;
            self.clock = self.clock.wrapping_add(cycles as u64);

            if self.boot_rom_active && self.regs.pc == 0x0100 {
                self.boot_rom_active = false;
                bus.unmap_boot_rom();
            }
            cycles
        };

        if self.break_next_step {
            self.break_next_step = false;
            self.break_hit = true;
        }

        Ok(cycles)
    }

    /// Ask the driving loop to stop after the next `step`.
    pub fn request_break(&mut self) {
        self.break_next_step = true;
    }

    /// Returns `true` once after a step that honoured `request_break`.
    pub fn take_break(&mut self) -> bool {
        std::mem::take(&mut self.break_hit)
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Address of the most recently executed instruction.
    #[inline]
    pub fn prev_pc(&self) -> u16 {
        self.prev_pc
    }

    /// Total cycles charged by instructions and interrupt dispatch.
    #[inline]
    pub fn clock(&self) -> u64 {
        self.clock
    }

    /// Wall-clock duration of one cycle in milliseconds.
    pub fn ms_per_cycle() -> f64 {
        1000.0 / crate::CPU_FREQUENCY_HZ
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }
}

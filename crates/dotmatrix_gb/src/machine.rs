mod cartridge;
mod gameboy;
mod mmu;
mod video;

pub use crate::cpu::Interrupt;
pub use cartridge::{
    ram_bank_count, rom_bank_count, Cartridge, CartridgeHeader, CartridgeKind, RAM_BANK_SIZE,
    ROM_BANK_SIZE,
};
pub use gameboy::{GameBoy, GameBoyConfig};
pub use mmu::{BankingMode, Mmu, RawMemory, ReadHook, WriteHook, BOOT_ROM_SIZE};
pub use video::{FrameHook, LcdMode, RenderMode, Video, FRAME_CYCLES};

#[cfg(test)]
mod tests;

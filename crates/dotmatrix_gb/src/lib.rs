pub mod cpu;
mod error;
pub mod machine;

pub use cpu::{Bus, Cpu, Flag, Register, Registers};
pub use error::{Error, Result};
pub use machine::{
    Cartridge, CartridgeHeader, CartridgeKind, GameBoy, GameBoyConfig, Interrupt, LcdMode, Mmu,
    RawMemory, RenderMode, Video,
};

pub use dotmatrix_common::Color;

/// Logical screen width in pixels for the DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Master clock of the DMG in Hz.
pub const CPU_FREQUENCY_HZ: f64 = 4_194_304.0;

mod banking;
mod hooks;

use std::fmt;

pub use banking::BankingMode;
pub use hooks::{ReadHook, WriteHook};

use banking::Banking;
use hooks::HookRegistry;

use super::cartridge::{Cartridge, CartridgeKind, RAM_BANK_SIZE, ROM_BANK_SIZE};
use crate::cpu::Bus;
use crate::{Error, Result};

/// Total addressable memory (64 KiB).
const MEMORY_SIZE: usize = 0x10000;
pub const BOOT_ROM_SIZE: usize = 0x100;

/// Map an echo RAM address onto the work RAM byte it mirrors.
#[inline]
fn backing_index(addr: u16) -> usize {
    match addr {
        0xE000..=0xFDFF => (addr - 0x2000) as usize,
        _ => addr as usize,
    }
}

/// Flat access to the 64 KiB backing store.
///
/// No bank redirection and no hooks; only the echo mirror is applied. Write
/// hooks receive one of these so they can touch other bytes without going
/// back through the bus.
pub struct RawMemory<'a> {
    memory: &'a mut [u8],
}

impl<'a> RawMemory<'a> {
    fn new(memory: &'a mut [u8]) -> Self {
        Self { memory }
    }

    #[inline]
    pub fn read8(&self, addr: u16) -> u8 {
        self.memory[backing_index(addr)]
    }

    #[inline]
    pub fn write8(&mut self, addr: u16, value: u8) {
        self.memory[backing_index(addr)] = value;
    }

    pub fn read16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read8(addr), self.read8(addr.wrapping_add(1))])
    }

    pub fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }
}

/// The DMG address bus: flat memory, cartridge banking, the boot overlay and
/// per-address hooks.
pub struct Mmu {
    memory: Box<[u8]>,
    cartridge: Option<Cartridge>,
    banking: Banking,
    external_ram: Vec<u8>,
    boot_rom: Option<Box<[u8]>>,
    hooks: HookRegistry,
}

impl Default for Mmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Mmu {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            cartridge: None,
            banking: Banking::default(),
            external_ram: Vec::new(),
            boot_rom: None,
            hooks: HookRegistry::default(),
        }
    }

    /// Copy the fixed 32 KiB of the cartridge into memory and size the
    /// banking state and external RAM from its header.
    pub fn load_cartridge(&mut self, cartridge: Cartridge) {
        let rom = cartridge.bytes();
        let len = rom.len().min(2 * ROM_BANK_SIZE);
        self.memory[..len].copy_from_slice(&rom[..len]);

        let header = cartridge.header();
        let ram_banks = match header.kind {
            CartridgeKind::Simple => header.ram_banks,
            CartridgeKind::None => 0,
        };
        self.banking = Banking::new(header.rom_banks, ram_banks);
        self.external_ram = vec![0; ram_banks * RAM_BANK_SIZE];

        log::info!(
            "loaded cartridge '{}' type=0x{:02X} ({:?}) rom_banks={} ram_banks={}",
            header.title,
            header.cartridge_type,
            header.kind,
            header.rom_banks,
            ram_banks
        );
        self.cartridge = Some(cartridge);
    }

    #[inline]
    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    fn has_controller(&self) -> bool {
        self.cartridge
            .as_ref()
            .is_some_and(|cart| cart.kind() == CartridgeKind::Simple)
    }

    /// Map a 256-byte boot ROM over `0x0000-0x00FF`.
    pub fn load_boot_rom(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != BOOT_ROM_SIZE {
            return Err(Error::InvalidBootRom { len: bytes.len() });
        }
        self.boot_rom = Some(bytes.into());
        Ok(())
    }

    #[inline]
    pub fn boot_rom_mapped(&self) -> bool {
        self.boot_rom.is_some()
    }

    /// Set the DMG I/O registers the boot ROM leaves behind, for sessions
    /// that start at `0x0100` without one.
    pub fn apply_post_boot_io(&mut self) {
        const IO: [(u16, u8); 12] = [
            (0xFF05, 0x00),
            (0xFF06, 0x00),
            (0xFF07, 0x00),
            (0xFF0F, 0xE1),
            (0xFF40, 0x91),
            (0xFF42, 0x00),
            (0xFF43, 0x00),
            (0xFF45, 0x00),
            (0xFF47, 0xFC),
            (0xFF48, 0xFF),
            (0xFF49, 0xFF),
            (0xFFFF, 0x00),
        ];
        for (addr, value) in IO {
            self.raw_write8(addr, value);
        }
    }

    #[inline]
    pub fn rom_bank(&self) -> usize {
        self.banking.rom_bank
    }

    #[inline]
    pub fn ram_bank(&self) -> usize {
        self.banking.ram_bank
    }

    #[inline]
    pub fn ram_enabled(&self) -> bool {
        self.banking.ram_enabled
    }

    #[inline]
    pub fn banking_mode(&self) -> BankingMode {
        self.banking.mode
    }

    /// Point the switchable ROM window at `bank`, wrapped to the bank count.
    pub fn set_rom_bank(&mut self, bank: usize) {
        self.banking.set_rom_bank(bank);
    }

    /// Select external RAM bank `bank`, wrapped to the bank count.
    pub fn set_ram_bank(&mut self, bank: usize) {
        self.banking.set_ram_bank(bank);
    }

    pub fn add_read_hook<F>(&mut self, addr: u16, hook: F)
    where
        F: FnMut(u16, u8) + 'static,
    {
        self.hooks.add_read(addr, Box::new(hook));
    }

    pub fn add_write_hook<F>(&mut self, addr: u16, hook: F)
    where
        F: FnMut(&mut RawMemory<'_>, u16, u8) + 'static,
    {
        self.hooks.add_write(addr, Box::new(hook));
    }

    #[inline]
    pub fn raw(&mut self) -> RawMemory<'_> {
        RawMemory::new(&mut self.memory)
    }

    #[inline]
    pub fn raw_read8(&self, addr: u16) -> u8 {
        self.memory[backing_index(addr)]
    }

    #[inline]
    pub fn raw_write8(&mut self, addr: u16, value: u8) {
        self.memory[backing_index(addr)] = value;
    }

    pub fn raw_read16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.raw_read8(addr), self.raw_read8(addr.wrapping_add(1))])
    }

    pub fn raw_write16(&mut self, addr: u16, value: u16) {
        self.raw().write16(addr, value);
    }

    fn external_ram_index(&self, addr: u16) -> usize {
        self.banking.ram_bank * RAM_BANK_SIZE + (addr as usize - 0xA000)
    }

    fn read_storage(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x00FF if self.boot_rom.is_some() => self
                .boot_rom
                .as_ref()
                .map_or(0xFF, |boot| boot[addr as usize]),
            0x4000..=0x7FFF if self.has_controller() => self
                .cartridge
                .as_ref()
                .map_or(0xFF, |cart| cart.read_bank(self.banking.rom_bank, addr)),
            0xA000..=0xBFFF if !self.external_ram.is_empty() => {
                if self.banking.ram_enabled {
                    self.external_ram[self.external_ram_index(addr)]
                } else {
                    0xFF
                }
            }
            _ => self.memory[backing_index(addr)],
        }
    }

    fn write_storage(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => {
                if self.has_controller() {
                    self.banking.write_control(addr, value);
                } else {
                    log::trace!("ignored ROM write 0x{addr:04X}=0x{value:02X}");
                }
            }
            0xA000..=0xBFFF if !self.external_ram.is_empty() => {
                if self.banking.ram_enabled {
                    let index = self.external_ram_index(addr);
                    self.external_ram[index] = value;
                }
            }
            _ => self.memory[backing_index(addr)] = value,
        }
    }
}

impl Bus for Mmu {
    fn read8(&mut self, addr: u16) -> u8 {
        let value = self.read_storage(addr);
        self.hooks.fire_read(addr, value);
        value
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write_storage(addr, value);
        let mut raw = RawMemory::new(&mut self.memory);
        self.hooks.fire_write(&mut raw, addr, value);
    }

    fn unmap_boot_rom(&mut self) {
        if self.boot_rom.take().is_some() {
            log::info!("boot ROM unmapped");
        }
    }
}

impl fmt::Debug for Mmu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (read_hooks, write_hooks) = self.hooks.len();
        f.debug_struct("Mmu")
            .field("cartridge", &self.cartridge)
            .field("banking", &self.banking)
            .field("external_ram", &self.external_ram.len())
            .field("boot_rom", &self.boot_rom.is_some())
            .field("read_hooks", &read_hooks)
            .field("write_hooks", &write_hooks)
            .finish()
    }
}

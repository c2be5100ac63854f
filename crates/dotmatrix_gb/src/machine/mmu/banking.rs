/// What the `0x4000-0x5FFF` register drives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BankingMode {
    /// Upper two bits extend the ROM bank number.
    #[default]
    Rom,
    /// Upper two bits select the external RAM bank.
    Ram,
}

/// MBC1-style bank registers and the effective banks derived from them.
#[derive(Clone, Debug)]
pub(super) struct Banking {
    rom_banks: usize,
    ram_banks: usize,
    /// Value of the `0x2000-0x3FFF` register, as wide as the bank count needs.
    rom_select: usize,
    upper2: u8,
    pub(super) mode: BankingMode,
    pub(super) ram_enabled: bool,
    pub(super) rom_bank: usize,
    pub(super) ram_bank: usize,
}

impl Default for Banking {
    fn default() -> Self {
        Self::new(2, 0)
    }
}

/// Mask `bank` to the bits the bank count needs, then wrap into range.
fn wrap(bank: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (bank & (count.next_power_of_two() - 1)) % count
}

/// Bits of the ROM bank register that select a bank for `count` banks.
fn rom_select_mask(count: usize) -> usize {
    count.max(1).next_power_of_two() - 1
}

impl Banking {
    pub(super) fn new(rom_banks: usize, ram_banks: usize) -> Self {
        let mut banking = Self {
            rom_banks,
            ram_banks,
            rom_select: 1,
            upper2: 0,
            mode: BankingMode::Rom,
            ram_enabled: false,
            rom_bank: 1,
            ram_bank: 0,
        };
        banking.recompute();
        banking
    }

    /// Interpret a write into `0x0000-0x7FFF`.
    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_select = match value {
                    0 => 1,
                    bits => bits as usize & rom_select_mask(self.rom_banks),
                };
            }
            0x4000..=0x5FFF => self.upper2 = value & 0x03,
            _ => {
                self.mode = if value & 0x01 == 0 {
                    BankingMode::Rom
                } else {
                    BankingMode::Ram
                };
            }
        }
        self.recompute();
        log::trace!(
            "bank control 0x{addr:04X}=0x{value:02X}: rom={} ram={} enabled={} mode={:?}",
            self.rom_bank,
            self.ram_bank,
            self.ram_enabled,
            self.mode
        );
    }

    fn recompute(&mut self) {
        let (rom, ram) = match self.mode {
            BankingMode::Rom => (self.rom_select | (self.upper2 as usize) << 5, 0),
            BankingMode::Ram => (self.rom_select, self.upper2 as usize),
        };
        self.rom_bank = wrap(rom, self.rom_banks);
        self.ram_bank = wrap(ram, self.ram_banks);
    }

    pub(super) fn set_rom_bank(&mut self, bank: usize) {
        self.rom_bank = wrap(bank, self.rom_banks);
    }

    pub(super) fn set_ram_bank(&mut self, bank: usize) {
        self.ram_bank = wrap(bank, self.ram_banks);
    }
}

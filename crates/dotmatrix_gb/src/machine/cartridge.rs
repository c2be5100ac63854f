use std::fmt;

use crate::{Error, Result};

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

const TITLE_START: usize = 0x0134;
const TITLE_LEN: usize = 11;
const TYPE_ADDR: usize = 0x0147;
const ROM_SIZE_ADDR: usize = 0x0148;
const RAM_SIZE_ADDR: usize = 0x0149;
const HEADER_END: usize = 0x0150;

/// Bank controller behaviour selected by the cartridge type byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CartridgeKind {
    /// 32 KiB ROM, writes to the ROM area are ignored.
    #[default]
    None,
    /// MBC1-style ROM/RAM banking (types 0x01-0x03).
    Simple,
}

impl CartridgeKind {
    fn from_type_byte(value: u8) -> Self {
        match value {
            0x00 => CartridgeKind::None,
            0x01..=0x03 => CartridgeKind::Simple,
            other => {
                log::warn!(
                    "cartridge type 0x{other:02X} is not supported, running without a bank controller"
                );
                CartridgeKind::None
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartridgeHeader {
    pub title: String,
    pub cartridge_type: u8,
    pub kind: CartridgeKind,
    pub rom_size_code: u8,
    pub ram_size_code: u8,
    pub rom_banks: usize,
    pub ram_banks: usize,
}

impl CartridgeHeader {
    /// Parse the header of a ROM image. Needs at least `0x150` bytes.
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::CartridgeTooSmall { len: rom.len() });
        }

        let title_bytes = &rom[TITLE_START..TITLE_START + TITLE_LEN];
        let title = String::from_utf8_lossy(title_bytes)
            .trim_matches(|c: char| c == '\0' || c == ' ')
            .to_string();

        let cartridge_type = rom[TYPE_ADDR];
        let rom_size_code = rom[ROM_SIZE_ADDR];
        let ram_size_code = rom[RAM_SIZE_ADDR];

        Ok(Self {
            title,
            cartridge_type,
            kind: CartridgeKind::from_type_byte(cartridge_type),
            rom_size_code,
            ram_size_code,
            rom_banks: rom_bank_count(rom_size_code)?,
            ram_banks: ram_bank_count(ram_size_code),
        })
    }
}

/// Number of 16 KiB ROM banks declared by a ROM size code.
pub fn rom_bank_count(code: u8) -> Result<usize> {
    match code {
        0x00..=0x06 => Ok(2 << code),
        0x52 => Ok(72),
        0x53 => Ok(80),
        0x54 => Ok(96),
        other => Err(Error::UnknownRomSize(other)),
    }
}

/// Number of 8 KiB external RAM banks declared by a RAM size code.
///
/// The 2 KiB size (code 1) is rounded up to one full bank. Unknown codes
/// mean no RAM.
pub fn ram_bank_count(code: u8) -> usize {
    match code {
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}

/// An immutable ROM image plus its parsed header.
#[derive(Clone)]
pub struct Cartridge {
    rom: Vec<u8>,
    header: CartridgeHeader,
}

impl Cartridge {
    /// Validate and wrap a ROM image.
    ///
    /// Fails when the header is missing, the size code is unknown, or the
    /// image is shorter than the declared ROM size.
    pub fn from_bytes(rom: Vec<u8>) -> Result<Self> {
        let header = CartridgeHeader::parse(&rom)?;
        let declared = header.rom_banks * ROM_BANK_SIZE;
        if rom.len() < declared {
            return Err(Error::CartridgeTruncated {
                declared,
                actual: rom.len(),
            });
        }

        Ok(Self { rom, header })
    }

    #[inline]
    pub fn header(&self) -> &CartridgeHeader {
        &self.header
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.header.title
    }

    #[inline]
    pub fn kind(&self) -> CartridgeKind {
        self.header.kind
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.rom
    }

    /// Byte at `offset` into the image; `0xFF` past the end.
    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        self.rom.get(offset).copied().unwrap_or(0xFF)
    }

    /// Byte `offset` into ROM bank `bank`.
    #[inline]
    pub fn read_bank(&self, bank: usize, offset: u16) -> u8 {
        self.read(bank * ROM_BANK_SIZE + (offset as usize & (ROM_BANK_SIZE - 1)))
    }
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("header", &self.header)
            .field("len", &self.rom.len())
            .finish()
    }
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the emulator core.
///
/// Only the cartridge and boot ROM variants come from caller input; an
/// `IllegalInstruction` means the running program reached an opcode hole and
/// the session cannot continue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `opcode` carries the `0xCB` prefix in its high byte for extended
    /// opcodes.
    #[error("illegal instruction 0x{opcode:02X} at 0x{pc:04X}")]
    IllegalInstruction { opcode: u16, pc: u16 },
    #[error("cartridge image is {len} bytes, too small to hold a header")]
    CartridgeTooSmall { len: usize },
    #[error("cartridge declares {declared} bytes of ROM but the image has {actual}")]
    CartridgeTruncated { declared: usize, actual: usize },
    #[error("unknown ROM size code 0x{0:02X}")]
    UnknownRomSize(u8),
    #[error("boot ROM must be 256 bytes, got {len}")]
    InvalidBootRom { len: usize },
    #[error("no opcode named '{0}'")]
    UnknownMnemonic(String),
    #[error("no register named '{0}'")]
    UnknownRegister(String),
}

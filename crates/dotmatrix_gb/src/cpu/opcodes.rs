use lazy_static::lazy_static;

/// Static description of one opcode: how it disassembles, how many bytes it
/// occupies and how many cycles it is charged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// Operand placeholders: `d8`, `a8`, `r8` (one byte), `d16`, `a16` (two).
    pub mnemonic: String,
    pub length: u8,
    pub cycles: u32,
    /// `false` for the opcode holes.
    pub defined: bool,
}

impl OpcodeInfo {
    fn new(mnemonic: impl Into<String>, length: u8, cycles: u32) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            length,
            cycles,
            defined: true,
        }
    }

    fn illegal(opcode: u8) -> Self {
        Self {
            mnemonic: format!("ILLEGAL_{opcode:02X}"),
            length: 1,
            cycles: 0,
            defined: false,
        }
    }
}

const R8: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const RP: [&str; 4] = ["BC", "DE", "HL", "SP"];
const RP2: [&str; 4] = ["BC", "DE", "HL", "AF"];
const CC: [&str; 4] = ["NZ", "Z", "NC", "C"];
const ALU: [&str; 8] = ["ADD A,", "ADC A,", "SUB ", "SBC A,", "AND ", "XOR ", "OR ", "CP "];
const ROT_A: [&str; 8] = ["RLCA", "RRCA", "RLA", "RRA", "DAA", "CPL", "SCF", "CCF"];
const CB_ROT: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SWAP", "SRL"];

lazy_static! {
    /// Unprefixed opcodes, indexed by opcode byte.
    pub static ref INSTRUCTIONS: Vec<OpcodeInfo> = (0..=0xFFu8).map(primary).collect();
    /// `0xCB`-prefixed opcodes, indexed by the second byte.
    pub static ref CB_INSTRUCTIONS: Vec<OpcodeInfo> = (0..=0xFFu8).map(extended).collect();
}

fn primary(opcode: u8) -> OpcodeInfo {
    let x = opcode >> 6;
    let y = ((opcode >> 3) & 0x07) as usize;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 1;

    match (x, z) {
        (0, 0) => match y {
            0 => OpcodeInfo::new("NOP", 1, 4),
            1 => OpcodeInfo::new("LD (a16),SP", 3, 20),
            2 => OpcodeInfo::new("STOP", 2, 4),
            3 => OpcodeInfo::new("JR r8", 2, 8),
            _ => OpcodeInfo::new(format!("JR {},r8", CC[y - 4]), 2, 8),
        },
        (0, 1) if q == 0 => OpcodeInfo::new(format!("LD {},d16", RP[p]), 3, 12),
        (0, 1) => OpcodeInfo::new(format!("ADD HL,{}", RP[p]), 1, 8),
        (0, 2) => {
            let target = ["(BC)", "(DE)", "(HL+)", "(HL-)"][p];
            if q == 0 {
                OpcodeInfo::new(format!("LD {target},A"), 1, 8)
            } else {
                OpcodeInfo::new(format!("LD A,{target}"), 1, 8)
            }
        }
        (0, 3) if q == 0 => OpcodeInfo::new(format!("INC {}", RP[p]), 1, 8),
        (0, 3) => OpcodeInfo::new(format!("DEC {}", RP[p]), 1, 4),
        (0, 4) => OpcodeInfo::new(format!("INC {}", R8[y]), 1, if y == 6 { 12 } else { 4 }),
        (0, 5) => OpcodeInfo::new(format!("DEC {}", R8[y]), 1, if y == 6 { 12 } else { 4 }),
        (0, 6) => OpcodeInfo::new(format!("LD {},d8", R8[y]), 2, 8),
        (0, 7) => OpcodeInfo::new(ROT_A[y], 1, 4),
        (1, _) if opcode == 0x76 => OpcodeInfo::new("HALT", 1, 4),
        (1, _) => {
            let cycles = if y == 6 || z == 6 { 8 } else { 4 };
            OpcodeInfo::new(format!("LD {},{}", R8[y], R8[z as usize]), 1, cycles)
        }
        (2, _) => {
            let cycles = if z == 6 { 8 } else { 4 };
            OpcodeInfo::new(format!("{}{}", ALU[y], R8[z as usize]), 1, cycles)
        }
        (3, 0) => match y {
            0..=3 => OpcodeInfo::new(format!("RET {}", CC[y]), 1, 8),
            4 => OpcodeInfo::new("LDH (a8),A", 2, 12),
            5 => OpcodeInfo::new("ADD SP,r8", 2, 16),
            6 => OpcodeInfo::new("LDH A,(a8)", 2, 12),
            _ => OpcodeInfo::new("LD HL,SP+r8", 2, 12),
        },
        (3, 1) if q == 0 => OpcodeInfo::new(format!("POP {}", RP2[p]), 1, 12),
        (3, 1) => match p {
            0 => OpcodeInfo::new("RET", 1, 8),
            1 => OpcodeInfo::new("RETI", 1, 8),
            2 => OpcodeInfo::new("JP (HL)", 1, 4),
            _ => OpcodeInfo::new("LD SP,HL", 1, 8),
        },
        (3, 2) => match y {
            0..=3 => OpcodeInfo::new(format!("JP {},a16", CC[y]), 3, 12),
            4 => OpcodeInfo::new("LD (C),A", 1, 8),
            5 => OpcodeInfo::new("LD (a16),A", 3, 16),
            6 => OpcodeInfo::new("LD A,(C)", 1, 8),
            _ => OpcodeInfo::new("LD A,(a16)", 3, 16),
        },
        (3, 3) => match y {
            0 => OpcodeInfo::new("JP a16", 3, 12),
            // The cost of a prefixed instruction lives in the CB table.
            1 => OpcodeInfo::new("PREFIX CB", 2, 0),
            6 => OpcodeInfo::new("DI", 1, 4),
            7 => OpcodeInfo::new("EI", 1, 4),
            _ => OpcodeInfo::illegal(opcode),
        },
        (3, 4) if y < 4 => OpcodeInfo::new(format!("CALL {},a16", CC[y]), 3, 12),
        (3, 5) if q == 0 => OpcodeInfo::new(format!("PUSH {}", RP2[p]), 1, 16),
        (3, 5) if p == 0 => OpcodeInfo::new("CALL a16", 3, 12),
        (3, 6) => OpcodeInfo::new(format!("{}d8", ALU[y]), 2, 8),
        (3, 7) => OpcodeInfo::new(format!("RST {:02X}H", y * 8), 1, 32),
        _ => OpcodeInfo::illegal(opcode),
    }
}

fn extended(opcode: u8) -> OpcodeInfo {
    let y = (opcode >> 3) & 0x07;
    let z = (opcode & 0x07) as usize;
    let cycles = if z == 6 { 16 } else { 8 };

    let mnemonic = match opcode >> 6 {
        0 => format!("{} {}", CB_ROT[y as usize], R8[z]),
        1 => format!("BIT {y},{}", R8[z]),
        2 => format!("RES {y},{}", R8[z]),
        _ => format!("SET {y},{}", R8[z]),
    };
    OpcodeInfo::new(mnemonic, 2, cycles)
}

/// Find an opcode by mnemonic, ignoring case and extra whitespace.
///
/// Returns `(prefixed, opcode)`.
pub(super) fn lookup(mnemonic: &str) -> Option<(bool, u8)> {
    let wanted = normalize(mnemonic);
    let find = |table: &[OpcodeInfo]| {
        table
            .iter()
            .position(|info| info.defined && normalize(&info.mnemonic) == wanted)
            .map(|index| index as u8)
    };

    find(&INSTRUCTIONS)
        .filter(|&opcode| opcode != 0xCB)
        .map(|opcode| (false, opcode))
        .or_else(|| find(&CB_INSTRUCTIONS).map(|opcode| (true, opcode)))
}

fn normalize(mnemonic: &str) -> String {
    mnemonic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(", ", ",")
        .replace(" ,", ",")
        .to_ascii_uppercase()
}

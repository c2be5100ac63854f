use std::collections::BTreeMap;

use super::opcodes::{self, OpcodeInfo};
use super::{Bus, Cpu, Register, CB_INSTRUCTIONS, INSTRUCTIONS};
use crate::{Error, Result};

impl Cpu {
    #[inline]
    pub fn register(&self, reg: Register) -> u16 {
        self.regs.get(reg)
    }

    #[inline]
    pub fn set_register(&mut self, reg: Register, value: u16) {
        self.regs.set(reg, value);
    }

    /// Start or stop recording a disassembly line for every executed address.
    ///
    /// Turning tracing off drops what was recorded.
    pub fn set_trace(&mut self, enabled: bool) {
        match (enabled, self.trace.is_some()) {
            (true, false) => self.trace = Some(BTreeMap::new()),
            (false, true) => self.trace = None,
            _ => {}
        }
    }

    /// Recorded trace, keyed by instruction address.
    pub fn disassembly(&self) -> Option<&BTreeMap<u16, String>> {
        self.trace.as_ref()
    }

    pub(super) fn record_trace<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        let (line, _) = disassemble(bus, addr);
        log::trace!("{addr:04X}: {line}");
        if let Some(trace) = self.trace.as_mut() {
            trace.insert(addr, line);
        }
    }

    /// Execute the instruction named `mnemonic` as if it had just been
    /// fetched at PC. Operands are read from PC onward.
    ///
    /// Accepts either table, e.g. `"xor a"` or `"swap (hl)"`.
    pub fn run_mnemonic<B: Bus>(&mut self, bus: &mut B, mnemonic: &str) -> Result<u32> {
        let (prefixed, opcode) = opcodes::lookup(mnemonic)
            .ok_or_else(|| Error::UnknownMnemonic(mnemonic.to_string()))?;
        self.prev_pc = self.regs.pc;

        let cycles = if prefixed {
            self.exec_cb(bus, opcode);
            CB_INSTRUCTIONS[opcode as usize].cycles
        } else {
            self.exec_opcode(bus, opcode)?
        };
        self.clock = self.clock.wrapping_add(cycles as u64);
        Ok(cycles)
    }
}

/// Format the instruction at `addr` and return it with its length in bytes.
///
/// Operands are read through the bus, so read hooks on those addresses fire.
pub fn disassemble<B: Bus>(bus: &mut B, addr: u16) -> (String, u16) {
    let opcode = bus.read8(addr);
    if opcode == 0xCB {
        let cb = bus.read8(addr.wrapping_add(1));
        return (CB_INSTRUCTIONS[cb as usize].mnemonic.clone(), 2);
    }

    let info: &OpcodeInfo = &INSTRUCTIONS[opcode as usize];
    let operand = addr.wrapping_add(1);
    let text = match info.length {
        2 => {
            let value = bus.read8(operand);
            substitute(&info.mnemonic, &["d8", "a8", "r8"], format!("${value:02X}"))
        }
        3 => {
            let value = bus.read16(operand);
            substitute(&info.mnemonic, &["d16", "a16"], format!("${value:04X}"))
        }
        _ => info.mnemonic.clone(),
    };
    (text, info.length.max(1) as u16)
}

fn substitute(mnemonic: &str, placeholders: &[&str], value: String) -> String {
    placeholders
        .iter()
        .find(|placeholder| mnemonic.contains(*placeholder))
        .map(|placeholder| mnemonic.replacen(placeholder, &value, 1))
        .unwrap_or_else(|| mnemonic.to_string())
}

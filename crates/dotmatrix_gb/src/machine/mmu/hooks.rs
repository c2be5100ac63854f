use std::collections::HashMap;

use super::RawMemory;

/// Observer for reads of one address. Receives `(addr, value)`.
pub type ReadHook = Box<dyn FnMut(u16, u8)>;

/// Observer for writes to one address. Receives raw memory access plus
/// `(addr, value)`, and runs after the value has been stored.
pub type WriteHook = Box<dyn FnMut(&mut RawMemory<'_>, u16, u8)>;

/// Per-address hook lists; each list fires in registration order.
#[derive(Default)]
pub(super) struct HookRegistry {
    reads: HashMap<u16, Vec<ReadHook>>,
    writes: HashMap<u16, Vec<WriteHook>>,
}

impl HookRegistry {
    pub(super) fn add_read(&mut self, addr: u16, hook: ReadHook) {
        self.reads.entry(addr).or_default().push(hook);
    }

    pub(super) fn add_write(&mut self, addr: u16, hook: WriteHook) {
        self.writes.entry(addr).or_default().push(hook);
    }

    #[inline]
    pub(super) fn fire_read(&mut self, addr: u16, value: u8) {
        if let Some(hooks) = self.reads.get_mut(&addr) {
            for hook in hooks.iter_mut() {
                hook(addr, value);
            }
        }
    }

    #[inline]
    pub(super) fn fire_write(&mut self, raw: &mut RawMemory<'_>, addr: u16, value: u8) {
        if let Some(hooks) = self.writes.get_mut(&addr) {
            for hook in hooks.iter_mut() {
                hook(raw, addr, value);
            }
        }
    }

    pub(super) fn len(&self) -> (usize, usize) {
        (
            self.reads.values().map(Vec::len).sum(),
            self.writes.values().map(Vec::len).sum(),
        )
    }
}

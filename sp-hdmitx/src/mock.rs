//! Mock register bus with a register file and a write log.
//!
//! Reads of never-written registers return 0. The DDC FIFO data and count
//! registers are backed by a byte queue so EDID transfers can be simulated.

use core::cell::RefCell;
use std::collections::VecDeque;
use std::vec::Vec;

use crate::bus::{Reg, RegisterBus};
use crate::hal::registers as reg;

#[derive(Default)]
struct Inner {
    regs: Vec<(Reg, u32)>,
    log: Vec<(Reg, u32)>,
    fifo: VecDeque<u8>,
}

impl Inner {
    fn get(&self, reg: Reg) -> u32 {
        self.regs
            .iter()
            .find(|(r, _)| *r == reg)
            .map(|(_, v)| *v)
            .unwrap_or(0)
    }

    fn set(&mut self, reg: Reg, value: u32) {
        match self.regs.iter_mut().find(|(r, _)| *r == reg) {
            Some(slot) => slot.1 = value,
            None => self.regs.push((reg, value)),
        }
    }
}

#[derive(Default)]
pub struct MockBus {
    inner: RefCell<Inner>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current register value without logging.
    pub fn get(&self, reg: Reg) -> u32 {
        self.inner.borrow().get(reg)
    }

    /// Set a register as the hardware would, without logging.
    pub fn set(&self, reg: Reg, value: u32) {
        self.inner.borrow_mut().set(reg, value)
    }

    /// Chronological `(register, value)` writes.
    pub fn writes(&self) -> Vec<(Reg, u32)> {
        self.inner.borrow().log.clone()
    }

    /// Number of writes to `reg`.
    pub fn write_count(&self, reg: Reg) -> usize {
        self.inner.borrow().log.iter().filter(|(r, _)| *r == reg).count()
    }

    pub fn clear_log(&self) {
        self.inner.borrow_mut().log.clear()
    }

    /// Snapshot of the register file, sorted for comparison.
    pub fn snapshot(&self) -> Vec<(Reg, u32)> {
        let mut regs = self.inner.borrow().regs.clone();
        regs.sort_by_key(|(r, _)| (r.region as u8, r.index));
        regs
    }

    /// Make `bytes` available in the DDC receive FIFO.
    pub fn queue_fifo(&self, bytes: &[u8]) {
        self.inner.borrow_mut().fifo.extend(bytes.iter().copied())
    }
}

impl RegisterBus for MockBus {
    fn read(&self, r: Reg) -> u32 {
        let mut inner = self.inner.borrow_mut();
        if r == reg::DDC_FIFO_DATA {
            return inner.fifo.pop_front().unwrap_or(0) as u32;
        }
        if r == reg::DDC_FIFO_CNT {
            return inner.fifo.len() as u32;
        }
        inner.get(r)
    }

    fn write(&self, r: Reg, value: u32) {
        let mut inner = self.inner.borrow_mut();
        inner.set(r, value);
        inner.log.push((r, value));
    }
}

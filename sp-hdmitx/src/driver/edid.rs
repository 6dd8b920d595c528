//! EDID capture buffer.
//!
//! The interrupt handler drains the DDC FIFO into this buffer while the poll
//! loop waits for it to fill. Both sides only use atomics; the interrupt
//! handler is the sole writer of bytes and offset during a read.

use core::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::bus::RegisterBus;
use crate::constants::{DDC_FIFO_CAPACITY, EDID_CAPACITY};
use crate::hal::link;

pub(crate) struct EdidCapture {
    bytes: [AtomicU8; EDID_CAPACITY],
    /// Bytes received so far.
    offset: AtomicUsize,
}

impl EdidCapture {
    pub const fn new() -> Self {
        #[allow(clippy::declare_interior_mutable_const)]
        const ZERO: AtomicU8 = AtomicU8::new(0);
        EdidCapture {
            bytes: [ZERO; EDID_CAPACITY],
            offset: AtomicUsize::new(0),
        }
    }

    pub fn reset(&self) {
        self.offset.store(0, Ordering::Release);
    }

    pub fn offset(&self) -> usize {
        self.offset.load(Ordering::Acquire)
    }

    pub fn is_complete(&self) -> bool {
        self.offset() >= EDID_CAPACITY
    }

    /// Move every byte waiting in the DDC FIFO into the buffer.
    ///
    /// Bytes past the capacity are read (to empty the FIFO) and dropped.
    pub fn drain<B: RegisterBus>(&self, bus: &B) -> usize {
        let count = link::ddc_fifo_count(bus).min(DDC_FIFO_CAPACITY);
        let start = self.offset.load(Ordering::Relaxed);

        for i in 0..count {
            let byte = link::ddc_read_byte(bus);
            if let Some(slot) = self.bytes.get(start + i) {
                slot.store(byte, Ordering::Relaxed);
            }
        }

        let end = (start + count).min(EDID_CAPACITY);
        self.offset.store(end, Ordering::Release);
        end - start
    }

    /// Copy the captured bytes into `out`; returns the number copied.
    pub fn copy_to(&self, out: &mut [u8]) -> usize {
        let n = self.offset().min(out.len());
        for (dst, src) in out[..n].iter_mut().zip(&self.bytes) {
            *dst = src.load(Ordering::Relaxed);
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBus;

    #[test]
    fn drain_appends_fifo_bytes() {
        let bus = MockBus::new();
        let edid = EdidCapture::new();

        bus.queue_fifo(&[0x00, 0xff, 0xff, 0xff]);
        assert_eq!(edid.drain(&bus), 4);
        bus.queue_fifo(&[0xff, 0xff]);
        assert_eq!(edid.drain(&bus), 2);
        assert_eq!(edid.offset(), 6);

        let mut out = [0u8; 8];
        assert_eq!(edid.copy_to(&mut out), 6);
        assert_eq!(out, [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0, 0]);
    }

    #[test]
    fn drain_stops_at_capacity() {
        let bus = MockBus::new();
        let edid = EdidCapture::new();
        let block = [0xa5u8; DDC_FIFO_CAPACITY];

        for _ in 0..EDID_CAPACITY / DDC_FIFO_CAPACITY {
            bus.queue_fifo(&block);
            edid.drain(&bus);
        }
        assert!(edid.is_complete());

        bus.queue_fifo(&block);
        assert_eq!(edid.drain(&bus), 0);
        assert_eq!(edid.offset(), EDID_CAPACITY);
        assert_eq!(link::ddc_fifo_count(&bus), 0);
    }

    #[test]
    fn reset_discards_capture() {
        let bus = MockBus::new();
        let edid = EdidCapture::new();
        bus.queue_fifo(&[1, 2, 3]);
        edid.drain(&bus);
        edid.reset();

        let mut out = [0u8; 4];
        assert_eq!(edid.copy_to(&mut out), 0);
    }
}

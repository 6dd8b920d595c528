//! Link status, interrupt and DDC register access.
//!
//! These helpers hold no state and only touch status and DDC registers, so
//! the interrupt handler can call them on its own bus handle without going
//! through the configuration lock.

use super::registers::{self as reg, DdcStatus, Interrupt0, Interrupt1, SystemStatus};
use crate::bus::RegisterBus;

/// DDC command: sequential read from the EDID slave.
const DDC_CMD_SEQ_READ: u32 = 0x2;

/// Whether any of `irq` is pending in interrupt group 0.
pub fn interrupt0_status<B: RegisterBus>(bus: &B, irq: Interrupt0) -> bool {
    Interrupt0::from_bits_truncate(bus.read(reg::INTR0_STS)).intersects(irq)
}

/// Acknowledge `irq` in interrupt group 0.
pub fn clear_interrupt0<B: RegisterBus>(bus: &B, irq: Interrupt0) {
    let value = bus.read(reg::INTR0_STS) & !irq.bits();
    bus.write(reg::INTR0_STS, value);
}

/// Whether any of `irq` is pending in interrupt group 1.
pub fn interrupt1_status<B: RegisterBus>(bus: &B, irq: Interrupt1) -> bool {
    Interrupt1::from_bits_truncate(bus.read(reg::INTR1_STS)).intersects(irq)
}

/// Acknowledge `irq` in interrupt group 1.
pub fn clear_interrupt1<B: RegisterBus>(bus: &B, irq: Interrupt1) {
    let value = bus.read(reg::INTR1_STS) & !irq.bits();
    bus.write(reg::INTR1_STS, value);
}

/// Whether `status` is asserted in the system status register.
pub fn system_status<B: RegisterBus>(bus: &B, status: SystemStatus) -> bool {
    SystemStatus::from_bits_truncate(bus.read(reg::SYSTEM_STATUS)).intersects(status)
}

/// Start a sequential EDID read at byte `offset`.
pub fn ddc_sequential_read<B: RegisterBus>(bus: &B, offset: usize) {
    bus.write(reg::DDC_OFFSET, offset as u32);
    bus.write(reg::DDC_CTRL, (DDC_CMD_SEQ_READ << 8) | 1);
}

/// Whether `status` is asserted in the DDC status register.
pub fn ddc_status<B: RegisterBus>(bus: &B, status: DdcStatus) -> bool {
    DdcStatus::from_bits_truncate(bus.read(reg::DDC_STATUS)).intersects(status)
}

/// Bytes waiting in the DDC receive FIFO.
pub fn ddc_fifo_count<B: RegisterBus>(bus: &B) -> usize {
    (bus.read(reg::DDC_FIFO_CNT) & 0x1f) as usize
}

/// Pop one byte from the DDC receive FIFO.
pub fn ddc_read_byte<B: RegisterBus>(bus: &B) -> u8 {
    bus.read(reg::DDC_FIFO_DATA) as u8
}

//! Register-access collaborator.
//!
//! The HAL never touches memory directly. Every access goes through a
//! [`RegisterBus`], so the same code drives real MMIO, a simulator, or the
//! mock register file used by the tests.
//!
//! Accessors take `&self`: the interrupt handler reads status registers while
//! the poll loop owns the configuration path, and both share one bus.

/// Register region of the SP7021 address map touched by the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Clock-enable, gated-clock-enable and reset banks.
    Moon0,
    /// TV PLL control.
    Moon4,
    /// PHY soft configuration.
    Moon5,
    /// HDMI transmitter core, including the TMDS PHY controls.
    HdmiTx,
}

/// A named 32-bit register: word index within its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg {
    pub region: Region,
    pub index: u16,
}

impl Reg {
    pub const fn new(region: Region, index: u16) -> Self {
        Reg { region, index }
    }
}

/// Read/write access to named registers.
///
/// Implementations must make a write visible to the next read of the same
/// register.
pub trait RegisterBus {
    /// Read a register.
    fn read(&self, reg: Reg) -> u32;

    /// Write a register.
    fn write(&self, reg: Reg, value: u32);

    /// Read-modify-write: `new = (current & !clear) | set`.
    fn modify(&self, reg: Reg, clear: u32, set: u32) -> u32 {
        let value = (self.read(reg) & !clear) | set;
        self.write(reg, value);
        value
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &T {
    fn read(&self, reg: Reg) -> u32 {
        (**self).read(reg)
    }

    fn write(&self, reg: Reg, value: u32) {
        (**self).write(reg, value)
    }
}

#[cfg(feature = "mmio")]
pub use mmio::MmioBus;

#[cfg(feature = "mmio")]
mod mmio {
    use core::ptr::NonNull;

    use super::{Reg, RegisterBus, Region};

    /// Volatile MMIO implementation of [`RegisterBus`].
    #[derive(Debug, Clone, Copy)]
    pub struct MmioBus {
        moon0: NonNull<u32>,
        moon4: NonNull<u32>,
        moon5: NonNull<u32>,
        hdmitx: NonNull<u32>,
    }

    // SAFETY: the bus only performs volatile word accesses on device memory;
    // the hardware serializes them.
    unsafe impl Send for MmioBus {}
    unsafe impl Sync for MmioBus {}

    impl MmioBus {
        /// Build a bus from the mapped base address of each region.
        ///
        /// # Safety
        ///
        /// Every pointer must map the matching register region for the whole
        /// lifetime of the bus, with uncached device attributes.
        pub const unsafe fn new(
            moon0: NonNull<u32>,
            moon4: NonNull<u32>,
            moon5: NonNull<u32>,
            hdmitx: NonNull<u32>,
        ) -> Self {
            MmioBus { moon0, moon4, moon5, hdmitx }
        }

        fn addr(&self, reg: Reg) -> *mut u32 {
            let base = match reg.region {
                Region::Moon0 => self.moon0,
                Region::Moon4 => self.moon4,
                Region::Moon5 => self.moon5,
                Region::HdmiTx => self.hdmitx,
            };
            // SAFETY: register indices are within the mapped region (see `new`).
            unsafe { base.as_ptr().add(reg.index as usize) }
        }
    }

    impl RegisterBus for MmioBus {
        fn read(&self, reg: Reg) -> u32 {
            // SAFETY: `addr` points into a mapped register region.
            unsafe { self.addr(reg).read_volatile() }
        }

        fn write(&self, reg: Reg, value: u32) {
            // SAFETY: `addr` points into a mapped register region.
            unsafe { self.addr(reg).write_volatile(value) }
        }
    }
}

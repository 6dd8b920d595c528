//! # sp-hdmitx
//!
//! A `no_std` driver for the HDMI transmitter of the Sunplus SP7021 SoC.
//! It brings the transmitter up, follows hot-plug and receiver sense, and
//! programs video timing, color-space conversion, audio clock regeneration
//! and CEA-861 InfoFrames once the sink is ready.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Bus | [`bus`] | `RegisterBus` trait and the volatile MMIO implementation |
//! | Tables | [`hal::tables`] / [`hal::infoframe`] | PLL, PHY, CSC and audio lookups; InfoFrame packets |
//! | HAL | [`hal`] | Desired configuration and the register apply pipeline |
//! | Driver | [`driver`] | Hot-plug state machine, command surface, EDID capture |
//! | Trait | [`control`] | `DisplayControl` for generic callers |
//!
//! ## Quick start
//!
//! ```ignore
//! use sp_hdmitx::bus::MmioBus;
//! use sp_hdmitx::driver::{Capabilities, HdmiTx};
//! use sp_hdmitx::hal::Timing;
//!
//! let bus = unsafe { MmioBus::new(moon0, moon4, moon5, hdmitx) };
//! let tx = HdmiTx::new(bus, Capabilities::default());
//! tx.init();
//!
//! // From the transmitter interrupt:
//! tx.handle_interrupt();
//!
//! // From a worker thread:
//! tx.run(&mut delay, &STOP);
//!
//! // From anywhere:
//! tx.set_timing(Timing::P1080_60);
//! if tx.rx_ready() {
//!     tx.enable_display()?;
//! }
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `mmio` | yes | [`bus::MmioBus`], volatile access to mapped registers |
//!
//! Protocol options (hot-plug detection, EDID read, HDCP, pattern generator)
//! are runtime [`driver::Capabilities`].
//!
//! ## Timing
//!
//! - **Poll interval:** 1 ms ([`constants::POLL_INTERVAL_MS`])
//! - **EDID buffer:** 256 bytes ([`constants::EDID_CAPACITY`])
//! - **EDID read budget:** 10 000 waits of 10 µs ([`constants::EDID_TIMEOUT`])

#![no_std]

#[cfg(test)]
extern crate std;

pub mod bus;
pub mod constants;
pub mod control;
pub mod driver;
pub mod hal;

#[cfg(test)]
mod mock;

//! Hot-plug protocol state machine.
//!
//! [`HdmiTx`] owns the transmitter session: the link flags written from the
//! interrupt handler, the pending and active output configuration, and the
//! [`Hal`](crate::hal::Hal). A single poll loop walks the states
//!
//! ```text
//! Init ──▶ Hpd ──hpd──▶ Rsen ──hpd && rsen──▶ Hdcp
//!           ▲            │ ▲                    │
//!           └──!hpd──────┘ └──────!rsen─────────┤
//!           ▲                                   │
//!           └──────────────!hpd─────────────────┘
//! ```
//!
//! Video and audio are reprogrammed only on the `Rsen` to `Hdcp` edge, with
//! both flags asserted.

use core::fmt;

pub mod command;
mod config;
mod edid;
mod hdmitx;


pub use command::{Command, Response};
pub use config::{ColorSpaceConversion, TxConfig, TxMode, TxVideo};
pub use hdmitx::HdmiTx;

/// Protocol state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    /// Not installed.
    #[default]
    Init,
    /// Waiting for hot-plug.
    Hpd,
    /// Waiting for receiver sense, then applying the configuration.
    Rsen,
    /// Output running.
    Hdcp,
}

/// Optional protocol paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Track the hot-plug interrupt. When off, hot-plug always reads asserted.
    pub hpd_detection: bool,
    /// Read the sink's EDID after hot-plug.
    pub edid_read: bool,
    /// Authenticate before clearing AV mute. Not supported by this driver;
    /// the flag is accepted and logged.
    pub hdcp_auth: bool,
    /// Built-in pattern generator.
    pub test_pattern: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            hpd_detection: false,
            edid_read: false,
            hdcp_auth: false,
            test_pattern: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The receiver does not sense the TMDS link.
    RxNotReady,
    /// Unknown command type or number.
    InvalidCommand,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RxNotReady => f.write_str("hdmi receiver not ready"),
            Error::InvalidCommand => f.write_str("invalid hdmitx command"),
        }
    }
}

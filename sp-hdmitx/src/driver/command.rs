//! Numbered command surface.
//!
//! Requests use the Linux ioctl layout: type byte `'h'` in bits 15:8 and the
//! command number in bits 7:0. Direction and size bits are ignored.

use log::error;

use super::Error;
use crate::hal::{ColorDepth, Timing};

/// Ioctl type byte of the transmitter commands.
pub const COMMAND_TYPE: u8 = b'h';

pub const SET_TIMING: u8 = 0x00;
pub const GET_TIMING: u8 = 0x01;
pub const SET_COLOR_DEPTH: u8 = 0x02;
pub const GET_COLOR_DEPTH: u8 = 0x03;
pub const GET_RX_READY: u8 = 0x04;
pub const DISPLAY: u8 = 0x05;
pub const PATTERN_GENERATOR: u8 = 0x06;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetTiming(Timing),
    GetTiming,
    SetColorDepth(ColorDepth),
    GetColorDepth,
    GetRxReady,
    /// Enable (commit pending configuration) or disable output.
    Display(bool),
    PatternGenerator(bool),
}

/// Result of [`HdmiTx::execute`](super::HdmiTx::execute).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Done,
    Timing(Timing),
    ColorDepth(ColorDepth),
    RxReady(bool),
}

impl Command {
    /// Decode command number `nr` with its integer argument.
    ///
    /// Enum arguments out of range are clamped like every other raw value;
    /// only an unknown number is an error.
    pub fn decode(nr: u8, arg: u32) -> Result<Self, Error> {
        let cmd = match nr {
            SET_TIMING => Command::SetTiming(Timing::from_raw(arg)),
            GET_TIMING => Command::GetTiming,
            SET_COLOR_DEPTH => Command::SetColorDepth(ColorDepth::from_raw(arg)),
            GET_COLOR_DEPTH => Command::GetColorDepth,
            GET_RX_READY => Command::GetRxReady,
            DISPLAY => Command::Display(arg != 0),
            PATTERN_GENERATOR => Command::PatternGenerator(arg != 0),
            _ => {
                error!("Invalid hdmitx command {:#04x}", nr);
                return Err(Error::InvalidCommand);
            }
        };
        Ok(cmd)
    }

    /// Decode a full ioctl request word.
    pub fn from_request(request: u32, arg: u32) -> Result<Self, Error> {
        let ty = (request >> 8) as u8;
        if ty != COMMAND_TYPE {
            error!("Invalid hdmitx command type {:#04x}", ty);
            return Err(Error::InvalidCommand);
        }
        Self::decode(request as u8, arg)
    }

    pub const fn number(&self) -> u8 {
        match self {
            Command::SetTiming(_) => SET_TIMING,
            Command::GetTiming => GET_TIMING,
            Command::SetColorDepth(_) => SET_COLOR_DEPTH,
            Command::GetColorDepth => GET_COLOR_DEPTH,
            Command::GetRxReady => GET_RX_READY,
            Command::Display(_) => DISPLAY,
            Command::PatternGenerator(_) => PATTERN_GENERATOR,
        }
    }
}

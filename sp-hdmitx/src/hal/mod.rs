//! Hardware abstraction layer for the HDMI transmitter.
//!
//! [`Hal`] owns the desired configuration and programs it on request.
//! [`link`] holds the stateless status and DDC accessors used from the
//! interrupt path.

pub mod infoframe;
pub mod link;
pub mod registers;
pub mod tables;
pub mod types;

mod transmitter;

pub use transmitter::Hal;
pub use types::{
    AudioAttributes, AudioChannel, AudioLayout, AudioType, ColorDepth, HalConfig, PixelFormat,
    QuantizationRange, SampleRate, SampleSize, Timing, VideoAttributes,
};

//! Driver-level output configuration.
//!
//! Callers describe the picture as a timing, a link color depth and one
//! named color-space conversion. [`TxVideo::attributes`] expands that into
//! the HAL's per-side range and pixel-format fields.

use crate::hal::{
    AudioAttributes, AudioChannel, AudioLayout, AudioType, ColorDepth, PixelFormat,
    QuantizationRange, SampleRate, SampleSize, Timing, VideoAttributes,
};

/// Sink protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxMode {
    /// DVI: video only, no data islands.
    Dvi = 0,
    #[default]
    Hdmi = 1,
}

impl TxMode {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => TxMode::Dvi,
            _ => TxMode::Hdmi,
        }
    }
}

use PixelFormat::{Rgb, Yuv422, Yuv444};
use QuantizationRange::{Full, Limited};

macro_rules! conversions {
    ($( $name:ident = $raw:literal => ($ir:ident, $if:ident, $or:ident, $of:ident), )*) => {
        /// Input to output color-space conversion.
        ///
        /// Only the combinations the converter supports are listed; full-range
        /// YUV output is always paired with a full-range input.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum ColorSpaceConversion {
            #[default]
            $( $name = $raw, )*
        }

        impl ColorSpaceConversion {
            /// Unknown values fall back to limited RGB passthrough.
            pub const fn from_raw(raw: u32) -> Self {
                match raw {
                    $( $raw => ColorSpaceConversion::$name, )*
                    _ => ColorSpaceConversion::LimitedRgbToLimitedRgb,
                }
            }

            /// `(input range, input format, output range, output format)`.
            pub const fn sides(self) -> (QuantizationRange, PixelFormat, QuantizationRange, PixelFormat) {
                match self {
                    $( ColorSpaceConversion::$name => ($ir, $if, $or, $of), )*
                }
            }
        }
    };
}

conversions! {
    LimitedRgbToLimitedRgb = 0 => (Limited, Rgb, Limited, Rgb),
    LimitedRgbToLimitedYuv444 = 1 => (Limited, Rgb, Limited, Yuv444),
    LimitedRgbToLimitedYuv422 = 2 => (Limited, Rgb, Limited, Yuv422),
    LimitedYuv444ToLimitedRgb = 3 => (Limited, Yuv444, Limited, Rgb),
    LimitedYuv444ToFullRgb = 4 => (Limited, Yuv444, Full, Rgb),
    LimitedYuv444ToLimitedYuv444 = 5 => (Limited, Yuv444, Limited, Yuv444),
    LimitedYuv444ToLimitedYuv422 = 6 => (Limited, Yuv444, Limited, Yuv422),
    LimitedYuv422ToLimitedRgb = 7 => (Limited, Yuv422, Limited, Rgb),
    LimitedYuv422ToFullRgb = 8 => (Limited, Yuv422, Full, Rgb),
    LimitedYuv422ToLimitedYuv444 = 9 => (Limited, Yuv422, Limited, Yuv444),
    LimitedYuv422ToLimitedYuv422 = 10 => (Limited, Yuv422, Limited, Yuv422),
    FullRgbToFullRgb = 11 => (Full, Rgb, Full, Rgb),
    FullRgbToLimitedYuv444 = 12 => (Full, Rgb, Limited, Yuv444),
    FullRgbToLimitedYuv422 = 13 => (Full, Rgb, Limited, Yuv422),
    FullRgbToFullYuv444 = 14 => (Full, Rgb, Full, Yuv444),
    FullRgbToFullYuv422 = 15 => (Full, Rgb, Full, Yuv422),
    FullYuv444ToLimitedRgb = 16 => (Full, Yuv444, Limited, Rgb),
    FullYuv444ToFullRgb = 17 => (Full, Yuv444, Full, Rgb),
    FullYuv444ToFullYuv444 = 18 => (Full, Yuv444, Full, Yuv444),
    FullYuv444ToFullYuv422 = 19 => (Full, Yuv444, Full, Yuv422),
    FullYuv422ToLimitedRgb = 20 => (Full, Yuv422, Limited, Rgb),
    FullYuv422ToFullRgb = 21 => (Full, Yuv422, Full, Rgb),
    FullYuv422ToFullYuv444 = 22 => (Full, Yuv422, Full, Yuv444),
    FullYuv422ToFullYuv422 = 23 => (Full, Yuv422, Full, Yuv422),
}

/// Video part of [`TxConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxVideo {
    pub timing: Timing,
    pub color_depth: ColorDepth,
    pub conversion: ColorSpaceConversion,
}

impl TxVideo {
    /// Expand into the attributes programmed by the HAL.
    pub const fn attributes(&self) -> VideoAttributes {
        let (input_range, input_format, output_range, output_format) = self.conversion.sides();
        VideoAttributes {
            timing: self.timing,
            color_depth: self.color_depth,
            input_range,
            output_range,
            input_format,
            output_format,
        }
    }
}

/// Output configuration as seen by callers of [`HdmiTx`](super::HdmiTx).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxConfig {
    pub mode: TxMode,
    pub video: TxVideo,
    pub audio: AudioAttributes,
}

impl Default for TxConfig {
    /// HDMI, 480p, 24 bit, limited YUV 4:4:4 in, limited RGB out;
    /// I2S LPCM, 16 bit, stereo, 48 kHz.
    fn default() -> Self {
        TxConfig {
            mode: TxMode::Hdmi,
            video: TxVideo {
                timing: Timing::P480,
                color_depth: ColorDepth::Bits24,
                conversion: ColorSpaceConversion::LimitedYuv444ToLimitedRgb,
            },
            audio: AudioAttributes {
                channel: AudioChannel::I2s,
                audio_type: AudioType::Lpcm,
                sample_size: SampleSize::Bits16,
                layout: AudioLayout::Ch2,
                sample_rate: SampleRate::Hz48000,
            },
        }
    }
}

//! Video and audio attributes held by the HAL.
//!
//! Every enum has a `from_raw` constructor for values arriving as plain
//! integers (command decoding, register snapshots). Unknown values fall back
//! to the default variant instead of failing, so table lookups downstream
//! always see a valid index.

/// Output video timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timing {
    /// 720×480 progressive, 59.94 Hz.
    #[default]
    P480 = 0,
    /// 720×576 progressive, 50 Hz.
    P576 = 1,
    /// 1280×720 progressive, 60 Hz.
    P720_60 = 2,
    /// 1920×1080 progressive, 60 Hz.
    P1080_60 = 3,
}

impl Timing {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => Timing::P576,
            2 => Timing::P720_60,
            3 => Timing::P1080_60,
            _ => Timing::P480,
        }
    }
}

/// Bits per pixel on the TMDS link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    Bits24 = 0,
    Bits30 = 1,
    Bits36 = 2,
    Bits48 = 3,
}

impl ColorDepth {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => ColorDepth::Bits30,
            2 => ColorDepth::Bits36,
            3 => ColorDepth::Bits48,
            _ => ColorDepth::Bits24,
        }
    }
}

/// Quantization range of pixel components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantizationRange {
    #[default]
    Limited = 0,
    Full = 1,
}

impl QuantizationRange {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => QuantizationRange::Full,
            _ => QuantizationRange::Limited,
        }
    }
}

/// Pixel encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    #[default]
    Rgb = 0,
    Yuv444 = 1,
    Yuv422 = 2,
}

impl PixelFormat {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => PixelFormat::Yuv444,
            2 => PixelFormat::Yuv422,
            _ => PixelFormat::Rgb,
        }
    }
}

/// Audio input interface feeding the transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioChannel {
    #[default]
    I2s = 0,
    Spdif = 1,
}

impl AudioChannel {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => AudioChannel::Spdif,
            _ => AudioChannel::I2s,
        }
    }
}

/// Audio coding type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioType {
    #[default]
    Lpcm = 0,
}

impl AudioType {
    pub const fn from_raw(_raw: u32) -> Self {
        AudioType::Lpcm
    }
}

/// Audio sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleSize {
    #[default]
    Bits16 = 0,
    Bits24 = 1,
}

impl SampleSize {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => SampleSize::Bits24,
            _ => SampleSize::Bits16,
        }
    }
}

/// Speaker layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioLayout {
    #[default]
    Ch2 = 0,
    Ch6 = 1,
    Ch8 = 2,
}

impl AudioLayout {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => AudioLayout::Ch6,
            2 => AudioLayout::Ch8,
            _ => AudioLayout::Ch2,
        }
    }

    /// Number of audio channels carried.
    pub const fn channels(self) -> u8 {
        match self {
            AudioLayout::Ch2 => 2,
            AudioLayout::Ch6 => 6,
            AudioLayout::Ch8 => 8,
        }
    }
}

/// Audio sample rate.
///
/// Discriminants follow the command numbering, which lists 48 kHz before
/// 44.1 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRate {
    #[default]
    Hz32000 = 0,
    Hz48000 = 1,
    Hz44100 = 2,
    Hz88200 = 3,
    Hz96000 = 4,
    Hz176400 = 5,
    Hz192000 = 6,
}

impl SampleRate {
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            1 => SampleRate::Hz48000,
            2 => SampleRate::Hz44100,
            3 => SampleRate::Hz88200,
            4 => SampleRate::Hz96000,
            5 => SampleRate::Hz176400,
            6 => SampleRate::Hz192000,
            _ => SampleRate::Hz32000,
        }
    }

    pub const fn hz(self) -> u32 {
        match self {
            SampleRate::Hz32000 => 32_000,
            SampleRate::Hz48000 => 48_000,
            SampleRate::Hz44100 => 44_100,
            SampleRate::Hz88200 => 88_200,
            SampleRate::Hz96000 => 96_000,
            SampleRate::Hz176400 => 176_400,
            SampleRate::Hz192000 => 192_000,
        }
    }
}

/// Video side of the transmitter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoAttributes {
    pub timing: Timing,
    pub color_depth: ColorDepth,
    pub input_range: QuantizationRange,
    pub output_range: QuantizationRange,
    pub input_format: PixelFormat,
    pub output_format: PixelFormat,
}

/// Audio side of the transmitter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioAttributes {
    pub channel: AudioChannel,
    pub audio_type: AudioType,
    pub sample_size: SampleSize,
    pub layout: AudioLayout,
    pub sample_rate: SampleRate,
}

/// Desired configuration applied by [`Hal::start`](super::Hal::start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalConfig {
    pub is_hdmi: bool,
    pub video: VideoAttributes,
    pub audio: AudioAttributes,
}

impl Default for HalConfig {
    /// 480p, 24 bit, limited RGB in and out; I2S LPCM, 16 bit, stereo, 32 kHz.
    fn default() -> Self {
        HalConfig {
            is_hdmi: true,
            video: VideoAttributes::default(),
            audio: AudioAttributes::default(),
        }
    }
}

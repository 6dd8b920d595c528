//! Compiled-in parameter tables.
//!
//! Lookups are exhaustive matches over the attribute enums, so an index can
//! never fall outside a table.

use super::types::{AudioChannel, ColorDepth, PixelFormat, QuantizationRange, SampleRate, Timing};

// ── Pixel clock ────────────────────────────────────────────────────────────

/// TV PLL setting for one pixel clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PllTvParam {
    /// Pass the 27 MHz reference straight through.
    pub bypass: bool,
    /// Post divider, as a power of two.
    pub r: u32,
    /// Feedback multiplier.
    pub m: u32,
    /// Pre divider.
    pub n: u32,
}

/// Pixel clock for a timing: 27, 74.25 or 148.5 MHz.
pub const fn pll_tv(timing: Timing) -> PllTvParam {
    match timing {
        Timing::P480 | Timing::P576 => PllTvParam { bypass: true, r: 0, m: 0, n: 0 },
        // 27 MHz × 11 / 2 / 2
        Timing::P720_60 => PllTvParam { bypass: false, r: 1, m: 11, n: 2 },
        // 27 MHz × 11 / 2
        Timing::P1080_60 => PllTvParam { bypass: false, r: 0, m: 11, n: 2 },
    }
}

// ── TMDS PHY ───────────────────────────────────────────────────────────────

/// Analog tuning of the TMDS transmitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhyParam {
    pub aclk_mode: u32,
    pub is_data_double: u32,
    pub kv_mode: u32,
    pub term_mode: u32,
    pub ectr_mode: u32,
    pub is_emp: u32,
    pub is_clk_detector: u32,
    pub fckdv_mode: u32,
    pub ckinv_mode: u32,
    pub is_from_odd: u32,
    pub is_clk_inv: u32,
    pub icp_mod_mode: u32,
    pub pd_d_mode: u32,
    pub cpst_mode: u32,
    pub icp_mode: u32,
    pub bgr_mode: u32,
    pub sw_ctrl: u32,
    pub dsel_mode: u32,
    pub irt_mode: u32,
    pub dcnst_mode: u32,
    pub rv_model: u32,
}

/// TMDS character rate bands: up to 50, 100, 200 and 340 MHz.
const PHY_BAND: [PhyParam; 4] = [
    PhyParam {
        aclk_mode: 0, is_data_double: 0, kv_mode: 0, term_mode: 0,
        ectr_mode: 0, is_emp: 0, is_clk_detector: 1, fckdv_mode: 0,
        ckinv_mode: 0x1, is_from_odd: 0, is_clk_inv: 0,
        icp_mod_mode: 0x2, pd_d_mode: 0x0, cpst_mode: 0x3, icp_mode: 0,
        bgr_mode: 0x3, sw_ctrl: 0x2, dsel_mode: 0x00,
        irt_mode: 0x08, dcnst_mode: 0x04, rv_model: 0,
    },
    PhyParam {
        aclk_mode: 1, is_data_double: 0, kv_mode: 1, term_mode: 1,
        ectr_mode: 0x1, is_emp: 0, is_clk_detector: 1, fckdv_mode: 1,
        ckinv_mode: 0x2, is_from_odd: 0, is_clk_inv: 0,
        icp_mod_mode: 0x4, pd_d_mode: 0x1, cpst_mode: 0x5, icp_mode: 0,
        bgr_mode: 0x3, sw_ctrl: 0x4, dsel_mode: 0x04,
        irt_mode: 0x10, dcnst_mode: 0x08, rv_model: 0,
    },
    PhyParam {
        aclk_mode: 2, is_data_double: 0, kv_mode: 2, term_mode: 3,
        ectr_mode: 0x3, is_emp: 1, is_clk_detector: 1, fckdv_mode: 2,
        ckinv_mode: 0x4, is_from_odd: 0, is_clk_inv: 0,
        icp_mod_mode: 0x8, pd_d_mode: 0x3, cpst_mode: 0x7, icp_mode: 1,
        bgr_mode: 0x4, sw_ctrl: 0x8, dsel_mode: 0x0c,
        irt_mode: 0x20, dcnst_mode: 0x10, rv_model: 1,
    },
    PhyParam {
        aclk_mode: 3, is_data_double: 1, kv_mode: 3, term_mode: 7,
        ectr_mode: 0x7, is_emp: 1, is_clk_detector: 1, fckdv_mode: 3,
        ckinv_mode: 0x8, is_from_odd: 1, is_clk_inv: 0,
        icp_mod_mode: 0xf, pd_d_mode: 0x7, cpst_mode: 0xf, icp_mode: 1,
        bgr_mode: 0x5, sw_ctrl: 0xf, dsel_mode: 0x1f,
        irt_mode: 0x3f, dcnst_mode: 0x20, rv_model: 1,
    },
];

/// PHY tuning for a timing and link color depth.
///
/// The TMDS rate is the pixel clock scaled by depth/24.
pub const fn phy_param(timing: Timing, depth: ColorDepth) -> PhyParam {
    let band = match (timing, depth) {
        // 27 .. 54 MHz
        (Timing::P480 | Timing::P576, ColorDepth::Bits24) => 0,
        (Timing::P480 | Timing::P576, ColorDepth::Bits30) => 0,
        (Timing::P480 | Timing::P576, ColorDepth::Bits36) => 0,
        (Timing::P480 | Timing::P576, ColorDepth::Bits48) => 1,
        // 74.25 .. 148.5 MHz
        (Timing::P720_60, ColorDepth::Bits24) => 1,
        (Timing::P720_60, ColorDepth::Bits30) => 1,
        (Timing::P720_60, ColorDepth::Bits36) => 2,
        (Timing::P720_60, ColorDepth::Bits48) => 2,
        // 148.5 .. 297 MHz
        (Timing::P1080_60, ColorDepth::Bits24) => 2,
        (Timing::P1080_60, ColorDepth::Bits30) => 2,
        (Timing::P1080_60, ColorDepth::Bits36) => 3,
        (Timing::P1080_60, ColorDepth::Bits48) => 3,
    };
    PHY_BAND[band]
}

// ── Color-space conversion ─────────────────────────────────────────────────

/// Pixel encoding and quantization range combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    LimitedRgb,
    FullRgb,
    LimitedYuv,
    FullYuv,
}

impl ColorSpace {
    /// YUV 4:4:4 and 4:2:2 share a color space; chroma resampling is
    /// handled separately.
    pub const fn of(format: PixelFormat, range: QuantizationRange) -> Self {
        match (format, range) {
            (PixelFormat::Rgb, QuantizationRange::Limited) => ColorSpace::LimitedRgb,
            (PixelFormat::Rgb, QuantizationRange::Full) => ColorSpace::FullRgb,
            (_, QuantizationRange::Limited) => ColorSpace::LimitedYuv,
            (_, QuantizationRange::Full) => ColorSpace::FullYuv,
        }
    }
}

/// Color-space converter setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CscParam {
    /// YCbCr side uses full range.
    pub ycc_range: u32,
    /// RGB side uses full range.
    pub rgb_range: u32,
    /// 0 = RGB to YCbCr, 1 = YCbCr to RGB.
    pub conversion_type: u32,
    /// 0 = BT.601, 1 = BT.709.
    pub colorimetry: u32,
    pub on_off: u32,
    /// Needs hand-loaded coefficients.
    pub manual: u32,
}

const fn csc_auto(ycc_range: u32, rgb_range: u32, conversion_type: u32) -> CscParam {
    CscParam { ycc_range, rgb_range, conversion_type, colorimetry: 0, on_off: 1, manual: 0 }
}

const CSC_OFF: CscParam =
    CscParam { ycc_range: 0, rgb_range: 0, conversion_type: 0, colorimetry: 0, on_off: 0, manual: 0 };

const CSC_MANUAL: CscParam =
    CscParam { ycc_range: 0, rgb_range: 0, conversion_type: 0, colorimetry: 0, on_off: 1, manual: 1 };

/// Converter setting from `input` to `output`.
///
/// Range-only changes (same family, different quantization) need a manual
/// coefficient matrix.
pub const fn csc(input: ColorSpace, output: ColorSpace) -> CscParam {
    use ColorSpace::*;

    match (input, output) {
        (LimitedRgb, LimitedRgb) | (FullRgb, FullRgb) => CSC_OFF,
        (LimitedYuv, LimitedYuv) | (FullYuv, FullYuv) => CSC_OFF,

        (LimitedRgb, FullRgb) | (FullRgb, LimitedRgb) => CSC_MANUAL,
        (LimitedYuv, FullYuv) | (FullYuv, LimitedYuv) => CSC_MANUAL,

        (LimitedRgb, LimitedYuv) => csc_auto(0, 0, 0),
        (LimitedRgb, FullYuv) => csc_auto(1, 0, 0),
        (FullRgb, LimitedYuv) => csc_auto(0, 1, 0),
        (FullRgb, FullYuv) => csc_auto(1, 1, 0),

        (LimitedYuv, LimitedRgb) => csc_auto(0, 0, 1),
        (LimitedYuv, FullRgb) => csc_auto(0, 1, 1),
        (FullYuv, LimitedRgb) => csc_auto(1, 0, 1),
        (FullYuv, FullRgb) => csc_auto(1, 1, 1),
    }
}

// ── Audio ──────────────────────────────────────────────────────────────────

/// IEC 60958 channel status (word 2) and audio clock regeneration N value.
pub const fn audio_clock(rate: SampleRate) -> (u16, u16) {
    match rate {
        SampleRate::Hz32000 => (0x300, 0x1000),
        SampleRate::Hz48000 => (0x200, 0x1800),
        SampleRate::Hz44100 => (0x000, 0x1880),
        SampleRate::Hz88200 => (0x800, 0x3100),
        SampleRate::Hz96000 => (0xa00, 0x3000),
        SampleRate::Hz176400 => (0xc00, 0x6200),
        SampleRate::Hz192000 => (0xe00, 0x6000),
    }
}

/// Channel-enable bits and SPDIF flag for an audio interface.
pub const fn audio_channel(channel: AudioChannel) -> (u32, bool) {
    match channel {
        AudioChannel::I2s => (0x1, false),
        AudioChannel::Spdif => (0xf, true),
    }
}

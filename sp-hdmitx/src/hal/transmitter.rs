//! HDMI transmitter hardware abstraction.
//!
//! [`Hal`] keeps the desired configuration and turns it into register writes
//! when [`start()`](Hal::start) is called. It never decides *when* to apply;
//! the protocol state machine does that.
//!
//! # Example
//!
//! ```ignore
//! let mut hal = Hal::new(bus, true);
//! hal.init();
//! hal.config_video(Some(&VideoAttributes { timing: Timing::P720_60, ..Default::default() }));
//! hal.stop();
//! hal.start();
//! ```

use log::debug;

use super::infoframe::{
    vic, AudioInfoFrame, AviColorSpace, AviInfoFrame, Colorimetry, PictureAspect,
};
use super::registers::{self as reg, Interrupt0, Interrupt1};
use super::tables::{self, ColorSpace};
use super::types::{AudioAttributes, ColorDepth, HalConfig, PixelFormat, Timing, VideoAttributes};
use crate::bus::RegisterBus;

/// Mask-write of bit 0 in a MOON0 bank: bits 31:16 select, 15:0 set.
const MOON_BIT0_MASK: u32 = 0x1_0000;

const PWR_ON_ALL: u32 = 0x1f;
const INTR0_LINK: Interrupt0 = Interrupt0::HPD.union(Interrupt0::RSEN);

/// InfoFrame control values.
const INFOFRAME_CTRL1_ENABLE: u32 = 0x1b1b;
const INFOFRAME_CTRL_DISABLE: u32 = 0x1010;
const INFOFRAME_CTRL2_GCP: u32 = 0x1013;

/// TMDS control 3 value that latches the output.
const TMDSTX_CTRL3_LATCH: u32 = (1 << 8) | (1 << 4) | (1 << 2) | 1;

/// Manual pattern-generator timing for 576p (PAT_GEN2..9).
const PTG_576P_MANUAL: [u32; 8] = [0x360, 0x271, 0x40, 0x4, 0x84, 0x353, 0x2c, 0x26c];

/// HDMI transmitter hardware abstraction layer.
///
/// Generic over the register bus.
pub struct Hal<B> {
    bus: B,
    config: HalConfig,
    avi: AviInfoFrame,
    audio_frame: AudioInfoFrame,
    /// Enable the pattern generator as part of `start()`.
    test_pattern: bool,
    /// Unmask the DDC FIFO interrupt in `init()`.
    edid_interrupt: bool,
}

impl<B: RegisterBus> Hal<B> {
    pub fn new(bus: B, test_pattern: bool) -> Self {
        Self {
            bus,
            config: HalConfig::default(),
            avi: AviInfoFrame::default(),
            audio_frame: AudioInfoFrame::default(),
            test_pattern,
            edid_interrupt: false,
        }
    }

    /// Also unmask the DDC FIFO-full interrupt while initialized.
    pub fn with_edid_interrupt(mut self, enable: bool) -> Self {
        self.edid_interrupt = enable;
        self
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Release the bus.
    pub fn release(self) -> B {
        self.bus
    }

    // ── Power ──────────────────────────────────────────────────────────

    /// Clock the transmitter, pulse the software reset and unmask the
    /// link interrupts (plus DDC FIFO-full when EDID capture is on).
    pub fn init(&mut self) {
        self.bus.write(reg::CLKEN5, MOON_BIT0_MASK | 1);
        self.bus.write(reg::GCLKEN5, MOON_BIT0_MASK | 1);
        self.bus.write(reg::RESET5, MOON_BIT0_MASK);

        self.bus.modify(reg::PWR_CTRL, 0, PWR_ON_ALL);

        self.bus.write(reg::SW_RESET, 0);
        self.bus.write(reg::SW_RESET, 0xff);

        self.bus.modify(reg::INTR0_UNMASK, 0, INTR0_LINK.bits());
        if self.edid_interrupt {
            self.bus.modify(reg::INTR1_UNMASK, 0, Interrupt1::DDC_FIFO_FULL.bits());
        }
    }

    /// Reverse of [`init()`](Self::init).
    pub fn deinit(&mut self) {
        self.bus.modify(reg::INTR0_UNMASK, INTR0_LINK.bits(), 0);
        if self.edid_interrupt {
            self.bus.modify(reg::INTR1_UNMASK, Interrupt1::DDC_FIFO_FULL.bits(), 0);
        }
        self.bus.modify(reg::PWR_CTRL, PWR_ON_ALL, 0);
        self.bus.write(reg::SW_RESET, 0);

        self.bus.write(reg::CLKEN5, MOON_BIT0_MASK);
        self.bus.write(reg::GCLKEN5, MOON_BIT0_MASK);
        self.bus.write(reg::RESET5, MOON_BIT0_MASK | 1);
    }

    // ── Configuration ──────────────────────────────────────────────────

    pub fn config(&self) -> &HalConfig {
        &self.config
    }

    pub fn set_hdmi_mode(&mut self, is_hdmi: bool) {
        self.config.is_hdmi = is_hdmi;
    }

    pub fn video(&self) -> VideoAttributes {
        self.config.video
    }

    /// Replace the video attributes. `None` leaves them unchanged.
    pub fn config_video(&mut self, video: Option<&VideoAttributes>) {
        if let Some(video) = video {
            self.config.video = *video;
        }
    }

    pub fn audio(&self) -> AudioAttributes {
        self.config.audio
    }

    /// Replace the audio attributes. `None` leaves them unchanged.
    pub fn config_audio(&mut self, audio: Option<&AudioAttributes>) {
        if let Some(audio) = audio {
            self.config.audio = *audio;
        }
    }

    /// Last AVI InfoFrame built by `start()`.
    pub fn avi_infoframe(&self) -> &AviInfoFrame {
        &self.avi
    }

    /// Last audio InfoFrame built by `start()`.
    pub fn audio_infoframe(&self) -> &AudioInfoFrame {
        &self.audio_frame
    }

    // ── Output control ─────────────────────────────────────────────────

    /// Program the whole configuration and enable output.
    ///
    /// Steps run in a fixed order; later ones depend on clocks and PHY
    /// settings written by earlier ones.
    pub fn start(&mut self) {
        self.apply_pixel_clock();
        self.apply_phy();
        if self.test_pattern {
            self.apply_test_pattern(true);
        }
        self.apply_avi_infoframe();
        self.apply_audio_infoframe();
        self.apply_video();
        self.apply_audio();

        self.bus.modify(reg::INFOFRAME_CTRL1, 0, INFOFRAME_CTRL1_ENABLE);
        self.bus.write(reg::TMDSTX_CTRL3, TMDSTX_CTRL3_LATCH);
    }

    /// Stop InfoFrame transmission. Clocks and PHY stay configured.
    pub fn stop(&mut self) {
        self.bus.write(reg::INFOFRAME_CTRL1, INFOFRAME_CTRL_DISABLE);
        self.bus.write(reg::INFOFRAME_CTRL2, INFOFRAME_CTRL_DISABLE);
    }

    pub fn enable_pattern(&mut self) {
        self.apply_test_pattern(true);
    }

    pub fn disable_pattern(&mut self) {
        self.apply_test_pattern(false);
    }

    // ── Apply steps ────────────────────────────────────────────────────

    fn apply_pixel_clock(&mut self) {
        let pll = tables::pll_tv(self.config.video.timing);

        if pll.bypass {
            self.bus.write(reg::PLLTV_CTL0, 0x8000_0000 | (1 << 15));
        } else {
            self.bus.write(reg::PLLTV_CTL0, 0x8000_0000);
            self.bus.write(reg::PLLTV_CTL1, 0x0180_0000 | (pll.r << 7));
            self.bus.write(reg::PLLTV_CTL2, 0x7fff_0000 | (pll.m << 8) | pll.n);
        }
    }

    fn apply_phy(&mut self) {
        let phy = tables::phy_param(self.config.video.timing, self.config.video.color_depth);

        self.bus.write(
            reg::SFT_CFG4,
            0x01f7_0000
                | ((phy.aclk_mode & 0x3) << 7)
                | ((phy.is_data_double & 0x1) << 6)
                | ((phy.kv_mode & 0x3) << 4)
                | (phy.term_mode & 0x7),
        );

        self.bus.modify(
            reg::TMDSTX_CTRL1,
            0xfff3,
            ((phy.ectr_mode & 0xf) << 12)
                | ((phy.is_emp & 0x1) << 11)
                | ((phy.is_clk_detector & 0x1) << 10)
                | ((phy.fckdv_mode & 0x3) << 8)
                | ((phy.ckinv_mode & 0xf) << 4)
                | ((phy.is_from_odd & 0x1) << 1)
                | (phy.is_clk_inv & 0x1),
        );

        self.bus.modify(
            reg::TMDSTX_CTRL2,
            0xf7f2,
            ((phy.icp_mod_mode & 0xf) << 12)
                | ((phy.pd_d_mode & 0x7) << 8)
                | ((phy.cpst_mode & 0xf) << 4)
                | ((phy.icp_mode & 0x1) << 1),
        );

        self.bus.modify(
            reg::TMDSTX_CTRL3,
            0xef1f,
            ((phy.bgr_mode & 0x7) << 13) | ((phy.sw_ctrl & 0xf) << 8) | (phy.dsel_mode & 0x1f),
        );

        self.bus.modify(
            reg::TMDSTX_CTRL4,
            0xfc3f,
            ((phy.irt_mode & 0x3f) << 10) | (phy.dcnst_mode & 0x3f),
        );

        self.bus.modify(reg::TMDSTX_CTRL5, 0x2, (phy.rv_model & 0x1) << 1);
    }

    fn apply_test_pattern(&mut self, enable: bool) {
        // Only the four progressive timings have generator presets; 576p
        // runs in manual mode with fixed timing values.
        let (video_mode, hv_sync_inv, manual) = match self.config.video.timing {
            Timing::P480 => (0, 3, false),
            Timing::P576 => (7, 3, true),
            Timing::P720_60 => (1, 0, false),
            Timing::P1080_60 => (2, 0, false),
        };
        let (is_rgb, is_yuv444) = match self.config.video.input_format {
            PixelFormat::Rgb => (1, 0),
            PixelFormat::Yuv444 => (0, 1),
            PixelFormat::Yuv422 => (0, 0),
        };
        let (inter_mode, step, is_709) = (0u32, 0u32, 0u32);

        let value = (inter_mode << 11)
            | (video_mode << 8)
            | (step << 6)
            | (is_709 << 5)
            | (is_yuv444 << 4)
            | (is_rgb << 3)
            | (hv_sync_inv << 1)
            | enable as u32;
        self.bus.write(reg::VIDEO_PAT_GEN1, value);

        if manual {
            let regs = [
                reg::VIDEO_PAT_GEN2,
                reg::VIDEO_PAT_GEN3,
                reg::VIDEO_PAT_GEN4,
                reg::VIDEO_PAT_GEN5,
                reg::VIDEO_PAT_GEN6,
                reg::VIDEO_PAT_GEN7,
                reg::VIDEO_PAT_GEN8,
                reg::VIDEO_PAT_GEN9,
            ];
            for (r, v) in regs.into_iter().zip(PTG_576P_MANUAL) {
                self.bus.write(r, v);
            }
        }
    }

    fn apply_avi_infoframe(&mut self) {
        let color_space = match self.config.video.output_format {
            PixelFormat::Rgb => AviColorSpace::Rgb,
            PixelFormat::Yuv444 => AviColorSpace::Yuv444,
            PixelFormat::Yuv422 => AviColorSpace::Yuv422,
        };
        let (aspect, colorimetry, code) = match self.config.video.timing {
            Timing::P480 => (PictureAspect::Aspect4_3, Colorimetry::Itu601, vic::P480_4_3),
            Timing::P576 => (PictureAspect::Aspect4_3, Colorimetry::Itu601, vic::P576_4_3),
            Timing::P720_60 => (PictureAspect::Aspect16_9, Colorimetry::Itu709, vic::P720_60),
            Timing::P1080_60 => (PictureAspect::Aspect16_9, Colorimetry::Itu709, vic::P1080_60),
        };

        self.avi.set_color_space(color_space);
        self.avi.set_aspect(aspect);
        self.avi.set_colorimetry(colorimetry);
        self.avi.set_vic(code);
        self.avi.set_pixel_repetition(0);
        self.avi.update_checksum();

        for (r, word) in reg::AVI_INFOFRAME.into_iter().zip(self.avi.register_words()) {
            self.bus.write(r, word);
        }
    }

    fn apply_audio_infoframe(&mut self) {
        self.audio_frame.set_channel_count(self.config.audio.layout.channels());
        self.audio_frame.update_checksum();

        for (r, word) in reg::AUDIO_INFOFRAME.into_iter().zip(self.audio_frame.register_words()) {
            self.bus.write(r, word);
        }
    }

    fn apply_color_space_conversion(&mut self) {
        let video = &self.config.video;
        let input = ColorSpace::of(video.input_format, video.input_range);
        let output = ColorSpace::of(video.output_format, video.output_range);
        let is_up = video.input_format == PixelFormat::Yuv422;
        let is_down = video.output_format == PixelFormat::Yuv422;
        let csc = tables::csc(input, output);

        let mode = (csc.ycc_range & 0x1)
            | ((csc.rgb_range & 0x1) << 1)
            | ((csc.conversion_type & 0x1) << 2)
            | ((csc.colorimetry & 0x1) << 3);

        let value = (self.bus.read(reg::VIDEO_CTRL1) & !((0x3 << 11) | (0x3f << 4)))
            | ((mode & 0xf) << 4)
            | ((csc.on_off & 0x1) << 8)
            | ((csc.manual & 0x1) << 9)
            | ((is_up as u32) << 11)
            | ((is_down as u32) << 12);
        self.bus.write(reg::VIDEO_CTRL1, value);

        if csc.manual != 0 {
            // TODO: load the coefficient matrix for range-only conversions
            // (RGB and YUV, limited <-> full).
            debug!("hdmitx: manual CSC {:?} -> {:?} left unprogrammed", input, output);
        }
    }

    fn apply_video(&mut self) {
        self.apply_color_space_conversion();

        let cd = match self.config.video.color_depth {
            ColorDepth::Bits24 => 4,
            ColorDepth::Bits30 => 5,
            ColorDepth::Bits36 => 6,
            ColorDepth::Bits48 => 7,
        };
        let hv_pol = match self.config.video.timing {
            Timing::P480 | Timing::P576 => 3,
            Timing::P720_60 | Timing::P1080_60 => 0,
        };

        self.bus.write(reg::VIDEO_FORMAT, (cd << 4) | hv_pol);
        self.bus.write(reg::SYSTEM_CTRL1, (1 << 12) | self.config.is_hdmi as u32);
        self.bus.write(reg::INFOFRAME_CTRL2, INFOFRAME_CTRL2_GCP);
    }

    fn apply_audio(&mut self) {
        let (chl_en, is_spdif) = tables::audio_channel(self.config.audio.channel);
        let (chl_sts, cts_n) = tables::audio_clock(self.config.audio.sample_rate);

        let ctrl1 = (3 << 14) | (2 << 12) | (1 << 10) | (chl_en << 4) | 1;

        self.bus.write(reg::AUDIO_CTRL1, ctrl1);
        self.bus.write(reg::AUDIO_CTRL2, 0x01b5);
        self.bus.write(reg::AUDIO_CHNL_STS2, chl_sts as u32);
        self.bus.write(reg::AUDIO_SPDIF_CTRL, (0x3f << 1) | is_spdif as u32);
        self.bus.write(reg::ARC_CONFIG1, 0x1);
        self.bus.write(reg::ARC_N_VALUE1, cts_n as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::types::{AudioChannel, AudioLayout, QuantizationRange, SampleRate};
    use crate::mock::MockBus;

    fn make_hal(bus: &MockBus) -> Hal<&MockBus> {
        Hal::new(bus, false)
    }

    fn started(bus: &MockBus, video: VideoAttributes) -> Hal<&MockBus> {
        let mut hal = make_hal(bus);
        hal.config_video(Some(&video));
        hal.start();
        hal
    }

    // ── Power ─────────────────────────────────────────────────────────

    #[test]
    fn init_pulses_reset_and_unmasks_link_interrupts() {
        let bus = MockBus::new();
        make_hal(&bus).init();

        let writes = bus.writes();
        assert_eq!(writes[0], (reg::CLKEN5, 0x10001));
        assert_eq!(writes[2], (reg::RESET5, 0x10000));
        let resets: std::vec::Vec<u32> = writes
            .iter()
            .filter(|(r, _)| *r == reg::SW_RESET)
            .map(|(_, v)| *v)
            .collect();
        assert_eq!(resets, [0, 0xff]);
        assert_eq!(bus.get(reg::PWR_CTRL), 0x1f);
        assert_eq!(bus.get(reg::INTR0_UNMASK), 0x3);
        assert_eq!(bus.write_count(reg::INTR1_UNMASK), 0);
    }

    #[test]
    fn edid_interrupt_follows_init_and_deinit() {
        let bus = MockBus::new();
        bus.set(reg::INTR1_UNMASK, 0x40);
        let mut hal = Hal::new(&bus, false).with_edid_interrupt(true);

        hal.init();
        assert_eq!(bus.get(reg::INTR1_UNMASK), 0x41);
        hal.deinit();
        assert_eq!(bus.get(reg::INTR1_UNMASK), 0x40);
    }

    #[test]
    fn release_returns_the_bus() {
        let bus = MockBus::new();
        let hal = make_hal(&bus);
        assert!(core::ptr::eq(*hal.bus(), &bus));

        let released = hal.release();
        released.write(reg::SW_RESET, 0xff);
        assert_eq!(bus.get(reg::SW_RESET), 0xff);
    }

    #[test]
    fn init_is_idempotent() {
        let once = MockBus::new();
        make_hal(&once).init();

        let twice = MockBus::new();
        let mut hal = make_hal(&twice);
        hal.init();
        hal.init();

        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn deinit_reverses_init() {
        let bus = MockBus::new();
        bus.set(reg::INTR0_UNMASK, 0x80);
        let mut hal = make_hal(&bus);
        hal.init();
        hal.deinit();

        assert_eq!(bus.get(reg::INTR0_UNMASK), 0x80);
        assert_eq!(bus.get(reg::PWR_CTRL), 0);
        assert_eq!(bus.get(reg::SW_RESET), 0);
        assert_eq!(bus.get(reg::CLKEN5), 0x10000);
        assert_eq!(bus.get(reg::RESET5), 0x10001);
    }

    // ── Configuration ─────────────────────────────────────────────────

    #[test]
    fn config_none_is_noop() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        let before = *hal.config();
        hal.config_video(None);
        hal.config_audio(None);
        assert_eq!(*hal.config(), before);
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn config_does_not_touch_hardware() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.config_video(Some(&VideoAttributes { timing: Timing::P1080_60, ..Default::default() }));
        hal.set_hdmi_mode(false);
        assert_eq!(hal.video().timing, Timing::P1080_60);
        assert!(!hal.config().is_hdmi);
        assert!(bus.writes().is_empty());
    }

    // ── Apply pipeline ────────────────────────────────────────────────

    #[test]
    fn bypass_pll_for_480p() {
        let bus = MockBus::new();
        started(&bus, VideoAttributes::default());
        assert_eq!(bus.get(reg::PLLTV_CTL0), 0x8000_8000);
        assert_eq!(bus.write_count(reg::PLLTV_CTL1), 0);
    }

    #[test]
    fn pll_dividers_for_720p() {
        let bus = MockBus::new();
        started(&bus, VideoAttributes { timing: Timing::P720_60, ..Default::default() });
        let pll = tables::pll_tv(Timing::P720_60);
        assert_eq!(bus.get(reg::PLLTV_CTL0), 0x8000_0000);
        assert_eq!(bus.get(reg::PLLTV_CTL1), 0x0180_0000 | (pll.r << 7));
        assert_eq!(bus.get(reg::PLLTV_CTL2), 0x7fff_0000 | (pll.m << 8) | pll.n);
    }

    #[test]
    fn phy_fields_preserve_unmasked_bits() {
        let bus = MockBus::new();
        // Bits outside the CTRL1 field mask (0xfff3) and above bit 15.
        bus.set(reg::TMDSTX_CTRL1, 0x1_000c);
        bus.set(reg::TMDSTX_CTRL5, 0xfd);
        started(&bus, VideoAttributes { timing: Timing::P1080_60, color_depth: ColorDepth::Bits48, ..Default::default() });

        let ctrl1 = bus.get(reg::TMDSTX_CTRL1);
        assert_eq!(ctrl1 & !0xfff3, 0x1_000c);
        assert_eq!((ctrl1 >> 12) & 0xf, 0x7);
        assert_eq!(bus.get(reg::TMDSTX_CTRL5), 0xff);
    }

    #[test]
    fn avi_infoframe_for_720p() {
        let bus = MockBus::new();
        let hal = started(&bus, VideoAttributes { timing: Timing::P720_60, ..Default::default() });

        let avi = hal.avi_infoframe();
        assert_eq!(avi.vic(), 4);
        assert_eq!(avi.aspect(), PictureAspect::Aspect16_9 as u8);
        assert_eq!(avi.colorimetry(), Colorimetry::Itu709 as u8);
        assert_eq!(avi.as_bytes().iter().fold(0u8, |a, b| a.wrapping_add(*b)), 0);

        let words = avi.register_words();
        for (r, w) in reg::AVI_INFOFRAME.iter().zip(words) {
            assert_eq!(bus.get(*r), w);
        }
        assert_eq!(bus.get(reg::AVI_INFOFRAME[0]) & 0xff, avi.as_bytes()[3] as u32);
    }

    #[test]
    fn audio_infoframe_channel_count() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.config_audio(Some(&AudioAttributes { layout: AudioLayout::Ch8, ..Default::default() }));
        hal.start();

        let frame = hal.audio_infoframe();
        assert_eq!(frame.channel_count(), 8);
        assert_eq!(bus.get(reg::AUDIO_INFOFRAME[0]) >> 8, 0x07);
        assert_eq!(frame.as_bytes().iter().fold(0u8, |a, b| a.wrapping_add(*b)), 0);
    }

    #[test]
    fn csc_down_sample_for_rgb_to_yuv422() {
        let bus = MockBus::new();
        started(
            &bus,
            VideoAttributes {
                input_format: PixelFormat::Rgb,
                output_format: PixelFormat::Yuv422,
                ..Default::default()
            },
        );
        let ctrl = bus.get(reg::VIDEO_CTRL1);
        assert_ne!(ctrl & (1 << 12), 0, "down-sample");
        assert_eq!(ctrl & (1 << 11), 0, "up-sample");
        assert_ne!(ctrl & (1 << 8), 0, "csc on");
        assert_eq!(ctrl & (1 << 9), 0, "auto coefficients");
    }

    #[test]
    fn csc_range_change_flags_manual() {
        let bus = MockBus::new();
        bus.set(reg::VIDEO_CTRL1, 0x4003);
        started(
            &bus,
            VideoAttributes {
                input_range: QuantizationRange::Limited,
                output_range: QuantizationRange::Full,
                ..Default::default()
            },
        );
        let ctrl = bus.get(reg::VIDEO_CTRL1);
        assert_eq!(ctrl & 0x4003, 0x4003);
        assert_ne!(ctrl & (1 << 9), 0);
    }

    #[test]
    fn video_format_and_mode() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.set_hdmi_mode(false);
        hal.config_video(Some(&VideoAttributes { color_depth: ColorDepth::Bits36, ..Default::default() }));
        hal.start();

        assert_eq!(bus.get(reg::VIDEO_FORMAT), (6 << 4) | 3);
        assert_eq!(bus.get(reg::SYSTEM_CTRL1), 1 << 12);
        assert_eq!(bus.get(reg::INFOFRAME_CTRL2), 0x1013);
    }

    #[test]
    fn audio_clock_regeneration() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);

        hal.config_audio(Some(&AudioAttributes { sample_rate: SampleRate::Hz48000, ..Default::default() }));
        hal.start();
        assert_eq!(bus.get(reg::AUDIO_CHNL_STS2), 0x200);
        assert_eq!(bus.get(reg::ARC_N_VALUE1), 0x1800);

        hal.config_audio(Some(&AudioAttributes { sample_rate: SampleRate::Hz44100, ..Default::default() }));
        hal.start();
        assert_eq!(bus.get(reg::AUDIO_CHNL_STS2), 0x0);
        assert_eq!(bus.get(reg::ARC_N_VALUE1), 0x1880);
    }

    #[test]
    fn spdif_enables_all_channels() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.config_audio(Some(&AudioAttributes { channel: AudioChannel::Spdif, ..Default::default() }));
        hal.start();
        assert_eq!((bus.get(reg::AUDIO_CTRL1) >> 4) & 0xf, 0xf);
        assert_eq!(bus.get(reg::AUDIO_SPDIF_CTRL), 0x7f);
    }

    #[test]
    fn start_ends_with_output_latch() {
        let bus = MockBus::new();
        bus.set(reg::INFOFRAME_CTRL1, 0x1010);
        make_hal(&bus).start();

        let writes = bus.writes();
        assert_eq!(*writes.last().unwrap(), (reg::TMDSTX_CTRL3, 0x115));
        assert_eq!(bus.get(reg::INFOFRAME_CTRL1), 0x1b1b);
    }

    #[test]
    fn stop_disables_packets_only() {
        let bus = MockBus::new();
        make_hal(&bus).stop();
        assert_eq!(
            bus.writes(),
            [(reg::INFOFRAME_CTRL1, 0x1010), (reg::INFOFRAME_CTRL2, 0x1010)]
        );
    }

    // ── Test pattern ──────────────────────────────────────────────────

    #[test]
    fn pattern_toggle_for_1080p() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.config_video(Some(&VideoAttributes { timing: Timing::P1080_60, ..Default::default() }));

        hal.enable_pattern();
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1), (2 << 8) | (1 << 3) | 1);
        hal.disable_pattern();
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1), (2 << 8) | (1 << 3));
        assert_eq!(bus.write_count(reg::VIDEO_PAT_GEN2), 0);
    }

    #[test]
    fn pattern_576p_uses_manual_timing() {
        let bus = MockBus::new();
        let mut hal = make_hal(&bus);
        hal.config_video(Some(&VideoAttributes {
            timing: Timing::P576,
            input_format: PixelFormat::Yuv444,
            ..Default::default()
        }));
        hal.enable_pattern();

        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1), (7 << 8) | (1 << 4) | (3 << 1) | 1);
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN2), 0x360);
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN9), 0x26c);
    }

    #[test]
    fn start_enables_pattern_when_configured() {
        let bus = MockBus::new();
        Hal::new(&bus, true).start();
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1) & 1, 1);

        let bus = MockBus::new();
        Hal::new(&bus, false).start();
        assert_eq!(bus.write_count(reg::VIDEO_PAT_GEN1), 0);
    }
}

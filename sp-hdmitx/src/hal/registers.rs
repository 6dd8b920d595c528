//! SP7021 HDMI transmitter register map and status bitfields.
//!
//! Indices are 32-bit word offsets within each [`Region`]. The transmitter
//! core spans five consecutive 32-word groups (system, video, packets, audio,
//! TMDS PHY); the clock, PLL and PHY soft-config registers live in the MOON
//! control groups.

use bitflags::bitflags;

use crate::bus::{Reg, Region};

const fn moon0(index: u16) -> Reg {
    Reg::new(Region::Moon0, index)
}

const fn moon4(index: u16) -> Reg {
    Reg::new(Region::Moon4, index)
}

const fn moon5(index: u16) -> Reg {
    Reg::new(Region::Moon5, index)
}

const fn tx(index: u16) -> Reg {
    Reg::new(Region::HdmiTx, index)
}

// ── Clock and reset (MOON0) ────────────────────────────────────────────────

/// Clock enable, bank 5. Bits 31:16 are the write mask for bits 15:0.
/// - Bit 0: HDMITX clock
pub const CLKEN5: Reg = moon0(6);

/// Gated clock enable, bank 5 (masked write, as [`CLKEN5`]).
pub const GCLKEN5: Reg = moon0(16);

/// Reset control, bank 5 (masked write, as [`CLKEN5`]).
/// - Bit 0: HDMITX reset (1 = held in reset)
pub const RESET5: Reg = moon0(26);

// ── TV PLL (MOON4) ─────────────────────────────────────────────────────────

/// TV PLL control 0.
/// - Bit 31: write enable
/// - Bit 15: BYPASS (pixel clock taken straight from the 27 MHz crystal)
pub const PLLTV_CTL0: Reg = moon4(14);

/// TV PLL control 1.
/// - Bits 24:23: fixed loop settings
/// - Bits 8:7: R (post divider)
pub const PLLTV_CTL1: Reg = moon4(15);

/// TV PLL control 2.
/// - Bits 30:16: write mask
/// - Bits 15:8: M (feedback multiplier)
/// - Bits  7:0: N (pre divider)
pub const PLLTV_CTL2: Reg = moon4(16);

// ── PHY soft config (MOON5) ────────────────────────────────────────────────

/// PHY soft configuration 4.
/// - Bits 24:16: write mask
/// - Bits  8:7: ACLK_MODE
/// - Bit     6: DATA_DOUBLE
/// - Bits  5:4: KV_MODE
/// - Bits  2:0: TERM_MODE
pub const SFT_CFG4: Reg = moon5(4);

// ── System (group 0) ───────────────────────────────────────────────────────

/// Software reset, one bit per sub-block (0 = held in reset).
pub const SW_RESET: Reg = tx(1);

/// System control 1.
/// - Bit 12: fixed enable
/// - Bit  0: HDMI_MODE (0 = DVI, 1 = HDMI)
pub const SYSTEM_CTRL1: Reg = tx(2);

/// Power control. Bits 4:0 power the PHY, PLL and digital blocks.
pub const PWR_CTRL: Reg = tx(5);

/// System status (read-only), see [`SystemStatus`].
pub const SYSTEM_STATUS: Reg = tx(7);

/// Interrupt 0 unmask, see [`Interrupt0`].
pub const INTR0_UNMASK: Reg = tx(8);

/// Interrupt 1 unmask, see [`Interrupt1`].
pub const INTR1_UNMASK: Reg = tx(9);

/// Interrupt 0 status, see [`Interrupt0`].
pub const INTR0_STS: Reg = tx(11);

/// Interrupt 1 status, see [`Interrupt1`].
pub const INTR1_STS: Reg = tx(12);

/// DDC command control.
/// - Bits 10:8: command
/// - Bit     0: start
pub const DDC_CTRL: Reg = tx(16);

/// DDC byte offset for the next sequential read.
pub const DDC_OFFSET: Reg = tx(17);

/// DDC status, see [`DdcStatus`].
pub const DDC_STATUS: Reg = tx(18);

/// Number of bytes currently held in the DDC receive FIFO.
pub const DDC_FIFO_CNT: Reg = tx(19);

/// DDC receive FIFO data port (one byte per read).
pub const DDC_FIFO_DATA: Reg = tx(20);

// ── Video (group 1) ────────────────────────────────────────────────────────

/// Video control 1 (color-space conversion).
/// - Bit  12: DOWN_SAMPLE (4:4:4 → 4:2:2)
/// - Bit  11: UP_SAMPLE (4:2:2 → 4:4:4)
/// - Bit   9: CSC_MANUAL
/// - Bit   8: CSC_ON
/// - Bits 7:4: CSC mode (colorimetry, conversion type, RGB range, YCC range)
pub const VIDEO_CTRL1: Reg = tx(32);

/// Video format.
/// - Bits 6:4: color depth code (4 = 24 bit .. 7 = 48 bit)
/// - Bits 1:0: HSYNC/VSYNC polarity inversion
pub const VIDEO_FORMAT: Reg = tx(34);

/// Video pattern generator control.
/// - Bit  11: interlace
/// - Bits 10:8: video mode
/// - Bits  7:6: step
/// - Bit   5: BT.709
/// - Bit   4: YUV444
/// - Bit   3: RGB
/// - Bits  2:1: HSYNC/VSYNC inversion
/// - Bit   0: enable
pub const VIDEO_PAT_GEN1: Reg = tx(40);

/// Pattern generator manual timing registers 2..9.
pub const VIDEO_PAT_GEN2: Reg = tx(41);
pub const VIDEO_PAT_GEN3: Reg = tx(42);
pub const VIDEO_PAT_GEN4: Reg = tx(43);
pub const VIDEO_PAT_GEN5: Reg = tx(44);
pub const VIDEO_PAT_GEN6: Reg = tx(45);
pub const VIDEO_PAT_GEN7: Reg = tx(46);
pub const VIDEO_PAT_GEN8: Reg = tx(47);
pub const VIDEO_PAT_GEN9: Reg = tx(48);

// ── Packets (group 2) ──────────────────────────────────────────────────────

/// InfoFrame control 1 (AVI / audio packet enables and repeat bits).
pub const INFOFRAME_CTRL1: Reg = tx(64);

/// InfoFrame control 2 (general control packet enables).
pub const INFOFRAME_CTRL2: Reg = tx(65);

/// AVI InfoFrame payload, two bytes per register (low byte first).
pub const AVI_INFOFRAME: [Reg; 7] = [tx(68), tx(69), tx(70), tx(71), tx(72), tx(73), tx(74)];

/// Audio InfoFrame payload, two bytes per register (low byte first).
pub const AUDIO_INFOFRAME: [Reg; 6] = [tx(80), tx(81), tx(82), tx(83), tx(84), tx(85)];

// ── Audio (group 3) ────────────────────────────────────────────────────────

/// Audio control 1.
/// - Bits 15:14: fixed
/// - Bits 13:12: fixed
/// - Bit     10: fixed
/// - Bits   7:4: channel enable
/// - Bit      0: audio enable
pub const AUDIO_CTRL1: Reg = tx(96);

/// Audio control 2.
pub const AUDIO_CTRL2: Reg = tx(97);

/// IEC 60958 channel status word 2 (sampling frequency field).
pub const AUDIO_CHNL_STS2: Reg = tx(101);

/// SPDIF control.
/// - Bits 6:1: fixed
/// - Bit    0: SPDIF input (0 = I2S)
pub const AUDIO_SPDIF_CTRL: Reg = tx(106);

/// Audio clock regeneration configuration.
pub const ARC_CONFIG1: Reg = tx(108);

/// Audio clock regeneration N value.
pub const ARC_N_VALUE1: Reg = tx(110);

// ── TMDS PHY (group 4) ─────────────────────────────────────────────────────

/// TMDS TX control 1.
/// - Bits 15:12: ECTR_MODE
/// - Bit     11: EMP
/// - Bit     10: CLK_DETECTOR
/// - Bits   9:8: FCKDV_MODE
/// - Bits   7:4: CKINV_MODE
/// - Bit      1: FROM_ODD
/// - Bit      0: CLK_INV
pub const TMDSTX_CTRL1: Reg = tx(128);

/// TMDS TX control 2.
/// - Bits 15:12: ICP_MOD_MODE
/// - Bits  10:8: PD_D_MODE
/// - Bits   7:4: CPST_MODE
/// - Bit      1: ICP_MODE
pub const TMDSTX_CTRL2: Reg = tx(129);

/// TMDS TX control 3.
/// - Bits 15:13: BGR_MODE
/// - Bits  11:8: SW_CTRL
/// - Bits   4:0: DSEL_MODE
pub const TMDSTX_CTRL3: Reg = tx(130);

/// TMDS TX control 4.
/// - Bits 15:10: IRT_MODE
/// - Bits   5:0: DCNST_MODE
pub const TMDSTX_CTRL4: Reg = tx(131);

/// TMDS TX control 5.
/// - Bit 1: RV_MODEL
pub const TMDSTX_CTRL5: Reg = tx(132);

// ── Bitfields ──────────────────────────────────────────────────────────────

bitflags! {
    /// Interrupt group 0 (status and unmask registers share the layout).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interrupt0: u32 {
        const HPD = 1 << 0;
        const RSEN = 1 << 1;
        const TCLK_FREQ = 1 << 2;
        const VSYNC = 1 << 3;
        const CEC = 1 << 4;
        const CTS = 1 << 5;
        const AUDIO_FIFO_EMPTY = 1 << 6;
        const AUDIO_FIFO_FULL = 1 << 7;
    }
}

bitflags! {
    /// Interrupt group 1.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Interrupt1: u32 {
        const DDC_FIFO_FULL = 1 << 0;
    }
}

bitflags! {
    /// Live link status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SystemStatus: u32 {
        const RSEN_IN = 1 << 0;
        const HPD_IN = 1 << 1;
        const PLL_READY = 1 << 2;
        const TMDS_CLK_DETECT = 1 << 3;
    }
}

bitflags! {
    /// DDC engine status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdcStatus: u32 {
        const CMD_DONE = 1 << 0;
        const FIFO_FULL = 1 << 1;
    }
}

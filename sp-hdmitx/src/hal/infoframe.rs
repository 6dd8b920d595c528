//! CEA-861 InfoFrame packets.
//!
//! Each packet is a fixed byte buffer: type, version, length, checksum, then
//! the payload. The checksum makes the byte sum of the whole packet zero
//! (mod 256). The transmitter takes packets as 16-bit register words, low
//! byte first, with the checksum in the low byte of the first word.

/// Replace the `mask`-wide field at `bit` in `src` with `value`.
///
/// Bits outside the field are preserved; bits of `value` outside `mask` are
/// dropped.
pub const fn mask_pack(src: u32, mask: u32, bit: u32, value: u32) -> u32 {
    (src & !(mask << bit)) | ((value & mask) << bit)
}

fn mask_pack_u8(src: u8, mask: u8, bit: u32, value: u8) -> u8 {
    mask_pack(src as u32, mask as u32, bit, value as u32) as u8
}

/// Checksum byte for `packet`, ignoring whatever sits at offset 3.
fn checksum(packet: &[u8]) -> u8 {
    let sum = packet
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 3)
        .fold(0u8, |acc, (_, b)| acc.wrapping_add(*b));
    0u8.wrapping_sub(sum)
}

/// Pack `packet` (checksum already stored) into register words.
fn register_words<const W: usize>(packet: &[u8]) -> [u32; W] {
    let mut words = [0u32; W];
    words[0] = packet[3] as u32 | (packet[4] as u32) << 8;
    for (i, word) in words.iter_mut().enumerate().skip(1) {
        let lo = packet[3 + 2 * i] as u32;
        let hi = packet.get(4 + 2 * i).copied().unwrap_or(0) as u32;
        *word = lo | hi << 8;
    }
    words
}

// ── AVI ────────────────────────────────────────────────────────────────────

pub const AVI_INFOFRAME_TYPE: u8 = 0x82;
pub const AVI_INFOFRAME_VERSION: u8 = 0x02;
pub const AVI_INFOFRAME_LENGTH: u8 = 13;
pub const AVI_INFOFRAME_SIZE: usize = 4 + AVI_INFOFRAME_LENGTH as usize;

/// Y1:Y0 field of AVI data byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AviColorSpace {
    Rgb = 0,
    Yuv422 = 1,
    Yuv444 = 2,
}

/// M1:M0 field of AVI data byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureAspect {
    None = 0,
    Aspect4_3 = 1,
    Aspect16_9 = 2,
}

/// C1:C0 field of AVI data byte 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorimetry {
    None = 0,
    Itu601 = 1,
    Itu709 = 2,
}

/// CEA-861 video identification codes of the supported timings.
pub mod vic {
    pub const P480_4_3: u8 = 2;
    pub const P720_60: u8 = 4;
    pub const P1080_60: u8 = 16;
    pub const P576_4_3: u8 = 17;
}

/// AVI InfoFrame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AviInfoFrame {
    bytes: [u8; AVI_INFOFRAME_SIZE],
}

impl Default for AviInfoFrame {
    /// Active format present, bar/scan defaults, BT.601, 4:3, VIC 2.
    fn default() -> Self {
        AviInfoFrame {
            bytes: [
                AVI_INFOFRAME_TYPE,
                AVI_INFOFRAME_VERSION,
                AVI_INFOFRAME_LENGTH,
                0x00,
                0x1c,
                0x58,
                0x00,
                0x02,
                0x00,
                0x24,
                0x00,
                0x04,
                0x02,
                0x7a,
                0x00,
                0x4a,
                0x03,
            ],
        }
    }
}

impl AviInfoFrame {
    pub fn set_color_space(&mut self, cs: AviColorSpace) {
        self.bytes[4] = mask_pack_u8(self.bytes[4], 0x3, 5, cs as u8);
    }

    pub fn set_aspect(&mut self, aspect: PictureAspect) {
        self.bytes[5] = mask_pack_u8(self.bytes[5], 0x3, 4, aspect as u8);
    }

    pub fn set_colorimetry(&mut self, colorimetry: Colorimetry) {
        self.bytes[5] = mask_pack_u8(self.bytes[5], 0x3, 6, colorimetry as u8);
    }

    pub fn set_vic(&mut self, vic: u8) {
        self.bytes[7] = mask_pack_u8(self.bytes[7], 0x7f, 0, vic);
    }

    pub fn set_pixel_repetition(&mut self, factor: u8) {
        self.bytes[8] = mask_pack_u8(self.bytes[8], 0xf, 0, factor);
    }

    pub fn color_space(&self) -> u8 {
        (self.bytes[4] >> 5) & 0x3
    }

    pub fn aspect(&self) -> u8 {
        (self.bytes[5] >> 4) & 0x3
    }

    pub fn colorimetry(&self) -> u8 {
        (self.bytes[5] >> 6) & 0x3
    }

    pub fn vic(&self) -> u8 {
        self.bytes[7] & 0x7f
    }

    /// Recompute and store the checksum byte.
    pub fn update_checksum(&mut self) -> u8 {
        self.bytes[3] = checksum(&self.bytes);
        self.bytes[3]
    }

    pub fn as_bytes(&self) -> &[u8; AVI_INFOFRAME_SIZE] {
        &self.bytes
    }

    /// Register words for the AVI packet registers.
    pub fn register_words(&self) -> [u32; 7] {
        register_words(&self.bytes)
    }
}

// ── Audio ──────────────────────────────────────────────────────────────────

pub const AUDIO_INFOFRAME_TYPE: u8 = 0x84;
pub const AUDIO_INFOFRAME_VERSION: u8 = 0x01;
pub const AUDIO_INFOFRAME_LENGTH: u8 = 10;
pub const AUDIO_INFOFRAME_SIZE: usize = 4 + AUDIO_INFOFRAME_LENGTH as usize;

/// Audio InfoFrame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioInfoFrame {
    bytes: [u8; AUDIO_INFOFRAME_SIZE],
}

impl Default for AudioInfoFrame {
    /// Coding type and sample format from stream header, two channels.
    fn default() -> Self {
        let mut bytes = [0u8; AUDIO_INFOFRAME_SIZE];
        bytes[0] = AUDIO_INFOFRAME_TYPE;
        bytes[1] = AUDIO_INFOFRAME_VERSION;
        bytes[2] = AUDIO_INFOFRAME_LENGTH;
        bytes[4] = 0x01;
        AudioInfoFrame { bytes }
    }
}

impl AudioInfoFrame {
    /// CC2:CC0 holds the channel count minus one.
    pub fn set_channel_count(&mut self, channels: u8) {
        self.bytes[4] = mask_pack_u8(self.bytes[4], 0x7, 0, channels.saturating_sub(1));
    }

    pub fn channel_count(&self) -> u8 {
        (self.bytes[4] & 0x7) + 1
    }

    /// Recompute and store the checksum byte.
    pub fn update_checksum(&mut self) -> u8 {
        self.bytes[3] = checksum(&self.bytes);
        self.bytes[3]
    }

    pub fn as_bytes(&self) -> &[u8; AUDIO_INFOFRAME_SIZE] {
        &self.bytes
    }

    /// Register words for the audio packet registers.
    pub fn register_words(&self) -> [u32; 6] {
        register_words(&self.bytes)
    }
}

//! Transmitter session and poll loop.
//!
//! # Example
//!
//! ```ignore
//! static STOP: AtomicBool = AtomicBool::new(false);
//!
//! let tx = HdmiTx::new(bus, Capabilities::default());
//! tx.init();
//!
//! // Interrupt handler:
//! tx.handle_interrupt();
//!
//! // Worker:
//! tx.run(&mut delay, &STOP);
//!
//! // Control:
//! tx.set_timing(Timing::P720_60);
//! tx.enable_display()?;
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};
use spin::Mutex;

use super::command::{Command, Response};
use super::config::{ColorSpaceConversion, TxConfig, TxMode};
use super::edid::EdidCapture;
use super::{Capabilities, Error, State};
use crate::bus::RegisterBus;
use crate::constants::{EDID_RETRY_US, EDID_TIMEOUT, POLL_INTERVAL_MS};
use crate::control::DisplayControl;
use crate::hal::infoframe::{AudioInfoFrame, AviInfoFrame};
use crate::hal::registers::{DdcStatus, Interrupt0, Interrupt1, SystemStatus};
use crate::hal::{link, AudioAttributes, ColorDepth, Hal, HalConfig, Timing};

/// Link flags, written only by the interrupt handler.
struct LinkFlags {
    hpd_in: AtomicBool,
    rx_ready: AtomicBool,
}

/// Everything the poll loop and the control calls serialize on.
struct Session<B> {
    state: State,
    /// Configuration last committed by `enable_display`.
    active: TxConfig,
    /// Configuration being edited by the setters.
    pending: TxConfig,
    hal: Hal<B>,
}

/// HDMI transmitter driver.
///
/// The bus handle is cloned: one copy stays outside the session lock for the
/// interrupt handler and the EDID read, the other is owned by the HAL.
pub struct HdmiTx<B> {
    bus: B,
    caps: Capabilities,
    link: LinkFlags,
    edid: EdidCapture,
    session: Mutex<Session<B>>,
}

impl<B: RegisterBus + Clone> HdmiTx<B> {
    pub fn new(bus: B, caps: Capabilities) -> Self {
        let hal = Hal::new(bus.clone(), caps.test_pattern).with_edid_interrupt(caps.edid_read);
        HdmiTx {
            bus,
            caps,
            link: LinkFlags {
                hpd_in: AtomicBool::new(false),
                rx_ready: AtomicBool::new(false),
            },
            edid: EdidCapture::new(),
            session: Mutex::new(Session {
                state: State::Init,
                active: TxConfig::default(),
                pending: TxConfig::default(),
                hal,
            }),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Bring up the hardware, reset both configurations and start waiting
    /// for hot-plug.
    pub fn init(&self) {
        let mut s = self.session.lock();
        s.hal.init();
        s.active = TxConfig::default();
        s.pending = s.active;
        s.state = State::Hpd;
        info!("HDMITX installed");
    }

    pub fn deinit(&self) {
        let mut s = self.session.lock();
        s.hal.deinit();
        s.state = State::Init;
        info!("HDMITX uninstalled");
    }

    // ── Interrupt path ─────────────────────────────────────────────────

    /// Service the transmitter interrupt.
    ///
    /// Updates the link flags and acknowledges the sources. Never takes the
    /// session lock.
    pub fn handle_interrupt(&self) {
        if link::interrupt0_status(&self.bus, Interrupt0::HPD) {
            let plugged = link::system_status(&self.bus, SystemStatus::HPD_IN);
            self.link.hpd_in.store(plugged, Ordering::Release);
            if plugged {
                info!("HDMI plug in");
            } else {
                info!("HDMI plug out");
            }
            link::clear_interrupt0(&self.bus, Interrupt0::HPD);
        }

        if link::interrupt0_status(&self.bus, Interrupt0::RSEN) {
            let sensed = link::system_status(&self.bus, SystemStatus::RSEN_IN);
            self.link.rx_ready.store(sensed, Ordering::Release);
            if sensed {
                info!("HDMI rsen in");
            } else {
                info!("HDMI rsen out");
            }
            link::clear_interrupt0(&self.bus, Interrupt0::RSEN);
        }

        if self.caps.edid_read && link::interrupt1_status(&self.bus, Interrupt1::DDC_FIFO_FULL) {
            if link::ddc_status(&self.bus, DdcStatus::FIFO_FULL) {
                self.edid.drain(&self.bus);
            }
            link::clear_interrupt1(&self.bus, Interrupt1::DDC_FIFO_FULL);
        }
    }

    // ── Poll loop ──────────────────────────────────────────────────────

    /// Run one state-machine step. `delay` paces the EDID read.
    ///
    /// Each step re-checks the state under the session lock before moving
    /// on, so a concurrent `deinit` or `enable_display` is never undone.
    pub fn poll<D: DelayNs>(&self, delay: &mut D) {
        let state = self.session.lock().state;
        match state {
            State::Init => {}
            State::Hpd => self.process_hpd(delay),
            State::Rsen => self.process_rsen(),
            State::Hdcp => self.process_hdcp(),
        }
    }

    /// Poll every [`POLL_INTERVAL_MS`] until `stop` is set.
    pub fn run<D: DelayNs>(&self, delay: &mut D, stop: &AtomicBool) {
        while !stop.load(Ordering::Acquire) {
            self.poll(delay);
            delay.delay_ms(POLL_INTERVAL_MS);
        }
    }

    fn process_hpd<D: DelayNs>(&self, delay: &mut D) {
        debug!("HPD State");

        if !self.hpd_in() {
            return;
        }
        // TODO: assert AV mute here once the general control packet is
        // programmable.
        if self.caps.edid_read && self.read_edid(delay) {
            debug!("EDID read done");
        }

        let mut s = self.session.lock();
        if s.state == State::Hpd {
            s.state = State::Rsen;
        }
    }

    fn process_rsen(&self) {
        debug!("RSEN State");

        let mut s = self.session.lock();
        if s.state != State::Rsen {
            return;
        }
        if self.hpd_in() && self.rx_ready() {
            let active = s.active;
            s.hal.stop();
            s.hal.set_hdmi_mode(active.mode == TxMode::Hdmi);
            s.hal.config_video(Some(&active.video.attributes()));
            s.hal.config_audio(Some(&active.audio));
            s.hal.start();
            s.state = State::Hdcp;
        } else {
            s.state = self.demoted();
        }
    }

    fn process_hdcp(&self) {
        debug!("HDCP State");

        if self.hpd_in() && self.rx_ready() {
            if self.caps.hdcp_auth {
                debug!("HDCP authentication not supported");
            }
            return;
        }

        let mut s = self.session.lock();
        if s.state == State::Hdcp {
            s.state = self.demoted();
        }
    }

    /// Target state after losing hot-plug or receiver sense.
    fn demoted(&self) -> State {
        if !self.hpd_in() {
            debug!("hpd out");
            State::Hpd
        } else {
            debug!("rsen out");
            State::Rsen
        }
    }

    /// Read the sink EDID into the capture buffer.
    ///
    /// The interrupt handler moves FIFO contents into the buffer; this loop
    /// only re-issues the DDC command. Gives up after [`EDID_TIMEOUT`]
    /// waits, keeping whatever was captured.
    fn read_edid<D: DelayNs>(&self, delay: &mut D) -> bool {
        self.edid.reset();
        link::ddc_sequential_read(&self.bus, 0);

        let mut timeout = EDID_TIMEOUT;
        while !self.edid.is_complete() {
            if link::ddc_status(&self.bus, DdcStatus::CMD_DONE) {
                link::ddc_sequential_read(&self.bus, self.edid.offset());
            }
            delay.delay_us(EDID_RETRY_US);
            if timeout == 0 {
                info!("EDID read timeout");
                return false;
            }
            timeout -= 1;
        }
        true
    }

    // ── Link state ─────────────────────────────────────────────────────

    pub fn state(&self) -> State {
        self.session.lock().state
    }

    /// Hot-plug detected. Always `true` without hot-plug detection.
    pub fn hpd_in(&self) -> bool {
        !self.caps.hpd_detection || self.link.hpd_in.load(Ordering::Acquire)
    }

    /// Receiver sense detected.
    pub fn rx_ready(&self) -> bool {
        self.link.rx_ready.load(Ordering::Acquire)
    }

    /// Copy the captured EDID bytes into `out`.
    pub fn edid(&self, out: &mut [u8]) -> usize {
        self.edid.copy_to(out)
    }

    // ── Configuration ──────────────────────────────────────────────────

    pub fn set_timing(&self, timing: Timing) {
        self.session.lock().pending.video.timing = timing;
    }

    /// Timing of the active configuration.
    pub fn timing(&self) -> Timing {
        self.session.lock().active.video.timing
    }

    pub fn set_color_depth(&self, depth: ColorDepth) {
        self.session.lock().pending.video.color_depth = depth;
    }

    /// Color depth of the active configuration.
    pub fn color_depth(&self) -> ColorDepth {
        self.session.lock().active.video.color_depth
    }

    pub fn set_mode(&self, mode: TxMode) {
        self.session.lock().pending.mode = mode;
    }

    pub fn set_conversion(&self, conversion: ColorSpaceConversion) {
        self.session.lock().pending.video.conversion = conversion;
    }

    pub fn set_audio(&self, audio: AudioAttributes) {
        self.session.lock().pending.audio = audio;
    }

    pub fn pending_config(&self) -> TxConfig {
        self.session.lock().pending
    }

    pub fn active_config(&self) -> TxConfig {
        self.session.lock().active
    }

    /// Configuration currently held by the HAL.
    pub fn hal_config(&self) -> HalConfig {
        *self.session.lock().hal.config()
    }

    pub fn avi_infoframe(&self) -> AviInfoFrame {
        *self.session.lock().hal.avi_infoframe()
    }

    pub fn audio_infoframe(&self) -> AudioInfoFrame {
        *self.session.lock().hal.audio_infoframe()
    }

    // ── Output control ─────────────────────────────────────────────────

    /// Commit the pending configuration.
    ///
    /// Fails without side effects unless the receiver is ready. On success
    /// the next poll reprograms the transmitter.
    pub fn enable_display(&self) -> Result<(), Error> {
        if !self.rx_ready() {
            warn!("enable display rejected: {}", Error::RxNotReady);
            return Err(Error::RxNotReady);
        }

        let mut s = self.session.lock();
        s.active = s.pending;
        s.state = State::Rsen;
        Ok(())
    }

    /// Stop packet transmission. The state machine is left alone.
    pub fn disable_display(&self) {
        self.session.lock().hal.stop();
    }

    /// Switch the output to the internal pattern generator.
    ///
    /// Works regardless of [`Capabilities::test_pattern`], which only
    /// controls whether `start()` turns the pattern on by itself.
    pub fn enable_pattern(&self) {
        self.session.lock().hal.enable_pattern();
    }

    pub fn disable_pattern(&self) {
        self.session.lock().hal.disable_pattern();
    }

    // ── Commands ───────────────────────────────────────────────────────

    pub fn execute(&self, cmd: Command) -> Result<Response, Error> {
        let response = match cmd {
            Command::SetTiming(timing) => {
                self.set_timing(timing);
                Response::Done
            }
            Command::GetTiming => Response::Timing(self.timing()),
            Command::SetColorDepth(depth) => {
                self.set_color_depth(depth);
                Response::Done
            }
            Command::GetColorDepth => Response::ColorDepth(self.color_depth()),
            Command::GetRxReady => Response::RxReady(self.rx_ready()),
            Command::Display(true) => {
                self.enable_display()?;
                Response::Done
            }
            Command::Display(false) => {
                self.disable_display();
                Response::Done
            }
            Command::PatternGenerator(true) => {
                self.enable_pattern();
                Response::Done
            }
            Command::PatternGenerator(false) => {
                self.disable_pattern();
                Response::Done
            }
        };
        Ok(response)
    }
}

// ── Trait implementation ───────────────────────────────────────────────────

impl<B: RegisterBus + Clone> DisplayControl for HdmiTx<B> {
    type Error = Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.enable_display()
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.disable_display();
        Ok(())
    }

    fn pattern(&mut self, on: bool) -> Result<(), Self::Error> {
        if on {
            self.enable_pattern();
        } else {
            self.disable_pattern();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::command;
    use crate::hal::registers as reg;
    use crate::mock::MockBus;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn make_tx(bus: &MockBus, caps: Capabilities) -> HdmiTx<&MockBus> {
        let tx = HdmiTx::new(bus, caps);
        tx.init();
        tx
    }

    /// Raise interrupt group 0 with the given system status.
    fn raise(bus: &MockBus, tx: &HdmiTx<&MockBus>, irq: Interrupt0, status: SystemStatus) {
        bus.set(reg::SYSTEM_STATUS, status.bits());
        bus.set(reg::INTR0_STS, irq.bits());
        tx.handle_interrupt();
    }

    #[test]
    fn init_enters_hpd_and_deinit_returns_to_init() {
        let bus = MockBus::new();
        let tx = HdmiTx::new(&bus, Capabilities::default());
        assert_eq!(tx.state(), State::Init);
        tx.poll(&mut NoDelay);
        assert_eq!(tx.state(), State::Init);

        tx.init();
        assert_eq!(tx.state(), State::Hpd);
        assert_eq!(tx.active_config(), TxConfig::default());
        assert_eq!(bus.get(reg::INTR0_UNMASK), 0x3);

        tx.deinit();
        assert_eq!(tx.state(), State::Init);
        assert_eq!(bus.get(reg::INTR0_UNMASK), 0);
    }

    #[test]
    fn interrupt_updates_flags_and_clears_status() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities { hpd_detection: true, ..Default::default() });
        assert!(!tx.hpd_in());

        raise(&bus, &tx, Interrupt0::HPD | Interrupt0::RSEN, SystemStatus::HPD_IN | SystemStatus::RSEN_IN);
        assert!(tx.hpd_in());
        assert!(tx.rx_ready());
        assert_eq!(bus.get(reg::INTR0_STS), 0);

        raise(&bus, &tx, Interrupt0::RSEN, SystemStatus::HPD_IN);
        assert!(tx.hpd_in());
        assert!(!tx.rx_ready());
    }

    #[test]
    fn interrupt_without_pending_source_keeps_flags() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());
        bus.set(reg::SYSTEM_STATUS, SystemStatus::RSEN_IN.bits());
        tx.handle_interrupt();
        assert!(!tx.rx_ready());
    }

    #[test]
    fn hpd_reads_asserted_without_detection() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());
        assert!(tx.hpd_in());
        tx.poll(&mut NoDelay);
        assert_eq!(tx.state(), State::Rsen);
    }

    #[test]
    fn setters_only_touch_pending() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());
        bus.clear_log();

        tx.set_timing(Timing::P1080_60);
        tx.set_color_depth(ColorDepth::Bits36);
        tx.set_mode(TxMode::Dvi);
        tx.set_conversion(ColorSpaceConversion::FullRgbToFullRgb);

        assert_eq!(tx.timing(), Timing::P480);
        assert_eq!(tx.color_depth(), ColorDepth::Bits24);
        let pending = tx.pending_config();
        assert_eq!(pending.video.timing, Timing::P1080_60);
        assert_eq!(pending.mode, TxMode::Dvi);
        assert!(bus.writes().is_empty());
    }

    #[test]
    fn enable_display_rejected_without_receiver() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());
        tx.set_timing(Timing::P720_60);

        assert_eq!(tx.enable_display(), Err(Error::RxNotReady));
        assert_eq!(tx.active_config(), TxConfig::default());
        assert_eq!(tx.state(), State::Hpd);
    }

    #[test]
    fn disable_display_keeps_state() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());
        tx.disable_display();
        assert_eq!(tx.state(), State::Hpd);
        assert_eq!(bus.get(reg::INFOFRAME_CTRL1), 0x1010);
    }

    #[test]
    fn pattern_commands_ignore_start_capability() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities { test_pattern: false, ..Default::default() });
        assert!(!tx.capabilities().test_pattern);

        assert_eq!(tx.execute(Command::PatternGenerator(true)), Ok(Response::Done));
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1) & 1, 1);
        assert_eq!(tx.execute(Command::PatternGenerator(false)), Ok(Response::Done));
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1) & 1, 0);
    }

    #[test]
    fn edid_read_unmasks_fifo_interrupt() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities { edid_read: true, ..Default::default() });
        assert!(tx.capabilities().edid_read);
        assert_eq!(bus.get(reg::INTR1_UNMASK), Interrupt1::DDC_FIFO_FULL.bits());

        tx.deinit();
        assert_eq!(bus.get(reg::INTR1_UNMASK), 0);

        let bus = MockBus::new();
        make_tx(&bus, Capabilities::default());
        assert_eq!(bus.write_count(reg::INTR1_UNMASK), 0);
    }

    #[test]
    fn execute_commands() {
        let bus = MockBus::new();
        let tx = make_tx(&bus, Capabilities::default());

        let run = |nr, arg| tx.execute(Command::decode(nr, arg)?);
        assert_eq!(run(command::SET_TIMING, 3), Ok(Response::Done));
        assert_eq!(run(command::GET_RX_READY, 0), Ok(Response::RxReady(false)));
        assert_eq!(run(command::DISPLAY, 1), Err(Error::RxNotReady));

        raise(&bus, &tx, Interrupt0::RSEN, SystemStatus::RSEN_IN);
        assert_eq!(run(command::DISPLAY, 1), Ok(Response::Done));
        assert_eq!(run(command::GET_TIMING, 0), Ok(Response::Timing(Timing::P1080_60)));
        assert_eq!(run(command::GET_COLOR_DEPTH, 0), Ok(Response::ColorDepth(ColorDepth::Bits24)));
        assert_eq!(run(0x20, 0), Err(Error::InvalidCommand));
    }

    #[test]
    fn display_control_delegates() {
        fn cycle<C: DisplayControl>(out: &mut C) -> Result<(), C::Error> {
            out.pattern(true)?;
            out.disable()?;
            out.enable()
        }

        let bus = MockBus::new();
        let mut tx = make_tx(&bus, Capabilities::default());
        assert_eq!(cycle(&mut tx), Err(Error::RxNotReady));
        assert_eq!(bus.get(reg::VIDEO_PAT_GEN1) & 1, 1);

        raise(&bus, &tx, Interrupt0::RSEN, SystemStatus::RSEN_IN);
        assert_eq!(cycle(&mut tx), Ok(()));
        assert_eq!(tx.state(), State::Rsen);
    }
}

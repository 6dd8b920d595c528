//! Hot-plug simulation on the host.
//!
//! Runs the transmitter state machine against a simulated register file.
//! A "sink" plugs in, asserts receiver sense, the user commits 720p, then
//! the cable is pulled. Every transition is logged to stdout.
//!
//! ```text
//!   main thread ── plug / rsen events ──► SimBus ──► handle_interrupt()
//!   poll thread ── HdmiTx::run() every 1 ms
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::{info, LevelFilter, Log, Metadata, Record};

use sp_hdmitx::bus::{Reg, RegisterBus};
use sp_hdmitx::driver::{Capabilities, HdmiTx};
use sp_hdmitx::hal::registers::{self as reg, Interrupt0, SystemStatus};
use sp_hdmitx::hal::{ColorDepth, Timing};

// ── Logger ─────────────────────────────────────────────────────────────────

struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

// ── Simulated hardware ─────────────────────────────────────────────────────

/// Register file shared by the driver and the simulated sink.
#[derive(Default)]
struct SimBus {
    regs: Mutex<HashMap<Reg, u32>>,
}

impl SimBus {
    /// Change the sink's line state and raise the matching interrupts.
    fn sink(&self, hpd: bool, rsen: bool) {
        let mut regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
        let old = SystemStatus::from_bits_truncate(*regs.get(&reg::SYSTEM_STATUS).unwrap_or(&0));

        let mut status = SystemStatus::empty();
        status.set(SystemStatus::HPD_IN, hpd);
        status.set(SystemStatus::RSEN_IN, rsen);

        let mut irq = Interrupt0::empty();
        irq.set(Interrupt0::HPD, old.contains(SystemStatus::HPD_IN) != hpd);
        irq.set(Interrupt0::RSEN, old.contains(SystemStatus::RSEN_IN) != rsen);

        regs.insert(reg::SYSTEM_STATUS, status.bits());
        *regs.entry(reg::INTR0_STS).or_insert(0) |= irq.bits();
    }
}

impl RegisterBus for SimBus {
    fn read(&self, reg: Reg) -> u32 {
        let regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
        regs.get(&reg).copied().unwrap_or(0)
    }

    fn write(&self, reg: Reg, value: u32) {
        let mut regs = self.regs.lock().unwrap_or_else(|e| e.into_inner());
        regs.insert(reg, value);
    }
}

struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

// ── Scenario ───────────────────────────────────────────────────────────────

fn settle() {
    thread::sleep(Duration::from_millis(20));
}

fn main() {
    log::set_logger(&LOGGER).expect("logger already set");
    log::set_max_level(LevelFilter::Info);

    let bus = SimBus::default();
    let caps = Capabilities { hpd_detection: true, ..Default::default() };
    let tx = HdmiTx::new(&bus, caps);
    let stop = AtomicBool::new(false);

    tx.init();

    thread::scope(|s| {
        s.spawn(|| tx.run(&mut StdDelay, &stop));

        let irq = |hpd, rsen| {
            bus.sink(hpd, rsen);
            tx.handle_interrupt();
            settle();
            info!("state: {:?}", tx.state());
        };

        irq(true, false);

        tx.set_timing(Timing::P720_60);
        tx.set_color_depth(ColorDepth::Bits30);
        if let Err(e) = tx.enable_display() {
            info!("enable display before rsen: {}", e);
        }

        irq(true, true);
        tx.enable_display().expect("receiver is ready");
        settle();
        info!("active timing: {:?}, depth: {:?}", tx.timing(), tx.color_depth());
        info!("AVI InfoFrame: {:02x?}", tx.avi_infoframe().as_bytes());
        info!("audio InfoFrame: {:02x?}", tx.audio_infoframe().as_bytes());
        info!("VIDEO_FORMAT = {:#06x}", bus.read(reg::VIDEO_FORMAT));

        irq(true, false);
        irq(false, false);

        stop.store(true, Ordering::Release);
    });

    tx.deinit();
}

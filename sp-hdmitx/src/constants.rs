/// Interval between two state-machine polls, in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 1;

/// Size of the EDID capture buffer (base block plus one extension block).
pub const EDID_CAPACITY: usize = 256;

/// Depth of the DDC receive FIFO.
pub const DDC_FIFO_CAPACITY: usize = 16;

/// Iterations of the EDID read loop before giving up.
pub const EDID_TIMEOUT: u32 = 10_000;

/// Wait between two EDID read-loop iterations, in microseconds.
pub const EDID_RETRY_US: u32 = 10;

use std::sync::OnceLock;
use std::time::Instant;

/// Raw counters captured from the kernel in a single pass.
///
/// `core_times_ns` holds one cumulative counter per core. The values only
/// become meaningful as deltas between two captures; a single sample says
/// nothing about load.
#[derive(Debug, Clone)]
pub struct CpuSample {
    /// Monotonic timestamp taken at the start of the capture, in nanoseconds.
    pub wall_time_ns: u64,
    /// Accumulated idle-thread runtime per core, in nanoseconds.
    pub core_times_ns: Vec<u64>,
}

impl CpuSample {
    pub fn core_count(&self) -> usize {
        self.core_times_ns.len()
    }
}

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Nanoseconds of monotonic time since the first call in this process.
pub fn monotonic_ns() -> u64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

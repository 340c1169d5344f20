use std::io;

use crate::system::sample::{CpuSample, monotonic_ns};

/// Upper bound on the number of cores the display handles; discovered counts
/// are capped, not rejected.
pub const MAX_CORES: usize = 32;

/// Per-core cumulative time counter, queried one core at a time.
///
/// Implemented by the platform backends and by in-memory fakes in tests.
pub trait CpuTimeSource {
    fn core_time_ns(&mut self, core: usize) -> io::Result<u64>;
}

/// Captures timestamped per-core counter vectors from a [`CpuTimeSource`].
///
/// The core count is fixed at construction, so every sample this produces has
/// the same vector length for the life of the process.
pub struct Sampler<S> {
    source: S,
    core_count: usize,
}

impl<S: CpuTimeSource> Sampler<S> {
    pub fn new(source: S, core_count: usize) -> Self {
        if core_count > MAX_CORES {
            tracing::warn!(
                core_count,
                max = MAX_CORES,
                "core count above the supported maximum, capping"
            );
        }
        Sampler {
            source,
            core_count: core_count.min(MAX_CORES),
        }
    }

    pub fn core_count(&self) -> usize {
        self.core_count
    }

    /// Takes one full sample.
    ///
    /// The wall timestamp is read before any core query, so it marks the
    /// moment capture began. A core whose query fails is recorded as zero
    /// rather than aborting the capture; the returned vector always has
    /// `core_count` entries.
    pub fn capture(&mut self) -> CpuSample {
        let wall_time_ns = monotonic_ns();
        let mut core_times_ns = Vec::with_capacity(self.core_count);
        for core in 0..self.core_count {
            match self.source.core_time_ns(core) {
                Ok(time_ns) => core_times_ns.push(time_ns),
                Err(error) => {
                    tracing::warn!(core, %error, "core time query failed, recording zero");
                    core_times_ns.push(0);
                }
            }
        }
        CpuSample {
            wall_time_ns,
            core_times_ns,
        }
    }
}

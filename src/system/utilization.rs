use crate::system::sample::CpuSample;

/// Per-core load derived from two consecutive samples.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilizationVector {
    /// One percentage per core, each in `[0, 100]`.
    pub per_core: Vec<f64>,
    /// Arithmetic mean of `per_core`, also in `[0, 100]`.
    pub average: f64,
}

impl UtilizationVector {
    /// All-zero vector, used before the first delta is available.
    pub fn idle(core_count: usize) -> Self {
        UtilizationVector {
            per_core: vec![0.0; core_count],
            average: 0.0,
        }
    }
}

/// Converts two time-ordered samples into a per-core load vector.
///
/// The per-core counter accumulates runtime of that core's idle thread, so a
/// counter delta measures time the core spent off real work and load is 100
/// minus the idle share of the wall-clock delta. The subtraction is the whole
/// semantic of the counter: do not change the sign convention without
/// confirming what the underlying thread accounts for.
///
/// Degenerate inputs never panic and never produce values outside `[0, 100]`:
/// a zero or backward wall-clock delta yields all-zero loads, a regressed or
/// wrapped core counter clamps that core to zero, and a core missing from
/// `previous` reports zero.
pub fn utilization(previous: &CpuSample, current: &CpuSample) -> UtilizationVector {
    let wall_delta = current.wall_time_ns.saturating_sub(previous.wall_time_ns);
    let core_count = current.core_count();

    if wall_delta == 0 {
        return UtilizationVector::idle(core_count);
    }

    let mut per_core = Vec::with_capacity(core_count);
    for (core, &current_time) in current.core_times_ns.iter().enumerate() {
        let load = match previous.core_times_ns.get(core) {
            Some(&previous_time) => {
                // wrapping_sub: a wrapped or regressed counter produces a
                // huge delta, which the clamp below floors at zero.
                let idle_delta = current_time.wrapping_sub(previous_time);
                100.0 - (idle_delta as f64 / wall_delta as f64 * 100.0)
            }
            None => 0.0,
        };
        per_core.push(load.clamp(0.0, 100.0));
    }

    let average = if per_core.is_empty() {
        0.0
    } else {
        per_core.iter().sum::<f64>() / per_core.len() as f64
    };

    UtilizationVector { per_core, average }
}

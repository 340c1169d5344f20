/// Memory figures shown alongside the load line.
///
/// `total_bytes` is captured once at start-up and never changes afterwards;
/// the other two fields are re-derived each cycle from the free-memory
/// source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
}

impl MemorySnapshot {
    /// Derives used/free figures from the fixed total and the source's
    /// current answer. A reported free figure larger than the total is capped
    /// so `used_bytes + free_bytes == total_bytes` always holds.
    pub fn capture(total_bytes: u64, source: &mut dyn FreeMemorySource) -> Self {
        let free_bytes = source.free_bytes().min(total_bytes);
        MemorySnapshot {
            total_bytes,
            used_bytes: total_bytes - free_bytes,
            free_bytes,
        }
    }
}

/// Source of the free-memory figure, kept behind a trait so a real
/// accounting backend can replace the stub without touching the capture
/// path.
pub trait FreeMemorySource {
    fn free_bytes(&mut self) -> u64;
}

/// Placeholder backend that always reports zero free bytes, making the
/// display show used == total. Wiring up a real figure means walking the
/// kernel's free page lists, which no backend does yet.
pub struct StubFreeMemory;

impl FreeMemorySource for StubFreeMemory {
    fn free_bytes(&mut self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFree(u64);

    impl FreeMemorySource for FixedFree {
        fn free_bytes(&mut self) -> u64 {
            self.0
        }
    }

    #[test]
    fn stub_reports_all_memory_used() {
        let total = 8 * 1024 * 1024 * 1024;
        let snapshot = MemorySnapshot::capture(total, &mut StubFreeMemory);
        assert_eq!(snapshot.total_bytes, total);
        assert_eq!(snapshot.used_bytes, total);
        assert_eq!(snapshot.free_bytes, 0);
    }

    #[test]
    fn stub_handles_extreme_totals_without_overflow() {
        for total in [0, 1, u64::MAX] {
            let snapshot = MemorySnapshot::capture(total, &mut StubFreeMemory);
            assert_eq!(snapshot.used_bytes, total);
            assert_eq!(snapshot.free_bytes, 0);
        }
    }

    #[test]
    fn real_source_answer_splits_the_total() {
        let snapshot = MemorySnapshot::capture(1_000, &mut FixedFree(300));
        assert_eq!(snapshot.used_bytes, 700);
        assert_eq!(snapshot.free_bytes, 300);
    }

    #[test]
    fn free_figure_is_capped_at_the_total() {
        let snapshot = MemorySnapshot::capture(1_000, &mut FixedFree(5_000));
        assert_eq!(snapshot.used_bytes, 0);
        assert_eq!(snapshot.free_bytes, 1_000);
    }
}

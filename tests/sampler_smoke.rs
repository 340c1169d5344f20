#![cfg(any(target_os = "linux", target_os = "nto"))]

use std::thread;
use std::time::Duration;

use coretop::system::platform::{self, CpuTimes};
use coretop::system::sampler::Sampler;
use coretop::system::utilization::utilization;

#[test]
fn startup_probes_answer_on_the_host() {
    let core_count = platform::core_count().expect("core count should be discoverable");
    assert!(core_count >= 1);

    let total = platform::total_memory_bytes().expect("total memory should be discoverable");
    assert!(total > 0);
}

#[test]
fn native_capture_cycle_produces_plausible_loads() {
    let core_count = platform::core_count().expect("core count should be discoverable");
    let source = CpuTimes::open().expect("cpu time source should open on the host");
    let mut sampler = Sampler::new(source, core_count);

    let previous = sampler.capture();
    thread::sleep(Duration::from_millis(50));
    let current = sampler.capture();

    assert!(current.wall_time_ns > previous.wall_time_ns);
    assert_eq!(previous.core_times_ns.len(), sampler.core_count());
    assert_eq!(current.core_times_ns.len(), sampler.core_count());
    // Cumulative counters never step backward between captures.
    for (prev, curr) in previous.core_times_ns.iter().zip(&current.core_times_ns) {
        assert!(curr >= prev, "core counter regressed: {prev} -> {curr}");
    }

    let result = utilization(&previous, &current);
    assert_eq!(result.per_core.len(), sampler.core_count());
    assert!(
        result
            .per_core
            .iter()
            .all(|&load| (0.0..=100.0).contains(&load))
    );
    assert!((0.0..=100.0).contains(&result.average));
}

use coretop::system::memory::MemorySnapshot;
use coretop::system::utilization::UtilizationVector;
use coretop::ui::{banner, status_line};
use insta::assert_snapshot;

fn quad_core_reading() -> UtilizationVector {
    UtilizationVector {
        per_core: vec![0.0, 25.0, 50.0, 100.0],
        average: 43.75,
    }
}

fn rpi4_memory() -> MemorySnapshot {
    // 4 GB board with the stub free-memory source: used == total.
    MemorySnapshot {
        total_bytes: 4 * 1024 * 1024 * 1024,
        used_bytes: 4 * 1024 * 1024 * 1024,
        free_bytes: 0,
    }
}

#[test]
fn per_core_status_line_is_stable() {
    let line = status_line(&quad_core_reading(), &rpi4_memory(), true);
    assert_snapshot!("status_line_per_core", line);
}

#[test]
fn average_only_status_line_is_stable() {
    let line = status_line(&quad_core_reading(), &rpi4_memory(), false);
    assert_snapshot!("status_line_average_only", line);
}

#[test]
fn startup_banner_is_stable() {
    let line = banner(4, &rpi4_memory());
    assert_snapshot!("startup_banner", line);
}

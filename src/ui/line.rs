use crate::format::{format_bytes, format_percent};
use crate::system::memory::MemorySnapshot;
use crate::system::utilization::UtilizationVector;

/// One-shot banner printed above the refreshing line at start-up.
pub fn banner(core_count: usize, memory: &MemorySnapshot) -> String {
    format!(
        "coretop: {} cores, {} RAM (press q to quit)",
        core_count,
        format_bytes(memory.total_bytes)
    )
}

/// Composes the refreshing status line. Pure string work so the exact layout
/// stays pinned by tests.
pub fn status_line(
    utilization: &UtilizationVector,
    memory: &MemorySnapshot,
    show_per_core: bool,
) -> String {
    let mut line = String::from("CPU ");
    if show_per_core {
        for (core, &load) in utilization.per_core.iter().enumerate() {
            line.push_str(&format!("[{core}] {} ", format_percent(load)));
        }
        line.push_str(&format!("| avg {} ", format_percent(utilization.average)));
    } else {
        line.push_str(&format!("avg {} ", format_percent(utilization.average)));
    }
    line.push_str(&format!("| mem {}", format_bytes(memory.used_bytes)));
    line
}

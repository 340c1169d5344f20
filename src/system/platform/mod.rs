use std::io;

/// One-shot start-up queries answered by the platform backend. Both values
/// are treated as fixed for the life of the process.
pub trait PlatformProbe {
    fn core_count() -> io::Result<usize>;
    fn total_memory_bytes() -> io::Result<u64>;
}

#[cfg(target_os = "nto")]
mod qnx;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "nto")]
use qnx as platform_impl;
#[cfg(target_os = "linux")]
use linux as platform_impl;

pub use platform_impl::CpuTimes;

pub fn core_count() -> io::Result<usize> {
    platform_impl::Platform::core_count()
}

pub fn total_memory_bytes() -> io::Result<u64> {
    platform_impl::Platform::total_memory_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_answer_on_the_host() {
        assert!(core_count().is_ok_and(|count| count >= 1));
        assert!(total_memory_bytes().is_ok_and(|bytes| bytes > 0));
    }
}

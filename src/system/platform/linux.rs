use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use sysinfo::System;

use super::PlatformProbe;
use crate::system::sampler::CpuTimeSource;

pub struct Platform;

impl PlatformProbe for Platform {
    fn core_count() -> io::Result<usize> {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        let count = sys.cpus().len();
        if count == 0 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "no cpus reported"));
        }
        Ok(count)
    }

    fn total_memory_bytes() -> io::Result<u64> {
        let mut sys = System::new();
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "total memory reported as zero",
            ));
        }
        Ok(total)
    }
}

/// Per-core idle time from `/proc/stat`, converted from clock ticks to
/// nanoseconds. The file is opened once and rewound before every query;
/// each core is read independently so one malformed line cannot spoil the
/// readings of the others.
pub struct CpuTimes {
    stat: File,
    tick_ns: u64,
}

impl CpuTimes {
    /// Opens `/proc/stat`, held for the life of the process.
    pub fn open() -> io::Result<Self> {
        let stat = File::open("/proc/stat")?;
        // SAFETY: sysconf has no preconditions.
        let ticks_per_sec = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if ticks_per_sec <= 0 {
            return Err(io::Error::other("sysconf(_SC_CLK_TCK) failed"));
        }
        Ok(CpuTimes {
            stat,
            tick_ns: 1_000_000_000 / ticks_per_sec as u64,
        })
    }
}

impl CpuTimeSource for CpuTimes {
    fn core_time_ns(&mut self, core: usize) -> io::Result<u64> {
        self.stat.seek(SeekFrom::Start(0))?;
        let mut contents = String::new();
        self.stat.read_to_string(&mut contents)?;
        idle_time_ns(&contents, core, self.tick_ns)
    }
}

fn idle_time_ns(stat: &str, core: usize, tick_ns: u64) -> io::Result<u64> {
    let prefix = format!("cpu{core} ");
    let line = stat
        .lines()
        .find(|line| line.starts_with(&prefix))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("cpu{core} missing from /proc/stat"),
            )
        })?;
    // Line layout: cpuN user nice system idle iowait irq softirq ...
    let idle_ticks: u64 = line
        .split_whitespace()
        .nth(4)
        .and_then(|field| field.parse().ok())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("malformed cpu{core} line in /proc/stat"),
            )
        })?;
    Ok(idle_ticks.saturating_mul(tick_ns))
}

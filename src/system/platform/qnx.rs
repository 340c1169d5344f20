use std::ffi::{CStr, c_char, c_int, c_void};
use std::fs::File;
use std::io;
use std::mem;
use std::os::fd::AsRawFd;
use std::ptr;

use super::PlatformProbe;
use crate::system::sampler::CpuTimeSource;

/// Address space node of process 1 (procnto). Thread status queries go
/// through devctl on this descriptor; opening it needs root.
const PROCNTO_AS: &str = "/proc/1/as";

// Command encoding from <devctl.h>: direction bits, payload size, class,
// code.
const fn diotf(class: u32, code: u32, size: usize) -> c_int {
    (0xc000_0000u32 | ((size as u32) << 16) | (class << 8) | code) as c_int
}

const DCMD_CLASS_PROC: u32 = 0x08;
const DCMD_PROC_TIDSTATUS: c_int = diotf(DCMD_CLASS_PROC, 12, mem::size_of::<DebugThread>());

/// Thread status block filled in by `DCMD_PROC_TIDSTATUS`, mirroring the
/// layout in <sys/debug.h>. Only `tid` (written before the call) and
/// `sutime` are consumed; the signal and register data in between is
/// declared as opaque padding.
#[repr(C)]
#[allow(dead_code)]
struct DebugThread {
    pid: i32,
    tid: i32,
    flags: u32,
    why: u16,
    what: u16,
    ip: u64,
    sp: u64,
    stkbase: u64,
    tls: u64,
    stksize: u32,
    tid_flags: u32,
    priority: u8,
    real_priority: u8,
    policy: u8,
    state: u8,
    syscall: i16,
    last_cpu: u16,
    timeout: u32,
    last_chid: i32,
    sig_data: [u8; 160],
    start_time: u64,
    /// Accumulated execution time of the thread, in nanoseconds.
    sutime: u64,
    reserved: [u8; 8],
}

/// Section locator inside the system page.
#[repr(C)]
struct SyspageSection {
    entry_off: u16,
    entry_size: u16,
}

/// Leading fields of the system page from <sys/syspage.h>. Only `num_cpu`
/// and the `asinfo` and `strings` locators are read; the real structure
/// continues past this prefix and is only ever accessed through a pointer.
#[repr(C)]
#[allow(dead_code)]
struct Syspage {
    size: u16,
    total_size: u16,
    type_: u16,
    num_cpu: u16,
    system_private: SyspageSection,
    asinfo: SyspageSection,
    meminfo: SyspageSection,
    hwinfo: SyspageSection,
    cpuinfo: SyspageSection,
    cacheattr: SyspageSection,
    qtime: SyspageSection,
    callout: SyspageSection,
    callin: SyspageSection,
    typed_strings: SyspageSection,
    strings: SyspageSection,
}

/// Address range descriptor from the syspage `asinfo` section. Physical RAM
/// shows up as one or more ranges whose name resolves to "ram".
#[repr(C)]
#[allow(dead_code)]
struct AsinfoEntry {
    start: u64,
    end: u64,
    owner: u16,
    name: u16,
    attr: u16,
    priority: u16,
    alloc_checker: *const c_void,
    spare: u32,
}

unsafe extern "C" {
    static _syspage_ptr: *const Syspage;

    fn devctl(
        fd: c_int,
        dcmd: c_int,
        dev_data_ptr: *mut c_void,
        n_bytes: usize,
        dev_info_ptr: *mut c_int,
    ) -> c_int;
}

pub struct Platform;

impl PlatformProbe for Platform {
    fn core_count() -> io::Result<usize> {
        // SAFETY: the system page is mapped read-only into every process
        // before main runs.
        let count = unsafe { (*_syspage_ptr).num_cpu } as usize;
        if count == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "system page reports zero cpus",
            ));
        }
        Ok(count)
    }

    fn total_memory_bytes() -> io::Result<u64> {
        // SAFETY: section offsets come from the mapped system page itself
        // and all entries are only read.
        let total = unsafe {
            let page = &*_syspage_ptr;
            let base = _syspage_ptr as *const u8;
            let strings = base.add(page.strings.entry_off as usize);
            let entries = base.add(page.asinfo.entry_off as usize) as *const AsinfoEntry;
            let count = page.asinfo.entry_size as usize / mem::size_of::<AsinfoEntry>();

            let mut total: u64 = 0;
            for index in 0..count {
                let entry = &*entries.add(index);
                let name = CStr::from_ptr(strings.add(entry.name as usize) as *const c_char);
                if name.to_bytes() == b"ram" {
                    total += entry.end - entry.start + 1;
                }
            }
            total
        };
        if total == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "no ram ranges in the system page",
            ));
        }
        Ok(total)
    }
}

/// Idle-thread runtime source backed by procnto's procfs node.
pub struct CpuTimes {
    proc_as: File,
}

impl CpuTimes {
    /// Opens the procnto address-space node used by every later query.
    pub fn open() -> io::Result<Self> {
        let proc_as = File::open(PROCNTO_AS)?;
        Ok(CpuTimes { proc_as })
    }
}

impl CpuTimeSource for CpuTimes {
    fn core_time_ns(&mut self, core: usize) -> io::Result<u64> {
        // procnto's idle threads are its first threads, one per core, with
        // 1-based tids.
        // SAFETY: DebugThread is plain integer data, zeroed is a valid value.
        let mut status: DebugThread = unsafe { mem::zeroed() };
        status.tid = core as i32 + 1;

        // devctl reports failure as a returned errno value, not through -1.
        // SAFETY: status outlives the call and n_bytes matches its size.
        let rc = unsafe {
            devctl(
                self.proc_as.as_raw_fd(),
                DCMD_PROC_TIDSTATUS,
                (&raw mut status).cast(),
                mem::size_of::<DebugThread>(),
                ptr::null_mut(),
            )
        };
        if rc != 0 {
            return Err(io::Error::from_raw_os_error(rc));
        }
        Ok(status.sutime)
    }
}

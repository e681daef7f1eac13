//! Process memory sampling backed by `sysinfo`.

use std::sync::Mutex;

use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::debug;

/// Memory usage of the current process, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    /// Resident set size.
    pub resident: u64,
    /// Virtual memory size.
    pub virtual_size: u64,
}

/// Samples memory of the current process on demand.
///
/// Keeps one `System` between samples so each refresh only touches this
/// process.
pub struct MemorySampler {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl MemorySampler {
    /// Resolves the current pid. Sampling reports zeros if that fails.
    #[must_use]
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                debug!(error = err, "cannot resolve current pid");
                None
            }
        };
        Self {
            system: Mutex::new(System::new()),
            pid,
        }
    }

    /// Refreshes the current process and reads its memory figures.
    pub fn sample(&self) -> MemoryUsage {
        let Some(pid) = self.pid else {
            return MemoryUsage::default();
        };
        let Ok(mut system) = self.system.lock() else {
            debug!("memory sampler lock poisoned");
            return MemoryUsage::default();
        };

        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system
            .process(pid)
            .map_or_else(MemoryUsage::default, |process| MemoryUsage {
                resident: process.memory(),
                virtual_size: process.virtual_memory(),
            })
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

//! Host capability detection.
//!
//! Probes which resource limits the host can enforce so the assembler can
//! drop limits that would otherwise fail at container start. Detection never
//! fails; a missing facility is reported as unsupported with a warning.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{cgroup_files, host_paths};

/// What the host supports.
///
/// Pass `None` instead of a `SysInfo` to [`crate::parse`] to skip all
/// capability clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysInfo {
    /// Memory cgroup limits are enforced.
    pub memory_limit: bool,
    /// Swap accounting is enabled, so swap can be limited.
    pub swap_limit: bool,
    pub ipv4_forwarding_disabled: bool,
    pub apparmor: bool,
}

impl SysInfo {
    /// A host that supports every limit.
    pub fn unrestricted() -> Self {
        Self {
            memory_limit: true,
            swap_limit: true,
            ipv4_forwarding_disabled: false,
            apparmor: true,
        }
    }

    /// Probe the running host at the standard locations.
    pub fn detect() -> Self {
        HostProbe::default().detect()
    }

    /// Probe the running host using a different cgroup mount root.
    pub fn detect_at(cgroup_root: impl Into<PathBuf>) -> Self {
        HostProbe::default().cgroup_root(cgroup_root).detect()
    }
}

/// Locations consulted by [`SysInfo::detect`].
#[derive(Debug, Clone)]
pub struct HostProbe {
    cgroup_root: PathBuf,
    ip_forward: PathBuf,
    apparmor: PathBuf,
}

impl Default for HostProbe {
    fn default() -> Self {
        Self {
            cgroup_root: PathBuf::from(host_paths::CGROUP_ROOT),
            ip_forward: PathBuf::from(host_paths::IPV4_FORWARD),
            apparmor: PathBuf::from(host_paths::APPARMOR),
        }
    }
}

impl HostProbe {
    pub fn cgroup_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.cgroup_root = path.into();
        self
    }

    pub fn ip_forward(mut self, path: impl Into<PathBuf>) -> Self {
        self.ip_forward = path.into();
        self
    }

    pub fn apparmor(mut self, path: impl Into<PathBuf>) -> Self {
        self.apparmor = path.into();
        self
    }

    pub fn detect(&self) -> SysInfo {
        let (memory_limit, swap_limit) = self.memory_support();
        let info = SysInfo {
            memory_limit,
            swap_limit,
            ipv4_forwarding_disabled: self.ipv4_forwarding_disabled(),
            apparmor: self.apparmor.exists(),
        };
        tracing::debug!(?info, cgroup_root = %self.cgroup_root.display(), "Detected host capabilities");
        info
    }

    fn memory_support(&self) -> (bool, bool) {
        let controllers = self.cgroup_root.join(cgroup_files::V2_CONTROLLERS);
        if controllers.exists() {
            return memory_support_v2(&controllers);
        }
        memory_support_v1(&self.cgroup_root.join(cgroup_files::V1_MEMORY_DIR))
    }

    fn ipv4_forwarding_disabled(&self) -> bool {
        match fs::read_to_string(&self.ip_forward) {
            Ok(value) => !value.starts_with('1'),
            Err(e) => {
                tracing::debug!(path = %self.ip_forward.display(), error = %e, "Cannot read IPv4 forwarding state");
                true
            }
        }
    }
}

fn memory_support_v2(controllers: &Path) -> (bool, bool) {
    let listed = fs::read_to_string(controllers)
        .map(|content| content.split_whitespace().any(|c| c == "memory"))
        .unwrap_or(false);
    if !listed {
        tracing::warn!("Memory controller not enabled in the cgroup v2 hierarchy");
    }
    (listed, listed)
}

fn memory_support_v1(memory_dir: &Path) -> (bool, bool) {
    let memory_limit = memory_dir.join(cgroup_files::V1_MEMORY_LIMIT).exists()
        && memory_dir.join(cgroup_files::V1_MEMORY_SOFT_LIMIT).exists();
    if !memory_limit {
        tracing::warn!("Your kernel does not support cgroup memory limit");
    }

    let swap_limit = memory_dir.join(cgroup_files::V1_MEMSW_LIMIT).exists();
    if !swap_limit {
        tracing::warn!("Your kernel does not support cgroup swap limit");
    }

    (memory_limit, swap_limit)
}

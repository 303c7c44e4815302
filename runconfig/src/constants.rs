//! Constants for run option parsing
//!
//! Centralized location for defaults and host paths.

/// Option defaults applied when a flag is absent.
pub mod defaults {
    /// Network mode used when `--net` is not given.
    pub const NETWORK_MODE: &str = "bridge";

    /// Cgroup permissions granted to a device mapping (read, write, mknod).
    pub const DEVICE_PERMISSIONS: &str = "rwm";

    /// Protocol assumed for a port without a `/proto` suffix.
    pub const PORT_PROTOCOL: &str = "tcp";
}

/// Host paths consulted by capability detection.
pub mod host_paths {
    /// Default cgroup mount root.
    pub const CGROUP_ROOT: &str = "/sys/fs/cgroup";

    pub const IPV4_FORWARD: &str = "/proc/sys/net/ipv4/ip_forward";

    pub const APPARMOR: &str = "/sys/kernel/security/apparmor";
}

/// Cgroup file names.
pub mod cgroup_files {
    /// Present at the root of a cgroup v2 unified hierarchy.
    pub const V2_CONTROLLERS: &str = "cgroup.controllers";

    /// Memory controller directory in a cgroup v1 layout.
    pub const V1_MEMORY_DIR: &str = "memory";

    pub const V1_MEMORY_LIMIT: &str = "memory.limit_in_bytes";
    pub const V1_MEMORY_SOFT_LIMIT: &str = "memory.soft_limit_in_bytes";
    pub const V1_MEMSW_LIMIT: &str = "memory.memsw.limit_in_bytes";
}

pub mod envs {
    pub const RUNCONFIG_CGROUP_ROOT: &str = "RUNCONFIG_CGROUP_ROOT";
    pub const RUNCONFIG_FORMAT: &str = "RUNCONFIG_FORMAT";
}

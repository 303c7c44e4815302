//! Output records handed to container creation.
//!
//! Field names serialize in the PascalCase layout container engines expect
//! (`Hostname`, `ExposedPorts`, `PortBindings`, ...).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::FormatError;
use crate::nat::{Port, PortBinding};
use crate::parsers::network::parse_net_mode;

// ============================================================================
// Sub-records
// ============================================================================

/// A host device made available inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceMapping {
    pub path_on_host: String,
    pub path_in_container: String,
    /// Subset of `rwm` (read, write, mknod).
    pub cgroup_permissions: String,
}

/// A restart policy that actually restarts something.
///
/// "No policy" (`""` or `"no"` on the command line) is `None` in
/// [`HostConfig::restart_policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Name", rename_all = "kebab-case")]
pub enum RestartPolicy {
    Always,
    OnFailure {
        /// Zero means no limit.
        #[serde(rename = "MaximumRetryCount", default)]
        maximum_retry_count: u32,
    },
}

impl RestartPolicy {
    /// Policy name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            RestartPolicy::Always => "always",
            RestartPolicy::OnFailure { .. } => "on-failure",
        }
    }

    pub fn maximum_retry_count(&self) -> u32 {
        match self {
            RestartPolicy::Always => 0,
            RestartPolicy::OnFailure {
                maximum_retry_count,
            } => *maximum_retry_count,
        }
    }
}

impl fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartPolicy::Always => f.write_str("always"),
            RestartPolicy::OnFailure {
                maximum_retry_count: 0,
            } => f.write_str("on-failure"),
            RestartPolicy::OnFailure {
                maximum_retry_count,
            } => write!(f, "on-failure:{maximum_retry_count}"),
        }
    }
}

/// Network stack of the container.
///
/// Holds the string exactly as given (`bridge`, `none`, `host`,
/// `container:<name|id>`). Only values accepted by the network mode parser
/// can be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NetworkMode(String);

impl NetworkMode {
    pub(crate) fn from_validated(mode: String) -> Self {
        Self(mode)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn kind(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    pub fn is_bridge(&self) -> bool {
        self.kind() == "bridge"
    }

    pub fn is_none(&self) -> bool {
        self.kind() == "none"
    }

    pub fn is_host(&self) -> bool {
        self.kind() == "host"
    }

    /// Name or id of the container whose network stack is shared.
    pub fn container(&self) -> Option<&str> {
        match self.0.split_once(':') {
            Some(("container", reference)) => Some(reference),
            _ => None,
        }
    }
}

impl Default for NetworkMode {
    fn default() -> Self {
        Self(crate::constants::defaults::NETWORK_MODE.to_string())
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NetworkMode {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_net_mode(&value)
    }
}

impl From<NetworkMode> for String {
    fn from(mode: NetworkMode) -> Self {
        mode.0
    }
}

/// Swap limit of the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemorySwap {
    /// Left to the engine default.
    #[default]
    Default,
    /// Swap is not limited separately from memory.
    Unlimited,
}

impl MemorySwap {
    /// Integer form used by container engines (0 = default, -1 = unlimited).
    pub fn as_bytes(&self) -> i64 {
        match self {
            MemorySwap::Default => 0,
            MemorySwap::Unlimited => -1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValuePair {
    pub key: String,
    pub value: String,
}

// ============================================================================
// Config
// ============================================================================

/// Host-independent container configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub hostname: String,
    pub domainname: String,
    pub exposed_ports: BTreeSet<Port>,
    pub user: String,
    pub tty: bool,
    pub network_disabled: bool,
    pub open_stdin: bool,
    /// Memory limit in bytes, 0 when unlimited.
    pub memory: u64,
    pub memory_swap: MemorySwap,
    pub cpu_shares: i64,
    pub cpuset: String,
    pub attach_stdin: bool,
    pub attach_stdout: bool,
    pub attach_stderr: bool,
    /// `KEY=VALUE` entries; env-file entries come first so explicit ones win on lookup.
    pub env: Vec<String>,
    pub cmd: Vec<String>,
    pub image: String,
    /// Container paths of named volumes (bind mounts live in [`HostConfig::binds`]).
    pub volumes: BTreeSet<String>,
    pub entrypoint: Option<Vec<String>>,
    pub working_dir: String,
    /// Close stdin once the attached client disconnects.
    pub stdin_once: bool,
}

// ============================================================================
// HostConfig
// ============================================================================

/// Configuration that depends on the host the container runs on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostConfig {
    /// `host:container[:mode]` bind mounts, in command-line order.
    pub binds: Vec<String>,
    #[serde(rename = "ContainerIDFile")]
    pub container_id_file: String,
    pub lxc_conf: Vec<KeyValuePair>,
    pub privileged: bool,
    pub port_bindings: BTreeMap<Port, Vec<PortBinding>>,
    pub links: Vec<String>,
    pub publish_all_ports: bool,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
    pub volumes_from: Vec<String>,
    pub network_mode: NetworkMode,
    pub devices: Vec<DeviceMapping>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,
    pub restart_policy: Option<RestartPolicy>,
}

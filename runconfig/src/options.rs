//! Raw option values collected from one `run` invocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::defaults;
use crate::error::ValidationError;

// ============================================================================
// Attach Streams
// ============================================================================

/// Standard stream a client can attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachStream {
    Stdin,
    Stdout,
    Stderr,
}

impl AttachStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachStream::Stdin => "stdin",
            AttachStream::Stdout => "stdout",
            AttachStream::Stderr => "stderr",
        }
    }
}

/// Case-insensitive: `STDIN`, `stdin` and `StdIn` are all accepted.
impl FromStr for AttachStream {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stdin" => Ok(AttachStream::Stdin),
            "stdout" => Ok(AttachStream::Stdout),
            "stderr" => Ok(AttachStream::Stderr),
            _ => Err(ValidationError::AttachStream(s.to_string())),
        }
    }
}

impl fmt::Display for AttachStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Raw Option Set
// ============================================================================

/// Every option of a `run` invocation before any cross-field resolution.
///
/// Multi-valued options keep the order they were given in. Built fresh per
/// invocation, either by [`crate::flags::RunFlags`] from argv or with
/// [`RawOptionSet::builder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOptionSet {
    pub detach: bool,
    /// `--rm`: remove the container when it exits.
    pub auto_remove: bool,
    /// Networking enabled (default true).
    pub networking: bool,
    pub privileged: bool,
    pub publish_all: bool,
    /// `-i`: keep stdin open even if not attached.
    pub stdin: bool,
    pub tty: bool,
    pub container_id_file: String,
    pub entrypoint: String,
    pub hostname: String,
    /// Memory limit as typed, e.g. `"128m"`.
    pub memory: String,
    pub user: String,
    pub working_dir: String,
    pub cpu_shares: i64,
    pub cpuset: String,
    /// Network mode as typed (default `"bridge"`).
    pub net_mode: String,
    /// Restart policy as typed (default `""`, no policy).
    pub restart_policy: String,

    pub attach: Vec<AttachStream>,
    pub volumes: Vec<String>,
    pub links: Vec<String>,
    pub devices: Vec<String>,
    pub publish: Vec<String>,
    pub expose: Vec<String>,
    pub dns: Vec<String>,
    pub dns_search: Vec<String>,
    pub volumes_from: Vec<String>,
    pub lxc_conf: Vec<String>,
    pub env: Vec<String>,
    pub env_file: Vec<String>,
    pub cap_add: Vec<String>,
    pub cap_drop: Vec<String>,

    /// Positional arguments: image reference, then command and its arguments.
    pub args: Vec<String>,
}

impl Default for RawOptionSet {
    fn default() -> Self {
        Self {
            detach: false,
            auto_remove: false,
            networking: true,
            privileged: false,
            publish_all: false,
            stdin: false,
            tty: false,
            container_id_file: String::new(),
            entrypoint: String::new(),
            hostname: String::new(),
            memory: String::new(),
            user: String::new(),
            working_dir: String::new(),
            cpu_shares: 0,
            cpuset: String::new(),
            net_mode: defaults::NETWORK_MODE.to_string(),
            restart_policy: String::new(),
            attach: Vec::new(),
            volumes: Vec::new(),
            links: Vec::new(),
            devices: Vec::new(),
            publish: Vec::new(),
            expose: Vec::new(),
            dns: Vec::new(),
            dns_search: Vec::new(),
            volumes_from: Vec::new(),
            lxc_conf: Vec::new(),
            env: Vec::new(),
            env_file: Vec::new(),
            cap_add: Vec::new(),
            cap_drop: Vec::new(),
            args: Vec::new(),
        }
    }
}

impl RawOptionSet {
    /// Create a builder starting from command-line defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use runconfig::options::{AttachStream, RawOptionSet};
    ///
    /// let options = RawOptionSet::builder()
    ///     .attach(AttachStream::Stdout)
    ///     .publish("8080:80")
    ///     .image("nginx")
    ///     .build();
    /// assert_eq!(options.args, vec!["nginx"]);
    /// ```
    pub fn builder() -> RawOptionSetBuilder {
        RawOptionSetBuilder::new()
    }

    /// Image reference, empty when no positional argument was given.
    pub fn image(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or_default()
    }

    /// Command and arguments following the image.
    pub fn command(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }
}

// ============================================================================
// Raw Option Set Builder (non-consuming)
// ============================================================================

/// Builder for [`RawOptionSet`].
///
/// Repeatable options append; scalar options overwrite.
#[derive(Debug, Clone, Default)]
pub struct RawOptionSetBuilder {
    inner: RawOptionSet,
}

impl RawOptionSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Flags
    // ─────────────────────────────────────────────────────────────────────

    pub fn detach(&mut self, enabled: bool) -> &mut Self {
        self.inner.detach = enabled;
        self
    }

    pub fn auto_remove(&mut self, enabled: bool) -> &mut Self {
        self.inner.auto_remove = enabled;
        self
    }

    pub fn networking(&mut self, enabled: bool) -> &mut Self {
        self.inner.networking = enabled;
        self
    }

    pub fn privileged(&mut self, enabled: bool) -> &mut Self {
        self.inner.privileged = enabled;
        self
    }

    pub fn publish_all(&mut self, enabled: bool) -> &mut Self {
        self.inner.publish_all = enabled;
        self
    }

    pub fn stdin(&mut self, enabled: bool) -> &mut Self {
        self.inner.stdin = enabled;
        self
    }

    pub fn tty(&mut self, enabled: bool) -> &mut Self {
        self.inner.tty = enabled;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Scalars
    // ─────────────────────────────────────────────────────────────────────

    pub fn container_id_file(&mut self, path: impl Into<String>) -> &mut Self {
        self.inner.container_id_file = path.into();
        self
    }

    pub fn entrypoint(&mut self, entrypoint: impl Into<String>) -> &mut Self {
        self.inner.entrypoint = entrypoint.into();
        self
    }

    pub fn hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.inner.hostname = hostname.into();
        self
    }

    pub fn memory(&mut self, size: impl Into<String>) -> &mut Self {
        self.inner.memory = size.into();
        self
    }

    pub fn user(&mut self, user: impl Into<String>) -> &mut Self {
        self.inner.user = user.into();
        self
    }

    pub fn working_dir(&mut self, dir: impl Into<String>) -> &mut Self {
        self.inner.working_dir = dir.into();
        self
    }

    pub fn cpu_shares(&mut self, shares: i64) -> &mut Self {
        self.inner.cpu_shares = shares;
        self
    }

    pub fn cpuset(&mut self, cpus: impl Into<String>) -> &mut Self {
        self.inner.cpuset = cpus.into();
        self
    }

    pub fn net_mode(&mut self, mode: impl Into<String>) -> &mut Self {
        self.inner.net_mode = mode.into();
        self
    }

    pub fn restart_policy(&mut self, policy: impl Into<String>) -> &mut Self {
        self.inner.restart_policy = policy.into();
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Repeatable options
    // ─────────────────────────────────────────────────────────────────────

    pub fn attach(&mut self, stream: AttachStream) -> &mut Self {
        self.inner.attach.push(stream);
        self
    }

    pub fn volume(&mut self, volume: impl Into<String>) -> &mut Self {
        self.inner.volumes.push(volume.into());
        self
    }

    pub fn link(&mut self, link: impl Into<String>) -> &mut Self {
        self.inner.links.push(link.into());
        self
    }

    pub fn device(&mut self, device: impl Into<String>) -> &mut Self {
        self.inner.devices.push(device.into());
        self
    }

    pub fn publish(&mut self, spec: impl Into<String>) -> &mut Self {
        self.inner.publish.push(spec.into());
        self
    }

    pub fn expose(&mut self, port: impl Into<String>) -> &mut Self {
        self.inner.expose.push(port.into());
        self
    }

    pub fn dns(&mut self, server: impl Into<String>) -> &mut Self {
        self.inner.dns.push(server.into());
        self
    }

    pub fn dns_search(&mut self, domain: impl Into<String>) -> &mut Self {
        self.inner.dns_search.push(domain.into());
        self
    }

    pub fn volumes_from(&mut self, container: impl Into<String>) -> &mut Self {
        self.inner.volumes_from.push(container.into());
        self
    }

    pub fn lxc_conf(&mut self, opt: impl Into<String>) -> &mut Self {
        self.inner.lxc_conf.push(opt.into());
        self
    }

    pub fn env(&mut self, entry: impl Into<String>) -> &mut Self {
        self.inner.env.push(entry.into());
        self
    }

    pub fn env_file(&mut self, path: impl Into<String>) -> &mut Self {
        self.inner.env_file.push(path.into());
        self
    }

    pub fn cap_add(&mut self, cap: impl Into<String>) -> &mut Self {
        self.inner.cap_add.push(cap.into());
        self
    }

    pub fn cap_drop(&mut self, cap: impl Into<String>) -> &mut Self {
        self.inner.cap_drop.push(cap.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Positionals
    // ─────────────────────────────────────────────────────────────────────

    /// Set the image reference, keeping any command already given.
    pub fn image(&mut self, image: impl Into<String>) -> &mut Self {
        let image = image.into();
        match self.inner.args.first_mut() {
            Some(first) => *first = image,
            None => self.inner.args.push(image),
        }
        self
    }

    /// Append command words after the image.
    pub fn command<I, S>(&mut self, words: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.inner.args.is_empty() {
            self.inner.args.push(String::new());
        }
        self.inner.args.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn build(&self) -> RawOptionSet {
        self.inner.clone()
    }
}

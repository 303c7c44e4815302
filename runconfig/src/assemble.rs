//! Build the output records from raw options and decoded values.

use tracing::{debug, warn};

use crate::envfile;
use crate::error::RunConfigResult;
use crate::nat::PortSpecs;
use crate::options::{AttachStream, RawOptionSet};
use crate::parsers::VolumeSet;
use crate::sysinfo::SysInfo;
use crate::types::{
    Config, DeviceMapping, HostConfig, KeyValuePair, MemorySwap, NetworkMode, RestartPolicy,
};
use crate::units;
use crate::validate;

/// Outputs of the sub-field parsers for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedOptions {
    pub volumes: VolumeSet,
    pub lxc_conf: Vec<KeyValuePair>,
    pub ports: PortSpecs,
    pub devices: Vec<DeviceMapping>,
    pub network_mode: NetworkMode,
    pub restart_policy: Option<RestartPolicy>,
}

/// Attach flags after defaulting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Attach {
    stdin: bool,
    stdout: bool,
    stderr: bool,
}

impl Attach {
    fn resolve(opts: &RawOptionSet) -> Self {
        if opts.attach.is_empty() {
            if opts.detach {
                return Self::default();
            }
            return Self {
                stdin: opts.stdin,
                stdout: true,
                stderr: true,
            };
        }
        Self {
            stdin: opts.attach.contains(&AttachStream::Stdin),
            stdout: opts.attach.contains(&AttachStream::Stdout),
            stderr: opts.attach.contains(&AttachStream::Stderr),
        }
    }
}

/// Combine raw options and decoded values into `(Config, HostConfig)`.
///
/// `sysinfo` clamps limits the host cannot enforce; `None` keeps every
/// requested limit. Nothing is returned unless every step succeeds.
pub fn assemble(
    opts: RawOptionSet,
    decoded: DecodedOptions,
    sysinfo: Option<&SysInfo>,
) -> RunConfigResult<(Config, HostConfig)> {
    let memory = memory_limit(&opts.memory, sysinfo)?;
    let env = environment(&opts.env_file, &opts.env)?;
    validate::restart_policy_auto_remove(decoded.restart_policy.as_ref(), opts.auto_remove)?;

    let memory_swap = match sysinfo {
        Some(info) if memory > 0 && !info.swap_limit => {
            warn!("Host does not support swap limit capabilities, memory limited without swap");
            MemorySwap::Unlimited
        }
        _ => MemorySwap::Default,
    };

    let attach = Attach::resolve(&opts);
    let (hostname, domainname) = split_hostname(&opts.hostname);
    let entrypoint = (!opts.entrypoint.is_empty()).then(|| vec![opts.entrypoint]);

    let mut args = opts.args.into_iter();
    let image = args.next().unwrap_or_default();
    let cmd: Vec<String> = args.collect();

    debug!(%image, ?attach, memory, "Assembled run configuration");

    let config = Config {
        hostname,
        domainname,
        exposed_ports: decoded.ports.exposed,
        user: opts.user,
        tty: opts.tty,
        network_disabled: !opts.networking,
        open_stdin: opts.stdin,
        memory,
        memory_swap,
        cpu_shares: opts.cpu_shares,
        cpuset: opts.cpuset,
        attach_stdin: attach.stdin,
        attach_stdout: attach.stdout,
        attach_stderr: attach.stderr,
        env,
        cmd,
        image,
        volumes: decoded.volumes.volumes,
        entrypoint,
        working_dir: opts.working_dir,
        stdin_once: opts.stdin && attach.stdin,
    };

    let host_config = HostConfig {
        binds: decoded.volumes.binds,
        container_id_file: opts.container_id_file,
        lxc_conf: decoded.lxc_conf,
        privileged: opts.privileged,
        port_bindings: decoded.ports.bindings,
        links: opts.links,
        publish_all_ports: opts.publish_all,
        dns: opts.dns,
        dns_search: opts.dns_search,
        volumes_from: opts.volumes_from,
        network_mode: decoded.network_mode,
        devices: decoded.devices,
        cap_add: opts.cap_add,
        cap_drop: opts.cap_drop,
        restart_policy: decoded.restart_policy,
    };

    Ok((config, host_config))
}

/// Memory limit in bytes. Not parsed at all when the host cannot limit memory.
fn memory_limit(raw: &str, sysinfo: Option<&SysInfo>) -> RunConfigResult<u64> {
    if raw.is_empty() {
        return Ok(0);
    }
    if sysinfo.is_some_and(|info| !info.memory_limit) {
        warn!(memory = raw, "Host does not support memory limit capabilities, limit discarded");
        return Ok(0);
    }
    Ok(units::ram_in_bytes(raw)?)
}

/// `web.example.com` is host `web` in domain `example.com`.
fn split_hostname(hostname: &str) -> (String, String) {
    match hostname.split_once('.') {
        Some((host, domain)) => (host.to_string(), domain.to_string()),
        None => (hostname.to_string(), String::new()),
    }
}

/// Env-file entries in file order, then explicit entries.
fn environment(env_files: &[String], explicit: &[String]) -> RunConfigResult<Vec<String>> {
    let mut env = Vec::new();
    for path in env_files {
        let entries = envfile::parse_env_file(path)?;
        debug!(path = %path, count = entries.len(), "Loaded env file");
        env.extend(entries);
    }
    env.extend_from_slice(explicit);
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConflictError, DelegatedError, RunConfigError};

    fn build(opts: RawOptionSet) -> (Config, HostConfig) {
        assemble(opts, DecodedOptions::default(), None).unwrap()
    }

    #[test]
    fn test_attach_defaults() {
        let (config, _) = build(RawOptionSet::builder().image("alpine").build());
        assert!(!config.attach_stdin);
        assert!(config.attach_stdout && config.attach_stderr);
        assert!(!config.stdin_once);

        let (config, _) = build(RawOptionSet::builder().stdin(true).image("alpine").build());
        assert!(config.attach_stdin && config.open_stdin && config.stdin_once);
    }

    #[test]
    fn test_detach_attaches_nothing() {
        let (config, _) = build(
            RawOptionSet::builder()
                .detach(true)
                .stdin(true)
                .image("alpine")
                .build(),
        );
        assert!(!config.attach_stdin && !config.attach_stdout && !config.attach_stderr);
        assert!(config.open_stdin);
        assert!(!config.stdin_once);
    }

    #[test]
    fn test_explicit_attach() {
        let (config, _) = build(
            RawOptionSet::builder()
                .attach(AttachStream::Stderr)
                .stdin(true)
                .image("alpine")
                .build(),
        );
        assert!(!config.attach_stdin && !config.attach_stdout && config.attach_stderr);
        assert!(!config.stdin_once);
    }

    #[test]
    fn test_hostname_split_on_first_dot() {
        let (config, _) = build(RawOptionSet::builder().hostname("web.example.com").build());
        assert_eq!(config.hostname, "web");
        assert_eq!(config.domainname, "example.com");

        let (config, _) = build(RawOptionSet::builder().hostname("web").build());
        assert_eq!(config.hostname, "web");
        assert_eq!(config.domainname, "");
    }

    #[test]
    fn test_positionals_and_entrypoint() {
        let (config, _) = build(
            RawOptionSet::builder()
                .entrypoint("/bin/sh")
                .image("busybox")
                .command(["-c", "echo hi"])
                .build(),
        );
        assert_eq!(config.image, "busybox");
        assert_eq!(config.cmd, vec!["-c", "echo hi"]);
        assert_eq!(config.entrypoint, Some(vec!["/bin/sh".to_string()]));

        let (config, _) = build(RawOptionSet::default());
        assert_eq!(config.entrypoint, None);
        assert_eq!(config.image, "");
    }

    #[test]
    fn test_memory_without_sysinfo() {
        let (config, _) = build(RawOptionSet::builder().memory("64m").build());
        assert_eq!(config.memory, 64 * 1024 * 1024);
        assert_eq!(config.memory_swap, MemorySwap::Default);
    }

    #[test]
    fn test_memory_clamped_without_memory_limit() {
        let info = SysInfo::default();
        let opts = RawOptionSet::builder().memory("not-a-size").build();
        let (config, _) = assemble(opts, DecodedOptions::default(), Some(&info)).unwrap();
        assert_eq!(config.memory, 0);
        assert_eq!(config.memory_swap, MemorySwap::Default);
    }

    #[test]
    fn test_swap_unlimited_without_swap_limit() {
        let info = SysInfo {
            memory_limit: true,
            ..SysInfo::default()
        };
        let opts = RawOptionSet::builder().memory("1g").build();
        let (config, _) = assemble(opts, DecodedOptions::default(), Some(&info)).unwrap();
        assert_eq!(config.memory, 1 << 30);
        assert_eq!(config.memory_swap, MemorySwap::Unlimited);

        let (config, _) = assemble(
            RawOptionSet::default(),
            DecodedOptions::default(),
            Some(&info),
        )
        .unwrap();
        assert_eq!(config.memory_swap, MemorySwap::Default);
    }

    #[test]
    fn test_bad_memory_is_delegated() {
        let err = assemble(
            RawOptionSet::builder().memory("12x").build(),
            DecodedOptions::default(),
            Some(&SysInfo::unrestricted()),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RunConfigError::Delegated(DelegatedError::Memory(_))
        ));
    }

    #[test]
    fn test_restart_policy_with_auto_remove() {
        let decoded = DecodedOptions {
            restart_policy: Some(RestartPolicy::OnFailure {
                maximum_retry_count: 2,
            }),
            ..DecodedOptions::default()
        };
        let err = assemble(
            RawOptionSet::builder().auto_remove(true).build(),
            decoded,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RunConfigError::Conflict(ConflictError::RestartPolicyAndAutoRemove)
        ));
    }

    #[test]
    fn test_env_file_entries_first() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.env");
        std::fs::write(&path, "# comment\nA=from-file\nB=2\n").unwrap();

        let (config, _) = build(
            RawOptionSet::builder()
                .env("A=explicit")
                .env_file(path.to_string_lossy())
                .build(),
        );
        assert_eq!(config.env, vec!["A=from-file", "B=2", "A=explicit"]);
    }

    #[test]
    fn test_missing_env_file() {
        let err = assemble(
            RawOptionSet::builder()
                .env_file("/nonexistent/runconfig/app.env")
                .build(),
            DecodedOptions::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RunConfigError::Delegated(DelegatedError::EnvFile(_))
        ));
    }

    #[test]
    fn test_networking_disabled() {
        let (config, _) = build(RawOptionSet::builder().networking(false).build());
        assert!(config.network_disabled);
    }
}

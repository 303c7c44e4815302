//! Render resolved records back into `run` arguments.
//!
//! The output re-parses (with the same host capabilities) to an equal
//! `(Config, HostConfig)` pair. Values are written in `--flag=value` form so
//! a leading `-` in a value is never read as a flag. Positionals follow a
//! `--` separator for the same reason.

use tracing::warn;

use crate::nat;
use crate::options::AttachStream;
use crate::types::{Config, HostConfig};

/// Build the argument vector for `config` and `host_config`.
///
/// Only a single-word entrypoint can be expressed on the command line;
/// further words are dropped with a warning.
///
/// ```
/// let (config, host) = runconfig::parse(["-t", "--net=none", "alpine", "sh"], None).unwrap();
/// let args = runconfig::to_args(&config, &host);
/// assert_eq!(runconfig::parse(&args, None).unwrap(), (config, host));
/// ```
pub fn to_args(config: &Config, host_config: &HostConfig) -> Vec<String> {
    let mut out = ArgWriter::default();

    let attached = [
        (config.attach_stdin, AttachStream::Stdin),
        (config.attach_stdout, AttachStream::Stdout),
        (config.attach_stderr, AttachStream::Stderr),
    ];
    if attached.iter().any(|(on, _)| *on) {
        for (_, stream) in attached.iter().filter(|(on, _)| *on) {
            out.value("--attach", stream);
        }
    } else {
        out.flag("--detach", true);
    }

    out.flag("--interactive", config.open_stdin);
    out.flag("--tty", config.tty);
    if config.network_disabled {
        out.value("--networking", "false");
    }
    out.flag("--privileged", host_config.privileged);
    out.flag("--publish-all", host_config.publish_all_ports);

    out.non_empty("--cidfile", &host_config.container_id_file);
    if let Some(words) = &config.entrypoint {
        if words.len() > 1 {
            warn!(
                dropped = ?&words[1..],
                "Only the first entrypoint word can be rendered as --entrypoint"
            );
        }
        if let Some(entrypoint) = words.first() {
            out.value("--entrypoint", entrypoint);
        }
    }
    if config.domainname.is_empty() {
        out.non_empty("--hostname", &config.hostname);
    } else {
        out.value(
            "--hostname",
            format!("{}.{}", config.hostname, config.domainname),
        );
    }
    if config.memory > 0 {
        out.value("--memory", config.memory);
    }
    out.non_empty("--user", &config.user);
    out.non_empty("--workdir", &config.working_dir);
    if config.cpu_shares != 0 {
        out.value("--cpu-shares", config.cpu_shares);
    }
    out.non_empty("--cpuset", &config.cpuset);
    out.value("--net", &host_config.network_mode);
    if let Some(policy) = &host_config.restart_policy {
        out.value("--restart", policy);
    }

    for (port, bindings) in &host_config.port_bindings {
        for binding in bindings {
            out.value("--publish", nat::format_port_spec(port, binding));
        }
    }
    for port in &config.exposed_ports {
        if !host_config.port_bindings.contains_key(port) {
            out.value("--expose", port);
        }
    }

    out.values("--volume", &config.volumes);
    out.values("--volume", &host_config.binds);
    out.values("--link", &host_config.links);
    out.values("--dns", &host_config.dns);
    out.values("--dns-search", &host_config.dns_search);
    out.values("--volumes-from", &host_config.volumes_from);
    for pair in &host_config.lxc_conf {
        out.value("--lxc-conf", format!("{}={}", pair.key, pair.value));
    }
    for device in &host_config.devices {
        out.value(
            "--device",
            format!(
                "{}:{}:{}",
                device.path_on_host, device.path_in_container, device.cgroup_permissions
            ),
        );
    }
    out.values("--cap-add", &host_config.cap_add);
    out.values("--cap-drop", &host_config.cap_drop);
    out.values("--env", &config.env);

    let mut args = out.finish();
    if !config.image.is_empty() || !config.cmd.is_empty() {
        args.push("--".to_string());
        args.push(config.image.clone());
        args.extend(config.cmd.iter().cloned());
    }
    args
}

#[derive(Default)]
struct ArgWriter {
    args: Vec<String>,
}

impl ArgWriter {
    fn flag(&mut self, name: &str, enabled: bool) {
        if enabled {
            self.args.push(name.to_string());
        }
    }

    fn value(&mut self, name: &str, value: impl std::fmt::Display) {
        self.args.push(format!("{name}={value}"));
    }

    fn non_empty(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.value(name, value);
        }
    }

    fn values<'a>(&mut self, name: &str, values: impl IntoIterator<Item = &'a String>) {
        for value in values {
            self.value(name, value);
        }
    }

    fn finish(self) -> Vec<String> {
        self.args
    }
}

//! `run` command-line flags.
//!
//! Collects argv into a [`RawOptionSet`]. Only per-value checks happen here
//! (see [`crate::opts`]); everything that relates two options is left to the
//! parse pipeline.

use clap::{ArgAction, Parser};
use std::ffi::OsString;

use crate::error::{RunConfigResult, ValidationError};
use crate::opts;
use crate::options::{AttachStream, RawOptionSet};

/// Create and start a container from an image.
///
/// `-h` is the hostname, so help is `--help` only.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "run",
    disable_help_flag = true,
    override_usage = "run [OPTIONS] IMAGE [COMMAND] [ARG...]"
)]
pub struct RunFlags {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Attach to STDIN, STDOUT or STDERR
    #[arg(short = 'a', long = "attach", value_name = "STREAM")]
    pub attach: Vec<String>,

    /// Bind mount a volume (e.g., from the host: -v /host:/container, from the image: -v /container)
    #[arg(short = 'v', long = "volume")]
    pub volumes: Vec<String>,

    /// Add link to another container in the form of name:alias
    #[arg(long = "link")]
    pub links: Vec<String>,

    /// Add a host device to the container (e.g. --device=/dev/sdc:/dev/xvdc)
    #[arg(long = "device")]
    pub devices: Vec<String>,

    /// Set environment variables
    #[arg(short = 'e', long = "env")]
    pub env: Vec<String>,

    /// Read in a line delimited file of environment variables
    #[arg(long = "env-file")]
    pub env_file: Vec<String>,

    /// Publish a container's port to the host (format: ip:hostPort:containerPort | ip::containerPort | hostPort:containerPort | containerPort)
    #[arg(short = 'p', long = "publish")]
    pub publish: Vec<String>,

    /// Expose a port from the container without publishing it to your host
    #[arg(long = "expose")]
    pub expose: Vec<String>,

    /// Set custom DNS servers
    #[arg(long = "dns")]
    pub dns: Vec<String>,

    /// Set custom DNS search domains
    #[arg(long = "dns-search")]
    pub dns_search: Vec<String>,

    /// Mount volumes from the specified container(s)
    #[arg(long = "volumes-from")]
    pub volumes_from: Vec<String>,

    /// (lxc exec-driver only) Add custom lxc options --lxc-conf="lxc.cgroup.cpuset.cpus = 0,1"
    #[arg(long = "lxc-conf")]
    pub lxc_conf: Vec<String>,

    /// Add Linux capabilities
    #[arg(long = "cap-add")]
    pub cap_add: Vec<String>,

    /// Drop Linux capabilities
    #[arg(long = "cap-drop")]
    pub cap_drop: Vec<String>,

    /// Automatically remove the container when it exits (incompatible with -d)
    #[arg(long = "rm")]
    pub auto_remove: bool,

    /// Detached mode: run container in the background
    #[arg(short = 'd', long)]
    pub detach: bool,

    /// Enable networking for this container
    #[arg(
        short = 'n',
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub networking: bool,

    /// Give extended privileges to this container
    #[arg(long)]
    pub privileged: bool,

    /// Publish all exposed ports to the host interfaces
    #[arg(short = 'P', long)]
    pub publish_all: bool,

    /// Keep STDIN open even if not attached
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// Allocate a pseudo-TTY
    #[arg(short = 't', long)]
    pub tty: bool,

    /// Write the container ID to the file
    #[arg(long, default_value = "")]
    pub cidfile: String,

    /// Overwrite the default ENTRYPOINT of the image
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub entrypoint: String,

    /// Container host name
    #[arg(short = 'h', long, default_value = "")]
    pub hostname: String,

    /// Memory limit (format: <number><optional unit>, where unit = b, k, m or g)
    #[arg(short = 'm', long, default_value = "")]
    pub memory: String,

    /// Username or UID
    #[arg(short = 'u', long, default_value = "")]
    pub user: String,

    /// Working directory inside the container
    #[arg(short = 'w', long, default_value = "")]
    pub workdir: String,

    /// CPU shares (relative weight)
    #[arg(short = 'c', long, default_value_t = 0, allow_negative_numbers = true)]
    pub cpu_shares: i64,

    /// CPUs in which to allow execution (0-3, 0,1)
    #[arg(long, default_value = "")]
    pub cpuset: String,

    /// Network mode: bridge, none, container:<name|id> or host
    #[arg(long, default_value = crate::constants::defaults::NETWORK_MODE)]
    pub net: String,

    /// Restart policy to apply when a container exits (no, on-failure[:max-retry], always)
    #[arg(long, default_value = "")]
    pub restart: String,

    /// Image, then the command and its arguments
    #[arg(value_name = "IMAGE [COMMAND] [ARG...]", trailing_var_arg = true)]
    pub args: Vec<String>,
}

impl RunFlags {
    /// Parse argv, without the program name.
    pub fn from_args<I, T>(args: I) -> RunConfigResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv = std::iter::once(OsString::from("run")).chain(args.into_iter().map(Into::into));
        Ok(Self::try_parse_from(argv)?)
    }

    /// Check and normalize each value, producing the raw option set.
    pub fn into_options(self) -> RunConfigResult<RawOptionSet> {
        let attach = self
            .attach
            .iter()
            .map(|stream| stream.parse::<AttachStream>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RawOptionSet {
            detach: self.detach,
            auto_remove: self.auto_remove,
            networking: self.networking,
            privileged: self.privileged,
            publish_all: self.publish_all,
            stdin: self.interactive,
            tty: self.tty,
            container_id_file: self.cidfile,
            entrypoint: self.entrypoint,
            hostname: self.hostname,
            memory: self.memory,
            user: self.user,
            working_dir: self.workdir,
            cpu_shares: self.cpu_shares,
            cpuset: self.cpuset,
            net_mode: self.net,
            restart_policy: self.restart,
            attach,
            volumes: map_values(self.volumes, opts::validate_path)?,
            links: map_values(self.links, opts::validate_link)?,
            devices: map_values(self.devices, opts::validate_path)?,
            publish: self.publish,
            expose: self.expose,
            dns: map_values(self.dns, opts::validate_ip_address)?,
            dns_search: map_values(self.dns_search, opts::validate_dns_search)?,
            volumes_from: self.volumes_from,
            lxc_conf: self.lxc_conf,
            env: self.env.iter().map(|entry| opts::validate_env(entry)).collect(),
            env_file: self.env_file,
            cap_add: self.cap_add,
            cap_drop: self.cap_drop,
            args: self.args,
        })
    }
}

fn map_values(
    values: Vec<String>,
    check: fn(&str) -> Result<String, ValidationError>,
) -> Result<Vec<String>, ValidationError> {
    values.iter().map(|value| check(value)).collect()
}

/// Collect argv into a raw option set.
pub fn collect<I, T>(args: I) -> RunConfigResult<RawOptionSet>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    RunFlags::from_args(args)?.into_options()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DelegatedError, RunConfigError};

    #[test]
    fn test_defaults() {
        let opts = collect(["alpine"]).unwrap();
        assert_eq!(opts, RawOptionSet::builder().image("alpine").build());
    }

    #[test]
    fn test_short_and_long_flags() {
        let opts = collect([
            "-d", "-t", "-i", "-P", "--rm", "--privileged", "-h", "box.local", "-m", "64m",
            "-u", "nobody", "-w", "/srv", "-c", "512", "--cpuset", "0,1", "--net", "host",
            "--restart", "always", "--cidfile", "/tmp/cid", "--entrypoint", "/bin/sh", "busybox",
        ])
        .unwrap();

        assert!(opts.detach && opts.tty && opts.stdin && opts.publish_all);
        assert!(opts.auto_remove && opts.privileged);
        assert_eq!(opts.hostname, "box.local");
        assert_eq!(opts.memory, "64m");
        assert_eq!(opts.user, "nobody");
        assert_eq!(opts.working_dir, "/srv");
        assert_eq!(opts.cpu_shares, 512);
        assert_eq!(opts.cpuset, "0,1");
        assert_eq!(opts.net_mode, "host");
        assert_eq!(opts.restart_policy, "always");
        assert_eq!(opts.container_id_file, "/tmp/cid");
        assert_eq!(opts.entrypoint, "/bin/sh");
        assert_eq!(opts.image(), "busybox");
    }

    #[test]
    fn test_repeatable_flags_keep_order() {
        let opts = collect([
            "-e", "B=2", "--env", "A=1", "-p", "80", "-p", "8080:8080", "-v", "/b", "-v", "/a",
            "alpine",
        ])
        .unwrap();
        assert_eq!(opts.env, vec!["B=2", "A=1"]);
        assert_eq!(opts.publish, vec!["80", "8080:8080"]);
        assert_eq!(opts.volumes, vec!["/b", "/a"]);
    }

    #[test]
    fn test_networking_flag() {
        assert!(collect(["alpine"]).unwrap().networking);
        assert!(!collect(["--networking=false", "alpine"]).unwrap().networking);
        assert!(!collect(["-n=false", "alpine"]).unwrap().networking);
        assert!(collect(["--networking", "alpine"]).unwrap().networking);
    }

    #[test]
    fn test_command_after_image_keeps_hyphens() {
        let opts = collect(["-t", "busybox", "ls", "-la", "-d"]).unwrap();
        assert!(opts.tty);
        assert!(!opts.detach, "-d after the image belongs to the command");
        assert_eq!(opts.image(), "busybox");
        assert_eq!(opts.command(), ["ls", "-la", "-d"]);
    }

    #[test]
    fn test_attach_validation() {
        let opts = collect(["-a", "STDOUT", "alpine"]).unwrap();
        assert_eq!(opts.attach, vec![AttachStream::Stdout]);

        let err = collect(["-a", "stdweird", "alpine"]).unwrap_err();
        assert!(matches!(
            err,
            RunConfigError::Validation(ValidationError::AttachStream(_))
        ));
    }

    #[test]
    fn test_value_validation() {
        assert!(matches!(
            collect(["-v", "relative", "alpine"]).unwrap_err(),
            RunConfigError::Validation(ValidationError::RelativePath(_))
        ));
        assert!(matches!(
            collect(["--link", "nolias", "alpine"]).unwrap_err(),
            RunConfigError::Validation(ValidationError::Link(_))
        ));
        assert!(matches!(
            collect(["--dns", "resolver", "alpine"]).unwrap_err(),
            RunConfigError::Validation(ValidationError::IpAddress(_))
        ));
        assert!(matches!(
            collect(["--dns-search", "1234", "alpine"]).unwrap_err(),
            RunConfigError::Validation(ValidationError::Domain(_))
        ));
    }

    #[test]
    fn test_unknown_flag_is_delegated() {
        let err = collect(["--bogus", "alpine"]).unwrap_err();
        assert!(matches!(
            err,
            RunConfigError::Delegated(DelegatedError::Flags(_))
        ));
        assert!(!err.is_help_request());
    }

    #[test]
    fn test_help_request() {
        let err = collect(["--help"]).unwrap_err();
        assert!(err.is_help_request());
    }
}

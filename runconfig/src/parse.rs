//! Parse entrypoint: raw options to `(Config, HostConfig)`.
//!
//! The pipeline runs in a fixed order and stops at the first error:
//!
//! 1. collect argv into a [`RawOptionSet`] ([`crate::flags`])
//! 2. cross-option rules ([`crate::validate`])
//! 3. sub-field parsers ([`crate::parsers`])
//! 4. assembly ([`crate::assemble`])

use std::ffi::OsString;
use tracing::debug;

use crate::assemble::{DecodedOptions, assemble};
use crate::error::RunConfigResult;
use crate::flags;
use crate::options::RawOptionSet;
use crate::parsers;
use crate::sysinfo::SysInfo;
use crate::types::{Config, HostConfig};
use crate::validate;

/// Parse `run` arguments (without the program or subcommand name).
///
/// # Example
///
/// ```
/// let (config, host_config) =
///     runconfig::parse(["-p", "8080:80", "-e", "MODE=prod", "nginx"], None).unwrap();
///
/// assert_eq!(config.image, "nginx");
/// assert_eq!(config.env, vec!["MODE=prod"]);
/// assert_eq!(host_config.port_bindings.len(), 1);
/// ```
pub fn parse<I, T>(args: I, sysinfo: Option<&SysInfo>) -> RunConfigResult<(Config, HostConfig)>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let opts = flags::collect(args)?;
    parse_options(opts, sysinfo)
}

/// Parse an already collected option set.
pub fn parse_options(
    opts: RawOptionSet,
    sysinfo: Option<&SysInfo>,
) -> RunConfigResult<(Config, HostConfig)> {
    validate::check(&opts)?;
    debug!(image = opts.image(), "Run options passed conflict checks");

    let decoded = decode(&opts)?;
    assemble(opts, decoded, sysinfo)
}

fn decode(opts: &RawOptionSet) -> RunConfigResult<DecodedOptions> {
    let volumes = parsers::partition_volumes(&opts.volumes)?;
    let lxc_conf = parsers::parse_key_value_opts(&opts.lxc_conf)?;
    let ports = parsers::parse_ports(&opts.publish, &opts.expose)?;
    let devices = opts
        .devices
        .iter()
        .map(|device| parsers::parse_device(device))
        .collect::<Result<Vec<_>, _>>()?;
    let network_mode = parsers::parse_net_mode(&opts.net_mode)?;
    let restart_policy = parsers::parse_restart_policy(&opts.restart_policy)?;

    debug!(
        binds = volumes.binds.len(),
        volumes = volumes.volumes.len(),
        exposed = ports.exposed.len(),
        devices = devices.len(),
        network_mode = %network_mode,
        "Decoded compound options"
    );

    Ok(DecodedOptions {
        volumes,
        lxc_conf,
        ports,
        devices,
        network_mode,
        restart_policy,
    })
}

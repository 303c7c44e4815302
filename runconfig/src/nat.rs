//! Port publishing grammar.
//!
//! A publish spec has the shape `ip:hostPort:containerPort[/proto]` where
//! the `ip` and `hostPort` segments may be left out:
//!
//! | spec                    | ip        | host port | container port |
//! |-------------------------|-----------|-----------|----------------|
//! | `80`                    | -         | -         | 80/tcp         |
//! | `8080:80`               | -         | 8080      | 80/tcp         |
//! | `127.0.0.1::53/udp`     | 127.0.0.1 | -         | 53/udp         |
//! | `127.0.0.1:8080:80`     | 127.0.0.1 | 8080      | 80/tcp         |

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::defaults;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortSpecError {
    #[error("invalid port format {spec}: should match template ip:hostPort:containerPort")]
    Template { spec: String },

    #[error("invalid ip address: {0}")]
    IpAddress(String),

    #[error("no port specified: {0}<empty>")]
    MissingPort(String),

    #[error("invalid port: {0}")]
    Port(String),

    #[error("invalid host port: {0}")]
    HostPort(String),

    #[error("invalid proto: {0}")]
    Protocol(String),
}

/// Transport protocol of a container port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
        }
    }
}

impl FromStr for Protocol {
    type Err = PortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "udp" => Ok(Protocol::Udp),
            other => Err(PortSpecError::Protocol(other.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A container port: number plus protocol, written `80/tcp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port {
    pub number: u16,
    pub protocol: Protocol,
}

impl Port {
    pub fn new(number: u16, protocol: Protocol) -> Self {
        Self { number, protocol }
    }

    pub fn tcp(number: u16) -> Self {
        Self::new(number, Protocol::Tcp)
    }

    pub fn udp(number: u16) -> Self {
        Self::new(number, Protocol::Udp)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.number, self.protocol)
    }
}

/// Parses `port[/proto]`; the protocol defaults to tcp.
impl FromStr for Port {
    type Err = PortSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (number, protocol) = split_proto_port(s);
        if number.is_empty() {
            return Err(PortSpecError::MissingPort(s.to_string()));
        }
        let number = number
            .parse::<u16>()
            .map_err(|_| PortSpecError::Port(number.to_string()))?;
        Ok(Port::new(number, protocol.parse()?))
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Port {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Host side of a published port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortBinding {
    /// Bind address, all interfaces when absent.
    pub host_ip: Option<Ipv4Addr>,
    /// Host port, dynamically assigned when absent.
    pub host_port: Option<u16>,
}

/// Split `port/proto` into its parts, defaulting the protocol to tcp.
pub fn split_proto_port(raw: &str) -> (&str, &str) {
    match raw.split_once('/') {
        Some((port, proto)) => (port, proto),
        None => (raw, defaults::PORT_PROTOCOL),
    }
}

/// Ports exposed by publish specs and their host bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSpecs {
    pub exposed: BTreeSet<Port>,
    pub bindings: BTreeMap<Port, Vec<PortBinding>>,
}

/// Parse publish specs in order. Every spec exposes its container port and
/// appends one binding for it.
pub fn parse_port_specs<S: AsRef<str>>(specs: &[S]) -> Result<PortSpecs, PortSpecError> {
    let mut out = PortSpecs::default();

    for spec in specs {
        let spec = spec.as_ref();
        let (rest, proto) = match spec.rfind('/') {
            Some(i) => (&spec[..i], &spec[i + 1..]),
            None => (spec, defaults::PORT_PROTOCOL),
        };

        let parts: Vec<&str> = rest.split(':').collect();
        let (ip, host_port, container_port) = match parts.as_slice() {
            [container] => ("", "", *container),
            [host, container] => ("", *host, *container),
            [ip, host, container] => (*ip, *host, *container),
            _ => {
                return Err(PortSpecError::Template {
                    spec: spec.to_string(),
                });
            }
        };

        let host_ip = if ip.is_empty() {
            None
        } else {
            Some(
                ip.parse::<Ipv4Addr>()
                    .map_err(|_| PortSpecError::IpAddress(ip.to_string()))?,
            )
        };

        if container_port.is_empty() {
            return Err(PortSpecError::MissingPort(spec.to_string()));
        }
        let number = container_port
            .parse::<u16>()
            .map_err(|_| PortSpecError::Port(container_port.to_string()))?;

        let host_port = if host_port.is_empty() {
            None
        } else {
            Some(
                host_port
                    .parse::<u16>()
                    .map_err(|_| PortSpecError::HostPort(host_port.to_string()))?,
            )
        };

        let port = Port::new(number, proto.parse()?);
        out.exposed.insert(port);
        out.bindings
            .entry(port)
            .or_default()
            .push(PortBinding { host_ip, host_port });
    }

    Ok(out)
}

/// Render one binding back into publish spec syntax.
pub fn format_port_spec(port: &Port, binding: &PortBinding) -> String {
    match (binding.host_ip, binding.host_port) {
        (Some(ip), Some(host)) => format!("{ip}:{host}:{port}"),
        (Some(ip), None) => format!("{ip}::{port}"),
        (None, Some(host)) => format!("{host}:{port}"),
        (None, None) => port.to_string(),
    }
}

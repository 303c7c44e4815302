//! runconfig - container run options to runtime configuration
//!
//! Turns the options of one `run` invocation into the two records a
//! container engine consumes: [`Config`] (host independent) and
//! [`HostConfig`] (host dependent). Contradictory combinations are rejected
//! and every compact syntax (ports, devices, restart policies, network
//! modes, volumes) is decoded before any container exists.

pub mod args;
pub mod assemble;
pub mod constants;
pub mod envfile;
pub mod error;
pub mod flags;
pub mod nat;
pub mod options;
pub mod opts;
pub mod parse;
pub mod parsers;
pub mod sysinfo;
pub mod types;
pub mod units;
pub mod validate;

pub use args::to_args;
pub use error::{
    ConflictError, DelegatedError, FormatError, RunConfigError, RunConfigResult, ValidationError,
};
pub use options::{AttachStream, RawOptionSet, RawOptionSetBuilder};
pub use parse::{parse, parse_options};
pub use sysinfo::SysInfo;
pub use types::{
    Config, DeviceMapping, HostConfig, KeyValuePair, MemorySwap, NetworkMode, RestartPolicy,
};

//! Hierarchical error types for run option parsing.
//!
//! Errors are categorized by what the user has to change:
//! - [`ConflictError`]: two individually valid options cannot be combined
//! - [`FormatError`]: a compound value does not match its grammar
//! - [`ValidationError`]: a well-formed value breaks a standalone rule
//! - [`DelegatedError`]: passed through unchanged from a collaborator
//!   (size units, env files, port grammar, flag collection)

use std::num::ParseIntError;
use thiserror::Error;

use crate::envfile::EnvFileError;
use crate::nat::PortSpecError;
use crate::units::SizeError;

// ============================================================================
// Top-Level Error
// ============================================================================

/// Errors returned by [`crate::parse`] and [`crate::parse_options`].
///
/// ```ignore
/// match runconfig::parse(args, sysinfo.as_ref()) {
///     Err(RunConfigError::Conflict(_)) => { /* drop one of the options */ }
///     Err(RunConfigError::Delegated(_)) => { /* message is already user-facing */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Error)]
pub enum RunConfigError {
    /// Mutually exclusive options were combined.
    #[error("conflicting options: {0}")]
    Conflict(#[from] ConflictError),

    /// A compound option value is malformed.
    #[error("invalid format: {0}")]
    Format(#[from] FormatError),

    /// An option value violates a standalone rule.
    #[error("invalid value: {0}")]
    Validation(#[from] ValidationError),

    /// Error reported by a collaborator, shown verbatim.
    #[error(transparent)]
    Delegated(#[from] DelegatedError),
}

pub type RunConfigResult<T> = Result<T, RunConfigError>;

// ============================================================================
// Conflict Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("-a and -d")]
    AttachDetach,

    #[error("--rm and -d")]
    DetachAutoRemove,

    #[error("-h and the network mode (--net)")]
    NetworkHostname,

    #[error("--net=host can't be used with links, this would result in undefined behavior")]
    HostNetworkAndLinks,

    #[error("--restart and --rm")]
    RestartPolicyAndAutoRemove,
}

// ============================================================================
// Format Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// More than three `:` separated segments.
    #[error("device specification {0}")]
    Device(String),

    #[error("maximum restart count not valid with restart policy of \"always\"")]
    RestartCountWithAlways,

    #[error("restart count {count:?}: {source}")]
    RestartCount {
        count: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unknown restart policy {0}")]
    RestartPolicy(String),

    /// More than one `:` separated count segment.
    #[error("invalid restart policy format {0}")]
    RestartPolicyFormat(String),

    #[error("--net: container network mode must be container:<name|id>")]
    ContainerNetMode,

    #[error("--net: unknown network mode {0}")]
    NetMode(String),

    #[error("--expose: {0}")]
    Expose(String),

    #[error("key/value option {0}")]
    KeyValue(String),

    #[error("driver option {0}")]
    DriverOpt(String),

    #[error("driver option {0}: key cannot be empty")]
    DriverOptEmptyKey(String),
}

// ============================================================================
// Validation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("working directory {0:?} is not an absolute path")]
    WorkingDir(String),

    #[error("bind mount {0}: destination can't be '/'")]
    BindDestinationRoot(String),

    #[error("volume path can't be '/'")]
    VolumeRoot,

    #[error("attach {0:?}: valid streams are STDIN, STDOUT and STDERR")]
    AttachStream(String),

    #[error("bad format for volume {0}")]
    VolumeFormat(String),

    #[error("{0} is not an absolute path")]
    RelativePath(String),

    #[error("link {0} should match name:alias")]
    Link(String),

    #[error("{0} is not an ip address")]
    IpAddress(String),

    #[error("{0} is not a valid domain")]
    Domain(String),
}

// ============================================================================
// Delegated Errors
// ============================================================================

/// Errors from collaborators, surfaced with their own message.
#[derive(Debug, Error)]
pub enum DelegatedError {
    #[error(transparent)]
    Memory(#[from] SizeError),

    #[error(transparent)]
    EnvFile(#[from] EnvFileError),

    #[error(transparent)]
    PortSpec(#[from] PortSpecError),

    #[error(transparent)]
    Flags(#[from] clap::Error),
}

// ============================================================================
// Conversions
// ============================================================================

macro_rules! delegated_from {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for RunConfigError {
                fn from(err: $source) -> Self {
                    RunConfigError::Delegated(err.into())
                }
            }
        )*
    };
}

delegated_from!(SizeError, EnvFileError, PortSpecError, clap::Error);

impl RunConfigError {
    /// Whether this error is a `--help` request rather than a failure.
    pub fn is_help_request(&self) -> bool {
        matches!(
            self,
            RunConfigError::Delegated(DelegatedError::Flags(err))
                if err.kind() == clap::error::ErrorKind::DisplayHelp
        )
    }
}

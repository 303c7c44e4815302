//! Cross-option rules checked before any value is decoded.
//!
//! Each rule is a pure predicate over the raw options. [`check`] runs them
//! in [`RULES`] order and stops at the first violation.

use crate::error::{ConflictError, RunConfigResult, ValidationError};
use crate::options::RawOptionSet;
use crate::types::RestartPolicy;

/// A single cross-option rule.
pub type Rule = fn(&RawOptionSet) -> RunConfigResult<()>;

/// Rules in evaluation order.
pub const RULES: &[Rule] = &[
    attach_detach,
    working_dir_absolute,
    detach_auto_remove,
    network_hostname,
    host_network_links,
];

/// Run every rule, returning the first violation.
pub fn check(opts: &RawOptionSet) -> RunConfigResult<()> {
    RULES.iter().try_for_each(|rule| rule(opts))
}

/// Attaching to a stream makes no sense for a detached container.
pub fn attach_detach(opts: &RawOptionSet) -> RunConfigResult<()> {
    if opts.detach && !opts.attach.is_empty() {
        return Err(ConflictError::AttachDetach.into());
    }
    Ok(())
}

pub fn working_dir_absolute(opts: &RawOptionSet) -> RunConfigResult<()> {
    if !opts.working_dir.is_empty() && !opts.working_dir.starts_with('/') {
        return Err(ValidationError::WorkingDir(opts.working_dir.clone()).into());
    }
    Ok(())
}

pub fn detach_auto_remove(opts: &RawOptionSet) -> RunConfigResult<()> {
    if opts.detach && opts.auto_remove {
        return Err(ConflictError::DetachAutoRemove.into());
    }
    Ok(())
}

/// A hostname only applies to a network stack the container owns.
///
/// Compares the raw `--net` string, so `container:<id>` and `host` both
/// reject `-h`.
pub fn network_hostname(opts: &RawOptionSet) -> RunConfigResult<()> {
    let own_stack = matches!(opts.net_mode.as_str(), "bridge" | "none");
    if !opts.hostname.is_empty() && !own_stack {
        return Err(ConflictError::NetworkHostname.into());
    }
    Ok(())
}

pub fn host_network_links(opts: &RawOptionSet) -> RunConfigResult<()> {
    if opts.net_mode == "host" && !opts.links.is_empty() {
        return Err(ConflictError::HostNetworkAndLinks.into());
    }
    Ok(())
}

/// Checked once the restart policy has been decoded.
pub fn restart_policy_auto_remove(
    policy: Option<&RestartPolicy>,
    auto_remove: bool,
) -> Result<(), ConflictError> {
    if auto_remove && policy.is_some() {
        return Err(ConflictError::RestartPolicyAndAutoRemove);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunConfigError;
    use crate::options::AttachStream;

    fn conflict(result: RunConfigResult<()>) -> ConflictError {
        match result {
            Err(RunConfigError::Conflict(err)) => err,
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_pass() {
        assert!(check(&RawOptionSet::default()).is_ok());
    }

    #[test]
    fn test_attach_detach() {
        let opts = RawOptionSet::builder()
            .detach(true)
            .attach(AttachStream::Stdin)
            .build();
        assert_eq!(conflict(check(&opts)), ConflictError::AttachDetach);
    }

    #[test]
    fn test_working_dir() {
        let relative = RawOptionSet::builder().working_dir("srv").build();
        assert!(matches!(
            check(&relative),
            Err(RunConfigError::Validation(ValidationError::WorkingDir(_)))
        ));

        let absolute = RawOptionSet::builder().working_dir("/srv").build();
        assert!(check(&absolute).is_ok());
    }

    #[test]
    fn test_detach_auto_remove() {
        let opts = RawOptionSet::builder().detach(true).auto_remove(true).build();
        assert_eq!(conflict(check(&opts)), ConflictError::DetachAutoRemove);
    }

    #[test]
    fn test_hostname_needs_own_network() {
        for mode in ["bridge", "none"] {
            let opts = RawOptionSet::builder().hostname("web").net_mode(mode).build();
            assert!(check(&opts).is_ok(), "{mode} should allow -h");
        }
        for mode in ["host", "container:db"] {
            let opts = RawOptionSet::builder().hostname("web").net_mode(mode).build();
            assert_eq!(conflict(check(&opts)), ConflictError::NetworkHostname);
        }
    }

    #[test]
    fn test_host_network_links() {
        let opts = RawOptionSet::builder()
            .net_mode("host")
            .link("db:db")
            .build();
        assert_eq!(conflict(check(&opts)), ConflictError::HostNetworkAndLinks);
    }

    #[test]
    fn test_rule_order() {
        let opts = RawOptionSet::builder()
            .detach(true)
            .auto_remove(true)
            .attach(AttachStream::Stdout)
            .working_dir("relative")
            .build();
        assert_eq!(conflict(check(&opts)), ConflictError::AttachDetach);
    }

    #[test]
    fn test_restart_policy_auto_remove() {
        assert!(restart_policy_auto_remove(None, true).is_ok());
        assert!(restart_policy_auto_remove(Some(&RestartPolicy::Always), false).is_ok());
        assert_eq!(
            restart_policy_auto_remove(Some(&RestartPolicy::Always), true),
            Err(ConflictError::RestartPolicyAndAutoRemove)
        );
    }
}

//! `--restart no|always|on-failure[:max-retries]`

use crate::error::FormatError;
use crate::types::RestartPolicy;

/// Parse a restart policy. `""` and `"no"` mean no policy.
pub fn parse_restart_policy(policy: &str) -> Result<Option<RestartPolicy>, FormatError> {
    if policy.is_empty() {
        return Ok(None);
    }

    let mut parts = policy.split(':');
    let name = parts.next().unwrap_or_default();
    let count = parts.next();
    if parts.next().is_some() {
        return Err(FormatError::RestartPolicyFormat(policy.to_string()));
    }

    match name {
        "no" => Ok(None),
        "always" => match count {
            Some(_) => Err(FormatError::RestartCountWithAlways),
            None => Ok(Some(RestartPolicy::Always)),
        },
        "on-failure" => {
            let maximum_retry_count = match count {
                Some(count) => count.parse().map_err(|source| FormatError::RestartCount {
                    count: count.to_string(),
                    source,
                })?,
                None => 0,
            };
            Ok(Some(RestartPolicy::OnFailure {
                maximum_retry_count,
            }))
        }
        other => Err(FormatError::RestartPolicy(other.to_string())),
    }
}

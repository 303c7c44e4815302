//! Per-option value checks applied while collecting flags.
//!
//! These look at one value at a time and may normalize it (clean a path,
//! fill in an environment value). Cross-option rules live in
//! [`crate::validate`].

use regex::Regex;
use std::net::IpAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::error::ValidationError;

static ALPHA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z]").expect("alpha pattern is valid"));

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:[a-zA-Z0-9]|(?:[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9]))(?:\.(?:[a-zA-Z0-9]|(?:[a-zA-Z0-9][a-zA-Z0-9\-]*[a-zA-Z0-9])))*)\.?\s*$",
    )
    .expect("domain pattern is valid")
});

const MAX_DOMAIN_LEN: usize = 255;

/// Lexically clean an absolute or relative path: drop `.`, resolve `..`,
/// collapse repeated separators.
fn clean_path(path: &str) -> String {
    let mut out = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    let cleaned = out.to_string_lossy().into_owned();
    if cleaned.is_empty() {
        ".".to_string()
    } else {
        cleaned
    }
}

/// Check a `--volume` or `--device` value.
///
/// Allows at most `host:container:mode`; the container side must be
/// absolute and is cleaned.
pub fn validate_path(value: &str) -> Result<String, ValidationError> {
    if value.matches(':').count() > 2 {
        return Err(ValidationError::VolumeFormat(value.to_string()));
    }

    let (container_path, cleaned) = match value.split_once(':') {
        None => (value, clean_path(value)),
        Some((host, container)) => (container, format!("{host}:{}", clean_path(container))),
    };

    if !container_path.starts_with('/') {
        return Err(ValidationError::RelativePath(container_path.to_string()));
    }
    Ok(cleaned)
}

/// Check a `--link` value: exactly `name:alias`.
pub fn validate_link(value: &str) -> Result<String, ValidationError> {
    if value.split(':').count() != 2 {
        return Err(ValidationError::Link(value.to_string()));
    }
    Ok(value.to_string())
}

/// Expand a bare `-e NAME` into `NAME=<value from the process environment>`.
pub fn validate_env(value: &str) -> String {
    if value.contains('=') {
        return value.to_string();
    }
    let current = std::env::var(value).unwrap_or_default();
    format!("{value}={current}")
}

/// Check a `--dns` value and normalize its textual form.
pub fn validate_ip_address(value: &str) -> Result<String, ValidationError> {
    value
        .trim()
        .parse::<IpAddr>()
        .map(|ip| ip.to_string())
        .map_err(|_| ValidationError::IpAddress(value.to_string()))
}

/// Check a `--dns-search` value. `.` is allowed as-is; a trailing dot is dropped.
pub fn validate_dns_search(value: &str) -> Result<String, ValidationError> {
    let value = value.trim_matches(' ');
    if value == "." {
        return Ok(value.to_string());
    }
    validate_domain(value)
}

fn validate_domain(value: &str) -> Result<String, ValidationError> {
    if !ALPHA_RE.is_match(value) {
        return Err(ValidationError::Domain(value.to_string()));
    }
    match DOMAIN_RE.captures(value).and_then(|caps| caps.get(1)) {
        Some(domain) if domain.as_str().len() < MAX_DOMAIN_LEN => Ok(domain.as_str().to_string()),
        _ => Err(ValidationError::Domain(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("/a/./b//c/"), "/a/b/c");
        assert_eq!(clean_path("/a/../b"), "/b");
        assert_eq!(clean_path("/.."), "/");
        assert_eq!(clean_path("/"), "/");
    }

    #[test]
    fn test_validate_path() {
        assert_eq!(validate_path("/data").unwrap(), "/data");
        assert_eq!(validate_path("/data/").unwrap(), "/data");
        assert_eq!(validate_path("/host:/c/../d").unwrap(), "/host:/d");
        assert_eq!(validate_path("/host:/c:ro").unwrap(), "/host:/c:ro");
        assert_eq!(validate_path("relative:/c").unwrap(), "relative:/c");
        assert_eq!(
            validate_path("data"),
            Err(ValidationError::RelativePath("data".into()))
        );
        assert_eq!(
            validate_path("/host:data"),
            Err(ValidationError::RelativePath("data".into()))
        );
        assert_eq!(
            validate_path("/a:/b:ro:extra"),
            Err(ValidationError::VolumeFormat("/a:/b:ro:extra".into()))
        );
    }

    #[test]
    fn test_validate_link() {
        assert!(validate_link("db:database").is_ok());
        assert!(validate_link("db").is_err());
        assert!(validate_link("a:b:c").is_err());
    }

    #[test]
    fn test_validate_env() {
        assert_eq!(validate_env("FOO=bar"), "FOO=bar");
        assert_eq!(validate_env("FOO="), "FOO=");
        assert_eq!(
            validate_env("RUNCONFIG_TEST_SURELY_UNSET_VAR"),
            "RUNCONFIG_TEST_SURELY_UNSET_VAR="
        );
    }

    #[test]
    fn test_validate_ip_address() {
        assert_eq!(validate_ip_address(" 8.8.8.8 ").unwrap(), "8.8.8.8");
        assert_eq!(validate_ip_address("2001:db8::1").unwrap(), "2001:db8::1");
        assert_eq!(
            validate_ip_address("dns.local"),
            Err(ValidationError::IpAddress("dns.local".into()))
        );
    }

    #[test]
    fn test_validate_dns_search() {
        assert_eq!(validate_dns_search(".").unwrap(), ".");
        assert_eq!(validate_dns_search("example.com").unwrap(), "example.com");
        assert_eq!(validate_dns_search("example.com.").unwrap(), "example.com");
        assert_eq!(validate_dns_search(" a.b-c.io ").unwrap(), "a.b-c.io");
        assert!(validate_dns_search("123").is_err());
        assert!(validate_dns_search("-bad.com").is_err());
        assert!(validate_dns_search("bad..com").is_err());
        assert!(validate_dns_search(&"a".repeat(300)).is_err());
    }
}

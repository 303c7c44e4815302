//! Human-readable memory sizes.
//!
//! Accepts `<digits>[unit][b]` where unit is one of `k m g t p` (any case)
//! and units are binary multiples: `"128m"` is 128 MiB, `"1g"` is 1 GiB.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SIZE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)([kKmMgGtTpP])?[bB]?$").expect("size pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("invalid size: '{0}'")]
    Invalid(String),

    #[error("size '{0}' does not fit in 64 bits")]
    Overflow(String),
}

/// Parse a memory size into bytes using binary (1024-based) units.
pub fn ram_in_bytes(size: &str) -> Result<u64, SizeError> {
    let caps = SIZE_RE
        .captures(size)
        .ok_or_else(|| SizeError::Invalid(size.to_string()))?;

    let value: u64 = caps[1]
        .parse()
        .map_err(|_| SizeError::Overflow(size.to_string()))?;

    let shift = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
        None => 0,
        Some(unit) => match unit.as_str() {
            "k" => 10,
            "m" => 20,
            "g" => 30,
            "t" => 40,
            _ => 50,
        },
    };

    value
        .checked_mul(1u64 << shift)
        .ok_or_else(|| SizeError::Overflow(size.to_string()))
}

//! `--net bridge|none|host|container:<name|id>`

use crate::error::FormatError;
use crate::types::NetworkMode;

/// Validate a network mode and keep it verbatim as the mode tag.
pub fn parse_net_mode(mode: &str) -> Result<NetworkMode, FormatError> {
    let mut parts = mode.split(':');
    match parts.next().unwrap_or_default() {
        "bridge" | "none" | "host" => {}
        "container" => match parts.next() {
            Some(reference) if !reference.is_empty() => {}
            _ => return Err(FormatError::ContainerNetMode),
        },
        _ => return Err(FormatError::NetMode(mode.to_string())),
    }
    Ok(NetworkMode::from_validated(mode.to_string()))
}

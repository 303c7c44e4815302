//! `--device host[:container[:permissions]]`

use crate::constants::defaults;
use crate::error::FormatError;
use crate::types::DeviceMapping;

/// Parse a device mapping.
///
/// The container path defaults to the host path and permissions default
/// to `rwm`.
pub fn parse_device(device: &str) -> Result<DeviceMapping, FormatError> {
    let segments: Vec<&str> = device.split(':').collect();
    let (host, container, permissions) = match segments.as_slice() {
        [host] => (*host, "", defaults::DEVICE_PERMISSIONS),
        [host, container] => (*host, *container, defaults::DEVICE_PERMISSIONS),
        [host, container, permissions] => (*host, *container, *permissions),
        _ => return Err(FormatError::Device(device.to_string())),
    };

    let container = if container.is_empty() { host } else { container };

    Ok(DeviceMapping {
        path_on_host: host.to_string(),
        path_in_container: container.to_string(),
        cgroup_permissions: permissions.to_string(),
    })
}

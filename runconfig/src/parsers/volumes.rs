//! Bind mounts versus named volumes in `--volume`.
//!
//! `host:container[:mode]` is a bind mount and goes to the host config.
//! A bare `container` path is a named volume and is recorded in the image
//! level config. Bind mounts never end up in the named volume set.

use std::collections::BTreeSet;

use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeSet {
    /// Bind mounts in first-seen order, duplicates dropped.
    pub binds: Vec<String>,
    /// Container paths of named volumes.
    pub volumes: BTreeSet<String>,
}

/// Classify `--volume` entries.
pub fn partition_volumes<S: AsRef<str>>(entries: &[S]) -> Result<VolumeSet, ValidationError> {
    let (binds, named): (Vec<&str>, Vec<&str>) = entries
        .iter()
        .map(|entry| entry.as_ref())
        .partition(|entry| entry.contains(':'));

    let mut set = VolumeSet::default();

    for bind in binds {
        let destination = bind.split(':').nth(1).unwrap_or_default();
        if destination == "/" {
            return Err(ValidationError::BindDestinationRoot(bind.to_string()));
        }
        if !set.binds.iter().any(|seen| seen == bind) {
            set.binds.push(bind.to_string());
        }
    }

    for volume in named {
        if volume == "/" {
            return Err(ValidationError::VolumeRoot);
        }
        set.volumes.insert(volume.to_string());
    }

    Ok(set)
}

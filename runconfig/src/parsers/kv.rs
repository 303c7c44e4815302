//! `key=value` options and `group.key=value` driver options.

use std::collections::BTreeMap;

use crate::error::FormatError;
use crate::types::KeyValuePair;

/// Split one option on the first `=`, trimming whitespace around both halves.
pub fn parse_key_value_opt(opt: &str) -> Result<(String, String), FormatError> {
    let (key, value) = opt
        .split_once('=')
        .ok_or_else(|| FormatError::KeyValue(opt.to_string()))?;
    Ok((key.trim().to_string(), value.trim().to_string()))
}

/// Parse a list of `key=value` options, keeping their order.
pub fn parse_key_value_opts<S: AsRef<str>>(opts: &[S]) -> Result<Vec<KeyValuePair>, FormatError> {
    opts.iter()
        .map(|opt| {
            let (key, value) = parse_key_value_opt(opt.as_ref())?;
            Ok(KeyValuePair { key, value })
        })
        .collect()
}

/// Group driver options of the form `name.key=value` (or `name.option`) by name.
///
/// Options for the same name are appended in order.
pub fn parse_driver_opts<S: AsRef<str>>(
    opts: &[S],
) -> Result<BTreeMap<String, Vec<String>>, FormatError> {
    let mut out: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for opt in opts {
        let opt = opt.as_ref();
        let (name, rest) = opt
            .split_once('.')
            .ok_or_else(|| FormatError::DriverOpt(opt.to_string()))?;
        if name.trim().is_empty() {
            return Err(FormatError::DriverOptEmptyKey(opt.to_string()));
        }
        out.entry(name.to_string())
            .or_default()
            .push(rest.to_string());
    }
    Ok(out)
}

//! `--publish` and `--expose`.

use crate::error::{FormatError, RunConfigResult};
use crate::nat::{self, Port, PortSpecs};

/// Parse publish specs, then merge expose-only ports into the exposed set.
///
/// Expose entries name container ports only; a `:` in one is rejected.
/// A port that is already published keeps its bindings.
pub fn parse_ports<P, E>(publish: &[P], expose: &[E]) -> RunConfigResult<PortSpecs>
where
    P: AsRef<str>,
    E: AsRef<str>,
{
    let PortSpecs {
        mut exposed,
        bindings,
    } = nat::parse_port_specs(publish)?;

    for entry in expose {
        let entry = entry.as_ref();
        if entry.contains(':') {
            return Err(FormatError::Expose(entry.to_string()).into());
        }
        let port: Port = entry
            .parse()
            .map_err(|err| FormatError::Expose(format!("{entry}: {err}")))?;
        exposed.insert(port);
    }

    Ok(PortSpecs { exposed, bindings })
}

//! Environment files passed with `--env-file`.
//!
//! One variable per line. Empty lines and lines starting with `#` are
//! skipped. `KEY=VALUE` keeps the value untouched and only trims leading
//! whitespace from the key. A bare `NAME` is filled in from the current
//! process environment.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvFileError {
    #[error("env file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("env file {path}: variable '{name}' has white spaces")]
    BadVariable { path: PathBuf, name: String },
}

/// Read an env file and return its entries as `KEY=VALUE` strings, in file order.
pub fn parse_env_file(path: impl AsRef<Path>) -> Result<Vec<String>, EnvFileError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| EnvFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_env_lines(path, &content)
}

fn parse_env_lines(path: &Path, content: &str) -> Result<Vec<String>, EnvFileError> {
    let mut entries = Vec::new();
    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.split_once('=') {
            Some((name, value)) => {
                let name = name.trim_start();
                if name.contains(char::is_whitespace) {
                    return Err(EnvFileError::BadVariable {
                        path: path.to_path_buf(),
                        name: name.to_string(),
                    });
                }
                entries.push(format!("{name}={value}"));
            }
            None => {
                let name = line.trim();
                let value = std::env::var(name).unwrap_or_default();
                entries.push(format!("{name}={value}"));
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_lines() {
        let content = "# comment\nFOO=bar\n\n  SPACED=left trimmed key\nVALUE=keeps  trailing  \nEMPTY=\nEQ=a=b\n";
        let entries = parse_env_lines(Path::new("test.env"), content).unwrap();
        assert_eq!(
            entries,
            vec![
                "FOO=bar",
                "SPACED=left trimmed key",
                "VALUE=keeps  trailing  ",
                "EMPTY=",
                "EQ=a=b",
            ]
        );
    }

    #[test]
    fn test_bare_name_reads_process_env() {
        let entries =
            parse_env_lines(Path::new("test.env"), "RUNCONFIG_TEST_SURELY_UNSET_VAR\n").unwrap();
        assert_eq!(entries, vec!["RUNCONFIG_TEST_SURELY_UNSET_VAR="]);
    }

    #[test]
    fn test_whitespace_in_name() {
        let err = parse_env_lines(Path::new("test.env"), "BAD NAME=1\n").unwrap_err();
        assert!(matches!(err, EnvFileError::BadVariable { ref name, .. } if name == "BAD NAME"));
        assert!(err.to_string().contains("has white spaces"));
    }

    #[test]
    fn test_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A=1").unwrap();
        writeln!(file, "B=2").unwrap();

        let entries = parse_env_file(file.path()).unwrap();
        assert_eq!(entries, vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_env_file(dir.path().join("missing.env")).unwrap_err();
        assert!(matches!(err, EnvFileError::Read { .. }));
    }
}

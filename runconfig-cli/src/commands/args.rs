use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use super::RunRecords;

#[derive(Args, Debug)]
pub struct ArgsArgs {
    /// File holding the output of `run` (JSON or YAML); stdin when omitted
    pub file: Option<PathBuf>,
}

pub fn execute(args: ArgsArgs, _global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let records = decode(&input)?;
    let rendered = runconfig::to_args(&records.config, &records.host_config);
    println!("{}", shell_join(&rendered));
    Ok(())
}

fn decode(input: &str) -> anyhow::Result<RunRecords> {
    match serde_json::from_str(input) {
        Ok(records) => Ok(records),
        Err(json_err) => serde_yaml::from_str(input).map_err(|yaml_err| {
            anyhow::anyhow!("Input is neither valid JSON ({json_err}) nor valid YAML ({yaml_err})")
        }),
    }
}

fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| shell_quote(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

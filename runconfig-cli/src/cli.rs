use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use runconfig::SysInfo;
use runconfig::constants::envs;
use serde::Serialize;

use crate::commands;

#[derive(Parser, Debug)]
#[command(
    name = "runconfig",
    author,
    version,
    about = "Resolve container run options into Config and HostConfig records"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand. They go before the subcommand name so
/// that everything after `run` is passed through untouched.
#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Output format for records
    #[arg(long, value_enum, env = envs::RUNCONFIG_FORMAT, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Cgroup mount root used for host capability detection
    #[arg(long, value_name = "PATH", env = envs::RUNCONFIG_CGROUP_ROOT)]
    pub cgroup_root: Option<PathBuf>,

    /// Do not probe the host; keep every requested limit
    #[arg(long)]
    pub no_host_check: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl GlobalFlags {
    /// Host capabilities to parse against, `None` with `--no-host-check`.
    pub fn sysinfo(&self) -> Option<SysInfo> {
        if self.no_host_check {
            return None;
        }
        let info = match &self.cgroup_root {
            Some(root) => SysInfo::detect_at(root),
            None => SysInfo::detect(),
        };
        Some(info)
    }

    pub fn render<T: Serialize>(&self, value: &T) -> anyhow::Result<String> {
        let text = match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(value)? + "\n",
            OutputFormat::Yaml => serde_yaml::to_string(value)?,
        };
        Ok(text)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse run options and print the resulting records
    #[command(disable_help_flag = true)]
    Run(commands::run::RunArgs),

    /// Print the run options equivalent to printed records
    Args(commands::args::ArgsArgs),

    /// Print the detected host capabilities
    Info(commands::info::InfoArgs),
}

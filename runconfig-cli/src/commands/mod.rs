pub mod args;
pub mod info;
pub mod run;

use runconfig::{Config, HostConfig};
use serde::{Deserialize, Serialize};

/// Document printed by `run` and read back by `args`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunRecords {
    pub config: Config,
    pub host_config: HostConfig,
}

#![allow(dead_code)]

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestContext {
    pub cmd: Command,
    /// Scratch directory for env files, fake cgroup trees and record files.
    pub dir: TempDir,
}

impl TestContext {
    pub fn new_cmd(&self) -> Command {
        let bin_path = env!("CARGO_BIN_EXE_runconfig");
        let mut cmd = Command::new(bin_path);
        cmd.env_remove("RUNCONFIG_FORMAT");
        cmd.env_remove("RUNCONFIG_CGROUP_ROOT");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    pub fn write(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path.to_string_lossy().into_owned()
    }

    /// A cgroup v2 root that lists the given controllers.
    pub fn cgroup_v2(&self, controllers: &str) -> String {
        self.write("cgroup/cgroup.controllers", controllers);
        self.path("cgroup")
    }
}

pub fn runconfig() -> TestContext {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let bin_path = env!("CARGO_BIN_EXE_runconfig");
    let mut cmd = Command::new(bin_path);
    cmd.env_remove("RUNCONFIG_FORMAT");
    cmd.env_remove("RUNCONFIG_CGROUP_ROOT");
    cmd.env_remove("RUST_LOG");
    TestContext { cmd, dir }
}

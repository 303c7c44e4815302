use predicates::prelude::*;

mod common;

#[test]
fn test_info_cgroup_v2_memory() {
    let mut ctx = common::runconfig();
    let root = ctx.cgroup_v2("cpu memory\n");
    ctx.cmd
        .args(["--cgroup-root", &root, "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""memory_limit": true"#))
        .stdout(predicate::str::contains(r#""swap_limit": true"#));
}

#[test]
fn test_info_yaml_without_memory() {
    let mut ctx = common::runconfig();
    let root = ctx.path("empty-cgroup");
    ctx.cmd
        .args(["--format", "yaml", "--cgroup-root", &root, "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("memory_limit: false"))
        .stdout(predicate::str::contains("swap_limit: false"))
        .stderr(predicate::str::contains("does not support cgroup memory limit"));
}

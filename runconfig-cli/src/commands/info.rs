use clap::Args;
use runconfig::SysInfo;

#[derive(Args, Debug)]
pub struct InfoArgs {}

pub fn execute(_args: InfoArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let info = match &global.cgroup_root {
        Some(root) => SysInfo::detect_at(root),
        None => SysInfo::detect(),
    };
    print!("{}", global.render(&info)?);
    Ok(())
}

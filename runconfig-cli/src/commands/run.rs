use clap::Args;

use super::RunRecords;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Run options, then IMAGE [COMMAND] [ARG...]
    #[arg(
        value_name = "OPTIONS",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

pub fn execute(args: RunArgs, global: &crate::cli::GlobalFlags) -> anyhow::Result<()> {
    let sysinfo = global.sysinfo();

    let (config, host_config) = match runconfig::parse(&args.args, sysinfo.as_ref()) {
        Ok(records) => records,
        Err(e) if e.is_help_request() => {
            print!("{}", e);
            return Ok(());
        }
        Err(e) => anyhow::bail!("{}", e),
    };

    if config.image.is_empty() {
        anyhow::bail!("\"run\" requires at least 1 argument: IMAGE [COMMAND] [ARG...]");
    }

    tracing::debug!(image = %config.image, "Parsed run options");
    print!(
        "{}",
        global.render(&RunRecords {
            config,
            host_config
        })?
    );
    Ok(())
}

use super::{error, Result};
use crate::{hostname, net_config, DEFAULT_INSTALL_ROOT};
use argh::FromArgs;
use log::info;
use snafu::ResultExt;
use std::path::PathBuf;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "set-hostname")]
/// Sets the hostname
pub(crate) struct SetHostnameArgs {
    #[argh(positional)]
    /// hostname for the system
    hostname: String,

    #[argh(option, short = 'r', default = "PathBuf::from(DEFAULT_INSTALL_ROOT)")]
    /// root directory of the system being configured
    root: PathBuf,
}

/// Sets the hostname for the system
pub(crate) fn run(args: SetHostnameArgs) -> Result<()> {
    let host_name = args.hostname.trim();
    net_config::check_host_name(host_name).context(error::InvalidHostnameSnafu)?;

    let path =
        hostname::update_host_name(&args.root, host_name).context(error::HostnameWriteSnafu)?;
    info!("Wrote hostname '{}' to '{}'", host_name, path.display());
    Ok(())
}

use super::{load_networks, Result};
use crate::DEFAULT_NET_CONFIG_FILE;
use argh::FromArgs;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "validate-net-config")]
/// Check the network configuration
pub(crate) struct ValidateNetConfigArgs {
    #[argh(
        option,
        short = 'f',
        default = "String::from(DEFAULT_NET_CONFIG_FILE)"
    )]
    /// network configuration file
    network_file: String,
}

/// Check that the configuration for network interfaces parses and is valid
pub(crate) fn run(args: ValidateNetConfigArgs) -> Result<()> {
    let networks = load_networks(&args.network_file)?;
    if networks.is_empty() {
        eprintln!("No networks were configured");
        return Ok(());
    }

    // Print the device names as feedback that they were found
    for network in &networks {
        println!("Found {} ({})", network.device.trim(), network.boot_proto);
    }

    println!("{} successfully parsed!", args.network_file);
    Ok(())
}

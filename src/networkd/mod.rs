//! The networkd module contains the structures and methods needed to create properly formatted
//! systemd-networkd configuration files from a `Network`.
mod network;

pub(crate) use network::NetworkConfig;

use crate::net_config::Network;
use crate::SYSTEMD_NETWORK_DIR;
use log::debug;
use std::path::{Path, PathBuf};

// networkd reads .network files in lexical order; the prefix leaves room on either side
const CONFIG_FILE_PREFIX: &str = "10-";

/// Write the systemd-networkd config for `network` to the systemd network directory under `root`,
/// matching the interface named `device`.  Returns the path of the file written.
pub(crate) fn create_network_config_file<P>(
    root: P,
    network: &Network,
    device: &str,
) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    let config_dir = root.as_ref().join(SYSTEMD_NETWORK_DIR);
    let network_config = NetworkConfig::from_network(network, device)?;
    debug!("Generated network config for '{}':\n{}", device, network_config);

    network_config.write_config_file(config_dir)
}

mod error {
    use crate::net_config::ValidationError;
    use snafu::Snafu;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Unable to create network config for '{}': {}", device, source))]
        InvalidNetwork {
            device: String,
            source: ValidationError,
        },

        #[snafu(display("Unable to create directory {}: {}", path.display(), source))]
        NetworkDConfigDirCreate { path: PathBuf, source: io::Error },

        #[snafu(display("Unable to write {} to {}: {}", what, path.display(), source))]
        NetworkDConfigWrite {
            what: String,
            path: PathBuf,
            source: io::Error,
        },
    }
}

pub(crate) use error::Error;
pub(crate) type Result<T> = std::result::Result<T, error::Error>;

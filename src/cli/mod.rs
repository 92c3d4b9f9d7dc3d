pub(crate) mod set_hostname;
pub(crate) mod validate_net_config;
pub(crate) mod write_net_config;

pub(crate) use set_hostname::SetHostnameArgs;
pub(crate) use validate_net_config::ValidateNetConfigArgs;
pub(crate) use write_net_config::WriteNetConfigArgs;

use crate::net_config::{self, Network};
use log::info;
use snafu::ResultExt;
use std::path::Path;

/// Read the network config document at `path`, returning its networks if every one of them is
/// valid
fn load_networks<P>(path: P) -> Result<Vec<Network>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    info!("Reading network config from '{}'", path.display());
    net_config::from_path(path).context(error::NetConfigParseSnafu { path })
}

/// Potential errors during netscribe execution
pub(crate) mod error {
    use crate::{hostname, net_config, networkd};
    use snafu::Snafu;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Failed to write hostname: {}", source))]
        HostnameWrite { source: hostname::Error },

        #[snafu(display("Unable to set hostname: {}", source))]
        InvalidHostname { source: net_config::ValidationError },

        #[snafu(display("Logger setup error: {}", source))]
        Logger { source: log::SetLoggerError },

        #[snafu(display("Unable to read/parse network config from '{}': {}", path.display(), source))]
        NetConfigParse {
            path: PathBuf,
            source: net_config::Error,
        },

        #[snafu(display("Failed to write network configuration for '{}': {}", device, source))]
        NetworkConfigWrite {
            device: String,
            source: networkd::Error,
        },
    }
}

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

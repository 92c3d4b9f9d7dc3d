use super::{error, load_networks, Result};
use crate::net_config::Network;
use crate::{hostname, networkd, DEFAULT_INSTALL_ROOT, DEFAULT_NET_CONFIG_FILE};
use argh::FromArgs;
use log::{info, warn};
use snafu::ResultExt;
use std::path::{Path, PathBuf};

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "write-net-config")]
/// Write systemd-networkd configuration and the hostname for each configured network
pub(crate) struct WriteNetConfigArgs {
    #[argh(
        option,
        short = 'f',
        default = "String::from(DEFAULT_NET_CONFIG_FILE)"
    )]
    /// network configuration file
    network_file: String,

    #[argh(option, short = 'r', default = "PathBuf::from(DEFAULT_INSTALL_ROOT)")]
    /// root directory of the system being configured
    root: PathBuf,
}

/// Generate configuration for network interfaces.  Nothing is written unless every network in
/// the config is valid.
pub(crate) fn run(args: WriteNetConfigArgs) -> Result<()> {
    let networks = load_networks(&args.network_file)?;
    if networks.is_empty() {
        warn!("No networks were configured");
        return Ok(());
    }

    configure_network(&args.root, &networks)
}

/// Write the config file for each network in order, followed by its hostname if it has one.  When
/// several networks set a hostname, the last one wins.
fn configure_network<P>(root: P, networks: &[Network]) -> Result<()>
where
    P: AsRef<Path>,
{
    let root = root.as_ref();
    for network in networks {
        let device = network.device.trim();
        let path = networkd::create_network_config_file(root, network, device)
            .context(error::NetworkConfigWriteSnafu { device })?;
        info!("Wrote network config for '{}' to '{}'", device, path.display());

        if !network.host_name.is_empty() {
            let path = hostname::update_host_name(root, &network.host_name)
                .context(error::HostnameWriteSnafu)?;
            info!("Wrote hostname '{}' to '{}'", network.host_name, path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn net_config() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("net_config")
    }

    fn args(file: &str, root: &Path) -> WriteNetConfigArgs {
        WriteNetConfigArgs {
            network_file: net_config().join(file).to_string_lossy().into_owned(),
            root: root.to_path_buf(),
        }
    }

    #[test]
    fn writes_every_network() {
        let root = tempfile::tempdir().unwrap();
        run(args("net_config.json", root.path())).unwrap();

        let network_dir = root.path().join("etc/systemd/network");
        let static_config = fs::read_to_string(network_dir.join("10-static-eth1.network")).unwrap();
        assert_eq!(
            static_config,
            "[Match]\nName=eth1\n\n[Network]\nAddress=10.154.214.158/24\nGateway=10.154.214.130\nDNS=10.159.32.34\n"
        );

        let dhcp_config = fs::read_to_string(network_dir.join("10-dhcp-eth0.network")).unwrap();
        assert_eq!(dhcp_config, "[Match]\nName=eth0\n\n[Network]\nDHCP=ipv4\n");

        let hostname = fs::read_to_string(root.path().join("etc/hostname")).unwrap();
        assert_eq!(hostname.trim(), "mariner-test");
    }

    #[test]
    fn last_hostname_wins() {
        let root = tempfile::tempdir().unwrap();
        run(args("two_hostnames.json", root.path())).unwrap();

        let hostname = fs::read_to_string(root.path().join("etc/hostname")).unwrap();
        assert_eq!(hostname.trim(), "second-host");

        // The device name is trimmed before it's used
        assert!(root
            .path()
            .join("etc/systemd/network/10-dhcp-eth2.network")
            .is_file());
    }

    #[test]
    fn invalid_config_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        assert!(run(args("invalid_nameserver.json", root.path())).is_err());
        assert!(!root.path().join("etc").exists());
    }

    #[test]
    fn no_networks() {
        let root = tempfile::tempdir().unwrap();
        run(args("no_networks.json", root.path())).unwrap();
        assert!(!root.path().join("etc").exists());
    }

    #[test]
    fn network_without_hostname() {
        let root = tempfile::tempdir().unwrap();
        let mut network = crate::net_config::tests::valid_network();
        network.host_name = String::new();

        configure_network(root.path(), &[network]).unwrap();
        assert!(root
            .path()
            .join("etc/systemd/network/10-static-eth1.network")
            .is_file());
        assert!(!root.path().join("etc/hostname").exists());
    }
}

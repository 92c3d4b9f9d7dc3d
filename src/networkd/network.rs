use super::{error, Result, CONFIG_FILE_PREFIX};
use crate::net_config::{parse_ip_addr, AddressFlag, BootProto, Network};
use log::warn;
use snafu::ResultExt;
use std::fmt::Display;
use std::fs;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

// Addresses are always written with this prefix length, whatever the configured netmask is
const ADDRESS_PREFIX_LEN: u8 = 24;

/// A systemd-networkd `.network` file for a single interface
#[derive(Debug)]
pub(crate) struct NetworkConfig {
    // Only used to name the file
    boot_proto: BootProto,
    r#match: MatchSection,
    network: NetworkSection,
}

#[derive(Debug)]
struct MatchSection {
    name: String,
}

#[derive(Debug, Default)]
struct NetworkSection {
    // DHCP is only ever enabled for IPv4
    dhcp4: bool,
    address: Option<Ipv4Addr>,
    gateway: Option<Ipv4Addr>,
    dns: Vec<Ipv4Addr>,
}

impl Display for MatchSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[Match]")?;
        writeln!(f, "Name={}", self.name)
    }
}

impl Display for NetworkSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[Network]")?;
        if self.dhcp4 {
            writeln!(f, "DHCP=ipv4")?;
        }
        if let Some(address) = &self.address {
            writeln!(f, "Address={}/{}", address, ADDRESS_PREFIX_LEN)?;
        }
        if let Some(gateway) = &self.gateway {
            writeln!(f, "Gateway={}", gateway)?;
        }
        for dns in &self.dns {
            writeln!(f, "DNS={}", dns)?;
        }
        Ok(())
    }
}

impl Display for NetworkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Sections are separated by a blank line
        write!(f, "{}\n{}", self.r#match, self.network)
    }
}

impl NetworkConfig {
    const FILE_EXT: &'static str = "network";

    /// Build the config for `network`, matching the interface named `device`.  Address fields
    /// are parsed again here, so an unvalidated `Network` fails the same way validation would.
    pub(crate) fn from_network(network: &Network, device: &str) -> Result<Self> {
        let boot_proto = network
            .boot_proto()
            .context(error::InvalidNetworkSnafu { device })?;

        let address = parse_ip_addr(AddressFlag::Ip, &network.ip)
            .context(error::InvalidNetworkSnafu { device })?;

        let gateway = parse_ip_addr(AddressFlag::Gateway, &network.gate_way)
            .context(error::InvalidNetworkSnafu { device })?;

        let netmask = parse_ip_addr(AddressFlag::Netmask, &network.net_mask)
            .context(error::InvalidNetworkSnafu { device })?;
        if let Some(netmask) = netmask {
            if ipnet::ipv4_mask_to_prefix(netmask).ok() != Some(ADDRESS_PREFIX_LEN) {
                warn!(
                    "Netmask {} for '{}' is ignored, the address is written with a /{} prefix",
                    netmask, device, ADDRESS_PREFIX_LEN
                );
            }
        }

        let mut dns = Vec::with_capacity(network.name_servers.len());
        for name_server in &network.name_servers {
            if let Some(addr) = parse_ip_addr(AddressFlag::Nameserver, name_server)
                .context(error::InvalidNetworkSnafu { device })?
            {
                dns.push(addr)
            }
        }

        // bootp and ibft interfaces only get the static fields they were given
        let dhcp4 = match boot_proto {
            BootProto::Dhcp => true,
            BootProto::Bootp | BootProto::Ibft | BootProto::Static => false,
        };

        Ok(Self {
            boot_proto,
            r#match: MatchSection {
                name: device.to_string(),
            },
            network: NetworkSection {
                dhcp4,
                address,
                gateway,
                dns,
            },
        })
    }

    /// Write the config to the given directory with the proper prefix and file extension,
    /// creating the directory if needed.  An existing file is overwritten.
    pub(crate) fn write_config_file<P: AsRef<Path>>(&self, config_dir: P) -> Result<PathBuf> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir).context(error::NetworkDConfigDirCreateSnafu {
            path: config_dir,
        })?;

        let cfg_path = self.config_path(config_dir);
        fs::write(&cfg_path, self.to_string()).context(error::NetworkDConfigWriteSnafu {
            what: "network config",
            path: &cfg_path,
        })?;
        Ok(cfg_path)
    }

    /// Build the proper prefixed path for the config file
    fn config_path<P: AsRef<Path>>(&self, config_dir: P) -> PathBuf {
        // Device names may contain dots (VLANs), so the extension is added by hand rather than
        // with `set_extension()`
        let filename = format!(
            "{}{}-{}.{}",
            CONFIG_FILE_PREFIX,
            self.boot_proto,
            self.r#match.name,
            Self::FILE_EXT
        );
        config_dir.as_ref().join(filename)
    }
}

//! Field checks for `Network`.  Each check can be run on its own; `is_valid` runs all of them in
//! order and returns the first failure.
//!
//! Error messages name the installer flag each field corresponds to, i.e. `--gateway`, so the
//! user can tell which input to fix.
use super::{BootProto, Network};
use lazy_static::lazy_static;
use regex::Regex;
use snafu::{ensure, OptionExt};
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;

// Hostnames are at most 253 characters, made of dot-separated labels
const MAX_HOSTNAME_LEN: usize = 253;

lazy_static! {
    // Each label is 1-63 letters, digits or hyphens, and can't start or end with a hyphen
    static ref VALID_HOSTNAME: Regex = Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .unwrap();
}

/// The flag an address field is set with, used to point at the offending input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AddressFlag {
    Gateway,
    Ip,
    Netmask,
    Nameserver,
}

impl Display for AddressFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressFlag::Gateway => write!(f, "gateway"),
            AddressFlag::Ip => write!(f, "ip"),
            AddressFlag::Netmask => write!(f, "netmask"),
            AddressFlag::Nameserver => write!(f, "nameserver"),
        }
    }
}

impl Network {
    /// Run every check, returning the first failure
    pub(crate) fn is_valid(&self) -> Result<()> {
        self.boot_proto_is_valid()?;
        self.ip_addr_is_valid()?;
        self.host_name_is_valid()?;
        self.device_is_valid()?;
        Ok(())
    }

    /// The boot protocol, if it's one we know how to configure
    pub(crate) fn boot_proto(&self) -> Result<BootProto> {
        BootProto::from_str(&self.boot_proto)
            .ok()
            .context(error::InvalidBootProtoSnafu {
                value: &self.boot_proto,
            })
    }

    pub(crate) fn boot_proto_is_valid(&self) -> Result<()> {
        self.boot_proto().map(|_| ())
    }

    /// Check the gateway, IP, netmask and each nameserver, in that order.  Empty values are
    /// allowed and mean the address isn't set.
    pub(crate) fn ip_addr_is_valid(&self) -> Result<()> {
        let fields = [
            (AddressFlag::Gateway, &self.gate_way),
            (AddressFlag::Ip, &self.ip),
            (AddressFlag::Netmask, &self.net_mask),
        ];
        let name_servers = self
            .name_servers
            .iter()
            .map(|name_server| (AddressFlag::Nameserver, name_server));

        for (flag, value) in fields.into_iter().chain(name_servers) {
            parse_ip_addr(flag, value)?;
        }
        Ok(())
    }

    pub(crate) fn host_name_is_valid(&self) -> Result<()> {
        if self.host_name.is_empty() {
            return Ok(());
        }
        check_host_name(&self.host_name)
    }

    pub(crate) fn device_is_valid(&self) -> Result<()> {
        let device = self.device.trim();
        ensure!(
            !device.is_empty(),
            error::InvalidDeviceSnafu { value: device }
        );
        Ok(())
    }
}

/// Parse an IPv4 address given for `flag`.  An empty value is absent rather than invalid.
pub(crate) fn parse_ip_addr(flag: AddressFlag, value: &str) -> Result<Option<Ipv4Addr>> {
    if value.is_empty() {
        return Ok(None);
    }

    let addr = Ipv4Addr::from_str(value)
        .ok()
        .context(error::InvalidIpAddressSnafu { flag, value })?;
    Ok(Some(addr))
}

/// Check that a hostname is made of valid labels and isn't too long
pub(crate) fn check_host_name(host_name: &str) -> Result<()> {
    ensure!(
        host_name.len() <= MAX_HOSTNAME_LEN && VALID_HOSTNAME.is_match(host_name),
        error::InvalidHostNameSnafu { value: host_name }
    );
    Ok(())
}

mod error {
    use super::AddressFlag;
    use snafu::Snafu;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    #[allow(clippy::enum_variant_names)]
    pub(crate) enum Error {
        #[snafu(display(
            "Invalid input for --bootproto ({}), bootproto can only be one of dhcp, bootp, ibft and static",
            value
        ))]
        InvalidBootProto { value: String },

        #[snafu(display("Invalid input for --{}: Invalid ip address ({})", flag, value))]
        InvalidIpAddress { flag: AddressFlag, value: String },

        #[snafu(display("Invalid input for --hostname ({})", value))]
        InvalidHostName { value: String },

        #[snafu(display("Invalid input for --device ({}), device cannot be empty", value))]
        InvalidDevice { value: String },
    }
}

pub(crate) use error::Error;
pub(crate) type Result<T> = std::result::Result<T, error::Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net_config::tests::valid_network;

    #[test]
    fn valid_network_passes_each_check() {
        let network = valid_network();
        assert!(network.boot_proto_is_valid().is_ok());
        assert!(network.ip_addr_is_valid().is_ok());
        assert!(network.host_name_is_valid().is_ok());
        assert!(network.device_is_valid().is_ok());
        assert!(network.is_valid().is_ok());
    }

    #[test]
    fn every_boot_proto() {
        for boot_proto in ["dhcp", "bootp", "ibft", "static"] {
            let mut network = valid_network();
            network.boot_proto = boot_proto.to_string();
            assert!(network.boot_proto_is_valid().is_ok());
        }
    }

    #[test]
    fn invalid_boot_proto() {
        let mut network = valid_network();
        network.boot_proto = "abcd".to_string();
        assert_eq!(
            network.boot_proto_is_valid().unwrap_err().to_string(),
            "Invalid input for --bootproto (abcd), bootproto can only be one of dhcp, bootp, ibft and static"
        );

        network.boot_proto = String::new();
        assert!(network.boot_proto_is_valid().is_err());
    }

    #[test]
    fn empty_addresses_are_absent() {
        let mut network = valid_network();
        network.gate_way = String::new();
        network.ip = String::new();
        network.net_mask = String::new();
        network.name_servers = vec![String::new()];
        assert!(network.ip_addr_is_valid().is_ok());
        assert!(network.is_valid().is_ok());
    }

    #[test]
    fn first_bad_address_is_reported() {
        let mut network = valid_network();
        network.ip = "10.154.214".to_string();
        network.net_mask = "abcd".to_string();
        assert_eq!(
            network.ip_addr_is_valid().unwrap_err().to_string(),
            "Invalid input for --ip: Invalid ip address (10.154.214)"
        );

        let mut network = valid_network();
        network.name_servers = vec![
            "10.159.32.34".to_string(),
            "8.8.8.888".to_string(),
            "abcd".to_string(),
        ];
        assert_eq!(
            network.ip_addr_is_valid().unwrap_err().to_string(),
            "Invalid input for --nameserver: Invalid ip address (8.8.8.888)"
        );
    }

    #[test]
    fn ipv6_is_not_an_ipv4_address() {
        let mut network = valid_network();
        network.gate_way = "fe80::1".to_string();
        assert_eq!(
            network.ip_addr_is_valid().unwrap_err().to_string(),
            "Invalid input for --gateway: Invalid ip address (fe80::1)"
        );
    }

    #[test]
    fn parse_addresses() {
        assert_eq!(parse_ip_addr(AddressFlag::Ip, "").unwrap(), None);
        assert_eq!(
            parse_ip_addr(AddressFlag::Ip, "10.154.214.158").unwrap(),
            Some(Ipv4Addr::new(10, 154, 214, 158))
        );
        assert!(parse_ip_addr(AddressFlag::Ip, " 10.154.214.158").is_err());
    }

    #[test]
    fn valid_host_names() {
        let segment_limit = "a".repeat(63);
        let long_name = format!(
            "{}.{}.{}.{}",
            &segment_limit,
            &segment_limit,
            &segment_limit,
            "a".repeat(61)
        );
        let ok_str = [
            "mariner-test",
            "localhost",
            "a",
            "1",
            "a.b-c.d",
            "Mariner-Test.Example.COM",
            segment_limit.as_str(),
            long_name.as_str(),
        ];
        for ok in ok_str {
            assert!(check_host_name(ok).is_ok(), "{}", ok)
        }
    }

    #[test]
    fn invalid_host_names() {
        let long_segment = "a".repeat(64);
        let segment = "a".repeat(63);
        let long_name = format!("{}.{}.{}.{}", &segment, &segment, &segment, &segment);
        let bad_str = [
            "**??",
            " ",
            "-a",
            "a-",
            ".a",
            "a.",
            "a..a",
            "a.-a.b",
            "under_score",
            "mariner test",
            long_segment.as_str(),
            long_name.as_str(),
        ];
        for bad in bad_str {
            assert!(check_host_name(bad).is_err(), "{}", bad)
        }
    }

    #[test]
    fn empty_host_name_is_allowed() {
        let mut network = valid_network();
        network.host_name = String::new();
        assert!(network.host_name_is_valid().is_ok());
    }

    #[test]
    fn invalid_host_name_message() {
        let mut network = valid_network();
        network.host_name = "**??".to_string();
        assert_eq!(
            network.host_name_is_valid().unwrap_err().to_string(),
            "Invalid input for --hostname (**??)"
        );
    }

    #[test]
    fn blank_device() {
        for blank in ["", " ", "\t\n"] {
            let mut network = valid_network();
            network.device = blank.to_string();
            assert_eq!(
                network.device_is_valid().unwrap_err().to_string(),
                "Invalid input for --device (), device cannot be empty"
            );
        }
    }

    #[test]
    fn padded_device_is_valid() {
        let mut network = valid_network();
        network.device = " eth1 ".to_string();
        assert!(network.device_is_valid().is_ok());
    }
}

//! The net_config module contains the `Network` structure, which describes the configuration of a
//! single network interface, and the functions needed to load it from a network config document.
//!
//! A `Network` is only handed out by the loaders after it passes validation; see the `validate`
//! module for the individual checks.
mod error;
mod validate;

pub(crate) use error::{Error, Result};
pub(crate) use validate::{check_host_name, parse_ip_addr, AddressFlag};
pub(crate) use validate::Error as ValidationError;

use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::fs;
use std::path::Path;

/// The methods available to configure an interface at boot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum BootProto {
    Dhcp,
    Bootp,
    Ibft,
    Static,
}

serde_plain::derive_fromstr_from_deserialize!(BootProto);
serde_plain::derive_display_from_serialize!(BootProto);

/// Describes the configuration of a single network interface.
///
/// Fields are kept as the user wrote them so that validation errors can echo the original input.
/// Empty address fields mean the value is absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub(crate) struct Network {
    pub(crate) boot_proto: String,
    pub(crate) gate_way: String,
    pub(crate) ip: String,
    pub(crate) net_mask: String,
    pub(crate) on_boot: bool,
    pub(crate) host_name: String,
    pub(crate) name_servers: Vec<String>,
    pub(crate) device: String,
}

impl Network {
    /// Deserialize a `Network` from a JSON document member and validate it
    fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let network: Network =
            serde_json::from_value(value).context(error::NetworkDeserializeJsonSnafu)?;
        network.validated()
    }

    /// Deserialize a `Network` from a TOML document member and validate it
    fn from_toml_value(value: toml::Value) -> Result<Self> {
        let network = value
            .try_into::<Network>()
            .context(error::NetworkDeserializeTomlSnafu)?;
        network.validated()
    }

    /// Consume the network, returning it only if it passes validation
    pub(crate) fn validated(self) -> Result<Self> {
        self.is_valid().context(error::NetworkParseSnafu)?;
        Ok(self)
    }
}

/// The on-disk document listing every network to configure.  Members are kept as raw values so
/// that each one is loaded, and its errors reported, as a single `Network`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase", bound(deserialize = "V: Deserialize<'de>"))]
struct NetConfigDocument<V> {
    #[serde(default)]
    networks: Vec<V>,
}

#[derive(Debug, PartialEq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .context(error::UnknownConfigFormatSnafu { path })?;

        match extension.to_lowercase().as_str() {
            "json" => Ok(ConfigFormat::Json),
            "toml" => Ok(ConfigFormat::Toml),
            _ => error::UnknownConfigFormatSnafu { path }.fail(),
        }
    }
}

/// Read a network config document from file, returning every network it contains.  The document
/// is rejected as a whole if any network fails validation.
pub(crate) fn from_path<P>(path: P) -> Result<Vec<Network>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let config_str =
        fs::read_to_string(path).context(error::NetConfigReadFailedSnafu { path })?;

    match format {
        ConfigFormat::Json => {
            let document: NetConfigDocument<serde_json::Value> = serde_json::from_str(&config_str)
                .context(error::NetConfigParseJsonSnafu { path })?;
            document
                .networks
                .into_iter()
                .map(Network::from_json_value)
                .collect()
        }
        ConfigFormat::Toml => {
            let document: NetConfigDocument<toml::Value> =
                toml::from_str(&config_str).context(error::NetConfigParseTomlSnafu { path })?;
            document
                .networks
                .into_iter()
                .map(Network::from_toml_value)
                .collect()
        }
    }
}

use super::validate;
use snafu::Snafu;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub(crate) enum Error {
    #[snafu(display("failed to parse [Network]: {}", source))]
    NetworkParse { source: validate::Error },

    #[snafu(display("failed to parse [Network]: {}", source))]
    NetworkDeserializeJson { source: serde_json::Error },

    #[snafu(display("failed to parse [Network]: {}", source))]
    NetworkDeserializeToml { source: toml::de::Error },

    #[snafu(display("Failed to read network config from '{}': {}", path.display(), source))]
    NetConfigReadFailed { path: PathBuf, source: io::Error },

    #[snafu(display("Failed to parse network config in '{}' as JSON: {}", path.display(), source))]
    NetConfigParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Failed to parse network config in '{}' as TOML: {}", path.display(), source))]
    NetConfigParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display(
        "Unknown network config format for '{}', expected a '.json' or '.toml' file",
        path.display()
    ))]
    UnknownConfigFormat { path: PathBuf },
}

pub(crate) type Result<T> = std::result::Result<T, Error>;

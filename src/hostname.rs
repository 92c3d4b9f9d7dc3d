//! The hostname module writes the system hostname file.
use crate::HOSTNAME_FILE;
use snafu::ResultExt;
use std::fs;
use std::path::{Path, PathBuf};

/// Write `host_name`, trimmed of surrounding whitespace, as the only line of the hostname file
/// under `root`.  Returns the path written.
pub(crate) fn update_host_name<P>(root: P, host_name: &str) -> Result<PathBuf>
where
    P: AsRef<Path>,
{
    let path = root.as_ref().join(HOSTNAME_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(error::HostnameDirCreateSnafu { path: parent })?;
    }

    fs::write(&path, format!("{}\n", host_name.trim()))
        .context(error::HostnameWriteFailedSnafu { path: &path })?;
    Ok(path)
}

mod error {
    use snafu::Snafu;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(crate)))]
    pub(crate) enum Error {
        #[snafu(display("Unable to create directory {}: {}", path.display(), source))]
        HostnameDirCreate { path: PathBuf, source: io::Error },

        #[snafu(display("Failed to write hostname to '{}': {}", path.display(), source))]
        HostnameWriteFailed { path: PathBuf, source: io::Error },
    }
}

pub(crate) use error::Error;
type Result<T> = std::result::Result<T, error::Error>;

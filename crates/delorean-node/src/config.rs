use std::path::{Path, PathBuf};

use delorean_chainparams::NetworkFlags;
use delorean_core::error::ParamsError;
use delorean_core::types::NetworkKind;

/// Settings resolved from the command line before any subsystem starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    pub network: NetworkKind,
    /// Network-specific data directory (`<datadir>/<tag>`).
    pub data_dir: PathBuf,
}

impl NodeConfig {
    pub fn resolve(flags: NetworkFlags, base_dir: &Path) -> Result<Self, ParamsError> {
        let network = flags.network()?;
        let base = expand_tilde(base_dir);
        let data_dir = match network.data_dir_tag() {
            "" => base,
            tag => base.join(tag),
        };
        Ok(Self { network, data_dir })
    }
}

/// Expand a leading `~` to the user's home directory (`HOME` or `USERPROFILE`).
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE")) {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

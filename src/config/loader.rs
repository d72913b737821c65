use std::path::PathBuf;

use tracing::debug;

use super::{ConfigError, SearchPath};
use crate::keyfile::KeyFile;

/// A configuration file chosen by the layered search.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Parsed contents
    pub key_file: KeyFile,
    /// Absolute path the contents were read from
    pub path: PathBuf,
}

/// Locates `filename` on the search path and parses it.
///
/// The first candidate directory that contains the file is authoritative.
/// Layers are never merged, and a file that exists but fails to load does
/// not fall through to lower-priority layers.
///
/// # Errors
/// * `ConfigError::NotFound` - No candidate directory contains the file
/// * `ConfigError::Load` - The chosen file could not be read or parsed
pub fn resolve_and_parse(
    filename: &str,
    search_path: &SearchPath,
) -> Result<LoadedConfig, ConfigError> {
    let searched = search_path.candidate_dirs();

    let Some(path) = searched
        .iter()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.is_file())
    else {
        return Err(ConfigError::NotFound {
            filename: filename.to_string(),
            searched,
        });
    };

    debug!("Loading {filename} from {}", path.display());

    let key_file = KeyFile::load(&path).map_err(|source| ConfigError::Load {
        path: path.clone(),
        source,
    })?;

    Ok(LoadedConfig { key_file, path })
}

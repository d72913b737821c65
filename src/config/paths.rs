use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Directory appended to every config base directory.
const PORTAL_SUBDIR: [&str; 2] = ["SteamOS", "portal"];

const DEFAULT_SYSTEM_CONFIG_DIR: &str = "/etc/xdg";

/// Layered configuration search path
///
/// Follows the XDG Base Directory specification: the user config directory
/// takes priority over every system config directory, and system directories
/// keep the order given in `XDG_CONFIG_DIRS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    user_dir: Option<PathBuf>,
    system_dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Creates a search path from explicit base directories.
    pub fn new(user_dir: Option<PathBuf>, system_dirs: Vec<PathBuf>) -> Self {
        Self {
            user_dir,
            system_dirs,
        }
    }

    /// Builds the search path from the process environment.
    ///
    /// - User directory: `XDG_CONFIG_HOME`, falling back to `$HOME/.config`
    /// - System directories: `XDG_CONFIG_DIRS`, falling back to `/etc/xdg`
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var_os("XDG_CONFIG_HOME"),
            env::var_os("HOME"),
            env::var_os("XDG_CONFIG_DIRS"),
        )
    }

    /// Builds the search path from raw environment values.
    ///
    /// Empty and relative entries are ignored, as the XDG specification
    /// requires.
    pub fn from_vars(
        config_home: Option<OsString>,
        home: Option<OsString>,
        config_dirs: Option<OsString>,
    ) -> Self {
        let user_dir = config_home
            .map(PathBuf::from)
            .filter(|dir| dir.is_absolute())
            .or_else(|| {
                home.map(PathBuf::from)
                    .filter(|home| home.is_absolute())
                    .map(|home| home.join(".config"))
            });

        let mut system_dirs: Vec<PathBuf> = config_dirs
            .as_deref()
            .map(|dirs| {
                env::split_paths(dirs)
                    .filter(|dir| dir.is_absolute())
                    .collect()
            })
            .unwrap_or_default();

        if system_dirs.is_empty() {
            system_dirs.push(PathBuf::from(DEFAULT_SYSTEM_CONFIG_DIR));
        }

        Self {
            user_dir,
            system_dirs,
        }
    }

    /// Returns the portal config directories in priority order.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        self.user_dir
            .iter()
            .chain(self.system_dirs.iter())
            .map(|base| portal_dir(base))
            .collect()
    }
}

fn portal_dir(base: &Path) -> PathBuf {
    PORTAL_SUBDIR
        .iter()
        .fold(base.to_path_buf(), |dir, part| dir.join(part))
}

/// Utility struct for locating data files
pub struct DataPaths;

impl DataPaths {
    /// Returns the XDG data directories in priority order.
    ///
    /// `XDG_DATA_HOME` (or `$HOME/.local/share`) first, then each entry of
    /// `XDG_DATA_DIRS` (or `/usr/local/share:/usr/share`).
    pub fn data_dirs() -> Vec<PathBuf> {
        let data_home = env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .filter(|dir| dir.is_absolute())
            .or_else(|| {
                env::var_os("HOME")
                    .map(PathBuf::from)
                    .filter(|home| home.is_absolute())
                    .map(|home| home.join(".local/share"))
            });

        let mut system: Vec<PathBuf> = env::var_os("XDG_DATA_DIRS")
            .map(|dirs| {
                env::split_paths(&dirs)
                    .filter(|dir| dir.is_absolute())
                    .collect()
            })
            .unwrap_or_default();

        if system.is_empty() {
            system = vec![
                PathBuf::from("/usr/local/share"),
                PathBuf::from("/usr/share"),
            ];
        }

        data_home.into_iter().chain(system).collect()
    }
}

use std::path::{Path, PathBuf};

/// Prefab WADs live in this directory under either root.
pub const PREFAB_SUBDIR: &str = "x_doom";

pub const USER_DIR_VAR: &str = "ID_PREFAB_USER_DIR";
pub const INSTALL_DIR_VAR: &str = "ID_PREFAB_INSTALL_DIR";

/// The two roots searched for prefab WADs, user first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    pub user_dir: PathBuf,
    pub install_dir: PathBuf,
}

impl SearchPaths {
    pub fn new(user_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    /// Roots from `ID_PREFAB_USER_DIR` and `ID_PREFAB_INSTALL_DIR`.
    ///
    /// Falls back to `<data dir>/id-prefab` for the user, and the directory
    /// of the running executable for the installation.
    pub fn from_env() -> Self {
        let user_dir = std::env::var_os(USER_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("id-prefab")
            });

        let install_dir = std::env::var_os(INSTALL_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
                    .unwrap_or_else(|| PathBuf::from("."))
            });

        Self {
            user_dir,
            install_dir,
        }
    }

    /// Where `name` would be, in the order they are checked.
    pub fn candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.user_dir.join(PREFAB_SUBDIR).join(name),
            self.install_dir.join(PREFAB_SUBDIR).join(name),
        ]
    }

    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.candidates(name).into_iter().find(|path| path.is_file())
    }
}

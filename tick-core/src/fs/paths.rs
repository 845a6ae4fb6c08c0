use std::path::{Path, PathBuf};

/// Manages the configuration and data directories of a tick store.
pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    /// Creates a new PathManager with explicit paths
    pub fn new(config_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Creates a PathManager from the common arguments.
    ///
    /// # Arguments
    ///
    /// * `args` - Parsed CLI arguments.
    ///
    /// # Returns
    ///
    /// A new `PathManager`.
    pub fn from_args(args: &crate::args::CommonArgs) -> Self {
        Self::new(args.get_config_dir(), args.get_data_dir())
    }

    /// Ensures all managed directories exist, creating them if necessary.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if directories exist or were created.
    /// * `Err` if creation fails.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }

    pub fn get_config_file_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.config_dir.join(path)
    }

    pub fn get_data_file_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(path)
    }
}

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the brief database inside the data directory.
const DB_FILENAME: &str = "briefsmith.sqlite";

pub struct PortablePathManager;

impl PortablePathManager {
    /// Application root directory (where the executable lives).
    ///
    /// Falls back to the current directory when the executable path is unavailable.
    pub fn root_dir() -> PathBuf {
        match std::env::current_exe() {
            Ok(mut path) => {
                path.pop(); // strip the executable name
                path
            }
            Err(e) => {
                warn!(
                    "Failed to get current exe path: {}. Falling back to current_dir.",
                    e
                );
                std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
            }
        }
    }

    /// Default data directory (./data next to the executable).
    pub fn default_data_dir() -> PathBuf {
        Self::root_dir().join("data")
    }

    /// Database directory under `data_dir` (data/db).
    pub fn db_dir(data_dir: &Path) -> PathBuf {
        data_dir.join("db")
    }

    /// Path of the brief database under `data_dir`.
    pub fn db_path(data_dir: &Path) -> PathBuf {
        Self::db_dir(data_dir).join(DB_FILENAME)
    }

    /// Creates the data and db directories if they do not exist.
    pub fn init(data_dir: &Path) -> Result<(), std::io::Error> {
        let db_path = Self::db_dir(data_dir);

        if !db_path.exists() {
            info!("Creating data directory: {:?}", db_path);
            fs::create_dir_all(&db_path)?;
        }

        Ok(())
    }
}

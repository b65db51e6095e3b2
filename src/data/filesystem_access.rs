//! Represents the system directories the validator reads from or writes to.
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum FsAccess {
    Config,
    Current,
}

impl FsAccess {
    /// Default folder for reports and charts: `./runs/validate/<subs..>`, created if needed.
    pub fn save_out(subs: &[&str]) -> anyhow::Result<PathBuf> {
        let mut all = vec!["runs", "validate"];
        all.extend_from_slice(subs);
        Self::Current.raw_path_with_subs(&all)
    }

    /// Retrieves the base path for the specified directory type.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The base path for the directory.
    fn get_path(&self) -> anyhow::Result<PathBuf> {
        let base_path = match self {
            FsAccess::Config => dirs::config_dir(),
            FsAccess::Current => std::env::current_dir().ok(),
        };

        base_path.ok_or_else(|| {
            anyhow::anyhow!("Unsupported operating system. Supported OS: Linux, MacOS, Windows.")
        })
    }

    /// Returns the raw path for the directory. Nothing is created.
    ///
    /// Examples:
    /// `~/.config`, the current working directory.
    pub fn raw_path(&self) -> anyhow::Result<PathBuf> {
        self.get_path()
    }

    /// Constructs a path to a specified directory with the provided subdirectories, creating it automatically.
    ///
    /// Examples:
    /// `~/.config/sub1/sub2`, `./runs/validate`.
    ///
    /// # Arguments
    /// * `subs` - A slice of strings representing subdirectories to append.
    pub fn raw_path_with_subs(&self, subs: &[&str]) -> anyhow::Result<PathBuf> {
        let mut d = self.get_path()?;
        for sub in subs {
            d.push(sub);
        }
        create_directory(&d)?;
        Ok(d)
    }
}

/// Creates the specified directory if it does not exist.
fn create_directory(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

use crate::error::RichExifError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings for an ExifTool-backed [`SelectionListener`](crate::SelectionListener).
///
/// ```rust,no_run
/// use richexif::Config;
///
/// let config = Config::load(Some("richexif.json".as_ref())).unwrap();
/// assert_eq!(config.gps_seconds_precision, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The `exiftool` executable; looked up on `PATH` when not absolute.
    pub exiftool: PathBuf,
    /// Decimals shown for GPS seconds.
    pub gps_seconds_precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exiftool: PathBuf::from("exiftool"),
            gps_seconds_precision: 2,
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing keys take their default.
    ///
    /// Without a path, or when the file does not exist, the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, RichExifError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            log::warn!(
                "Config file not found at {}. Using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|err| RichExifError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    fn from_json(contents: &str) -> Result<Self, RichExifError> {
        let deserializer = &mut serde_json::Deserializer::from_str(contents);
        Ok(serde_path_to_error::deserialize(deserializer)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RichExifError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}

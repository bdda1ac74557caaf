//! Persisted last-attempted location.

use crate::types::WeatherError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CACHE_FILE: &str = "location.json";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredLocation {
    location: String,
}

/// Single-key store for the last location a lookup was attempted for.
#[derive(Debug, Clone)]
pub struct LocationCache {
    cache_path: PathBuf,
    location: Option<String>,
}

impl LocationCache {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            cache_path: config_dir.join(CACHE_FILE),
            location: None,
        }
    }

    /// Read the stored location from disk. A missing file leaves the cache empty.
    pub fn load(&mut self) -> Result<(), WeatherError> {
        if !self.cache_path.exists() {
            tracing::debug!("No location cache at {}", self.cache_path.display());
            return Ok(());
        }

        let json = fs::read_to_string(&self.cache_path)
            .map_err(|e| WeatherError::Cache(format!("Failed to read location cache: {}", e)))?;

        let stored: StoredLocation = serde_json::from_str(&json)
            .map_err(|e| WeatherError::Cache(format!("Failed to parse location cache: {}", e)))?;

        tracing::info!("Restored last location: {:?}", stored.location);
        self.location = Some(stored.location);
        Ok(())
    }

    pub fn get(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn set(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Write the current location to disk, creating the directory if needed.
    pub fn save(&self) -> Result<(), WeatherError> {
        let stored = StoredLocation {
            location: self.location.clone().unwrap_or_default(),
        };

        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                WeatherError::Cache(format!("Failed to create cache directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| WeatherError::Cache(format!("Failed to serialize location: {}", e)))?;

        fs::write(&self.cache_path, json)
            .map_err(|e| WeatherError::Cache(format!("Failed to write location cache: {}", e)))?;

        tracing::debug!("Saved location {:?}", stored.location);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = LocationCache::new(dir.path());
        cache.load().unwrap();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut cache = LocationCache::new(dir.path());
        cache.set("Lisbon");
        cache.save().unwrap();

        let mut reloaded = LocationCache::new(dir.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(), Some("Lisbon"));
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let dir = tempfile::tempdir().unwrap();

        let mut cache = LocationCache::new(dir.path());
        cache.set("Lisbon");
        cache.save().unwrap();
        cache.set("Porto");
        cache.save().unwrap();

        let mut reloaded = LocationCache::new(dir.path());
        reloaded.load().unwrap();
        assert_eq!(reloaded.get(), Some("Porto"));
    }

    #[test]
    fn test_file_format_is_single_key() {
        let dir = tempfile::tempdir().unwrap();

        let mut cache = LocationCache::new(dir.path());
        cache.set("Oslo");
        cache.save().unwrap();

        let raw = std::fs::read_to_string(dir.path().join("location.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({ "location": "Oslo" }));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let mut cache = LocationCache::new(&nested);
        cache.set("Rome");
        cache.save().unwrap();
        assert!(nested.join("location.json").exists());
    }

    #[test]
    fn test_corrupt_file_is_cache_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("location.json"), "{not json").unwrap();

        let mut cache = LocationCache::new(dir.path());
        assert!(matches!(cache.load(), Err(WeatherError::Cache(_))));
        assert_eq!(cache.get(), None);
    }
}

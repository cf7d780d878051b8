use crate::config::ClientConfig;
use crate::core::traits::ConfigStore;
use crate::utils::APP_NAME;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct TomlConfigStore {
    file_path: PathBuf,
}

impl TomlConfigStore {
    pub fn new() -> Result<Self> {
        let mut path = dirs::config_dir().context("Could not find config directory")?;
        path.push(APP_NAME);
        path.push("config.toml");
        Ok(Self::at(path))
    }

    pub fn at(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<ClientConfig> {
        if !self.file_path.exists() {
            let config = ClientConfig::default();
            self.save(&config)?;
            return Ok(config);
        }
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let config: ClientConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", self.file_path.display()))?;
        Ok(config)
    }

    fn save(&self, config: &ClientConfig) -> Result<()> {
        if let Some(dir) = self.file_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(config)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::at(dir.path().join("nested").join("config.toml"));

        let config = store.load().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(store.path().exists());
    }

    #[test]
    fn saved_values_are_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlConfigStore::at(dir.path().join("config.toml"));
        let config = ClientConfig {
            server_url: "http://nas.local:8080".into(),
            poll_interval_secs: 30,
            ..Default::default()
        };

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "server_url = [").unwrap();
        assert!(TomlConfigStore::at(path).load().is_err());
    }
}

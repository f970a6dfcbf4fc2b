use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate; // use submodule at src/config/migrate.rs

pub const DEFAULT_CATALOG_IMAGE_URL: &str =
    "https://static.arasaac.org/pictograms/{id}/{id}_300.png";
pub const DEFAULT_AVATAR_URL: &str =
    "https://ui-avatars.com/api/?name={name}&background=random&size=256";

/// Browser local storage typically allows about 5 MiB per origin.
pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_catalog_image_url")]
    pub catalog_image_url: String,
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
    #[serde(default = "default_storage_quota")]
    pub storage_quota_bytes: usize,
    #[serde(default = "default_period")]
    pub default_period: String,
}

fn default_locale() -> String {
    "es".to_string()
}
fn default_catalog_image_url() -> String {
    DEFAULT_CATALOG_IMAGE_URL.to_string()
}
fn default_avatar_url() -> String {
    DEFAULT_AVATAR_URL.to_string()
}
fn default_storage_quota() -> usize {
    DEFAULT_STORAGE_QUOTA
}
fn default_period() -> String {
    "morning".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            locale: default_locale(),
            catalog_image_url: default_catalog_image_url(),
            avatar_url: default_avatar_url(),
            storage_quota_bytes: default_storage_quota(),
            default_period: default_period(),
        }
    }

    /// Return the standard configuration directory (`~/.pictoplan`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pictoplan")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("pictoplan.conf")
    }

    /// Return the full path of the SQLite database holding the documents
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("pictoplan.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())
            .map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Initialize configuration file and database location.
    /// In test mode the configuration file is left untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Self::with_database(db_path);

        if !is_test {
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_gets_defaults() {
        let mut path = std::env::temp_dir();
        path.push("pictoplan_partial_config.conf");
        fs::write(&path, "database: /tmp/x.sqlite\nlocale: en\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.locale, "en");
        assert_eq!(cfg.storage_quota_bytes, DEFAULT_STORAGE_QUOTA);
        assert_eq!(cfg.catalog_image_url, DEFAULT_CATALOG_IMAGE_URL);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_from(Path::new("/definitely/not/here.conf")).unwrap();
        assert_eq!(cfg.default_period, "morning");
    }
}

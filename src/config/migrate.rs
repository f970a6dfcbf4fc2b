//! Configuration file upgrades: detect fields added in newer releases and
//! write their default values back into the YAML file.

use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    let value: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

    match value {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(
            "configuration root must be a mapping".to_string(),
        )),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(_) => Err(AppError::Config("unexpected default layout".to_string())),
        Err(e) => Err(AppError::Config(e.to_string())),
    }
}

/// Names of the configuration keys absent from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value.
/// Returns:
///   Ok(true)  → config updated
///   Ok(false) → no change needed
pub fn migrate_config(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    let mut added = Vec::new();

    for (k, v) in defaults {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if added.is_empty() {
        info("Configuration is up to date.");
        return Ok(false);
    }

    let yaml = serde_yaml::to_string(&Value::Mapping(current))
        .map_err(|e| AppError::Config(e.to_string()))?;
    fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;

    success(format!("Configuration migrated, added: {}", added.join(", ")));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_fills_missing_keys_once() {
        let mut path = std::env::temp_dir();
        path.push("pictoplan_migrate_config.conf");
        fs::write(&path, "database: /tmp/m.sqlite\n").unwrap();

        let missing = missing_fields(&path).unwrap();
        assert!(missing.contains(&"locale".to_string()));
        assert!(!missing.contains(&"database".to_string()));

        assert!(migrate_config(&path).unwrap());
        assert!(missing_fields(&path).unwrap().is_empty());
        assert!(!migrate_config(&path).unwrap());

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/m.sqlite");

        fs::remove_file(&path).ok();
    }
}

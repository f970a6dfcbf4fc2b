//! Backup envelope: every persisted collection in one JSON document.

use crate::errors::{AppError, AppResult};
use crate::models::{AppMode, AppSettings, PersonOrPlace, PictogramLibrary, Reward, RoutineTemplate, YearlySchedule};
use crate::ui::messages::info;
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::FileOptions;

pub const BACKUP_APP: &str = "pictoplan";
pub const BACKUP_VERSION: u32 = 1;

const REQUIRED_SECTIONS: [&str; 5] = ["yearlySchedule", "pictograms", "people", "settings", "mode"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub app: String,
    pub version: u32,
    pub created_at: String,
    pub mode: AppMode,
    pub yearly_schedule: YearlySchedule,
    pub pictograms: PictogramLibrary,
    pub people: Vec<PersonOrPlace>,
    pub settings: AppSettings,
    #[serde(default)]
    pub rewards: Vec<Reward>,
    #[serde(default)]
    pub routines: Vec<RoutineTemplate>,
}

impl BackupDocument {
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a backup. Nothing is returned unless every
    /// section is present and well formed.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidBackup(format!("not valid JSON: {e}")))?;

        let obj = value
            .as_object()
            .ok_or_else(|| AppError::InvalidBackup("expected a JSON object".to_string()))?;

        if obj.get("app").and_then(Value::as_str) != Some(BACKUP_APP) {
            return Err(AppError::InvalidBackup(format!(
                "not a {BACKUP_APP} backup"
            )));
        }

        let missing: Vec<&str> = REQUIRED_SECTIONS
            .iter()
            .copied()
            .filter(|k| !obj.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::InvalidBackup(format!(
                "missing sections: {}",
                missing.join(", ")
            )));
        }

        let doc: BackupDocument =
            serde_json::from_value(value).map_err(|e| AppError::InvalidBackup(e.to_string()))?;

        if doc.version > BACKUP_VERSION {
            return Err(AppError::InvalidBackup(format!(
                "backup version {} is newer than supported ({BACKUP_VERSION})",
                doc.version
            )));
        }
        Ok(doc)
    }
}

pub fn backup_created_at() -> String {
    Local::now().to_rfc3339()
}

/// Write the backup as pretty JSON, optionally compressed into a `.zip`
/// next to it. Returns the final file path.
pub fn write_backup(doc: &BackupDocument, dest: &Path, compress: bool) -> AppResult<PathBuf> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = doc.to_json()?;

    if !compress {
        fs::write(dest, json)?;
        return Ok(dest.to_path_buf());
    }

    let zip_path = dest.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let entry = dest
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.json".to_string());

    zip.start_file(entry, options)
        .map_err(std::io::Error::other)?;
    zip.write_all(json.as_bytes())?;
    zip.finish().map_err(std::io::Error::other)?;

    info(format!("📦 Compressed: {}", zip_path.display()));
    Ok(zip_path)
}

/// Read a backup written by [`write_backup`] (plain JSON or zip).
pub fn read_backup(path: &Path) -> AppResult<BackupDocument> {
    let is_zip = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false);

    let raw = if is_zip {
        let file = fs::File::open(path)?;
        let mut archive = ZipArchive::new(file).map_err(std::io::Error::other)?;
        if archive.is_empty() {
            return Err(AppError::InvalidBackup("empty archive".to_string()));
        }
        let mut entry = archive.by_index(0).map_err(std::io::Error::other)?;
        let mut raw = String::new();
        entry.read_to_string(&mut raw)?;
        raw
    } else {
        fs::read_to_string(path)?
    };

    BackupDocument::from_json(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pictogram::default_library;

    fn sample() -> BackupDocument {
        BackupDocument {
            app: BACKUP_APP.to_string(),
            version: BACKUP_VERSION,
            created_at: backup_created_at(),
            mode: AppMode::Child,
            yearly_schedule: YearlySchedule::default(),
            pictograms: default_library(),
            people: Vec::new(),
            settings: AppSettings::default(),
            rewards: Vec::new(),
            routines: Vec::new(),
        }
    }

    #[test]
    fn rejects_foreign_or_partial_documents() {
        assert!(matches!(
            BackupDocument::from_json("{\"app\":\"other\"}"),
            Err(AppError::InvalidBackup(_))
        ));

        let mut v = serde_json::to_value(sample()).unwrap();
        v.as_object_mut().unwrap().remove("people");
        let err = BackupDocument::from_json(&v.to_string()).unwrap_err();
        assert!(err.to_string().contains("people"));

        let mut v = serde_json::to_value(sample()).unwrap();
        v["version"] = serde_json::json!(99);
        assert!(BackupDocument::from_json(&v.to_string()).is_err());
    }

    #[test]
    fn plain_and_zip_files_read_back() {
        let doc = sample();
        let mut path = std::env::temp_dir();
        path.push("pictoplan_backup_unit.json");

        let plain = write_backup(&doc, &path, false).unwrap();
        assert_eq!(read_backup(&plain).unwrap(), doc);

        let zipped = write_backup(&doc, &path, true).unwrap();
        assert_eq!(zipped.extension().unwrap(), "zip");
        assert_eq!(read_backup(&zipped).unwrap(), doc);

        fs::remove_file(&plain).ok();
        fs::remove_file(&zipped).ok();
    }
}

//! # Medication Storage
//!
//! Key-value persistence for the medication list plus the versioned
//! document format written under the medications key.
//!
//! Layout on disk: `<data_dir>/<key>.json`. Writes go to a temporary file
//! first and are renamed into place.

use crate::features::medications::model::Medication;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key for the medication list
pub const MEDICATIONS_KEY: &str = "medications";

/// Current persisted document version
pub const SCHEMA_VERSION: u32 = 1;

/// Local key-value storage
pub trait Storage: Send {
    /// Stored value for `key`, or `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Move an unreadable value aside so the next write does not destroy it
    fn quarantine(&mut self, key: &str) -> Result<()>;
}

/// JSON files in one directory, one file per key
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        Ok(Some(data))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let mut backup = self.dir.join(format!("{key}.json.corrupt-{stamp}"));
        let mut n = 1;
        while backup.exists() {
            backup = self.dir.join(format!("{key}.json.corrupt-{stamp}-{n}"));
            n += 1;
        }
        fs::rename(&path, &backup)
            .with_context(|| format!("moving {} aside", path.display()))?;
        Ok(())
    }
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage whose writes always fail
    pub fn failing() -> Self {
        MemoryStorage {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seed a raw value
    pub fn insert(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok().and_then(|e| e.get(key).cloned())
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("storage is read-only"));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn quarantine(&mut self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("memory storage lock poisoned"))?;
        if let Some(value) = entries.remove(key) {
            entries.insert(format!("{key}.corrupt"), value);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct SavedMedicationsRef<'a> {
    version: u32,
    medications: &'a [Medication],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SavedMedications {
    Versioned {
        version: u32,
        medications: Vec<Medication>,
    },
    /// Bare array written before the document carried a version
    Legacy(Vec<Medication>),
}

/// Serialize the full medication list as a versioned document
pub fn encode_medications(medications: &[Medication]) -> Result<String> {
    let doc = SavedMedicationsRef {
        version: SCHEMA_VERSION,
        medications,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a saved document, accepting the legacy unversioned layout
pub fn decode_medications(data: &str) -> Result<Vec<Medication>> {
    let doc: SavedMedications =
        serde_json::from_str(data).context("saved medications are not valid")?;
    match doc {
        SavedMedications::Versioned { version, medications } => {
            if version > SCHEMA_VERSION {
                return Err(anyhow!(
                    "saved medications use schema version {version}, newest supported is {SCHEMA_VERSION}"
                ));
            }
            Ok(medications)
        }
        SavedMedications::Legacy(medications) => Ok(medications),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::medications::model::{Frequency, NewMedication, TimeOfDay};
    use tempfile::TempDir;

    fn sample() -> Vec<Medication> {
        vec![
            NewMedication::new("Aspirin", "100mg", Frequency::Daily, TimeOfDay::default())
                .into_medication(),
            NewMedication::new(
                "Metformin",
                "500mg",
                Frequency::TwiceDaily,
                TimeOfDay::new(19, 30).unwrap(),
            )
            .into_medication(),
        ]
    }

    #[test]
    fn test_document_carries_schema_version() {
        let encoded = encode_medications(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["version"], SCHEMA_VERSION);
        assert_eq!(value["medications"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_preserves_order() {
        let meds = sample();
        let decoded = decode_medications(&encode_medications(&meds).unwrap()).unwrap();
        assert_eq!(decoded, meds);
    }

    #[test]
    fn test_decode_accepts_legacy_array() {
        let legacy = r#"[{"id":"6f1c1e0e-8a4b-4b5c-9a8e-0d4f2f7b9c11","name":"Aspirin","dosage":"100mg","frequency":"daily","time":"08:00","lastTaken":"2024-03-01","missed":false}]"#;
        let decoded = decode_medications(legacy).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "Aspirin");
        assert_eq!(
            decoded[0].last_taken,
            chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_decode_rejects_newer_version_and_garbage() {
        assert!(decode_medications(r#"{"version": 99, "medications": []}"#).is_err());
        assert!(decode_medications("not json").is_err());
        assert!(decode_medications(r#"{"medications": "nope"}"#).is_err());
    }

    #[test]
    fn test_json_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonFileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read(MEDICATIONS_KEY).unwrap(), None);
        storage.write(MEDICATIONS_KEY, "[]").unwrap();
        assert_eq!(storage.read(MEDICATIONS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(storage.path_for(MEDICATIONS_KEY).exists());
        assert!(!storage.dir().join("medications.json.tmp").exists());
    }

    #[test]
    fn test_json_file_storage_quarantine_moves_file_aside() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonFileStorage::new(dir.path());
        storage.write(MEDICATIONS_KEY, "{broken").unwrap();

        storage.quarantine(MEDICATIONS_KEY).unwrap();
        assert_eq!(storage.read(MEDICATIONS_KEY).unwrap(), None);

        storage.write(MEDICATIONS_KEY, "{broken again").unwrap();
        storage.quarantine(MEDICATIONS_KEY).unwrap();

        let mut backups: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with("medications.json.corrupt-"))
            })
            .map(|path| fs::read_to_string(path).unwrap())
            .collect();
        backups.sort();
        assert_eq!(backups, vec!["{broken".to_string(), "{broken again".to_string()]);
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        writer.write("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));

        let mut failing = MemoryStorage::failing();
        assert!(failing.write("k", "v").is_err());
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::bail;
use serde_json::Value;
use tracing::{debug, warn};

use crate::bundle::EventBundle;
use crate::json::parse_lenient;

pub const BUNDLES_KEY: &str = "eventBundles";

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn flush(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug, Default)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileSettings {
    // an unreadable or corrupt file starts empty instead of failing open
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(values) => values,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "settings file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, values }
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        fs::write(&self.path, serde_json::to_vec_pretty(&self.values)?)?;

        Ok(())
    }
}

#[derive(Debug)]
pub struct BundleStore<S> {
    settings: S,
    bundles: Vec<EventBundle>,
}

impl<S: SettingsStore> BundleStore<S> {
    pub fn new(settings: S) -> Self {
        Self {
            settings,
            bundles: Vec::new(),
        }
    }

    // total recovery: any failure resets the whole collection to empty
    pub fn load(&mut self) {
        self.bundles = match self.read_bundles() {
            Ok(bundles) => bundles,
            Err(err) => {
                warn!(error = %err, "stored event bundles are unreadable, resetting to empty");
                Vec::new()
            }
        };

        debug!(count = self.bundles.len(), "loaded event bundles");
    }

    fn read_bundles(&self) -> anyhow::Result<Vec<EventBundle>> {
        let blob = match self.settings.get(BUNDLES_KEY) {
            Some(blob) if !blob.is_empty() => blob,
            _ => return Ok(Vec::new()),
        };

        let outer: Value = serde_json::from_str(&blob)?;
        let entries = match outer.as_array() {
            Some(entries) => entries,
            None => bail!("stored bundle list is not an array"),
        };

        let mut bundles = Vec::with_capacity(entries.len());

        for entry in entries {
            // the outer list holds whole documents as strings; pre-parsed
            // objects are tolerated on read
            let document = match entry {
                Value::String(text) => parse_lenient(text)?,
                Value::Object(_) => entry.clone(),
                _ => bail!("stored bundle entry is neither a document nor its text"),
            };
            let map = match document.as_object() {
                Some(map) => map,
                None => bail!("stored bundle document is not an object"),
            };

            bundles.push(EventBundle::decode(map)?);
        }

        Ok(bundles)
    }

    // the outer store sees a flat list of already-encoded document strings,
    // not a nested tree; existing persisted data depends on this shape
    pub fn save(&mut self) -> anyhow::Result<()> {
        let documents: Vec<String> = self.bundles.iter().map(EventBundle::encode).collect();

        self.settings.set(BUNDLES_KEY, serde_json::to_string(&documents)?);
        self.settings.flush()?;

        debug!(count = self.bundles.len(), "saved event bundles");

        Ok(())
    }

    pub fn add(&mut self, bundle: EventBundle) -> anyhow::Result<()> {
        self.bundles.push(bundle);
        self.save()
    }

    pub fn remove(&mut self, index: usize) -> anyhow::Result<Option<EventBundle>> {
        if index >= self.bundles.len() {
            return Ok(None);
        }

        let removed = self.bundles.remove(index);

        self.save()?;

        Ok(Some(removed))
    }

    pub fn bundles(&self) -> &[EventBundle] {
        &self.bundles
    }

    pub fn into_settings(self) -> S {
        self.settings
    }
}

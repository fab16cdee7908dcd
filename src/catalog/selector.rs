//! Stock model catalog and the `{model_type}_{pose}` selector.
//!
//! Lookup falls back in three tiers: the exact key, then the same model
//! type standing, then [`DEFAULT_KEY`].
use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_KEY: &str = "female_standing";

const BUILT_IN: &[(&str, &str)] = &[
    ("female_standing", "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=768&q=80"),
    ("female_walking", "https://images.unsplash.com/photo-1509631179647-0177331693ae?w=768&q=80"),
    ("female_casual", "https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=768&q=80"),
    ("female_sitting", "https://images.unsplash.com/photo-1529139574466-a303027c1d8b?w=768&q=80"),
    ("female_hands_in_pockets", "https://images.unsplash.com/photo-1485968579580-b6d095142e6e?w=768&q=80"),
    ("male_standing", "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=768&q=80"),
    ("male_walking", "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=768&q=80"),
    ("male_casual", "https://images.unsplash.com/photo-1492562080023-ab3db95bfbce?w=768&q=80"),
    ("male_sitting", "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=768&q=80"),
    ("male_hands_in_pockets", "https://images.unsplash.com/photo-1488161628813-04466f872be2?w=768&q=80"),
    ("diverse_standing", "https://images.unsplash.com/photo-1531123897727-8f129e1688ce?w=768&q=80"),
    ("diverse_walking", "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=768&q=80"),
    ("diverse_casual", "https://images.unsplash.com/photo-1517841905240-472988babdf9?w=768&q=80"),
    ("diverse_sitting", "https://images.unsplash.com/photo-1539109136881-3be0616acf4b?w=768&q=80"),
];

/// Result of a catalog lookup: the key that actually matched and its URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub key: String,
    pub url: String,
}

/// Read-only `key -> URL` map, built once at startup.
#[derive(Clone, Debug)]
pub struct StockModelCatalog {
    entries: BTreeMap<String, String>,
}

impl Default for StockModelCatalog {
    fn default() -> Self {
        Self::built_in()
    }
}

impl StockModelCatalog {
    pub fn built_in() -> Self {
        let entries = BUILT_IN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StockModelCatalog { entries }
    }

    /// Build a catalog from explicit entries. The default key is always
    /// present afterwards so the last fallback tier resolves.
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        let mut entries = entries;
        if !entries.contains_key(DEFAULT_KEY) {
            let url = BUILT_IN
                .iter()
                .find(|(k, _)| *k == DEFAULT_KEY)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default();
            tracing::warn!("Catalog has no '{}' entry, using built-in default", DEFAULT_KEY);
            entries.insert(DEFAULT_KEY.to_string(), url);
        }
        StockModelCatalog { entries }
    }

    /// Load a flat JSON object of `key: url` pairs.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(raw)
            .map_err(|e| AppError::Input(format!("Failed to parse catalog JSON: {}", e)))?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!("Loaded {} catalog entries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Built-in catalog, or the override file when one is configured.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::built_in()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Resolve `{model_type}_{pose}`, falling back to `{model_type}_standing`
    /// and then to [`DEFAULT_KEY`].
    pub fn select(&self, model_type: &str, pose: &str) -> Selection {
        let exact = format!("{}_{}", model_type, pose);
        let standing = format!("{}_standing", model_type);
        for key in [exact, standing, DEFAULT_KEY.to_string()] {
            if let Some(url) = self.entries.get(&key) {
                return Selection { key, url: url.clone() };
            }
        }
        // from_entries guarantees DEFAULT_KEY, so this is only reachable
        // through a catalog built without it.
        Selection { key: DEFAULT_KEY.to_string(), url: String::new() }
    }
}

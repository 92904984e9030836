//! Metabolite registry: item id → nutrition record, reloadable at runtime.
//!
//! A [`MetaboliteTable`] is immutable once built. The [`MetaboliteRegistry`]
//! holds the current table behind an `Arc` and swaps it whole on reload, so
//! readers either see the old table or the new one, never a mix.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use metabolism_logic::metabolite::Metabolite;
use serde::{Deserialize, Serialize};

/// Host-side nutrition of an item that has no explicit metabolite entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostFood {
    pub nutrition: u32,
    pub saturation: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetaboliteTable {
    entries: HashMap<String, Metabolite>,
}

impl MetaboliteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: impl Into<String>, metabolite: Metabolite) -> Option<Metabolite> {
        self.entries.insert(item.into(), metabolite)
    }

    pub fn get(&self, item: &str) -> Option<&Metabolite> {
        self.entries.get(item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a table from raw `(item, record)` pairs.
    ///
    /// Items `is_known` rejects are skipped with a warning; records that do
    /// not decode are skipped with an error log and fall back to "no
    /// nutrition" at lookup time.
    pub fn from_entries<I, K>(entries: I, is_known: K) -> Self
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
        K: Fn(&str) -> bool,
    {
        let mut table = Self::new();
        for (item, value) in entries {
            if !is_known(&item) {
                log::warn!("Metabolite entry for unknown item {}, skipping", item);
                continue;
            }
            match serde_json::from_value::<Metabolite>(value) {
                Ok(metabolite) => {
                    table.insert(item, metabolite);
                }
                Err(e) => {
                    let err = MetaboliteError::Malformed {
                        item,
                        reason: e.to_string(),
                    };
                    log::error!("{}", err);
                }
            }
        }
        table
    }

    /// Parse a JSON object of `item -> record` and build a table from it,
    /// accepting every item.
    pub fn from_json_str(json: &str) -> Result<Self, MetaboliteError> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw, |_| true))
    }

    /// Explicit entry, else a record derived from the host's food data.
    /// `None` means the item has no nutrition and cannot be eaten.
    pub fn resolve(&self, item: &str, host_food: Option<HostFood>) -> Option<Metabolite> {
        self.get(item)
            .copied()
            .or_else(|| host_food.map(|food| Metabolite::from_host_food(food.nutrition, food.saturation)))
    }
}

/// Shared handle to the current metabolite table.
#[derive(Debug, Default)]
pub struct MetaboliteRegistry {
    current: RwLock<Option<Arc<MetaboliteTable>>>,
}

impl MetaboliteRegistry {
    /// An empty registry. Lookups fail with [`MetaboliteError::NotLoaded`]
    /// until the first [`reload`](Self::reload).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: MetaboliteTable) -> Self {
        let registry = Self::new();
        registry.reload(table);
        registry
    }

    /// Swap in a new table. In-flight readers keep the old one.
    pub fn reload(&self, table: MetaboliteTable) {
        let count = table.len();
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(table));
        log::info!("Loaded {} metabolite entries", count);
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn current(&self) -> Result<Arc<MetaboliteTable>, MetaboliteError> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(MetaboliteError::NotLoaded)
    }

    pub fn lookup(&self, item: &str, host_food: Option<HostFood>) -> Result<Option<Metabolite>, MetaboliteError> {
        Ok(self.current()?.resolve(item, host_food))
    }
}

/// Errors from building or reading metabolite data
#[derive(Debug, Clone, PartialEq)]
pub enum MetaboliteError {
    /// The registry was read before any table was loaded.
    NotLoaded,
    Malformed { item: String, reason: String },
    Parse(String),
}

impl From<serde_json::Error> for MetaboliteError {
    fn from(e: serde_json::Error) -> Self {
        MetaboliteError::Parse(e.to_string())
    }
}

impl std::fmt::Display for MetaboliteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaboliteError::NotLoaded => write!(f, "Metabolite registry accessed before it was loaded"),
            MetaboliteError::Malformed { item, reason } => {
                write!(f, "Malformed metabolite for {}: {}", item, reason)
            }
            MetaboliteError::Parse(e) => write!(f, "Metabolite table parse error: {}", e),
        }
    }
}

impl std::error::Error for MetaboliteError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_loaded_before_reload() {
        let registry = MetaboliteRegistry::new();
        assert!(!registry.is_loaded());
        assert_eq!(registry.lookup("apple", None), Err(MetaboliteError::NotLoaded));
    }

    #[test]
    fn test_from_entries_skips_unknown_and_malformed() {
        let entries = vec![
            ("soup".to_string(), json!({"food": 3.0, "hydration": 4.0, "warmth": 2.0})),
            ("rock".to_string(), json!({"food": 1.0})),
            ("bread".to_string(), json!({"food": "lots"})),
        ];
        let table = MetaboliteTable::from_entries(entries, |item| item != "rock");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("soup"), Some(&Metabolite::new(3.0, 4.0, 2.0)));
        assert_eq!(table.resolve("bread", None), None);
    }

    #[test]
    fn test_resolve_falls_back_to_host_food() {
        let table = MetaboliteTable::new();
        let m = table
            .resolve(
                "bread",
                Some(HostFood {
                    nutrition: 5,
                    saturation: 0.5,
                }),
            )
            .unwrap_or_default();
        assert_eq!(m.food, 5.0);
        assert_eq!(m.hydration, 2.5);
        assert_eq!(m.warmth, 0.0);
    }

    #[test]
    fn test_explicit_entry_wins_over_host_food() {
        let mut table = MetaboliteTable::new();
        table.insert("melon", Metabolite::new(1.0, 6.0, -2.0));
        let m = table.resolve(
            "melon",
            Some(HostFood {
                nutrition: 2,
                saturation: 0.3,
            }),
        );
        assert_eq!(m, Some(Metabolite::new(1.0, 6.0, -2.0)));
    }

    #[test]
    fn test_reload_swaps_whole_table() {
        let registry = MetaboliteRegistry::new();
        let mut first = MetaboliteTable::new();
        first.insert("tea", Metabolite::new(0.0, 4.0, 3.0));
        registry.reload(first);
        let held = registry.current().expect("loaded");

        registry.reload(MetaboliteTable::new());
        // Old handle still sees the old table
        assert_eq!(held.len(), 1);
        assert_eq!(registry.lookup("tea", None), Ok(None));
    }

    #[test]
    fn test_all_zero_entry_is_a_record() {
        let table = MetaboliteTable::from_json_str(r#"{"water": {}}"#).expect("parse");
        assert_eq!(table.resolve("water", None), Some(Metabolite::default()));
        assert_eq!(table.resolve("stone", None), None);
    }

    #[test]
    fn test_from_json_str() {
        let table = MetaboliteTable::from_json_str(r#"{"stew": {"food": 6, "hydration": 3, "warmth": 4, "amplifier": 1}}"#)
            .expect("parse");
        let stew = table.get("stew").copied().unwrap_or_default();
        assert_eq!(stew.amplifier, 1);
        assert!(matches!(MetaboliteTable::from_json_str("[1, 2]"), Err(MetaboliteError::Parse(_))));
    }
}

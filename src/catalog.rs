use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::Costume,
};

/// Shopping-list length bounds enforced at load time
const MIN_ITEMS: usize = 3;
const MAX_ITEMS: usize = 10;

/// In-memory costume catalog; loaded once at startup, read-only for the
/// process lifetime, shared across requests without synchronization
#[derive(Debug)]
pub struct Catalog {
    costumes: Vec<Costume>,
    index: HashMap<String, usize>,
    pub loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog from raw records, dropping invalid or duplicate
    /// entries with a load-time warning. Record order is preserved; it is
    /// the tie-break order for equal scores downstream.
    pub fn from_costumes(records: Vec<Costume>) -> Self {
        let mut costumes = Vec::with_capacity(records.len());
        let mut index = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        for record in records {
            if let Err(reason) = validate(&record) {
                tracing::warn!(id = %record.id, reason = %reason, "Dropping invalid catalog record");
                continue;
            }
            if !seen.insert(record.id.clone()) {
                tracing::warn!(id = %record.id, "Dropping duplicate catalog record");
                continue;
            }
            index.insert(record.id.clone(), costumes.len());
            costumes.push(record);
        }

        Self {
            costumes,
            index,
            loaded_at: Utc::now(),
        }
    }

    /// Loads and validates the catalog file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("Failed to read {}: {}", path.display(), e)))?;
        let records: Vec<Costume> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Catalog(format!("Failed to parse {}: {}", path.display(), e)))?;

        let total = records.len();
        let catalog = Self::from_costumes(records);

        tracing::info!(
            loaded = catalog.len(),
            dropped = total - catalog.len(),
            path = %path.display(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    pub fn all(&self) -> &[Costume] {
        &self.costumes
    }

    pub fn get(&self, id: &str) -> Option<&Costume> {
        self.index.get(id).map(|&i| &self.costumes[i])
    }

    pub fn len(&self) -> usize {
        self.costumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costumes.is_empty()
    }
}

/// Per-record schema checks beyond what serde enforces
fn validate(costume: &Costume) -> Result<(), String> {
    if costume.id.trim().is_empty() {
        return Err("empty id".to_string());
    }
    if costume.name.trim().is_empty() {
        return Err("empty name".to_string());
    }
    if !(1..=7).contains(&costume.niche) {
        return Err(format!("niche {} out of 1-7", costume.niche));
    }
    if costume.vibes.max_intensity() > 3 {
        return Err("vibe intensity out of 0-3".to_string());
    }
    if costume.requirements.anchor.trim().is_empty() {
        return Err("empty anchor item".to_string());
    }
    let item_count = costume.requirements.items.len();
    if !(MIN_ITEMS..=MAX_ITEMS).contains(&item_count) {
        return Err(format!("{} items outside {}-{}", item_count, MIN_ITEMS, MAX_ITEMS));
    }
    Ok(())
}

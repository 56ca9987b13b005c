use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use super::arithmetic::format_date_key;
use super::error::StoreError;
use super::index::EventsIndex;
use super::item::{ParsedItem, ScheduleItem};

#[derive(Debug, Deserialize)]
struct ItemsFile {
    #[serde(default)]
    items: Vec<ScheduleItem>,
}

/// Read-only source of schedule items.
///
/// Items are validated when loaded, so everything held here is known to
/// project cleanly.
#[derive(Debug, Default)]
pub struct Store {
    path: Option<PathBuf>,
    items: Vec<ScheduleItem>,
    index: EventsIndex,
}

impl Store {
    /// Loads `[[items]]` from a TOML file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        let file: ItemsFile = toml::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut store = Self::from_items(file.items)?;
        info!(items = store.items.len(), "loaded schedule items");
        store.path = Some(path);
        Ok(store)
    }

    pub fn from_items(items: Vec<ScheduleItem>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(StoreError::DuplicateId(item.id.clone()));
            }
            ParsedItem::parse(item)?;
        }
        let index = EventsIndex::from_items(&items)?;
        Ok(Self {
            path: None,
            items,
            index,
        })
    }

    /// Re-reads the backing file. In-memory stores are left as they are.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        let Some(path) = self.path.clone() else {
            debug!("reload skipped for in-memory store");
            return Ok(());
        };
        *self = Self::open(path)?;
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn index(&self) -> &EventsIndex {
        &self.index
    }

    pub fn items_for_date(&self, date: NaiveDate) -> &[ScheduleItem] {
        self.index.get(&format_date_key(date))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

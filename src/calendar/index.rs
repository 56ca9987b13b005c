use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::error::ScheduleError;
use super::item::{ParsedItem, ScheduleItem};

/// Items bucketed by `YYYY-MM-DD` date key.
///
/// `version` is drawn from a process-wide counter on construction and on
/// every mutation, so two indexes only share a version when one is a clone
/// of the other. Projections built from the index can be cached against it.
#[derive(Debug, Clone)]
pub struct EventsIndex {
    entries: HashMap<String, Vec<ScheduleItem>>,
    version: u64,
}

static GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

impl Default for EventsIndex {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            version: next_version(),
        }
    }
}

impl EventsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: &[ScheduleItem]) -> Result<Self, ScheduleError> {
        let mut index = Self::new();
        for item in items {
            index.insert(item.clone())?;
        }
        Ok(index)
    }

    pub fn insert(&mut self, item: ScheduleItem) -> Result<(), ScheduleError> {
        ParsedItem::parse(&item)?;
        self.entries.entry(item.date.clone()).or_default().push(item);
        self.version = next_version();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.version = next_version();
    }

    /// Items on `date_key`, in insertion order. Empty when none are recorded.
    pub fn get(&self, date_key: &str) -> &[ScheduleItem] {
        self.entries.get(date_key).map_or(&[][..], Vec::as_slice)
    }

    pub fn has_events(&self, date_key: &str) -> bool {
        !self.get(date_key).is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_date_key() {
        let index = EventsIndex::from_items(&[
            ScheduleItem::new("a", "2025-04-02", "9:00 AM", "A"),
            ScheduleItem::new("b", "2025-04-02", "1:00 PM", "B"),
            ScheduleItem::new("c", "2025-04-03", "1:00 PM", "C"),
        ])
        .expect("index");
        assert_eq!(index.get("2025-04-02").len(), 2);
        assert!(index.has_events("2025-04-03"));
        assert!(!index.has_events("2025-04-04"));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn version_moves_on_every_mutation() {
        let mut index = EventsIndex::new();
        let empty = index.version();
        index
            .insert(ScheduleItem::new("a", "2025-04-02", "9:00 AM", "A"))
            .expect("insert");
        let one = index.version();
        assert_ne!(one, empty);
        index.clear();
        assert_ne!(index.version(), one);
        assert_ne!(index.version(), empty);
        assert!(index.is_empty());
    }

    #[test]
    fn same_sized_indexes_have_distinct_versions() {
        let first = EventsIndex::from_items(&[ScheduleItem::new("a", "2025-04-01", "9:00 AM", "A")])
            .expect("index");
        let second =
            EventsIndex::from_items(&[ScheduleItem::new("a", "2025-04-04", "9:00 AM", "A")])
                .expect("index");
        assert_ne!(first.version(), second.version());
        assert_ne!(EventsIndex::new().version(), EventsIndex::new().version());
        assert_eq!(first.clone().version(), first.version());
    }

    #[test]
    fn rejects_malformed_items() {
        let mut index = EventsIndex::new();
        let before = index.version();
        let err = index
            .insert(ScheduleItem::new("bad", "2025-04-31", "9:00 AM", "A"))
            .expect_err("april has 30 days");
        assert!(matches!(err, ScheduleError::MalformedDate { .. }));
        assert_eq!(index.version(), before);
    }
}

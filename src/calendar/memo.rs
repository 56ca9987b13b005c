//! Caches for the two projections.
//!
//! Both projections are pure, so a cached result stays valid until its key
//! changes. The agenda is keyed by a fingerprint of the item list; the week
//! grid by its Sunday and the index version. Index versions are unique per
//! process, so a rebuilt index never matches a grid cached from its
//! predecessor.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use tracing::debug;

use super::agenda::{self, MonthSection};
use super::arithmetic::week_start_of;
use super::error::ScheduleError;
use super::index::EventsIndex;
use super::item::ScheduleItem;
use super::week::{self, WeekGrid};

pub fn fingerprint(items: &[ScheduleItem]) -> u64 {
    let mut hasher = DefaultHasher::new();
    items.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Default)]
pub struct AgendaMemo {
    cached: Option<(u64, Vec<MonthSection>)>,
    recomputations: u64,
}

impl AgendaMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(&mut self, items: &[ScheduleItem]) -> Result<&[MonthSection], ScheduleError> {
        let key = fingerprint(items);
        let stale = self.cached.as_ref().map_or(true, |(k, _)| *k != key);
        if stale {
            let sections = agenda::project(items)?;
            self.recomputations += 1;
            debug!(fingerprint = key, "agenda memo miss");
            self.cached = Some((key, sections));
        }
        Ok(self.cached.as_ref().map_or(&[][..], |(_, s)| s.as_slice()))
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[derive(Debug, Default)]
pub struct WeekMemo {
    cached: Option<((NaiveDate, u64), WeekGrid)>,
    recomputations: u64,
}

impl WeekMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(
        &mut self,
        reference: NaiveDate,
        index: &EventsIndex,
    ) -> Result<&WeekGrid, ScheduleError> {
        let week_start = week_start_of(reference).ok_or(ScheduleError::DateOutOfRange(reference))?;
        let key = (week_start, index.version());

        let fresh = self.cached.as_ref().is_some_and(|(k, _)| *k == key);
        if !fresh {
            let grid = week::build_week(reference, index)?;
            self.recomputations += 1;
            debug!(%week_start, version = key.1, "week memo miss");
            self.cached = Some((key, grid));
        }
        self.cached
            .as_ref()
            .map(|(_, grid)| grid)
            .ok_or(ScheduleError::DateOutOfRange(reference))
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::calendar::store::Store;

    fn items() -> Vec<ScheduleItem> {
        vec![
            ScheduleItem::new("a", "2025-04-02", "9:00 PM", "A"),
            ScheduleItem::new("b", "2025-04-02", "10:00AM", "B"),
        ]
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn agenda_memo_reuses_until_items_change() {
        let mut memo = AgendaMemo::new();
        let mut list = items();

        let first = memo.project(&list).expect("project").to_vec();
        let again = memo.project(&list).expect("project").to_vec();
        assert_eq!(first, again);
        assert_eq!(memo.recomputations(), 1);

        list[0].title = "renamed".into();
        let changed = memo.project(&list).expect("project");
        assert_eq!(changed[0].items[1].item.title, "renamed");
        assert_eq!(memo.recomputations(), 2);

        memo.invalidate();
        memo.project(&list).expect("project");
        assert_eq!(memo.recomputations(), 3);
    }

    #[test]
    fn agenda_memo_keeps_previous_result_on_error() {
        let mut memo = AgendaMemo::new();
        let good = items();
        memo.project(&good).expect("project");

        let mut bad = good.clone();
        bad[1].time = "noon".into();
        assert!(memo.project(&bad).is_err());
        assert_eq!(memo.recomputations(), 1);

        memo.project(&good).expect("project");
        assert_eq!(memo.recomputations(), 1);
    }

    #[test]
    fn week_memo_keys_on_week_and_index_version() {
        let mut memo = WeekMemo::new();
        let mut index = EventsIndex::from_items(&items()).expect("index");

        let label = memo.build(ymd(2025, 4, 2), &index).expect("grid").label.clone();
        assert_eq!(label, "April Week 1");
        // Another day in the same week hits the cache.
        memo.build(ymd(2025, 4, 5), &index).expect("grid");
        assert_eq!(memo.recomputations(), 1);

        index
            .insert(ScheduleItem::new("c", "2025-04-04", "9:00 AM", "C"))
            .expect("insert");
        let grid = memo.build(ymd(2025, 4, 5), &index).expect("grid");
        assert!(grid.cells[5].has_events);
        assert_eq!(memo.recomputations(), 2);

        memo.build(ymd(2025, 4, 9), &index).expect("grid");
        assert_eq!(memo.recomputations(), 3);
    }

    /// Rewrites the file with a single item on `date`.
    fn write_items(path: &Path, date: &str) {
        let body = format!(
            "[[items]]\nid = \"a\"\ndate = \"{date}\"\ntime = \"9:00 AM\"\ntitle = \"A\"\n"
        );
        std::fs::write(path, body).expect("write");
    }

    fn presence(grid: &WeekGrid) -> Vec<bool> {
        grid.cells.iter().map(|c| c.has_events).collect()
    }

    #[test]
    fn week_memo_follows_reload_with_same_item_count() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        write_items(file.path(), "2025-04-01");
        let mut store = Store::open(file.path()).expect("open");

        let mut memo = WeekMemo::new();
        let reference = ymd(2025, 4, 2);
        let before = presence(memo.build(reference, store.index()).expect("grid"));
        assert_eq!(before, [false, false, true, false, false, false, false]);

        write_items(file.path(), "2025-04-04");
        store.reload().expect("reload");
        assert_eq!(store.len(), 1);

        let direct = presence(&week::build_week(reference, store.index()).expect("grid"));
        let cached = presence(memo.build(reference, store.index()).expect("grid"));
        assert_eq!(direct, [false, false, false, false, false, true, false]);
        assert_eq!(cached, direct);
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn agenda_memo_follows_reload() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        write_items(file.path(), "2025-04-01");
        let mut store = Store::open(file.path()).expect("open");

        let mut memo = AgendaMemo::new();
        let first = memo.project(store.items()).expect("project");
        assert_eq!(first[0].items[0].date.to_string(), "2025-04-01");

        write_items(file.path(), "2025-05-04");
        store.reload().expect("reload");
        let sections = memo.project(store.items()).expect("project");
        assert_eq!(sections[0].title, "May");
        assert_eq!(memo.recomputations(), 2);
    }

    #[test]
    fn week_memo_invalidate_forces_rebuild() {
        let mut memo = WeekMemo::new();
        let index = EventsIndex::from_items(&items()).expect("index");
        memo.build(ymd(2025, 4, 2), &index).expect("grid");
        memo.invalidate();
        memo.build(ymd(2025, 4, 2), &index).expect("grid");
        assert_eq!(memo.recomputations(), 2);
    }
}

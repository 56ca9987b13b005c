//! Chronological agenda: items grouped by month, sorted by date then time.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::arithmetic::{day_abbreviation, month_name};
use super::error::ScheduleError;
use super::item::{ParsedItem, ScheduleItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedItem {
    pub item: ScheduleItem,
    pub date: NaiveDate,
    pub minutes: u32,
    /// Set on the earliest item of each date so the date column is drawn once.
    pub is_first_of_date: bool,
    pub day_abbreviation: &'static str,
    pub day_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSection {
    /// `YYYY-MM`
    pub key: String,
    pub title: &'static str,
    pub items: Vec<AnnotatedItem>,
}

/// Groups `items` into month sections in chronological order.
///
/// Every item is validated first; the first malformed one aborts the whole
/// projection. Items sharing a date and time keep their input order.
#[tracing::instrument(skip_all, fields(items = items.len()))]
pub fn project(items: &[ScheduleItem]) -> Result<Vec<MonthSection>, ScheduleError> {
    let mut parsed = items
        .iter()
        .map(ParsedItem::parse)
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by_key is stable
    parsed.sort_by_key(|p| (p.date, p.minutes));

    let sections = parsed
        .into_iter()
        .fold(Vec::<MonthSection>::new(), |mut sections, p| {
            let key = p.month_key();
            let is_new_section = sections.last().map_or(true, |s| s.key != key);
            if is_new_section {
                sections.push(MonthSection {
                    key: key.to_string(),
                    title: month_name(p.date),
                    items: Vec::new(),
                });
            }

            if let Some(section) = sections.last_mut() {
                let is_first_of_date = section.items.last().map_or(true, |prev| prev.date != p.date);
                section.items.push(AnnotatedItem {
                    item: p.item.clone(),
                    date: p.date,
                    minutes: p.minutes,
                    is_first_of_date,
                    day_abbreviation: day_abbreviation(p.date),
                    day_number: format!("{:02}", p.date.day()),
                });
            }
            sections
        });

    debug!(sections = sections.len(), "projected agenda");
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn item(id: &str, date: &str, time: &str) -> ScheduleItem {
        ScheduleItem::new(id, date, time, format!("title {id}"))
    }

    #[test]
    fn empty_input_yields_no_sections() {
        assert_eq!(project(&[]).expect("project"), Vec::new());
    }

    #[test]
    fn april_and_may_scenario() {
        let items = vec![
            item("a", "2025-04-02", "9:00 PM"),
            item("b", "2025-04-02", "10:00AM"),
            item("c", "2025-05-01", "8:00 AM"),
        ];
        let sections = project(&items).expect("project");
        assert_eq!(sections.len(), 2);

        let april = &sections[0];
        assert_eq!(april.title, "April");
        assert_eq!(april.key, "2025-04");
        let ids: Vec<&str> = april.items.iter().map(|a| a.item.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(april.items[0].is_first_of_date);
        assert!(!april.items[1].is_first_of_date);
        assert_eq!(april.items[0].day_abbreviation, "WED");
        assert_eq!(april.items[1].day_number, "02");

        let may = &sections[1];
        assert_eq!(may.title, "May");
        assert_eq!(may.items.len(), 1);
        assert!(may.items[0].is_first_of_date);
        assert_eq!(may.items[0].day_abbreviation, "THU");
        assert_eq!(may.items[0].day_number, "01");
    }

    #[test]
    fn equal_date_and_time_keep_input_order() {
        let items = vec![
            item("z", "2025-06-10", "9:00 AM"),
            item("first", "2025-06-09", "3:00 PM"),
            item("y", "2025-06-10", "9:00AM"),
            item("x", "2025-06-10", "9:00 am"),
        ];
        let sections = project(&items).expect("project");
        let ids: Vec<&str> = sections[0].items.iter().map(|a| a.item.id.as_str()).collect();
        assert_eq!(ids, ["first", "z", "y", "x"]);
    }

    #[test]
    fn output_is_sorted_and_complete() {
        let items = vec![
            item("1", "2026-01-03", "12:00 AM"),
            item("2", "2025-12-31", "11:59 PM"),
            item("3", "2025-12-31", "12:00 PM"),
            item("4", "2026-01-03", "1:00 AM"),
            item("5", "2025-11-15", "6:30 PM"),
            item("6", "2026-02-01", "7:00 AM"),
        ];
        let sections = project(&items).expect("project");

        let keys: Vec<&str> = sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["2025-11", "2025-12", "2026-01", "2026-02"]);

        let flat: Vec<&AnnotatedItem> = sections.iter().flat_map(|s| &s.items).collect();
        assert_eq!(flat.len(), items.len());
        let ids: HashSet<&str> = flat.iter().map(|a| a.item.id.as_str()).collect();
        assert_eq!(ids.len(), items.len());
        assert!(flat
            .windows(2)
            .all(|w| (w[0].date, w[0].minutes) <= (w[1].date, w[1].minutes)));
    }

    #[test]
    fn first_of_date_marks_one_item_per_date() {
        let items = vec![
            item("a", "2025-04-03", "1:00 PM"),
            item("b", "2025-04-02", "9:00 AM"),
            item("c", "2025-04-03", "8:00 AM"),
            item("d", "2025-04-02", "5:00 PM"),
            item("e", "2025-04-20", "5:00 PM"),
        ];
        let sections = project(&items).expect("project");
        assert_eq!(sections.len(), 1);
        let flags: Vec<(&str, bool)> = sections[0]
            .items
            .iter()
            .map(|a| (a.item.id.as_str(), a.is_first_of_date))
            .collect();
        assert_eq!(
            flags,
            [("b", true), ("d", false), ("c", true), ("a", false), ("e", true)]
        );
    }

    #[test]
    fn same_month_in_different_years_are_separate_sections() {
        let items = vec![
            item("a", "2026-03-01", "9:00 AM"),
            item("b", "2025-03-01", "9:00 AM"),
        ];
        let sections = project(&items).expect("project");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].key, "2025-03");
        assert_eq!(sections[1].key, "2026-03");
        assert!(sections.iter().all(|s| s.title == "March"));
    }

    #[test]
    fn malformed_item_aborts_projection() {
        let items = vec![
            item("ok", "2025-04-02", "9:00 AM"),
            item("bad", "2025-13-02", "9:00 AM"),
        ];
        let err = project(&items).expect_err("should reject");
        assert!(matches!(err, ScheduleError::MalformedDate { ref id, .. } if id == "bad"));
    }
}

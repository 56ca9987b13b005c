//! Sunday-to-Saturday week strip with presence flags.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use super::arithmetic::{
    day_abbreviation, format_date_key, month_name, week_of_month, week_start_of,
};
use super::error::ScheduleError;
use super::index::EventsIndex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekCell {
    pub date: NaiveDate,
    pub date_key: String,
    pub day: u32,
    pub day_name: &'static str,
    pub has_events: bool,
}

impl WeekCell {
    /// Selection is tracked by date key, so this is a plain string comparison.
    pub fn is_selected(&self, selected_key: &str) -> bool {
        self.date_key == selected_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub week_start: NaiveDate,
    pub cells: [WeekCell; 7],
    pub label: String,
}

impl WeekGrid {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.cells.iter().any(|c| c.date == date)
    }
}

/// Builds the week containing `reference`.
///
/// The label uses the week's Wednesday, so a week straddling two months is
/// attributed to whichever month holds its middle.
#[tracing::instrument(skip(index), fields(version = index.version()))]
pub fn build_week(reference: NaiveDate, index: &EventsIndex) -> Result<WeekGrid, ScheduleError> {
    let week_start = week_start_of(reference).ok_or(ScheduleError::DateOutOfRange(reference))?;
    // Saturday must exist for the whole strip to exist.
    week_start
        .checked_add_days(Days::new(6))
        .ok_or(ScheduleError::DateOutOfRange(reference))?;

    let cells: [WeekCell; 7] = std::array::from_fn(|offset| {
        let date = week_start + Days::new(offset as u64);
        let date_key = format_date_key(date);
        WeekCell {
            date,
            has_events: index.has_events(&date_key),
            date_key,
            day: date.day(),
            day_name: day_abbreviation(date),
        }
    });

    let wednesday = cells[3].date;
    let label = format!("{} Week {}", month_name(wednesday), week_of_month(wednesday));

    debug!(%week_start, %label, "built week grid");
    Ok(WeekGrid {
        week_start,
        cells,
        label,
    })
}

use chrono::NaiveDate;
use serde::Deserialize;

use super::arithmetic::{parse_date_key, time_string_to_minutes};
use super::error::ScheduleError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Event,
    Call,
    ActionItem,
}

impl ItemKind {
    /// Single-glyph marker used in list rows.
    pub fn marker(self) -> char {
        match self {
            ItemKind::Event => '\u{25cf}',
            ItemKind::Call => '\u{260e}',
            ItemKind::ActionItem => '\u{2713}',
        }
    }
}

/// One calendar-bound CRM entity as delivered by the data source.
///
/// `date` is `YYYY-MM-DD` and `time` is a 12-hour clock string like
/// `9:00 PM`. Neither is trusted until [`ParsedItem::parse`] accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ScheduleItem {
    pub id: String,
    pub date: String,
    pub time: String,
    pub title: String,
    #[serde(default)]
    pub kind: ItemKind,
}

impl ScheduleItem {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            time: time.into(),
            title: title.into(),
            kind: ItemKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: ItemKind) -> Self {
        self.kind = kind;
        self
    }
}

/// A [`ScheduleItem`] whose date and time have been checked and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItem<'a> {
    pub item: &'a ScheduleItem,
    pub date: NaiveDate,
    pub minutes: u32,
}

impl<'a> ParsedItem<'a> {
    pub fn parse(item: &'a ScheduleItem) -> Result<Self, ScheduleError> {
        let date = parse_date_key(&item.date).ok_or_else(|| ScheduleError::MalformedDate {
            id: item.id.clone(),
            value: item.date.clone(),
        })?;
        let minutes =
            time_string_to_minutes(&item.time).map_err(|reason| ScheduleError::MalformedTime {
                id: item.id.clone(),
                value: item.time.clone(),
                reason,
            })?;
        Ok(Self {
            item,
            date,
            minutes,
        })
    }

    /// `YYYY-MM` bucket key. Safe to slice because the date was validated.
    pub fn month_key(&self) -> &'a str {
        &self.item.date[..7]
    }
}

use chrono::{Days, NaiveDate};
use crm_schedule::calendar::arithmetic::{format_date_key, next_week, parse_date_key, prev_week};
use crm_schedule::calendar::{
    AgendaMemo, MonthSection, ScheduleError, ScheduleItem, Store, StoreError, WeekGrid, WeekMemo,
};
use tracing::{info, warn};

use crate::components::agenda_view::agenda_row_count;
use crate::config::StartView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Agenda,
    Week,
}

impl From<StartView> for ViewMode {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Agenda => ViewMode::Agenda,
            StartView::Week => ViewMode::Week,
        }
    }
}

/// Everything the week view needs for one frame.
pub struct WeekSnapshot<'a> {
    pub grid: &'a WeekGrid,
    pub selected_key: &'a str,
    pub today: NaiveDate,
    pub selected_items: &'a [ScheduleItem],
}

pub struct App {
    pub running: bool,
    pub view_mode: ViewMode,
    pub today: NaiveDate,
    /// Raw week anchor; the grid's Sunday is re-derived from it on every build.
    pub anchor: NaiveDate,
    /// Selected day as a `YYYY-MM-DD` key.
    pub selected_key: String,
    pub agenda_scroll: usize,
    pub show_help: bool,
    pub status_message: Option<String>,
    store: Store,
    agenda: AgendaMemo,
    week: WeekMemo,
}

impl App {
    pub fn new(store: Store, view_mode: ViewMode, today: NaiveDate, anchor: NaiveDate) -> Self {
        Self {
            running: true,
            view_mode,
            today,
            anchor,
            selected_key: format_date_key(anchor),
            agenda_scroll: 0,
            show_help: false,
            status_message: None,
            store,
            agenda: AgendaMemo::new(),
            week: WeekMemo::new(),
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        parse_date_key(&self.selected_key).unwrap_or(self.anchor)
    }

    pub fn sections(&mut self) -> Result<&[MonthSection], ScheduleError> {
        self.agenda.project(self.store.items())
    }

    pub fn week_snapshot(&mut self) -> Result<WeekSnapshot<'_>, ScheduleError> {
        let index = self.store.index();
        let grid = self.week.build(self.anchor, index)?;
        Ok(WeekSnapshot {
            grid,
            selected_key: &self.selected_key,
            today: self.today,
            selected_items: index.get(&self.selected_key),
        })
    }

    pub fn next_day(&mut self) {
        let date = self.selected_date();
        self.select(date.checked_add_days(Days::new(1)).unwrap_or(date));
    }

    pub fn prev_day(&mut self) {
        let date = self.selected_date();
        self.select(date.checked_sub_days(Days::new(1)).unwrap_or(date));
    }

    pub fn next_week(&mut self) {
        self.anchor = next_week(self.anchor);
    }

    pub fn prev_week(&mut self) {
        self.anchor = prev_week(self.anchor);
    }

    pub fn go_to_today(&mut self) {
        self.anchor = self.today;
        self.selected_key = format_date_key(self.today);
    }

    pub fn scroll_up(&mut self) {
        self.agenda_scroll = self.agenda_scroll.saturating_sub(1);
    }

    /// Stops at the last agenda row.
    pub fn scroll_down(&mut self) {
        let last = self.last_agenda_row();
        self.agenda_scroll = self.agenda_scroll.saturating_add(1).min(last);
    }

    fn last_agenda_row(&mut self) -> usize {
        self.sections()
            .map(agenda_row_count)
            .unwrap_or(0)
            .saturating_sub(1)
    }

    pub fn reload(&mut self) {
        let result = self.store.reload();
        self.agenda.invalidate();
        self.week.invalidate();
        match result {
            Ok(()) => {
                let last = self.last_agenda_row();
                self.agenda_scroll = self.agenda_scroll.min(last);
                info!(items = self.store.len(), "items reloaded");
                self.status_message = Some(format!("Reloaded {} items", self.store.len()));
            }
            Err(err) => {
                warn!(error = %err, "reload failed");
                self.status_message = Some(describe_store_error(&err));
            }
        }
    }

    /// Moves the selection and re-anchors when it leaves the visible week.
    fn select(&mut self, date: NaiveDate) {
        self.selected_key = format_date_key(date);
        let visible = self
            .week
            .build(self.anchor, self.store.index())
            .map(|grid| grid.contains(date))
            .unwrap_or(false);
        if !visible {
            self.anchor = date;
        }
    }
}

pub fn describe_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Read { path, .. } => format!("Cannot read {}", path.display()),
        StoreError::Parse { path, .. } => format!("Cannot parse {}", path.display()),
        other => other.to_string(),
    }
}

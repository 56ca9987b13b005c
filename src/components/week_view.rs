use crm_schedule::calendar::arithmetic::time_string_to_minutes;
use crm_schedule::calendar::{ScheduleItem, WeekCell};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::WeekSnapshot;
use crate::theme;

const STRIP_HEIGHT: u16 = 3;
const EVENT_DOT: &str = "\u{2022}";

pub struct WeekView;

impl WeekView {
    pub fn render(frame: &mut Frame, area: Rect, snapshot: &WeekSnapshot<'_>) {
        let theme = theme::current();

        let block = Block::default()
            .title(format!(" {} ", snapshot.grid.label))
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < STRIP_HEIGHT {
            return;
        }

        let rows = Layout::vertical([
            Constraint::Length(STRIP_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let cols = Layout::horizontal([Constraint::Ratio(1, 7); 7]).split(rows[0]);
        for (cell, col) in snapshot.grid.cells.iter().zip(cols.iter()) {
            let style = cell_style(cell, snapshot);
            let dot = if cell.has_events { EVENT_DOT } else { " " };
            let lines = vec![
                Line::from(Span::styled(cell.day_name, style)),
                Line::from(Span::styled(format!("{:>2}", cell.day), style)),
                Line::from(Span::styled(dot, theme.event)),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), *col);
        }

        let day_title = Line::from(Span::styled(
            format!(" {} ", snapshot.selected_key),
            theme.header.add_modifier(Modifier::UNDERLINED),
        ));
        frame.render_widget(Paragraph::new(day_title), rows[1]);

        if snapshot.selected_items.is_empty() {
            frame.render_widget(
                Paragraph::new(" No events on this day").style(theme.dim),
                rows[2],
            );
            return;
        }

        let items: Vec<ListItem> = day_items_by_time(snapshot.selected_items)
            .into_iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", item.kind.marker()), theme.event),
                    Span::styled(format!("{:>8}  ", item.time), theme.dim),
                    Span::raw(item.title.clone()),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), rows[2]);
    }
}

fn cell_style(cell: &WeekCell, snapshot: &WeekSnapshot<'_>) -> Style {
    let theme = theme::current();
    let is_today = cell.date == snapshot.today;
    match (cell.is_selected(snapshot.selected_key), is_today) {
        (true, true) => theme.today.add_modifier(Modifier::BOLD),
        (true, false) => theme.selected,
        (false, true) => theme.today,
        (false, false) => theme.header,
    }
}

/// Index entries keep insertion order; the day list reads better by time.
fn day_items_by_time(items: &[ScheduleItem]) -> Vec<&ScheduleItem> {
    let mut sorted: Vec<&ScheduleItem> = items.iter().collect();
    sorted.sort_by_key(|item| time_string_to_minutes(&item.time).unwrap_or(u32::MAX));
    sorted
}

use chrono::NaiveDate;
use crm_schedule::calendar::MonthSection;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::theme;

/// Width of the `WED 02` date column.
const DATE_COL_W: usize = 7;

pub struct AgendaView;

impl AgendaView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        sections: &[MonthSection],
        today: NaiveDate,
        scroll: usize,
    ) {
        let theme = theme::current();
        let total: usize = sections.iter().map(|s| s.items.len()).sum();

        let block = Block::default()
            .title(" Agenda ")
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} item{} ", total, if total == 1 { "" } else { "s" }),
                theme.dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme.border);

        if sections.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("Nothing scheduled").style(theme.dim), inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;
        let rows = agenda_lines(sections, today, inner_w);
        let scroll = scroll.min(rows.len().saturating_sub(1));
        let visible: Vec<ListItem> = rows
            .into_iter()
            .skip(scroll)
            .map(ListItem::new)
            .collect();

        frame.render_widget(List::new(visible).block(block), area);
    }
}

/// Number of lines [`agenda_lines`] produces for `sections`.
pub fn agenda_row_count(sections: &[MonthSection]) -> usize {
    let items: usize = sections.iter().map(|s| s.items.len()).sum();
    // header per section, blank separator between sections
    items + (sections.len() * 2).saturating_sub(1)
}

/// One header line per section, one line per item. The date column is only
/// filled on the first item of each date.
fn agenda_lines(sections: &[MonthSection], today: NaiveDate, width: usize) -> Vec<Line<'static>> {
    let theme = theme::current();
    let mut lines = Vec::new();

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        let year = section.key.get(..4).unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(section.title, theme.section),
            Span::styled(format!(" {year}"), theme.dim),
        ]));

        for entry in &section.items {
            let date_col = if entry.is_first_of_date {
                format!("{} {}", entry.day_abbreviation, entry.day_number)
            } else {
                String::new()
            };
            let date_style = if entry.date == today {
                theme.today
            } else {
                theme.header
            };

            let time = format!(" {:>8} ", entry.item.time);
            let used = DATE_COL_W + 2 + time.chars().count();
            let title: String = entry
                .item
                .title
                .chars()
                .take(width.saturating_sub(used))
                .collect();

            lines.push(Line::from(vec![
                Span::styled(format!("{date_col:<DATE_COL_W$}"), date_style),
                Span::styled(format!(" {}", entry.item.kind.marker()), theme.event),
                Span::styled(time, theme.dim),
                Span::raw(title),
            ]));
        }
    }
    lines
}

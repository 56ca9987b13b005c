use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::ViewMode;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    /// Mode on the left; the status message, or width-appropriate key hints, on the right.
    pub fn render(frame: &mut Frame, area: Rect, mode: ViewMode, message: Option<&str>) {
        let style = theme::current().status;
        let w = area.width as usize;

        let mode_str = match mode {
            ViewMode::Agenda => "[1]Agenda",
            ViewMode::Week => "[2]Week",
        };

        let right = match message {
            Some(msg) => format!(" {msg} "),
            None => hints(mode, w).to_string(),
        };

        let left = format!(" {mode_str} ");
        let padding = " ".repeat(w.saturating_sub(left.chars().count() + right.chars().count()));

        let line = Line::from(vec![
            Span::styled(left, style),
            Span::styled(padding, style),
            Span::styled(right, style),
        ]);
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}

fn hints(mode: ViewMode, w: usize) -> &'static str {
    match mode {
        ViewMode::Agenda if w >= 60 => " jk:Scroll t:Today r:Reload 2:Week ?:Help q:Quit ",
        ViewMode::Week if w >= 60 => " hl:Day [/]:Week t:Today r:Reload 1:Agenda ?:Help q:Quit ",
        _ if w >= 30 => " ?:Help q:Quit ",
        _ => "",
    }
}

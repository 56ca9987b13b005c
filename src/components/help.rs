use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("h/l \u{2190}/\u{2192}", "Previous/next day"),
            ("[/]", "Previous/next week"),
            ("j/k \u{2191}/\u{2193}", "Scroll agenda"),
            ("t", "Jump to today"),
        ],
    ),
    ("Views", &[("1/2", "Agenda / Week view")]),
    ("Other", &[("r", "Reload items file"), ("q / Esc", "Quit / close popup")]),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let theme = theme::current();

    let popup_w = area.width.clamp(30, 48);
    let popup_h = area.height.clamp(10, 16);
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme.header)
        .borders(Borders::ALL)
        .border_style(theme.border);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme.event.add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (i, (section, keys)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(*section, section_style)));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<12}"), key_style),
                Span::raw(*desc),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

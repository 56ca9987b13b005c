use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

use crate::config::ThemeSection;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Installs the theme built from config. Later calls are ignored.
pub fn init(section: &ThemeSection) {
    let _ = THEME.set(Theme::from_section(section));
}

/// Active theme; the default preset when [`init`] was never called.
pub fn current() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub today: Style,
    pub selected: Style,
    pub header: Style,
    pub section: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub event: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            today: Style::new().fg(Color::Black).bg(Color::Yellow),
            selected: Style::new().fg(Color::Black).bg(Color::Cyan),
            header: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            section: Style::new()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            dim: Style::new().fg(Color::DarkGray),
            border: Style::new().fg(Color::Gray),
            status: Style::new().fg(Color::White).bg(Color::DarkGray),
            event: Style::new().fg(Color::Green),
        }
    }
}

impl Theme {
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "default" => Self::default(),
            other => {
                warn!(preset = other, "unknown theme preset, using default");
                Self::default()
            }
        }
    }

    fn dracula() -> Self {
        let fg = Color::Rgb(248, 248, 242);
        let panel = Color::Rgb(68, 71, 90);
        Self {
            today: Style::new().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            selected: Style::new().fg(Color::Black).bg(Color::Rgb(139, 233, 253)),
            header: Style::new().fg(fg).add_modifier(Modifier::BOLD),
            section: Style::new()
                .fg(Color::Rgb(255, 121, 198))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            dim: Style::new().fg(Color::Rgb(98, 114, 164)),
            border: Style::new().fg(panel),
            status: Style::new().fg(fg).bg(panel),
            event: Style::new().fg(Color::Rgb(80, 250, 123)),
        }
    }

    fn nord() -> Self {
        let fg = Color::Rgb(229, 233, 240);
        let panel = Color::Rgb(67, 76, 94);
        Self {
            today: Style::new().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            selected: Style::new().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            header: Style::new().fg(fg).add_modifier(Modifier::BOLD),
            section: Style::new()
                .fg(Color::Rgb(129, 161, 193))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            dim: Style::new().fg(Color::Rgb(76, 86, 106)),
            border: Style::new().fg(panel),
            status: Style::new().fg(fg).bg(panel),
            event: Style::new().fg(Color::Rgb(163, 190, 140)),
        }
    }

    /// Preset first, then any individual colour overrides.
    pub fn from_section(section: &ThemeSection) -> Self {
        let mut theme = section
            .preset
            .as_deref()
            .map(Self::preset)
            .unwrap_or_default();

        if let Some(c) = override_color("today_bg", &section.today_bg) {
            theme.today = theme.today.bg(c);
        }
        if let Some(c) = override_color("selected_bg", &section.selected_bg) {
            theme.selected = theme.selected.bg(c);
        }
        if let Some(c) = override_color("header_fg", &section.header_fg) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = override_color("dim_fg", &section.dim_fg) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = override_color("border_fg", &section.border_fg) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = override_color("status_bg", &section.status_bg) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = override_color("event_fg", &section.event_fg) {
            theme.event = theme.event.fg(c);
        }
        theme
    }
}

/// A configured colour that does not parse is logged and left to the preset.
fn override_color(field: &str, raw: &Option<String>) -> Option<Color> {
    let raw = raw.as_deref()?;
    let color = parse_color(raw);
    if color.is_none() {
        warn!(field, value = raw, "ignoring unparseable theme colour");
    }
    color
}

/// `#rrggbb` or a basic colour name.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        _ => None,
    }
}

pub mod agenda_view;
pub mod help;
pub mod status_bar;
pub mod week_view;

pub use agenda_view::AgendaView;
pub use help::render_help;
pub use status_bar::StatusBar;
pub use week_view::WeekView;

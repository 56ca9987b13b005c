mod app;
mod cli;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod tui;

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use app::{App, ViewMode};
use chrono::{Local, NaiveDate};
use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::{Result, WrapErr};
use config::Config;
use crossterm::event::{KeyCode, KeyModifiers};
use crm_schedule::calendar::{self, Store, StoreError};
use ratatui::layout::{Constraint, Layout};
use ratatui::widgets::Paragraph;
use tracing::{info, warn};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    let command = cli.command();

    let level = logging::default_level(cli.verbose, cfg.log_level.as_deref());
    let log_dir = config::app_data_dir();
    let _log_guard = match (command, log_dir.as_deref()) {
        (Command::Tui, Some(dir)) => logging::init(&level, logging::Sink::File(dir))?,
        _ => logging::init(&level, logging::Sink::Stderr)?,
    };
    theme::init(&cfg.theme);

    let today = Local::now().date_naive();
    let reference = cli.date.unwrap_or(today);
    let items_path = cfg.resolve_items_file(cli.items.as_deref());
    info!(?command, items = ?items_path, %reference, "starting crm-schedule");

    match command {
        Command::Agenda => {
            let store = open_store(items_path.as_deref())?;
            print_agenda(&store)
        }
        Command::Week => {
            let store = open_store(items_path.as_deref())?;
            print_week(&store, reference)
        }
        Command::Tui => {
            let (store, message) = open_store_lenient(items_path.as_deref())?;
            let mut app = App::new(store, ViewMode::from(cfg.start_view), today, reference);
            app.status_message = message;

            let mut terminal = tui::init()?;
            let result = run(&mut terminal, &mut app);
            tui::restore()?;
            result
        }
    }
}

fn open_store(path: Option<&Path>) -> Result<Store> {
    match path {
        Some(path) => Store::open(path).wrap_err("failed to load schedule items"),
        None => Ok(Store::default()),
    }
}

/// Like [`open_store`], but a missing file starts the UI empty instead of failing.
fn open_store_lenient(path: Option<&Path>) -> Result<(Store, Option<String>)> {
    let Some(path) = path else {
        return Ok((Store::default(), None));
    };
    match Store::open(path) {
        Ok(store) => Ok((store, None)),
        Err(StoreError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "items file not found, starting empty");
            Ok((
                Store::default(),
                Some(format!("No items file at {}", path.display())),
            ))
        }
        Err(err) => Err(err).wrap_err("failed to load schedule items"),
    }
}

fn print_agenda(store: &Store) -> Result<()> {
    let sections = calendar::project(store.items())?;
    let mut out = io::stdout().lock();
    for section in &sections {
        writeln!(out, "{} {}", section.title, section.key.get(..4).unwrap_or_default())?;
        for entry in &section.items {
            let date_col = if entry.is_first_of_date {
                format!("{} {}", entry.day_abbreviation, entry.day_number)
            } else {
                String::new()
            };
            writeln!(
                out,
                "  {:<7} {} {:>8}  {}",
                date_col,
                entry.item.kind.marker(),
                entry.item.time,
                entry.item.title
            )?;
        }
    }
    Ok(())
}

fn print_week(store: &Store, reference: NaiveDate) -> Result<()> {
    let grid = calendar::build_week(reference, store.index())?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", grid.label)?;
    for cell in &grid.cells {
        let marker = if cell.has_events { "*" } else { " " };
        writeln!(out, "  {} {:>2}{}  {}", cell.day_name, cell.day, marker, cell.date_key)?;
    }
    Ok(())
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
            let content_area = layout[0];

            match app.view_mode {
                ViewMode::Agenda => {
                    let today = app.today;
                    let scroll = app.agenda_scroll;
                    match app.sections() {
                        Ok(sections) => components::AgendaView::render(
                            frame,
                            content_area,
                            sections,
                            today,
                            scroll,
                        ),
                        Err(err) => render_error(frame, content_area, &err.to_string()),
                    }
                }
                ViewMode::Week => match app.week_snapshot() {
                    Ok(snapshot) => components::WeekView::render(frame, content_area, &snapshot),
                    Err(err) => render_error(frame, content_area, &err.to_string()),
                },
            }

            if app.show_help {
                components::render_help(frame, area);
            }

            components::StatusBar::render(
                frame,
                layout[1],
                app.view_mode,
                app.status_message.as_deref(),
            );
        })?;

        if let Some(key) = event::next_key_press(Duration::from_millis(250))? {
            app.status_message = None;

            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                    app.show_help = false;
                }
                continue;
            }

            handle_key(app, key.code, key.modifiers);
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
        }
        (KeyCode::Char('1'), _) => app.view_mode = ViewMode::Agenda,
        (KeyCode::Char('2'), _) => app.view_mode = ViewMode::Week,
        (KeyCode::Char('t'), _) => app.go_to_today(),
        (KeyCode::Char('r'), _) => app.reload(),
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.prev_day(),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.next_day(),
        (KeyCode::Char('['), _) => app.prev_week(),
        (KeyCode::Char(']'), _) => app.next_week(),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.scroll_up(),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.scroll_down(),
        (KeyCode::Char('?'), _) => app.show_help = true,
        _ => {}
    }
}

fn render_error(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, message: &str) {
    let para = Paragraph::new(format!("Cannot build view:\n\n{message}"))
        .style(theme::current().dim);
    frame.render_widget(para, area);
}

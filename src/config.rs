use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

const APP_DIR: &str = "crm-schedule";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartView {
    #[default]
    Agenda,
    Week,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ThemeSection {
    pub preset: Option<String>,
    pub today_bg: Option<String>,
    pub selected_bg: Option<String>,
    pub header_fg: Option<String>,
    pub dim_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub event_fg: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub items_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub start_view: StartView,
    pub theme: ThemeSection,
}

impl Config {
    /// Loads `path`, or the default location when `None`. A missing file means
    /// defaults; a file that exists but cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).wrap_err_with(|| format!("failed to parse config {}", path.display()))
    }

    /// CLI flag first, then config, then `<config dir>/crm-schedule/items.toml`.
    pub fn resolve_items_file(&self, cli_override: Option<&Path>) -> Option<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.items_file.clone())
            .or_else(|| app_config_dir().map(|d| d.join("items.toml")))
    }
}

pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR))
}

fn default_config_path() -> Option<PathBuf> {
    app_config_dir().map(|d| d.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load(Some(dir.path().join("nope.toml").as_path())).expect("load");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.start_view, StartView::Agenda);
    }

    #[test]
    fn parses_overrides() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r##"
items_file = "/tmp/items.toml"
log_level = "debug"
start_view = "week"

[theme]
preset = "nord"
today_bg = "#ff0000"
"##
        )
        .expect("write");

        let cfg = Config::load(Some(file.path())).expect("load");
        assert_eq!(cfg.items_file, Some(PathBuf::from("/tmp/items.toml")));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.start_view, StartView::Week);
        assert_eq!(cfg.theme.preset.as_deref(), Some("nord"));
        assert_eq!(cfg.theme.today_bg.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "start_view = \"month\"").expect("write");
        let err = Config::load(Some(file.path())).expect_err("unknown view");
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn cli_items_path_wins() {
        let cfg = Config {
            items_file: Some(PathBuf::from("/from/config.toml")),
            ..Config::default()
        };
        assert_eq!(
            cfg.resolve_items_file(Some(Path::new("/from/cli.toml"))),
            Some(PathBuf::from("/from/cli.toml"))
        );
        assert_eq!(
            cfg.resolve_items_file(None),
            Some(PathBuf::from("/from/config.toml"))
        );
    }
}

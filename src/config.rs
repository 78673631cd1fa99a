use crate::calendar::{CalendarSystem, Gregorian};
use crate::cmds::Cmd;
use crate::configuration::{CalendarConfiguration, LayoutBehavior};
use crate::error::{Error, ErrorKind, Result};
use crate::tz::Tz;

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use termion::event::Key;

pub type KeyMap = HashMap<Key, Cmd>;

const CONFIG_PATH_ENV_VAR: &str = "MONTHGRID_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("monthgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".monthgrid.toml"));
    }

    locations
}

/// Loads `path` if given, else the first existing default location, else
/// the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        log::info!("Loading config from {}", path.display());
        return Config::from_file(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Loading config from {}", location.display());
            Config::from_file(&location)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarSection {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub timezone: Tz,
    #[serde(default)]
    pub first_weekday: Option<Weekday>,
    #[serde(default = "default_true")]
    pub fill_next_month_dates: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CalendarSection {
    fn default() -> Self {
        CalendarSection {
            start: None,
            end: None,
            timezone: Tz::default(),
            first_weekday: None,
            fill_next_month_dates: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    calendar: CalendarSection,
    #[serde(default)]
    layout: LayoutBehavior,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub key_map: KeyMap,
    pub calendar: CalendarSection,
    pub layout: LayoutBehavior,
}

impl Default for Config {
    fn default() -> Config {
        let mut config = Config {
            key_map: HashMap::new(),
            calendar: CalendarSection::default(),
            layout: LayoutBehavior::default(),
        };

        config.key_map.insert(Key::Char('l'), Cmd::NextMonth);
        config.key_map.insert(Key::Right, Cmd::NextMonth);
        config.key_map.insert(Key::Char('h'), Cmd::PrevMonth);
        config.key_map.insert(Key::Left, Cmd::PrevMonth);
        config.key_map.insert(Key::Char('j'), Cmd::NextDay);
        config.key_map.insert(Key::Char('k'), Cmd::PrevDay);
        config.key_map.insert(Key::Char('t'), Cmd::Today);
        config.key_map.insert(Key::Char('\n'), Cmd::Select);
        config.key_map.insert(Key::Char('q'), Cmd::Exit);

        config
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml(&content).map_err(|e| {
            let msg = format!(
                "{}: {}",
                path.display(),
                e.message.as_deref().unwrap_or_default()
            );
            e.with_msg(&msg)
        })
    }

    pub fn from_toml(content: &str) -> Result<Config> {
        let file: ConfigFile = toml::from_str(content)?;

        Ok(Config {
            calendar: file.calendar,
            layout: file.layout,
            ..Config::default()
        })
    }

    pub fn calendar_system(&self) -> Gregorian {
        let calendar = Gregorian::new(self.calendar.timezone);
        match self.calendar.first_weekday {
            Some(weekday) => calendar.with_first_weekday(weekday),
            None => calendar,
        }
    }

    /// Missing bounds default to `today` and one year after the start.
    pub fn calendar_configuration(&self, today: NaiveDate) -> Result<CalendarConfiguration> {
        let calendar = self.calendar_system();
        let start = self.calendar.start.unwrap_or(today);
        let end = match self.calendar.end {
            Some(end) => end,
            None => calendar.add_months(start, 12).ok_or_else(|| {
                Error::new(ErrorKind::DateOutOfRange, &format!("{} + 1 year", start))
            })?,
        };

        let configuration = CalendarConfiguration::new(start, end)
            .calendar(calendar)
            .fill_next_month_dates(self.calendar.fill_next_month_dates)
            .layout_behavior(self.layout);
        configuration.validate()?;

        Ok(configuration)
    }
}

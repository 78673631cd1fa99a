pub mod calendar;
pub mod cmds;
pub mod config;
pub mod configuration;
pub mod error;
pub mod generate;
pub mod month;
pub mod navigation;
pub mod tz;
pub mod ui;
pub mod view;

pub use calendar::{CalendarSystem, Gregorian};
pub use configuration::{CalendarConfiguration, LayoutBehavior};
pub use error::{Error, ErrorKind, Result};
pub use generate::{generate, generate_with_today};
pub use month::{CalendarDay, CalendarMonth, IndexPath, MonthMetadata};
pub use view::{CalendarDataSource, CalendarDelegate, CalendarView, ScrollRequest};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

use crate::calendar::{CalendarSystem, Gregorian};
use crate::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Continuous,
    /// Page month by month.
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPosition {
    CenteredHorizontally,
    CenteredVertically,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutBehavior {
    #[serde(default = "default_scroll_direction")]
    pub scroll_direction: ScrollDirection,
    #[serde(default = "default_scroll_behavior")]
    pub scroll_behavior: ScrollBehavior,
}

fn default_scroll_direction() -> ScrollDirection {
    ScrollDirection::Horizontal
}

fn default_scroll_behavior() -> ScrollBehavior {
    ScrollBehavior::Month
}

impl Default for LayoutBehavior {
    fn default() -> Self {
        LayoutBehavior {
            scroll_direction: default_scroll_direction(),
            scroll_behavior: default_scroll_behavior(),
        }
    }
}

impl LayoutBehavior {
    pub fn scroll_position(&self) -> ScrollPosition {
        match self.scroll_direction {
            ScrollDirection::Horizontal => ScrollPosition::CenteredHorizontally,
            ScrollDirection::Vertical => ScrollPosition::CenteredVertically,
        }
    }

    pub fn is_paging_enabled(&self) -> bool {
        self.scroll_behavior == ScrollBehavior::Month
    }
}

/// Everything month generation depends on.
///
/// Start and end are calendar days (already normalized to start-of-day).
/// A configuration is never mutated once handed to a view; build a new one
/// to reconfigure.
#[derive(Debug, Clone)]
pub struct CalendarConfiguration {
    start_date: NaiveDate,
    end_date: NaiveDate,
    calendar: Arc<dyn CalendarSystem>,
    first_weekday: Option<u32>,
    fill_next_month_dates: bool,
    layout_behavior: LayoutBehavior,
}

impl CalendarConfiguration {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        CalendarConfiguration {
            start_date,
            end_date,
            calendar: Arc::new(Gregorian::default()),
            first_weekday: None,
            fill_next_month_dates: true,
            layout_behavior: LayoutBehavior::default(),
        }
    }

    /// Range normalized from instants to calendar days of `calendar`.
    pub fn from_instants<C: CalendarSystem + 'static>(
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        calendar: C,
    ) -> Self {
        Self::new(calendar.day_of(start), calendar.day_of(end)).calendar(calendar)
    }

    /// One year starting at `today`.
    pub fn default_for(today: NaiveDate) -> Self {
        let calendar = Gregorian::default();
        let end = calendar.add_months(today, 12).unwrap_or(today);

        Self::new(today, end)
    }

    pub fn calendar<C: CalendarSystem + 'static>(mut self, calendar: C) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    pub fn shared_calendar(mut self, calendar: Arc<dyn CalendarSystem>) -> Self {
        self.calendar = calendar;
        self
    }

    /// Overrides the calendar's own first weekday (1 = Sunday .. 7 = Saturday).
    pub fn first_weekday(mut self, first_weekday: u32) -> Self {
        self.first_weekday = Some(first_weekday);
        self
    }

    pub fn fill_next_month_dates(mut self, fill: bool) -> Self {
        self.fill_next_month_dates = fill;
        self
    }

    pub fn layout_behavior(mut self, layout_behavior: LayoutBehavior) -> Self {
        self.layout_behavior = layout_behavior;
        self
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn calendar_system(&self) -> &dyn CalendarSystem {
        self.calendar.as_ref()
    }

    pub fn weekday_start(&self) -> u32 {
        self.first_weekday
            .unwrap_or_else(|| self.calendar.default_first_weekday())
    }

    pub fn fills_next_month_dates(&self) -> bool {
        self.fill_next_month_dates
    }

    pub fn layout(&self) -> &LayoutBehavior {
        &self.layout_behavior
    }

    pub fn validate(&self) -> Result<()> {
        let first_weekday = self.weekday_start();
        if !(1..=7).contains(&first_weekday) {
            return Err(Error::new(
                ErrorKind::InvalidFirstWeekday,
                &format!("got {}", first_weekday),
            ));
        }

        if self.end_date < self.start_date {
            return Err(Error::new(
                ErrorKind::EndBeforeStart,
                &format!("{} < {}", self.end_date, self.start_date),
            ));
        }

        Ok(())
    }
}

impl Default for CalendarConfiguration {
    fn default() -> Self {
        Self::default_for(Gregorian::default().today())
    }
}

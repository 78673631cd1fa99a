use chrono::{Month, NaiveDate};
use std::fmt;

const DAYS_PER_WEEK: usize = 7;

/// A `(month index, day index)` location inside a generated month list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub month: usize,
    pub day: usize,
}

impl IndexPath {
    pub fn new(month: usize, day: usize) -> Self {
        IndexPath { month, day }
    }

    pub fn month(month: usize) -> Self {
        IndexPath { month, day: 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub(crate) date: NaiveDate,
    pub(crate) display_number: String,
    pub(crate) is_today: bool,
    pub(crate) is_within_displayed_month: bool,
}

impl CalendarDay {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn display_number(&self) -> &str {
        &self.display_number
    }

    pub fn is_today(&self) -> bool {
        self.is_today
    }

    /// `false` for fill days borrowed from the previous or next month.
    pub fn is_within_displayed_month(&self) -> bool {
        self.is_within_displayed_month
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthMetadata {
    pub(crate) number_of_days: u32,
    pub(crate) first_day: NaiveDate,
    pub(crate) last_day: NaiveDate,
    pub(crate) first_day_weekday: u32,
}

impl MonthMetadata {
    /// Days of the month itself, fill days excluded.
    pub fn number_of_days(&self) -> u32 {
        self.number_of_days
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Last day of the month, inclusive.
    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    /// Position of the first day in the opening week row, 1..=7.
    ///
    /// The number of leading fill days is one less than this value.
    pub fn first_day_weekday(&self) -> u32 {
        self.first_day_weekday
    }

    pub fn number_of_weeks(&self) -> u32 {
        (self.first_day_weekday - 1 + self.number_of_days + 6) / DAYS_PER_WEEK as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub(crate) name: Month,
    pub(crate) month_number: u32,
    pub(crate) index: usize,
    pub(crate) year: i32,
    pub(crate) days: Vec<CalendarDay>,
    pub(crate) metadata: MonthMetadata,
    pub(crate) is_first_displayable_month: bool,
    pub(crate) is_last_displayable_month: bool,
}

impl CalendarMonth {
    pub fn name(&self) -> Month {
        self.name
    }

    /// Calendar month number, 1..=12.
    pub fn month_number(&self) -> u32 {
        self.month_number
    }

    /// Position inside the generated sequence. Not the month number.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// All grid days including leading and trailing fill.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn day(&self, n: usize) -> Option<&CalendarDay> {
        self.days.get(n)
    }

    pub fn metadata(&self) -> &MonthMetadata {
        &self.metadata
    }

    pub fn is_first_displayable_month(&self) -> bool {
        self.is_first_displayable_month
    }

    pub fn is_last_displayable_month(&self) -> bool {
        self.is_last_displayable_month
    }

    pub fn leading_fill(&self) -> usize {
        (self.metadata.first_day_weekday - 1) as usize
    }

    pub fn trailing_fill(&self) -> usize {
        self.days.len() - self.leading_fill() - self.metadata.number_of_days as usize
    }

    pub fn days_within_month(&self) -> impl Iterator<Item = &CalendarDay> {
        self.days.iter().filter(|day| day.is_within_displayed_month)
    }

    /// Grid rows of seven days. The last row is short when trailing fill is off.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarDay> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name.name(), self.year)
    }
}

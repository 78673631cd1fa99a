use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc, Weekday};
use std::fmt::Debug;

use crate::tz::Tz;

const WEEKDAY_SYMBOLS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Rule set for month lengths, leap years and weekday numbering.
///
/// Weekdays are numbered 1 (Sunday) through 7 (Saturday). Every operation
/// that can leave the representable date range returns `None`.
pub trait CalendarSystem: Debug + Send + Sync {
    fn timezone(&self) -> &Tz;

    /// First day of the week the calendar's locale uses, 1..=7.
    fn default_first_weekday(&self) -> u32;

    fn weekday(&self, date: NaiveDate) -> u32;

    /// Difference in months between the months `start` and `end` fall into.
    fn months_between(&self, start: NaiveDate, end: NaiveDate) -> i32;

    /// Adds `n` months, clamping the day to the end of the target month.
    fn add_months(&self, date: NaiveDate, n: i32) -> Option<NaiveDate>;

    fn add_days(&self, date: NaiveDate, n: i64) -> Option<NaiveDate>;

    fn days_in_month(&self, date: NaiveDate) -> Option<u32>;

    /// First and last day (inclusive) of the month containing `date`.
    fn month_interval(&self, date: NaiveDate) -> Option<(NaiveDate, NaiveDate)>;

    fn day_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        self.timezone().date_of(instant)
    }

    fn today(&self) -> NaiveDate {
        self.day_of(&Utc::now())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gregorian {
    tz: Tz,
    first_weekday: u32,
}

impl Gregorian {
    pub fn new(tz: Tz) -> Self {
        Gregorian {
            tz,
            first_weekday: 1,
        }
    }

    pub fn with_first_weekday(mut self, weekday: Weekday) -> Self {
        self.first_weekday = weekday.number_from_sunday();
        self
    }
}

impl Default for Gregorian {
    fn default() -> Self {
        Gregorian::new(Tz::Local)
    }
}

impl CalendarSystem for Gregorian {
    fn timezone(&self) -> &Tz {
        &self.tz
    }

    fn default_first_weekday(&self) -> u32 {
        self.first_weekday
    }

    fn weekday(&self, date: NaiveDate) -> u32 {
        date.weekday().number_from_sunday()
    }

    fn months_between(&self, start: NaiveDate, end: NaiveDate) -> i32 {
        (end.year() * 12 + end.month0() as i32) - (start.year() * 12 + start.month0() as i32)
    }

    fn add_months(&self, date: NaiveDate, n: i32) -> Option<NaiveDate> {
        if n >= 0 {
            date.checked_add_months(Months::new(n as u32))
        } else {
            date.checked_sub_months(Months::new(n.unsigned_abs()))
        }
    }

    fn add_days(&self, date: NaiveDate, n: i64) -> Option<NaiveDate> {
        date.checked_add_signed(Duration::days(n))
    }

    fn days_in_month(&self, date: NaiveDate) -> Option<u32> {
        let first = date.with_day(1)?;
        let next = first.checked_add_months(Months::new(1))?;

        Some(next.signed_duration_since(first).num_days() as u32)
    }

    fn month_interval(&self, date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let first = date.with_day(1)?;
        let last = first
            .checked_add_months(Months::new(1))?
            .checked_sub_signed(Duration::days(1))?;

        Some((first, last))
    }
}

/// Two-letter weekday labels starting at `first_weekday` (1 = Sunday).
pub fn weekday_symbols(first_weekday: u32) -> [&'static str; 7] {
    let start = (first_weekday.clamp(1, 7) - 1) as usize;
    let mut symbols = WEEKDAY_SYMBOLS;
    symbols.rotate_left(start);
    symbols
}

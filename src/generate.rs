//! Month and day generation.
//!
//! Turns a [`CalendarConfiguration`] into the ordered, gap-free list of
//! [`CalendarMonth`]s a grid displays. Each month's day list opens with fill
//! days from the previous month so that day 1 lands in its weekday column and,
//! if enabled, closes with fill days from the next month to complete the last
//! week row.

use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;

use crate::calendar::CalendarSystem;
use crate::configuration::CalendarConfiguration;
use crate::error::{Error, ErrorKind, Result};
use crate::month::{CalendarDay, CalendarMonth, MonthMetadata};

/// Generates all months of `config`, flagging today's date from the wall clock.
pub fn generate(config: &CalendarConfiguration) -> Result<Vec<CalendarMonth>> {
    generate_with_today(config, config.calendar_system().today())
}

/// Generates all months of `config` with an explicit notion of today.
///
/// Fails without returning anything if the configuration is invalid or the
/// calendar system cannot describe one of the months.
pub fn generate_with_today(
    config: &CalendarConfiguration,
    today: NaiveDate,
) -> Result<Vec<CalendarMonth>> {
    config.validate()?;

    let calendar = config.calendar_system();
    let first_weekday = config.weekday_start();
    let number_of_months =
        calendar.months_between(config.start_date(), config.end_date()) + 1;

    let mut months = Vec::with_capacity(number_of_months as usize);

    for index in 0..number_of_months {
        let base_date = calendar
            .add_months(config.start_date(), index)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::DateOutOfRange,
                    &format!("{} + {} months", config.start_date(), index),
                )
            })?;

        let metadata = metadata_for(calendar, first_weekday, base_date)?;
        let name = Month::from_u32(base_date.month()).ok_or_else(|| {
            Error::new(
                ErrorKind::MetadataGeneration,
                &format!("no month name for {}", base_date),
            )
        })?;

        let mut days = days_in_month(calendar, &metadata, today)?;
        if config.fills_next_month_dates() {
            days.extend(start_of_next_month(
                calendar,
                metadata.last_day,
                first_weekday,
                today,
            )?);
        }

        log::trace!(
            "{} {}: {} days, first day weekday {}, {} grid cells",
            name.name(),
            base_date.year(),
            metadata.number_of_days,
            metadata.first_day_weekday,
            days.len()
        );

        months.push(CalendarMonth {
            name,
            month_number: base_date.month(),
            index: index as usize,
            year: base_date.year(),
            days,
            metadata,
            is_first_displayable_month: index == 0,
            is_last_displayable_month: index == number_of_months - 1,
        });
    }

    log::debug!(
        "Generated {} months from {} to {} (first weekday {}, fill {})",
        months.len(),
        config.start_date(),
        config.end_date(),
        first_weekday,
        config.fills_next_month_dates()
    );

    Ok(months)
}

/// Metadata of the month containing `base_date`.
pub fn month_metadata(
    config: &CalendarConfiguration,
    base_date: NaiveDate,
) -> Result<MonthMetadata> {
    config.validate()?;
    metadata_for(config.calendar_system(), config.weekday_start(), base_date)
}

fn metadata_for(
    calendar: &dyn CalendarSystem,
    first_weekday: u32,
    base_date: NaiveDate,
) -> Result<MonthMetadata> {
    let (number_of_days, (first_day, last_day)) = match (
        calendar.days_in_month(base_date),
        calendar.month_interval(base_date),
    ) {
        (Some(number_of_days), Some(interval)) => (number_of_days, interval),
        _ => {
            return Err(Error::new(
                ErrorKind::MetadataGeneration,
                &format!("for {}", base_date),
            ))
        }
    };

    let mut first_day_weekday = calendar.weekday(first_day) as i64 + 1 - first_weekday as i64;
    if first_day_weekday <= 0 {
        first_day_weekday = 7 - first_day_weekday.abs();
    }

    Ok(MonthMetadata {
        number_of_days,
        first_day,
        last_day,
        first_day_weekday: first_day_weekday as u32,
    })
}

/// Leading fill plus the days of the month, in one pass of offsets from the
/// first day.
fn days_in_month(
    calendar: &dyn CalendarSystem,
    metadata: &MonthMetadata,
    today: NaiveDate,
) -> Result<Vec<CalendarDay>> {
    let offset_in_initial_row = metadata.first_day_weekday as i64;

    (1..(metadata.number_of_days as i64 + offset_in_initial_row))
        .map(|day| {
            let is_within_displayed_month = day >= offset_in_initial_row;
            generate_day(
                calendar,
                metadata.first_day,
                day - offset_in_initial_row,
                is_within_displayed_month,
                today,
            )
        })
        .collect()
}

fn start_of_next_month(
    calendar: &dyn CalendarSystem,
    last_day: NaiveDate,
    first_weekday: u32,
    today: NaiveDate,
) -> Result<Vec<CalendarDay>> {
    let mut additional_days = 7 - calendar.weekday(last_day) as i64 - 1 + first_weekday as i64;
    if additional_days >= 7 {
        additional_days = (7 - additional_days).abs();
    }

    if additional_days <= 0 {
        return Ok(Vec::new());
    }

    (1..=additional_days)
        .map(|offset| generate_day(calendar, last_day, offset, false, today))
        .collect()
}

fn generate_day(
    calendar: &dyn CalendarSystem,
    base_date: NaiveDate,
    offset: i64,
    is_within_displayed_month: bool,
    today: NaiveDate,
) -> Result<CalendarDay> {
    let date = calendar.add_days(base_date, offset).ok_or_else(|| {
        Error::new(
            ErrorKind::DateOutOfRange,
            &format!("{} + {} days", base_date, offset),
        )
    })?;

    Ok(CalendarDay {
        date,
        display_number: date.day().to_string(),
        is_today: is_within_displayed_month && date == today,
        is_within_displayed_month,
    })
}

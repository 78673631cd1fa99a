use chrono::{Month, NaiveDate};
use itertools::Itertools;

use crate::month::{CalendarMonth, IndexPath};

/// 1-based occurrence of a month name inside a generated range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence(usize);

impl Occurrence {
    /// Signed offsets are taken by magnitude.
    pub fn from_offset(offset: i64) -> Self {
        Occurrence(offset.unsigned_abs() as usize)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Next,
    Previous,
    Date(NaiveDate),
    Month { month: Month, occurrence: Occurrence },
    Year(i32),
}

/// Resolves `target` against `months`.
///
/// `displayed` is the positional index currently shown; only `Next` and
/// `Previous` depend on it. Month-level targets resolve to day index 0.
/// `None` means the request does not apply and must be ignored.
pub fn resolve(
    months: &[CalendarMonth],
    displayed: Option<usize>,
    target: &Target,
) -> Option<IndexPath> {
    let location = match *target {
        Target::Next => {
            let month = months.get(displayed?)?;
            if month.is_last_displayable_month() {
                None
            } else {
                Some(IndexPath::month(month.index() + 1))
            }
        }
        Target::Previous => {
            let month = months.get(displayed?)?;
            if month.is_first_displayable_month() {
                None
            } else {
                Some(IndexPath::month(month.index() - 1))
            }
        }
        Target::Date(date) => months.iter().enumerate().find_map(|(month_index, month)| {
            month
                .days()
                .iter()
                .position(|day| day.date() == date && day.is_within_displayed_month())
                .map(|day_index| IndexPath::new(month_index, day_index))
        }),
        Target::Month { month, occurrence } => match occurrence.get() {
            0 => None,
            n => months
                .iter()
                .positions(|m| m.name() == month)
                .nth(n - 1)
                .map(IndexPath::month),
        },
        Target::Year(year) => months
            .iter()
            .position(|m| m.year() == year)
            .map(IndexPath::month),
    };

    if location.is_none() {
        log::trace!("No navigation target for {:?}", target);
    }

    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Gregorian;
    use crate::configuration::CalendarConfiguration;
    use crate::generate::generate_with_today;
    use crate::tz::Tz;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn months(start: NaiveDate, end: NaiveDate) -> Vec<CalendarMonth> {
        let cfg = CalendarConfiguration::new(start, end)
            .calendar(Gregorian::new(Tz::utc()))
            .first_weekday(1);
        generate_with_today(&cfg, date(2000, 1, 1)).unwrap()
    }

    fn month_target(month: Month, offset: i64) -> Target {
        Target::Month {
            month,
            occurrence: Occurrence::from_offset(offset),
        }
    }

    #[test]
    fn next_and_previous_stop_at_bounds() {
        let months = months(date(2024, 1, 1), date(2024, 3, 1));

        assert_eq!(resolve(&months, Some(0), &Target::Next), Some(IndexPath::month(1)));
        assert_eq!(resolve(&months, Some(2), &Target::Next), None);
        assert_eq!(resolve(&months, Some(2), &Target::Previous), Some(IndexPath::month(1)));
        assert_eq!(resolve(&months, Some(0), &Target::Previous), None);
        assert_eq!(resolve(&months, None, &Target::Next), None);
        assert_eq!(resolve(&months, Some(7), &Target::Next), None);
    }

    #[test]
    fn single_month_has_nowhere_to_go() {
        let months = months(date(2024, 2, 15), date(2024, 2, 15));

        assert_eq!(resolve(&months, Some(0), &Target::Next), None);
        assert_eq!(resolve(&months, Some(0), &Target::Previous), None);
    }

    #[test]
    fn second_january_occurrence() {
        let months = months(date(2023, 1, 1), date(2025, 1, 1));
        assert_eq!(months.len(), 25);

        let location = resolve(&months, Some(0), &month_target(Month::January, 2)).unwrap();
        assert_eq!(location, IndexPath::month(12));
        assert_eq!(months[location.month].year(), 2024);

        let location = resolve(&months, Some(0), &month_target(Month::January, -3)).unwrap();
        assert_eq!(months[location.month].year(), 2025);
    }

    #[test]
    fn month_occurrence_out_of_range() {
        let months = months(date(2023, 1, 1), date(2025, 1, 1));

        assert_eq!(resolve(&months, Some(0), &month_target(Month::January, 4)), None);
        assert_eq!(resolve(&months, Some(0), &month_target(Month::March, 3)), None);
        assert_eq!(resolve(&months, Some(0), &month_target(Month::March, 0)), None);
    }

    #[test]
    fn date_resolves_to_home_month() {
        // 2024-02-01 is trailing fill of January and a real day of February
        let months = months(date(2024, 1, 1), date(2024, 2, 29));
        assert!(months[0]
            .days()
            .iter()
            .any(|d| d.date() == date(2024, 2, 1)));

        let location = resolve(&months, Some(0), &Target::Date(date(2024, 2, 1))).unwrap();
        assert_eq!(location.month, 1);
        // Four leading fill days precede Feb 1
        assert_eq!(location.day, 4);
        assert_eq!(months[1].days()[location.day].date(), date(2024, 2, 1));
    }

    #[test]
    fn date_outside_range_is_a_miss() {
        let months = months(date(2024, 1, 1), date(2024, 2, 29));

        // Present only as leading fill of January
        assert_eq!(resolve(&months, Some(0), &Target::Date(date(2023, 12, 31))), None);
        assert_eq!(resolve(&months, Some(0), &Target::Date(date(2030, 1, 1))), None);
    }

    #[test]
    fn first_month_of_year() {
        let months = months(date(2023, 10, 1), date(2025, 3, 1));

        assert_eq!(resolve(&months, None, &Target::Year(2023)), Some(IndexPath::month(0)));
        assert_eq!(resolve(&months, None, &Target::Year(2024)), Some(IndexPath::month(3)));
        assert_eq!(resolve(&months, None, &Target::Year(2025)), Some(IndexPath::month(15)));
        assert_eq!(resolve(&months, None, &Target::Year(2022)), None);
    }

    #[test]
    fn offsets_are_sanitized_to_magnitude() {
        assert_eq!(Occurrence::from_offset(-2).get(), 2);
        assert_eq!(Occurrence::from_offset(3).get(), 3);
        assert_eq!(Occurrence::from_offset(0).get(), 0);
    }
}

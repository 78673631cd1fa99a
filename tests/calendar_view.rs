use chrono::{Month, NaiveDate, TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;

use monthgrid::configuration::{ScrollBehavior, ScrollDirection, ScrollPosition};
use monthgrid::tz::Tz;
use monthgrid::{
    CalendarConfiguration, CalendarDataSource, CalendarDay, CalendarDelegate, CalendarMonth,
    CalendarView, Gregorian, IndexPath, LayoutBehavior,
};

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Selected(NaiveDate, IndexPath),
    MonthChanged(Month, i32),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    fn take(&self) -> Vec<Event> {
        self.0.borrow_mut().drain(..).collect()
    }
}

impl CalendarDelegate for Recorder {
    fn did_select_day(&mut self, day: &CalendarDay, index_path: IndexPath) {
        self.0
            .borrow_mut()
            .push(Event::Selected(day.date(), index_path));
    }

    fn did_month_change(&mut self, month: &CalendarMonth) {
        self.0
            .borrow_mut()
            .push(Event::MonthChanged(month.name(), month.year()));
    }
}

struct Source(Rc<RefCell<CalendarConfiguration>>);

impl CalendarDataSource for Source {
    type Cell = NaiveDate;
    type Header = String;

    fn configuration(&self) -> CalendarConfiguration {
        self.0.borrow().clone()
    }

    fn cell(&self, _index_path: IndexPath, day: &CalendarDay) -> NaiveDate {
        day.date()
    }

    fn header(&self, kind: &str, _index_path: IndexPath, month: &CalendarMonth) -> Option<String> {
        Some(format!("{}:{}", kind, month))
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn configuration(start: NaiveDate, end: NaiveDate) -> CalendarConfiguration {
    CalendarConfiguration::new(start, end)
        .calendar(Gregorian::new(Tz::utc()))
        .first_weekday(1)
}

fn view(start: NaiveDate, end: NaiveDate) -> (CalendarView<Source>, Recorder) {
    let source = Source(Rc::new(RefCell::new(configuration(start, end))));
    let mut view = CalendarView::with_data_source(source).unwrap();
    let recorder = Recorder::default();
    view.set_delegate(recorder.clone());
    (view, recorder)
}

#[test]
fn queries_over_generated_months() {
    let (view, _) = view(date(2024, 2, 15), date(2024, 2, 15));

    assert_eq!(view.number_of_months(), 1);
    assert_eq!(view.number_of_weeks(0), 5);
    assert_eq!(view.number_of_weeks(1), 0);
    assert_eq!(view.number_of_items(0), 35);

    let feb = view.month(0).unwrap();
    assert!(feb.is_first_displayable_month() && feb.is_last_displayable_month());
    assert_eq!(view.day(IndexPath::new(0, 4)).unwrap().date(), date(2024, 2, 1));
    assert!(view.day(IndexPath::new(0, 35)).is_none());
    assert!(view.month(1).is_none());

    assert_eq!(view.render_cell(IndexPath::new(0, 0)), Some(date(2024, 1, 28)));
    assert_eq!(
        view.render_header("header", 0),
        Some("header:February 2024".to_owned())
    );
}

#[test]
fn attach_reports_first_month() {
    let (mut view, recorder) = view(date(2024, 1, 1), date(2024, 12, 31));

    view.attach();
    assert_eq!(recorder.take(), vec![Event::MonthChanged(Month::January, 2024)]);
}

#[test]
fn next_and_previous_notify_and_request_scroll() {
    let (mut view, recorder) = view(date(2024, 1, 1), date(2024, 2, 1));

    let request = view.move_to_next_month(true).unwrap();
    assert_eq!(request.index_path, IndexPath::month(1));
    assert_eq!(request.position, ScrollPosition::CenteredHorizontally);
    assert!(request.animated);
    assert_eq!(view.displayed_month().unwrap().index(), 1);

    // Already at the last month
    assert!(view.move_to_next_month(true).is_none());
    assert_eq!(view.displayed_month().unwrap().index(), 1);

    let request = view.move_to_previous_month(false).unwrap();
    assert!(!request.animated);
    assert!(view.move_to_previous_month(false).is_none());

    assert_eq!(
        recorder.take(),
        vec![
            Event::MonthChanged(Month::February, 2024),
            Event::MonthChanged(Month::January, 2024),
        ]
    );
}

#[test]
fn second_january_of_a_25_month_range() {
    let (mut view, recorder) = view(date(2023, 1, 1), date(2025, 1, 1));
    assert_eq!(view.number_of_months(), 25);

    let request = view.move_to_month(Month::January, 2, true).unwrap();
    assert_eq!(request.index_path, IndexPath::month(12));
    assert_eq!(recorder.take(), vec![Event::MonthChanged(Month::January, 2024)]);

    // Negative offsets count like positive ones
    let request = view.move_to_month(Month::January, -1, true).unwrap();
    assert_eq!(request.index_path, IndexPath::month(0));

    assert!(view.move_to_month(Month::January, 4, true).is_none());
    assert!(view.move_to_month(Month::January, 0, true).is_none());
    assert_eq!(view.displayed_month().unwrap().index(), 0);
}

#[test]
fn date_navigation_lands_in_home_month() {
    let (mut view, recorder) = view(date(2024, 1, 1), date(2024, 3, 31));

    // Feb 1 is also trailing fill of January
    let request = view.move_to_date(date(2024, 2, 1), true).unwrap();
    assert_eq!(request.index_path, IndexPath::new(1, 4));
    assert_eq!(recorder.take(), vec![Event::MonthChanged(Month::February, 2024)]);

    assert!(view.move_to_date(date(2024, 4, 1), true).is_none());
    assert!(recorder.take().is_empty());
}

#[test]
fn instant_navigation_uses_calendar_timezone() {
    let source = Source(Rc::new(RefCell::new(
        CalendarConfiguration::new(date(2024, 1, 1), date(2024, 3, 31))
            .calendar(Gregorian::new(Tz::Iana(chrono_tz::Asia::Tokyo))),
    )));
    let mut view = CalendarView::with_data_source(source).unwrap();

    // Still January in UTC, already February 1 in Tokyo
    let instant = Utc.with_ymd_and_hms(2024, 1, 31, 20, 0, 0).unwrap();
    let request = view.move_to_instant(&instant, false).unwrap();
    assert_eq!(request.index_path.month, 1);
    assert_eq!(view.day(request.index_path).unwrap().date(), date(2024, 2, 1));
}

#[test]
fn year_navigation_and_vertical_layout() {
    let source = Source(Rc::new(RefCell::new(
        configuration(date(2023, 11, 1), date(2025, 2, 1)).layout_behavior(LayoutBehavior {
            scroll_direction: ScrollDirection::Vertical,
            scroll_behavior: ScrollBehavior::Continuous,
        }),
    )));
    let mut view = CalendarView::with_data_source(source).unwrap();

    let request = view.move_to_year(2025, true).unwrap();
    assert_eq!(request.index_path, IndexPath::month(14));
    assert_eq!(request.position, ScrollPosition::CenteredVertically);
    assert!(view.move_to_year(2026, true).is_none());
}

#[test]
fn selection_and_scrolling_report_events() {
    let (mut view, recorder) = view(date(2024, 1, 1), date(2024, 3, 31));

    assert!(view.select_day(IndexPath::new(2, 7)));
    assert!(!view.select_day(IndexPath::new(3, 0)));
    assert!(!view.select_day(IndexPath::new(0, 99)));

    view.scrolled_to(2);
    view.scrolled_to(9);
    assert_eq!(view.displayed_month().unwrap().index(), 2);

    // March 2024 starts on a Friday: five leading fill days
    assert_eq!(
        recorder.take(),
        vec![
            Event::Selected(date(2024, 3, 3), IndexPath::new(2, 7)),
            Event::MonthChanged(Month::March, 2024),
        ]
    );
}

#[test]
fn reconfiguration_swaps_months_wholesale() {
    let shared = Rc::new(RefCell::new(configuration(date(2024, 1, 1), date(2024, 3, 31))));
    let mut view = CalendarView::with_data_source(Source(Rc::clone(&shared))).unwrap();
    view.scrolled_to(2);

    let before = view.months();
    assert_eq!(before.len(), 3);

    *shared.borrow_mut() = configuration(date(2025, 1, 1), date(2025, 12, 31));
    view.reload().unwrap();

    assert_eq!(view.number_of_months(), 12);
    assert_eq!(view.displayed_month().unwrap().index(), 0);
    assert_eq!(view.month(0).unwrap().year(), 2025);
    // Earlier snapshots are untouched
    assert_eq!(before.len(), 3);
    assert_eq!(before[0].year(), 2024);
}

#[test]
fn failed_reconfiguration_keeps_published_months() {
    let shared = Rc::new(RefCell::new(configuration(date(2024, 1, 1), date(2024, 3, 31))));
    let mut view = CalendarView::with_data_source(Source(Rc::clone(&shared))).unwrap();

    *shared.borrow_mut() = configuration(date(2024, 3, 20), date(2024, 3, 10));
    let err = view.reload().unwrap_err();
    assert!(err.is_configuration_error());
    assert_eq!(view.number_of_months(), 3);
    assert_eq!(view.configuration().start_date(), date(2024, 1, 1));

    let bad = Source(Rc::new(RefCell::new(
        configuration(date(2024, 1, 1), date(2024, 1, 1)).first_weekday(9),
    )));
    assert!(view.set_data_source(bad).is_err());
    assert_eq!(view.number_of_months(), 3);
    assert!(view.render_cell(IndexPath::new(0, 0)).is_some());
}

//! Headless calendar view.
//!
//! [`CalendarView`] owns the generated month list for a host UI. The host
//! supplies configuration and renders cells through a [`CalendarDataSource`],
//! receives events through a [`CalendarDelegate`], and applies the
//! [`ScrollRequest`]s returned by navigation.

use chrono::{DateTime, Month, NaiveDate, Utc};
use std::sync::Arc;

use crate::configuration::{CalendarConfiguration, ScrollPosition};
use crate::error::Result;
use crate::generate::generate;
use crate::month::{CalendarDay, CalendarMonth, IndexPath};
use crate::navigation::{resolve, Occurrence, Target};

/// Element kind of the per-month header.
pub const HEADER_ELEMENT_KIND: &str = "calendar-header";

pub trait CalendarDataSource {
    /// Opaque handle of a rendered day cell.
    type Cell;
    /// Opaque handle of a rendered month header.
    type Header;

    /// Asked once whenever the data source is assigned or reloaded.
    fn configuration(&self) -> CalendarConfiguration;

    fn cell(&self, index_path: IndexPath, day: &CalendarDay) -> Self::Cell;

    fn header(
        &self,
        _kind: &str,
        _index_path: IndexPath,
        _month: &CalendarMonth,
    ) -> Option<Self::Header> {
        None
    }
}

pub trait CalendarDelegate {
    fn did_select_day(&mut self, day: &CalendarDay, index_path: IndexPath);

    /// With continuous scrolling this reports the first visible month.
    fn did_month_change(&mut self, month: &CalendarMonth);
}

/// Scroll the host should perform after a successful navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index_path: IndexPath,
    pub position: ScrollPosition,
    pub animated: bool,
}

pub struct CalendarView<D: CalendarDataSource> {
    data_source: Option<D>,
    delegate: Option<Box<dyn CalendarDelegate>>,
    configuration: CalendarConfiguration,
    months: Arc<[CalendarMonth]>,
    displayed: Option<usize>,
}

impl<D: CalendarDataSource> Default for CalendarView<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: CalendarDataSource> CalendarView<D> {
    /// A view over the default one-year range, without a data source.
    pub fn new() -> Self {
        let configuration = CalendarConfiguration::default();
        let months: Vec<CalendarMonth> = generate(&configuration).unwrap_or_else(|e| {
            log::error!("Default calendar configuration failed: {}", e);
            Vec::new()
        });

        let mut view = CalendarView {
            data_source: None,
            delegate: None,
            configuration,
            months: Arc::from(Vec::new()),
            displayed: None,
        };
        view.publish(months);
        view
    }

    pub fn with_data_source(data_source: D) -> Result<Self> {
        let mut view = Self::new();
        view.set_data_source(data_source)?;
        Ok(view)
    }

    /// Assigns `data_source` and regenerates all months from its configuration.
    ///
    /// On error the previous months stay published and `data_source` is dropped.
    pub fn set_data_source(&mut self, data_source: D) -> Result<()> {
        let configuration = data_source.configuration();
        let months = generate(&configuration)?;

        self.configuration = configuration;
        self.data_source = Some(data_source);
        self.publish(months);
        Ok(())
    }

    /// Regenerates from the current data source, e.g. after midnight.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(data_source) = &self.data_source {
            let configuration = data_source.configuration();
            let months = generate(&configuration)?;

            self.configuration = configuration;
            self.publish(months);
        }
        Ok(())
    }

    fn publish(&mut self, months: Vec<CalendarMonth>) {
        log::info!(
            "Publishing {} months ({} - {})",
            months.len(),
            self.configuration.start_date(),
            self.configuration.end_date()
        );
        self.displayed = if months.is_empty() { None } else { Some(0) };
        self.months = Arc::from(months);
    }

    pub fn set_delegate<T: CalendarDelegate + 'static>(&mut self, delegate: T) {
        self.delegate = Some(Box::new(delegate));
    }

    pub fn data_source(&self) -> Option<&D> {
        self.data_source.as_ref()
    }

    pub fn configuration(&self) -> &CalendarConfiguration {
        &self.configuration
    }

    /// Snapshot of the published months. Survives later reconfiguration.
    pub fn months(&self) -> Arc<[CalendarMonth]> {
        Arc::clone(&self.months)
    }

    pub fn number_of_months(&self) -> usize {
        self.months.len()
    }

    /// Number of grid cells of a month, fill days included.
    pub fn number_of_items(&self, month_index: usize) -> usize {
        self.months.get(month_index).map_or(0, |m| m.days().len())
    }

    /// Week rows of a month; zero for an unknown index.
    pub fn number_of_weeks(&self, month_index: usize) -> u32 {
        self.months
            .get(month_index)
            .map_or(0, |m| m.metadata().number_of_weeks())
    }

    pub fn month(&self, month_index: usize) -> Option<&CalendarMonth> {
        self.months.get(month_index)
    }

    pub fn day(&self, index_path: IndexPath) -> Option<&CalendarDay> {
        self.months.get(index_path.month)?.day(index_path.day)
    }

    pub fn displayed_month(&self) -> Option<&CalendarMonth> {
        self.months.get(self.displayed?)
    }

    pub fn render_cell(&self, index_path: IndexPath) -> Option<D::Cell> {
        let day = self.day(index_path)?;
        Some(self.data_source.as_ref()?.cell(index_path, day))
    }

    pub fn render_header(&self, kind: &str, month_index: usize) -> Option<D::Header> {
        let month = self.months.get(month_index)?;
        self.data_source
            .as_ref()?
            .header(kind, IndexPath::month(month_index), month)
    }

    /// The host started showing the view.
    pub fn attach(&mut self) {
        if let Some(delegate) = self.delegate.as_mut() {
            if let Some(first) = self.months.first() {
                delegate.did_month_change(first);
            }
        }
    }

    /// The user tapped a day cell.
    pub fn select_day(&mut self, index_path: IndexPath) -> bool {
        let day = match self
            .months
            .get(index_path.month)
            .and_then(|m| m.day(index_path.day))
        {
            Some(day) => day,
            None => return false,
        };

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_select_day(day, index_path);
        }
        true
    }

    /// A user scroll came to rest on `month_index`.
    pub fn scrolled_to(&mut self, month_index: usize) {
        if month_index < self.months.len() {
            self.displayed = Some(month_index);
            self.notify_month_change(month_index);
        }
    }

    pub fn move_to_next_month(&mut self, animate: bool) -> Option<ScrollRequest> {
        self.navigate(Target::Next, animate)
    }

    pub fn move_to_previous_month(&mut self, animate: bool) -> Option<ScrollRequest> {
        self.navigate(Target::Previous, animate)
    }

    pub fn move_to_date(&mut self, date: NaiveDate, animate: bool) -> Option<ScrollRequest> {
        self.navigate(Target::Date(date), animate)
    }

    /// Like [`Self::move_to_date`] for the calendar day `instant` falls on.
    pub fn move_to_instant(
        &mut self,
        instant: &DateTime<Utc>,
        animate: bool,
    ) -> Option<ScrollRequest> {
        let date = self.configuration.calendar_system().day_of(instant);
        self.move_to_date(date, animate)
    }

    /// Scrolls to the `offset`-th occurrence (1-based, sign ignored) of `month`.
    pub fn move_to_month(
        &mut self,
        month: Month,
        offset: i64,
        animate: bool,
    ) -> Option<ScrollRequest> {
        let occurrence = Occurrence::from_offset(offset);
        self.navigate(Target::Month { month, occurrence }, animate)
    }

    pub fn move_to_year(&mut self, year: i32, animate: bool) -> Option<ScrollRequest> {
        self.navigate(Target::Year(year), animate)
    }

    fn navigate(&mut self, target: Target, animate: bool) -> Option<ScrollRequest> {
        let index_path = resolve(&self.months, self.displayed, &target)?;

        log::debug!("Navigating to {:?} for {:?}", index_path, target);
        self.displayed = Some(index_path.month);
        self.notify_month_change(index_path.month);

        Some(ScrollRequest {
            index_path,
            position: self.configuration.layout().scroll_position(),
            animated: animate,
        })
    }

    fn notify_month_change(&mut self, month_index: usize) {
        if let (Some(delegate), Some(month)) =
            (self.delegate.as_mut(), self.months.get(month_index))
        {
            delegate.did_month_change(month);
        }
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use termion::{color, style};

use crate::calendar::weekday_symbols;
use crate::configuration::CalendarConfiguration;
use crate::month::{CalendarDay, CalendarMonth, IndexPath};
use crate::view::{CalendarDataSource, CalendarDelegate, HEADER_ELEMENT_KIND};

const CELL_WIDTH: usize = 3;
const COLUMN_SPACING: usize = 1;

/// Renders days and month headers as fixed-width text.
#[derive(Debug, Clone)]
pub struct TextGrid {
    configuration: CalendarConfiguration,
    styled: bool,
}

impl TextGrid {
    pub fn new(configuration: CalendarConfiguration) -> Self {
        TextGrid {
            configuration,
            styled: true,
        }
    }

    /// Without styling today is marked with `*` and fill days are plain.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn row_width() -> usize {
        7 * CELL_WIDTH + 6 * COLUMN_SPACING
    }

    pub fn separator() -> &'static str {
        " "
    }
}

impl CalendarDataSource for TextGrid {
    type Cell = String;
    type Header = Vec<String>;

    fn configuration(&self) -> CalendarConfiguration {
        self.configuration.clone()
    }

    fn cell(&self, _index_path: IndexPath, day: &CalendarDay) -> String {
        if !self.styled {
            let label = if day.is_today() {
                format!("*{}", day.display_number())
            } else {
                day.display_number().to_owned()
            };
            return format!("{:>width$}", label, width = CELL_WIDTH);
        }

        let text = format!("{:>width$}", day.display_number(), width = CELL_WIDTH);
        if day.is_today() {
            format!("{}{}{}", style::Invert, text, style::Reset)
        } else if !day.is_within_displayed_month() {
            format!(
                "{}{}{}",
                color::Fg(color::LightBlack),
                text,
                color::Fg(color::Reset)
            )
        } else {
            text
        }
    }

    fn header(
        &self,
        kind: &str,
        _index_path: IndexPath,
        month: &CalendarMonth,
    ) -> Option<Vec<String>> {
        if kind != HEADER_ELEMENT_KIND {
            return None;
        }

        let title = format!("{:^width$}", month.to_string(), width = Self::row_width());
        let labels = weekday_symbols(self.configuration.weekday_start())
            .iter()
            .map(|symbol| format!("{:>width$}", symbol, width = CELL_WIDTH))
            .collect::<Vec<_>>()
            .join(Self::separator());

        if self.styled {
            Some(vec![
                format!("{}{}{}", style::Bold, title, style::Reset),
                format!("{}{}{}", color::Fg(color::Yellow), labels, color::Fg(color::Reset)),
            ])
        } else {
            Some(vec![title, labels])
        }
    }
}

/// Delegate that keeps the latest calendar event as a status message.
#[derive(Debug, Clone, Default)]
pub struct StatusLine(Rc<RefCell<String>>);

impl StatusLine {
    pub fn text(&self) -> String {
        self.0.borrow().clone()
    }
}

impl CalendarDelegate for StatusLine {
    fn did_select_day(&mut self, day: &CalendarDay, index_path: IndexPath) {
        log::info!("Selected {} at {:?}", day.date(), index_path);
        *self.0.borrow_mut() = format!("Selected {}", day.date().format("%A, %B %-d %Y"));
    }

    fn did_month_change(&mut self, month: &CalendarMonth) {
        log::debug!("Month changed to {}", month);
        *self.0.borrow_mut() = format!("Showing {}", month);
    }
}

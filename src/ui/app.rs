use std::io::{self, Write};

use termion::input::TermRead;
use termion::raw::IntoRawMode;
use termion::screen::AlternateScreen;
use termion::{clear, cursor, style};

use crate::cmds::Cmd;
use crate::config::Config;
use crate::month::IndexPath;
use crate::view::{CalendarView, HEADER_ELEMENT_KIND};

use super::{StatusLine, TextGrid};

pub struct App<'a> {
    config: &'a Config,
    view: CalendarView<TextGrid>,
    status: StatusLine,
    cursor: Option<usize>,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, mut view: CalendarView<TextGrid>) -> App<'a> {
        let status = StatusLine::default();
        view.set_delegate(status.clone());
        view.attach();

        App {
            config,
            view,
            status,
            cursor: None,
        }
    }

    pub fn view(&self) -> &CalendarView<TextGrid> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut CalendarView<TextGrid> {
        &mut self.view
    }

    pub fn status(&self) -> String {
        self.status.text()
    }

    /// Selected day index inside the displayed month.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Places the day cursor after a jump that targeted a specific day.
    pub fn focus(&mut self, index_path: IndexPath) {
        self.cursor = if self.displayed_index() == Some(index_path.month)
            && self.is_within(index_path.day)
        {
            Some(index_path.day)
        } else {
            None
        };
    }

    fn displayed_index(&self) -> Option<usize> {
        self.view.displayed_month().map(|m| m.index())
    }

    fn is_within(&self, day: usize) -> bool {
        self.view
            .displayed_month()
            .and_then(|m| m.day(day))
            .map_or(false, |d| d.is_within_displayed_month())
    }

    fn within_days(&self) -> Vec<usize> {
        self.view.displayed_month().map_or_else(Vec::new, |m| {
            m.days()
                .iter()
                .enumerate()
                .filter(|(_, d)| d.is_within_displayed_month())
                .map(|(i, _)| i)
                .collect()
        })
    }

    fn move_cursor(&mut self, forward: bool) {
        let days = self.within_days();
        let position = self
            .cursor
            .and_then(|c| days.iter().position(|&d| d == c));

        self.cursor = match (position, forward) {
            (None, true) => days.first().copied(),
            (None, false) => days.last().copied(),
            (Some(p), true) => days.get(p + 1).or_else(|| days.last()).copied(),
            (Some(p), false) => days.get(p.saturating_sub(1)).copied(),
        };
    }

    /// Applies `cmd`; returns `false` once the app should quit.
    pub fn handle(&mut self, cmd: Cmd) -> bool {
        log::trace!("Handling {}", cmd);

        match cmd {
            Cmd::Noop => {}
            Cmd::NextMonth => {
                if self.view.move_to_next_month(true).is_some() {
                    self.cursor = None;
                }
            }
            Cmd::PrevMonth => {
                if self.view.move_to_previous_month(true).is_some() {
                    self.cursor = None;
                }
            }
            Cmd::NextDay => self.move_cursor(true),
            Cmd::PrevDay => self.move_cursor(false),
            Cmd::Today => {
                let today = self.view.configuration().calendar_system().today();
                if let Some(request) = self.view.move_to_date(today, true) {
                    self.cursor = Some(request.index_path.day);
                }
            }
            Cmd::Select => {
                if let (Some(month), Some(day)) = (self.displayed_index(), self.cursor) {
                    self.view.select_day(IndexPath::new(month, day));
                }
            }
            Cmd::Exit => return false,
        }

        true
    }

    /// Writes the displayed month, one grid row per line.
    pub fn draw<W: Write>(&self, out: &mut W, newline: &str) -> io::Result<()> {
        let month_index = match self.displayed_index() {
            Some(index) => index,
            None => return write!(out, "No months to display{}", newline),
        };

        if let Some(header) = self.view.render_header(HEADER_ELEMENT_KIND, month_index) {
            for line in header {
                write!(out, "{}{}", line, newline)?;
            }
        }

        let number_of_items = self.view.number_of_items(month_index);
        for row_start in (0..number_of_items).step_by(7) {
            let row = (row_start..number_of_items.min(row_start + 7))
                .filter_map(|day| {
                    let cell = self.view.render_cell(IndexPath::new(month_index, day))?;
                    if self.cursor == Some(day) {
                        Some(format!("{}{}{}", style::Underline, cell, style::Reset))
                    } else {
                        Some(cell)
                    }
                })
                .collect::<Vec<_>>()
                .join(TextGrid::separator());
            write!(out, "{}{}", row, newline)?;
        }

        Ok(())
    }

    fn redraw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}{}", clear::All, cursor::Goto(1, 1))?;
        self.draw(out, "\r\n")?;
        write!(out, "\r\n{}\r\n", self.status())?;
        out.flush()
    }

    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout().into_raw_mode()?;
        let mut screen = AlternateScreen::from(stdout);

        write!(screen, "{}", cursor::Hide)?;
        self.redraw(&mut screen)?;

        for key in stdin.keys() {
            let key = key?;
            let cmd = self.config.key_map.get(&key).copied().unwrap_or(Cmd::Noop);

            if !self.handle(cmd) {
                break;
            }
            self.redraw(&mut screen)?;
        }

        write!(screen, "{}", cursor::Show)?;
        screen.flush()
    }
}

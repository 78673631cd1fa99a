extern crate monthgrid as lib;

use chrono::{Month, NaiveDate, Weekday};
use flexi_logger::{FileSpec, Logger};
use lib::calendar::CalendarSystem;
use lib::ui::{App, TextGrid};
use lib::view::CalendarView;
use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;

fn parse_month(s: &str) -> Result<Month, String> {
    s.parse::<Month>()
        .map_err(|_| format!("'{}' is not a month name", s))
}

#[derive(Debug, StructOpt)]
#[structopt(name = "mgrid", about = "Month-by-month calendar grid.")]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only show calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,

    #[structopt(long = "start", help = "first day of the range (YYYY-MM-DD)")]
    pub start: Option<NaiveDate>,

    #[structopt(long = "end", help = "last day of the range (YYYY-MM-DD)")]
    pub end: Option<NaiveDate>,

    #[structopt(long = "first-weekday", help = "day the week starts on, e.g. monday")]
    pub first_weekday: Option<Weekday>,

    #[structopt(long = "no-fill", help = "do not complete the last week with next month's days")]
    pub no_fill: bool,

    #[structopt(long = "date", help = "jump to the month containing this date")]
    pub date: Option<NaiveDate>,

    #[structopt(
        long = "month",
        help = "jump to a month by name",
        parse(try_from_str = parse_month)
    )]
    pub month: Option<Month>,

    #[structopt(
        long = "occurrence",
        help = "which occurrence of --month to jump to",
        default_value = "1",
        allow_hyphen_values = true
    )]
    pub occurrence: i64,

    #[structopt(long = "year", help = "jump to the first month of this year")]
    pub year: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // Log lines on stderr would tear through the interactive screen
    let level = if args.show || args.log_file.is_some() {
        DEFAULT_LOG_LEVEL
    } else {
        "warn"
    };

    let mut logger = Logger::try_with_env_or_str(level)?;

    if let Some(log_file) = &args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        println!("mgrid ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    if args.start.is_some() {
        config.calendar.start = args.start;
    }
    if args.end.is_some() {
        config.calendar.end = args.end;
    }
    if args.first_weekday.is_some() {
        config.calendar.first_weekday = args.first_weekday;
    }
    if args.no_fill {
        config.calendar.fill_next_month_dates = false;
    }

    let today = config.calendar_system().today();
    let configuration = config.calendar_configuration(today)?;

    let styled = !args.show || termion::is_tty(&stdout());
    let grid = TextGrid::new(configuration).styled(styled);
    let view = CalendarView::with_data_source(grid)?;

    let mut app = App::new(&config, view);

    if let Some(date) = args.date {
        match app.view_mut().move_to_date(date, false) {
            Some(request) => app.focus(request.index_path),
            None => log::warn!("{} is not within the calendar range", date),
        }
    }
    if let Some(month) = args.month {
        if app
            .view_mut()
            .move_to_month(month, args.occurrence, false)
            .is_none()
        {
            log::warn!(
                "No occurrence {} of {} within the calendar range",
                args.occurrence,
                month.name()
            );
        }
    }
    if let Some(year) = args.year {
        if app.view_mut().move_to_year(year, false).is_none() {
            log::warn!("{} is not within the calendar range", year);
        }
    }

    if args.show {
        let stdout = stdout();
        let mut out = stdout.lock();
        app.draw(&mut out, "\n")?;
        out.flush()?;
    } else {
        app.run()?;
    }

    Ok(())
}

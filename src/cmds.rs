use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    Noop,
    NextMonth,
    PrevMonth,
    NextDay,
    PrevDay,
    Today,
    Select,
    Exit,
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cmd::Noop => "noop",
            Cmd::NextMonth => "next month",
            Cmd::PrevMonth => "previous month",
            Cmd::NextDay => "next day",
            Cmd::PrevDay => "previous day",
            Cmd::Today => "today",
            Cmd::Select => "select",
            Cmd::Exit => "exit",
        };
        write!(f, "{}", name)
    }
}

use std::convert::From;
use std::error;
use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ErrorKind {
    EndBeforeStart,
    MetadataGeneration,
    InvalidFirstWeekday,
    DateOutOfRange,
    ConfigParse,
    ParseError,
    IOError(io::Error),
}

impl Error {
    pub fn new(kind: ErrorKind, msg: &str) -> Self {
        Error {
            kind,
            message: Some(msg.to_owned()),
        }
    }

    pub fn with_msg(mut self, message: &str) -> Self {
        self.message = Some(message.to_owned());
        self
    }

    /// Errors that make a `CalendarConfiguration` unusable for generation.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::EndBeforeStart
                | ErrorKind::MetadataGeneration
                | ErrorKind::InvalidFirstWeekday
                | ErrorKind::DateOutOfRange
        )
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            kind,
            message: None,
        }
    }
}

impl From<io::ErrorKind> for Error {
    fn from(kind: io::ErrorKind) -> Error {
        Error::from(io::Error::from(kind))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(parse_error: chrono::ParseError) -> Error {
        Error::new(
            ErrorKind::ParseError,
            format!("Could not parse date: {}", parse_error).as_str(),
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(toml_error: toml::de::Error) -> Error {
        Error::new(ErrorKind::ConfigParse, &toml_error.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(io_error: io::Error) -> Error {
        Error::from(ErrorKind::IOError(io_error))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        if let ErrorKind::IOError(err) = err.kind {
            err
        } else {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                err.to_string(),
            )
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}: {}", self.kind.as_str(), msg),
            None => write!(f, "{}", self.kind.as_str()),
        }
    }
}

impl error::Error for Error {}

impl ErrorKind {
    pub fn as_str(&self) -> String {
        match self {
            ErrorKind::EndBeforeStart => "end date precedes start date".to_owned(),
            ErrorKind::MetadataGeneration => "could not generate month metadata".to_owned(),
            ErrorKind::InvalidFirstWeekday => "first weekday must be within 1..=7".to_owned(),
            ErrorKind::DateOutOfRange => "date out of representable range".to_owned(),
            ErrorKind::ConfigParse => "invalid configuration file".to_owned(),
            ErrorKind::ParseError => "invalid format".to_owned(),
            ErrorKind::IOError(err) => err.to_string(),
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde_with::DeserializeFromStr;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Timezone a calendar system uses to decide which calendar day an instant
/// falls on.
#[derive(Clone, Copy, Debug, Default, DeserializeFromStr, PartialEq, Eq)]
pub enum Tz {
    #[default]
    Local,
    Iana(chrono_tz::Tz),
}

impl Tz {
    const LOCAL_ID: &'static str = "Localtime";

    pub fn utc() -> Self {
        Self::Iana(chrono_tz::UTC)
    }

    pub fn id(&self) -> &str {
        match self {
            Tz::Local => Self::LOCAL_ID,
            Tz::Iana(tz) => tz.name(),
        }
    }

    pub fn date_of(&self, instant: &DateTime<Utc>) -> NaiveDate {
        match self {
            Tz::Local => instant.with_timezone(&chrono::Local).date_naive(),
            Tz::Iana(tz) => instant.with_timezone(tz).date_naive(),
        }
    }
}

impl Display for Tz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Tz {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercase = s.to_lowercase();

        if matches!(lowercase.as_str(), "localtime" | "local") {
            Ok(Tz::Local)
        } else if let Ok(tz) = s.parse::<chrono_tz::Tz>() {
            Ok(Tz::Iana(tz))
        } else {
            Err(Error::new(
                ErrorKind::ParseError,
                &format!("Timezone '{}' not recognized", s),
            ))
        }
    }
}

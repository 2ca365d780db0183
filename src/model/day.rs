//! Day of week, the key for a route's seven schedules.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local};

use crate::error::Error;

/// A service day. Index 0 is Sunday, matching the timetable layout of the
/// network description files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    pub const WEEK: [Day; 7] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::WEEK[index % 7]
    }

    pub fn today() -> Self {
        Self::from_index(Local::now().weekday().num_days_from_sunday() as usize)
    }

    pub fn tomorrow() -> Self {
        Self::from_index(Self::today().index() + 1)
    }

    fn name(self) -> &'static str {
        match self {
            Day::Sunday => "sunday",
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
        }
    }
}

/// Accepts English day names plus `today` and `tomorrow`, case-insensitively.
impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sunday" => Ok(Day::Sunday),
            "monday" => Ok(Day::Monday),
            "tuesday" => Ok(Day::Tuesday),
            "wednesday" => Ok(Day::Wednesday),
            "thursday" => Ok(Day::Thursday),
            "friday" => Ok(Day::Friday),
            "saturday" => Ok(Day::Saturday),
            "today" => Ok(Day::today()),
            "tomorrow" => Ok(Day::tomorrow()),
            _ => Err(Error::InvalidDay(s.to_string())),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

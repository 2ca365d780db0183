//! Minute-resolution service-day time.
//!
//! Timetables are written as "HH:MM" clock values; arithmetic during a query
//! can step before midnight (transfer adjustment, walking back from an
//! arrival bound), so the representation is a signed minute count rather than
//! a clock time. Two infinite sentinels bound every real value and serve as
//! fold seeds when reducing over candidate departures.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::Serialize;

/// Error returned when parsing an invalid time or duration literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time literal {literal:?}")]
pub struct ParseTimeError {
    literal: String,
}

/// A point in time with minute resolution.
///
/// Values outside `[MINUS_INF, PLUS_INF]` do not occur; the sentinels
/// themselves never appear in a returned itinerary.
///
/// # Examples
///
/// ```
/// use headway::Time;
///
/// let t: Time = "08:30".parse().unwrap();
/// assert_eq!(t.to_string(), "08:30");
/// assert!(Time::MINUS_INF < t && t < Time::PLUS_INF);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct Time(i32);

/// A duration in minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DifTime(i32);

impl Time {
    /// "Earlier than everything": the identity for latest-departure folds.
    pub const MINUS_INF: Time = Time(i32::MIN / 2);
    /// "Later than everything": the identity for earliest-arrival folds.
    pub const PLUS_INF: Time = Time(i32::MAX / 2);

    pub fn from_hm(hours: i32, minutes: i32) -> Self {
        Time(hours * 60 + minutes)
    }

    pub fn from_minutes(minutes: i32) -> Self {
        Time(minutes)
    }

    pub fn minutes(self) -> i32 {
        self.0
    }

    /// `false` for either sentinel.
    pub fn is_finite(self) -> bool {
        self != Self::MINUS_INF && self != Self::PLUS_INF
    }
}

impl DifTime {
    pub const ZERO: DifTime = DifTime(0);

    pub fn from_minutes(minutes: i32) -> Self {
        DifTime(minutes)
    }

    pub fn minutes(self) -> i32 {
        self.0
    }
}

impl Add<DifTime> for Time {
    type Output = Time;

    fn add(self, rhs: DifTime) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl AddAssign<DifTime> for Time {
    fn add_assign(&mut self, rhs: DifTime) {
        self.0 += rhs.0;
    }
}

impl Sub<DifTime> for Time {
    type Output = Time;

    fn sub(self, rhs: DifTime) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl SubAssign<DifTime> for Time {
    fn sub_assign(&mut self, rhs: DifTime) {
        self.0 -= rhs.0;
    }
}

impl Sub for Time {
    type Output = DifTime;

    fn sub(self, rhs: Time) -> DifTime {
        DifTime(self.0 - rhs.0)
    }
}

impl Add for DifTime {
    type Output = DifTime;

    fn add(self, rhs: DifTime) -> DifTime {
        DifTime(self.0 + rhs.0)
    }
}

impl Sub for DifTime {
    type Output = DifTime;

    fn sub(self, rhs: DifTime) -> DifTime {
        DifTime(self.0 - rhs.0)
    }
}

impl Neg for DifTime {
    type Output = DifTime;

    fn neg(self) -> DifTime {
        DifTime(-self.0)
    }
}

/// Parses `"H:MM"` (hours and minutes) or a bare minute count `"MM"`.
impl FromStr for DifTime {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeError {
            literal: s.to_string(),
        };
        let minutes = match s.split_once(':') {
            Some((h, m)) => {
                let h: i32 = h.trim().parse().map_err(|_| err())?;
                let m: i32 = m.trim().parse().map_err(|_| err())?;
                if !(0..60).contains(&m) {
                    return Err(err());
                }
                h * 60 + m
            }
            None => s.trim().parse().map_err(|_| err())?,
        };
        Ok(DifTime(minutes))
    }
}

impl FromStr for Time {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dif: DifTime = s.parse()?;
        Ok(Time(dif.0))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            write!(f, "-")?;
            return Time(-self.0).fmt(f);
        }
        let hours = (self.0 / 60) % 24;
        let minutes = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}")
    }
}

impl From<Time> for String {
    fn from(t: Time) -> String {
        t.to_string()
    }
}

impl fmt::Display for DifTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

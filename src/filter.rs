//! Month / weekday filter selection and the filter engine.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{BikeshareError, Result};
use crate::trip::{Trip, serialize_weekday, weekday_name};

/// Months present in the published datasets, in calendar order.
pub const MONTH_NAMES: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekday names accepted at the prompt, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const ALL: &str = "all";

/// A month the datasets cover, January through June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn parse(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        MONTH_NAMES
            .iter()
            .position(|m| *m == wanted)
            .map(|i| Month::ALL[i])
            .ok_or_else(|| BikeshareError::InvalidFilterValue {
                dimension: "month",
                value: s.to_string(),
            })
    }
}

/// Parses a full weekday name, ignoring case.
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    let wanted = s.trim().to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .position(|d| *d == wanted)
        .map(|i| WEEKDAYS[i])
        .ok_or_else(|| BikeshareError::InvalidFilterValue {
            dimension: "weekday",
            value: s.to_string(),
        })
}

/// The (month, weekday) pair narrowing a run. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub month: Option<Month>,
    #[serde(serialize_with = "serialize_opt_weekday")]
    pub weekday: Option<Weekday>,
}

fn serialize_opt_weekday<S: serde::Serializer>(
    weekday: &Option<Weekday>,
    s: S,
) -> std::result::Result<S::Ok, S::Error> {
    match weekday {
        Some(w) => serialize_weekday(w, s),
        None => s.serialize_none(),
    }
}

impl FilterSelection {
    /// No restriction on either dimension.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses prompt answers such as `("March", "all")`.
    pub fn parse(month: &str, weekday: &str) -> Result<Self> {
        let month = if month.trim().eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(Month::parse(month)?)
        };
        let weekday = if weekday.trim().eq_ignore_ascii_case(ALL) {
            None
        } else {
            Some(parse_weekday(weekday)?)
        };
        Ok(Self { month, weekday })
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.is_none_or(|m| trip.time.month == m.number())
            && self.weekday.is_none_or(|w| trip.time.weekday == w)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.month {
            Some(m) => write!(f, "month={:?}", m)?,
            None => write!(f, "month=all")?,
        }
        match self.weekday {
            Some(w) => write!(f, " day={}", weekday_name(w)),
            None => write!(f, " day=all"),
        }
    }
}

/// Keeps the trips matching `selection`, preserving their order.
///
/// The input is only borrowed; an empty result is not an error.
pub fn filter_trips<'a, I>(trips: I, selection: &FilterSelection) -> Vec<&'a Trip>
where
    I: IntoIterator<Item = &'a Trip>,
{
    let mut seen = 0usize;
    let kept: Vec<&Trip> = trips
        .into_iter()
        .inspect(|_| seen += 1)
        .filter(|t| selection.matches(t))
        .collect();
    debug!(%selection, seen, kept = kept.len(), "Filtered trips");
    kept
}

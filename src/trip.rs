//! Trip records and the calendar fields derived from their start time.

use chrono::{Datelike, Duration, NaiveDateTime, Timelike, Weekday};
use serde::{Serialize, Serializer};

/// One bikeshare trip as stored in a city's CSV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Duration column as published, in seconds. Display only.
    pub trip_duration: Option<f64>,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    pub gender: Option<String>,
    pub birth_year: Option<u16>,
}

impl TripRecord {
    /// `end_time - start_time`. May be negative for noisy rows.
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

/// Calendar fields taken from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedTime {
    /// 1..=12
    pub month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    /// 0..=23
    pub hour: u32,
}

/// Computes month, weekday and hour from a start timestamp.
pub fn derive_time(start_time: &NaiveDateTime) -> DerivedTime {
    DerivedTime {
        month: start_time.month(),
        weekday: start_time.weekday(),
        hour: start_time.hour(),
    }
}

/// Full English weekday name, e.g. "Monday".
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub(crate) fn serialize_weekday<S: Serializer>(weekday: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*weekday))
}

/// A record together with its derived fields, computed once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(flatten)]
    pub record: TripRecord,
    #[serde(flatten)]
    pub time: DerivedTime,
}

impl Trip {
    pub fn new(record: TripRecord) -> Self {
        let time = derive_time(&record.start_time);
        Self { record, time }
    }

    pub fn duration(&self) -> Duration {
        self.record.duration()
    }
}

impl From<TripRecord> for Trip {
    fn from(record: TripRecord) -> Self {
        Trip::new(record)
    }
}

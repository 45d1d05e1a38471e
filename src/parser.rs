//! CSV parser for city trip files.

use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;

use crate::error::{BikeshareError, Result};
use crate::trip::TripRecord;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One CSV row as published. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type")]
    user_type: String,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

fn parse_timestamp(row: usize, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        BikeshareError::InvalidTimestamp {
            row,
            value: value.to_string(),
        }
    })
}

impl RawTrip {
    fn into_record(self, row: usize) -> Result<TripRecord> {
        Ok(TripRecord {
            start_time: parse_timestamp(row, &self.start_time)?,
            end_time: parse_timestamp(row, &self.end_time)?,
            trip_duration: self.trip_duration,
            start_station: self.start_station,
            end_station: self.end_station,
            user_type: self.user_type,
            gender: self.gender.filter(|g| !g.is_empty()),
            // stored as e.g. "1992.0"
            birth_year: self.birth_year.map(|y| y as u16),
        })
    }
}

/// Decodes every trip in a city CSV, keeping file order.
///
/// # Errors
///
/// Fails on malformed CSV or on a start/end time that is not
/// `YYYY-MM-DD HH:MM:SS`. Rows are numbered from 1, header excluded.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<TripRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        let raw: RawTrip = result?;
        trips.push(raw.into_record(i + 1)?);
    }

    Ok(trips)
}

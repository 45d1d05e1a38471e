//! Console rendering for summaries and raw trip rows.
//!
//! Supports plain text and pretty JSON.

use chrono::Duration;
use serde::Serialize;
use std::io::Write;

use crate::analyzers::{DurationSummary, Report, StationSummary, TimeSummary, UserSummary, ValueCount};
use crate::config::DatasetCapabilities;
use crate::error::Result;
use crate::trip::{Trip, weekday_name};

pub const RULE: &str = "----------------------------------------";

const NO_DATA: &str = "No trips match the selected filters.";

/// A span broken into display units. Never used for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpanParts {
    pub negative: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl From<Duration> for SpanParts {
    fn from(span: Duration) -> Self {
        let total = span.num_seconds();
        let secs = total.abs();
        SpanParts {
            negative: total < 0,
            days: secs / 86_400,
            hours: secs % 86_400 / 3_600,
            minutes: secs % 3_600 / 60,
            seconds: secs % 60,
        }
    }
}

/// English month name for a month number, or the number itself if out of range.
pub fn month_name(month: u32) -> String {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| month.to_string())
}

pub fn write_time_summary<W: Write>(out: &mut W, summary: &TimeSummary) -> Result<()> {
    if summary.trips == 0 {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }
    if let Some(ValueCount { value, count }) = &summary.popular_month {
        writeln!(
            out,
            "The most popular month to travel is {} with a total of {} trips.",
            month_name(*value),
            count
        )?;
    }
    if let Some(ValueCount { value, count }) = &summary.popular_weekday {
        writeln!(
            out,
            "The most popular day to travel is {} with a total of {} trips.",
            weekday_name(*value),
            count
        )?;
    }
    if let Some(ValueCount { value, count }) = &summary.popular_hour {
        writeln!(
            out,
            "The most popular hour to start travel is {value} with a total of {count} trips."
        )?;
    }
    Ok(())
}

pub fn write_station_summary<W: Write>(out: &mut W, summary: &StationSummary) -> Result<()> {
    if summary.trips == 0 {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }
    if let Some(ValueCount { value, count }) = &summary.popular_start {
        writeln!(
            out,
            "The most common station to start a trip is {value} with a total of {count} trips."
        )?;
    }
    if let Some(ValueCount { value, count }) = &summary.popular_end {
        writeln!(
            out,
            "The most common destination station is {value} with a total of {count} trips."
        )?;
    }
    if let Some(ValueCount { value, count }) = &summary.popular_route {
        writeln!(
            out,
            "The most frequent trip is from {} to {} with a total of {} trips.",
            value.start, value.end, count
        )?;
    }
    Ok(())
}

pub fn write_duration_summary<W: Write>(out: &mut W, summary: &DurationSummary) -> Result<()> {
    let Some(mean) = summary.mean else {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    };

    let total = SpanParts::from(summary.total);
    writeln!(
        out,
        "The total trip duration was {}{} days, {} hours and {} minutes.",
        sign(&total),
        total.days,
        total.hours,
        total.minutes
    )?;

    let mean = SpanParts::from(mean);
    writeln!(
        out,
        "The average trip duration was {}{} hours, {} minutes and {} seconds.",
        sign(&mean),
        mean.days * 24 + mean.hours,
        mean.minutes,
        mean.seconds
    )?;
    Ok(())
}

fn sign(parts: &SpanParts) -> &'static str {
    if parts.negative { "-" } else { "" }
}

pub fn write_user_summary<W: Write>(out: &mut W, summary: &UserSummary) -> Result<()> {
    if summary.trips == 0 {
        writeln!(out, "{NO_DATA}")?;
        return Ok(());
    }

    writeln!(out, "Here are the counts of user type:")?;
    write_table(out, &summary.user_types)?;

    if let Some(genders) = &summary.genders {
        writeln!(out, "Here is the trip breakdown by gender:")?;
        write_table(out, genders)?;
    }
    Ok(())
}

fn write_table<W: Write>(out: &mut W, rows: &[ValueCount<String>]) -> Result<()> {
    let width = rows.iter().map(|r| r.value.len()).max().unwrap_or(0);
    for row in rows {
        writeln!(out, "  {:<width$}  {}", row.value, row.count)?;
    }
    Ok(())
}

/// Writes all four summaries under their headings.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    writeln!(out, "Most Frequent Times of Travel")?;
    write_time_summary(out, &report.time)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Most Popular Stations")?;
    write_station_summary(out, &report.stations)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Trip Duration")?;
    write_duration_summary(out, &report.durations)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "User Stats")?;
    write_user_summary(out, &report.users)?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Writes any serializable value as pretty-printed JSON.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes raw trip rows as JSON objects, one per row. Columns the city
/// does not publish are left out rather than shown as `null`.
pub fn write_rows<W: Write>(
    out: &mut W,
    rows: &[&Trip],
    capabilities: &DatasetCapabilities,
) -> Result<()> {
    for row in rows {
        let mut value = serde_json::to_value(row)?;
        if let Some(fields) = value.as_object_mut() {
            if !capabilities.has_gender {
                fields.remove("gender");
            }
            if !capabilities.has_birth_year {
                fields.remove("birth_year");
            }
        }
        write_json(out, &value)?;
    }
    Ok(())
}

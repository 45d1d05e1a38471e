//! Trip statistics.
//!
//! Each summary is computed from an explicit grouped count
//! ([`utility::ValueCounts`]) so the most frequent value is deterministic:
//! ties go to the value encountered first in the collection.

pub mod aggregate;
pub mod types;
pub mod utility;

pub use aggregate::{duration_stats, station_stats, summarize, time_stats, user_stats};
pub use types::{DurationSummary, Report, Route, StationSummary, TimeSummary, UserSummary};
pub use utility::{ValueCount, ValueCounts};

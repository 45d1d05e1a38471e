//! Summary types returned by the aggregation pipeline.

use chrono::{Duration, Weekday};
use serde::{Serialize, Serializer};

use crate::analyzers::utility::ValueCount;
use crate::filter::FilterSelection;
use crate::trip::weekday_name;

/// Most frequent times of travel.
///
/// `popular_month` is only computed when the run is not restricted to one
/// month, and likewise for `popular_weekday`. Every field is `None` when the
/// collection is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSummary {
    pub trips: usize,
    pub popular_month: Option<ValueCount<u32>>,
    #[serde(serialize_with = "serialize_weekday_count")]
    pub popular_weekday: Option<ValueCount<Weekday>>,
    pub popular_hour: Option<ValueCount<u32>>,
}

/// Most popular stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub trips: usize,
    pub popular_start: Option<ValueCount<String>>,
    pub popular_end: Option<ValueCount<String>>,
    pub popular_route: Option<ValueCount<Route>>,
}

/// A start → end station pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

/// Total and mean travel time. `mean` is `None` for an empty collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationSummary {
    pub trips: usize,
    #[serde(serialize_with = "serialize_seconds")]
    pub total: Duration,
    #[serde(serialize_with = "serialize_opt_seconds")]
    pub mean: Option<Duration>,
}

/// Rider breakdown. `genders` is `None` when the city's data has no gender
/// column, and a (possibly empty) table otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub trips: usize,
    pub user_types: Vec<ValueCount<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<ValueCount<String>>>,
}

/// All four summaries for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub selection: FilterSelection,
    pub time: TimeSummary,
    pub stations: StationSummary,
    pub durations: DurationSummary,
    pub users: UserSummary,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.time.trips == 0
    }
}

fn serialize_weekday_count<S: Serializer>(
    value: &Option<ValueCount<Weekday>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    value
        .as_ref()
        .map(|vc| ValueCount {
            value: weekday_name(vc.value),
            count: vc.count,
        })
        .serialize(s)
}

/// Spans serialize as fractional seconds.
fn serialize_seconds<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(value.num_milliseconds() as f64 / 1000.0)
}

fn serialize_opt_seconds<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serialize_seconds(d, s),
        None => s.serialize_none(),
    }
}

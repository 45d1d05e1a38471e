use chrono::Duration;
use tracing::debug;

use crate::analyzers::types::{
    DurationSummary, Report, Route, StationSummary, TimeSummary, UserSummary,
};
use crate::analyzers::utility::{ValueCount, ValueCounts};
use crate::config::DatasetCapabilities;
use crate::filter::FilterSelection;
use crate::trip::Trip;

/// Most frequent month, weekday and start hour.
///
/// Month and weekday are skipped when the selection already pins them.
pub fn time_stats(trips: &[&Trip], selection: &FilterSelection) -> TimeSummary {
    let popular_month = match selection.month {
        None => trips.iter().map(|t| t.time.month).collect::<ValueCounts<_>>().mode(),
        Some(_) => None,
    };
    let popular_weekday = match selection.weekday {
        None => trips.iter().map(|t| t.time.weekday).collect::<ValueCounts<_>>().mode(),
        Some(_) => None,
    };
    let popular_hour = trips.iter().map(|t| t.time.hour).collect::<ValueCounts<_>>().mode();

    TimeSummary {
        trips: trips.len(),
        popular_month,
        popular_weekday,
        popular_hour,
    }
}

/// Most common start station, end station and start → end route.
pub fn station_stats(trips: &[&Trip]) -> StationSummary {
    let mut starts = ValueCounts::new();
    let mut ends = ValueCounts::new();
    let mut routes = ValueCounts::new();

    for t in trips {
        starts.add(t.record.start_station.as_str());
        ends.add(t.record.end_station.as_str());
        routes.add((t.record.start_station.as_str(), t.record.end_station.as_str()));
    }

    StationSummary {
        trips: trips.len(),
        popular_start: starts.mode().map(owned),
        popular_end: ends.mode().map(owned),
        popular_route: routes.mode().map(|vc| ValueCount {
            value: Route {
                start: vc.value.0.to_string(),
                end: vc.value.1.to_string(),
            },
            count: vc.count,
        }),
    }
}

/// Total and mean of `end_time - start_time`.
///
/// The mean is kept to whole milliseconds.
pub fn duration_stats(trips: &[&Trip]) -> DurationSummary {
    let total = trips
        .iter()
        .fold(Duration::zero(), |acc, t| acc + t.duration());

    let mean = if trips.is_empty() {
        None
    } else {
        Some(Duration::milliseconds(
            total.num_milliseconds() / trips.len() as i64,
        ))
    };

    DurationSummary {
        trips: trips.len(),
        total,
        mean,
    }
}

/// User type breakdown, plus gender when the dataset records it.
///
/// Blank labels are left out of both tables.
pub fn user_stats(trips: &[&Trip], capabilities: &DatasetCapabilities) -> UserSummary {
    let user_types = trips
        .iter()
        .map(|t| t.record.user_type.as_str())
        .filter(|u| !u.is_empty())
        .collect::<ValueCounts<_>>();

    let genders = capabilities.has_gender.then(|| {
        trips
            .iter()
            .filter_map(|t| t.record.gender.as_deref())
            .filter(|g| !g.is_empty())
            .collect::<ValueCounts<_>>()
    });

    UserSummary {
        trips: trips.len(),
        user_types: table(user_types),
        genders: genders.map(table),
    }
}

/// Runs all four summaries over the same filtered collection.
#[tracing::instrument(skip_all, fields(trips = trips.len(), %selection))]
pub fn summarize(
    trips: &[&Trip],
    selection: &FilterSelection,
    capabilities: &DatasetCapabilities,
) -> Report {
    let report = Report {
        selection: *selection,
        time: time_stats(trips, selection),
        stations: station_stats(trips),
        durations: duration_stats(trips),
        users: user_stats(trips, capabilities),
    };
    debug!(empty = report.is_empty(), "Report computed");
    report
}

fn owned(vc: ValueCount<&str>) -> ValueCount<String> {
    ValueCount {
        value: vc.value.to_string(),
        count: vc.count,
    }
}

fn table(counts: ValueCounts<&str>) -> Vec<ValueCount<String>> {
    counts.into_sorted().into_iter().map(owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::fixtures::{trip, with_gender};
    use chrono::Weekday;

    fn scenario() -> Vec<Trip> {
        vec![
            trip("2019-01-01 08:15:00", "2019-01-01 08:30:00", "A", "B", "Subscriber"),
            trip("2019-01-01 08:15:00", "2019-01-01 08:45:00", "A", "C", "Customer"),
        ]
    }

    fn refs(trips: &[Trip]) -> Vec<&Trip> {
        trips.iter().collect()
    }

    #[test]
    fn test_time_stats_scenario() {
        let trips = scenario();
        let summary = time_stats(&refs(&trips), &FilterSelection::all());

        assert_eq!(summary.trips, 2);
        assert_eq!(summary.popular_month, Some(ValueCount { value: 1, count: 2 }));
        assert_eq!(
            summary.popular_weekday,
            Some(ValueCount { value: Weekday::Tue, count: 2 })
        );
        assert_eq!(summary.popular_hour, Some(ValueCount { value: 8, count: 2 }));
    }

    #[test]
    fn test_time_stats_skips_pinned_dimensions() {
        let trips = scenario();
        let selection = FilterSelection::parse("january", "tuesday").unwrap();
        let summary = time_stats(&refs(&trips), &selection);

        assert_eq!(summary.popular_month, None);
        assert_eq!(summary.popular_weekday, None);
        assert_eq!(summary.popular_hour, Some(ValueCount { value: 8, count: 2 }));
    }

    #[test]
    fn test_station_stats_scenario() {
        let trips = scenario();
        let summary = station_stats(&refs(&trips));

        assert_eq!(
            summary.popular_start,
            Some(ValueCount { value: "A".to_string(), count: 2 })
        );
        assert_eq!(
            summary.popular_end,
            Some(ValueCount { value: "B".to_string(), count: 1 })
        );
        let route = summary.popular_route.unwrap();
        assert_eq!(route.value.start, "A");
        assert_eq!(route.value.end, "B");
    }

    #[test]
    fn test_station_tie_follows_scan_order() {
        let trips = vec![
            trip("2019-01-01 08:15:00", "2019-01-01 08:30:00", "A", "C", "Subscriber"),
            trip("2019-01-01 08:15:00", "2019-01-01 08:45:00", "A", "B", "Customer"),
        ];
        let summary = station_stats(&refs(&trips));
        assert_eq!(summary.popular_end.unwrap().value, "C");
    }

    #[test]
    fn test_duration_stats_scenario() {
        let trips = scenario();
        let summary = duration_stats(&refs(&trips));

        assert_eq!(summary.total, Duration::minutes(45));
        assert_eq!(summary.mean, Some(Duration::seconds(1350)));
    }

    #[test]
    fn test_mean_times_count_matches_total() {
        let trips = vec![
            trip("2017-03-01 10:00:00", "2017-03-01 10:07:13", "A", "B", "Subscriber"),
            trip("2017-03-01 11:00:00", "2017-03-01 11:21:05", "A", "B", "Subscriber"),
            trip("2017-03-02 12:00:00", "2017-03-02 12:00:59", "B", "A", "Customer"),
        ];
        let summary = duration_stats(&refs(&trips));
        let mean = summary.mean.unwrap();
        let diff = (summary.total - mean * 3).num_milliseconds().abs();
        assert!(diff < 3, "total and mean disagree by {diff}ms");
    }

    #[test]
    fn test_user_stats_scenario() {
        let trips = scenario();
        let summary = user_stats(&refs(&trips), &DatasetCapabilities::FULL);

        assert_eq!(
            summary.user_types,
            vec![
                ValueCount { value: "Subscriber".to_string(), count: 1 },
                ValueCount { value: "Customer".to_string(), count: 1 },
            ]
        );
        assert_eq!(summary.genders, Some(vec![]));
    }

    #[test]
    fn test_user_stats_orders_by_count() {
        let trips = vec![
            with_gender(trip("2017-03-01 10:00:00", "2017-03-01 10:10:00", "A", "B", "Customer"), "Female"),
            with_gender(trip("2017-03-01 10:00:00", "2017-03-01 10:10:00", "A", "B", "Subscriber"), "Male"),
            with_gender(trip("2017-03-01 10:00:00", "2017-03-01 10:10:00", "A", "B", "Subscriber"), "Male"),
            trip("2017-03-01 10:00:00", "2017-03-01 10:10:00", "A", "B", ""),
        ];
        let summary = user_stats(&refs(&trips), &DatasetCapabilities::FULL);

        assert_eq!(summary.user_types[0].value, "Subscriber");
        assert_eq!(summary.user_types[0].count, 2);
        assert_eq!(summary.user_types.len(), 2);

        let genders = summary.genders.unwrap();
        assert_eq!(genders[0], ValueCount { value: "Male".to_string(), count: 2 });
        assert_eq!(genders[1], ValueCount { value: "Female".to_string(), count: 1 });
    }

    #[test]
    fn test_gender_omitted_without_capability() {
        let trips = scenario();
        let summary = user_stats(&refs(&trips), &DatasetCapabilities::BASIC);
        assert!(summary.genders.is_none());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("genders").is_none());
    }

    #[test]
    fn test_empty_collection_yields_no_data() {
        let report = summarize(&[], &FilterSelection::all(), &DatasetCapabilities::FULL);

        assert!(report.is_empty());
        assert_eq!(report.time.popular_month, None);
        assert_eq!(report.time.popular_weekday, None);
        assert_eq!(report.time.popular_hour, None);
        assert_eq!(report.stations.popular_start, None);
        assert_eq!(report.stations.popular_end, None);
        assert_eq!(report.stations.popular_route, None);
        assert_eq!(report.durations.total, Duration::zero());
        assert_eq!(report.durations.mean, None);
        assert!(report.users.user_types.is_empty());
        assert_eq!(report.users.genders, Some(vec![]));
    }

    #[test]
    fn test_report_serializes() {
        let trips = scenario();
        let report = summarize(&refs(&trips), &FilterSelection::all(), &DatasetCapabilities::BASIC);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["time"]["popular_weekday"]["value"], "Tuesday");
        assert_eq!(json["durations"]["total"], 2700.0);
        assert_eq!(json["durations"]["mean"], 1350.0);
        assert_eq!(json["selection"]["month"], serde_json::Value::Null);
    }
}

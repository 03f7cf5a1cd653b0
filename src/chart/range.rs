//! Symbolic time-range resolution.
//!
//! Maps the range selector (1M/3M/6M/YTD/1Y/All/Custom) plus optional custom
//! date bounds onto a concrete `{min, max}` window over the data span. The
//! resolver is a pure function of its inputs; it never touches the chart.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::base::DAY_MS;
use crate::error::ChartError;
use crate::market::SeriesDataset;

/// Symbolic range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RangeSelector {
    OneMonth,
    ThreeMonths,
    SixMonths,
    YearToDate,
    #[default]
    OneYear,
    All,
    Custom,
}

impl fmt::Display for RangeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSelector::OneMonth => write!(f, "1M"),
            RangeSelector::ThreeMonths => write!(f, "3M"),
            RangeSelector::SixMonths => write!(f, "6M"),
            RangeSelector::YearToDate => write!(f, "YTD"),
            RangeSelector::OneYear => write!(f, "1Y"),
            RangeSelector::All => write!(f, "All"),
            RangeSelector::Custom => write!(f, "Custom"),
        }
    }
}

impl RangeSelector {
    /// All selector values, in display order.
    pub fn all() -> [RangeSelector; 7] {
        [
            RangeSelector::OneMonth,
            RangeSelector::ThreeMonths,
            RangeSelector::SixMonths,
            RangeSelector::YearToDate,
            RangeSelector::OneYear,
            RangeSelector::All,
            RangeSelector::Custom,
        ]
    }
}

/// Optional custom date bounds, kept as the raw ISO text the user typed.
///
/// Bounds may be partial while the user is still editing; resolution treats
/// anything short of two parseable dates as "leave the viewport alone".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomBounds {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl CustomBounds {
    /// Parse both bounds; `None` unless both are present and valid dates.
    fn parse(&self) -> Option<(i64, i64)> {
        let start = parse_date_ms(self.start.as_deref()?)?;
        let end = parse_date_ms(self.end.as_deref()?)?;
        Some((start, end))
    }
}

/// Visible time window in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min: i64,
    pub max: i64,
}

/// Resolve the window requested by `selector` over the dataset's time span.
///
/// Returns `Ok(None)` for `Custom` with missing or unparseable bounds; the
/// caller must keep the existing viewport untouched. An empty dataset yields
/// `ChartError::NoData` and the caller must skip the viewport apply.
pub fn resolve_window(
    selector: RangeSelector,
    bounds: &CustomBounds,
    dataset: &SeriesDataset,
) -> Result<Option<TimeWindow>, ChartError> {
    let (data_min, data_max) = dataset.time_span().ok_or(ChartError::NoData)?;

    let window = match selector {
        RangeSelector::OneMonth => TimeWindow { min: data_max - 30 * DAY_MS, max: data_max },
        RangeSelector::ThreeMonths => TimeWindow { min: data_max - 90 * DAY_MS, max: data_max },
        RangeSelector::SixMonths => TimeWindow { min: data_max - 180 * DAY_MS, max: data_max },
        RangeSelector::YearToDate => {
            TimeWindow { min: year_start_ms(data_max).unwrap_or(data_min), max: data_max }
        }
        RangeSelector::OneYear => TimeWindow { min: data_max - 365 * DAY_MS, max: data_max },
        RangeSelector::All => TimeWindow { min: data_min, max: data_max },
        RangeSelector::Custom => match bounds.parse() {
            Some((min, max)) => TimeWindow { min, max },
            None => return Ok(None),
        },
    };

    Ok(Some(window))
}

/// Parse an ISO `%Y-%m-%d` date into UTC-midnight epoch milliseconds.
fn parse_date_ms(text: &str) -> Option<i64> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()?;
    Some(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

/// Epoch milliseconds of Jan 1, 00:00:00 UTC of the year containing `ms`.
fn year_start_ms(ms: i64) -> Option<i64> {
    let year = DateTime::<Utc>::from_timestamp_millis(ms)?.year();
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    Some(jan1.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{CandlePoint, VolumePoint};
    use chrono::TimeZone;

    fn dataset_between(first: DateTime<Utc>, days: i64) -> SeriesDataset {
        let mut candles = Vec::new();
        let mut volumes = Vec::new();
        for ix in 0..=days {
            let datetime = first + chrono::Duration::days(ix);
            candles.push(CandlePoint { datetime, open: 1.0, high: 2.0, low: 0.5, close: 1.5 });
            volumes.push(VolumePoint { datetime, volume: 100.0 });
        }
        SeriesDataset::new(candles, volumes).unwrap()
    }

    fn bounds(start: Option<&str>, end: Option<&str>) -> CustomBounds {
        CustomBounds {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_one_month_window() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 400);
        let (_, data_max) = dataset.time_span().unwrap();

        let window = resolve_window(RangeSelector::OneMonth, &CustomBounds::default(), &dataset)
            .unwrap()
            .unwrap();
        assert_eq!(window.max, data_max);
        assert_eq!(window.min, data_max - 2_592_000_000);
    }

    #[test]
    fn test_fixed_span_windows() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(), 800);
        let (_, data_max) = dataset.time_span().unwrap();

        for (selector, days) in [
            (RangeSelector::ThreeMonths, 90),
            (RangeSelector::SixMonths, 180),
            (RangeSelector::OneYear, 365),
        ] {
            let window = resolve_window(selector, &CustomBounds::default(), &dataset)
                .unwrap()
                .unwrap();
            assert_eq!(window.min, data_max - days * DAY_MS);
            assert_eq!(window.max, data_max);
        }
    }

    #[test]
    fn test_year_to_date_window() {
        // Data ending 2023-07-15 must open the window at 2023-01-01 UTC.
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap(), 14);
        let window = resolve_window(RangeSelector::YearToDate, &CustomBounds::default(), &dataset)
            .unwrap()
            .unwrap();

        assert_eq!(window.min, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap().timestamp_millis());
        assert_eq!(window.max, Utc.with_ymd_and_hms(2023, 7, 15, 0, 0, 0).unwrap().timestamp_millis());
    }

    #[test]
    fn test_all_window_covers_data_span() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 100);
        let (data_min, data_max) = dataset.time_span().unwrap();

        let window = resolve_window(RangeSelector::All, &CustomBounds::default(), &dataset)
            .unwrap()
            .unwrap();
        assert_eq!(window.min, data_min);
        assert_eq!(window.max, data_max);
    }

    #[test]
    fn test_custom_window_parses_both_bounds() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 100);
        let window = resolve_window(
            RangeSelector::Custom,
            &bounds(Some("2023-02-01"), Some("2023-03-01")),
            &dataset,
        )
        .unwrap()
        .unwrap();

        assert_eq!(window.min, Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap().timestamp_millis());
        assert_eq!(window.max, Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap().timestamp_millis());
    }

    #[test]
    fn test_custom_window_incomplete_bounds_resolve_to_none() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 100);

        for case in [
            bounds(None, None),
            bounds(Some("2023-02-01"), None),
            bounds(None, Some("2023-03-01")),
            bounds(Some("not-a-date"), Some("2023-03-01")),
        ] {
            let resolved = resolve_window(RangeSelector::Custom, &case, &dataset).unwrap();
            assert_eq!(resolved, None);
        }
    }

    #[test]
    fn test_empty_dataset_yields_no_data() {
        let empty = SeriesDataset::new(vec![], vec![]).unwrap();
        let result = resolve_window(RangeSelector::OneYear, &CustomBounds::default(), &empty);
        assert_eq!(result, Err(ChartError::NoData));
    }

    #[test]
    fn test_resolution_is_pure() {
        let dataset = dataset_between(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 200);

        for selector in RangeSelector::all() {
            if selector == RangeSelector::Custom {
                continue;
            }
            let first = resolve_window(selector, &CustomBounds::default(), &dataset).unwrap();
            let second = resolve_window(selector, &CustomBounds::default(), &dataset).unwrap();
            assert_eq!(first, second);
        }
    }
}

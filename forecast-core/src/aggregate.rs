//! 3-hourly samples to daily summaries.
//!
//! Samples are bucketed by the calendar date of their timestamp, the earliest
//! `limit` dates are kept, and each bucket is reduced to a [`DailySummary`].
//! A kept date whose samples all lack a temperature is dropped, so the output
//! can hold fewer than `limit` days even when more dates were observed.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::collections::{BTreeMap, HashMap};

use crate::model::{DailySummary, RawSample};

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Default)]
struct DailyBucket<'a> {
    temperatures: Vec<Option<f64>>,
    descriptions: Vec<&'a str>,
    humidities: Vec<f64>,
    wind_speeds: Vec<f64>,
    conditions: Vec<&'a str>,
}

impl<'a> DailyBucket<'a> {
    fn push(&mut self, sample: &'a RawSample) {
        self.temperatures.push(sample.temperature);
        self.descriptions.push(&sample.description);
        // Missing humidity is left out so it cannot drag the mean toward zero.
        if let Some(humidity) = sample.humidity {
            self.humidities.push(humidity);
        }
        self.wind_speeds.push(sample.wind_speed);
        self.conditions.push(&sample.condition);
    }

    fn reduce(self, date: NaiveDate) -> Option<DailySummary> {
        let temps: Vec<f64> = self.temperatures.into_iter().flatten().collect();
        if temps.is_empty() {
            return None;
        }

        let high = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let low = temps.iter().copied().fold(f64::INFINITY, f64::min);

        Some(DailySummary {
            date,
            temperature_high: round1(high),
            temperature_low: round1(low),
            temperature_avg: round1(mean(&temps)),
            description: most_common(&self.descriptions).unwrap_or(UNKNOWN).to_string(),
            condition: most_common(&self.conditions).unwrap_or(UNKNOWN).to_string(),
            humidity: round1(mean(&self.humidities)),
            wind_speed: round1(mean(&self.wind_speeds)),
        })
    }
}

/// Aggregates samples into at most `limit` daily summaries, using the
/// server's local time zone to decide which day a sample belongs to.
pub fn aggregate(samples: &[RawSample], limit: usize) -> Vec<DailySummary> {
    aggregate_in(samples, limit, &Local)
}

/// Same as [`aggregate`] with an explicit time zone.
pub fn aggregate_in<Tz: TimeZone>(
    samples: &[RawSample],
    limit: usize,
    tz: &Tz,
) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<NaiveDate, DailyBucket<'_>> = BTreeMap::new();

    for sample in samples {
        let Some(date) = local_date(sample.timestamp, tz) else {
            continue;
        };
        buckets.entry(date).or_default().push(sample);
    }

    buckets
        .into_iter()
        .take(limit)
        .filter_map(|(date, bucket)| bucket.reduce(date))
        .collect()
}

fn local_date<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Most frequent value; ties go to whichever value appeared first.
fn most_common<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for &value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut best: Option<(&'a str, usize)> = None;
    for &value in values {
        let count = counts[value];
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Rounds the exact decimal value to one place, ties to even.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const HOUR: i64 = 3600;

    /// 2024-06-01T00:00:00Z
    const DAY0: i64 = 1_717_200_000;

    fn sample(timestamp: i64, temperature: Option<f64>) -> RawSample {
        RawSample {
            timestamp,
            temperature,
            humidity: Some(50.0),
            wind_speed: 5.0,
            description: "clear sky".into(),
            condition: "Clear".into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate_in(&[], 10, &Utc).is_empty());
        assert!(aggregate(&[], 10).is_empty());
    }

    #[test]
    fn three_days_of_eight_samples() {
        let samples: Vec<RawSample> = (0..24)
            .map(|i| sample(DAY0 + i * 3 * HOUR, Some(50.0 + i as f64)))
            .collect();

        let days = aggregate_in(&samples, 10, &Utc);

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, date(2024, 6, 1));
        assert_eq!(days[1].date, date(2024, 6, 2));
        assert_eq!(days[2].date, date(2024, 6, 3));

        assert_eq!((days[0].temperature_low, days[0].temperature_high), (50.0, 57.0));
        assert_eq!((days[1].temperature_low, days[1].temperature_high), (58.0, 65.0));
        assert_eq!((days[2].temperature_low, days[2].temperature_high), (66.0, 73.0));
        assert_eq!(days[0].temperature_avg, 53.5);
        assert_eq!(days[2].humidity, 50.0);
        assert_eq!(days[2].wind_speed, 5.0);
    }

    #[test]
    fn groups_by_local_calendar_date() {
        let midnight = Local
            .with_ymd_and_hms(2024, 6, 10, 0, 0, 0)
            .single()
            .expect("unambiguous local midnight")
            .timestamp();
        let samples: Vec<RawSample> = (0..16)
            .map(|i| sample(midnight + i * 3 * HOUR, Some(60.0 + i as f64)))
            .collect();

        let days = aggregate(&samples, 10);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 6, 10));
        assert_eq!(days[0].temperature_high, 67.0);
        assert_eq!(days[1].date, date(2024, 6, 11));
        assert_eq!(days[1].temperature_low, 68.0);
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let samples = vec![
            sample(DAY0 + 50 * HOUR, Some(70.0)),
            sample(DAY0 + 2 * HOUR, Some(60.0)),
            sample(DAY0 + 26 * HOUR, Some(65.0)),
        ];

        let dates: Vec<NaiveDate> =
            aggregate_in(&samples, 10, &Utc).into_iter().map(|d| d.date).collect();

        assert_eq!(dates, vec![date(2024, 6, 1), date(2024, 6, 2), date(2024, 6, 3)]);
    }

    #[test]
    fn limit_keeps_earliest_dates() {
        let samples: Vec<RawSample> =
            (0..5).rev().map(|d| sample(DAY0 + d * 24 * HOUR + HOUR, Some(60.0))).collect();

        let days = aggregate_in(&samples, 2, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date(2024, 6, 1));
        assert_eq!(days[1].date, date(2024, 6, 2));
    }

    #[test]
    fn date_without_temperatures_is_dropped() {
        let samples = vec![sample(DAY0, None), sample(DAY0 + 3 * HOUR, None)];
        assert!(aggregate_in(&samples, 10, &Utc).is_empty());
    }

    #[test]
    fn dropped_date_still_counts_against_limit() {
        let samples = vec![
            sample(DAY0, None),
            sample(DAY0 + 24 * HOUR, Some(61.0)),
            sample(DAY0 + 48 * HOUR, Some(62.0)),
        ];

        let days = aggregate_in(&samples, 2, &Utc);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date, date(2024, 6, 2));
    }

    #[test]
    fn missing_temperatures_are_ignored_within_a_day() {
        let samples = vec![
            sample(DAY0, Some(40.0)),
            sample(DAY0 + 3 * HOUR, None),
            sample(DAY0 + 6 * HOUR, Some(50.0)),
        ];

        let day = &aggregate_in(&samples, 10, &Utc)[0];

        assert_eq!(day.temperature_avg, 45.0);
        assert_eq!(day.temperature_low, 40.0);
    }

    #[test]
    fn missing_humidity_is_excluded_from_the_mean() {
        let mut dry = sample(DAY0 + 3 * HOUR, Some(60.0));
        dry.humidity = None;
        let mut humid = sample(DAY0, Some(60.0));
        humid.humidity = Some(80.0);

        let day = &aggregate_in(&[humid, dry], 10, &Utc)[0];

        assert_eq!(day.humidity, 80.0);
    }

    #[test]
    fn humidity_defaults_to_zero_when_never_reported() {
        let mut s = sample(DAY0, Some(60.0));
        s.humidity = None;

        assert_eq!(aggregate_in(&[s], 10, &Utc)[0].humidity, 0.0);
    }

    #[test]
    fn averages_are_rounded_to_one_decimal() {
        let mut a = sample(DAY0, Some(60.04));
        a.wind_speed = 3.33;
        a.humidity = Some(71.0);
        let mut b = sample(DAY0 + 3 * HOUR, Some(61.0));
        b.wind_speed = 4.0;
        b.humidity = Some(72.0);
        let mut c = sample(DAY0 + 6 * HOUR, Some(62.0));
        c.wind_speed = 0.0;
        c.humidity = Some(72.0);

        let day = &aggregate_in(&[a, b, c], 10, &Utc)[0];

        assert_eq!(day.temperature_low, 60.0);
        assert_eq!(day.temperature_avg, 61.0);
        assert_eq!(day.humidity, 71.7);
        assert_eq!(day.wind_speed, 2.4);
    }

    #[test]
    fn round1_sends_ties_to_even() {
        assert_eq!(round1(50.25), 50.2);
        assert_eq!(round1(50.35), 50.4);
        assert_eq!(round1(0.35), 0.3);
        assert_eq!(round1(-2.25), -2.2);
        assert_eq!(round1(71.66), 71.7);
    }

    #[test]
    fn humidity_and_wind_ties_round_to_even() {
        let mut a = sample(DAY0, Some(60.0));
        a.humidity = Some(50.0);
        a.wind_speed = 0.35;
        let mut b = sample(DAY0 + 3 * HOUR, Some(60.0));
        b.humidity = Some(50.5);
        b.wind_speed = 0.35;

        let day = &aggregate_in(&[a, b], 10, &Utc)[0];

        assert_eq!(day.humidity, 50.2);
        assert_eq!(day.wind_speed, 0.3);
    }

    #[test]
    fn most_common_description_and_condition_win() {
        let mut rain = sample(DAY0, Some(60.0));
        rain.description = "light rain".into();
        rain.condition = "Rain".into();
        let samples = vec![
            sample(DAY0 + 3 * HOUR, Some(60.0)),
            rain.clone(),
            RawSample { timestamp: DAY0 + 6 * HOUR, ..rain },
        ];

        let day = &aggregate_in(&samples, 10, &Utc)[0];

        assert_eq!(day.description, "light rain");
        assert_eq!(day.condition, "Rain");
    }

    #[test]
    fn ties_go_to_first_seen_value() {
        let mut cloudy = sample(DAY0 + 3 * HOUR, Some(60.0));
        cloudy.description = "overcast clouds".into();
        let samples = vec![cloudy, sample(DAY0 + 6 * HOUR, Some(60.0))];

        let day = &aggregate_in(&samples, 10, &Utc)[0];

        assert_eq!(day.description, "overcast clouds");
    }

    #[test]
    fn empty_descriptions_are_counted() {
        let mut blank = sample(DAY0, Some(60.0));
        blank.description = String::new();
        let samples = vec![blank.clone(), RawSample { timestamp: DAY0 + 3 * HOUR, ..blank }];

        assert_eq!(aggregate_in(&samples, 10, &Utc)[0].description, "");
    }

    #[test]
    fn most_common_of_nothing_is_none() {
        assert_eq!(most_common(&[]), None);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let samples: Vec<RawSample> =
            (0..20).map(|i| sample(DAY0 + i * 5 * HOUR, Some(i as f64))).collect();

        let first = aggregate_in(&samples, 10, &Utc);
        let second = aggregate_in(&samples, 10, &Utc);

        assert_eq!(first, second);
    }
}

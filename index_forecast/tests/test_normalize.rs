mod common;

use common::{business_series, date, noisy_trend};
use index_forecast::calendar::is_business_day;
use index_forecast::{ForecastError, Series, SeriesNormalizer};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_duplicate_dates_keep_later_value() {
    let series = Series::from_pairs(vec![
        (date(2024, 1, 4), 1.0),
        (date(2024, 1, 5), 2.0),
        (date(2024, 1, 4), 3.0),
    ]);

    assert_eq!(series.dates(), vec![date(2024, 1, 4), date(2024, 1, 5)]);
    assert_eq!(series.values(), vec![3.0, 2.0]);
}

#[test]
fn test_unsorted_input_is_sorted() {
    let series = Series::from_pairs(vec![
        (date(2024, 1, 9), 3.0),
        (date(2024, 1, 4), 1.0),
        (date(2024, 1, 5), 2.0),
    ]);
    assert_eq!(series.values(), vec![1.0, 2.0, 3.0]);
    assert_eq!(series.first_date(), Some(date(2024, 1, 4)));
    assert_eq!(series.last_date(), Some(date(2024, 1, 9)));
}

#[test]
fn test_gaps_are_forward_filled() {
    // Thursday, then the following Tuesday
    let series = Series::from_pairs(vec![(date(2024, 1, 4), 10.0), (date(2024, 1, 9), 13.0)]);
    let normalized = SeriesNormalizer::new().normalize(&series).unwrap();

    assert_eq!(
        normalized.dates(),
        vec![
            date(2024, 1, 4),
            date(2024, 1, 5),
            date(2024, 1, 8),
            date(2024, 1, 9)
        ]
    );
    assert_eq!(normalized.values(), vec![10.0, 10.0, 10.0, 13.0]);
}

#[test]
fn test_weekend_observations_are_dropped() {
    let series = Series::from_pairs(vec![
        (date(2024, 1, 5), 1.0),
        (date(2024, 1, 6), 99.0),
        (date(2024, 1, 7), 98.0),
        (date(2024, 1, 8), 2.0),
    ]);
    let normalized = SeriesNormalizer::new().normalize(&series).unwrap();

    assert_eq!(normalized.dates(), vec![date(2024, 1, 5), date(2024, 1, 8)]);
    assert_eq!(normalized.values(), vec![1.0, 2.0]);
}

#[test]
fn test_leading_gap_is_back_filled() {
    // Starts on a Saturday; Monday is missing
    let series = Series::from_pairs(vec![
        (date(2024, 1, 6), 10.0),
        (date(2024, 1, 8), f64::NAN),
        (date(2024, 1, 9), 12.0),
        (date(2024, 1, 10), 11.0),
    ]);
    let normalized = SeriesNormalizer::new().normalize(&series).unwrap();

    assert_eq!(
        normalized.dates(),
        vec![date(2024, 1, 8), date(2024, 1, 9), date(2024, 1, 10)]
    );
    assert_eq!(normalized.values(), vec![12.0, 12.0, 11.0]);
}

#[test]
fn test_normalization_errors() {
    let normalizer = SeriesNormalizer::new();

    let empty = Series::default();
    assert!(matches!(
        normalizer.normalize(&empty),
        Err(ForecastError::Normalization(_))
    ));

    let weekend_only = Series::from_pairs(vec![(date(2024, 1, 6), 1.0), (date(2024, 1, 7), 2.0)]);
    assert!(matches!(
        normalizer.normalize(&weekend_only),
        Err(ForecastError::Normalization(_))
    ));

    let all_missing = Series::from_pairs(vec![
        (date(2024, 1, 4), f64::NAN),
        (date(2024, 1, 5), f64::INFINITY),
    ]);
    assert!(matches!(
        normalizer.normalize(&all_missing),
        Err(ForecastError::Normalization(_))
    ));
}

#[rstest]
#[case(3)]
#[case(17)]
#[case(2024)]
fn test_normalized_output_is_a_gapless_business_day_grid(#[case] seed: u64) {
    let values = noisy_trend(60, seed);
    // Drop every third observation and add weekend noise
    let mut pairs: Vec<_> = business_series(&values)
        .observations()
        .iter()
        .enumerate()
        .filter(|(i, _)| i % 3 != 1)
        .map(|(_, o)| (o.date, o.value))
        .collect();
    pairs.push((date(2024, 1, 13), -1.0));

    let normalized = SeriesNormalizer::new()
        .normalize(&Series::from_pairs(pairs))
        .unwrap();

    let dates = normalized.dates();
    assert!(dates.iter().all(|d| is_business_day(*d)));
    assert!(dates.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(dates.len(), 60);
    assert!(normalized.values().iter().all(|v| v.is_finite()));
    assert!(!normalized.values().contains(&-1.0));
}

//! Evaluation, aggregation, and formatting for catalog metrics.

use serde::Serialize;

use super::catalog::{MetricDefinition, MetricKind, Sample, ValueFormat};
use crate::models::OpportunityMetric;

/// Season-scope aggregate for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub actual_total: f64,
    pub expected_total: f64,
    pub diff: f64,
}

/// One chart point: a week and its actual/expected pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeekPoint {
    pub week: i32,
    pub actual: f64,
    pub expected: f64,
}

/// Evaluate a metric against one normalized player-week.
pub fn evaluate(metric: &MetricDefinition, row: &OpportunityMetric) -> Sample {
    match metric.kind {
        MetricKind::Direct { actual, expected } => Sample {
            actual: actual(row),
            expected: expected(row),
        },
        MetricKind::Calculated { calculator } => calculator(row),
    }
}

/// Aggregate a metric over a set of player-weeks.
///
/// Direct (counting) metrics sum across rows. Calculated rate/share metrics
/// take the arithmetic mean of the per-week samples rather than re-dividing
/// season sums; downstream consumers depend on that exact behavior, so it is
/// preserved as-is. An empty scope yields a zero summary.
pub fn summarize(metric: &MetricDefinition, rows: &[OpportunityMetric]) -> MetricSummary {
    let (actual_total, expected_total): (f64, f64) = match metric.kind {
        MetricKind::Direct { actual, expected } => (
            rows.iter().map(|row| actual(row)).sum(),
            rows.iter().map(|row| expected(row)).sum(),
        ),
        MetricKind::Calculated { calculator } => {
            if rows.is_empty() {
                (0.0, 0.0)
            } else {
                let count = rows.len() as f64;
                let (actual_sum, expected_sum) = rows
                    .iter()
                    .map(|row| calculator(row))
                    .fold((0.0, 0.0), |(a, e), sample| {
                        (a + sample.actual, e + sample.expected)
                    });
                (actual_sum / count, expected_sum / count)
            }
        }
    };

    MetricSummary {
        actual_total,
        expected_total,
        diff: actual_total - expected_total,
    }
}

/// [`summarize`] restricted to an inclusive week window.
pub fn summarize_range(
    metric: &MetricDefinition,
    rows: &[OpportunityMetric],
    week_from: Option<i32>,
    week_to: Option<i32>,
) -> MetricSummary {
    let scoped: Vec<OpportunityMetric> = rows
        .iter()
        .filter(|row| week_from.map_or(true, |from| row.week >= from))
        .filter(|row| week_to.map_or(true, |to| row.week <= to))
        .cloned()
        .collect();
    summarize(metric, &scoped)
}

/// Per-week chart series for one metric, in the rows' order.
pub fn weekly_series(metric: &MetricDefinition, rows: &[OpportunityMetric]) -> Vec<WeekPoint> {
    rows.iter()
        .map(|row| {
            let sample = evaluate(metric, row);
            WeekPoint {
                week: row.week,
                actual: sample.actual,
                expected: sample.expected,
            }
        })
        .collect()
}

/// Render a value with the metric's declared format.
pub fn format_value(metric: &MetricDefinition, value: f64) -> String {
    match metric.format {
        ValueFormat::Percent1 => format!("{:.1}%", value * 100.0),
        ValueFormat::Fixed1 => format!("{:.1}", value),
        ValueFormat::Grouped => format_grouped(value),
    }
}

/// Default formatter: thousands-grouped, at most two decimals, trailing
/// zeros trimmed ("1,234.5", "7", "-0.63").
fn format_grouped(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let mut text = format!("{:.2}", rounded.abs());
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }

    let (integer_part, fraction_part) = match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), Some(fraction.to_string())),
        None => (text, None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = integer_part.chars().collect();
    for (index, digit) in digits.iter().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(fraction) = fraction_part {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

/// Default metric selection for a player page, keyed on position.
pub fn default_metric_ids(position: &str) -> &'static [&'static str] {
    match position.to_uppercase().as_str() {
        "QB" => &[
            "completionRate",
            "yardsPerPass",
            "passingFantasyPoints",
            "totalFantasyPoints",
        ],
        "RB" => &[
            "rushShare",
            "yardsPerRush",
            "rushingFantasyPoints",
            "totalFantasyPoints",
        ],
        "WR" | "TE" => &[
            "targetShare",
            "receptionRate",
            "yardsPerTarget",
            "receivingFantasyPoints",
            "totalFantasyPoints",
        ],
        _ => &["totalFantasyPoints"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::catalog::find_metric;

    fn week(week: i32, receptions: f64, targets: f64) -> OpportunityMetric {
        OpportunityMetric {
            week,
            receptions,
            targets,
            receptions_expected: receptions - 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_evaluate_direct() {
        let metric = find_metric("receptions").unwrap();
        let sample = evaluate(metric, &week(1, 5.0, 8.0));
        assert_eq!(sample.actual, 5.0);
        assert_eq!(sample.expected, 4.0);
    }

    #[test]
    fn test_evaluate_calculated() {
        let metric = find_metric("receptionRate").unwrap();
        let sample = evaluate(metric, &week(1, 6.0, 8.0));
        assert_eq!(sample.actual, 0.75);
        assert_eq!(sample.expected, 0.625);
    }

    #[test]
    fn test_summarize_direct_sums() {
        let metric = find_metric("receptions").unwrap();
        let rows = vec![week(1, 5.0, 8.0), week(2, 3.0, 4.0)];
        let summary = summarize(metric, &rows);
        assert_eq!(summary.actual_total, 8.0);
        assert_eq!(summary.expected_total, 6.0);
        assert_eq!(summary.diff, 2.0);
    }

    #[test]
    fn test_summarize_calculated_averages_weekly_ratios() {
        let metric = find_metric("receptionRate").unwrap();
        // Week 1: 4/8 = 0.5. Week 2: 3/3 = 1.0. Mean = 0.75, not 7/11.
        let rows = vec![week(1, 4.0, 8.0), week(2, 3.0, 3.0)];
        let summary = summarize(metric, &rows);
        assert_eq!(summary.actual_total, 0.75);
        assert!((summary.actual_total - 7.0 / 11.0).abs() > 1e-6);
    }

    #[test]
    fn test_summarize_empty_scope_is_zero() {
        for id in ["receptions", "receptionRate"] {
            let summary = summarize(find_metric(id).unwrap(), &[]);
            assert_eq!(summary, MetricSummary::default());
        }
    }

    #[test]
    fn test_summarize_range_filters_weeks() {
        let metric = find_metric("receptions").unwrap();
        let rows = vec![week(1, 5.0, 8.0), week(2, 3.0, 4.0), week(3, 7.0, 9.0)];
        let summary = summarize_range(metric, &rows, Some(2), Some(3));
        assert_eq!(summary.actual_total, 10.0);

        let open_ended = summarize_range(metric, &rows, Some(2), None);
        assert_eq!(open_ended.actual_total, 10.0);
    }

    #[test]
    fn test_weekly_series_preserves_order() {
        let metric = find_metric("receptionRate").unwrap();
        let rows = vec![week(1, 4.0, 8.0), week(2, 3.0, 3.0)];
        let series = weekly_series(metric, &rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].week, 1);
        assert_eq!(series[0].actual, 0.5);
        assert_eq!(series[1].actual, 1.0);
    }

    #[test]
    fn test_format_percent_and_fixed() {
        let rate = find_metric("receptionRate").unwrap();
        assert_eq!(format_value(rate, 0.625), "62.5%");

        let ypr = find_metric("yardsPerReception").unwrap();
        assert_eq!(format_value(ypr, 8.44), "8.4");
    }

    #[test]
    fn test_format_grouped() {
        let metric = find_metric("totalYards").unwrap();
        assert_eq!(format_value(metric, 1234.5), "1,234.5");
        assert_eq!(format_value(metric, 7.0), "7");
        assert_eq!(format_value(metric, 0.625), "0.63");
        assert_eq!(format_value(metric, -1234.567), "-1,234.57");
        assert_eq!(format_value(metric, 1000000.0), "1,000,000");
    }

    #[test]
    fn test_default_metric_ids_by_position() {
        assert!(default_metric_ids("QB").contains(&"completionRate"));
        assert!(default_metric_ids("rb").contains(&"rushShare"));
        assert!(default_metric_ids("WR").contains(&"targetShare"));
        assert!(default_metric_ids("TE").contains(&"targetShare"));
        assert_eq!(default_metric_ids("K"), &["totalFantasyPoints"]);
        // Every default id must exist in the catalog.
        for position in ["QB", "RB", "WR", "TE", ""] {
            for id in default_metric_ids(position) {
                assert!(find_metric(id).is_some(), "unknown default metric {}", id);
            }
        }
    }
}

//! Static catalog of actual-versus-expected metric definitions.
//!
//! Two kinds of metric exist and are dispatched by pattern match:
//!
//! - [`MetricKind::Direct`] reads an actual/expected field pair straight off
//!   the normalized record.
//! - [`MetricKind::Calculated`] combines several fields through a pure
//!   calculator (rates, per-attempt efficiencies, team shares).
//!
//! Invariant: every calculator guards every division by checking the
//! denominator is greater than zero and yields 0 otherwise, so charts never
//! see NaN or an infinity. Metrics without an expected model (air yards,
//! team shares) report expected equal to actual; their comparison series
//! intentionally overlap.

use serde::Serialize;

use crate::models::OpportunityMetric;

/// An actual/expected value pair for one player-week.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sample {
    pub actual: f64,
    pub expected: f64,
}

/// Grouping used by the metric selector UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetricCategory {
    Receiving,
    Rushing,
    Passing,
    Total,
    Efficiency,
    Usage,
}

impl MetricCategory {
    pub fn label(&self) -> &'static str {
        match self {
            MetricCategory::Receiving => "Receiving",
            MetricCategory::Rushing => "Rushing",
            MetricCategory::Passing => "Passing",
            MetricCategory::Total => "Total",
            MetricCategory::Efficiency => "Efficiency",
            MetricCategory::Usage => "Usage",
        }
    }
}

/// Display formatting a metric declares for its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueFormat {
    /// Value is a ratio; render as a percentage with one decimal ("62.5%").
    Percent1,
    /// Render with a fixed single decimal ("8.4").
    Fixed1,
    /// Locale-grouped default with at most two decimals ("1,234.56").
    Grouped,
}

/// Field accessor into the normalized record.
pub type FieldAccessor = fn(&OpportunityMetric) -> f64;

/// How a metric produces its actual/expected pair.
#[derive(Clone, Copy)]
pub enum MetricKind {
    Direct {
        actual: FieldAccessor,
        expected: FieldAccessor,
    },
    Calculated {
        calculator: fn(&OpportunityMetric) -> Sample,
    },
}

/// One catalog entry.
pub struct MetricDefinition {
    /// Stable identifier used by API clients and saved selections.
    pub id: &'static str,
    pub label: &'static str,
    pub category: MetricCategory,
    pub description: &'static str,
    pub format: ValueFormat,
    pub kind: MetricKind,
}

impl MetricDefinition {
    pub fn is_calculated(&self) -> bool {
        matches!(self.kind, MetricKind::Calculated { .. })
    }
}

/// Look up a metric definition by id.
pub fn find_metric(id: &str) -> Option<&'static MetricDefinition> {
    METRIC_CATALOG.iter().find(|metric| metric.id == id)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// The full metric catalog, in selector display order.
pub static METRIC_CATALOG: [MetricDefinition; 33] = [
    // Receiving
    MetricDefinition {
        id: "receptions",
        label: "Receptions vs Expected",
        category: MetricCategory::Receiving,
        description: "How actual catches compare to expected receptions.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receptions,
            expected: |m| m.receptions_expected,
        },
    },
    MetricDefinition {
        id: "receivingYards",
        label: "Receiving Yards vs Expected",
        category: MetricCategory::Receiving,
        description: "Track yardage over expectation on receptions.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_yards,
            expected: |m| m.receiving_yards_expected,
        },
    },
    MetricDefinition {
        id: "receivingTD",
        label: "Receiving TD vs Expected",
        category: MetricCategory::Receiving,
        description: "Touchdowns scored versus model expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_td,
            expected: |m| m.receiving_td_expected,
        },
    },
    MetricDefinition {
        id: "receivingFirstDowns",
        label: "Receiving 1st Downs vs Expected",
        category: MetricCategory::Receiving,
        description: "Drive-extending plays compared to expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_first_downs,
            expected: |m| m.receiving_first_downs_expected,
        },
    },
    MetricDefinition {
        id: "receivingFantasyPoints",
        label: "Receiving Fantasy Pts vs Expected",
        category: MetricCategory::Receiving,
        description: "Fantasy impact relative to expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_fantasy_points,
            expected: |m| m.receiving_fantasy_points_expected,
        },
    },
    MetricDefinition {
        id: "receivingInterceptions",
        label: "Receiving Interceptions vs Expected",
        category: MetricCategory::Receiving,
        description: "Interceptions thrown when targeting this player.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_interceptions,
            expected: |m| m.receiving_interceptions_expected,
        },
    },
    MetricDefinition {
        id: "receivingTwoPointConv",
        label: "Receiving 2PT Conv vs Expected",
        category: MetricCategory::Receiving,
        description: "Two-point conversions caught vs expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.receiving_two_point_conv,
            expected: |m| m.receiving_two_point_conv_expected,
        },
    },
    // Rushing
    MetricDefinition {
        id: "rushingYards",
        label: "Rushing Yards vs Expected",
        category: MetricCategory::Rushing,
        description: "Ground yardage over expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.rushing_yards,
            expected: |m| m.rushing_yards_expected,
        },
    },
    MetricDefinition {
        id: "rushingTD",
        label: "Rushing TD vs Expected",
        category: MetricCategory::Rushing,
        description: "Rushing scores versus expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.rushing_td,
            expected: |m| m.rushing_td_expected,
        },
    },
    MetricDefinition {
        id: "rushingFirstDowns",
        label: "Rushing 1st Downs vs Expected",
        category: MetricCategory::Rushing,
        description: "Chain-movers compared with expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.rushing_first_downs,
            expected: |m| m.rushing_first_downs_expected,
        },
    },
    MetricDefinition {
        id: "rushingFantasyPoints",
        label: "Rushing Fantasy Pts vs Expected",
        category: MetricCategory::Rushing,
        description: "Rushing fantasy output relative to expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.rushing_fantasy_points,
            expected: |m| m.rushing_fantasy_points_expected,
        },
    },
    MetricDefinition {
        id: "rushingTwoPointConv",
        label: "Rushing 2PT Conv vs Expected",
        category: MetricCategory::Rushing,
        description: "Two-point conversions rushed vs expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.rushing_two_point_conv,
            expected: |m| m.rushing_two_point_conv_expected,
        },
    },
    // Passing
    MetricDefinition {
        id: "passingCompletions",
        label: "Completions vs Expected",
        category: MetricCategory::Passing,
        description: "Pass completions versus expected rate.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_completions,
            expected: |m| m.passing_completions_expected,
        },
    },
    MetricDefinition {
        id: "passingYards",
        label: "Passing Yards vs Expected",
        category: MetricCategory::Passing,
        description: "Air production versus the expected baseline.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_yards,
            expected: |m| m.passing_yards_expected,
        },
    },
    MetricDefinition {
        id: "passingTD",
        label: "Passing TD vs Expected",
        category: MetricCategory::Passing,
        description: "Passing touchdowns relative to model expectations.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_td,
            expected: |m| m.passing_td_expected,
        },
    },
    MetricDefinition {
        id: "passingFirstDowns",
        label: "Passing 1st Downs vs Expected",
        category: MetricCategory::Passing,
        description: "Drive extenders compared with expected quarterback output.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_first_downs,
            expected: |m| m.passing_first_downs_expected,
        },
    },
    MetricDefinition {
        id: "passingFantasyPoints",
        label: "Passing Fantasy Pts vs Expected",
        category: MetricCategory::Passing,
        description: "Passing fantasy totals against expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_fantasy_points,
            expected: |m| m.passing_fantasy_points_expected,
        },
    },
    MetricDefinition {
        id: "passingInterceptions",
        label: "Interceptions vs Expected",
        category: MetricCategory::Passing,
        description: "Interceptions thrown versus expected rate.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_interceptions,
            expected: |m| m.passing_interceptions_expected,
        },
    },
    MetricDefinition {
        id: "passingTwoPointConv",
        label: "Passing 2PT Conv vs Expected",
        category: MetricCategory::Passing,
        description: "Two-point conversions passed vs expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.passing_two_point_conv,
            expected: |m| m.passing_two_point_conv_expected,
        },
    },
    // Totals
    MetricDefinition {
        id: "totalYards",
        label: "Total Yards vs Expected",
        category: MetricCategory::Total,
        description: "All-purpose yardage versus expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.total_yards,
            expected: |m| m.total_yards_expected,
        },
    },
    MetricDefinition {
        id: "totalTD",
        label: "Total TD vs Expected",
        category: MetricCategory::Total,
        description: "Total touchdowns compared to expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.total_td,
            expected: |m| m.total_td_expected,
        },
    },
    MetricDefinition {
        id: "totalFirstDowns",
        label: "Total 1st Downs vs Expected",
        category: MetricCategory::Total,
        description: "All first downs compared to expected.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.total_first_downs,
            expected: |m| m.total_first_downs_expected,
        },
    },
    MetricDefinition {
        id: "totalFantasyPoints",
        label: "Total Fantasy Pts vs Expected",
        category: MetricCategory::Total,
        description: "Aggregate fantasy production versus expectation.",
        format: ValueFormat::Grouped,
        kind: MetricKind::Direct {
            actual: |m| m.total_fantasy_points,
            expected: |m| m.total_fantasy_points_expected,
        },
    },
    // Efficiency (calculated)
    MetricDefinition {
        id: "receptionRate",
        label: "Reception Rate",
        category: MetricCategory::Efficiency,
        description: "Catch rate on targets (actual vs expected based on target quality).",
        format: ValueFormat::Percent1,
        kind: MetricKind::Calculated {
            calculator: |m| Sample {
                actual: ratio(m.receptions, m.targets),
                expected: ratio(m.receptions_expected, m.targets),
            },
        },
    },
    MetricDefinition {
        id: "yardsPerReception",
        label: "Yards per Reception",
        category: MetricCategory::Efficiency,
        description: "Average yards gained per catch (actual vs expected).",
        format: ValueFormat::Fixed1,
        kind: MetricKind::Calculated {
            // Expected side divides by expected receptions, not actual.
            calculator: |m| Sample {
                actual: ratio(m.receiving_yards, m.receptions),
                expected: ratio(m.receiving_yards_expected, m.receptions_expected),
            },
        },
    },
    MetricDefinition {
        id: "yardsPerTarget",
        label: "Yards per Target",
        category: MetricCategory::Efficiency,
        description: "Average yards gained per target (actual vs expected).",
        format: ValueFormat::Fixed1,
        kind: MetricKind::Calculated {
            calculator: |m| Sample {
                actual: ratio(m.receiving_yards, m.targets),
                expected: ratio(m.receiving_yards_expected, m.targets),
            },
        },
    },
    MetricDefinition {
        id: "airYardsPerTarget",
        label: "Air Yards per Target",
        category: MetricCategory::Efficiency,
        description: "Average air yards (depth of target) per target.",
        format: ValueFormat::Fixed1,
        kind: MetricKind::Calculated {
            // No expected model for air yards; both sides read the actual.
            calculator: |m| {
                let per_target = ratio(m.air_yards, m.targets);
                Sample {
                    actual: per_target,
                    expected: per_target,
                }
            },
        },
    },
    MetricDefinition {
        id: "yardsPerRush",
        label: "Yards per Rush",
        category: MetricCategory::Efficiency,
        description: "Average yards gained per rush attempt (actual vs expected).",
        format: ValueFormat::Fixed1,
        kind: MetricKind::Calculated {
            calculator: |m| Sample {
                actual: ratio(m.rushing_yards, m.rushing_attempts),
                expected: ratio(m.rushing_yards_expected, m.rushing_attempts),
            },
        },
    },
    MetricDefinition {
        id: "completionRate",
        label: "Completion Rate",
        category: MetricCategory::Efficiency,
        description: "Pass completion rate (actual vs expected).",
        format: ValueFormat::Percent1,
        kind: MetricKind::Calculated {
            calculator: |m| Sample {
                actual: ratio(m.passing_completions, m.passing_attempts),
                expected: ratio(m.passing_completions_expected, m.passing_attempts),
            },
        },
    },
    MetricDefinition {
        id: "yardsPerPass",
        label: "Yards per Pass Attempt",
        category: MetricCategory::Efficiency,
        description: "Average yards gained per pass attempt (actual vs expected).",
        format: ValueFormat::Fixed1,
        kind: MetricKind::Calculated {
            calculator: |m| Sample {
                actual: ratio(m.passing_yards, m.passing_attempts),
                expected: ratio(m.passing_yards_expected, m.passing_attempts),
            },
        },
    },
    // Usage shares (calculated)
    MetricDefinition {
        id: "targetShare",
        label: "Target Share",
        category: MetricCategory::Usage,
        description: "Percentage of team targets received by this player.",
        format: ValueFormat::Percent1,
        kind: MetricKind::Calculated {
            calculator: |m| {
                let share = ratio(m.targets, m.team_targets);
                Sample {
                    actual: share,
                    expected: share,
                }
            },
        },
    },
    MetricDefinition {
        id: "rushShare",
        label: "Rush Share",
        category: MetricCategory::Usage,
        description: "Percentage of team rush attempts by this player.",
        format: ValueFormat::Percent1,
        kind: MetricKind::Calculated {
            calculator: |m| {
                let share = ratio(m.rushing_attempts, m.team_rush_attempts);
                Sample {
                    actual: share,
                    expected: share,
                }
            },
        },
    },
    MetricDefinition {
        id: "airYardShare",
        label: "Air Yard Share",
        category: MetricCategory::Usage,
        description: "Percentage of team air yards allocated to this player.",
        format: ValueFormat::Percent1,
        kind: MetricKind::Calculated {
            calculator: |m| {
                let share = ratio(m.air_yards, m.team_receiving_air_yards);
                Sample {
                    actual: share,
                    expected: share,
                }
            },
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<&str> = METRIC_CATALOG.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), METRIC_CATALOG.len());
    }

    #[test]
    fn test_find_metric() {
        assert!(find_metric("receptionRate").is_some());
        assert!(find_metric("targetShare").is_some());
        assert!(find_metric("notAMetric").is_none());
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in [
            MetricCategory::Receiving,
            MetricCategory::Rushing,
            MetricCategory::Passing,
            MetricCategory::Total,
            MetricCategory::Efficiency,
            MetricCategory::Usage,
        ] {
            assert!(
                METRIC_CATALOG.iter().any(|m| m.category == category),
                "no metrics in {:?}",
                category
            );
        }
    }

    #[test]
    fn test_calculators_guard_zero_denominators() {
        // All-zero record: every division denominator is zero.
        let empty = OpportunityMetric::default();
        for metric in METRIC_CATALOG.iter() {
            if let MetricKind::Calculated { calculator } = metric.kind {
                let sample = calculator(&empty);
                assert_eq!(sample.actual, 0.0, "{} actual", metric.id);
                assert_eq!(sample.expected, 0.0, "{} expected", metric.id);
            }
        }
    }

    #[test]
    fn test_reception_rate_zero_targets() {
        let row = OpportunityMetric {
            targets: 0.0,
            receptions: 0.0,
            ..Default::default()
        };
        let metric = find_metric("receptionRate").unwrap();
        if let MetricKind::Calculated { calculator } = metric.kind {
            assert_eq!(calculator(&row), Sample::default());
        } else {
            panic!("receptionRate should be calculated");
        }
    }

    #[test]
    fn test_yards_per_reception_uses_expected_denominator() {
        let row = OpportunityMetric {
            receptions: 4.0,
            receptions_expected: 5.0,
            receiving_yards: 48.0,
            receiving_yards_expected: 40.0,
            ..Default::default()
        };
        let metric = find_metric("yardsPerReception").unwrap();
        if let MetricKind::Calculated { calculator } = metric.kind {
            let sample = calculator(&row);
            assert_eq!(sample.actual, 12.0);
            assert_eq!(sample.expected, 8.0);
        }
    }

    #[test]
    fn test_shares_have_no_expected_model() {
        let row = OpportunityMetric {
            targets: 8.0,
            team_targets: 32.0,
            ..Default::default()
        };
        let metric = find_metric("targetShare").unwrap();
        if let MetricKind::Calculated { calculator } = metric.kind {
            let sample = calculator(&row);
            assert_eq!(sample.actual, 0.25);
            assert_eq!(sample.expected, sample.actual);
        }
    }
}

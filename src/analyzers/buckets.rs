//! Fixed-edge binning of schools and re-aggregation by bucket.
//!
//! Bin edges and labels are deliberately constants, not configuration: the
//! report is tied to one dataset shape and the brackets are part of its
//! definition.

use tracing::warn;

use crate::analyzers::types::{BucketSummary, SchoolSummary};
use crate::analyzers::utility::mean;
use crate::loader::SchoolType;

/// Per-student spending brackets, dollars.
pub const SPENDING_EDGES: [f64; 5] = [0.0, 585.0, 615.0, 645.0, 675.0];
pub const SPENDING_LABELS: [&str; 4] = ["<$585", "$585-615", "$615-645", "$645-675"];

/// Enrollment brackets, students.
pub const SIZE_EDGES: [f64; 4] = [0.0, 1000.0, 2000.0, 5000.0];
pub const SIZE_LABELS: [&str; 3] = ["Small (<1000)", "Medium (1000-2000)", "Large (2000-5000)"];

/// Assigns `value` to one of `labels.len()` consecutive half-open intervals
/// `(edges[i], edges[i+1]]`.
///
/// Returns `None` when `value <= edges[0]` or `value > edges[last]`; callers
/// drop such rows from the bucketed summary.
pub fn bucketize<'a>(value: f64, edges: &[f64], labels: &[&'a str]) -> Option<&'a str> {
    debug_assert_eq!(edges.len(), labels.len() + 1);

    for (i, label) in labels.iter().enumerate() {
        if value > edges[i] && value <= edges[i + 1] {
            return Some(label);
        }
    }
    None
}

/// Per-school metrics re-aggregated by spending bracket. Empty brackets are
/// omitted.
pub fn scores_by_spending(summaries: &[SchoolSummary]) -> Vec<BucketSummary> {
    group_by_bucket(summaries, &SPENDING_LABELS, |s| {
        bucketize(s.per_student_budget, &SPENDING_EDGES, &SPENDING_LABELS)
    })
}

/// Per-school metrics re-aggregated by enrollment bracket. Empty brackets
/// are omitted.
pub fn scores_by_size(summaries: &[SchoolSummary]) -> Vec<BucketSummary> {
    group_by_bucket(summaries, &SIZE_LABELS, |s| {
        bucketize(s.total_students as f64, &SIZE_EDGES, &SIZE_LABELS)
    })
}

/// Per-school metrics re-aggregated by school type.
pub fn scores_by_type(summaries: &[SchoolSummary]) -> Vec<BucketSummary> {
    let labels: Vec<&str> = SchoolType::ALL.iter().map(|t| t.label()).collect();
    group_by_bucket(summaries, &labels, |s| Some(s.school_type.label()))
}

/// Averages each metric across member schools, unweighted by enrollment.
/// This is a mean of school means, matching the report's definition, not a
/// student-weighted mean.
fn group_by_bucket<'a>(
    summaries: &[SchoolSummary],
    labels: &[&'a str],
    assign: impl Fn(&SchoolSummary) -> Option<&'a str>,
) -> Vec<BucketSummary> {
    let mut buckets: Vec<BucketSummary> = Vec::new();

    for label in labels.iter().copied() {
        let members: Vec<&SchoolSummary> = summaries
            .iter()
            .filter(|s| assign(s) == Some(label))
            .collect();
        if members.is_empty() {
            continue;
        }

        let metric = |f: fn(&SchoolSummary) -> f64| {
            let values: Vec<f64> = members.iter().map(|s| f(s)).collect();
            mean(&values)
        };

        buckets.push(BucketSummary {
            label: label.to_string(),
            schools: members.len(),
            avg_math_score: metric(|s| s.avg_math_score),
            avg_reading_score: metric(|s| s.avg_reading_score),
            pct_passing_math: metric(|s| s.pct_passing_math),
            pct_passing_reading: metric(|s| s.pct_passing_reading),
            overall_passing_rate: metric(|s| s.overall_passing_rate),
        });
    }

    for summary in summaries {
        if assign(summary).is_none() {
            warn!(
                school = %summary.school_name,
                "School falls outside every bucket, dropped from this summary"
            );
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_bucket_boundaries() {
        assert_eq!(bucketize(585.0, &SPENDING_EDGES, &SPENDING_LABELS), Some("<$585"));
        assert_eq!(bucketize(585.01, &SPENDING_EDGES, &SPENDING_LABELS), Some("$585-615"));
        assert_eq!(bucketize(615.0, &SPENDING_EDGES, &SPENDING_LABELS), Some("$585-615"));
        assert_eq!(bucketize(675.0, &SPENDING_EDGES, &SPENDING_LABELS), Some("$645-675"));
    }

    #[test]
    fn test_values_outside_edges_are_unbucketed() {
        assert_eq!(bucketize(0.0, &SPENDING_EDGES, &SPENDING_LABELS), None);
        assert_eq!(bucketize(-5.0, &SPENDING_EDGES, &SPENDING_LABELS), None);
        assert_eq!(bucketize(675.01, &SPENDING_EDGES, &SPENDING_LABELS), None);
    }

    #[test]
    fn test_size_buckets() {
        assert_eq!(bucketize(999.0, &SIZE_EDGES, &SIZE_LABELS), Some("Small (<1000)"));
        assert_eq!(bucketize(1000.0, &SIZE_EDGES, &SIZE_LABELS), Some("Small (<1000)"));
        assert_eq!(bucketize(1761.0, &SIZE_EDGES, &SIZE_LABELS), Some("Medium (1000-2000)"));
        assert_eq!(bucketize(2917.0, &SIZE_EDGES, &SIZE_LABELS), Some("Large (2000-5000)"));
        assert_eq!(bucketize(5001.0, &SIZE_EDGES, &SIZE_LABELS), None);
    }

    fn summary(name: &str, kind: SchoolType, students: u32, spend: f64, math: f64) -> SchoolSummary {
        SchoolSummary {
            school_name: name.to_string(),
            school_type: kind,
            total_students: students,
            total_budget: spend * students as f64,
            per_student_budget: spend,
            avg_math_score: math,
            avg_reading_score: math,
            pct_passing_math: 80.0,
            pct_passing_reading: 90.0,
            overall_passing_rate: 85.0,
        }
    }

    #[test]
    fn test_scores_by_spending_unweighted_mean() {
        // Both in $585-615 despite very different enrollments
        let rows = vec![
            summary("a", SchoolType::Charter, 100, 600.0, 90.0),
            summary("b", SchoolType::District, 4000, 610.0, 70.0),
        ];

        let buckets = scores_by_spending(&rows);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "$585-615");
        assert_eq!(buckets[0].schools, 2);
        assert_eq!(buckets[0].avg_math_score, 80.0);
        assert_eq!(buckets[0].pct_passing_math, 80.0);
    }

    #[test]
    fn test_scores_by_spending_drops_unbucketed() {
        let rows = vec![
            summary("a", SchoolType::Charter, 100, 600.0, 90.0),
            summary("way-out", SchoolType::Charter, 100, 900.0, 10.0),
        ];

        let buckets = scores_by_spending(&rows);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].schools, 1);
        assert_eq!(buckets[0].avg_math_score, 90.0);
    }

    #[test]
    fn test_scores_by_size_empty_buckets_omitted() {
        let rows = vec![summary("a", SchoolType::Charter, 500, 600.0, 90.0)];

        let buckets = scores_by_size(&rows);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Small (<1000)");
    }

    #[test]
    fn test_scores_by_type_groups_both_variants() {
        let rows = vec![
            summary("a", SchoolType::Charter, 500, 600.0, 90.0),
            summary("b", SchoolType::District, 3000, 650.0, 70.0),
            summary("c", SchoolType::District, 3000, 650.0, 80.0),
        ];

        let buckets = scores_by_type(&rows);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Charter");
        assert_eq!(buckets[0].schools, 1);
        assert_eq!(buckets[1].label, "District");
        assert_eq!(buckets[1].avg_math_score, 75.0);
    }
}

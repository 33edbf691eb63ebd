//! Result row types produced by the aggregation pipeline.
//!
//! All values here are raw numerics; formatting happens only in
//! [`crate::report`], terminally, and is never fed back into any
//! computation.

use serde::Serialize;

use crate::loader::SchoolType;

/// District-wide scalar statistics. Counts are distinct by identifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSummary {
    pub total_schools: usize,
    pub total_students: usize,
    pub total_budget: f64,
    pub avg_math_score: f64,
    pub avg_reading_score: f64,
    pub pct_passing_math: f64,
    pub pct_passing_reading: f64,
    /// Mean of the two passing percentages, not the share passing both.
    pub overall_passing_rate: f64,
}

/// Key metrics for one school.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolSummary {
    pub school_name: String,
    pub school_type: SchoolType,
    pub total_students: u32,
    pub total_budget: f64,
    pub per_student_budget: f64,
    pub avg_math_score: f64,
    pub avg_reading_score: f64,
    pub pct_passing_math: f64,
    pub pct_passing_reading: f64,
    pub overall_passing_rate: f64,
}

/// Mean score per grade level for one school, indexed by
/// [`Grade::index`](crate::loader::Grade::index). `None` marks a grade with
/// no students at that school.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeBreakdown {
    pub school_name: String,
    pub by_grade: [Option<f64>; 4],
}

/// Per-school metrics averaged across the schools sharing one bucket label
/// (spending range, size range, or school type). Unweighted mean of school
/// means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    pub label: String,
    pub schools: usize,
    pub avg_math_score: f64,
    pub avg_reading_score: f64,
    pub pct_passing_math: f64,
    pub pct_passing_reading: f64,
    pub overall_passing_rate: f64,
}

/// Every table of the full report, in render order.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub district: DistrictSummary,
    pub schools: Vec<SchoolSummary>,
    pub top_schools: Vec<SchoolSummary>,
    pub bottom_schools: Vec<SchoolSummary>,
    pub math_by_grade: Vec<GradeBreakdown>,
    pub reading_by_grade: Vec<GradeBreakdown>,
    pub by_spending: Vec<BucketSummary>,
    pub by_size: Vec<BucketSummary>,
    pub by_type: Vec<BucketSummary>,
}

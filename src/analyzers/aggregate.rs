//! District-wide and per-school aggregation over the joined table.

use std::collections::{BTreeMap, HashSet};

use crate::analyzers::types::{DistrictSummary, GradeBreakdown, SchoolSummary};
use crate::analyzers::utility::{mean, pct};
use crate::join::CombinedRecord;
use crate::loader::{SchoolRecord, SchoolType, StudentRecord};

/// Which score column an analysis reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Math,
    Reading,
}

impl Subject {
    pub fn label(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::Reading => "Reading",
        }
    }

    pub fn score_of(self, row: &CombinedRecord) -> f64 {
        match self {
            Subject::Math => row.math_score,
            Subject::Reading => row.reading_score,
        }
    }
}

/// Computes the district-wide summary from the two source tables.
///
/// School and student counts are distinct counts by identifier, so they are
/// unaffected by any row duplication downstream. Total budget sums over the
/// school table, not over joined rows.
pub fn district_summary(schools: &[SchoolRecord], students: &[StudentRecord]) -> DistrictSummary {
    let school_ids: HashSet<u32> = schools.iter().map(|s| s.school_id).collect();
    let student_ids: HashSet<u32> = students.iter().map(|s| s.student_id).collect();

    let total_budget = schools.iter().map(|s| s.budget).sum();

    let math_scores: Vec<f64> = students.iter().map(|s| s.math_score).collect();
    let reading_scores: Vec<f64> = students.iter().map(|s| s.reading_score).collect();

    let passing_math = students
        .iter()
        .filter(|s| s.math_score >= crate::join::PASSING_SCORE)
        .count();
    let passing_reading = students
        .iter()
        .filter(|s| s.reading_score >= crate::join::PASSING_SCORE)
        .count();

    let pct_passing_math = pct(passing_math, students.len());
    let pct_passing_reading = pct(passing_reading, students.len());

    DistrictSummary {
        total_schools: school_ids.len(),
        total_students: student_ids.len(),
        total_budget,
        avg_math_score: mean(&math_scores),
        avg_reading_score: mean(&reading_scores),
        pct_passing_math,
        pct_passing_reading,
        overall_passing_rate: (pct_passing_math + pct_passing_reading) / 2.0,
    }
}

#[derive(Default)]
struct SchoolAcc {
    school_type: Option<SchoolType>,
    size: u32,
    budget: f64,
    students: usize,
    math_sum: f64,
    reading_sum: f64,
    passing_math: usize,
    passing_reading: usize,
}

/// Groups the joined table by school and computes each school's key metrics,
/// one row per school, ordered by school name.
///
/// Schools with no student rows do not appear; the report covers schools
/// with enrolled students only.
pub fn per_school_summary(combined: &[CombinedRecord]) -> Vec<SchoolSummary> {
    let mut groups: BTreeMap<&str, SchoolAcc> = BTreeMap::new();

    for row in combined {
        let acc = groups.entry(row.school_name.as_str()).or_default();
        acc.school_type = Some(row.school_type);
        acc.size = row.size;
        acc.budget = row.budget;
        acc.students += 1;
        acc.math_sum += row.math_score;
        acc.reading_sum += row.reading_score;
        if row.passing_math {
            acc.passing_math += 1;
        }
        if row.passing_reading {
            acc.passing_reading += 1;
        }
    }

    groups
        .into_iter()
        .map(|(name, acc)| {
            let pct_passing_math = pct(acc.passing_math, acc.students);
            let pct_passing_reading = pct(acc.passing_reading, acc.students);
            SchoolSummary {
                school_name: name.to_string(),
                // Group is non-empty, so the type was recorded.
                school_type: acc.school_type.unwrap_or(SchoolType::District),
                total_students: acc.size,
                total_budget: acc.budget,
                per_student_budget: acc.budget / acc.size as f64,
                avg_math_score: acc.math_sum / acc.students as f64,
                avg_reading_score: acc.reading_sum / acc.students as f64,
                pct_passing_math,
                pct_passing_reading,
                overall_passing_rate: (pct_passing_math + pct_passing_reading) / 2.0,
            }
        })
        .collect()
}

/// Mean score per grade level at each school, ordered by school name.
///
/// A school with no students in a grade gets `None` for that cell, never
/// zero.
pub fn scores_by_grade(combined: &[CombinedRecord], subject: Subject) -> Vec<GradeBreakdown> {
    let mut groups: BTreeMap<&str, [(f64, usize); 4]> = BTreeMap::new();

    for row in combined {
        let cells = groups.entry(row.school_name.as_str()).or_default();
        let (sum, count) = &mut cells[row.grade.index()];
        *sum += subject.score_of(row);
        *count += 1;
    }

    groups
        .into_iter()
        .map(|(name, cells)| GradeBreakdown {
            school_name: name.to_string(),
            by_grade: cells.map(|(sum, count)| {
                if count == 0 { None } else { Some(sum / count as f64) }
            }),
        })
        .collect()
}

//! Aggregation pipeline: join the two tables, then derive every table of
//! the report from the combined rows.

pub mod aggregate;
pub mod buckets;
pub mod rank;
pub mod types;
pub mod utility;

use crate::analyzers::aggregate::{Subject, district_summary, per_school_summary, scores_by_grade};
use crate::analyzers::buckets::{scores_by_size, scores_by_spending, scores_by_type};
use crate::analyzers::rank::{RankOrder, top_bottom};
use crate::analyzers::types::Report;
use crate::error::ReportError;
use crate::join::{JoinPolicy, join_students};
use crate::loader::{SchoolRecord, StudentRecord};

/// How many schools the top and bottom performer tables show.
pub const RANKED_SCHOOLS: usize = 5;

/// Runs the full pipeline over the loaded tables and returns every report
/// table. Pure: identical inputs produce an identical report.
pub fn build_report(
    schools: &[SchoolRecord],
    students: &[StudentRecord],
    policy: JoinPolicy,
) -> Result<Report, ReportError> {
    let combined = join_students(schools, students, policy)?;
    let school_summaries = per_school_summary(&combined);

    Ok(Report {
        district: district_summary(schools, students),
        top_schools: top_bottom(&school_summaries, RANKED_SCHOOLS, RankOrder::Descending),
        bottom_schools: top_bottom(&school_summaries, RANKED_SCHOOLS, RankOrder::Ascending),
        math_by_grade: scores_by_grade(&combined, Subject::Math),
        reading_by_grade: scores_by_grade(&combined, Subject::Reading),
        by_spending: scores_by_spending(&school_summaries),
        by_size: scores_by_size(&school_summaries),
        by_type: scores_by_type(&school_summaries),
        schools: school_summaries,
    })
}

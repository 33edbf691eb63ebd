//! Left join of student rows onto their school's attributes.

use std::collections::HashMap;

use tracing::warn;

use crate::error::ReportError;
use crate::loader::{Grade, SchoolRecord, SchoolType, StudentRecord};

/// Passing threshold for both subjects, inclusive.
pub const PASSING_SCORE: f64 = 70.0;

/// What to do with a student row whose `school_name` has no match in the
/// school table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Abort the run. Default, keeps the report reproducible.
    FailFast,
    /// Skip the row and log a warning for each one dropped.
    DropAndWarn,
}

/// One student row annotated with its school's attributes and the derived
/// pass/fail flags.
#[derive(Debug, Clone)]
pub struct CombinedRecord {
    pub student_id: u32,
    pub grade: Grade,
    pub math_score: f64,
    pub reading_score: f64,
    pub passing_math: bool,
    pub passing_reading: bool,

    pub school_name: String,
    pub school_type: SchoolType,
    pub size: u32,
    pub budget: f64,
}

/// Joins each student to its school by name, many-to-one.
///
/// Under [`JoinPolicy::FailFast`] every student row is preserved or the join
/// fails; under [`JoinPolicy::DropAndWarn`] unmatched rows are dropped.
/// Schools with no students contribute no combined rows.
pub fn join_students(
    schools: &[SchoolRecord],
    students: &[StudentRecord],
    policy: JoinPolicy,
) -> Result<Vec<CombinedRecord>, ReportError> {
    let by_name: HashMap<&str, &SchoolRecord> = schools
        .iter()
        .map(|s| (s.school_name.as_str(), s))
        .collect();

    let mut combined = Vec::with_capacity(students.len());

    for student in students {
        let school = match by_name.get(student.school_name.as_str()) {
            Some(school) => *school,
            None => match policy {
                JoinPolicy::FailFast => {
                    return Err(ReportError::UnknownSchool {
                        student: student.student_name.clone(),
                        school: student.school_name.clone(),
                    });
                }
                JoinPolicy::DropAndWarn => {
                    warn!(
                        student = %student.student_name,
                        school = %student.school_name,
                        "Dropping student row with unknown school"
                    );
                    continue;
                }
            },
        };

        combined.push(CombinedRecord {
            student_id: student.student_id,
            grade: student.grade,
            math_score: student.math_score,
            reading_score: student.reading_score,
            passing_math: student.math_score >= PASSING_SCORE,
            passing_reading: student.reading_score >= PASSING_SCORE,
            school_name: school.school_name.clone(),
            school_type: school.school_type,
            size: school.size,
            budget: school.budget,
        });
    }

    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn school(name: &str) -> SchoolRecord {
        SchoolRecord {
            school_id: 0,
            school_name: name.to_string(),
            school_type: SchoolType::District,
            size: 100,
            budget: 60000.0,
        }
    }

    fn student(name: &str, school_name: &str, math: f64, reading: f64) -> StudentRecord {
        StudentRecord {
            student_id: 0,
            student_name: name.to_string(),
            gender: "F".to_string(),
            grade: Grade::Ninth,
            school_name: school_name.to_string(),
            math_score: math,
            reading_score: reading,
        }
    }

    #[test]
    fn test_join_attaches_school_fields() {
        let schools = vec![school("Huang High School")];
        let students = vec![student("Paul", "Huang High School", 80.0, 60.0)];

        let combined = join_students(&schools, &students, JoinPolicy::FailFast).unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].size, 100);
        assert_eq!(combined[0].budget, 60000.0);
        assert!(combined[0].passing_math);
        assert!(!combined[0].passing_reading);
    }

    #[test]
    fn test_passing_threshold_is_inclusive() {
        let schools = vec![school("Huang High School")];
        let students = vec![student("Paul", "Huang High School", 70.0, 69.99)];

        let combined = join_students(&schools, &students, JoinPolicy::FailFast).unwrap();
        assert!(combined[0].passing_math);
        assert!(!combined[0].passing_reading);
    }

    #[test]
    fn test_unknown_school_fails_fast() {
        let schools = vec![school("Huang High School")];
        let students = vec![student("Paul", "Atlantis High School", 80.0, 80.0)];

        let err = join_students(&schools, &students, JoinPolicy::FailFast).unwrap_err();
        assert!(matches!(err, ReportError::UnknownSchool { .. }));
    }

    #[test]
    fn test_unknown_school_drop_and_warn() {
        let schools = vec![school("Huang High School")];
        let students = vec![
            student("Paul", "Atlantis High School", 80.0, 80.0),
            student("Mary", "Huang High School", 90.0, 90.0),
        ];

        let combined = join_students(&schools, &students, JoinPolicy::DropAndWarn).unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].school_name, "Huang High School");
    }

    #[test]
    fn test_join_preserves_every_student_row() {
        let schools = vec![school("A"), school("B")];
        let students: Vec<_> = (0..10)
            .map(|i| student(&format!("s{i}"), if i % 2 == 0 { "A" } else { "B" }, 70.0, 70.0))
            .collect();

        let combined = join_students(&schools, &students, JoinPolicy::FailFast).unwrap();
        assert_eq!(combined.len(), students.len());
    }
}

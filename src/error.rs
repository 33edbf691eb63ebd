//! Error taxonomy for the report pipeline.
//!
//! Every error is fatal to the run; the binary surfaces one message and
//! exits non-zero. There is no partial-result recovery.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Input file missing or unreadable.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV row: missing required column, non-numeric value in a
    /// numeric column, or an unknown categorical value.
    #[error("malformed record in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Enrollment must be positive; the per-student budget divides by it.
    #[error("school {school:?} in {path} has zero enrollment")]
    ZeroEnrollment { path: PathBuf, school: String },

    /// A student row references a school absent from the school table.
    /// Raised under [`JoinPolicy::FailFast`](crate::join::JoinPolicy).
    #[error("student {student:?} references unknown school {school:?}")]
    UnknownSchool { student: String, school: String },
}

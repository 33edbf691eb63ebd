//! CSV loaders for the two input tables.
//!
//! Each loader deserializes the whole file into typed rows up front. Schema
//! checking is limited to the required columns being present and parseable;
//! the one extra validation is a positive-enrollment guard, since every
//! later per-student figure divides by it.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReportError;

/// Two-variant school categorical, as it appears in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchoolType {
    Charter,
    District,
}

impl SchoolType {
    pub const ALL: [SchoolType; 2] = [SchoolType::Charter, SchoolType::District];

    pub fn label(self) -> &'static str {
        match self {
            SchoolType::Charter => "Charter",
            SchoolType::District => "District",
        }
    }
}

/// Four-variant grade-level categorical, as it appears in the `grade` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "9th")]
    Ninth,
    #[serde(rename = "10th")]
    Tenth,
    #[serde(rename = "11th")]
    Eleventh,
    #[serde(rename = "12th")]
    Twelfth,
}

impl Grade {
    /// Grades in display order, also the index order of per-grade arrays.
    pub const ALL: [Grade; 4] = [Grade::Ninth, Grade::Tenth, Grade::Eleventh, Grade::Twelfth];

    pub fn label(self) -> &'static str {
        match self {
            Grade::Ninth => "9th",
            Grade::Tenth => "10th",
            Grade::Eleventh => "11th",
            Grade::Twelfth => "12th",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Grade::Ninth => 0,
            Grade::Tenth => 1,
            Grade::Eleventh => 2,
            Grade::Twelfth => 3,
        }
    }
}

/// One row of the school table.
#[derive(Debug, Clone, Deserialize)]
pub struct SchoolRecord {
    #[serde(rename = "School ID")]
    pub school_id: u32,
    pub school_name: String,
    #[serde(rename = "type")]
    pub school_type: SchoolType,
    pub size: u32,
    pub budget: f64,
}

/// One row of the student table.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Student ID")]
    pub student_id: u32,
    pub student_name: String,
    pub gender: String,
    pub grade: Grade,
    pub school_name: String,
    pub math_score: f64,
    pub reading_score: f64,
}

pub fn load_schools(path: &Path) -> Result<Vec<SchoolRecord>, ReportError> {
    let schools: Vec<SchoolRecord> = read_table(path)?;

    for school in &schools {
        if school.size == 0 {
            return Err(ReportError::ZeroEnrollment {
                path: path.to_path_buf(),
                school: school.school_name.clone(),
            });
        }
    }

    debug!(path = %path.display(), rows = schools.len(), "School table loaded");
    Ok(schools)
}

pub fn load_students(path: &Path) -> Result<Vec<StudentRecord>, ReportError> {
    let students: Vec<StudentRecord> = read_table(path)?;
    debug!(path = %path.display(), rows = students.len(), "Student table loaded");
    Ok(students)
}

fn read_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, ReportError> {
    let file = File::open(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = csv::Reader::from_reader(file);
    let mut rows = Vec::new();

    for result in rdr.deserialize() {
        let record: T = result.map_err(|source| ReportError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record);
    }

    Ok(rows)
}

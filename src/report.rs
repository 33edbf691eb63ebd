//! Terminal rendering of the report tables.
//!
//! Formatting is strictly one-way: it reads the numeric results and writes
//! strings. Nothing here feeds back into aggregation, and no formatted
//! value is ever re-parsed.

use std::io::{self, Write};

use anyhow::Result;

use crate::analyzers::types::{BucketSummary, DistrictSummary, GradeBreakdown, Report, SchoolSummary};
use crate::loader::Grade;

/// Formats a count with thousands separators: `39170` -> `"39,170"`.
pub fn thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Formats a dollar amount: `1910635.0` -> `"$1,910,635.00"`.
pub fn currency(v: f64) -> String {
    let sign = if v < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{frac_part}", group_digits(int_part))
}

/// Two-decimal fixed point, used for scores and percentages.
pub fn fixed2(v: f64) -> String {
    format!("{v:.2}")
}

/// A grade cell with no students renders as a dash, never as zero.
pub fn grade_cell(v: Option<f64>) -> String {
    match v {
        Some(v) => fixed2(v),
        None => "-".to_string(),
    }
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Writes a column-aligned text table: first column left-aligned, the rest
/// right-aligned.
fn write_table(w: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let write_row = |w: &mut dyn Write, cells: &[&str]| -> io::Result<()> {
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                write!(w, "  ")?;
            }
            if i == 0 {
                write!(w, "{cell:<width$}", width = widths[i])?;
            } else {
                write!(w, "{cell:>width$}", width = widths[i])?;
            }
        }
        writeln!(w)
    };

    write_row(w, headers)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        write_row(w, &cells)?;
    }
    Ok(())
}

fn write_section(w: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(w, "\n## {title}\n")
}

fn school_rows(summaries: &[SchoolSummary]) -> Vec<Vec<String>> {
    summaries
        .iter()
        .map(|s| {
            vec![
                s.school_name.clone(),
                s.school_type.label().to_string(),
                thousands(s.total_students as u64),
                currency(s.total_budget),
                currency(s.per_student_budget),
                fixed2(s.avg_math_score),
                fixed2(s.avg_reading_score),
                fixed2(s.pct_passing_math),
                fixed2(s.pct_passing_reading),
                fixed2(s.overall_passing_rate),
            ]
        })
        .collect()
}

const SCHOOL_HEADERS: [&str; 10] = [
    "School Name",
    "Type",
    "Total Students",
    "Total Budget",
    "Per Student Budget",
    "Avg Math",
    "Avg Reading",
    "% Passing Math",
    "% Passing Reading",
    "Overall Passing Rate",
];

fn write_grade_table(w: &mut impl Write, rows: &[GradeBreakdown]) -> io::Result<()> {
    let headers: Vec<&str> = std::iter::once("School Name")
        .chain(Grade::ALL.iter().map(|g| g.label()))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            let mut cells = vec![r.school_name.clone()];
            cells.extend(r.by_grade.iter().map(|c| grade_cell(*c)));
            cells
        })
        .collect();
    write_table(w, &headers, &body)
}

fn write_bucket_table(w: &mut impl Write, label: &str, rows: &[BucketSummary]) -> io::Result<()> {
    let headers = [
        label,
        "Schools",
        "Avg Math",
        "Avg Reading",
        "% Passing Math",
        "% Passing Reading",
        "Overall Passing Rate",
    ];
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                b.schools.to_string(),
                fixed2(b.avg_math_score),
                fixed2(b.avg_reading_score),
                fixed2(b.pct_passing_math),
                fixed2(b.pct_passing_reading),
                fixed2(b.overall_passing_rate),
            ]
        })
        .collect();
    write_table(w, &headers, &body)
}

/// Renders the district summary as a key/value table.
pub fn write_district(w: &mut impl Write, d: &DistrictSummary) -> io::Result<()> {
    let rows = [
        ("Total Schools", thousands(d.total_schools as u64)),
        ("Total Students", thousands(d.total_students as u64)),
        ("Total Budget", currency(d.total_budget)),
        ("Average Math Score", fixed2(d.avg_math_score)),
        ("Average Reading Score", fixed2(d.avg_reading_score)),
        ("% Passing Math", fixed2(d.pct_passing_math)),
        ("% Passing Reading", fixed2(d.pct_passing_reading)),
        ("Overall Passing Rate", fixed2(d.overall_passing_rate)),
    ];

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in rows {
        writeln!(w, "{key:<width$}  {value}")?;
    }
    Ok(())
}

/// Renders every table of the report as plain text.
pub fn write_report(w: &mut impl Write, report: &Report) -> io::Result<()> {
    writeln!(w, "# District Performance Report")?;

    write_section(w, "District Summary")?;
    write_district(w, &report.district)?;

    write_section(w, "School Summary")?;
    write_table(w, &SCHOOL_HEADERS, &school_rows(&report.schools))?;

    write_section(w, "Top Performing Schools (By Passing Rate)")?;
    write_table(w, &SCHOOL_HEADERS, &school_rows(&report.top_schools))?;

    write_section(w, "Bottom Performing Schools (By Passing Rate)")?;
    write_table(w, &SCHOOL_HEADERS, &school_rows(&report.bottom_schools))?;

    write_section(w, "Math Scores by Grade")?;
    write_grade_table(w, &report.math_by_grade)?;

    write_section(w, "Reading Scores by Grade")?;
    write_grade_table(w, &report.reading_by_grade)?;

    write_section(w, "Scores by School Spending (Per Student)")?;
    write_bucket_table(w, "Spending Range", &report.by_spending)?;

    write_section(w, "Scores by School Size")?;
    write_bucket_table(w, "School Size", &report.by_size)?;

    write_section(w, "Scores by School Type")?;
    write_bucket_table(w, "School Type", &report.by_type)?;

    Ok(())
}

/// Writes the unformatted numeric report as pretty-printed JSON.
pub fn write_json(w: &mut impl Write, report: &Report) -> Result<()> {
    writeln!(w, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

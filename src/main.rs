//! CLI entry point for the district report generator.
//!
//! One-shot batch tool: load the two survey CSVs, run the aggregation
//! pipeline, print the formatted tables to stdout. Logs go to stderr so
//! they never mix with the report body.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use district_report::analyzers::aggregate::district_summary;
use district_report::analyzers::build_report;
use district_report::join::JoinPolicy;
use district_report::loader::{load_schools, load_students};
use district_report::report::{write_district, write_json, write_report};
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "district_report")]
#[command(about = "Descriptive statistics over a school district survey", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full report: district, per-school, rankings, grades, brackets
    Report {
        /// Path to the school table CSV
        #[arg(long, default_value = "Resources/schools_complete.csv")]
        schools: PathBuf,

        /// Path to the student table CSV
        #[arg(long, default_value = "Resources/students_complete.csv")]
        students: PathBuf,

        /// Drop (and log) student rows referencing unknown schools instead
        /// of aborting
        #[arg(long, default_value_t = false)]
        drop_unknown_schools: bool,

        /// Emit the unformatted numeric results as JSON instead of tables
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print only the district-wide summary
    District {
        /// Path to the school table CSV
        #[arg(long, default_value = "Resources/schools_complete.csv")]
        schools: PathBuf,

        /// Path to the student table CSV
        #[arg(long, default_value = "Resources/students_complete.csv")]
        students: PathBuf,
    },
}

fn main() -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    tracing_subscriber::registry().with(stderr_layer).init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Report {
            schools,
            students,
            drop_unknown_schools,
            json,
        } => {
            let policy = if drop_unknown_schools {
                JoinPolicy::DropAndWarn
            } else {
                JoinPolicy::FailFast
            };

            let school_table = load_schools(&schools)?;
            let student_table = load_students(&students)?;
            debug!(
                schools = school_table.len(),
                students = student_table.len(),
                "Tables loaded, building report"
            );

            let report = build_report(&school_table, &student_table, policy)?;

            if json {
                write_json(&mut stdout, &report)?;
            } else {
                write_report(&mut stdout, &report)?;
            }
        }
        Commands::District { schools, students } => {
            let school_table = load_schools(&schools)?;
            let student_table = load_students(&students)?;

            let summary = district_summary(&school_table, &student_table);
            write_district(&mut stdout, &summary)?;
        }
    }

    stdout.flush()?;
    Ok(())
}

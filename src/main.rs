// src/main.rs
mod utils;
mod pdf;
mod extractors;
mod aggregate;
mod session;

use aggregate::StudentReport;
use clap::Parser;
use extractors::rows::RowExtractor;
use pdf::client::DocumentSource;
use session::{LoadOutcome, ResultSession};
use utils::AppError;

/// Command Line lookup of student results from a published PDF
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL or file path of the results PDF
    #[arg(short, long)]
    source: String,

    /// Hall ticket number to look up
    #[arg(short = 't', long)]
    hall_ticket: String,

    /// Override the identifier sub-pattern of the row regex
    /// (default matches two digits, "JD", then 4+ alphanumerics)
    #[arg(long)]
    id_pattern: Option<String>,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting lookup for args: {:?}", args);

    // 3. Build the row extractor, honoring a custom identifier shape
    let extractor = match &args.id_pattern {
        Some(pattern) => RowExtractor::with_id_pattern(pattern)?,
        None => RowExtractor::new(),
    };

    // 4. Load the document and extract rows
    let session = ResultSession::new(extractor);
    let source = DocumentSource::parse(&args.source);

    match session.load(&source).await? {
        LoadOutcome::Loaded { rows } => {
            tracing::info!("Document loaded: {} result rows extracted", rows);
            if rows == 0 {
                tracing::warn!("No result rows matched; check the document or --id-pattern");
            }
        }
        LoadOutcome::Skipped => {
            return Err(AppError::Config(
                "Another load is already in progress".to_string(),
            ));
        }
    }
    tracing::debug!(
        "Session status: {:?}, rows held: {}",
        session.status(),
        session.row_count()
    );

    // 5. Query and render
    match session.query(&args.hall_ticket) {
        Ok(report) => {
            if args.json {
                println!("{}", report_json(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            Err(e.into())
        }
    }
}

/// Renders the report as a plain column-aligned table on stdout.
fn print_report(report: &StudentReport) {
    println!("Results for {}: {}", report.student_id, report.status);
    println!();
    println!(
        "{:<10} {:<40} {:>9} {:>7} {:>7}",
        "CODE", "SUBJECT", "INTERNALS", "GRADE", "CREDITS"
    );
    for row in &report.rows {
        println!(
            "{:<10} {:<40} {:>9} {:>7} {:>7}",
            row.subject_code, row.subject_name, row.internal_marks, row.grade, row.credits
        );
    }
    println!();
    println!("Cleared: {}  Failed: {}", report.cleared, report.failed);
    println!("Total credits: {:.1}", report.total_credits);
    println!("GPA: {:.2}", report.gpa);
}

/// Renders the report as pretty JSON with a generation timestamp.
fn report_json(report: &StudentReport) -> Result<String, AppError> {
    let value = serde_json::json!({
        "report": report,
        "generated_at": chrono::Utc::now().to_rfc3339(),
    });
    serde_json::to_string_pretty(&value).map_err(|e| AppError::Serialization(e.to_string()))
}

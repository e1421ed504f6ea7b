//! Output formatting for lookup reports.
//!
//! - [`report`] - the [`Report`] built from one lookup
//! - [`terminal`] - aligned text output with colors

mod report;
mod terminal;

pub use report::Report;
pub use terminal::{format_field, format_report};

use crate::config::OutputFormat;
use std::error::Error;

/// Print a report to stdout in the requested format.
pub fn print_report(report: &Report, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Text => println!("{}", format_report(report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| format!("Error serializing report: {e}"))?;
            println!("{json}");
        }
    }
    Ok(())
}

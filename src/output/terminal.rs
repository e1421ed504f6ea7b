//! Terminal output utilities.
//!
//! Provides formatting helpers for terminal output.

use super::Report;
use colored::Colorize;

/// Width of the label column in [`format_report`].
const LABEL_WIDTH: usize = 10;

/// Format a label as a right-aligned field followed by `": "`.
///
/// # Arguments
/// * `label` - The label to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(label: T, width: usize) -> String {
    let label = label.to_string();
    format!("{label:>width$}: ")
}

/// Render a report as aligned `label: value` lines.
pub fn format_report(report: &Report) -> String {
    let mut lines = vec![format!(
        "{}{}",
        format_field("target", LABEL_WIDTH),
        report.target
    )];

    if let Some(mask) = report.netmask {
        lines.push(format!("{}{mask}", format_field("netmask", LABEL_WIDTH)));
        let validity = match report.valid_mask {
            Some(true) => "valid".green(),
            _ => "non-contiguous".yellow(),
        };
        lines.push(format!(
            "{}/{} ({validity})",
            format_field("cidr", LABEL_WIDTH),
            mask.cidr()
        ));
    }
    if let Some(network) = report.network {
        lines.push(format!("{}{network}", format_field("network", LABEL_WIDTH)));
    }
    if let Some(broadcast) = report.broadcast {
        lines.push(format!(
            "{}{broadcast}",
            format_field("broadcast", LABEL_WIDTH)
        ));
    }

    match (&report.mac, &report.error) {
        (Some(mac), _) => lines.push(format!(
            "{}{}",
            format_field("mac", LABEL_WIDTH),
            mac.to_string().green()
        )),
        (None, Some(error)) => lines.push(format!(
            "{}{}",
            format_field("error", LABEL_WIDTH),
            error.red()
        )),
        (None, None) => {}
    }

    lines.join("\n")
}

//! Terminal output helpers

pub mod spinner;

pub use spinner::{Spinner, with_spinner};

use colored::*;

use crate::domain::Severity;

pub fn success(message: &str) {
    println!("{} {}", "✓".bright_green().bold(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠️".bright_yellow().bold(), message);
}

pub fn failure(message: &str) {
    eprintln!("{} {}", "✗".bright_red().bold(), message.red());
}

/// Created record id, highlighted
pub fn created(kind: &str, id: &str) {
    success(&format!("{} {} created", kind, id.bright_yellow().bold()));
}

pub fn severity(severity: Severity) -> ColoredString {
    match severity {
        Severity::Neutral => severity.as_str().normal(),
        Severity::Warn => severity.as_str().bright_yellow(),
        Severity::Danger => severity.as_str().bright_red().bold(),
    }
}

/// Left-aligned columns sized to their widest cell
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("  {}", "No records".dimmed());
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(value.chars().count());
            }
        }
    }

    let line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    println!(
        "  {}",
        line(headers.iter().map(|h| h.to_string()).collect()).bright_white().bold()
    );
    for row in rows {
        println!("  {}", line(row.clone()));
    }
}

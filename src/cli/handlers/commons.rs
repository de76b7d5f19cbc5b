// src/cli/handlers/commons.rs

use anyhow::Result;
use clap::{Parser, error::ErrorKind};

/// Parses a handler's arguments.
///
/// Returns `Ok(None)` when clap already printed help or version output.
pub fn parse_args<T: Parser>(args: &[String]) -> Result<Option<T>> {
    match T::try_parse_from(args) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Formats rows as left-aligned columns separated by two spaces.
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(header.iter().copied(), &widths));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str), &widths));
    }
    lines
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

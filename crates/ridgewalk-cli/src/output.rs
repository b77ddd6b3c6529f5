//! Output formatting for search reports.

use std::io::{self, Write};

use clap::ValueEnum;
use ridgewalk_lib::{RenderMode, SearchReport};

/// Output format for the search report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Write `report` to `writer` in the requested format.
///
/// With `minimal` set, the explored cells and final frontier are left out.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &SearchReport,
    format: OutputFormat,
    minimal: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            let mode = if minimal {
                RenderMode::Minimal
            } else {
                RenderMode::Full
            };
            writer.write_all(report.render(mode).as_bytes())
        }
        OutputFormat::Json => {
            if minimal {
                serde_json::to_writer_pretty(&mut *writer, &report.minimal())?;
            } else {
                serde_json::to_writer_pretty(&mut *writer, report)?;
            }
            writeln!(writer)
        }
    }
}

/// Print `report` to stdout.
pub fn print_report(report: &SearchReport, format: OutputFormat, minimal: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, report, format, minimal)?;
    handle.flush()
}

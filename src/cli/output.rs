/// Output formatting: text, CSV, JSON and table modes.
use std::io::{self, Write};

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};

use super::args::OutputFormat;
use crate::types::{ErrorOutput, GroupReportOutput};

/// Line printed under a group that has no managers (text mode).
pub const NO_MANAGERS: &str = "No managers for this group";

/// CSV header line.
pub const CSV_HEADER: &str = "group,name,email";

/// Resolve the effective output format, handling the `--csv` shorthand.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, csv_flag: bool) -> OutputFormat {
    if csv_flag { OutputFormat::Csv } else { fmt }
}

/// Output context passed to all formatters.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, csv_flag: bool, no_header: bool) -> Self {
        Self {
            format: resolve_format(fmt, csv_flag),
            no_header,
        }
    }
}

/// Write the full report in the context's format.
///
/// # Errors
///
/// Returns any IO error from `out`.
pub fn write_report<W: Write>(
    reports: &[GroupReportOutput],
    ctx: &OutputCtx,
    out: &mut W,
) -> io::Result<()> {
    match ctx.format {
        OutputFormat::Text => write_text(reports, out),
        OutputFormat::Csv => write_csv(reports, ctx, out),
        OutputFormat::Json => write_json(reports, out),
        OutputFormat::Table => write_table(reports, ctx, out),
    }
}

// --- Text ---

fn write_text<W: Write>(reports: &[GroupReportOutput], out: &mut W) -> io::Result<()> {
    for report in reports {
        writeln!(out, "{}", report.group)?;
        if report.managers.is_empty() {
            writeln!(out, "{NO_MANAGERS}")?;
        }
        for manager in &report.managers {
            writeln!(out, "{}, {}", manager.name, manager.email)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

// --- CSV ---

/// Fields are written as-is; embedded commas are not quoted.
/// Groups without managers produce no rows.
fn write_csv<W: Write>(
    reports: &[GroupReportOutput],
    ctx: &OutputCtx,
    out: &mut W,
) -> io::Result<()> {
    if !ctx.no_header {
        writeln!(out, "{CSV_HEADER}")?;
    }
    for report in reports {
        for manager in &report.managers {
            writeln!(out, "{},{},{}", report.group, manager.name, manager.email)?;
        }
    }
    Ok(())
}

// --- JSON ---

fn write_json<W: Write>(reports: &[GroupReportOutput], out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports).map_err(io::Error::from)?;
    writeln!(out)
}

// --- Table ---

fn write_table<W: Write>(
    reports: &[GroupReportOutput],
    ctx: &OutputCtx,
    out: &mut W,
) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if !ctx.no_header {
        table.set_header(["GROUP", "NAME", "EMAIL"]);
    }
    for report in reports {
        if report.managers.is_empty() {
            table.add_row([report.group.as_str(), "(no managers)", ""]);
        }
        for manager in &report.managers {
            table.add_row([
                report.group.as_str(),
                manager.name.as_str(),
                manager.email.as_str(),
            ]);
        }
    }
    writeln!(out, "{table}")
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

/// Write error output from `op` to stderr exactly as received.
pub fn forward_stderr(raw: &[u8]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = out.write_all(raw);
    let _ = out.flush();
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Visible only with `--debug` or a matching `RUST_LOG`.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
}

impl DebugTimer {
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(phase = self.label, "{ms:.2}ms");
    }
}

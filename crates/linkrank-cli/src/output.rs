//! Output layer: renders a [`ScoreTable`] as text, pretty, or JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag
//! 2. `LINKRANK_FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Text output is tab-delimited with a header row, which is what downstream
//! spreadsheet and `cut`/`sort` pipelines expect. Scores are printed as
//! fixed-point decimals with the configured precision in text and pretty
//! modes; JSON keeps full precision.

use clap::ValueEnum;
use linkrank_core::{ErrorCode, LoadError};
use linkrank_metrics::ScoreTable;
use serde::Serialize;
use std::borrow::Cow;
use std::io::{self, IsTerminal, Write};

/// Environment variable consulted when `--format` is absent.
pub const FORMAT_ENV: &str = "LINKRANK_FORMAT";

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Column-aligned table for humans.
    Pretty,
    /// Tab-delimited rows with a header line.
    Text,
    /// Machine-readable JSON object.
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if let Some(val) = format_env {
        match val.trim().to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value, fall through to TTY detection
        }
    }

    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from the CLI flag, environment, and TTY default.
pub fn resolve_output_mode(format_flag: Option<OutputMode>) -> OutputMode {
    let env_val = std::env::var(FORMAT_ENV).ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, env_val.as_deref(), is_tty)
}

// ────────────────────────────────────────────────────────────────────────────
// Score tables
// ────────────────────────────────────────────────────────────────────────────

/// Render `table` in `mode`. `precision` is digits after the decimal point.
pub fn render_table(
    w: &mut dyn Write,
    table: &ScoreTable,
    mode: OutputMode,
    precision: usize,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Text => render_text(w, table, precision)?,
        OutputMode::Pretty => render_pretty(w, table, precision)?,
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, table)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

/// A label safe for one line of a tab-delimited table.
fn escape_label(label: &str) -> Cow<'_, str> {
    if !label.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(label);
    }
    let mut out = String::with_capacity(label.len() + 2);
    for c in label.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn render_text(w: &mut dyn Write, table: &ScoreTable, precision: usize) -> io::Result<()> {
    writeln!(w, "{}", table.columns.join("\t"))?;
    for row in &table.rows {
        write!(w, "{}", escape_label(&row.label))?;
        for score in &row.scores {
            write!(w, "\t{score:.precision$}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn render_pretty(w: &mut dyn Write, table: &ScoreTable, precision: usize) -> io::Result<()> {
    let labels: Vec<Cow<'_, str>> = table.rows.iter().map(|r| escape_label(&r.label)).collect();
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.scores.iter().map(|s| format!("{s:.precision$}")).collect())
        .collect();

    let label_width = labels
        .iter()
        .map(|label| label.chars().count())
        .chain(table.columns.first().map(|c| c.chars().count()))
        .max()
        .unwrap_or(0);
    let score_widths: Vec<usize> = table
        .columns
        .iter()
        .skip(1)
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .filter_map(|row| row.get(i).map(String::len))
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_label = table.columns.first().map_or("", String::as_str);
    write!(w, "{header_label:<label_width$}")?;
    for (header, width) in table.columns.iter().skip(1).zip(&score_widths) {
        write!(w, "  {header:>width$}")?;
    }
    writeln!(w)?;

    let total = label_width + score_widths.iter().map(|width| width + 2).sum::<usize>();
    writeln!(w, "{:-<total$}", "")?;

    for (label, cells) in labels.iter().zip(&cells) {
        write!(w, "{label:<label_width$}")?;
        for (cell, width) in cells.iter().zip(&score_widths) {
            write!(w, "  {cell:>width$}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A structured error with an error code and optional hint.
#[derive(Debug, Serialize)]
pub struct CliError {
    /// Machine-readable error code (`E####`).
    pub code: String,
    /// Short summary for the error kind.
    pub summary: String,
    /// Full error chain.
    pub message: String,
    /// Load failure kind (`premature-end-of-input`, ...) when the graph was at fault.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code().to_string(),
            summary: code.message().to_string(),
            message: message.into(),
            kind: None,
            hint: code.hint().map(str::to_string),
        }
    }

    /// The error for a graph that failed to load, tagged with its kind.
    pub fn load(err: &LoadError, message: impl Into<String>) -> Self {
        Self {
            kind: Some(err.kind().to_string()),
            ..Self::new(err.code(), message)
        }
    }
}

/// Render an error to `w` in the requested format.
pub fn render_error(w: &mut dyn Write, mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    if mode.is_json() {
        let wrapper = serde_json::json!({ "error": error });
        serde_json::to_writer_pretty(&mut *w, &wrapper)?;
        writeln!(w)?;
    } else {
        writeln!(w, "error[{}]: {}: {}", error.code, error.summary, error.message)?;
        if let Some(kind) = &error.kind {
            writeln!(w, "  kind: {kind}")?;
        }
        if let Some(hint) = &error.hint {
            writeln!(w, "  hint: {hint}")?;
        }
    }
    Ok(())
}

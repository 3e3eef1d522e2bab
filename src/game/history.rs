//! Append-only session history and its line-oriented file format.
//!
//! One entry per line, free text. Computed matches render as
//! `[YYYY-MM-DD HH:MM:SS] First & Second : Label`; re-ingested lines are
//! kept verbatim without structural re-validation, so export followed by
//! import reproduces the exact ordered line sequence.

use chrono::NaiveDateTime;
use std::io::{self, BufRead, Write};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An immutable record of one completed computation or one imported line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryEntry {
    Match {
        recorded_at: NaiveDateTime,
        first: String,
        second: String,
        label: String,
    },
    Imported {
        line: String,
    },
}

impl HistoryEntry {
    pub fn render(&self) -> String {
        match self {
            HistoryEntry::Match {
                recorded_at,
                first,
                second,
                label,
            } => format!(
                "[{}] {} & {} : {}",
                recorded_at.format(TIMESTAMP_FORMAT),
                capitalize(first),
                capitalize(second),
                label
            ),
            HistoryEntry::Imported { line } => line.clone(),
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Serialize entries to a writer, one rendered line per entry.
pub fn write_history<W: Write>(entries: &[HistoryEntry], mut writer: W) -> io::Result<()> {
    for entry in entries {
        writeln!(writer, "{}", entry.render())?;
    }
    Ok(())
}

/// Read a history file back, one verbatim entry per non-empty line.
///
/// The whole reader is consumed before anything is returned; an I/O error
/// midway discards every line read so far rather than handing the caller a
/// partial batch.
pub fn read_history<R: BufRead>(reader: R) -> io::Result<Vec<HistoryEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push(HistoryEntry::Imported {
            line: trimmed.to_string(),
        });
    }
    Ok(entries)
}

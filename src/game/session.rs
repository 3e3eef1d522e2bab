//! Explicit session state: label set, frequency tally, and history.
//!
//! The session replaces the original module-level globals; callers create
//! one at startup and own it for the process lifetime. There is no reset
//! operation short of dropping the session.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use super::engine;
use super::history::{self, HistoryEntry};
use super::labels::{CustomizationError, LabelSet};
use super::normalizer::{self, ValidationError};

/// The result of one completed computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub first: String,
    pub second: String,
    pub count: usize,
    pub label: String,
}

/// Per-label running total in label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

/// Snapshot of the statistics pane: games played and the leading label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub games_played: u64,
    pub most_common: Option<String>,
    pub tally: Vec<LabelCount>,
}

/// Process-lifetime game state, mutated only by successful computations,
/// successful renames, and successful history imports.
#[derive(Debug, Clone)]
pub struct GameSession {
    labels: LabelSet,
    tally: BTreeMap<String, u64>,
    history: Vec<HistoryEntry>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        let labels = LabelSet::default();
        let tally = labels
            .labels()
            .iter()
            .map(|label| (label.clone(), 0))
            .collect();
        Self {
            labels,
            tally,
            history: Vec::new(),
        }
    }

    /// Run one computation stamped with the local clock.
    pub fn compute(&mut self, first: &str, second: &str) -> Result<MatchOutcome, ValidationError> {
        self.compute_at(first, second, Local::now().naive_local())
    }

    /// Run one computation with an explicit timestamp.
    ///
    /// Validation happens up front; once a label is finalized the tally
    /// increment and the history append happen together, so no observer
    /// ever sees one without the other.
    pub fn compute_at(
        &mut self,
        first: &str,
        second: &str,
        recorded_at: NaiveDateTime,
    ) -> Result<MatchOutcome, ValidationError> {
        let pair = normalizer::validate(first, second)?;
        let count = engine::reduce_to_count(&pair.first, &pair.second);
        let label = engine::eliminate(count, self.labels.labels());

        *self.tally.entry(label.clone()).or_insert(0) += 1;
        self.history.push(HistoryEntry::Match {
            recorded_at,
            first: pair.first.clone(),
            second: pair.second.clone(),
            label: label.clone(),
        });

        Ok(MatchOutcome {
            first: pair.first,
            second: pair.second,
            count,
            label,
        })
    }

    /// Rename categories, carrying each accumulated count over to the new
    /// name. A rejected batch leaves both the labels and the tally as they
    /// were.
    pub fn customize_labels(
        &mut self,
        renames: &BTreeMap<String, String>,
    ) -> Result<(), CustomizationError> {
        let applied = self.labels.rename(renames)?;

        // Detach all renamed counts first so label swaps re-key cleanly.
        let moved: Vec<(String, u64)> = applied
            .iter()
            .map(|(old, new)| (new.clone(), self.tally.remove(old).unwrap_or(0)))
            .collect();
        for (label, count) in moved {
            self.tally.insert(label, count);
        }
        Ok(())
    }

    pub fn labels(&self) -> &[String] {
        self.labels.labels()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn stats(&self) -> StatsSnapshot {
        let tally: Vec<LabelCount> = self
            .labels
            .labels()
            .iter()
            .map(|label| LabelCount {
                label: label.clone(),
                count: self.tally.get(label).copied().unwrap_or(0),
            })
            .collect();

        let games_played = tally.iter().map(|entry| entry.count).sum();
        let most_common = if games_played == 0 {
            None
        } else {
            // Ties resolve to the earliest label in elimination order.
            tally
                .iter()
                .fold(None::<&LabelCount>, |best, entry| match best {
                    Some(current) if current.count >= entry.count => Some(current),
                    _ => Some(entry),
                })
                .map(|entry| entry.label.clone())
        };

        StatsSnapshot {
            games_played,
            most_common,
            tally,
        }
    }

    /// Write the current history to a line-oriented text file.
    pub fn export_history<W: Write>(&self, writer: W) -> io::Result<()> {
        history::write_history(&self.history, writer)
    }

    /// Append every non-empty line of a previously exported file.
    ///
    /// The file is read in full before the session changes; a failed read
    /// appends nothing. Returns how many entries were added.
    pub fn import_history<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        let entries = history::read_history(reader)?;
        let added = entries.len();
        self.history.extend(entries);
        Ok(added)
    }
}

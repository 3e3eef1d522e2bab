//! The FLAMES compatibility core: validation, letter cancellation, cyclic
//! elimination, and per-session bookkeeping.

pub mod engine;
pub mod history;
pub mod labels;
pub mod normalizer;
pub mod session;

pub use engine::{eliminate, eliminate_step, reduce_to_count};
pub use history::{read_history, write_history, HistoryEntry};
pub use labels::{CustomizationError, LabelSet, DEFAULT_LABELS, LABEL_COUNT};
pub use normalizer::{validate, ValidatedPair, ValidationError};
pub use session::{GameSession, LabelCount, MatchOutcome, StatsSnapshot};

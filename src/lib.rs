//! FLAMES compatibility engine behind a small service shell.
//!
//! The [`game`] module carries the whole computation: name validation,
//! letter cancellation, cyclic elimination over the six-category label set,
//! and the per-session tally and history. The remaining modules are the
//! service ambient: configuration, telemetry, and the application error
//! surface consumed by the binary.

pub mod config;
pub mod error;
pub mod game;
pub mod telemetry;

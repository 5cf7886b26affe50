//! leads-unifier: merge contact lists exported from different tools.
//!
//! Reads every CSV in an input directory, works out which columns hold the
//! name, email and phone, normalizes those values, and folds records that
//! share an identity (email, else phone, else name) into one. The result is a
//! single `name,email,phone` CSV plus a run summary.
//!
//! # Architecture
//!
//! ```text
//! leads-sources::discover ──► leads-sources::read ──► leads-core::Aggregator
//!                                                          │
//!                              leads-sources::write ◄──────┘
//! ```
//!
//! Processing is sequential and deterministic: files are merged in file-name
//! order, so ties in the merge heuristic always resolve the same way.

pub mod app;
pub mod logging;

pub use app::{run, RunOptions, RunStatus};

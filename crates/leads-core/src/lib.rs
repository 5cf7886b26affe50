//! leads-core: column resolution, normalization and merging of contact lists.
//!
//! This crate holds the pipeline layers as public modules, plus the shared
//! types used across all of them.
//!
//! # Architecture
//!
//! ```text
//! SourceFile ──► Resolver ──► Normalizer ──► Merger
//!      │                                       │
//!      └──────────────── Aggregator ◄──────────┘
//!                            │
//!                            └──► RunOutput (records + RunSummary)
//! ```
//!
//! Everything here is synchronous and free of I/O apart from logging; the
//! caller supplies file contents and receives the merged records back.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod merger;
pub mod normalizer;
pub mod report;
pub mod resolver;
pub mod types;

pub use aggregator::{Aggregator, RunOutput};
pub use error::{FileError, InvalidRecord};
pub use types::{CanonicalFields, Field, IdentityKey, MergedRecord, NormalizedRecord, SourceFile};

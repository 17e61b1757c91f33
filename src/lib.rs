//! # gitrecon
//!
//! Reconnaissance against GitHub's public search API: find users or
//! repositories matching keyword terms, enrich user hits with profile
//! detail, deduplicate repositories by id, and export the results as CSV.
//!
//! ## Architecture
//!
//! Two subsystems carry the interesting work:
//!
//! - `vault::CredentialVault`: the API token encrypted at rest with a
//!   locally generated AES-256-GCM key
//! - `scan`: the paginated multi-keyword search engine, enriching and
//!   deduplicating hits up to a caller-specified cap
//!
//! The `core::traits::SearchApi` seam separates the engine from the
//! GitHub REST client in `providers`, so the engine is tested against a
//! scripted fake.

pub mod cli;
pub mod core;
pub mod export;
pub mod providers;
pub mod scan;
pub mod utils;
pub mod vault;

// Re-export commonly used types
pub use self::core::{
    Config, GitReconError, KeywordStats, RepoRecord, Result, ScanReport, SearchApi, SecretPrompt,
    UserHit, UserRecord,
};

pub use providers::GitHubClient;
pub use scan::{ScanRequest, RESULT_CEILING};
pub use vault::{CredentialVault, TerminalPrompt};

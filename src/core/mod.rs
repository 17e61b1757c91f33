pub mod config;
pub mod error;
pub mod results;
pub mod traits;

pub use config::Config;
pub use error::{GitReconError, Result};
pub use results::{KeywordStats, RepoRecord, ScanReport, UserHit, UserRecord};
pub use traits::{SearchApi, SecretPrompt};

use async_trait::async_trait;
use secrecy::SecretString;

use super::error::Result;
use super::results::{RepoRecord, UserHit, UserRecord};

/// One-page access to the remote search and detail endpoints. The scan
/// engine drives pagination through this seam, which keeps it testable
/// without a network.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Fetch one page of user search results for a keyword.
    /// An empty page signals endpoint exhaustion for that keyword.
    async fn search_users(&self, keyword: &str, page: u32) -> Result<Vec<UserHit>>;

    /// Fetch one page of repository search results, ordered by stars
    /// descending.
    async fn search_repos(&self, keyword: &str, page: u32) -> Result<Vec<RepoRecord>>;

    /// Fetch the full profile for one login.
    async fn user_detail(&self, login: &str) -> Result<UserRecord>;

    /// Items per page (API limitation).
    fn page_size(&self) -> usize {
        100
    }
}

/// Interactive capture of the API token. Injected into the vault so
/// `load_or_request` is testable without a terminal.
#[cfg_attr(test, mockall::automock)]
pub trait SecretPrompt {
    fn request_token(&self) -> Result<SecretString>;
}

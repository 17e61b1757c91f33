use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw user hit from the search endpoint, before enrichment.
/// Only the login and the relevance score survive into the final record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserHit {
    pub login: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Fully enriched user profile, one detail fetch per raw hit.
/// Everything except the login is optional; absent fields export as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "html_url", default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Relevance score carried over from the raw search hit, not the
    /// detail endpoint.
    #[serde(default)]
    pub score: Option<f64>,
}

/// A repository hit. The numeric id is the dedup key across the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Per-keyword counters for one scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordStats {
    pub keyword: String,
    /// Raw hits consumed from the search endpoint (counts toward the cap).
    pub fetched: usize,
    /// Hits that survived enrichment / filtering / dedup.
    pub kept: usize,
    /// Endpoint failure that halted this keyword's page walk, if any.
    pub error: Option<String>,
}

impl KeywordStats {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            fetched: 0,
            kept: 0,
            error: None,
        }
    }
}

/// Summary of a full multi-keyword scan, printed after the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub timestamp: DateTime<Utc>,
    pub keywords: Vec<KeywordStats>,
    /// Detail fetches that failed and were skipped. These hits still
    /// counted toward the cap.
    pub detail_failures: usize,
}

impl Default for ScanReport {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            keywords: Vec::new(),
            detail_failures: 0,
        }
    }
}

impl ScanReport {
    pub fn total_kept(&self) -> usize {
        self.keywords.iter().map(|k| k.kept).sum()
    }

    pub fn failed_keywords(&self) -> impl Iterator<Item = &KeywordStats> {
        self.keywords.iter().filter(|k| k.error.is_some())
    }
}

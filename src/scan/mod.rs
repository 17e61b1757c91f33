//! The paginated search-and-aggregate engine.
//!
//! Keywords are walked in order, one page at a time, until the cap is
//! reached, a page comes back empty, or the endpoint fails for that
//! keyword. Endpoint failures halt only the keyword they hit; results
//! already accumulated are preserved and the run continues.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::core::results::{KeywordStats, RepoRecord, ScanReport, UserRecord};
use crate::core::traits::SearchApi;

/// GitHub's historical hard ceiling on search results per query.
pub const RESULT_CEILING: usize = 1000;

/// A parsed operator request: keyword terms plus the global result cap.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub keywords: Vec<String>,
    pub cap: usize,
}

impl ScanRequest {
    /// Split a comma-separated keyword string, trim terms, drop empties,
    /// and clamp the cap to the platform ceiling.
    pub fn new(raw_keywords: &str, max_results: usize) -> Self {
        let keywords = raw_keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            keywords,
            cap: max_results.min(RESULT_CEILING),
        }
    }
}

/// Walk the user search endpoint for every keyword and enrich each raw
/// hit with one detail fetch. A failed detail fetch is skipped but still
/// consumes a slot of the cap, so a run with many failing lookups cannot
/// over-fetch.
pub async fn scan_users(
    api: &dyn SearchApi,
    request: &ScanRequest,
) -> (Vec<UserRecord>, ScanReport) {
    let mut records: Vec<UserRecord> = Vec::new();
    let mut report = ScanReport::default();
    // Raw hits consumed so far, successful or not. This is what the cap
    // bounds.
    let mut consumed = 0usize;

    for keyword in &request.keywords {
        let mut stats = KeywordStats::new(keyword);
        info!("Searching users for keyword '{}'", keyword);

        let mut page = 1u32;
        loop {
            if consumed >= request.cap {
                break;
            }

            let hits = match api.search_users(keyword, page).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search failed for keyword '{}': {}", keyword, e);
                    stats.error = Some(e.to_string());
                    break;
                }
            };
            if hits.is_empty() {
                debug!("No more user results for '{}'", keyword);
                break;
            }

            for hit in hits {
                if consumed >= request.cap {
                    break;
                }
                consumed += 1;
                stats.fetched += 1;

                match api.user_detail(&hit.login).await {
                    Ok(mut record) => {
                        record.score = hit.score;
                        stats.kept += 1;
                        records.push(record);
                    }
                    Err(e) => {
                        debug!("Skipping user '{}': detail fetch failed: {}", hit.login, e);
                        report.detail_failures += 1;
                    }
                }
            }

            page += 1;
        }

        report.keywords.push(stats);
    }

    records.truncate(request.cap);
    (records, report)
}

/// Walk the repository search endpoint for every keyword. A hit is kept
/// only if the current keyword appears in its name or description
/// (case-insensitive) and its id has not been seen anywhere in this run.
pub async fn scan_repos(
    api: &dyn SearchApi,
    request: &ScanRequest,
) -> (Vec<RepoRecord>, ScanReport) {
    let mut records: Vec<RepoRecord> = Vec::new();
    let mut report = ScanReport::default();
    // Ids already emitted, across all keywords.
    let mut seen: HashSet<u64> = HashSet::new();

    for keyword in &request.keywords {
        let mut stats = KeywordStats::new(keyword);
        let needle = keyword.to_lowercase();
        info!("Searching repositories for keyword '{}'", keyword);

        let mut page = 1u32;
        loop {
            if records.len() >= request.cap {
                break;
            }

            let hits = match api.search_repos(keyword, page).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!("Search failed for keyword '{}': {}", keyword, e);
                    stats.error = Some(e.to_string());
                    break;
                }
            };
            if hits.is_empty() {
                debug!("No more repository results for '{}'", keyword);
                break;
            }

            for repo in hits {
                if records.len() >= request.cap {
                    break;
                }
                stats.fetched += 1;

                if !matches_keyword(&repo, &needle) {
                    continue;
                }
                // Check-then-insert in one step, per candidate.
                if !seen.insert(repo.id) {
                    debug!("Dropping duplicate repository {}", repo.full_name);
                    continue;
                }

                stats.kept += 1;
                records.push(repo);
            }

            page += 1;
        }

        report.keywords.push(stats);
    }

    records.truncate(request.cap);
    (records, report)
}

fn matches_keyword(repo: &RepoRecord, needle: &str) -> bool {
    repo.name.to_lowercase().contains(needle)
        || repo
            .description
            .as_deref()
            .map_or(false, |d| d.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: u64, name: &str, description: Option<&str>) -> RepoRecord {
        RepoRecord {
            id,
            name: name.to_string(),
            full_name: format!("owner/{}", name),
            html_url: format!("https://github.com/owner/{}", name),
            description: description.map(str::to_string),
            stargazers_count: 0,
        }
    }

    #[test]
    fn test_request_splits_and_trims_keywords() {
        let request = ScanRequest::new(" rust , golang ,, osint", 50);
        assert_eq!(request.keywords, vec!["rust", "golang", "osint"]);
        assert_eq!(request.cap, 50);
    }

    #[test]
    fn test_request_clamps_cap_to_ceiling() {
        let request = ScanRequest::new("rust", 5000);
        assert_eq!(request.cap, RESULT_CEILING);
    }

    #[test]
    fn test_request_keeps_zero_cap() {
        let request = ScanRequest::new("rust", 0);
        assert_eq!(request.cap, 0);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert!(matches_keyword(&repo(1, "RustScanner", None), "rust"));
        assert!(matches_keyword(
            &repo(2, "tool", Some("OSINT helpers in Rust")),
            "rust"
        ));
        assert!(!matches_keyword(&repo(3, "tool", Some("go only")), "rust"));
    }

    #[test]
    fn test_keyword_match_handles_missing_description() {
        assert!(!matches_keyword(&repo(4, "tool", None), "rust"));
    }
}

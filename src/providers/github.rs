use crate::core::error::{GitReconError, Result};
use crate::core::results::{RepoRecord, UserHit, UserRecord};
use crate::core::traits::SearchApi;
use crate::utils::{HttpClient, HttpResponse, RateLimiter};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// GitHub's page-size ceiling for search endpoints.
const PER_PAGE: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

/// Bearer-token client for GitHub's search and user endpoints. Each call
/// is one page fetch; pagination lives in the scan engine.
pub struct GitHubClient {
    token: SecretString,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl GitHubClient {
    pub fn new(token: SecretString) -> Self {
        Self::with_config(token, "https://api.github.com".to_string(), 2000)
    }

    pub fn with_config(token: SecretString, base_url: String, rate_limit_ms: u64) -> Self {
        let rate_limiter = RateLimiter::with_delay(Duration::from_millis(rate_limit_ms));

        Self {
            token,
            base_url,
            rate_limiter,
        }
    }

    async fn fetch(&self, url: &str) -> Result<HttpResponse> {
        self.rate_limiter.wait().await;
        debug!("GET {}", url);

        let auth_header = format!("token {}", self.token.expose_secret());
        let url = url.to_string();

        tokio::task::spawn_blocking(move || {
            let client = HttpClient::new();
            client.get(
                &url,
                &[
                    ("Authorization", auth_header.as_str()),
                    ("Accept", "application/vnd.github.v3+json"),
                    ("User-Agent", "gitrecon/0.1"),
                ],
            )
        })
        .await
        .map_err(|e| GitReconError::Unknown(format!("Task join error: {}", e)))?
    }

    fn decode_items<T: serde::de::DeserializeOwned>(response: HttpResponse) -> Result<Vec<T>> {
        if !response.is_success() {
            return Err(GitReconError::Endpoint {
                status: response.status_code,
                body: response.text().unwrap_or_default(),
            });
        }
        let page: SearchPage<T> = response.json()?;
        Ok(page.items)
    }
}

#[async_trait]
impl SearchApi for GitHubClient {
    async fn search_users(&self, keyword: &str, page: u32) -> Result<Vec<UserHit>> {
        let url = format!(
            "{}/search/users?q={}&per_page={}&page={}",
            self.base_url,
            urlencoding::encode(keyword),
            PER_PAGE,
            page
        );
        let response = self.fetch(&url).await?;
        Self::decode_items(response)
    }

    async fn search_repos(&self, keyword: &str, page: u32) -> Result<Vec<RepoRecord>> {
        let url = format!(
            "{}/search/repositories?q={}&sort=stars&order=desc&per_page={}&page={}",
            self.base_url,
            urlencoding::encode(keyword),
            PER_PAGE,
            page
        );
        let response = self.fetch(&url).await?;
        Self::decode_items(response)
    }

    async fn user_detail(&self, login: &str) -> Result<UserRecord> {
        let url = format!("{}/users/{}", self.base_url, urlencoding::encode(login));
        let response = self.fetch(&url).await?;

        if !response.is_success() {
            return Err(GitReconError::Endpoint {
                status: response.status_code,
                body: response.text().unwrap_or_default(),
            });
        }
        response.json()
    }

    fn page_size(&self) -> usize {
        PER_PAGE as usize
    }
}

// URL encoding utility (simple implementation)
mod urlencoding {
    use std::fmt::Write;

    pub fn encode(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
                ' ' => out.push('+'),
                _ => {
                    // Percent-encode every byte of the char's UTF-8 form
                    let mut buf = [0u8; 4];
                    for b in c.encode_utf8(&mut buf).bytes() {
                        let _ = write!(out, "%{:02X}", b);
                    }
                }
            }
        }
        out
    }
}

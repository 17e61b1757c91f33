use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub vault: VaultConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            vault: VaultConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub base_url: String,
    pub rate_limit_delay_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            rate_limit_delay_ms: 2000,
        }
    }
}

/// Where the vault keeps its two files. Both default to the working
/// directory; the key file and the sealed token file are a matched pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    pub key_file: String,
    pub store_file: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            key_file: "gitrecon.key".to_string(),
            store_file: "gitrecon_token.enc".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.github.rate_limit_delay_ms, 2000);
        assert_eq!(config.vault.key_file, "gitrecon.key");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [github]
            rate_limit_delay_ms = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.github.rate_limit_delay_ms, 500);
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.vault.store_file, "gitrecon_token.enc");
    }
}

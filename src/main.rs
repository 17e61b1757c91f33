use clap::Parser;
use gitrecon::cli::{Cli, Commands, OutputFormatter};
use gitrecon::core::{Config, Result};
use gitrecon::providers::GitHubClient;
use gitrecon::scan::{self, ScanRequest, RESULT_CEILING};
use gitrecon::vault::{CredentialVault, TerminalPrompt};
use gitrecon::export;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    OutputFormatter::print_banner();

    if let Err(e) = execute_command(cli.command).await {
        OutputFormatter::print_error(&format!("Error: {}", e));
        std::process::exit(1);
    }
}

async fn execute_command(command: Commands) -> Result<()> {
    let config = load_config()?;
    let vault = CredentialVault::new(&config.vault.key_file, &config.vault.store_file);

    match command {
        Commands::Users {
            keywords,
            max_results,
            output,
        } => {
            let client = authenticated_client(&vault, &config)?;
            let request = build_request(&keywords, max_results);

            let pb = scan_spinner("Searching users...");
            let (records, report) = scan::scan_users(&client, &request).await;
            pb.finish_and_clear();

            let path = export::csv_path(&output);
            export::write_users_csv(&records, &path)?;

            OutputFormatter::print_report(&report);
            OutputFormatter::print_success(&format!(
                "{} users saved to {}",
                records.len(),
                path.display()
            ));
        }
        Commands::Repos {
            keywords,
            max_results,
            output,
        } => {
            let client = authenticated_client(&vault, &config)?;
            let request = build_request(&keywords, max_results);

            let pb = scan_spinner("Searching repositories...");
            let (records, report) = scan::scan_repos(&client, &request).await;
            pb.finish_and_clear();

            let path = export::csv_path(&output);
            export::write_repos_csv(&records, &path)?;

            OutputFormatter::print_report(&report);
            OutputFormatter::print_success(&format!(
                "{} repositories saved to {}",
                records.len(),
                path.display()
            ));
        }
        Commands::Token => {
            vault.reset(&TerminalPrompt)?;
            OutputFormatter::print_success("Token sealed.");
        }
    }

    Ok(())
}

fn authenticated_client(vault: &CredentialVault, config: &Config) -> Result<GitHubClient> {
    let token = vault.load_or_request(&TerminalPrompt)?;
    Ok(GitHubClient::with_config(
        token,
        config.github.base_url.clone(),
        config.github.rate_limit_delay_ms,
    ))
}

fn build_request(keywords: &str, max_results: usize) -> ScanRequest {
    if max_results > RESULT_CEILING {
        OutputFormatter::print_warning(&format!(
            "max-results clamped to the GitHub ceiling of {}",
            RESULT_CEILING
        ));
    }

    let request = ScanRequest::new(keywords, max_results);
    if request.keywords.is_empty() {
        OutputFormatter::print_warning("No keyword terms given; nothing to search");
    }
    request
}

fn scan_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn load_config() -> Result<Config> {
    let config_paths = vec!["config/default.toml", "default.toml", ".gitrecon.toml"];

    for path in config_paths {
        if Path::new(path).exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!("Failed to parse config from {}: {}", path, e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config from {}: {}", path, e);
                }
            }
        }
    }

    Ok(Config::default())
}

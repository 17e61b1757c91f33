use crate::core::results::ScanReport;
use colored::Colorize;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print the startup banner
    pub fn print_banner() {
        println!("{}", "=".repeat(60).bright_cyan());
        println!(
            "{}",
            "  gitrecon - GitHub user & repository reconnaissance"
                .bright_cyan()
                .bold()
        );
        println!("{}", "=".repeat(60).bright_cyan());
        println!();
    }

    /// Print the per-keyword summary after a scan
    pub fn print_report(report: &ScanReport) {
        println!();
        println!("{}", "  Scan Summary".bright_cyan().bold());
        println!("{}", "-".repeat(60).bright_cyan());

        for stats in &report.keywords {
            match &stats.error {
                Some(error) => println!(
                    "  {} {}: {} fetched, {} kept ({})",
                    "✗".bright_red(),
                    stats.keyword.bright_white(),
                    stats.fetched,
                    stats.kept,
                    error.red()
                ),
                None => println!(
                    "  {} {}: {} fetched, {} kept",
                    "✓".green(),
                    stats.keyword.bright_white(),
                    stats.fetched,
                    stats.kept
                ),
            }
        }

        println!(
            "  Total records kept: {}",
            report.total_kept().to_string().bright_white()
        );

        if report.detail_failures > 0 {
            println!(
                "  {} {} profile lookups failed and were skipped",
                "⚠".bright_yellow(),
                report.detail_failures.to_string().bright_yellow()
            );
        }
        println!();
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "✗".bright_red(), message.red());
    }

    /// Print warning message
    pub fn print_warning(message: &str) {
        println!("{} {}", "⚠".bright_yellow(), message.yellow());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }

    /// Print info message
    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ".bright_blue(), message);
    }
}

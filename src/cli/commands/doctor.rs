//! Doctor command - verify credentials, configuration and dataset.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::dataset::read_csv;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Marquee Doctor");
    println!();

    let sections = [
        ("API Configuration", vec![check_api_key(settings)]),
        ("Configuration", vec![check_config_file()]),
        ("Dataset", vec![check_dataset(settings)]),
    ];

    let mut errors = 0;
    let mut warnings = 0;

    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
            match check.status {
                CheckStatus::Error => errors += 1,
                CheckStatus::Warning => warnings += 1,
                CheckStatus::Ok => {}
            }
        }
        println!();
    }

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before asking questions.",
            errors
        ));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Marquee is ready to use.");
    }

    Ok(())
}

/// Check that an API key resolves, and report where it came from.
fn check_api_key(settings: &Settings) -> CheckResult {
    match Credentials::resolve(settings) {
        Ok(credentials) => {
            let key = credentials.api_key();
            let message = format!("configured from {} ({})", credentials.source(), mask_key(key));
            if key.starts_with("sk-") {
                CheckResult::ok("OPENAI_API_KEY", &message)
            } else {
                CheckResult::warning(
                    "OPENAI_API_KEY",
                    &message,
                    "Expected format: sk-... (OpenAI API key)",
                )
            }
        }
        Err(_) => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...' or add it to .env",
        ),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: marquee config edit",
        )
    }
}

/// Check that the dataset exists and parses.
fn check_dataset(settings: &Settings) -> CheckResult {
    let path = settings.csv_path();
    if !path.exists() {
        return CheckResult::error(
            "Movies CSV",
            &format!("{} (not found)", path.display()),
            "Build it with: marquee scrape",
        );
    }

    match read_csv(&path) {
        Ok(records) if records.is_empty() => CheckResult::warning(
            "Movies CSV",
            &format!("{} (no rows)", path.display()),
            "Re-run: marquee scrape",
        ),
        Ok(records) => CheckResult::ok(
            "Movies CSV",
            &format!("{} ({} movies)", path.display(), records.len()),
        ),
        Err(e) => CheckResult::error(
            "Movies CSV",
            &format!("unreadable: {}", e),
            "Re-run: marquee scrape",
        ),
    }
}

/// Show only the first and last few characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

//! Pre-flight checks before expensive operations.
//!
//! Validates that the credential and dataset are available before loading
//! the index, which would otherwise fail after spending embedding calls.

use crate::config::{Credentials, Settings};
use crate::error::{MarqueeError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Scraping needs nothing beyond the network.
    Scrape,
    /// Asking, searching and chatting need the API key and the dataset.
    Query,
}

/// Run pre-flight checks for the given operation.
///
/// Returns the resolved credentials for operations that need them.
pub fn check(operation: Operation, settings: &Settings) -> Result<Option<Credentials>> {
    match operation {
        Operation::Scrape => Ok(None),
        Operation::Query => {
            let credentials = Credentials::resolve(settings)?;
            check_dataset(settings)?;
            Ok(Some(credentials))
        }
    }
}

/// Resolve credentials for a query operation, failing fast.
pub fn require_credentials(settings: &Settings) -> Result<Credentials> {
    check(Operation::Query, settings)?
        .ok_or_else(|| MarqueeError::Config("No credentials resolved".to_string()))
}

/// Check that the dataset file exists.
fn check_dataset(settings: &Settings) -> Result<()> {
    let path = settings.csv_path();
    if path.is_file() {
        Ok(())
    } else {
        Err(MarqueeError::Dataset(format!(
            "{} not found. Build it with: marquee scrape",
            path.display()
        )))
    }
}

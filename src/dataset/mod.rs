//! Movie dataset: typed records, cleaning and CSV persistence.

mod clean;
mod table;

pub use clean::{parse_rating, parse_vote_count, RowCleaner};
pub use table::{read_csv, write_csv, COLUMNS};

use serde::{Deserialize, Serialize};

/// A cleaned movie record.
///
/// Field order matches the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// User rating, 0 to 10.
    pub rating: f64,
    pub vote_count: u64,
    /// Critic score, 0 to 100. `None` when none was published.
    pub meta_score: Option<f64>,
    pub year: i32,
    /// Runtime in minutes.
    pub duration: u32,
    pub age_restriction: String,
    /// Short synopsis.
    pub intro: String,
}

impl MovieRecord {
    /// Format the runtime as "2h 28m".
    pub fn format_duration(&self) -> String {
        let hours = self.duration / 60;
        let minutes = self.duration % 60;

        match (hours, minutes) {
            (0, m) => format!("{}m", m),
            (h, 0) => format!("{}h", h),
            (h, m) => format!("{}h {}m", h, m),
        }
    }
}

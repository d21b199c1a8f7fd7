//! Column cleaning for scraped rows.

use super::MovieRecord;
use crate::error::{MarqueeError, Result};
use crate::scrape::RawMovieRow;
use regex::Regex;
use tracing::{debug, instrument};

/// Turns displayed listing text into typed values.
pub struct RowCleaner {
    digits: Regex,
    duration: Regex,
    rank_prefix: Regex,
}

impl RowCleaner {
    pub fn new() -> Self {
        Self {
            digits: Regex::new(r"\d+").expect("Invalid regex"),
            // "2h 15m", "3h", "45m"
            duration: Regex::new(r"^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?$").expect("Invalid regex"),
            // "12. " ranking prefix
            rank_prefix: Regex::new(r"^(?:\d+\.\s+)+").expect("Invalid regex"),
        }
    }

    /// Clean one raw row into a typed record.
    pub fn clean_row(&self, row: &RawMovieRow) -> Result<MovieRecord> {
        Ok(MovieRecord {
            title: self.strip_rank_prefix(&row.title),
            rating: parse_rating(&row.rating)?,
            vote_count: parse_vote_count(&row.vote_count)?,
            meta_score: self.parse_meta_score(row.meta_score.as_deref()),
            year: self.parse_year(&row.year)?,
            duration: self.parse_duration(&row.duration)?,
            age_restriction: row.age_restriction.trim().to_string(),
            intro: row.intro.trim().to_string(),
        })
    }

    /// Clean every row; the first unparseable value fails the whole table.
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn clean_rows(&self, rows: &[RawMovieRow]) -> Result<Vec<MovieRecord>> {
        let records = rows.iter().map(|row| self.clean_row(row)).collect::<Result<Vec<_>>>()?;
        debug!("Cleaned {} rows", records.len());
        Ok(records)
    }

    /// First run of digits as the release year.
    pub fn parse_year(&self, raw: &str) -> Result<i32> {
        self.first_digits(raw)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| MarqueeError::parse("year", raw))
    }

    /// Runtime in minutes from "<H>h <M>m", either part optional.
    pub fn parse_duration(&self, raw: &str) -> Result<u32> {
        let trimmed = raw.trim();
        let caps = self
            .duration
            .captures(trimmed)
            .ok_or_else(|| MarqueeError::parse("duration", raw))?;

        let part = |i: usize| -> Result<Option<u32>> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>())
                .transpose()
                .map_err(|_| MarqueeError::parse("duration", raw))
        };

        match (part(1)?, part(2)?) {
            (None, None) => Err(MarqueeError::parse("duration", raw)),
            (hours, minutes) => hours
                .unwrap_or(0)
                .checked_mul(60)
                .and_then(|h| h.checked_add(minutes.unwrap_or(0)))
                .ok_or_else(|| MarqueeError::parse("duration", raw)),
        }
    }

    /// Critic score from the first run of digits; no digits means no score.
    pub fn parse_meta_score(&self, raw: Option<&str>) -> Option<f64> {
        raw.and_then(|s| self.first_digits(s))
            .and_then(|digits| digits.parse().ok())
    }

    /// Remove leading "12. " ranking prefixes.
    pub fn strip_rank_prefix(&self, title: &str) -> String {
        self.rank_prefix.replace(title.trim(), "").into_owned()
    }

    fn first_digits<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.digits.find(raw).map(|m| m.as_str())
    }
}

impl Default for RowCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// User rating, 0 to 10.
pub fn parse_rating(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| (0.0..=10.0).contains(r))
        .ok_or_else(|| MarqueeError::parse("rating", raw))
}

/// Vote count from "1.2M", "950K", "(3M)", "12,345" or plain digits.
pub fn parse_vote_count(raw: &str) -> Result<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | ','))
        .collect();

    let err = || MarqueeError::parse("vote_count", raw);

    let (number, multiplier) = match cleaned.chars().last() {
        Some('K' | 'k') => (&cleaned[..cleaned.len() - 1], 1_000u64),
        Some('M' | 'm') => (&cleaned[..cleaned.len() - 1], 1_000_000),
        Some('B' | 'b') => (&cleaned[..cleaned.len() - 1], 1_000_000_000),
        Some(_) => return cleaned.parse::<u64>().map_err(|_| err()),
        None => return Err(err()),
    };

    // Plain decimal mantissa only: no sign, exponent, "inf" or "NaN".
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(err());
    }

    let value: f64 = number.parse().map_err(|_| err())?;
    let total = (value * multiplier as f64).round();
    if total >= u64::MAX as f64 {
        return Err(err());
    }

    Ok(total as u64)
}

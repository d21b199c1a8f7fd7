//! Per-item field extraction.

use super::{Field, ItemElement};
use crate::error::{MarqueeError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One listing entry as displayed, before cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMovieRow {
    pub title: String,
    pub rating: String,
    pub vote_count: String,
    /// `None` when the entry carries no critic score.
    pub meta_score: Option<String>,
    pub year: String,
    pub duration: String,
    pub age_restriction: String,
    pub intro: String,
}

/// Extract a single item. `index` is only used for error reporting.
pub fn extract_row<I: ItemElement + ?Sized>(index: usize, item: &I) -> Result<RawMovieRow> {
    let required = |field: Field| {
        item.field_text(field).ok_or(MarqueeError::MissingField {
            item: index,
            field: field.name(),
        })
    };

    let title = required(Field::Title)?;
    let rating = required(Field::Rating)?;
    let intro = required(Field::Synopsis)?;
    let vote_count = required(Field::VoteCount)?;
    let meta_score = item.field_text(Field::MetaScore);
    let metadata = required(Field::Metadata)?;

    let (year, duration, age_restriction) = split_metadata(index, &metadata)?;

    Ok(RawMovieRow {
        title,
        rating,
        vote_count,
        meta_score,
        year,
        duration,
        age_restriction,
        intro,
    })
}

/// Extract every item, failing the whole batch on the first structural error.
///
/// `on_item` is called after each successfully extracted item.
#[instrument(skip(items, on_item), fields(count = items.len()))]
pub fn extract_rows<I: ItemElement>(
    items: &[I],
    mut on_item: impl FnMut(),
) -> Result<Vec<RawMovieRow>> {
    let rows = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let row = extract_row(i, item)?;
            on_item();
            Ok(row)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Extracted {} rows", rows.len());
    Ok(rows)
}

/// Split the metadata block into exactly year, duration and age restriction.
fn split_metadata(index: usize, metadata: &str) -> Result<(String, String, String)> {
    let parts: Vec<&str> = metadata.split('\n').collect();

    match parts.as_slice() {
        [year, duration, age] => Ok((year.to_string(), duration.to_string(), age.to_string())),
        _ => Err(MarqueeError::MalformedRow {
            item: index,
            reason: format!(
                "expected 3 metadata parts (year, duration, age restriction), found {}: {:?}",
                parts.len(),
                metadata
            ),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeItem(HashMap<Field, String>);

    impl FakeItem {
        fn inception() -> Self {
            Self(HashMap::from([
                (Field::Title, "14. Inception".to_string()),
                (Field::Rating, "8.8".to_string()),
                (Field::Synopsis, "A thief who steals corporate secrets.".to_string()),
                (Field::VoteCount, "(2.5M)".to_string()),
                (Field::MetaScore, "74Metascore".to_string()),
                (Field::Metadata, "2010\n2h 28m\nPG-13".to_string()),
            ]))
        }

        fn without(mut self, field: Field) -> Self {
            self.0.remove(&field);
            self
        }

        fn with(mut self, field: Field, value: &str) -> Self {
            self.0.insert(field, value.to_string());
            self
        }
    }

    impl ItemElement for FakeItem {
        fn field_text(&self, field: Field) -> Option<String> {
            self.0.get(&field).cloned()
        }
    }

    #[test]
    fn test_extract_full_item() {
        let row = extract_row(0, &FakeItem::inception()).unwrap();

        assert_eq!(row.title, "14. Inception");
        assert_eq!(row.rating, "8.8");
        assert_eq!(row.vote_count, "(2.5M)");
        assert_eq!(row.meta_score.as_deref(), Some("74Metascore"));
        assert_eq!(row.year, "2010");
        assert_eq!(row.duration, "2h 28m");
        assert_eq!(row.age_restriction, "PG-13");
        assert_eq!(row.intro, "A thief who steals corporate secrets.");
    }

    #[test]
    fn test_missing_meta_score_is_absent_not_error() {
        let row = extract_row(0, &FakeItem::inception().without(Field::MetaScore)).unwrap();
        assert!(row.meta_score.is_none());
    }

    #[test]
    fn test_missing_required_field_fails_batch() {
        let items = vec![FakeItem::inception(), FakeItem::inception().without(Field::Rating)];

        let mut extracted = 0;
        let err = extract_rows(&items, || extracted += 1).unwrap_err();
        assert!(matches!(
            err,
            MarqueeError::MissingField { item: 1, field: "rating" }
        ));
        assert_eq!(extracted, 1);
    }

    #[test]
    fn test_extract_rows_reports_each_item() {
        let items = vec![FakeItem::inception(), FakeItem::inception()];

        let mut extracted = 0;
        let rows = extract_rows(&items, || extracted += 1).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(extracted, 2);
    }

    #[test]
    fn test_metadata_with_wrong_part_count_is_malformed() {
        let item = FakeItem::inception().with(Field::Metadata, "2010\n2h 28m");
        let err = extract_row(3, &item).unwrap_err();
        assert!(matches!(err, MarqueeError::MalformedRow { item: 3, .. }));

        let item = FakeItem::inception().with(Field::Metadata, "2010\n2h 28m\nPG-13\nextra");
        assert!(extract_row(0, &item).is_err());
    }
}

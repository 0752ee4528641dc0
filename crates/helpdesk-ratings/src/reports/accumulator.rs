use super::domain::{RatingCategory, RatingRow, ReportError};

/// Per-category running aggregate with one slot per [`RatingCategory`].
///
/// The slot type varies with the report being built: an integer sum for the
/// totals record, a list of (value, weight) pairs for detail buckets. A
/// bucketer owns exactly one accumulator per open bucket and discards it when
/// the bucket closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryAccumulator<T> {
    pub spelling: T,
    pub grammar: T,
    pub gdpr: T,
    pub randomness: T,
}

impl<T> CategoryAccumulator<T> {
    pub fn slot(&self, category: RatingCategory) -> &T {
        match category {
            RatingCategory::Spelling => &self.spelling,
            RatingCategory::Grammar => &self.grammar,
            RatingCategory::Gdpr => &self.gdpr,
            RatingCategory::Randomness => &self.randomness,
        }
    }

    pub fn slot_mut(&mut self, category: RatingCategory) -> &mut T {
        match category {
            RatingCategory::Spelling => &mut self.spelling,
            RatingCategory::Grammar => &mut self.grammar,
            RatingCategory::Gdpr => &mut self.gdpr,
            RatingCategory::Randomness => &mut self.randomness,
        }
    }

    /// Fold one row into the slot named by `row.category`. An unrecognized
    /// category aborts the whole report; there are no partial results.
    pub fn update(
        &mut self,
        row: &RatingRow,
        apply: impl FnOnce(&mut T, &RatingRow),
    ) -> Result<(), ReportError> {
        let category = RatingCategory::parse(&row.category)?;
        apply(self.slot_mut(category), row);
        Ok(())
    }

    /// Close the accumulator into a new one by transforming every slot,
    /// e.g. a list of pairs into a single score.
    pub fn map<U>(self, mut transform: impl FnMut(T) -> U) -> CategoryAccumulator<U> {
        CategoryAccumulator {
            spelling: transform(self.spelling),
            grammar: transform(self.grammar),
            gdpr: transform(self.gdpr),
            randomness: transform(self.randomness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(category: &str, value: i32) -> RatingRow {
        RatingRow {
            day: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
            category: category.to_string(),
            value,
            weight: 1.0,
            total: 1,
        }
    }

    #[test]
    fn update_routes_rows_to_the_matching_slot() {
        let mut sums = CategoryAccumulator::<i64>::default();
        sums.update(&row("Grammar", 4), |slot, row| *slot += i64::from(row.value))
            .expect("known category");
        sums.update(&row("GDPR", 2), |slot, row| *slot += i64::from(row.value))
            .expect("known category");
        sums.update(&row("Grammar", 1), |slot, row| *slot += i64::from(row.value))
            .expect("known category");

        assert_eq!(sums.grammar, 5);
        assert_eq!(sums.gdpr, 2);
        assert_eq!(sums.spelling, 0);
        assert_eq!(sums.randomness, 0);
    }

    #[test]
    fn update_fails_on_unknown_category() {
        let mut sums = CategoryAccumulator::<i64>::default();
        let result = sums.update(&row("Punctuality", 3), |slot, row| {
            *slot += i64::from(row.value)
        });
        assert!(matches!(
            result,
            Err(ReportError::UnknownCategory { name }) if name == "Punctuality"
        ));
    }

    #[test]
    fn map_transforms_every_slot() {
        let lists = CategoryAccumulator::<Vec<i32>> {
            spelling: vec![1, 2],
            grammar: vec![3],
            gdpr: Vec::new(),
            randomness: vec![4, 5, 6],
        };
        let lengths = lists.map(|values| values.len());
        assert_eq!(lengths.spelling, 2);
        assert_eq!(lengths.grammar, 1);
        assert_eq!(lengths.gdpr, 0);
        assert_eq!(lengths.randomness, 3);
    }
}

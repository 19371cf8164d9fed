use std::collections::{hash_map::Entry, HashMap};

use crate::{
    coercion::CoercedValue,
    results::{Issue, RuleKind},
    rules::UniqueKey,
    utils::hasher::Xxh3Builder,
    validator::ExecutableColumn,
};

type FirstSeen = HashMap<UniqueKey, usize, Xxh3Builder>;

/// First-occurrence tracking for `unique` columns, scoped to one run.
///
/// The first row holding a value is the reference; every later row with the
/// same value gets a `unique` issue naming it. Nulls are never tracked.
pub struct UniquenessTracker<'a> {
    columns: &'a [ExecutableColumn],
    // One map per column position, left empty for columns without unicity
    seen: Vec<FirstSeen>,
}

impl<'a> UniquenessTracker<'a> {
    pub fn new(columns: &'a [ExecutableColumn]) -> Self {
        Self {
            columns,
            seen: columns
                .iter()
                .map(|_| HashMap::with_hasher(Xxh3Builder))
                .collect(),
        }
    }

    /// Record `value` at `row_index`, returning the issue when it was seen
    /// before.
    pub fn observe(
        &mut self,
        column_index: usize,
        row_index: usize,
        value: &CoercedValue,
    ) -> Option<Issue> {
        let columns = self.columns;
        let column = columns.get(column_index)?;
        let check = column.unicity_check()?;
        let key = check.key(value)?;
        let seen = self.seen.get_mut(column_index)?;

        match seen.entry(key) {
            Entry::Occupied(entry) => {
                let violation = check.violation(value, *entry.get());
                Some(Issue::new(
                    row_index,
                    column.get_name(),
                    RuleKind::Unique,
                    violation.value,
                    violation.message,
                ))
            }
            Entry::Vacant(entry) => {
                entry.insert(row_index);
                None
            }
        }
    }

    /// Row where `value` first appeared in the column, if it did.
    pub fn first_seen(&self, column_index: usize, value: &CoercedValue) -> Option<usize> {
        let check = self.columns.get(column_index)?.unicity_check()?;
        let key = check.key(value)?;
        self.seen.get(column_index)?.get(&key).copied()
    }

    /// Number of distinct values tracked for a column.
    pub fn distinct_count(&self, column_index: usize) -> usize {
        self.seen.get(column_index).map_or(0, HashMap::len)
    }
}

type RowsByKey = HashMap<UniqueKey, Vec<(usize, CoercedValue)>, Xxh3Builder>;

/// Every occurrence of tracked values within one partition.
///
/// Partitions are merged by a reduction; duplicates are derived once all
/// rows are known, so a value's first row is the smallest row index across
/// the whole dataset.
pub(crate) struct Occurrences {
    columns: Vec<RowsByKey>,
}

impl Occurrences {
    pub fn new(column_count: usize) -> Self {
        Self {
            columns: (0..column_count)
                .map(|_| HashMap::with_hasher(Xxh3Builder))
                .collect(),
        }
    }

    pub fn record(
        &mut self,
        column: &ExecutableColumn,
        column_index: usize,
        row_index: usize,
        value: &CoercedValue,
    ) {
        let Some(check) = column.unicity_check() else {
            return;
        };
        let Some(key) = check.key(value) else {
            return;
        };
        if let Some(rows) = self.columns.get_mut(column_index) {
            rows.entry(key).or_default().push((row_index, value.clone()));
        }
    }

    /// Fold `other` into `self`. `other` must hold later rows.
    pub fn merge(mut self, other: Occurrences) -> Self {
        for (mine, theirs) in self.columns.iter_mut().zip(other.columns) {
            for (key, rows) in theirs {
                mine.entry(key).or_default().extend(rows);
            }
        }
        self
    }

    /// Duplicate issues keyed by `(row_index, column_index)`, sorted.
    pub fn into_duplicates(self, columns: &[ExecutableColumn]) -> Vec<(usize, usize, Issue)> {
        let mut duplicates = Vec::new();
        for (column_index, (column, rows_by_key)) in columns.iter().zip(self.columns).enumerate() {
            let Some(check) = column.unicity_check() else {
                continue;
            };
            for (_, mut rows) in rows_by_key {
                if rows.len() < 2 {
                    continue;
                }
                rows.sort_unstable_by_key(|(row, _)| *row);
                let first_row = rows[0].0;
                for (row_index, value) in rows.into_iter().skip(1) {
                    let violation = check.violation(&value, first_row);
                    duplicates.push((
                        row_index,
                        column_index,
                        Issue::new(
                            row_index,
                            column.get_name(),
                            RuleKind::Unique,
                            violation.value,
                            violation.message,
                        ),
                    ));
                }
            }
        }
        duplicates.sort_unstable_by_key(|(row, col, _)| (*row, *col));
        duplicates
    }
}

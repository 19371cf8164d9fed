use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    coercion::TypeCoercer,
    engine::unicity_tracker::{Occurrences, UniquenessTracker},
    results::Issue,
    validator::ExecutableColumn,
    RawRecord,
};

/// ValidationEngine - runs compiled columns over an ordered record set.
///
/// Independent of where records come from. Issues are ordered by row, then
/// column order, then the fixed rule order, with a column's `unique` issue
/// right after its other issues.
pub struct ValidationEngine<'a> {
    columns: &'a [ExecutableColumn],
    coercer: &'a TypeCoercer,
}

/// Cell issues of one partition, tagged with their column position, and the
/// partition's tracked values.
struct PartitionResult {
    issues: Vec<(usize, Issue)>,
    occurrences: Occurrences,
}

impl PartitionResult {
    fn new(column_count: usize) -> Self {
        Self {
            issues: Vec::new(),
            occurrences: Occurrences::new(column_count),
        }
    }

    /// `other` covers the rows right after `self`.
    fn merge(mut self, other: PartitionResult) -> Self {
        self.issues.extend(other.issues);
        self.occurrences = self.occurrences.merge(other.occurrences);
        self
    }
}

impl<'a> ValidationEngine<'a> {
    pub fn new(columns: &'a [ExecutableColumn], coercer: &'a TypeCoercer) -> Self {
        Self { columns, coercer }
    }

    /// Validate every record in a single sequential pass.
    pub fn validate_records(&self, records: &[RawRecord]) -> Vec<Issue> {
        let mut tracker = UniquenessTracker::new(self.columns);
        let mut issues = Vec::new();

        for (row_index, record) in records.iter().enumerate() {
            for (column_index, column) in self.columns.iter().enumerate() {
                let raw = record.get(column.get_name());
                let value = column.coerce(self.coercer, raw);
                column.evaluate(row_index, raw, &value, &mut issues);
                if let Some(issue) = tracker.observe(column_index, row_index, &value) {
                    issues.push(issue);
                }
            }
        }

        info!(
            rows = records.len(),
            columns = self.columns.len(),
            issues = issues.len(),
            "validated records"
        );
        issues
    }

    /// Validate contiguous partitions of `partition_size` rows in parallel.
    ///
    /// Each partition collects its cell issues and the rows of every tracked
    /// value. Partition results are merged by a reduction, duplicates are
    /// derived from the merged occurrences, and the result is identical to
    /// [`ValidationEngine::validate_records`].
    pub fn validate_partitioned(&self, records: &[RawRecord], partition_size: usize) -> Vec<Issue> {
        let partition_size = partition_size.max(1);
        let column_count = self.columns.len();

        let merged = records
            .par_chunks(partition_size)
            .enumerate()
            .map(|(partition, chunk)| {
                let offset = partition * partition_size;
                let result = self.validate_partition(offset, chunk);
                debug!(
                    partition,
                    rows = chunk.len(),
                    issues = result.issues.len(),
                    "validated partition"
                );
                result
            })
            .reduce(|| PartitionResult::new(column_count), PartitionResult::merge);

        let duplicates = merged.occurrences.into_duplicates(self.columns);
        let issues = interleave(merged.issues, duplicates);

        info!(
            rows = records.len(),
            columns = column_count,
            partition_size,
            issues = issues.len(),
            "validated records in partitions"
        );
        issues
    }

    fn validate_partition(&self, offset: usize, records: &[RawRecord]) -> PartitionResult {
        let mut result = PartitionResult::new(self.columns.len());
        let mut cell_issues = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let row_index = offset + i;
            for (column_index, column) in self.columns.iter().enumerate() {
                let raw = record.get(column.get_name());
                let value = column.coerce(self.coercer, raw);
                column.evaluate(row_index, raw, &value, &mut cell_issues);
                result
                    .issues
                    .extend(cell_issues.drain(..).map(|issue| (column_index, issue)));
                result
                    .occurrences
                    .record(column, column_index, row_index, &value);
            }
        }
        result
    }
}

/// Merge ordered cell issues with ordered duplicate issues.
///
/// A duplicate at `(row, column)` goes after every cell issue of that cell
/// and before anything later.
fn interleave(
    cell_issues: Vec<(usize, Issue)>,
    duplicates: Vec<(usize, usize, Issue)>,
) -> Vec<Issue> {
    let mut issues = Vec::with_capacity(cell_issues.len() + duplicates.len());
    let mut cells = cell_issues.into_iter().peekable();

    for (row, column, duplicate) in duplicates {
        while let Some((_, issue)) = cells.next_if(|(column_index, issue)| {
            (issue.row_index(), *column_index) <= (row, column)
        }) {
            issues.push(issue);
        }
        issues.push(duplicate);
    }
    issues.extend(cells.map(|(_, issue)| issue));
    issues
}

use crate::coercion::{NullCanonicalizer, TypeCoercer};

/// Engine tuning for one table.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    null_tokens: Vec<String>,
    partition_size: usize,
    parallel: bool,
    parallel_threshold: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            null_tokens: Vec::new(),
            partition_size: 64 * 1024,
            parallel: true,
            parallel_threshold: 256 * 1024,
        }
    }
}

impl ValidationConfig {
    /// Whether a dataset of `row_count` rows goes through the partitioned
    /// path.
    pub fn should_partition(&self, row_count: usize) -> bool {
        self.parallel && row_count >= self.parallel_threshold
    }

    /// Rows per partition on the partitioned path, at least 1.
    pub fn partition_size(&self) -> usize {
        self.partition_size
    }

    /// Null tokens added on top of the defaults.
    pub fn null_tokens(&self) -> &[String] {
        &self.null_tokens
    }

    pub fn coercer(&self) -> TypeCoercer {
        TypeCoercer::new(NullCanonicalizer::with_tokens(&self.null_tokens))
    }
}

pub struct ValidationConfigBuilder {
    null_tokens: Vec<String>,
    partition_size: usize,
    parallel: bool,
    parallel_threshold: usize,
}

impl Default for ValidationConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationConfigBuilder {
    /// Create a new [`ValidationConfigBuilder`]
    pub fn new() -> Self {
        let config = ValidationConfig::default();
        Self {
            null_tokens: config.null_tokens,
            partition_size: config.partition_size,
            parallel: config.parallel,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Build a [`ValidationConfig`]
    pub fn build(self) -> ValidationConfig {
        ValidationConfig {
            null_tokens: self.null_tokens,
            partition_size: self.partition_size.max(1),
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }

    pub fn with_null_tokens<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            null_tokens: tokens.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_partition_size(self, partition_size: usize) -> Self {
        Self {
            partition_size,
            ..self
        }
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self { parallel, ..self }
    }

    pub fn with_parallel_threshold(self, threshold: usize) -> Self {
        Self {
            parallel_threshold: threshold,
            ..self
        }
    }
}

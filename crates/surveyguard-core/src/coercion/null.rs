use crate::RawValue;

/// Tokens read as "no data", compared trimmed and case-insensitively.
/// The empty string is always null and is not listed.
pub const DEFAULT_NULL_TOKENS: [&str; 3] = ["na", "n/a", "null"];

/// Recognizes null-equivalent raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct NullCanonicalizer {
    tokens: Vec<String>,
}

impl Default for NullCanonicalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NullCanonicalizer {
    pub fn new() -> Self {
        Self {
            tokens: DEFAULT_NULL_TOKENS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Default tokens plus `extra` ones (e.g. `"-"`, `"missing"`).
    pub fn with_tokens<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonicalizer = Self::new();
        for token in extra {
            let token = token.as_ref().trim().to_lowercase();
            if !token.is_empty() && !canonicalizer.tokens.contains(&token) {
                canonicalizer.tokens.push(token);
            }
        }
        canonicalizer
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Empty, whitespace only, or one of the null tokens.
    pub fn is_null_token(&self, value: &str) -> bool {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return true;
        }
        let lowered = trimmed.to_lowercase();
        self.tokens.iter().any(|t| *t == lowered)
    }

    /// An absent cell and the explicit null marker are null too.
    pub fn is_null(&self, raw: Option<&RawValue>) -> bool {
        match raw {
            None | Some(RawValue::Null) => true,
            Some(RawValue::Text(s)) => self.is_null_token(s),
        }
    }
}

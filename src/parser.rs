use rayon::prelude::*;

use crate::error::Result;

/// Build the full case-insensitive regex string for a rule pattern.
pub(crate) fn full_pattern(pattern: &str) -> String {
    format!("(?i)(?:{})", pattern)
}

/// Helper: compile a rule regex with the case-insensitive flag using
/// fancy_regex (rule files may use lookaround).
pub(crate) fn compile_regex(pattern: &str) -> Result<fancy_regex::Regex> {
    Ok(fancy_regex::Regex::new(&full_pattern(pattern))?)
}

/// A compiled entry: one fancy_regex rule plus its associated data.
pub(crate) struct CompiledEntry<T> {
    pub regex: fancy_regex::Regex,
    pub data: T,
}

/// Result of a successful match.
pub(crate) struct MatchResult<'a, T> {
    pub data: &'a T,
    pub captures: fancy_regex::Captures<'a>,
}

/// Ordered rule list; the first entry whose regex matches wins.
pub(crate) struct CompiledParser<T> {
    entries: Vec<CompiledEntry<T>>,
}

impl<T> CompiledParser<T> {
    /// Build a CompiledParser from an iterator of (regex_pattern, data) pairs.
    /// Patterns are compiled in parallel; file order is preserved.
    pub fn build(items: impl IntoIterator<Item = (String, T)>) -> Result<Self>
    where
        T: Send,
    {
        let items: Vec<(String, T)> = items.into_iter().collect();
        let entries = items
            .into_par_iter()
            .map(|(pattern, data)| {
                Ok(CompiledEntry {
                    regex: compile_regex(&pattern)?,
                    data,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Find the first matching entry (preserving original order).
    ///
    /// A regex that errors at match time (backtrack limit) counts as a miss.
    pub fn match_first<'a>(&'a self, ua: &'a str) -> Option<MatchResult<'a, T>> {
        self.entries.iter().find_map(|entry| match entry.regex.captures(ua) {
            Ok(Some(captures)) => Some(MatchResult {
                data: &entry.data,
                captures,
            }),
            _ => None,
        })
    }
}

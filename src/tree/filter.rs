//! Name-based ignore rules

use std::collections::HashSet;
use std::ffi::OsStr;

/// Exact-basename ignore set.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter(HashSet<String>);

impl IgnoreFilter {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Check if an entry with this basename should be skipped with its subtree.
    pub fn is_ignored(&self, name: &OsStr) -> bool {
        name.to_str().is_some_and(|n| self.0.contains(n))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

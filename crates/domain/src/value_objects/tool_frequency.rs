//! Persisted tool usage counters

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SelectedToolSet;

/// How often each tool has been part of a submitted selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolFrequencyMap {
    counts: HashMap<String, u64>,
}

impl ToolFrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded count for a tool name (0 when never seen)
    pub fn count(&self, tool: &str) -> u64 {
        self.counts.get(tool).copied().unwrap_or(0)
    }

    /// Increment the count of every tool in one submitted selection
    pub fn record(&mut self, selection: &SelectedToolSet) {
        for tool in selection.iter() {
            let entry = self.counts.entry(tool.as_str().to_string()).or_insert(0);
            *entry = entry.saturating_add(1);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Iterate over `(tool, count)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, u64)> for ToolFrequencyMap {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

//! The user's current tool selection

use serde::{Deserialize, Serialize};

use super::CookingTool;

/// Ordered, case-insensitively unique set of selected cooking tools
///
/// Insertion order is the order presented to the user and the order used
/// when the selection is serialized into a suggestion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedToolSet {
    tools: Vec<CookingTool>,
}

impl SelectedToolSet {
    /// Create an empty selection
    pub const fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Parse a comma-joined tool list, skipping blanks and duplicates
    pub fn from_joined(joined: &str) -> Self {
        let mut set = Self::new();
        for part in joined.split(',') {
            if let Ok(tool) = CookingTool::new(part) {
                set.insert(tool);
            }
        }
        set
    }

    /// Add a tool; returns `false` if an equal name (ignoring case) is present
    pub fn insert(&mut self, tool: CookingTool) -> bool {
        if self.contains(tool.as_str()) {
            return false;
        }
        self.tools.push(tool);
        true
    }

    /// Remove a tool by name (ignoring case); returns whether it was present
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tools.len();
        self.tools.retain(|t| !t.same_as(name));
        self.tools.len() != before
    }

    /// Add the tool if absent, remove it if present; returns the new membership
    pub fn toggle(&mut self, tool: CookingTool) -> bool {
        if self.remove(tool.as_str()) {
            false
        } else {
            self.tools.push(tool);
            true
        }
    }

    /// Check membership by name (ignoring case)
    pub fn contains(&self, name: &str) -> bool {
        self.tools.iter().any(|t| t.same_as(name))
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn clear(&mut self) {
        self.tools.clear();
    }

    /// Iterate in presentation order
    pub fn iter(&self) -> impl Iterator<Item = &CookingTool> {
        self.tools.iter()
    }

    /// Tool names in presentation order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.as_str().to_string()).collect()
    }

    /// Comma-joined form sent to the suggestion provider
    pub fn to_joined(&self) -> String {
        self.tools
            .iter()
            .map(CookingTool::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<CookingTool> for SelectedToolSet {
    fn from_iter<I: IntoIterator<Item = CookingTool>>(iter: I) -> Self {
        let mut set = Self::new();
        for tool in iter {
            set.insert(tool);
        }
        set
    }
}

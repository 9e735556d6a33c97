//! Fixed tool vocabulary and its frequency ranking

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::{CookingTool, ToolFrequencyMap};
use crate::errors::DomainError;

const DEFAULT_VOCABULARY: [&str; 10] = [
    "Kompor",
    "Panci",
    "Wajan",
    "Teflon",
    "Rice Cooker",
    "Microwave",
    "Oven",
    "Air Fryer",
    "Blender",
    "Kukusan",
];

/// Hard-coded sequence of selectable tools
///
/// The declaration order is the tie-breaker when ranking by frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PredefinedToolSet {
    tools: Vec<CookingTool>,
}

impl PredefinedToolSet {
    /// Build a vocabulary; blank and duplicate names are rejected
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tools: Vec<CookingTool> = Vec::new();
        for name in names {
            let tool = CookingTool::new(name.as_ref())?;
            if tools.iter().any(|t| t.same_as(tool.as_str())) {
                return Err(DomainError::ValidationError(format!(
                    "duplicate tool in vocabulary: {tool}"
                )));
            }
            tools.push(tool);
        }
        if tools.is_empty() {
            return Err(DomainError::NoCookingTools);
        }
        Ok(Self { tools })
    }

    /// Tools in their fixed declaration order
    pub fn tools(&self) -> &[CookingTool] {
        &self.tools
    }

    /// Look up the canonical vocabulary entry for a name (ignoring case)
    pub fn find(&self, name: &str) -> Option<&CookingTool> {
        self.tools.iter().find(|t| t.same_as(name))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Display order: descending by recorded count, ties in declaration order
    pub fn ranked(&self, frequencies: &ToolFrequencyMap) -> Vec<CookingTool> {
        let mut ranked = self.tools.clone();
        // sort_by_key is stable
        ranked.sort_by_key(|tool| Reverse(frequencies.count(tool.as_str())));
        ranked
    }
}

impl Default for PredefinedToolSet {
    fn default() -> Self {
        Self {
            tools: DEFAULT_VOCABULARY
                .iter()
                .filter_map(|name| CookingTool::new(name).ok())
                .collect(),
        }
    }
}

impl TryFrom<Vec<String>> for PredefinedToolSet {
    type Error = DomainError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PredefinedToolSet> for Vec<String> {
    fn from(value: PredefinedToolSet) -> Self {
        value.tools.into_iter().map(String::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelectedToolSet;

    fn names(tools: &[CookingTool]) -> Vec<&str> {
        tools.iter().map(CookingTool::as_str).collect()
    }

    #[test]
    fn default_vocabulary_order() {
        let set = PredefinedToolSet::default();
        assert_eq!(set.len(), 10);
        assert_eq!(set.tools()[0].as_str(), "Kompor");
        assert_eq!(set.tools()[1].as_str(), "Panci");
    }

    #[test]
    fn ranking_without_history_keeps_declaration_order() {
        let set = PredefinedToolSet::new(["A", "B", "C"]).unwrap();
        let ranked = set.ranked(&ToolFrequencyMap::new());
        assert_eq!(names(&ranked), vec!["A", "B", "C"]);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let set = PredefinedToolSet::new(["A", "B", "C", "D"]).unwrap();
        let freq: ToolFrequencyMap = [
            ("C".to_string(), 2),
            ("D".to_string(), 2),
            ("B".to_string(), 1),
        ]
        .into_iter()
        .collect();
        let ranked = set.ranked(&freq);
        assert_eq!(names(&ranked), vec!["C", "D", "B", "A"]);
    }

    #[test]
    fn panci_and_kompor_rank_first_after_one_submission() {
        let set = PredefinedToolSet::default();
        let mut freq = ToolFrequencyMap::new();
        freq.record(&SelectedToolSet::from_joined("Panci, Kompor"));
        let ranked = set.ranked(&freq);
        // Equal counts fall back to vocabulary order: Kompor precedes Panci
        assert_eq!(names(&ranked[..3]), vec!["Kompor", "Panci", "Wajan"]);
    }

    #[test]
    fn find_is_case_insensitive() {
        let set = PredefinedToolSet::default();
        assert_eq!(set.find("rice cooker").map(CookingTool::as_str), Some("Rice Cooker"));
        assert!(set.find("sous vide").is_none());
    }

    #[test]
    fn duplicates_are_rejected() {
        assert!(PredefinedToolSet::new(["Oven", "oven"]).is_err());
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        assert_eq!(
            PredefinedToolSet::new(Vec::<String>::new()),
            Err(DomainError::NoCookingTools)
        );
    }
}

//! Tool selector - Free-form tags or a ranked predefined vocabulary

use domain::{CookingTool, DomainError, PredefinedToolSet, SelectedToolSet, ToolFrequencyMap};
use serde::{Deserialize, Serialize};

/// How cooking tools are picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolSelectorMode {
    /// User types tool names, each added as a removable tag
    #[default]
    Freeform,
    /// User toggles entries of a fixed vocabulary ranked by past use
    PredefinedRanked,
}

/// Tool selection state behind the form
#[derive(Debug, Clone)]
pub struct ToolSelector {
    mode: ToolSelectorMode,
    display_order: Vec<CookingTool>,
    selection: SelectedToolSet,
    entry: String,
}

impl ToolSelector {
    /// Free-form selector with an empty selection
    pub fn freeform() -> Self {
        Self {
            mode: ToolSelectorMode::Freeform,
            display_order: Vec::new(),
            selection: SelectedToolSet::new(),
            entry: String::new(),
        }
    }

    /// Predefined selector, vocabulary ranked by the given frequencies
    pub fn predefined(vocabulary: &PredefinedToolSet, frequencies: &ToolFrequencyMap) -> Self {
        Self {
            mode: ToolSelectorMode::PredefinedRanked,
            display_order: vocabulary.ranked(frequencies),
            selection: SelectedToolSet::new(),
            entry: String::new(),
        }
    }

    pub fn for_mode(
        mode: ToolSelectorMode,
        vocabulary: &PredefinedToolSet,
        frequencies: &ToolFrequencyMap,
    ) -> Self {
        match mode {
            ToolSelectorMode::Freeform => Self::freeform(),
            ToolSelectorMode::PredefinedRanked => Self::predefined(vocabulary, frequencies),
        }
    }

    pub const fn mode(&self) -> ToolSelectorMode {
        self.mode
    }

    /// Vocabulary in display order; empty in free-form mode
    pub fn display_order(&self) -> &[CookingTool] {
        &self.display_order
    }

    pub const fn selection(&self) -> &SelectedToolSet {
        &self.selection
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    /// Current free-form entry text
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn set_entry(&mut self, text: impl Into<String>) {
        self.entry = text.into();
    }

    /// Add the current entry text (Enter key or "Tambah")
    ///
    /// The entry is cleared only when a tool was actually added; blank and
    /// duplicate entries leave it untouched and return `Ok(false)`.
    pub fn submit_entry(&mut self) -> Result<bool, DomainError> {
        if self.entry.trim().is_empty() {
            return Ok(false);
        }
        let entry = self.entry.clone();
        let added = self.add(&entry)?;
        if added {
            self.entry.clear();
        }
        Ok(added)
    }

    /// Add a tool by name
    ///
    /// Free-form names are lower-cased. Predefined names resolve to the
    /// vocabulary entry and unknown names are rejected. Duplicates
    /// (ignoring case) are ignored and return `Ok(false)`.
    pub fn add(&mut self, name: &str) -> Result<bool, DomainError> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let tool = self.resolve(name)?;
        if self.selection.contains(tool.as_str()) {
            return Ok(false);
        }
        self.selection.insert(tool);
        self.sort_selection();
        Ok(true)
    }

    /// Add every comma-separated name from a spoken transcript
    ///
    /// Returns how many tools were added. In predefined mode names outside
    /// the vocabulary are skipped.
    pub fn add_from_transcript(&mut self, transcript: &str) -> usize {
        transcript
            .split(',')
            .filter(|part| matches!(self.add(part), Ok(true)))
            .count()
    }

    /// Remove a tool; returns whether it was selected
    pub fn remove(&mut self, name: &str) -> bool {
        self.selection.remove(name)
    }

    /// Flip membership of a tool; returns the new membership
    pub fn toggle(&mut self, name: &str) -> Result<bool, DomainError> {
        if self.selection.remove(name) {
            return Ok(false);
        }
        self.add(name)
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    fn resolve(&self, name: &str) -> Result<CookingTool, DomainError> {
        match self.mode {
            ToolSelectorMode::Freeform => CookingTool::freeform(name),
            ToolSelectorMode::PredefinedRanked => self
                .display_order
                .iter()
                .find(|t| t.same_as(name))
                .cloned()
                .ok_or_else(|| DomainError::UnknownTool(name.trim().to_string())),
        }
    }

    // Predefined selections follow the vocabulary display order.
    fn sort_selection(&mut self) {
        if self.mode != ToolSelectorMode::PredefinedRanked {
            return;
        }
        let ordered: SelectedToolSet = self
            .display_order
            .iter()
            .filter(|t| self.selection.contains(t.as_str()))
            .cloned()
            .collect();
        self.selection = ordered;
    }
}

impl Default for ToolSelector {
    fn default() -> Self {
        Self::freeform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(selector: &ToolSelector) -> Vec<String> {
        selector.selection().names()
    }

    #[test]
    fn freeform_lowercases_and_ignores_duplicates() {
        let mut selector = ToolSelector::freeform();
        assert!(selector.add("  Panci ").unwrap());
        assert!(!selector.add("PANCI").unwrap());
        assert!(selector.add("Wajan").unwrap());
        assert_eq!(names(&selector), vec!["panci", "wajan"]);
    }

    #[test]
    fn submit_entry_clears_only_on_success() {
        let mut selector = ToolSelector::freeform();
        selector.set_entry("Kompor");
        assert!(selector.submit_entry().unwrap());
        assert_eq!(selector.entry(), "");

        selector.set_entry("kompor");
        assert!(!selector.submit_entry().unwrap());
        assert_eq!(selector.entry(), "kompor");

        selector.set_entry("   ");
        assert!(!selector.submit_entry().unwrap());
        assert_eq!(selector.selection().len(), 1);
    }

    #[test]
    fn remove_is_case_insensitive() {
        let mut selector = ToolSelector::freeform();
        selector.add("oven").unwrap();
        assert!(selector.remove("Oven"));
        assert!(!selector.remove("oven"));
        assert!(selector.selection().is_empty());
    }

    #[test]
    fn transcript_is_split_and_deduplicated() {
        let mut selector = ToolSelector::freeform();
        selector.add("panci").unwrap();
        let added = selector.add_from_transcript("Panci, Kompor ,, wajan, kompor");
        assert_eq!(added, 2);
        assert_eq!(names(&selector), vec!["panci", "kompor", "wajan"]);
    }

    #[test]
    fn predefined_display_order_is_ranked() {
        let frequencies: ToolFrequencyMap = [("Oven".to_string(), 3)].into_iter().collect();
        let selector = ToolSelector::predefined(&PredefinedToolSet::default(), &frequencies);
        assert_eq!(selector.display_order()[0].as_str(), "Oven");
        assert_eq!(selector.display_order()[1].as_str(), "Kompor");
    }

    #[test]
    fn predefined_toggle_uses_canonical_names() {
        let mut selector =
            ToolSelector::predefined(&PredefinedToolSet::default(), &ToolFrequencyMap::new());
        assert!(selector.toggle("panci").unwrap());
        assert!(selector.toggle("KOMPOR").unwrap());
        assert_eq!(names(&selector), vec!["Kompor", "Panci"]);

        assert!(!selector.toggle("Panci").unwrap());
        assert_eq!(names(&selector), vec!["Kompor"]);
    }

    #[test]
    fn predefined_rejects_unknown_tools() {
        let mut selector =
            ToolSelector::predefined(&PredefinedToolSet::default(), &ToolFrequencyMap::new());
        assert_eq!(
            selector.toggle("Tungku"),
            Err(DomainError::UnknownTool("Tungku".to_string()))
        );
        assert_eq!(selector.add_from_transcript("tungku, oven"), 1);
        assert_eq!(names(&selector), vec!["Oven"]);
    }

    #[test]
    fn mode_selection() {
        let vocabulary = PredefinedToolSet::default();
        let frequencies = ToolFrequencyMap::new();
        let selector =
            ToolSelector::for_mode(ToolSelectorMode::Freeform, &vocabulary, &frequencies);
        assert!(selector.display_order().is_empty());
        let selector =
            ToolSelector::for_mode(ToolSelectorMode::PredefinedRanked, &vocabulary, &frequencies);
        assert_eq!(selector.display_order().len(), vocabulary.len());
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let json = serde_json::to_string(&ToolSelectorMode::PredefinedRanked).unwrap();
        assert_eq!(json, "\"predefined-ranked\"");
        let mode: ToolSelectorMode = serde_json::from_str("\"freeform\"").unwrap();
        assert_eq!(mode, ToolSelectorMode::Freeform);
    }
}

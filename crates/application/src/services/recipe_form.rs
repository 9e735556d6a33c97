//! Recipe form - Ingredient text, tool selection and local validation

use domain::{DomainError, Ingredients, SuggestionRequest, messages};

use super::tool_selector::ToolSelector;

/// Validation messages currently shown on the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Shown under the ingredients field
    pub ingredients: Option<String>,
    /// Form-level message, used for the empty tool selection
    pub root: Option<String>,
}

impl FormErrors {
    pub const fn is_empty(&self) -> bool {
        self.ingredients.is_none() && self.root.is_none()
    }
}

/// Mutable form state owned by the input collector
#[derive(Debug, Clone, Default)]
pub struct RecipeForm {
    ingredients: String,
    tools: ToolSelector,
    errors: FormErrors,
}

impl RecipeForm {
    pub fn new(tools: ToolSelector) -> Self {
        Self {
            ingredients: String::new(),
            tools,
            errors: FormErrors::default(),
        }
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    /// Replace the ingredient text, clearing its error
    pub fn set_ingredients(&mut self, text: impl Into<String>) {
        self.ingredients = text.into();
        self.errors.ingredients = None;
    }

    /// Append a fragment, separated by ", " when text is already present
    pub fn append_ingredients(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        let joined = if self.ingredients.trim().is_empty() {
            fragment.to_string()
        } else {
            format!("{}, {fragment}", self.ingredients)
        };
        self.set_ingredients(joined);
    }

    pub const fn tools(&self) -> &ToolSelector {
        &self.tools
    }

    /// Mutable access to the tool selector; clears the form-level error
    pub fn tools_mut(&mut self) -> &mut ToolSelector {
        self.errors.root = None;
        &mut self.tools
    }

    pub const fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn clear_errors(&mut self) {
        self.errors = FormErrors::default();
    }

    /// Validate the form into a request
    ///
    /// Both fields are checked so every problem is reported at once. The
    /// resulting request holds a snapshot of the selection; the form keeps
    /// its state after submission.
    pub fn validate(&mut self) -> Result<SuggestionRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let ingredients = match Ingredients::parse(&self.ingredients) {
            Ok(ingredients) => Some(ingredients),
            Err(e) => {
                errors.ingredients = Some(e.user_message());
                None
            },
        };

        let selection = self.tools.selection();
        if selection.is_empty() {
            errors.root = Some(messages::TOOLS_REQUIRED.to_string());
        }

        self.errors = errors.clone();

        match ingredients {
            Some(ingredients) if errors.is_empty() => {
                SuggestionRequest::new(ingredients, selection.clone()).map_err(|e| {
                    let errors = FormErrors {
                        ingredients: None,
                        root: Some(e.user_message()),
                    };
                    self.errors = errors.clone();
                    errors
                })
            },
            _ => Err(errors),
        }
    }

    /// Show a form-level message, e.g. after a rejected tool name
    pub fn set_root_error(&mut self, error: &DomainError) {
        self.errors.root = Some(error.user_message());
    }
}

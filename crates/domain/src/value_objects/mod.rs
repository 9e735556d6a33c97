//! Value Objects - Immutable, identity-less domain primitives

mod cooking_tool;
mod ingredients;
mod predefined_tools;
mod selected_tool_set;
mod tool_frequency;

pub use cooking_tool::CookingTool;
pub use ingredients::Ingredients;
pub use predefined_tools::PredefinedToolSet;
pub use selected_tool_set::SelectedToolSet;
pub use tool_frequency::ToolFrequencyMap;

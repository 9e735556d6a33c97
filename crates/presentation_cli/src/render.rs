//! Plain-text rendering of the finder view and form feedback

use std::fmt::Write;

use application::{CardSnapshot, FinderView, FormErrors};
use domain::{Recipe, ToolFrequencyMap, messages};

/// Skeleton line standing in for a card while suggestions load
const SKELETON_LINE: &str = "░░░░░░░░░░░░░░░░░░░░░░░░";

/// Inline images are summarized instead of dumped
fn describe_image(url: &str) -> String {
    match url.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split(';').next().unwrap_or_default();
            format!("[{mime}, {} bytes inline]", url.len())
        },
        None => url.to_string(),
    }
}

fn render_recipe(out: &mut String, index: usize, recipe: &Recipe, image_loading: bool) {
    let _ = writeln!(out, "{}. {}", index + 1, recipe.title);
    if !recipe.description.is_empty() {
        let _ = writeln!(out, "   {}", recipe.description);
    }

    let meta: Vec<&str> = [recipe.servings.as_deref(), recipe.prep_time.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !meta.is_empty() {
        let _ = writeln!(out, "   {}", meta.join(" · "));
    }

    let _ = writeln!(out, "   Bahan:");
    for ingredient in &recipe.ingredients {
        let _ = writeln!(out, "   - {ingredient}");
    }
    let _ = writeln!(out, "   Langkah:");
    for (n, step) in recipe.steps.iter().enumerate() {
        let _ = writeln!(out, "   {}. {step}", n + 1);
    }

    if image_loading {
        let _ = writeln!(out, "   Gambar: {}", messages::IMAGE_LOADING);
    } else {
        let _ = writeln!(out, "   Gambar: {}", describe_image(&recipe.image_url));
    }
}

/// Render the results area
pub fn render_view(view: &FinderView) -> String {
    let mut out = String::new();
    match view {
        FinderView::Idle => {},
        FinderView::Loading { skeletons } => {
            let _ = writeln!(out, "{}", messages::SEARCHING);
            for _ in 0..*skeletons {
                let _ = writeln!(out, "{SKELETON_LINE}");
            }
        },
        FinderView::Success { heading, cards } => {
            let _ = writeln!(out, "{heading}\n");
            for (index, CardSnapshot { recipe, image_loading }) in cards.iter().enumerate() {
                render_recipe(&mut out, index, recipe, *image_loading);
                out.push('\n');
            }
        },
        FinderView::Empty { message } => {
            let _ = writeln!(out, "{message}");
        },
        FinderView::Error { title, message } => {
            let _ = writeln!(out, "{title}\n{message}");
        },
    }
    out
}

/// Render validation messages, field first
pub fn render_form_errors(errors: &FormErrors) -> String {
    [errors.ingredients.as_deref(), errors.root.as_deref()]
        .into_iter()
        .flatten()
        .map(|msg| format!("✗ {msg}\n"))
        .collect()
}

/// Render a ranked tool list with recorded counts
pub fn render_tools<'a>(
    tools: impl IntoIterator<Item = &'a str>,
    frequencies: &ToolFrequencyMap,
) -> String {
    let mut out = String::new();
    for (index, name) in tools.into_iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {name} ({}x)", index + 1, frequencies.count(name));
    }
    out
}

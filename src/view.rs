//! Terminal rendering of the ingredient list and recipe area.
//!
//! Markdown is printed as-is; turning it into styled output is left to
//! whatever displays the text.

use crate::flow::RequestState;
use crate::model::{Ingredient, RecipeText};

pub const INGREDIENTS_HEADER: &str = "Ingredients on hand:";
pub const RECIPE_HEADER: &str = "Chef Claude Recommends:";

/// Render the ingredient list followed by the call to action.
///
/// Returns an empty string when there is nothing on the list, since the
/// recipe action is unavailable until then.
pub fn render_ingredients(ingredients: &[Ingredient]) -> String {
    if ingredients.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(INGREDIENTS_HEADER);
    out.push('\n');
    for ingredient in ingredients {
        out.push_str("  - ");
        out.push_str(ingredient.as_str());
        out.push('\n');
    }
    out.push_str("\nReady for a recipe?\n");
    out.push_str("Generate a recipe from your list of ingredients with /recipe\n");
    out
}

/// Render the recipe area for the given request state.
pub fn render_recipe(state: &RequestState, recipe: Option<&RecipeText>) -> String {
    let mut out = String::new();

    match state {
        RequestState::NotStarted | RequestState::Succeeded => {}
        RequestState::Pending => out.push_str("Chef Claude is thinking about your recipe...\n"),
        RequestState::Failed(reason) => {
            out.push_str("Sorry, Chef Claude couldn't come up with a recipe: ");
            out.push_str(reason);
            out.push('\n');
        }
    }

    if let Some(recipe) = recipe.filter(|r| !r.is_blank()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(RECIPE_HEADER);
        out.push_str("\n\n");
        out.push_str(recipe.as_str().trim_end());
        out.push('\n');
    }

    out
}

/// Render the whole session: ingredients first, then the recipe area
pub fn render_session(
    ingredients: &[Ingredient],
    state: &RequestState,
    recipe: Option<&RecipeText>,
) -> String {
    let list = render_ingredients(ingredients);
    let recipe = render_recipe(state, recipe);
    match (list.is_empty(), recipe.is_empty()) {
        (_, true) => list,
        (true, false) => recipe,
        (false, false) => format!("{}\n{}", list, recipe),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients(items: &[&str]) -> Vec<Ingredient> {
        items.iter().map(|i| Ingredient::new(*i).unwrap()).collect()
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        assert_eq!(render_ingredients(&[]), "");
    }

    #[test]
    fn test_list_renders_in_order() {
        let out = render_ingredients(&ingredients(&["salt", "pepper"]));
        assert!(out.starts_with(INGREDIENTS_HEADER));
        let salt = out.find("- salt").unwrap();
        let pepper = out.find("- pepper").unwrap();
        assert!(salt < pepper);
        assert!(out.contains("/recipe"));
    }

    #[test]
    fn test_no_recipe_renders_nothing() {
        assert_eq!(render_recipe(&RequestState::NotStarted, None), "");
        let blank = RecipeText::new("");
        assert_eq!(render_recipe(&RequestState::Succeeded, Some(&blank)), "");
    }

    #[test]
    fn test_recipe_renders_header_and_body() {
        let recipe = RecipeText::new("## Salt & Pepper Toast\n");
        let out = render_recipe(&RequestState::Succeeded, Some(&recipe));
        assert_eq!(
            out,
            "Chef Claude Recommends:\n\n## Salt & Pepper Toast\n"
        );
    }

    #[test]
    fn test_failure_is_visible() {
        let state = RequestState::Failed("network unreachable".to_string());
        let out = render_recipe(&state, None);
        assert!(out.contains("network unreachable"));
        assert!(!out.contains(RECIPE_HEADER));
    }

    #[test]
    fn test_failure_keeps_previous_recipe_visible() {
        let recipe = RecipeText::new("# Omelette");
        let state = RequestState::Failed("timeout".to_string());
        let out = render_recipe(&state, Some(&recipe));
        assert!(out.contains("timeout"));
        assert!(out.contains(RECIPE_HEADER));
        assert!(out.contains("# Omelette"));
    }

    #[test]
    fn test_pending_is_visible() {
        let out = render_recipe(&RequestState::Pending, None);
        assert!(out.contains("thinking"));
    }

    #[test]
    fn test_render_session_combines_sections() {
        let recipe = RecipeText::new("# Soup");
        let out = render_session(
            &ingredients(&["leek"]),
            &RequestState::Succeeded,
            Some(&recipe),
        );
        let list = out.find(INGREDIENTS_HEADER).unwrap();
        let header = out.find(RECIPE_HEADER).unwrap();
        assert!(list < header);
        assert_eq!(render_session(&[], &RequestState::NotStarted, None), "");
    }
}

use crate::model::Ingredient;

/// The system prompt sent with every recipe request.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("prompt.txt");

/// Build the user message listing the ingredients in order.
pub fn build_user_message(ingredients: &[Ingredient]) -> String {
    let list = ingredients
        .iter()
        .map(Ingredient::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!("I have {}. Please give me a recipe you'd recommend I make!", list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_embedded() {
        assert!(!RECIPE_SYSTEM_PROMPT.is_empty());
        assert!(RECIPE_SYSTEM_PROMPT.contains("list of ingredients"));
        assert!(RECIPE_SYSTEM_PROMPT.contains("Markdown"));
    }

    #[test]
    fn test_user_message_keeps_order() {
        let ingredients = vec![
            Ingredient::new("pasta").unwrap(),
            Ingredient::new("ground beef").unwrap(),
            Ingredient::new("tomato paste").unwrap(),
        ];
        assert_eq!(
            build_user_message(&ingredients),
            "I have pasta, ground beef, tomato paste. Please give me a recipe you'd recommend I make!"
        );
    }
}

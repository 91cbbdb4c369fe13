use std::fmt;

use crate::ChefError;

/// A single food item the user has on hand.
///
/// Ingredients are trimmed on creation and never empty. Two ingredients
/// with the same text are still distinct entries in a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient(String);

impl Ingredient {
    pub fn new(text: impl Into<String>) -> Result<Self, ChefError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChefError::EmptyIngredient);
        }
        if trimmed.len() == text.len() {
            Ok(Ingredient(text))
        } else {
            Ok(Ingredient(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ingredient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Markdown recipe text returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeText(String);

impl RecipeText {
    pub fn new(markdown: impl Into<String>) -> Self {
        RecipeText(markdown.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the text has no visible content
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RecipeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

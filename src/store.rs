use log::debug;

use crate::model::Ingredient;
use crate::ChefError;

/// Ordered, append-only list of the ingredients entered in one session
#[derive(Debug, Clone, Default)]
pub struct IngredientStore {
    ingredients: Vec<Ingredient>,
}

impl IngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the given ingredients, in order
    ///
    /// Fails on the first empty entry.
    pub fn with_ingredients<I, S>(items: I) -> Result<Self, ChefError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for item in items {
            store.add(item)?;
        }
        Ok(store)
    }

    /// Append an ingredient to the end of the list.
    ///
    /// Empty or whitespace-only text is rejected and the list is left
    /// unchanged. Duplicates are kept.
    pub fn add(&mut self, text: impl Into<String>) -> Result<(), ChefError> {
        let ingredient = Ingredient::new(text)?;
        debug!("Adding ingredient '{}'", ingredient);
        self.ingredients.push(ingredient);
        Ok(())
    }

    /// Current ingredients in insertion order
    pub fn list(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Whether the "get recipe" action should be offered
    pub fn can_request_recipe(&self) -> bool {
        !self.is_empty()
    }
}

pub mod builder;
pub mod command;
pub mod config;
pub mod error;
pub mod flow;
pub mod model;
pub mod providers;
pub mod session;
pub mod store;
pub mod view;

pub use builder::{LlmProvider, SessionBuilder};
pub use crate::config::AiConfig;
pub use error::ChefError;
pub use flow::{CompletedRequest, RecipeRequest, RecipeRequestFlow, RequestState, RequestTicket};
pub use model::{Ingredient, RecipeText};
pub use providers::{GenerationResult, RecipeGenerator};
pub use session::Session;
pub use store::IngredientStore;

/// Ask the configured default provider for a recipe using these ingredients
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), chef_claude::ChefError> {
/// let recipe = chef_claude::suggest_recipe(["salt", "pepper", "bread"]).await?;
/// println!("{}", recipe);
/// # Ok(())
/// # }
/// ```
pub async fn suggest_recipe<I, S>(ingredients: I) -> Result<RecipeText, ChefError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut session = Session::builder().ingredients(ingredients).build()?;
    session.request_recipe().await.cloned()
}

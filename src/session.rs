use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::builder::SessionBuilder;
use crate::flow::{CompletedRequest, RecipeRequest, RecipeRequestFlow, RequestState, RequestTicket};
use crate::model::{Ingredient, RecipeText};
use crate::providers::RecipeGenerator;
use crate::store::IngredientStore;
use crate::{view, ChefError};

/// One user's ingredient list and recipe suggestion.
///
/// All mutation goes through [`Session::add_ingredient`] and the request
/// methods; the presentation layer only reads snapshots.
pub struct Session {
    ingredients: IngredientStore,
    flow: RecipeRequestFlow,
    generator: Arc<dyn RecipeGenerator>,
}

impl Session {
    pub fn new(generator: Arc<dyn RecipeGenerator>) -> Self {
        Self::with_store(generator, IngredientStore::new())
    }

    pub fn with_store(generator: Arc<dyn RecipeGenerator>, ingredients: IngredientStore) -> Self {
        Session {
            ingredients,
            flow: RecipeRequestFlow::new(),
            generator,
        }
    }

    /// Creates a new builder for configuring a session
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn generator_name(&self) -> &str {
        self.generator.name()
    }

    pub fn add_ingredient(&mut self, text: impl Into<String>) -> Result<(), ChefError> {
        self.ingredients.add(text)
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        self.ingredients.list()
    }

    pub fn can_request_recipe(&self) -> bool {
        self.ingredients.can_request_recipe()
    }

    pub fn request_state(&self) -> &RequestState {
        self.flow.state()
    }

    pub fn recipe(&self) -> Option<&RecipeText> {
        self.flow.recipe()
    }

    /// Issue a request for the current ingredient list.
    ///
    /// The returned request can be run on another task; hand its result
    /// back through [`Session::finish_request`].
    pub fn start_request(&mut self) -> Result<RecipeRequest, ChefError> {
        if !self.can_request_recipe() {
            return Err(ChefError::NoIngredients);
        }
        let ticket = self.flow.begin();
        Ok(RecipeRequest::new(
            ticket,
            self.ingredients.list().to_vec(),
            Arc::clone(&self.generator),
        ))
    }

    /// Apply a finished request; returns `false` if a newer one was issued
    pub fn finish_request(&mut self, completed: CompletedRequest) -> bool {
        completed.apply_to(&mut self.flow)
    }

    /// Issue a request and run it on a background task.
    ///
    /// The outcome is sent on `completions`; pass it to
    /// [`Session::apply_completed`] when it arrives. Must be called from
    /// within a Tokio runtime.
    pub fn spawn_request(
        &mut self,
        completions: UnboundedSender<CompletedRequest>,
    ) -> Result<RequestTicket, ChefError> {
        let request = self.start_request()?;
        let ticket = request.ticket();
        tokio::spawn(async move {
            // Receiver is only dropped on shutdown
            let _ = completions.send(request.run().await);
        });
        Ok(ticket)
    }

    /// Apply a finished request and return the recipe area to redraw.
    ///
    /// Returns `None` for a stale request, which leaves nothing to show.
    pub fn apply_completed(&mut self, completed: CompletedRequest) -> Option<String> {
        if self.finish_request(completed) {
            Some(view::render_recipe(self.request_state(), self.recipe()))
        } else {
            None
        }
    }

    /// Request a recipe and wait for it
    pub async fn request_recipe(&mut self) -> Result<&RecipeText, ChefError> {
        if !self.can_request_recipe() {
            return Err(ChefError::NoIngredients);
        }
        self.flow
            .request_recipe(self.generator.as_ref(), self.ingredients.list())
            .await
    }

    /// Render the ingredient list and recipe area as terminal text
    pub fn render(&self) -> String {
        view::render_session(self.ingredients(), self.request_state(), self.recipe())
    }
}

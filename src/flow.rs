//! Single-slot recipe request cycle.
//!
//! Every request gets a [`RequestTicket`]. Only the most recently issued
//! ticket can change the stored recipe; completions carrying an older
//! ticket are dropped, so overlapping requests never race on the result.

use log::{debug, info, warn};
use std::fmt;
use std::sync::Arc;

use crate::model::{Ingredient, RecipeText};
use crate::providers::{GenerationResult, RecipeGenerator};
use crate::ChefError;

/// Where the latest recipe request stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No recipe has been requested yet
    #[default]
    NotStarted,
    /// A request is outstanding
    Pending,
    /// The latest request produced the stored recipe
    Succeeded,
    /// The latest request failed; any earlier recipe is still stored
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Holds the current recipe and the state of the request that feeds it
#[derive(Debug, Default)]
pub struct RecipeRequestFlow {
    state: RequestState,
    recipe: Option<RecipeText>,
    issued: u64,
}

impl RecipeRequestFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The most recent successfully generated recipe, if any
    pub fn recipe(&self) -> Option<&RecipeText> {
        self.recipe.as_ref()
    }

    /// Issue a new ticket and mark the flow as pending.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.state = RequestState::Pending;
        RequestTicket(self.issued)
    }

    /// Whether `ticket` is the latest one issued
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when the ticket is stale.
    /// A blank recipe is treated as a failed request.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<RecipeText, String>,
    ) -> bool {
        if !self.is_current(ticket) {
            warn!(
                "Discarding stale recipe response {} (latest is #{})",
                ticket, self.issued
            );
            return false;
        }

        match outcome {
            Ok(recipe) if recipe.is_blank() => {
                warn!("Request {} returned an empty recipe", ticket);
                self.state = RequestState::Failed("the recipe came back empty".to_string());
            }
            Ok(recipe) => {
                info!("Request {} succeeded", ticket);
                self.recipe = Some(recipe);
                self.state = RequestState::Succeeded;
            }
            Err(reason) => {
                warn!("Request {} failed: {}", ticket, reason);
                self.state = RequestState::Failed(reason);
            }
        }
        true
    }

    /// Ask `generator` for a recipe and store the result.
    ///
    /// On failure the previously stored recipe is kept and the state
    /// becomes [`RequestState::Failed`].
    pub async fn request_recipe(
        &mut self,
        generator: &dyn RecipeGenerator,
        ingredients: &[Ingredient],
    ) -> Result<&RecipeText, ChefError> {
        let ticket = self.begin();
        info!(
            "Requesting recipe {} from {} for {} ingredient(s)",
            ticket,
            generator.name(),
            ingredients.len()
        );
        let outcome = generator
            .generate(ingredients)
            .await
            .map(|result| result.recipe)
            .map_err(|e| e.to_string());
        self.complete(ticket, outcome);

        match (&self.state, &self.recipe) {
            (RequestState::Succeeded, Some(recipe)) => Ok(recipe),
            (RequestState::Failed(reason), _) => Err(ChefError::GenerationFailed(reason.clone())),
            _ => Err(ChefError::GenerationFailed(
                "request was superseded".to_string(),
            )),
        }
    }
}

/// A request that has been issued but not yet run.
///
/// Owns a snapshot of the ingredients taken when it was issued, so later
/// additions to the list do not affect it.
pub struct RecipeRequest {
    ticket: RequestTicket,
    ingredients: Vec<Ingredient>,
    generator: Arc<dyn RecipeGenerator>,
}

impl RecipeRequest {
    pub(crate) fn new(
        ticket: RequestTicket,
        ingredients: Vec<Ingredient>,
        generator: Arc<dyn RecipeGenerator>,
    ) -> Self {
        Self {
            ticket,
            ingredients,
            generator,
        }
    }

    pub fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Call the generation service
    pub async fn run(self) -> CompletedRequest {
        info!(
            "Requesting recipe {} from {} for {} ingredient(s)",
            self.ticket,
            self.generator.name(),
            self.ingredients.len()
        );
        let outcome = self
            .generator
            .generate(&self.ingredients)
            .await
            .map_err(|e| e.to_string());
        CompletedRequest {
            ticket: self.ticket,
            outcome,
        }
    }
}

/// The outcome of a [`RecipeRequest`], ready to be applied to its flow
#[derive(Debug)]
pub struct CompletedRequest {
    pub ticket: RequestTicket,
    pub outcome: Result<GenerationResult, String>,
}

impl CompletedRequest {
    /// Apply this outcome to `flow`; returns `false` if it was stale
    pub fn apply_to(self, flow: &mut RecipeRequestFlow) -> bool {
        if let Ok(result) = &self.outcome {
            debug!(
                "Request {} took {}ms ({:?} output tokens)",
                self.ticket,
                result.metadata.latency_ms,
                result.metadata.tokens_used.output_tokens
            );
        }
        flow.complete(self.ticket, self.outcome.map(|result| result.recipe))
    }
}

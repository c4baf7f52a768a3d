//! Utility actions.
//!
//! A [`UtilityAction`] pairs scoring (considerations + aggregator) with an
//! [`ActionHandler`] that knows how to enumerate candidates, check
//! preconditions and carry the action out against the host.

use tactics_core::{Blackboard, Unit, World};

use crate::context::{ActionContext, AiContext};
use crate::error::ActionError;
use crate::scoring::{Aggregator, Consideration, MIN_SCORE, clamp_score};

/// Behavior half of a utility action.
pub trait ActionHandler: Send + Sync {
    /// Candidate contexts for `agent`. `None` means the action has no
    /// generator and is evaluated once against the implicit context.
    fn generate_contexts(&self, _world: &World, _agent: &Unit) -> Option<Vec<ActionContext>> {
        None
    }

    fn can_execute(&self, ctx: &AiContext<'_>) -> bool;

    fn execute(
        &self,
        world: &mut World,
        board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError>;
}

/// A candidate context together with the utility it scored.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredContext {
    pub context: ActionContext,
    pub utility: f32,
}

pub struct UtilityAction {
    name: String,
    category: String,
    considerations: Vec<Box<dyn Consideration>>,
    aggregator: Aggregator,
    handler: Box<dyn ActionHandler>,
}

impl UtilityAction {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        handler: impl ActionHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            considerations: Vec::new(),
            aggregator: Aggregator::default(),
            handler: Box::new(handler),
        }
    }

    pub fn with_consideration(mut self, consideration: impl Consideration + 'static) -> Self {
        self.considerations.push(Box::new(consideration));
        self
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    pub fn consideration_names(&self) -> impl Iterator<Item = &str> {
        self.considerations.iter().map(|c| c.name())
    }

    pub fn generate_contexts(&self, world: &World, agent: &Unit) -> Option<Vec<ActionContext>> {
        self.handler.generate_contexts(world, agent)
    }

    pub fn can_execute(&self, ctx: &AiContext<'_>) -> bool {
        self.handler.can_execute(ctx)
    }

    /// Aggregated consideration scores, never below [`MIN_SCORE`].
    pub fn calculate_utility(&self, ctx: &AiContext<'_>) -> f32 {
        let scores: Vec<f32> = self
            .considerations
            .iter()
            .map(|consideration| clamp_score(consideration.score(ctx)))
            .collect();
        let utility = self.aggregator.aggregate(&scores);
        if utility.is_nan() {
            MIN_SCORE
        } else {
            utility.max(MIN_SCORE)
        }
    }

    pub fn execute(
        &self,
        world: &mut World,
        board: &mut Blackboard,
        ctx: &ActionContext,
    ) -> Result<(), ActionError> {
        self.handler.execute(world, board, ctx)
    }

    /// Scores every executable candidate for `agent` and returns the best.
    /// The first candidate wins ties. `None` when nothing is executable.
    pub fn evaluate(&self, world: &World, board: &Blackboard, agent: &Unit) -> Option<ScoredContext> {
        let candidates = self
            .generate_contexts(world, agent)
            .unwrap_or_else(|| vec![ActionContext::implicit(agent.id)]);

        let mut best: Option<ScoredContext> = None;
        for context in candidates {
            let ctx = AiContext::new(world, board, agent, &context);
            if !self.can_execute(&ctx) {
                continue;
            }
            let utility = self.calculate_utility(&ctx);
            tracing::trace!(action = %self.name, %context, utility, "scored candidate");
            if best.as_ref().is_none_or(|current| utility > current.utility) {
                best = Some(ScoredContext { context, utility });
            }
        }
        best
    }
}

impl std::fmt::Debug for UtilityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtilityAction")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("considerations", &self.consideration_names().collect::<Vec<_>>())
            .field("aggregator", &self.aggregator)
            .finish_non_exhaustive()
    }
}

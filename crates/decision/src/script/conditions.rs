//! Named conditions available to scripted trees.

use std::collections::BTreeMap;

use crate::context::AiContext;

pub type ConditionFn = fn(&AiContext<'_>) -> bool;

/// Health ratio below which `is_hurt` holds.
pub const HURT_RATIO: f32 = 0.6;
/// Health ratio below which `is_badly_hurt` holds.
pub const BADLY_HURT_RATIO: f32 = 0.35;

/// Name-to-predicate table used when compiling a tree.
#[derive(Clone, Default)]
pub struct ConditionRegistry {
    conditions: BTreeMap<String, ConditionFn>,
}

impl ConditionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the stock conditions.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("enemy_visible", enemy_visible);
        registry.register("enemy_in_attack_range", enemy_in_attack_range);
        registry.register("is_hurt", is_hurt);
        registry.register("is_badly_hurt", is_badly_hurt);
        registry.register("has_focus_target", has_focus_target);
        registry.register("has_objective", has_objective);
        registry.register("can_cast_skill", can_cast_skill);
        registry
    }

    /// Adds or replaces a condition, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, condition: ConditionFn) -> Option<ConditionFn> {
        self.conditions.insert(name.into(), condition)
    }

    pub fn get(&self, name: &str) -> Option<ConditionFn> {
        self.conditions.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

fn enemy_visible(ctx: &AiContext<'_>) -> bool {
    ctx.visible_enemies().next().is_some()
}

fn enemy_in_attack_range(ctx: &AiContext<'_>) -> bool {
    let (origin, range) = (ctx.agent.position, ctx.agent.attack_range);
    ctx.visible_enemies()
        .any(|enemy| origin.chebyshev_distance(enemy.position) <= range)
}

fn is_hurt(ctx: &AiContext<'_>) -> bool {
    ctx.agent.health_ratio() < HURT_RATIO
}

fn is_badly_hurt(ctx: &AiContext<'_>) -> bool {
    ctx.agent.health_ratio() < BADLY_HURT_RATIO
}

fn has_focus_target(ctx: &AiContext<'_>) -> bool {
    ctx.focus_target().is_some()
}

fn has_objective(ctx: &AiContext<'_>) -> bool {
    ctx.board.top_objective().is_some()
}

fn can_cast_skill(ctx: &AiContext<'_>) -> bool {
    let agent = ctx.agent;
    agent.skills.iter().any(|&skill| {
        agent.is_skill_ready(skill)
            && ctx
                .world
                .skills()
                .get(skill)
                .is_some_and(|spec| spec.mana_cost <= agent.mana.current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_names() {
        let registry = ConditionRegistry::standard();
        let names: Vec<_> = registry.names().collect();
        assert!(names.contains(&"enemy_visible"));
        assert!(names.contains(&"is_badly_hurt"));
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn register_replaces() {
        fn never(_: &AiContext<'_>) -> bool {
            false
        }
        let mut registry = ConditionRegistry::standard();
        assert!(registry.register("is_hurt", never).is_some());
        assert!(registry.register("custom", never).is_none());
    }
}

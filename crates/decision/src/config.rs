/// Action categories used by the preset action set.
///
/// Categories are free-form strings: a host can register actions under its
/// own categories and mark them attack-class through
/// [`DecisionConfig::attack_categories`].
pub mod category {
    pub const ATTACK: &str = "attack";
    pub const MOVEMENT: &str = "movement";
    pub const SUPPORT: &str = "support";
    pub const RETREAT: &str = "retreat";
    pub const IDLE: &str = "idle";
}

/// Tunables for the decision controller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecisionConfig {
    /// Retreat utility must exceed this for the emergency override.
    pub retreat_utility_threshold: f32,
    /// Health ratio must be below this for the emergency override.
    pub retreat_health_threshold: f32,
    /// `W` in the attack-class multiplier `1 + W * priority`.
    pub objective_weight: f32,
    /// Name of the action eligible for the emergency override.
    pub retreat_action: Option<String>,
    /// Name of the action run when a turn faults.
    pub fallback_action: Option<String>,
    /// Categories whose actions receive global-objective weighting.
    pub attack_categories: Vec<String>,
}

impl DecisionConfig {
    pub const DEFAULT_RETREAT_UTILITY_THRESHOLD: f32 = 0.75;
    pub const DEFAULT_RETREAT_HEALTH_THRESHOLD: f32 = 0.35;
    pub const DEFAULT_OBJECTIVE_WEIGHT: f32 = 0.1;
    pub const DEFAULT_RETREAT_ACTION: &'static str = "retreat";
    pub const DEFAULT_FALLBACK_ACTION: &'static str = "idle";

    pub fn new() -> Self {
        Self {
            retreat_utility_threshold: Self::DEFAULT_RETREAT_UTILITY_THRESHOLD,
            retreat_health_threshold: Self::DEFAULT_RETREAT_HEALTH_THRESHOLD,
            objective_weight: Self::DEFAULT_OBJECTIVE_WEIGHT,
            retreat_action: Some(Self::DEFAULT_RETREAT_ACTION.to_owned()),
            fallback_action: Some(Self::DEFAULT_FALLBACK_ACTION.to_owned()),
            attack_categories: vec![category::ATTACK.to_owned()],
        }
    }

    /// Config with no designated retreat or fallback action.
    pub fn without_designations() -> Self {
        Self {
            retreat_action: None,
            fallback_action: None,
            ..Self::new()
        }
    }

    pub fn is_attack_category(&self, category: &str) -> bool {
        self.attack_categories.iter().any(|known| known == category)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self::new()
    }
}

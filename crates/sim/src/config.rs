//! Host configuration read from the process environment.
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SCENARIO: &str = "crates/sim/scenarios/skirmish.ron";
pub const DEFAULT_ROUNDS: u32 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    pub scenario: PathBuf,
    /// Decision tuning TOML; defaults apply when unset.
    pub decision_config: Option<PathBuf>,
    pub rounds: u32,
    /// Directory for the log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scenario: PathBuf::from(DEFAULT_SCENARIO),
            decision_config: None,
            rounds: DEFAULT_ROUNDS,
            log_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `TACTICS_SCENARIO`
    /// - `TACTICS_CONFIG`
    /// - `TACTICS_ROUNDS`
    /// - `TACTICS_LOG_DIR`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("TACTICS_SCENARIO") {
            config.scenario = path;
        }
        config.decision_config = read_env("TACTICS_CONFIG");
        if let Some(rounds) = read_env::<u32>("TACTICS_ROUNDS") {
            config.rounds = rounds.max(1);
        }
        config.log_dir = read_env("TACTICS_LOG_DIR");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_scenario() {
        let config = SimConfig::default();
        assert_eq!(config.scenario, PathBuf::from(DEFAULT_SCENARIO));
        assert_eq!(config.rounds, DEFAULT_ROUNDS);
        assert!(config.decision_config.is_none());
        assert!(config.log_dir.is_none());
    }
}

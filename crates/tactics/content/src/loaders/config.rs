//! Decision tunables loader.

use std::path::Path;

use decision::DecisionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`DecisionConfig`] from TOML files. Missing keys keep their
/// defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<DecisionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DecisionConfig> {
        let config: DecisionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse decision config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &DecisionConfig) -> LoadResult<()> {
    let ratios = [
        ("retreat_utility_threshold", config.retreat_utility_threshold),
        ("retreat_health_threshold", config.retreat_health_threshold),
    ];
    for (key, value) in ratios {
        if !(0.0..=1.0).contains(&value) {
            anyhow::bail!("{key} must be within [0, 1], got {value}");
        }
    }
    if !(config.objective_weight.is_finite() && config.objective_weight >= 0.0) {
        anyhow::bail!(
            "objective_weight must be a non-negative number, got {}",
            config.objective_weight
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "objective_weight = 0.25").unwrap();
        writeln!(file, "attack_categories = [\"attack\", \"ambush\"]").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.objective_weight, 0.25);
        assert_eq!(config.attack_categories, vec!["attack", "ambush"]);
        assert_eq!(
            config.retreat_health_threshold,
            DecisionConfig::DEFAULT_RETREAT_HEALTH_THRESHOLD
        );
        assert_eq!(config.fallback_action.as_deref(), Some("idle"));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let error = ConfigLoader::parse("retreat_health_threshold = 1.5").unwrap_err();
        assert!(error.to_string().contains("retreat_health_threshold"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    }
}

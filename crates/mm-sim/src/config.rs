//! Simulation settings, read from `MM_SIM_*` environment variables.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Parse { key: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of agents; node ids are `0..agents`.
    pub agents: u32,
    pub ticks: usize,
    /// Per-tick weight decay: weight(t+1) = (1 - rate) * weight(t).
    pub decay_rate: f64,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub node_type: String,
    pub friend_kind: String,
    pub enemy_kind: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            agents: 20,
            ticks: 100,
            decay_rate: 0.1,
            seed: None,
            node_type: "person".to_string(),
            friend_kind: "friend".to_string(),
            enemy_kind: "enemy".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            agents: parse(&lookup, "MM_SIM_AGENTS")?.unwrap_or(defaults.agents),
            ticks: parse(&lookup, "MM_SIM_TICKS")?.unwrap_or(defaults.ticks),
            decay_rate: parse(&lookup, "MM_SIM_DECAY_RATE")?.unwrap_or(defaults.decay_rate),
            seed: parse(&lookup, "MM_SIM_SEED")?,
            node_type: lookup("MM_SIM_NODE_TYPE").unwrap_or(defaults.node_type),
            friend_kind: lookup("MM_SIM_FRIEND_KIND").unwrap_or(defaults.friend_kind),
            enemy_kind: lookup("MM_SIM_ENEMY_KIND").unwrap_or(defaults.enemy_kind),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents == 0 {
            return Err(ConfigError::Invalid("agents must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&self.decay_rate) {
            return Err(ConfigError::Invalid(format!(
                "decay_rate must be within [0, 1], got {}",
                self.decay_rate
            )));
        }
        if self.friend_kind == self.enemy_kind {
            return Err(ConfigError::Invalid(
                "friend_kind and enemy_kind must differ".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse {
                key,
                value: raw.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        let config = SimConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn values_override_defaults() {
        let config = SimConfig::from_lookup(lookup(&[
            ("MM_SIM_AGENTS", "5"),
            ("MM_SIM_SEED", "42"),
            ("MM_SIM_DECAY_RATE", " 0.25 "),
            ("MM_SIM_ENEMY_KIND", "rival"),
        ]))
        .unwrap();
        assert_eq!(config.agents, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.decay_rate, 0.25);
        assert_eq!(config.enemy_kind, "rival");
        assert_eq!(config.ticks, 100);
    }

    #[test]
    fn malformed_and_invalid_values_are_rejected() {
        let err = SimConfig::from_lookup(lookup(&[("MM_SIM_TICKS", "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { key: "MM_SIM_TICKS", .. }));

        let err = SimConfig::from_lookup(lookup(&[("MM_SIM_AGENTS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = SimConfig::from_lookup(lookup(&[("MM_SIM_DECAY_RATE", "1.5")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}

use crate::error::{OnCallError, Result};
use crate::flooding::FloodingChecker;
use crate::rule::{parse_keywords, DispatchRule};
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Declarative on-call configuration, loaded from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnCallConfig {
    /// Width of the per-sender flooding window, in minutes.
    #[serde(default = "default_flood_window_minutes")]
    pub flood_window_minutes: i64,
    /// Dispatch rules in priority order.
    #[serde(default)]
    pub rules: Vec<SeedDispatchRule>,
}

/// One configured rule row. Keyword fields are comma-separated strings;
/// an absent field leaves that side of the match unconstrained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDispatchRule {
    pub name: String,
    pub from_address: String,
    #[serde(default)]
    pub subject_keywords: Option<String>,
    #[serde(default)]
    pub body_keywords: Option<String>,
}

fn default_flood_window_minutes() -> i64 {
    FloodingChecker::DEFAULT_WINDOW_MINUTES
}

impl Default for OnCallConfig {
    fn default() -> Self {
        Self {
            flood_window_minutes: default_flood_window_minutes(),
            rules: Vec::new(),
        }
    }
}

impl OnCallConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn flood_window(&self) -> Duration {
        Duration::minutes(self.flood_window_minutes)
    }
}

/// Convert a single seed row into a [`DispatchRule`].
pub fn build_rule(seed: &SeedDispatchRule) -> Result<DispatchRule> {
    if seed.from_address.trim().is_empty() {
        return Err(OnCallError::InvalidRule(format!(
            "rule '{}' has an empty from address",
            seed.name
        )));
    }
    Ok(DispatchRule {
        name: seed.name.clone(),
        from_address_pattern: seed.from_address.clone(),
        subject_keywords: parse_keywords(seed.subject_keywords.as_deref()),
        body_keywords: parse_keywords(seed.body_keywords.as_deref()),
    })
}

/// Convert seed rows into dispatch rules, skipping invalid ones with
/// warnings.
pub fn build_rules(seeds: &[SeedDispatchRule]) -> Vec<DispatchRule> {
    let mut rules = Vec::with_capacity(seeds.len());
    for seed in seeds {
        match build_rule(seed) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                tracing::warn!(
                    rule_name = %seed.name,
                    error = %e,
                    "Skipping invalid dispatch rule"
                );
            }
        }
    }
    rules
}

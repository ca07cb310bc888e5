use serde::Deserialize;

use crate::error::ConfigError;
use crate::rule::{Category, Rule};
use crate::rules::catalog;
use crate::scoring::SeverityWeights;

/// Optional engine tuning, usually read from a TOML file by the caller.
///
/// ```toml
/// [categories]
/// environmental = false
///
/// [rules]
/// disabled = ["ENV-NOISE-002"]
///
/// [scoring]
/// critical = 100
/// ```
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EngineConfig {
    #[serde(default)]
    pub categories: CategoryToggles,
    #[serde(default)]
    pub rules: RuleToggles,
    #[serde(default)]
    pub scoring: SeverityWeights,
}

impl EngineConfig {
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = toml::from_str(data)?;
        Ok(cfg)
    }

    pub fn is_enabled(&self, rule: &Rule) -> bool {
        self.categories.enabled(rule.category) && !self.rules.disables(rule.id)
    }

    /// Reject disabled ids that do not name a built-in rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.unknown_rules().into_iter().next() {
            Some(id) => Err(ConfigError::UnknownRule(id.to_string())),
            None => Ok(()),
        }
    }

    /// Disabled ids that name no built-in rule, in listed order.
    pub fn unknown_rules(&self) -> Vec<&str> {
        let known = catalog();
        self.rules
            .disabled
            .iter()
            .filter(|id| !known.iter().any(|rule| rule.id == id.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct CategoryToggles {
    #[serde(default)]
    pub structural: Option<bool>,
    #[serde(default)]
    pub zoning: Option<bool>,
    #[serde(default)]
    pub safety: Option<bool>,
    #[serde(default)]
    pub accessibility: Option<bool>,
    #[serde(default)]
    pub environmental: Option<bool>,
}

impl CategoryToggles {
    pub fn enabled(&self, category: Category) -> bool {
        let toggle = match category {
            Category::Structural => self.structural,
            Category::Zoning => self.zoning,
            Category::Safety => self.safety,
            Category::Accessibility => self.accessibility,
            Category::Environmental => self.environmental,
        };
        toggle.unwrap_or(true)
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RuleToggles {
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl RuleToggles {
    pub fn disables(&self, rule_id: &str) -> bool {
        self.disabled.iter().any(|id| id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Severity;

    #[test]
    fn empty_config_enables_everything() -> Result<(), ConfigError> {
        let cfg = EngineConfig::from_toml_str("")?;
        assert!(catalog().iter().all(|rule| cfg.is_enabled(rule)));
        assert_eq!(cfg.scoring.weight(Severity::High), 75);
        Ok(())
    }

    #[test]
    fn toggles_and_weights_parse() -> Result<(), ConfigError> {
        let cfg = EngineConfig::from_toml_str(
            r#"
            [categories]
            environmental = false

            [rules]
            disabled = ["SAF-RAIL-004"]

            [scoring]
            critical = 200
            "#,
        )?;
        cfg.validate()?;
        let enabled: Vec<_> = catalog()
            .into_iter()
            .filter(|rule| cfg.is_enabled(rule))
            .map(|rule| rule.id)
            .collect();
        assert_eq!(enabled.len(), 17);
        assert!(!enabled.contains(&"SAF-RAIL-004"));
        assert!(!enabled.contains(&"ENV-ENERGY-001"));
        assert_eq!(cfg.scoring.weight(Severity::Critical), 200);
        assert_eq!(cfg.scoring.weight(Severity::Low), 25);
        Ok(())
    }

    #[test]
    fn unknown_rule_ids_are_rejected() -> Result<(), ConfigError> {
        let cfg = EngineConfig::from_toml_str("[rules]\ndisabled = [\"STR-XYZ-999\"]")?;
        let err = cfg.validate().unwrap_err();
        assert_eq!(err.to_string(), "config disables unknown rule 'STR-XYZ-999'");
        Ok(())
    }

    #[test]
    fn unknown_rules_lists_every_misspelling() -> Result<(), ConfigError> {
        let cfg = EngineConfig::from_toml_str(
            "[rules]\ndisabled = [\"ZON-SETBAK-001\", \"SAF-EVAC-002\", \"ENV-NOIZE-002\"]",
        )?;
        assert_eq!(cfg.unknown_rules(), vec!["ZON-SETBAK-001", "ENV-NOIZE-002"]);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnknownRule(ref id)) if id == "ZON-SETBAK-001"
        ));
        Ok(())
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("[categories]\nzoning = \"maybe\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

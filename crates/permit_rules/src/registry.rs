use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use crate::config::EngineConfig;
use crate::dataset::Dataset;
use crate::error::{CategoryError, RuleError};
use crate::report::{CatalogSummary, CategoryReport, ValidationReport};
use crate::rule::{Category, Rule, ValidationResult};
use crate::rules::catalog;

const TARGET: &str = "permit_rules.registry";

/// Ordered rule catalog plus bulk and per-category evaluation.
///
/// A registry is immutable once built and can be shared by reference across
/// threads.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// The full built-in catalog.
    pub fn new() -> Self {
        Self::from_rules(catalog())
    }

    /// The built-in catalog minus whatever `config` disables. Disabled ids
    /// that match no rule are logged and otherwise ignored; call
    /// [`EngineConfig::validate`] to reject them instead.
    pub fn with_config(config: &EngineConfig) -> Self {
        for rule_id in config.unknown_rules() {
            warn!(target: TARGET, rule_id, "config disables unknown rule");
        }
        let rules = catalog()
            .into_iter()
            .filter(|rule| config.is_enabled(rule))
            .collect();
        Self::from_rules(rules)
    }

    /// A custom catalog. The first registration of an id wins.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut kept: Vec<Rule> = Vec::with_capacity(rules.len());
        for rule in rules {
            if kept.iter().any(|existing| existing.id == rule.id) {
                warn!(target: TARGET, rule_id = rule.id, "duplicate rule id ignored");
                continue;
            }
            kept.push(rule);
        }
        info!(target: TARGET, rules = kept.len(), "rule registry initialized");
        Self { rules: kept }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get_rule(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == rule_id)
    }

    /// Run every rule in registration order.
    pub fn validate_all(&self, data: &Dataset) -> ValidationReport {
        info!(target: TARGET, rules = self.rules.len(), "starting validation");
        let results = self.rules.iter().map(|rule| run_rule(rule, data)).collect();
        let report = ValidationReport::new(results);
        info!(
            target: TARGET,
            passed = report.summary.total_passed,
            total = report.summary.total_rules,
            "validation complete"
        );
        report
    }

    /// Run the rules of one category, named case-insensitively.
    pub fn validate_by_category(
        &self,
        category: &str,
        data: &Dataset,
    ) -> Result<CategoryReport, CategoryError> {
        let parsed = category.parse::<Category>().map_err(|err| {
            warn!(target: TARGET, category, "invalid category requested");
            err
        })?;
        Ok(self.validate_category(parsed, data))
    }

    pub fn validate_category(&self, category: Category, data: &Dataset) -> CategoryReport {
        info!(target: TARGET, category = category.as_str(), "validating category");
        let results = self
            .rules
            .iter()
            .filter(|rule| rule.category == category)
            .map(|rule| run_rule(rule, data))
            .collect();
        CategoryReport::new(category, results)
    }

    pub fn get_summary(&self) -> CatalogSummary {
        CatalogSummary::from_rules(self.rules.iter().map(Rule::info))
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate one rule, containing any fault to that rule's result.
fn run_rule(rule: &Rule, data: &Dataset) -> ValidationResult {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(data)))
        .unwrap_or_else(|payload| Err(RuleError::Panicked(panic_message(payload.as_ref()))));

    match outcome {
        Ok(result) => {
            debug!(
                target: TARGET,
                rule_id = rule.id,
                "{}",
                if result.passed { "PASS" } else { "FAIL" }
            );
            result
        }
        Err(err) => {
            error!(target: TARGET, rule_id = rule.id, error = %err, "rule evaluation failed");
            ValidationResult::fault(rule.id, &err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

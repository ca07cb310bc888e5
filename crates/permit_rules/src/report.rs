use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::rule::{Category, RuleInfo, Severity, ValidationResult};
use crate::rules::round_to;

/// Outcome of a full validation run, ordered by rule registration.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
    pub summary: Summary,
    pub timestamp: String,
}

impl ValidationReport {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            results,
            summary,
            timestamp: timestamp(),
        }
    }
}

/// Outcome of validating a single category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: Category,
    pub results: Vec<ValidationResult>,
    pub summary: Summary,
    pub timestamp: String,
}

impl CategoryReport {
    pub fn new(category: Category, results: Vec<ValidationResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            category,
            results,
            summary,
            timestamp: timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_rules: usize,
    pub total_passed: usize,
    pub total_failed: usize,
    pub pass_rate_percent: f64,
    pub total_violations: usize,
    pub total_warnings: usize,
    /// Failing rules per severity. Severities with no failures are omitted.
    pub violations_by_severity: BTreeMap<Severity, usize>,
}

impl Summary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let total_rules = results.len();
        let total_passed = results.iter().filter(|r| r.passed).count();
        let pass_rate_percent = if total_rules > 0 {
            round_to(total_passed as f64 / total_rules as f64 * 100.0, 2)
        } else {
            0.0
        };

        let mut violations_by_severity = BTreeMap::new();
        for result in results.iter().filter(|r| !r.passed) {
            *violations_by_severity.entry(result.severity).or_insert(0) += 1;
        }

        Self {
            total_rules,
            total_passed,
            total_failed: total_rules - total_passed,
            pass_rate_percent,
            total_violations: results.iter().map(|r| r.violations.len()).sum(),
            total_warnings: results.iter().map(|r| r.warnings.len()).sum(),
            violations_by_severity,
        }
    }
}

/// Catalog metadata, independent of any dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_rules: usize,
    pub rules_by_category: BTreeMap<Category, usize>,
    pub rules_by_severity: BTreeMap<Severity, usize>,
    pub rules_list: Vec<RuleInfo>,
}

impl CatalogSummary {
    pub fn from_rules(rules: impl IntoIterator<Item = RuleInfo>) -> Self {
        let rules_list: Vec<RuleInfo> = rules.into_iter().collect();
        let mut rules_by_category = BTreeMap::new();
        let mut rules_by_severity = BTreeMap::new();
        for info in &rules_list {
            *rules_by_category.entry(info.category).or_insert(0) += 1;
            *rules_by_severity.entry(info.severity).or_insert(0) += 1;
        }
        Self {
            total_rules: rules_list.len(),
            rules_by_category,
            rules_by_severity,
            rules_list,
        }
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

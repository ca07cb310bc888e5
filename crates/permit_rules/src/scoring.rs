//! Severity-weighted scoring of a validation run.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::registry::RuleRegistry;
use crate::report::ValidationReport;
use crate::rule::{Severity, ValidationResult};

/// Points charged per individual violation, by severity of the failing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            critical: 100,
            high: 75,
            medium: 50,
            low: 25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredViolation {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleWarning {
    pub rule_id: String,
    pub message: String,
}

/// One entry per violation message of every failing result.
pub fn collect_violations(results: &[ValidationResult]) -> Vec<ScoredViolation> {
    results
        .iter()
        .filter(|result| !result.passed)
        .flat_map(|result| {
            result.violations.iter().map(|message| ScoredViolation {
                rule_id: result.rule_id.clone(),
                severity: result.severity,
                message: message.clone(),
            })
        })
        .collect()
}

/// Warnings of every result, passing or not.
pub fn collect_warnings(results: &[ValidationResult]) -> Vec<RuleWarning> {
    results
        .iter()
        .flat_map(|result| {
            result.warnings.iter().map(|message| RuleWarning {
                rule_id: result.rule_id.clone(),
                message: message.clone(),
            })
        })
        .collect()
}

pub fn has_critical_violations(violations: &[ScoredViolation]) -> bool {
    violations
        .iter()
        .any(|violation| violation.severity == Severity::Critical)
}

/// Everything a report generator needs from one run.
#[derive(Debug, Clone, Serialize)]
pub struct ViolationAnalysis {
    pub report: ValidationReport,
    pub violations: Vec<ScoredViolation>,
    pub warnings: Vec<RuleWarning>,
    pub total_severity: u64,
    pub has_critical_violations: bool,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityScorer {
    weights: SeverityWeights,
}

impl SeverityScorer {
    pub fn new(weights: SeverityWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, violations: &[ScoredViolation]) -> u64 {
        violations
            .iter()
            .map(|violation| u64::from(self.weights.weight(violation.severity)))
            .sum()
    }

    pub fn analyze(&self, registry: &RuleRegistry, data: &Dataset) -> ViolationAnalysis {
        let report = registry.validate_all(data);
        let violations = collect_violations(&report.results);
        let warnings = collect_warnings(&report.results);
        ViolationAnalysis {
            total_severity: self.score(&violations),
            has_critical_violations: has_critical_violations(&violations),
            passed: violations.is_empty(),
            report,
            violations,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Evidence;

    fn result(rule_id: &str, severity: Severity, violations: &[&str], warnings: &[&str]) -> ValidationResult {
        ValidationResult {
            rule_id: rule_id.into(),
            passed: violations.is_empty(),
            violations: violations.iter().map(|v| v.to_string()).collect(),
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
            evidence: Evidence::new(),
            severity,
        }
    }

    #[test]
    fn each_violation_is_weighted() {
        let results = vec![
            result("A", Severity::High, &["a1", "a2"], &[]),
            result("B", Severity::Medium, &["b1"], &["bw"]),
            result("C", Severity::Critical, &[], &["cw"]),
        ];
        let violations = collect_violations(&results);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[2].rule_id, "B");
        assert_eq!(SeverityScorer::default().score(&violations), 75 + 75 + 50);
        assert!(!has_critical_violations(&violations));

        let warnings = collect_warnings(&results);
        assert_eq!(
            warnings,
            vec![
                RuleWarning { rule_id: "B".into(), message: "bw".into() },
                RuleWarning { rule_id: "C".into(), message: "cw".into() },
            ]
        );
    }

    #[test]
    fn one_critical_and_one_high_score_175() {
        let results = vec![
            result("STR-LOAD-001", Severity::Critical, &["overloaded"], &[]),
            result("ZON-PARKING-005", Severity::High, &["short of spaces"], &[]),
        ];
        let violations = collect_violations(&results);
        assert_eq!(SeverityScorer::default().score(&violations), 175);
        assert!(has_critical_violations(&violations));
    }

    #[test]
    fn custom_weights_apply() {
        let weights = SeverityWeights {
            critical: 1000,
            ..SeverityWeights::default()
        };
        let violations = collect_violations(&[result("A", Severity::Critical, &["x"], &[])]);
        assert_eq!(SeverityScorer::new(weights).score(&violations), 1000);
        assert!(has_critical_violations(&violations));
    }

    #[test]
    fn clean_runs_score_zero() {
        assert_eq!(SeverityScorer::default().score(&[]), 0);
    }
}

//! Rule identity, outcomes, and the evidence rules collect along the way.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataset::Dataset;
use crate::error::{CategoryError, RuleError};

/// Regulatory area a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Structural,
    Zoning,
    Safety,
    Accessibility,
    Environmental,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Structural,
        Category::Zoning,
        Category::Safety,
        Category::Accessibility,
        Category::Environmental,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::Zoning => "zoning",
            Category::Safety => "safety",
            Category::Accessibility => "accessibility",
            Category::Environmental => "environmental",
        }
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CategoryError::invalid(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Impact tier of a violation. Declared most severe first, so the derived
/// ordering sorts critical before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Permit cannot be approved.
    Critical,
    High,
    Medium,
    /// Advisory.
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named intermediate values a rule records to justify its verdict, in the
/// order they were recorded.
pub type Evidence = Map<String, Value>;

/// Outcome of evaluating one rule against one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule_id: String,
    pub passed: bool,
    pub violations: Vec<String>,
    pub warnings: Vec<String>,
    pub evidence: Evidence,
    pub severity: Severity,
}

impl ValidationResult {
    /// Stand-in result for a rule whose evaluation faulted.
    pub fn fault(rule_id: impl Into<String>, error: &RuleError) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: false,
            violations: vec![format!("Validation error: {error}")],
            warnings: Vec::new(),
            evidence: Evidence::new(),
            severity: Severity::Critical,
        }
    }
}

/// What a rule's evaluation function accumulates before it is stamped with
/// the rule's identity.
#[derive(Debug, Default)]
pub struct Findings {
    violations: Vec<String>,
    warnings: Vec<String>,
    evidence: Evidence,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn record(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.evidence.insert(key.into(), value.into());
    }

    fn into_result(self, rule: &Rule) -> ValidationResult {
        ValidationResult {
            rule_id: rule.id.to_string(),
            passed: self.violations.is_empty(),
            violations: self.violations,
            warnings: self.warnings,
            evidence: self.evidence,
            severity: rule.severity,
        }
    }
}

pub type Evaluate = fn(&Dataset) -> Result<Findings, RuleError>;

/// A single compliance check: identity plus a pure evaluation function.
#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name_he: &'static str,
    pub name_en: &'static str,
    pub category: Category,
    pub severity: Severity,
    evaluate: Evaluate,
}

impl Rule {
    pub const fn new(
        id: &'static str,
        name_he: &'static str,
        name_en: &'static str,
        category: Category,
        severity: Severity,
        evaluate: Evaluate,
    ) -> Self {
        Self {
            id,
            name_he,
            name_en,
            category,
            severity,
            evaluate,
        }
    }

    /// Evaluate, surfacing malformed input as an error.
    pub fn evaluate(&self, data: &Dataset) -> Result<ValidationResult, RuleError> {
        (self.evaluate)(data).map(|findings| findings.into_result(self))
    }

    /// Evaluate, folding any fault into a failing critical result.
    pub fn validate(&self, data: &Dataset) -> ValidationResult {
        match self.evaluate(data) {
            Ok(result) => result,
            Err(err) => ValidationResult::fault(self.id, &err),
        }
    }

    pub fn info(&self) -> RuleInfo {
        RuleInfo {
            rule_id: self.id,
            name_he: self.name_he,
            name_en: self.name_en,
            category: self.category,
            severity: self.severity,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Catalog metadata for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub rule_id: &'static str,
    pub name_he: &'static str,
    pub name_en: &'static str,
    pub category: Category,
    pub severity: Severity,
}

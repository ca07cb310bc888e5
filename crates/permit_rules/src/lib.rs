//! Building permit compliance rules.
//!
//! A [`Dataset`] describing a building and its plot is checked against a
//! fixed catalog of twenty structural, zoning, safety, accessibility and
//! environmental rules. Each rule yields a [`ValidationResult`] with
//! violations, warnings and the evidence behind them; the
//! [`RuleRegistry`] runs the catalog and the [`SeverityScorer`] turns the
//! outcome into a weighted score.
//!
//! ```no_run
//! use permit_rules::{Dataset, RuleRegistry, SeverityScorer};
//!
//! let registry = RuleRegistry::new();
//! let data = Dataset::new(serde_json::json!({ "building": { "num_floors": 3 } }));
//! let analysis = SeverityScorer::default().analyze(&registry, &data);
//! println!("score {}", analysis.total_severity);
//! ```

pub mod calc;
pub mod config;
pub mod dataset;
pub mod error;
pub mod measure;
pub mod model;
pub mod registry;
pub mod report;
pub mod rule;
pub mod rules;
pub mod scoring;

pub use calc::{parking_requirement, parking_standard, property_setbacks, ramp_slope_percent};
pub use config::{CategoryToggles, EngineConfig, RuleToggles};
pub use dataset::{Dataset, ExtractedDimensions};
pub use error::{CategoryError, ConfigError, RuleError};
pub use measure::Measure;
pub use registry::RuleRegistry;
pub use report::{CatalogSummary, CategoryReport, Summary, ValidationReport};
pub use rule::{Category, Evidence, Findings, Rule, RuleInfo, Severity, ValidationResult};
pub use scoring::{
    collect_violations, collect_warnings, has_critical_violations, RuleWarning, ScoredViolation,
    SeverityScorer, SeverityWeights, ViolationAnalysis,
};

use serde::Serialize;
use thiserror::Error;

use crate::rule::Category;

/// A rule could not evaluate the dataset it was given.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("expected a mapping at '{path}'")]
    NotAMapping { path: String },
    #[error("malformed data at '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("rule panicked: {0}")]
    Panicked(String),
}

/// Returned by category-filtered evaluation when the category is unknown.
///
/// Serializes as `{"error": ..., "valid_categories": [...]}`.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[error("{error}")]
pub struct CategoryError {
    pub error: String,
    pub valid_categories: Vec<&'static str>,
}

impl CategoryError {
    pub fn invalid(category: &str) -> Self {
        Self {
            error: format!("Invalid category: {category}"),
            valid_categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config disables unknown rule '{0}'")]
    UnknownRule(String),
}

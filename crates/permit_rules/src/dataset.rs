//! Read-only view over a submission.
//!
//! The submission stays a nested JSON mapping; rules pull the typed sections
//! they need on demand. A missing section deserializes to its defaults, so an
//! absent value behaves exactly like a present zero/false. A section with the
//! wrong shape fails only the rules that read it.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::RuleError;
use crate::model::Section;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    root: Value,
}

impl Dataset {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Deserialize the section at `S::PATH`, or its defaults when absent.
    pub fn section<S: Section>(&self) -> Result<S, RuleError> {
        let mut node = &self.root;
        for (depth, key) in S::PATH.iter().enumerate() {
            let Value::Object(map) = node else {
                return Err(RuleError::NotAMapping {
                    path: S::PATH[..depth].join("."),
                });
            };
            match map.get(*key) {
                Some(next) => node = next,
                None => return Ok(S::default()),
            }
        }
        S::deserialize(node).map_err(|source| RuleError::Malformed {
            path: S::PATH.join("."),
            source,
        })
    }

    /// Build a dataset from the flattened measurements produced by document
    /// extraction. TABA limits and structural members are left empty; they
    /// come from documents the extractor does not read.
    pub fn from_dimensions(dimensions: &ExtractedDimensions) -> Self {
        let height = dimensions.heights.get("building").copied();
        let num_floors = match height {
            Some(h) if h > 0.0 => ((h / 3.0).trunc() as i64).max(1),
            _ => 0,
        };
        let area = |key: &str| dimensions.areas.get(key).copied().map_or(json!(0), Value::from);

        Self::new(json!({
            "building": {
                "setbacks": dimensions.setbacks,
                "height_m": height.map_or(json!(0), Value::from),
                "num_floors": num_floors,
                "total_floor_area_m2": area("total"),
                "footprint_m2": area("built"),
                "use_type": "residential",
            },
            "plot": {
                "area_m2": area("plot"),
                "required_setbacks": {},
                "max_height_m": 0,
                "max_coverage_percent": 0,
                "max_far": 0,
            },
            "structural": {
                "columns": [],
                "beams": [],
                "slabs": [],
            },
            "location": {},
        }))
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for Dataset {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

/// Measurements delivered by the upstream extraction subsystem, keyed by
/// name within each group (e.g. `heights.building`, `areas.plot`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedDimensions {
    #[serde(default)]
    pub setbacks: BTreeMap<String, f64>,
    #[serde(default)]
    pub heights: BTreeMap<String, f64>,
    #[serde(default)]
    pub areas: BTreeMap<String, f64>,
}

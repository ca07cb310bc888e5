use std::collections::BTreeMap;
use std::thread;

use anyhow::Result;
use permit_rules::{Category, Dataset, RuleRegistry, Severity, SeverityScorer};
use serde_json::json;

const CATALOG_ORDER: [&str; 20] = [
    "STR-LOAD-001",
    "STR-FOUND-002",
    "STR-COLUMN-003",
    "STR-BEAM-004",
    "STR-SLAB-005",
    "ZON-SETBACK-001",
    "ZON-HEIGHT-002",
    "ZON-COVERAGE-003",
    "ZON-FAR-004",
    "ZON-PARKING-005",
    "SAF-FIRE-001",
    "SAF-EVAC-002",
    "SAF-STAIR-003",
    "SAF-RAIL-004",
    "SAF-LIGHT-005",
    "ACC-RAMP-001",
    "ACC-DOOR-002",
    "ACC-ELEV-003",
    "ENV-ENERGY-001",
    "ENV-NOISE-002",
];

#[test]
fn results_follow_registration_order() {
    let report = RuleRegistry::new().validate_all(&Dataset::empty());
    let ids: Vec<&str> = report.results.iter().map(|r| r.rule_id.as_str()).collect();
    assert_eq!(ids, CATALOG_ORDER);
    for result in &report.results {
        assert_eq!(result.passed, result.violations.is_empty(), "{}", result.rule_id);
    }
}

#[test]
fn empty_dataset_counts() {
    let registry = RuleRegistry::new();
    let analysis = SeverityScorer::default().analyze(&registry, &Dataset::empty());

    let summary = &analysis.report.summary;
    assert_eq!(summary.total_rules, 20);
    assert_eq!(summary.total_passed, 7);
    assert_eq!(summary.total_failed, 13);
    assert_eq!(summary.pass_rate_percent, 35.0);
    assert_eq!(summary.total_violations, 17);
    assert_eq!(summary.total_warnings, 4);
    assert_eq!(
        summary.violations_by_severity,
        BTreeMap::from([(Severity::Critical, 12), (Severity::High, 1)])
    );
    assert_eq!(analysis.total_severity, 1675);
    assert!(analysis.has_critical_violations);
}

#[test]
fn category_runs_are_a_subset_of_the_full_run() {
    let registry = RuleRegistry::new();
    let data = Dataset::new(json!({ "building": { "num_floors": 5, "height_m": 16.0 } }));
    let full = registry.validate_all(&data);

    for category in Category::ALL {
        let report = registry.validate_category(category, &data);
        assert_eq!(report.category, category);
        let expected: Vec<_> = full
            .results
            .iter()
            .filter(|r| registry.get_rule(&r.rule_id).map(|rule| rule.category) == Some(category))
            .cloned()
            .collect();
        assert_eq!(report.results, expected, "{category}");
    }
}

#[test]
fn category_report_serializes_canonical_name() -> Result<()> {
    let registry = RuleRegistry::new();
    let report = registry.validate_by_category("Zoning", &Dataset::empty())?;
    let value = serde_json::to_value(&report)?;
    assert_eq!(value["category"], "zoning");
    assert_eq!(value["summary"]["total_rules"], 5);
    assert!(value["timestamp"].as_str().is_some_and(|ts| ts.ends_with('Z')));
    Ok(())
}

#[test]
fn empty_category_report_has_zero_pass_rate() -> Result<()> {
    let registry = RuleRegistry::from_rules(Vec::new());
    let report = registry.validate_by_category("safety", &Dataset::empty())?;
    assert!(report.results.is_empty());
    assert_eq!(report.summary.pass_rate_percent, 0.0);
    Ok(())
}

#[test]
fn invalid_category_lists_the_valid_ones() {
    let err = RuleRegistry::new()
        .validate_by_category("invalid_category", &Dataset::empty())
        .unwrap_err();
    assert_eq!(err.error, "Invalid category: invalid_category");
    assert_eq!(
        err.valid_categories,
        ["structural", "zoning", "safety", "accessibility", "environmental"]
    );
}

#[test]
fn registry_is_shareable_across_threads() {
    let registry = RuleRegistry::new();
    let data = Dataset::new(permit_fixtures::non_compliant_building());

    let totals: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| registry.validate_all(&data).summary.total_violations))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("worker panicked"))
            .collect()
    });
    assert_eq!(totals, vec![55; 4]);
}

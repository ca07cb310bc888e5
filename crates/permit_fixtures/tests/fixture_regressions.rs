use permit_fixtures::{compliant_building, minimal_building, non_compliant_building};
use permit_rules::{Dataset, RuleRegistry, SeverityScorer, ViolationAnalysis};
use serde_json::{json, Value};

fn analyze(raw: Value) -> ViolationAnalysis {
    SeverityScorer::default().analyze(&RuleRegistry::new(), &Dataset::new(raw))
}

// pass_rate_percent is asserted separately so float formatting stays out of the snapshots
fn counts(analysis: &ViolationAnalysis) -> Value {
    let summary = &analysis.report.summary;
    json!({
        "summary": {
            "total_rules": summary.total_rules,
            "total_passed": summary.total_passed,
            "total_failed": summary.total_failed,
            "total_violations": summary.total_violations,
            "total_warnings": summary.total_warnings,
            "violations_by_severity": summary.violations_by_severity,
        },
        "total_severity": analysis.total_severity,
        "has_critical_violations": analysis.has_critical_violations,
    })
}

#[test]
fn compliant_fixture_summary() {
    let analysis = analyze(compliant_building());
    assert_eq!(analysis.report.summary.pass_rate_percent, 100.0);
    insta::assert_json_snapshot!(counts(&analysis), @r###"
    {
      "summary": {
        "total_rules": 20,
        "total_passed": 20,
        "total_failed": 0,
        "total_violations": 0,
        "total_warnings": 4,
        "violations_by_severity": {}
      },
      "total_severity": 0,
      "has_critical_violations": false
    }
    "###);
}

#[test]
fn non_compliant_fixture_summary() {
    let analysis = analyze(non_compliant_building());
    assert_eq!(analysis.report.summary.pass_rate_percent, 0.0);
    insta::assert_json_snapshot!(counts(&analysis), @r###"
    {
      "summary": {
        "total_rules": 20,
        "total_passed": 0,
        "total_failed": 20,
        "total_violations": 55,
        "total_warnings": 9,
        "violations_by_severity": {
          "critical": 16,
          "high": 3,
          "medium": 1
        }
      },
      "total_severity": 5150,
      "has_critical_violations": true
    }
    "###);
}

#[test]
fn minimal_fixture_summary() {
    let analysis = analyze(minimal_building());
    assert_eq!(analysis.report.summary.pass_rate_percent, 40.0);
    insta::assert_json_snapshot!(counts(&analysis), @r###"
    {
      "summary": {
        "total_rules": 20,
        "total_passed": 8,
        "total_failed": 12,
        "total_violations": 17,
        "total_warnings": 4,
        "violations_by_severity": {
          "critical": 10,
          "high": 2
        }
      },
      "total_severity": 1625,
      "has_critical_violations": true
    }
    "###);
}

#[test]
fn warnings_of_the_compliant_fixture() {
    let analysis = analyze(compliant_building());
    let warnings: Vec<(String, String)> = analysis
        .warnings
        .into_iter()
        .map(|w| (w.rule_id, w.message))
        .collect();
    insta::assert_json_snapshot!(warnings, @r###"
    [
      [
        "ZON-SETBACK-001",
        "South setback 3.0m is minimal, only 0.0m above required 3.0m"
      ],
      [
        "ZON-SETBACK-001",
        "Front setback 4.0m is minimal, only 0.0m above required 4.0m"
      ],
      [
        "ZON-SETBACK-001",
        "Rear setback 3.0m is minimal, only 0.0m above required 3.0m"
      ],
      [
        "ENV-NOISE-002",
        "Wall sound insulation Rw 54dB is minimal, recommend ≥55dB"
      ]
    ]
    "###);
}

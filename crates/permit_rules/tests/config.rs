use anyhow::Result;
use permit_rules::{Dataset, EngineConfig, RuleRegistry, Severity, SeverityScorer};

#[test]
fn disabled_category_is_absent_from_the_run() -> Result<()> {
    let config = EngineConfig::from_toml_str(
        r#"
        [categories]
        environmental = false
        accessibility = false
        "#,
    )?;
    config.validate()?;

    let registry = RuleRegistry::with_config(&config);
    assert_eq!(registry.len(), 15);

    let report = registry.validate_all(&Dataset::empty());
    assert_eq!(report.summary.total_rules, 15);
    assert!(report
        .results
        .iter()
        .all(|r| !r.rule_id.starts_with("ENV-") && !r.rule_id.starts_with("ACC-")));

    let environmental = registry.validate_by_category("environmental", &Dataset::empty())?;
    assert!(environmental.results.is_empty());
    Ok(())
}

#[test]
fn disabled_rule_is_absent_from_the_run() -> Result<()> {
    let config = EngineConfig::from_toml_str(
        r#"
        [rules]
        disabled = ["ZON-SETBACK-001", "SAF-EVAC-002"]
        "#,
    )?;
    config.validate()?;

    let registry = RuleRegistry::with_config(&config);
    assert!(registry.get_rule("ZON-SETBACK-001").is_none());

    let report = registry.validate_all(&Dataset::new(permit_fixtures::minimal_building()));
    assert_eq!(report.results.len(), 18);
    assert!(report
        .results
        .iter()
        .all(|r| r.rule_id != "ZON-SETBACK-001" && r.rule_id != "SAF-EVAC-002"));
    Ok(())
}

#[test]
fn scoring_weights_come_from_config() -> Result<()> {
    let config = EngineConfig::from_toml_str(
        r#"
        [scoring]
        critical = 10
        high = 5
        medium = 1
        "#,
    )?;
    let scorer = SeverityScorer::new(config.scoring);
    let registry = RuleRegistry::with_config(&config);

    // Weights apply per message, not per failing rule.
    let analysis = scorer.analyze(&registry, &Dataset::empty());
    let critical = analysis
        .violations
        .iter()
        .filter(|v| v.severity == Severity::Critical)
        .count() as u64;
    let high = analysis.violations.len() as u64 - critical;
    assert_eq!(analysis.total_severity, critical * 10 + high * 5);
    assert_eq!(critical * 100 + high * 75, 1675);
    Ok(())
}

#[test]
fn misspelled_disabled_id_is_ignored_by_the_registry() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let config = EngineConfig::from_toml_str(
        r#"
        [rules]
        disabled = ["ZON-SETBAK-001"]
        "#,
    )?;
    assert_eq!(config.unknown_rules(), vec!["ZON-SETBAK-001"]);
    assert!(config.validate().is_err());

    let registry = RuleRegistry::with_config(&config);
    assert_eq!(registry.len(), 20);
    assert!(registry.get_rule("ZON-SETBACK-001").is_some());
    Ok(())
}

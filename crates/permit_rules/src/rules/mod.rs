//! The built-in rule catalog.

mod accessibility;
mod environmental;
mod safety;
mod structural;
mod zoning;

use crate::rule::Rule;

/// All built-in rules in registration order: structural, zoning, safety,
/// accessibility, environmental.
pub fn catalog() -> Vec<Rule> {
    structural::RULES
        .into_iter()
        .chain(zoning::RULES)
        .chain(safety::RULES)
        .chain(accessibility::RULES)
        .chain(environmental::RULES)
        .collect()
}

/// Round half away from zero to `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

#[cfg(test)]
fn run(
    rules: &[Rule],
    rule_id: &str,
    data: serde_json::Value,
) -> crate::rule::ValidationResult {
    let rule = rules
        .iter()
        .find(|rule| rule.id == rule_id)
        .unwrap_or_else(|| panic!("no rule {rule_id}"));
    let result = rule.validate(&crate::dataset::Dataset::new(data));
    assert_eq!(result.passed, result.violations.is_empty());
    result
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::rule::{Category, Severity};

    #[test]
    fn catalog_has_twenty_unique_rules() {
        let rules = catalog();
        assert_eq!(rules.len(), 20);
        let ids: HashSet<_> = rules.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn catalog_is_grouped_by_category() {
        let categories: Vec<Category> = catalog().iter().map(|r| r.category).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);

        let count = |c: Category| categories.iter().filter(|&&x| x == c).count();
        assert_eq!(count(Category::Structural), 5);
        assert_eq!(count(Category::Zoning), 5);
        assert_eq!(count(Category::Safety), 5);
        assert_eq!(count(Category::Accessibility), 3);
        assert_eq!(count(Category::Environmental), 2);
    }

    #[test]
    fn severity_mix() {
        let rules = catalog();
        let count = |s: Severity| rules.iter().filter(|r| r.severity == s).count();
        assert_eq!(count(Severity::Critical), 16);
        assert_eq!(count(Severity::High), 3);
        assert_eq!(count(Severity::Medium), 1);
        assert_eq!(count(Severity::Low), 0);
    }

    #[test]
    fn rounding_matches_reported_precision() {
        assert_eq!(round_to(2.666_666, 2), 2.67);
        assert_eq!(round_to(0.004_96, 4), 0.005);
        assert_eq!(round_to(41.666_666, 1), 41.7);
    }
}

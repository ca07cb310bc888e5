//! Green building (SI 5282) and acoustic insulation (SI 1004) checks.

use crate::dataset::Dataset;
use crate::error::RuleError;
use crate::measure::Measure;
use crate::model::{Acoustic, Energy, ExternalNoise, TotalFloorArea, UseType};
use crate::rule::{Category, Findings, Rule, Severity};

use super::round_to;

pub(super) const RULES: [Rule; 2] = [
    Rule::new(
        "ENV-ENERGY-001",
        "תקן בנייה ירוקה (ת\"י 5282)",
        "Green building standard (SI 5282)",
        Category::Environmental,
        Severity::High,
        green_building,
    ),
    Rule::new(
        "ENV-NOISE-002",
        "בידוד אקוסטי",
        "Acoustic insulation",
        Category::Environmental,
        Severity::Medium,
        acoustic_insulation,
    ),
];

const SI5282_LEVELS: [&str; 4] = ["basic", "intermediate", "advanced", "platinum"];

/// Indoor noise target, dB.
const TARGET_INDOOR_DB: i64 = 35;

fn green_building(data: &Dataset) -> Result<Findings, RuleError> {
    let energy: Energy = data.section()?;
    let mut findings = Findings::new();

    let level = energy.si5282_level.as_str();
    findings.record("si5282_level", level);
    if !level.is_empty() && !SI5282_LEVELS.contains(&level) {
        findings.warning(format!(
            "SI 5282 level '{level}' not recognized. Valid: {}",
            SI5282_LEVELS.join(", ")
        ));
    }

    let (wall, roof, window) = (
        energy.wall_u_value,
        energy.roof_u_value,
        energy.window_u_value,
    );
    findings.record("wall_u_value", wall);
    findings.record("roof_u_value", roof);
    findings.record("window_u_value", window);

    if wall.as_f64() > 0.5 {
        findings.violation(format!(
            "Wall U-value {wall} W/m²K exceeds maximum 0.5 W/m²K (SI 5282)"
        ));
    }
    if roof.as_f64() > 0.35 {
        findings.violation(format!(
            "Roof U-value {roof} W/m²K exceeds maximum 0.35 W/m²K (SI 5282)"
        ));
    }
    if window.as_f64() > 2.0 {
        findings.violation(format!(
            "Window U-value {window} W/m²K exceeds maximum 2.0 W/m²K (SI 5282)"
        ));
    }

    findings.record("has_solar_water_heating", energy.has_solar_water_heating);
    // Only an explicit residential use triggers this.
    let UseType(use_type) = data.section()?;
    if use_type.as_deref() == Some("residential") && !energy.has_solar_water_heating {
        findings.violation("Solar water heating required for residential buildings (SI 5282)");
    }

    let led = energy.led_coverage_percent;
    findings.record("led_coverage_percent", led);
    if led.as_f64() < 80.0 {
        findings.warning(format!(
            "LED coverage {led}% below recommended 80% (SI 5282)"
        ));
    }

    let renewable = energy.renewable_capacity_kw;
    findings.record("renewable_capacity_kw", renewable);
    let floor_area = data.section::<TotalFloorArea>()?.0.as_f64();
    if floor_area > 0.0 {
        let per_m2 = renewable.as_f64() / floor_area;
        findings.record("renewable_kw_per_m2", round_to(per_m2, 4));
        if per_m2 < 0.01 {
            findings.warning(format!(
                "Renewable energy capacity {per_m2:.4} kW/m² below recommended 0.01 kW/m² (SI 5282)"
            ));
        }
    }

    findings.record("has_low_flow_fixtures", energy.has_low_flow_fixtures);
    if !energy.has_low_flow_fixtures {
        findings.warning("Low-flow water fixtures recommended (SI 5282)");
    }

    Ok(findings)
}

fn acoustic_insulation(data: &Dataset) -> Result<Findings, RuleError> {
    let acoustic: Acoustic = data.section()?;
    let mut findings = Findings::new();

    // Zero ratings are treated as "not measured".
    let (wall, floor) = (acoustic.wall_rw_db, acoustic.floor_rw_db);
    findings.record("wall_rw_db", wall);
    findings.record("floor_rw_db", floor);

    if wall.as_f64() > 0.0 && wall.as_f64() < 52.0 {
        findings.violation(format!(
            "Wall sound insulation Rw {wall}dB below minimum 52dB (SI 1004)"
        ));
    } else if wall.as_f64() > 0.0 && wall.as_f64() < 55.0 {
        findings.warning(format!(
            "Wall sound insulation Rw {wall}dB is minimal, recommend ≥55dB"
        ));
    }

    if floor.as_f64() > 0.0 && floor.as_f64() < 52.0 {
        findings.violation(format!(
            "Floor sound insulation Rw {floor}dB below minimum 52dB (SI 1004)"
        ));
    }

    let impact = acoustic.floor_ln_db;
    findings.record("floor_ln_db", impact);
    if impact.as_f64() > 58.0 {
        findings.violation(format!(
            "Floor impact sound Ln {impact}dB exceeds maximum 58dB (SI 1004)"
        ));
    }

    let facade = acoustic.facade_rw_db;
    let ExternalNoise(external) = data.section()?;
    findings.record("facade_rw_db", facade);
    findings.record("external_noise_db", external);
    if external.as_f64() > 0.0 {
        let required = external - Measure::Int(TARGET_INDOOR_DB);
        findings.record("required_facade_rw_db", required);
        if facade < required {
            findings.violation(format!(
                "Facade sound insulation Rw {facade}dB below required {required}dB for external noise {external}dB (SI 1004)"
            ));
        }
    }

    let window = acoustic.window_rw_db;
    findings.record("window_rw_db", window);
    if window.as_f64() > 0.0 && window.as_f64() < 30.0 {
        findings.warning(format!(
            "Window sound insulation Rw {window}dB below recommended 30dB"
        ));
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::run;
    use super::*;

    #[test]
    fn empty_energy_data_only_warns() {
        let result = run(&RULES, "ENV-ENERGY-001", json!({}));
        assert!(result.passed);
        assert_eq!(
            result.warnings,
            vec![
                "LED coverage 0% below recommended 80% (SI 5282)",
                "Low-flow water fixtures recommended (SI 5282)",
            ]
        );
        assert!(!result.evidence.contains_key("renewable_kw_per_m2"));
    }

    #[test]
    fn poor_envelope_and_missing_solar() {
        let result = run(
            &RULES,
            "ENV-ENERGY-001",
            json!({ "building": {
                "use_type": "residential",
                "total_floor_area_m2": 2000,
                "environmental": { "energy": {
                    "si5282_level": "gold",
                    "wall_u_value": 0.6,
                    "roof_u_value": 0.4,
                    "window_u_value": 2.5,
                    "led_coverage_percent": 90,
                    "renewable_capacity_kw": 10,
                    "has_low_flow_fixtures": true
                }}
            }}),
        );
        assert_eq!(
            result.violations,
            vec![
                "Wall U-value 0.6 W/m²K exceeds maximum 0.5 W/m²K (SI 5282)",
                "Roof U-value 0.4 W/m²K exceeds maximum 0.35 W/m²K (SI 5282)",
                "Window U-value 2.5 W/m²K exceeds maximum 2.0 W/m²K (SI 5282)",
                "Solar water heating required for residential buildings (SI 5282)",
            ]
        );
        assert_eq!(
            result.warnings,
            vec![
                "SI 5282 level 'gold' not recognized. Valid: basic, intermediate, advanced, platinum",
                "Renewable energy capacity 0.0050 kW/m² below recommended 0.01 kW/m² (SI 5282)",
            ]
        );
        assert_eq!(result.evidence["renewable_kw_per_m2"], 0.005);
    }

    #[test]
    fn facade_requirement_follows_external_noise() {
        let result = run(
            &RULES,
            "ENV-NOISE-002",
            json!({
                "building": { "environmental": { "acoustic": {
                    "wall_rw_db": 53, "floor_rw_db": 50, "floor_ln_db": 60,
                    "facade_rw_db": 30, "window_rw_db": 28
                }}},
                "location": { "external_noise_db": 70 }
            }),
        );
        assert_eq!(
            result.violations,
            vec![
                "Floor sound insulation Rw 50dB below minimum 52dB (SI 1004)",
                "Floor impact sound Ln 60dB exceeds maximum 58dB (SI 1004)",
                "Facade sound insulation Rw 30dB below required 35dB for external noise 70dB (SI 1004)",
            ]
        );
        assert_eq!(
            result.warnings,
            vec![
                "Wall sound insulation Rw 53dB is minimal, recommend ≥55dB",
                "Window sound insulation Rw 28dB below recommended 30dB",
            ]
        );
        assert_eq!(result.evidence["required_facade_rw_db"], 35);
    }

    #[test]
    fn unmeasured_acoustics_pass() {
        let result = run(&RULES, "ENV-NOISE-002", json!({}));
        assert!(result.passed);
        assert!(result.warnings.is_empty());
        assert!(!result.evidence.contains_key("required_facade_rw_db"));
    }
}

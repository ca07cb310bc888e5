//! TABA envelope checks: setbacks, height, coverage, FAR and parking.

use crate::calc::{parking_requirement, parking_standard};
use crate::dataset::Dataset;
use crate::error::RuleError;
use crate::measure::Measure;
use crate::model::{
    BuildingHeight, BuildingSetbacks, CommercialArea, Direction, Footprint, MaxCoverage, MaxFar,
    MaxFloors, MaxHeight, NumFloors, NumUnits, Parking, PlotArea, RequiredSetbacks,
    ResidentialArea, ServiceArea, TotalFloorArea, UseType,
};
use crate::rule::{Category, Findings, Rule, Severity};

use super::round_to;

pub(super) const RULES: [Rule; 5] = [
    Rule::new(
        "ZON-SETBACK-001",
        "נסיגה מגבול המגרש",
        "Building setbacks from property line",
        Category::Zoning,
        Severity::Critical,
        setbacks,
    ),
    Rule::new(
        "ZON-HEIGHT-002",
        "גובה בניין מקסימלי",
        "Maximum building height",
        Category::Zoning,
        Severity::Critical,
        building_height,
    ),
    Rule::new(
        "ZON-COVERAGE-003",
        "אחוז כיסוי",
        "Building coverage percentage",
        Category::Zoning,
        Severity::Critical,
        coverage,
    ),
    Rule::new(
        "ZON-FAR-004",
        "תכסית קומות (תב\"ע)",
        "Floor Area Ratio (FAR)",
        Category::Zoning,
        Severity::Critical,
        floor_area_ratio,
    ),
    Rule::new(
        "ZON-PARKING-005",
        "דרישות חניה",
        "Required parking spaces",
        Category::Zoning,
        Severity::High,
        parking,
    ),
];

const DEFAULT_MIN_SETBACK_M: f64 = 3.0;

fn setbacks(data: &Dataset) -> Result<Findings, RuleError> {
    let RequiredSetbacks(required) = data.section()?;
    let BuildingSetbacks(actual) = data.section()?;
    let mut findings = Findings::new();

    for direction in Direction::ALL {
        let needed = required.get(direction);
        if needed.as_f64() <= 0.0 {
            continue;
        }
        let have = actual.get(direction);
        let label = direction.label();
        findings.record(
            format!("setback_{}", direction.key()),
            format!("required={needed}m, actual={have}m"),
        );

        if have < needed {
            findings.violation(format!(
                "{label} setback {have}m is below required {needed}m (shortage: {}m) per TABA",
                needed - have
            ));
        } else if have.as_f64() < needed.as_f64() + 0.5 {
            findings.warning(format!(
                "{label} setback {have}m is minimal, only {}m above required {needed}m",
                have - needed
            ));
        }
    }

    // The blanket minimum only applies when the plan sets no per-direction values.
    let min_setback = actual.minimum().unwrap_or_default();
    findings.record("minimum_setback", format!("{min_setback}m"));
    if min_setback.as_f64() < DEFAULT_MIN_SETBACK_M && required.is_empty() {
        findings.violation(format!(
            "Minimum setback {min_setback}m is below default minimum {}m",
            Measure::Float(DEFAULT_MIN_SETBACK_M)
        ));
    }

    Ok(findings)
}

fn building_height(data: &Dataset) -> Result<Findings, RuleError> {
    let MaxHeight(max_height) = data.section()?;
    let BuildingHeight(height) = data.section()?;
    let mut findings = Findings::new();

    findings.record("building_height_m", height);
    findings.record("max_allowed_height_m", max_height);

    if max_height.as_f64() > 0.0 {
        if height > max_height {
            findings.violation(format!(
                "Building height {height}m exceeds maximum {max_height}m (excess: {}m) per TABA",
                height - max_height
            ));
        } else if height.as_f64() > max_height.as_f64() * 0.95 {
            findings.warning(format!(
                "Building height {height}m is very close to maximum {max_height}m, only {}m margin",
                max_height - height
            ));
        }
    }

    let floors = data.section::<NumFloors>()?.floors();
    let MaxFloors(max_floors) = data.section()?;
    findings.record("num_floors", floors);
    findings.record("max_floors", max_floors);

    if max_floors.as_f64() > 0.0 && floors > max_floors {
        findings.violation(format!(
            "Number of floors {floors} exceeds maximum {max_floors} per TABA"
        ));
    }

    if floors.as_f64() > 0.0 && height.as_f64() > 0.0 {
        let avg = height.as_f64() / floors.as_f64();
        findings.record("avg_floor_height_m", round_to(avg, 2));
        if avg < 2.6 {
            findings.violation(format!(
                "Average floor height {avg:.2}m is below minimum 2.6m"
            ));
        } else if avg > 4.5 {
            findings.warning(format!(
                "Average floor height {avg:.2}m is unusually high, verify"
            ));
        }
    }

    Ok(findings)
}

fn coverage(data: &Dataset) -> Result<Findings, RuleError> {
    let PlotArea(plot_area) = data.section()?;
    let mut findings = Findings::new();

    findings.record("plot_area_m2", plot_area);
    if plot_area.is_zero() {
        findings.violation("Plot area not provided");
        return Ok(findings);
    }

    let Footprint(footprint) = data.section()?;
    findings.record("building_footprint_m2", footprint);

    let percent = footprint.as_f64() / plot_area.as_f64() * 100.0;
    findings.record("coverage_percent", round_to(percent, 2));

    let MaxCoverage(max_coverage) = data.section()?;
    findings.record("max_coverage_percent", max_coverage);

    let max = max_coverage.as_f64();
    if max > 0.0 {
        if percent > max {
            findings.violation(format!(
                "Building coverage {percent:.1}% exceeds maximum {max_coverage}% (excess: {:.1}%) per TABA",
                percent - max
            ));
        } else if percent > max * 0.95 {
            findings.warning(format!(
                "Building coverage {percent:.1}% is very close to maximum {max_coverage}%, only {:.1}% margin",
                max - percent
            ));
        }
    } else if percent > 50.0 {
        findings.warning(format!(
            "Building coverage {percent:.1}% exceeds typical maximum 50%"
        ));
    }

    Ok(findings)
}

fn floor_area_ratio(data: &Dataset) -> Result<Findings, RuleError> {
    let PlotArea(plot_area) = data.section()?;
    let mut findings = Findings::new();

    findings.record("plot_area_m2", plot_area);
    if plot_area.is_zero() {
        findings.violation("Plot area not provided");
        return Ok(findings);
    }
    let area = plot_area.as_f64();

    let TotalFloorArea(total) = data.section()?;
    findings.record("total_floor_area_m2", total);

    let far = total.as_f64() / area;
    findings.record("far", round_to(far, 2));

    let MaxFar(max_far) = data.section()?;
    findings.record("max_far", max_far);

    let max = max_far.as_f64();
    if max > 0.0 {
        if far > max {
            let excess = far - max;
            findings.violation(format!(
                "FAR {far:.2} exceeds maximum {max_far} (excess: {excess:.2}, excess area: {:.1}m²) per TABA",
                excess * area
            ));
        } else if far > max * 0.95 {
            let margin = max - far;
            findings.warning(format!(
                "FAR {far:.2} is very close to maximum {max_far}, only {margin:.2} margin ({:.1}m²)",
                margin * area
            ));
        }
    } else if far > 1.5 {
        findings.warning(format!(
            "FAR {far:.2} exceeds typical maximum 1.5 for residential"
        ));
    }

    let ResidentialArea(residential) = data.section()?;
    let CommercialArea(commercial) = data.section()?;
    let ServiceArea(service) = data.section()?;
    let breakdown = [
        ("residential_area_m2", residential),
        ("commercial_area_m2", commercial),
        ("service_area_m2", service),
    ];
    if breakdown.iter().any(|(_, value)| !value.is_zero()) {
        for (key, value) in breakdown {
            findings.record(key, value);
        }
        let sum = breakdown
            .iter()
            .fold(Measure::ZERO, |acc, (_, value)| acc + *value);
        if (sum - total).abs().as_f64() > 1.0 {
            findings.warning(format!(
                "Sum of area breakdown ({sum}m²) doesn't match total floor area ({total}m²)"
            ));
        }
    }

    Ok(findings)
}

fn parking(data: &Dataset) -> Result<Findings, RuleError> {
    let use_type: UseType = data.section()?;
    let TotalFloorArea(floor_area) = data.section()?;
    let NumUnits(units) = data.section()?;
    let parking: Parking = data.section()?;
    let mut findings = Findings::new();

    let provided = parking.total_spaces;
    findings.record("provided_spaces", provided);

    let use_type = use_type.or_residential();
    let required = parking_requirement(floor_area.as_f64(), use_type, units.as_f64());
    findings.record("required_spaces", required);
    findings.record("calculation_basis", parking_standard(use_type));

    let required = Measure::Int(required);
    if provided < required {
        findings.violation(format!(
            "Parking spaces {provided} below required {required} (shortage: {} spaces)",
            required - provided
        ));
    } else if provided < required + Measure::Int(2) {
        findings.warning(format!(
            "Parking spaces {provided} barely meets requirement of {required}, consider adding buffer"
        ));
    }

    // 5% of all spaces, and never fewer than one.
    let accessible = parking.accessible_spaces;
    let min_accessible = ((provided.as_f64() * 0.05).trunc() as i64).max(1);
    findings.record("accessible_spaces", accessible);
    findings.record("min_accessible_spaces", min_accessible);

    if accessible < Measure::Int(min_accessible) {
        findings.violation(format!(
            "Accessible parking spaces {accessible} below minimum {min_accessible} (5% of total, minimum 1)"
        ));
    }

    Ok(findings)
}

//! Fire, evacuation, stair, railing and emergency lighting checks
//! (SI 1220, SI 1142).

use crate::dataset::Dataset;
use crate::error::RuleError;
use crate::model::{
    item_label, BuildingHeight, EmergencyLighting, Evacuation, FireSuppression, HasRoofAccess,
    MaxOccupancy, NumFloors, Railings, Stairways, TypicalFloorArea, UseType,
};
use crate::rule::{Category, Findings, Rule, Severity};

pub(super) const RULES: [Rule; 5] = [
    Rule::new(
        "SAF-FIRE-001",
        "דרישות כיבוי אש",
        "Fire suppression requirements",
        Category::Safety,
        Severity::Critical,
        fire_suppression,
    ),
    Rule::new(
        "SAF-EVAC-002",
        "יציאות חירום",
        "Emergency exits",
        Category::Safety,
        Severity::Critical,
        emergency_exits,
    ),
    Rule::new(
        "SAF-STAIR-003",
        "מידות חדר מדרגות",
        "Stairway dimensions",
        Category::Safety,
        Severity::Critical,
        stairways,
    ),
    Rule::new(
        "SAF-RAIL-004",
        "מעקות בטיחות",
        "Safety railings",
        Category::Safety,
        Severity::Critical,
        railings,
    ),
    Rule::new(
        "SAF-LIGHT-005",
        "תאורת חירום",
        "Emergency lighting",
        Category::Safety,
        Severity::High,
        emergency_lighting,
    ),
];

fn fire_suppression(data: &Dataset) -> Result<Findings, RuleError> {
    let floors = data.section::<NumFloors>()?.floors();
    let BuildingHeight(height) = data.section()?;
    let use_type: UseType = data.section()?;
    let fire: FireSuppression = data.section()?;
    let mut findings = Findings::new();

    let building_use = use_type.or_residential();
    findings.record("num_floors", floors);
    findings.record("building_height_m", height);
    findings.record("building_use", building_use);

    findings.record("has_sprinkler_system", fire.has_sprinkler_system);
    if (floors.as_f64() > 4.0 || height.as_f64() > 12.0) && !fire.has_sprinkler_system {
        findings.violation(format!(
            "Sprinkler system required for buildings with {floors} floors or height {height}m (SI 1220 Part 4)"
        ));
    }

    findings.record("has_fire_extinguishers", fire.has_fire_extinguishers);
    if !fire.has_fire_extinguishers {
        findings.violation("Fire extinguishers required on every floor (SI 1220)");
    }

    findings.record("has_fire_alarm", fire.has_fire_alarm);
    let alarm_use = matches!(
        building_use,
        "residential" | "commercial" | "office" | "assembly"
    );
    if alarm_use && floors.as_f64() > 2.0 && !fire.has_fire_alarm {
        findings.violation(format!(
            "Fire alarm system required for {building_use} building with {floors} floors (SI 1220)"
        ));
    }

    findings.record("has_fire_rated_elements", fire.has_fire_rated_elements);
    if floors.as_f64() > 2.0 && !fire.has_fire_rated_elements {
        findings.warning("Fire-rated doors and walls recommended for multi-floor buildings");
    }

    Ok(findings)
}

fn emergency_exits(data: &Dataset) -> Result<Findings, RuleError> {
    let floors = data.section::<NumFloors>()?.floors();
    let MaxOccupancy(occupancy) = data.section()?;
    let TypicalFloorArea(floor_area) = data.section()?;
    let UseType(use_type) = data.section()?;
    let evac: Evacuation = data.section()?;
    let mut findings = Findings::new();

    findings.record("num_floors", floors);
    findings.record("floor_area_m2", floor_area);
    findings.record("max_occupancy", occupancy);

    let exits = evac.num_emergency_exits;
    findings.record("num_emergency_exits", exits);
    if floors.as_f64() > 2.0 || occupancy.as_f64() > 50.0 {
        if exits.as_f64() < 2.0 {
            findings.violation(format!(
                "Minimum 2 emergency exits required for {floors} floors or occupancy {occupancy} (SI 1220 Part 3)"
            ));
        }
    } else if exits.as_f64() < 1.0 {
        findings.violation("At least 1 emergency exit required");
    }

    findings.record("exit_widths_cm", evac.exit_widths_cm.clone());
    for (index, width) in evac.exit_widths_cm.iter().enumerate() {
        if width.as_f64() < 90.0 {
            findings.violation(format!(
                "Emergency exit {} width {width}cm below minimum 90cm (SI 1220)",
                index + 1
            ));
        }
    }

    let travel = evac.max_travel_distance_m;
    findings.record("max_travel_distance_m", travel);
    // Assembly halls get the stricter limit; an absent use type does not.
    let max_allowed = if use_type.as_deref() == Some("assembly") {
        20
    } else {
        30
    };
    if travel.as_f64() > max_allowed as f64 {
        findings.violation(format!(
            "Maximum travel distance {travel}m exceeds limit {max_allowed}m (SI 1220)"
        ));
    }

    findings.record("has_emergency_lighting", evac.has_emergency_lighting);
    if !evac.has_emergency_lighting && floors.as_f64() > 2.0 {
        findings.violation("Emergency lighting required on exit routes (SI 1220)");
    }

    Ok(findings)
}

fn stairways(data: &Dataset) -> Result<Findings, RuleError> {
    let Stairways(stairs) = data.section()?;
    let mut findings = Findings::new();
    if stairs.is_empty() {
        findings.violation("No stairway data provided");
        return Ok(findings);
    }

    for (index, stair) in stairs.iter().enumerate() {
        let id = item_label(stair.id.as_deref(), "Stairway", index);

        let tread = stair.tread_depth_cm;
        findings.record(format!("{id}_tread_depth_cm"), tread);
        if tread.as_f64() < 25.0 {
            findings.violation(format!(
                "{id}: Tread depth {tread}cm below minimum 25cm (SI 1142)"
            ));
        }

        let riser = stair.riser_height_cm;
        findings.record(format!("{id}_riser_height_cm"), riser);
        if riser.as_f64() > 19.0 {
            findings.violation(format!(
                "{id}: Riser height {riser}cm exceeds maximum 19cm (SI 1142)"
            ));
        } else if riser.as_f64() < 12.0 {
            findings.warning(format!("{id}: Riser height {riser}cm is unusually low"));
        }

        let width = stair.width_cm;
        findings.record(format!("{id}_width_cm"), width);
        if width.as_f64() < 120.0 {
            findings.violation(format!(
                "{id}: Width {width}cm below minimum 120cm (SI 1142)"
            ));
        }

        let headroom = stair.headroom_cm;
        findings.record(format!("{id}_headroom_cm"), headroom);
        if headroom.as_f64() < 210.0 {
            findings.violation(format!(
                "{id}: Headroom {headroom}cm below minimum 210cm (SI 1142)"
            ));
        }

        let landing = stair.landing_depth_cm;
        findings.record(format!("{id}_landing_depth_cm"), landing);
        if landing < width {
            findings.warning(format!(
                "{id}: Landing depth {landing}cm should be at least equal to width {width}cm"
            ));
        }
    }

    Ok(findings)
}

fn railings(data: &Dataset) -> Result<Findings, RuleError> {
    let HasRoofAccess(roof_access) = data.section()?;
    let railings: Railings = data.section()?;
    let mut findings = Findings::new();

    // Heights and capacity of zero mean "not specified" and are not checked.
    let balcony = railings.balcony_height_cm;
    findings.record("balcony_railing_height_cm", balcony);
    if balcony.as_f64() > 0.0 && balcony.as_f64() < 110.0 {
        findings.violation(format!(
            "Balcony railing height {balcony}cm below minimum 110cm (SI 1142)"
        ));
    }

    let stair = railings.stair_height_cm;
    findings.record("stair_railing_height_cm", stair);
    if stair.as_f64() > 0.0 && stair.as_f64() < 90.0 {
        findings.violation(format!(
            "Stairway railing height {stair}cm below minimum 90cm (SI 1142)"
        ));
    }

    let spacing = railings.bar_spacing_cm;
    findings.record("bar_spacing_cm", spacing);
    if spacing.as_f64() > 12.0 {
        findings.violation(format!(
            "Railing bar spacing {spacing}cm exceeds maximum 12cm (SI 1142)"
        ));
    }

    let capacity = railings.load_capacity_kn;
    findings.record("railing_load_capacity_kn", capacity);
    if capacity.as_f64() > 0.0 && capacity.as_f64() < 1.5 {
        findings.violation(format!(
            "Railing load capacity {capacity}kN below minimum 1.5kN (SI 1142)"
        ));
    }

    findings.record("has_roof_access", roof_access);
    findings.record("has_roof_railing", railings.has_roof_railing);
    if roof_access && !railings.has_roof_railing {
        findings.violation("Roof railing required for accessible roofs (SI 1142)");
    }

    Ok(findings)
}

fn emergency_lighting(data: &Dataset) -> Result<Findings, RuleError> {
    let floors = data.section::<NumFloors>()?.floors();
    let use_type: UseType = data.section()?;
    let lighting: EmergencyLighting = data.section()?;
    let mut findings = Findings::new();

    let building_use = use_type.or_residential();
    findings.record("num_floors", floors);
    findings.record("building_use", building_use);

    let has_system = lighting.has_system;
    findings.record("has_emergency_lighting", has_system);
    let public_use = matches!(building_use, "commercial" | "office" | "assembly");
    if (floors.as_f64() > 2.0 || public_use) && !has_system {
        findings.violation(format!(
            "Emergency lighting required for {floors}-floor {building_use} building (SI 1220)"
        ));
    }

    let backup = lighting.backup_duration_minutes;
    findings.record("backup_duration_minutes", backup);
    if has_system && backup.as_f64() < 90.0 {
        findings.violation(format!(
            "Emergency lighting backup duration {backup} minutes below minimum 90 minutes (SI 1220)"
        ));
    }

    let lux = lighting.min_illumination_lux;
    findings.record("min_illumination_lux", lux);
    if has_system && lux.as_f64() < 1.0 {
        findings.violation(format!(
            "Emergency lighting illumination {lux} lux below minimum 1 lux (SI 1220)"
        ));
    }

    findings.record("has_exit_signs", lighting.has_exit_signs);
    if floors.as_f64() > 2.0 && !lighting.has_exit_signs {
        findings.warning("Illuminated exit signs recommended for multi-floor buildings");
    }

    let coverage = lighting.escape_route_coverage_percent;
    findings.record("escape_route_coverage_percent", coverage);
    if has_system && coverage.as_f64() < 100.0 {
        findings.violation(format!(
            "Emergency lighting must cover 100% of escape routes, current coverage: {coverage}%"
        ));
    }

    Ok(findings)
}

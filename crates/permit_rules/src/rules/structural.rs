//! Load, foundation and member sizing checks (SI 413, SI 466).

use crate::dataset::Dataset;
use crate::error::RuleError;
use crate::measure::Measure;
use crate::model::{
    item_label, Beams, Columns, Foundation, Loads, NumFloors, SeismicZone, Slabs, UseType,
};
use crate::rule::{Category, Findings, Rule, Severity};

use super::round_to;

pub(super) const RULES: [Rule; 5] = [
    Rule::new(
        "STR-LOAD-001",
        "אימות עומסי תכנון",
        "Design loads verification",
        Category::Structural,
        Severity::Critical,
        design_loads,
    ),
    Rule::new(
        "STR-FOUND-002",
        "עומק יסוד מינימלי",
        "Foundation depth minimum",
        Category::Structural,
        Severity::Critical,
        foundation_depth,
    ),
    Rule::new(
        "STR-COLUMN-003",
        "מידות עמודים",
        "Column dimensions",
        Category::Structural,
        Severity::Critical,
        column_dimensions,
    ),
    Rule::new(
        "STR-BEAM-004",
        "מידות קורות",
        "Beam dimensions",
        Category::Structural,
        Severity::Critical,
        beam_dimensions,
    ),
    Rule::new(
        "STR-SLAB-005",
        "עובי תקרה",
        "Slab thickness",
        Category::Structural,
        Severity::Critical,
        slab_thickness,
    ),
];

/// SI 413 Table 2, kN/m².
fn min_live_load(use_type: &str) -> f64 {
    match use_type {
        "office" => 2.5,
        "commercial" => 4.0,
        "storage" | "assembly" => 5.0,
        _ => 2.0,
    }
}

/// SI 466 minimum founding depth per soil class, metres.
fn min_depth_for_soil(soil_type: &str) -> Option<f64> {
    match soil_type {
        "rock" => Some(0.8),
        "gravel" => Some(1.0),
        "sand" => Some(1.2),
        "clay" => Some(1.5),
        "organic" => Some(2.0),
        _ => None,
    }
}

fn design_loads(data: &Dataset) -> Result<Findings, RuleError> {
    let loads: Loads = data.section()?;
    let mut findings = Findings::new();

    let dead = loads.dead_load_kn_m2;
    findings.record("dead_load_kn_m2", dead);
    if dead.as_f64() < 3.5 {
        findings.violation(format!(
            "Dead load {dead} kN/m² is below minimum 3.5 kN/m² (SI 413)"
        ));
    } else if dead.as_f64() < 4.0 {
        findings.warning(format!(
            "Dead load {dead} kN/m² is low, verify calculations"
        ));
    }

    let live = loads.live_load_kn_m2;
    let use_type: UseType = data.section()?;
    let building_use = use_type.or_residential();
    findings.record("live_load_kn_m2", live);
    findings.record("building_use", building_use);

    let min_live = Measure::Float(min_live_load(building_use));
    if live < min_live {
        findings.violation(format!(
            "Live load {live} kN/m² is below minimum {min_live} kN/m² for {building_use} use (SI 413 Table 2)"
        ));
    }

    let wind = loads.wind_load_kn_m2;
    findings.record("wind_load_kn_m2", wind);
    if wind.as_f64() < 0.6 {
        findings.violation(format!(
            "Wind load {wind} kN/m² is below minimum 0.6 kN/m² (SI 413)"
        ));
    }

    let seismic = loads.seismic_coefficient;
    let SeismicZone(zone) = data.section()?;
    findings.record("seismic_zone", zone);
    findings.record("seismic_coefficient", seismic);
    if seismic.as_f64() < 0.1 {
        findings.violation(format!(
            "Seismic coefficient {seismic} is below minimum 0.1 (SI 413)"
        ));
    }

    Ok(findings)
}

fn foundation_depth(data: &Dataset) -> Result<Findings, RuleError> {
    let foundation: Foundation = data.section()?;
    let mut findings = Findings::new();

    let depth = foundation.depth_m;
    findings.record("foundation_depth_m", depth);
    if depth.as_f64() < 1.0 {
        findings.violation(format!(
            "Foundation depth {depth}m is below minimum 1.0m (SI 466 Section 4.2)"
        ));
    } else if depth.as_f64() < 1.2 {
        findings.warning(format!(
            "Foundation depth {depth}m is minimal, consider deeper foundation"
        ));
    }

    let soil = foundation.soil_type.as_str();
    findings.record("soil_type", soil);
    match min_depth_for_soil(soil) {
        Some(min_depth) => {
            let min_depth = Measure::Float(min_depth);
            findings.record("min_depth_for_soil", min_depth);
            if depth < min_depth {
                findings.violation(format!(
                    "Foundation depth {depth}m is below minimum {min_depth}m for {soil} soil (SI 466)"
                ));
            }
        }
        None => findings.warning(format!(
            "Soil type '{soil}' not recognized, verify foundation depth"
        )),
    }

    let bearing = foundation.bearing_capacity_kn_m2;
    findings.record("bearing_capacity_kn_m2", bearing);
    if bearing.as_f64() < 100.0 {
        findings.violation(format!(
            "Bearing capacity {bearing} kN/m² is below minimum 100 kN/m² (SI 466)"
        ));
    }

    Ok(findings)
}

fn column_dimensions(data: &Dataset) -> Result<Findings, RuleError> {
    let Columns(columns) = data.section()?;
    let mut findings = Findings::new();
    if columns.is_empty() {
        findings.violation("No column data provided");
        return Ok(findings);
    }

    let NumFloors(num_floors) = data.section()?;
    let num_floors = num_floors.unwrap_or(Measure::Int(1));
    findings.record("num_floors", num_floors);

    // 25x25 generally, 30x30 once the building exceeds three floors.
    let min_area = if num_floors.as_f64() > 3.0 {
        Measure::Int(900)
    } else {
        Measure::Int(625)
    };

    for (index, column) in columns.iter().enumerate() {
        let id = item_label(column.id.as_deref(), "Column", index);
        let (width, depth) = (column.width_cm, column.depth_cm);
        findings.record(format!("{id}_dimensions"), format!("{width}x{depth}cm"));

        if width.as_f64() < 25.0 || depth.as_f64() < 25.0 {
            findings.violation(format!(
                "{id}: Dimension {width}x{depth}cm has side below minimum 25cm (SI 466 Section 7.4.1)"
            ));
        }

        let area = width * depth;
        if area < min_area {
            findings.violation(format!(
                "{id}: Area {area}cm² is below minimum {min_area}cm² for {num_floors}-floor building (SI 466)"
            ));
        }

        let longer = width.max(depth).as_f64();
        let shorter = width.min(depth).as_f64();
        match (shorter > 0.0).then(|| longer / shorter) {
            Some(aspect) => {
                findings.record(format!("{id}_aspect_ratio"), round_to(aspect, 2));
                if aspect > 3.0 {
                    findings.warning(format!(
                        "{id}: Aspect ratio {aspect:.2} exceeds recommended 3.0, verify slenderness calculations"
                    ));
                }
            }
            None => findings.record(format!("{id}_aspect_ratio"), 0),
        }
    }

    Ok(findings)
}

fn beam_dimensions(data: &Dataset) -> Result<Findings, RuleError> {
    let Beams(beams) = data.section()?;
    let mut findings = Findings::new();
    if beams.is_empty() {
        findings.violation("No beam data provided");
        return Ok(findings);
    }

    for (index, beam) in beams.iter().enumerate() {
        let id = item_label(beam.id.as_deref(), "Beam", index);
        let (width, height, span) = (beam.width_cm, beam.height_cm, beam.span_m);
        findings.record(
            format!("{id}_dimensions"),
            format!("{width}x{height}cm, span={span}m"),
        );

        if width.as_f64() < 20.0 {
            findings.violation(format!(
                "{id}: Width {width}cm is below minimum 20cm (SI 466 Section 9.2.1)"
            ));
        }

        // h >= span/12, span in metres and h in centimetres.
        let min_height = span.as_f64() * 100.0 / 12.0;
        findings.record(format!("{id}_min_height_cm"), round_to(min_height, 1));

        if height.as_f64() < min_height {
            findings.violation(format!(
                "{id}: Height {height}cm is below minimum {min_height:.1}cm for span {span}m (h ≥ span/12, SI 466)"
            ));
        } else if height.as_f64() < min_height * 1.1 {
            findings.warning(format!(
                "{id}: Height {height}cm is minimal for span {span}m, recommend ≥{:.1}cm",
                min_height * 1.1
            ));
        }

        if span.as_f64() > 8.0 {
            findings.warning(format!(
                "{id}: Span {span}m exceeds recommended maximum 8.0m, verify deflection calculations"
            ));
        }
    }

    Ok(findings)
}

fn slab_thickness(data: &Dataset) -> Result<Findings, RuleError> {
    let Slabs(slabs) = data.section()?;
    let mut findings = Findings::new();
    if slabs.is_empty() {
        findings.violation("No slab data provided");
        return Ok(findings);
    }

    for (index, slab) in slabs.iter().enumerate() {
        let id = item_label(slab.id.as_deref(), "Slab", index);
        let (thickness, span) = (slab.thickness_cm, slab.span_m);
        let kind = slab.kind.as_deref().unwrap_or("solid");
        findings.record(
            format!("{id}_data"),
            format!("thickness={thickness}cm, span={span}m, type={kind}"),
        );

        // Unrecognised slab types are sized as solid.
        let ratio = if kind == "ribbed" { 25.0 } else { 30.0 };
        let min_thickness = span.as_f64() * 100.0 / ratio;
        findings.record(format!("{id}_min_thickness_cm"), round_to(min_thickness, 1));

        if thickness.as_f64() < min_thickness {
            findings.violation(format!(
                "{id}: Thickness {thickness}cm is below minimum {min_thickness:.1}cm for {kind} slab with span {span}m (SI 466)"
            ));
        }

        if kind == "solid" && thickness.as_f64() < 12.0 {
            findings.violation(format!(
                "{id}: Thickness {thickness}cm is below absolute minimum 12cm for solid slab (SI 466 Section 9.3.1)"
            ));
        }

        if thickness.as_f64() < 15.0 && span.as_f64() > 4.0 {
            findings.warning(format!(
                "{id}: Thickness {thickness}cm is thin for span {span}m, verify deflection and vibration"
            ));
        }
    }

    Ok(findings)
}

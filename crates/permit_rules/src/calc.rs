//! Requirement calculators shared by the rules and exposed to callers.

use std::collections::BTreeMap;

use crate::measure::Measure;
use crate::model::{Direction, FootprintEdges, PlotBoundaries, Ramp};

/// Required parking spaces for a building under the local ordinance rates.
///
/// Residential buildings are rated per unit (1.2 spaces each); without a unit
/// count one unit per 100 m² is assumed. Fractions are dropped.
pub fn parking_requirement(floor_area_m2: f64, use_type: &str, num_units: f64) -> i64 {
    let spaces = match use_type {
        "residential" if num_units > 0.0 => num_units * 1.2,
        "residential" => floor_area_m2 / 100.0 * 1.2,
        "office" | "commercial" | "retail" => floor_area_m2 / 40.0,
        "restaurant" => floor_area_m2 / 20.0,
        _ => floor_area_m2 / 50.0,
    };
    spaces.trunc() as i64
}

/// Human-readable basis recorded next to the parking calculation.
pub fn parking_standard(use_type: &str) -> &'static str {
    match use_type {
        "residential" => "1.0-1.5 spaces per unit",
        "office" => "1 space per 40m²",
        "commercial" => "1 space per 50m²",
        "retail" => "1 space per 30m²",
        "restaurant" => "1 space per 20m²",
        _ => "Standard rates per local ordinance",
    }
}

/// Ramp slope as a percentage of run. Metre values win over centimetre
/// values; a ramp without run is treated as vertical.
pub fn ramp_slope_percent(ramp: &Ramp) -> f64 {
    let metres = |m: Option<Measure>, cm: Option<Measure>| match m {
        Some(m) => m.as_f64(),
        None => cm.unwrap_or_default().as_f64() / 100.0,
    };
    let rise = metres(ramp.rise_m, ramp.rise_cm);
    let run = metres(ramp.run_m, ramp.run_cm);
    if run == 0.0 {
        return 100.0;
    }
    rise / run * 100.0
}

/// Distance from each building edge to the matching plot boundary.
pub fn property_setbacks(
    boundaries: &PlotBoundaries,
    footprint: &FootprintEdges,
) -> BTreeMap<Direction, Measure> {
    Direction::CARDINAL
        .into_iter()
        .map(|direction| {
            let distance = (boundaries.boundary(direction) - footprint.edge(direction)).abs();
            (direction, distance)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parking_rates_by_use() {
        assert_eq!(parking_requirement(1000.0, "residential", 10.0), 12);
        assert_eq!(parking_requirement(1000.0, "residential", 0.0), 12);
        assert_eq!(parking_requirement(800.0, "office", 0.0), 20);
        assert_eq!(parking_requirement(600.0, "commercial", 0.0), 15);
        assert_eq!(parking_requirement(600.0, "retail", 0.0), 15);
        assert_eq!(parking_requirement(300.0, "restaurant", 0.0), 15);
        assert_eq!(parking_requirement(1000.0, "industrial", 0.0), 20);
        assert_eq!(parking_requirement(0.0, "residential", 0.0), 0);
    }

    #[test]
    fn parking_basis_text() {
        assert_eq!(parking_standard("office"), "1 space per 40m²");
        assert_eq!(parking_standard("hotel"), "Standard rates per local ordinance");
    }

    #[test]
    fn ramp_slope_prefers_metres() {
        let ramp = Ramp {
            rise_m: Some(Measure::Float(0.3)),
            run_m: Some(Measure::Float(5.0)),
            ..Default::default()
        };
        assert!((ramp_slope_percent(&ramp) - 6.0).abs() < 1e-9);

        let ramp = Ramp {
            rise_cm: Some(Measure::Int(30)),
            run_cm: Some(Measure::Int(500)),
            ..Default::default()
        };
        assert!((ramp_slope_percent(&ramp) - 6.0).abs() < 1e-9);

        let ramp = Ramp {
            rise_m: Some(Measure::Int(1)),
            rise_cm: Some(Measure::Int(50)),
            run_m: Some(Measure::Int(20)),
            ..Default::default()
        };
        assert!((ramp_slope_percent(&ramp) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn ramp_without_run_is_vertical() {
        assert_eq!(ramp_slope_percent(&Ramp::default()), 100.0);
    }

    #[test]
    fn setbacks_are_absolute_distances() {
        let boundaries = PlotBoundaries {
            north_boundary: Measure::Int(50),
            south_boundary: Measure::Int(0),
            east_boundary: Measure::Float(30.0),
            west_boundary: Measure::Int(0),
        };
        let footprint = FootprintEdges {
            north_edge: Measure::Int(45),
            south_edge: Measure::Int(4),
            east_edge: Measure::Float(27.5),
            west_edge: Measure::Int(3),
        };
        let setbacks = property_setbacks(&boundaries, &footprint);
        assert_eq!(setbacks.len(), 4);
        assert_eq!(setbacks[&Direction::North].to_string(), "5");
        assert_eq!(setbacks[&Direction::South].to_string(), "4");
        assert_eq!(setbacks[&Direction::East].to_string(), "2.5");
        assert_eq!(setbacks[&Direction::West].to_string(), "3");
    }
}

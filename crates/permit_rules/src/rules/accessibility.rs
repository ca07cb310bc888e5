//! Israeli accessibility law: ramps, doors and elevators.

use crate::calc::ramp_slope_percent;
use crate::dataset::Dataset;
use crate::error::RuleError;
use crate::model::{item_label, Doors, Elevator, HasLevelChanges, NumFloors, Ramps};
use crate::rule::{Category, Findings, Rule, Severity};

pub(super) const RULES: [Rule; 3] = [
    Rule::new(
        "ACC-RAMP-001",
        "שיפוע רמפה",
        "Ramp slope",
        Category::Accessibility,
        Severity::Critical,
        ramps,
    ),
    Rule::new(
        "ACC-DOOR-002",
        "רוחב דלת נגישה",
        "Accessible door width",
        Category::Accessibility,
        Severity::Critical,
        doors,
    ),
    Rule::new(
        "ACC-ELEV-003",
        "דרישות מעלית",
        "Elevator requirements",
        Category::Accessibility,
        Severity::Critical,
        elevator,
    ),
];

/// 1:12
const MAX_RAMP_SLOPE_PERCENT: f64 = 8.33;

fn ramps(data: &Dataset) -> Result<Findings, RuleError> {
    let Ramps(ramps) = data.section()?;
    let mut findings = Findings::new();

    if ramps.is_empty() {
        let HasLevelChanges(level_changes) = data.section()?;
        if level_changes {
            findings.violation("Ramp required for level changes (Israeli accessibility law)");
        }
        return Ok(findings);
    }

    for (index, ramp) in ramps.iter().enumerate() {
        let id = item_label(ramp.id.as_deref(), "Ramp", index);

        let slope = ramp_slope_percent(ramp);
        findings.record(format!("{id}_slope_percent"), slope);
        if slope > MAX_RAMP_SLOPE_PERCENT {
            findings.violation(format!(
                "{id}: Slope {slope:.2}% exceeds maximum {MAX_RAMP_SLOPE_PERCENT}% (Israeli accessibility law)"
            ));
        } else if slope > 6.0 {
            findings.warning(format!(
                "{id}: Slope {slope:.2}% is steep, consider gentler slope"
            ));
        }

        let width = ramp.width_cm;
        findings.record(format!("{id}_width_cm"), width);
        if width.as_f64() < 90.0 {
            findings.violation(format!("{id}: Width {width}cm below minimum 90cm"));
        }

        let run_length = ramp.run_length_m;
        findings.record(format!("{id}_run_length_m"), run_length);
        findings.record(format!("{id}_has_landing"), ramp.has_landing);
        if run_length.as_f64() > 9.0 && !ramp.has_landing {
            findings.violation(format!(
                "{id}: Landing required for run length {run_length}m (max 9m between landings)"
            ));
        }

        findings.record(format!("{id}_has_handrails"), ramp.has_handrails);
        if !ramp.has_handrails {
            findings.violation(format!("{id}: Handrails required on both sides"));
        }
    }

    Ok(findings)
}

fn doors(data: &Dataset) -> Result<Findings, RuleError> {
    let Doors(doors) = data.section()?;
    let mut findings = Findings::new();
    if doors.is_empty() {
        findings.violation("No accessible door data provided");
        return Ok(findings);
    }

    for (index, door) in doors.iter().enumerate() {
        let id = item_label(door.id.as_deref(), "Door", index);
        let kind = door.kind.as_deref().unwrap_or("entry");

        let width = door.clear_width_cm;
        findings.record(format!("{id}_clear_width_cm"), width);
        findings.record(format!("{id}_type"), kind);

        let min_width = if kind == "entry" { 90 } else { 80 };
        if width.as_f64() < min_width as f64 {
            findings.violation(format!(
                "{id}: Clear width {width}cm below minimum {min_width}cm for {kind} door (Israeli accessibility law)"
            ));
        }

        let threshold = door.threshold_height_cm;
        findings.record(format!("{id}_threshold_height_cm"), threshold);
        if threshold.as_f64() > 2.0 {
            findings.violation(format!(
                "{id}: Threshold height {threshold}cm exceeds maximum 2cm"
            ));
        }

        let space = door.maneuvering_space_cm;
        findings.record(format!("{id}_maneuvering_space_cm"), space);
        if space.as_f64() < 150.0 {
            findings.violation(format!(
                "{id}: Maneuvering space {space}cm below minimum 150cm"
            ));
        }

        findings.record(format!("{id}_has_lever_handle"), door.has_lever_handle);
        if !door.has_lever_handle {
            findings.warning(format!("{id}: Lever handles recommended for accessibility"));
        }

        if door.is_fire_door && door.has_auto_closer {
            let force = door.closing_force_n;
            findings.record(format!("{id}_closing_force_n"), force);
            if force.as_f64() > 22.0 {
                findings.violation(format!(
                    "{id}: Closing force {force}N exceeds maximum 22N"
                ));
            }
        }
    }

    Ok(findings)
}

fn elevator(data: &Dataset) -> Result<Findings, RuleError> {
    let floors = data.section::<NumFloors>()?.floors();
    let elevator: Elevator = data.section()?;
    let mut findings = Findings::new();

    findings.record("num_floors", floors);
    findings.record("has_elevator", elevator.has_elevator);

    if !elevator.has_elevator {
        if floors.as_f64() > 3.0 {
            findings.violation(format!(
                "Elevator required for building with {floors} floors (>3) (Israeli accessibility law)"
            ));
        }
        return Ok(findings);
    }

    let (car_width, car_depth) = (elevator.car_width_cm, elevator.car_depth_cm);
    findings.record("car_width_cm", car_width);
    findings.record("car_depth_cm", car_depth);
    if car_width.as_f64() < 110.0 || car_depth.as_f64() < 140.0 {
        findings.violation(format!(
            "Elevator car dimensions {car_width}x{car_depth}cm below minimum 110x140cm (Israeli accessibility law)"
        ));
    }

    let door_width = elevator.door_width_cm;
    findings.record("door_width_cm", door_width);
    if door_width.as_f64() < 80.0 {
        findings.violation(format!(
            "Elevator door width {door_width}cm below minimum 80cm"
        ));
    }

    let open_time = elevator.door_open_time_seconds;
    findings.record("door_open_time_seconds", open_time);
    if open_time.as_f64() < 3.0 {
        findings.warning(format!(
            "Elevator door open time {open_time}s below recommended 3s"
        ));
    }

    findings.record("has_braille_controls", elevator.has_braille_controls);
    if !elevator.has_braille_controls {
        findings.violation("Elevator must have Braille and tactile controls");
    }

    findings.record("has_audio_announcements", elevator.has_audio_announcements);
    if !elevator.has_audio_announcements {
        findings.violation("Elevator must have audio floor announcements");
    }

    let button = elevator.button_height_cm;
    findings.record("button_height_cm", button);
    if !(90.0..=120.0).contains(&button.as_f64()) {
        findings.violation(format!(
            "Elevator control button height {button}cm outside range 90-120cm"
        ));
    }

    Ok(findings)
}

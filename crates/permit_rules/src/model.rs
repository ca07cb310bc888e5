//! Typed sections of a submission.
//!
//! Every numeric field defaults to integer zero and every flag to `false`.
//! Fields whose default differs between rules are `Option`s and the rule
//! supplies the fallback.
//!
//! Scalars of the `building`, `plot` and `location` mappings are shared by
//! many rules, so each one is its own leaf section: a bad value there faults
//! only the rules that read that value. Flags follow truthiness and text
//! fields take the printed form of whatever scalar was supplied, so neither
//! can fault a section.

use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::measure::Measure;

/// A typed view deserialized from a fixed path in the dataset.
pub trait Section: DeserializeOwned + Default {
    const PATH: &'static [&'static str];
}

macro_rules! section {
    ($ty:ty, [$($key:literal),+]) => {
        impl Section for $ty {
            const PATH: &'static [&'static str] = &[$($key),+];
        }
    };
}

/// A single scalar read on its own.
macro_rules! field {
    ($(#[$meta:meta])* $name:ident($ty:ty) = [$($key:literal),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $ty);
        section!($name, [$($key),+]);
    };
    ($(#[$meta:meta])* $name:ident($ty:ty, with = $with:tt) = [$($key:literal),+]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = $with)] pub $ty);
        section!($name, [$($key),+]);
    };
}

/// Flags accept any JSON value: null, `false`, zero and empty strings,
/// lists or mappings are false; everything else is true.
pub(crate) fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

fn printed(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        other => Some(other.to_string()),
    }
}

/// Text that tolerates non-string scalars (`3` reads as `"3"`); null is empty.
pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(printed(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(printed(Value::deserialize(deserializer)?))
}

/// Property-line directions a setback can be measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Front,
    Rear,
    Side,
}

impl Direction {
    pub const ALL: [Direction; 7] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Front,
        Direction::Rear,
        Direction::Side,
    ];

    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Front => "front",
            Direction::Rear => "rear",
            Direction::Side => "side",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
            Direction::Front => "Front",
            Direction::Rear => "Rear",
            Direction::Side => "Side",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Setback distances keyed by direction name, in submission order. Unknown
/// directions are kept; they still count towards the overall minimum.
#[derive(Debug, Clone, Default)]
pub struct Setbacks(Vec<(String, Measure)>);

impl Setbacks {
    pub fn get(&self, direction: Direction) -> Measure {
        self.0
            .iter()
            .find(|(key, _)| key == direction.key())
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Smallest distance; the earliest entry wins ties.
    pub fn minimum(&self) -> Option<Measure> {
        self.0.iter().map(|(_, value)| *value).reduce(Measure::min)
    }
}

impl<'de> Deserialize<'de> for Setbacks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, value)| {
                Measure::deserialize(value)
                    .map(|measure| (key, measure))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<_, _>>()
            .map(Setbacks)
    }
}

// ---------------------------------------------------------------------------
// building

field!(
    /// Use type; rules fall back to residential when absent.
    UseType(Option<String>, with = "optional_text") = ["building", "use_type"]
);

impl UseType {
    pub fn or_residential(&self) -> &str {
        self.0.as_deref().unwrap_or("residential")
    }
}

field!(NumFloors(Option<Measure>) = ["building", "num_floors"]);

impl NumFloors {
    /// Floor count, zero when absent.
    pub fn floors(&self) -> Measure {
        self.0.unwrap_or_default()
    }
}

field!(BuildingHeight(Measure) = ["building", "height_m"]);
field!(Footprint(Measure) = ["building", "footprint_m2"]);
field!(TotalFloorArea(Measure) = ["building", "total_floor_area_m2"]);
field!(TypicalFloorArea(Measure) = ["building", "typical_floor_area_m2"]);
field!(MaxOccupancy(Measure) = ["building", "max_occupancy"]);
field!(NumUnits(Measure) = ["building", "num_units"]);
field!(ResidentialArea(Measure) = ["building", "residential_area_m2"]);
field!(CommercialArea(Measure) = ["building", "commercial_area_m2"]);
field!(ServiceArea(Measure) = ["building", "service_area_m2"]);
field!(HasLevelChanges(bool, with = "truthy") = ["building", "has_level_changes"]);
field!(HasRoofAccess(bool, with = "truthy") = ["building", "has_roof_access"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BuildingSetbacks(pub Setbacks);
section!(BuildingSetbacks, ["building", "setbacks"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parking {
    pub total_spaces: Measure,
    pub accessible_spaces: Measure,
}
section!(Parking, ["building", "parking"]);

/// Building edge coordinates used to derive setbacks from plot boundaries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FootprintEdges {
    pub north_edge: Measure,
    pub south_edge: Measure,
    pub east_edge: Measure,
    pub west_edge: Measure,
}
section!(FootprintEdges, ["building", "footprint"]);

impl FootprintEdges {
    pub fn edge(&self, direction: Direction) -> Measure {
        match direction {
            Direction::North => self.north_edge,
            Direction::South => self.south_edge,
            Direction::East => self.east_edge,
            Direction::West => self.west_edge,
            _ => Measure::ZERO,
        }
    }
}

// building.safety

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FireSuppression {
    #[serde(deserialize_with = "truthy")]
    pub has_sprinkler_system: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_fire_extinguishers: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_fire_alarm: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_fire_rated_elements: bool,
}
section!(FireSuppression, ["building", "safety", "fire_suppression"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Evacuation {
    pub num_emergency_exits: Measure,
    pub exit_widths_cm: Vec<Measure>,
    pub max_travel_distance_m: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_emergency_lighting: bool,
}
section!(Evacuation, ["building", "safety", "evacuation"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Stairway {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    pub tread_depth_cm: Measure,
    pub riser_height_cm: Measure,
    pub width_cm: Measure,
    pub headroom_cm: Measure,
    pub landing_depth_cm: Measure,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Stairways(pub Vec<Stairway>);
section!(Stairways, ["building", "safety", "stairways"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Railings {
    pub balcony_height_cm: Measure,
    pub stair_height_cm: Measure,
    pub bar_spacing_cm: Measure,
    pub load_capacity_kn: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_roof_railing: bool,
}
section!(Railings, ["building", "safety", "railings"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmergencyLighting {
    #[serde(deserialize_with = "truthy")]
    pub has_system: bool,
    pub backup_duration_minutes: Measure,
    pub min_illumination_lux: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_exit_signs: bool,
    pub escape_route_coverage_percent: Measure,
}
section!(EmergencyLighting, ["building", "safety", "emergency_lighting"]);

// building.accessibility

/// An accessible ramp. Rise and run may be given in metres or centimetres;
/// metres take precedence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Ramp {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    pub rise_m: Option<Measure>,
    pub rise_cm: Option<Measure>,
    pub run_m: Option<Measure>,
    pub run_cm: Option<Measure>,
    pub width_cm: Measure,
    pub run_length_m: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_landing: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_handrails: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Ramps(pub Vec<Ramp>);
section!(Ramps, ["building", "accessibility", "ramps"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Door {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "optional_text")]
    pub kind: Option<String>,
    pub clear_width_cm: Measure,
    pub threshold_height_cm: Measure,
    pub maneuvering_space_cm: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_lever_handle: bool,
    #[serde(deserialize_with = "truthy")]
    pub is_fire_door: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_auto_closer: bool,
    pub closing_force_n: Measure,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Doors(pub Vec<Door>);
section!(Doors, ["building", "accessibility", "doors"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Elevator {
    #[serde(deserialize_with = "truthy")]
    pub has_elevator: bool,
    pub car_width_cm: Measure,
    pub car_depth_cm: Measure,
    pub door_width_cm: Measure,
    pub door_open_time_seconds: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_braille_controls: bool,
    #[serde(deserialize_with = "truthy")]
    pub has_audio_announcements: bool,
    pub button_height_cm: Measure,
}
section!(Elevator, ["building", "accessibility", "elevator"]);

// building.environmental

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Energy {
    #[serde(deserialize_with = "text")]
    pub si5282_level: String,
    pub wall_u_value: Measure,
    pub roof_u_value: Measure,
    pub window_u_value: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_solar_water_heating: bool,
    pub led_coverage_percent: Measure,
    pub renewable_capacity_kw: Measure,
    #[serde(deserialize_with = "truthy")]
    pub has_low_flow_fixtures: bool,
}
section!(Energy, ["building", "environmental", "energy"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Acoustic {
    pub wall_rw_db: Measure,
    pub floor_rw_db: Measure,
    pub floor_ln_db: Measure,
    pub facade_rw_db: Measure,
    pub window_rw_db: Measure,
}
section!(Acoustic, ["building", "environmental", "acoustic"]);

// ---------------------------------------------------------------------------
// plot

// TABA envelope. A zero limit means "not specified".
field!(PlotArea(Measure) = ["plot", "area_m2"]);
field!(MaxHeight(Measure) = ["plot", "max_height_m"]);
field!(MaxFloors(Measure) = ["plot", "max_floors"]);
field!(MaxCoverage(Measure) = ["plot", "max_coverage_percent"]);
field!(MaxFar(Measure) = ["plot", "max_far"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RequiredSetbacks(pub Setbacks);
section!(RequiredSetbacks, ["plot", "required_setbacks"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlotBoundaries {
    pub north_boundary: Measure,
    pub south_boundary: Measure,
    pub east_boundary: Measure,
    pub west_boundary: Measure,
}
section!(PlotBoundaries, ["plot", "boundaries"]);

impl PlotBoundaries {
    pub fn boundary(&self, direction: Direction) -> Measure {
        match direction {
            Direction::North => self.north_boundary,
            Direction::South => self.south_boundary,
            Direction::East => self.east_boundary,
            Direction::West => self.west_boundary,
            _ => Measure::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// structural

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Loads {
    pub dead_load_kn_m2: Measure,
    pub live_load_kn_m2: Measure,
    pub wind_load_kn_m2: Measure,
    pub seismic_coefficient: Measure,
}
section!(Loads, ["structural"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Foundation {
    pub depth_m: Measure,
    #[serde(deserialize_with = "text")]
    pub soil_type: String,
    pub bearing_capacity_kn_m2: Measure,
}
section!(Foundation, ["structural", "foundation"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Column {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    pub width_cm: Measure,
    pub depth_cm: Measure,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Columns(pub Vec<Column>);
section!(Columns, ["structural", "columns"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Beam {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    pub width_cm: Measure,
    pub height_cm: Measure,
    pub span_m: Measure,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Beams(pub Vec<Beam>);
section!(Beams, ["structural", "beams"]);

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Slab {
    #[serde(deserialize_with = "optional_text")]
    pub id: Option<String>,
    pub thickness_cm: Measure,
    pub span_m: Measure,
    /// `solid`, `ribbed`, `hollow-core`, ...
    #[serde(rename = "type", deserialize_with = "optional_text")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Slabs(pub Vec<Slab>);
section!(Slabs, ["structural", "slabs"]);

// ---------------------------------------------------------------------------
// location

field!(SeismicZone(String, with = "text") = ["location", "seismic_zone"]);
field!(ExternalNoise(Measure) = ["location", "external_noise_db"]);

/// Identifier for the `index`th (0-based) item of a list, falling back to
/// `{prefix}-{n}` with a 1-based `n`.
pub(crate) fn item_label(id: Option<&str>, prefix: &str, index: usize) -> String {
    match id {
        Some(id) => id.to_string(),
        None => format!("{prefix}-{}", index + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flags_follow_truthiness() -> Result<(), serde_json::Error> {
        for (raw, expected) in [
            (json!(true), true),
            (json!(1), true),
            (json!("yes"), true),
            (json!(0), false),
            (json!(0.0), false),
            (json!(""), false),
            (json!(null), false),
            (json!([]), false),
        ] {
            let HasRoofAccess(flag) = serde_json::from_value(raw.clone())?;
            assert_eq!(flag, expected, "{raw}");
        }
        Ok(())
    }

    #[test]
    fn text_takes_the_printed_scalar() -> Result<(), serde_json::Error> {
        let SeismicZone(zone) = serde_json::from_value(json!(3))?;
        assert_eq!(zone, "3");
        let SeismicZone(zone) = serde_json::from_value(json!(null))?;
        assert_eq!(zone, "");

        let column: Column = serde_json::from_value(json!({ "id": 7, "width_cm": 30 }))?;
        assert_eq!(column.id.as_deref(), Some("7"));
        let column: Column = serde_json::from_value(json!({ "id": null }))?;
        assert_eq!(item_label(column.id.as_deref(), "C", 1), "C-2");
        Ok(())
    }

    #[test]
    fn setbacks_keep_submission_order() -> Result<(), serde_json::Error> {
        let setbacks: Setbacks = serde_json::from_value(json!({ "south": 3, "north": 3.0 }))?;
        assert_eq!(setbacks.minimum().map(|m| m.to_string()), Some("3".into()));
        assert_eq!(setbacks.get(Direction::North).to_string(), "3.0");
        assert_eq!(setbacks.get(Direction::West).to_string(), "0");

        let err = serde_json::from_value::<Setbacks>(json!({ "north": "far" }));
        assert!(err.is_err());
        Ok(())
    }
}

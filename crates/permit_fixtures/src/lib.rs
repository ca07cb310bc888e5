//! Reference submissions for regression tests.
//!
//! Each fixture is a plain JSON document so it can be fed to the engine, to
//! snapshot tests, or written out for other tools unchanged.

use serde_json::{json, Value};

/// A four-floor residential building that satisfies every rule. It still
/// draws a handful of margin warnings (setbacks at exactly the minimum, a
/// wall rating just above the limit).
pub fn compliant_building() -> Value {
    json!({
        "building": {
            "use_type": "residential",
            "num_floors": 4,
            "height_m": 12.0,
            "footprint_m2": 500.0,
            "total_floor_area_m2": 2000.0,
            "typical_floor_area_m2": 500.0,
            "max_occupancy": 100,
            "has_level_changes": true,
            "has_roof_access": true,
            "num_units": 10,
            "residential_area_m2": 1800.0,
            "commercial_area_m2": 200.0,
            "service_area_m2": 0.0,
            "setbacks": {
                "north": 3.5,
                "south": 3.0,
                "east": 2.5,
                "west": 2.5,
                "front": 4.0,
                "rear": 3.0,
                "side": 2.5
            },
            "parking": {
                "total_spaces": 15,
                "accessible_spaces": 1
            },
            "safety": {
                "fire_suppression": {
                    "has_sprinkler_system": true,
                    "has_fire_extinguishers": true,
                    "has_fire_alarm": true,
                    "has_fire_rated_elements": true
                },
                "evacuation": {
                    "num_emergency_exits": 2,
                    "exit_widths_cm": [120, 120],
                    "max_travel_distance_m": 25,
                    "has_emergency_lighting": true
                },
                "stairways": [{
                    "id": "Stair-1",
                    "tread_depth_cm": 26,
                    "riser_height_cm": 18,
                    "width_cm": 130,
                    "headroom_cm": 220,
                    "landing_depth_cm": 130
                }],
                "railings": {
                    "balcony_height_cm": 115,
                    "stair_height_cm": 95,
                    "bar_spacing_cm": 10,
                    "load_capacity_kn": 2.0,
                    "has_roof_railing": true
                },
                "emergency_lighting": {
                    "has_system": true,
                    "backup_duration_minutes": 120,
                    "min_illumination_lux": 1.5,
                    "has_exit_signs": true,
                    "escape_route_coverage_percent": 100
                }
            },
            "accessibility": {
                "ramps": [{
                    "id": "Ramp-1",
                    "rise_m": 0.3,
                    "run_m": 5.0,
                    "width_cm": 120,
                    "run_length_m": 5.0,
                    "has_landing": false,
                    "has_handrails": true
                }],
                "doors": [{
                    "id": "Door-1",
                    "type": "entry",
                    "clear_width_cm": 95,
                    "threshold_height_cm": 1.5,
                    "maneuvering_space_cm": 160,
                    "has_lever_handle": true,
                    "is_fire_door": false
                }],
                "elevator": {
                    "has_elevator": true,
                    "car_width_cm": 120,
                    "car_depth_cm": 150,
                    "door_width_cm": 85,
                    "door_open_time_seconds": 3.5,
                    "has_braille_controls": true,
                    "has_audio_announcements": true,
                    "button_height_cm": 105
                }
            },
            "environmental": {
                "energy": {
                    "si5282_level": "intermediate",
                    "wall_u_value": 0.45,
                    "roof_u_value": 0.3,
                    "window_u_value": 1.8,
                    "has_solar_water_heating": true,
                    "led_coverage_percent": 90,
                    "renewable_capacity_kw": 25.0,
                    "has_low_flow_fixtures": true
                },
                "acoustic": {
                    "wall_rw_db": 54,
                    "floor_rw_db": 53,
                    "floor_ln_db": 56,
                    "facade_rw_db": 40,
                    "window_rw_db": 32
                }
            }
        },
        "plot": {
            "area_m2": 1000.0,
            "required_setbacks": {
                "north": 3.0,
                "south": 3.0,
                "east": 2.0,
                "west": 2.0,
                "front": 4.0,
                "rear": 3.0
            },
            "max_height_m": 15.0,
            "max_floors": 5,
            "max_coverage_percent": 60,
            "max_far": 2.5
        },
        "structural": {
            "dead_load_kn_m2": 4.0,
            "live_load_kn_m2": 2.5,
            "wind_load_kn_m2": 0.8,
            "seismic_coefficient": 0.15,
            "foundation": {
                "depth_m": 1.5,
                "soil_type": "sand",
                "bearing_capacity_kn_m2": 150
            },
            "columns": [
                { "id": "Col-1", "width_cm": 30, "depth_cm": 35 },
                { "id": "Col-2", "width_cm": 30, "depth_cm": 30 }
            ],
            "beams": [
                { "id": "Beam-1", "width_cm": 25, "height_cm": 50, "span_m": 5.0 }
            ],
            "slabs": [
                { "id": "Slab-1", "thickness_cm": 18, "span_m": 4.5, "type": "solid" }
            ]
        },
        "location": {
            "seismic_zone": "moderate",
            "external_noise_db": 70
        }
    })
}

/// A six-floor commercial building that breaks every rule at least once.
pub fn non_compliant_building() -> Value {
    json!({
        "building": {
            "use_type": "commercial",
            "num_floors": 6,
            "height_m": 18.0,
            "footprint_m2": 700.0,
            "total_floor_area_m2": 3000.0,
            "typical_floor_area_m2": 500.0,
            "max_occupancy": 200,
            "has_level_changes": true,
            "has_roof_access": true,
            "num_units": 0,
            "setbacks": {
                "north": 2.0,
                "south": 1.5,
                "east": 1.0,
                "west": 1.0,
                "front": 2.5
            },
            "parking": {
                "total_spaces": 5,
                "accessible_spaces": 0
            },
            "safety": {
                "fire_suppression": {
                    "has_sprinkler_system": false,
                    "has_fire_extinguishers": false,
                    "has_fire_alarm": false,
                    "has_fire_rated_elements": false
                },
                "evacuation": {
                    "num_emergency_exits": 1,
                    "exit_widths_cm": [80],
                    "max_travel_distance_m": 35,
                    "has_emergency_lighting": false
                },
                "stairways": [{
                    "id": "Stair-1",
                    "tread_depth_cm": 23,
                    "riser_height_cm": 21,
                    "width_cm": 100,
                    "headroom_cm": 200,
                    "landing_depth_cm": 90
                }],
                "railings": {
                    "balcony_height_cm": 100,
                    "stair_height_cm": 85,
                    "bar_spacing_cm": 15,
                    "load_capacity_kn": 1.2,
                    "has_roof_railing": false
                },
                "emergency_lighting": {
                    "has_system": false,
                    "backup_duration_minutes": 0,
                    "min_illumination_lux": 0,
                    "has_exit_signs": false,
                    "escape_route_coverage_percent": 0
                }
            },
            "accessibility": {
                "ramps": [],
                "doors": [{
                    "id": "Door-1",
                    "type": "entry",
                    "clear_width_cm": 75,
                    "threshold_height_cm": 3.0,
                    "maneuvering_space_cm": 100,
                    "has_lever_handle": false,
                    "is_fire_door": true,
                    "has_auto_closer": true,
                    "closing_force_n": 30
                }],
                "elevator": {
                    "has_elevator": false
                }
            },
            "environmental": {
                "energy": {
                    "si5282_level": "",
                    "wall_u_value": 0.8,
                    "roof_u_value": 0.6,
                    "window_u_value": 2.5,
                    "has_solar_water_heating": false,
                    "led_coverage_percent": 30,
                    "renewable_capacity_kw": 5.0,
                    "has_low_flow_fixtures": false
                },
                "acoustic": {
                    "wall_rw_db": 48,
                    "floor_rw_db": 49,
                    "floor_ln_db": 62,
                    "facade_rw_db": 30,
                    "window_rw_db": 25
                }
            }
        },
        "plot": {
            "area_m2": 1000.0,
            "required_setbacks": {
                "north": 3.0,
                "south": 3.0,
                "east": 2.0,
                "west": 2.0,
                "front": 4.0,
                "rear": 3.0
            },
            "max_height_m": 15.0,
            "max_floors": 5,
            "max_coverage_percent": 50,
            "max_far": 2.0
        },
        "structural": {
            "dead_load_kn_m2": 3.0,
            "live_load_kn_m2": 1.5,
            "wind_load_kn_m2": 0.5,
            "seismic_coefficient": 0.08,
            "foundation": {
                "depth_m": 0.8,
                "soil_type": "clay",
                "bearing_capacity_kn_m2": 80
            },
            "columns": [
                { "id": "Col-1", "width_cm": 20, "depth_cm": 20 }
            ],
            "beams": [
                { "id": "Beam-1", "width_cm": 18, "height_cm": 35, "span_m": 6.0 }
            ],
            "slabs": [
                { "id": "Slab-1", "thickness_cm": 10, "span_m": 5.0, "type": "solid" }
            ]
        },
        "location": {
            "seismic_zone": "high",
            "external_noise_db": 80
        }
    })
}

/// A single-storey house with only the headline figures filled in.
pub fn minimal_building() -> Value {
    json!({
        "building": {
            "use_type": "residential",
            "num_floors": 1,
            "height_m": 3.0,
            "footprint_m2": 100.0,
            "total_floor_area_m2": 100.0,
            "setbacks": {}
        },
        "plot": {
            "area_m2": 500.0
        },
        "structural": {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_stable() {
        assert_eq!(compliant_building(), compliant_building());
        assert_eq!(non_compliant_building(), non_compliant_building());
        assert_ne!(compliant_building(), non_compliant_building());
    }

    #[test]
    fn fixtures_have_the_top_level_sections() {
        for fixture in [compliant_building(), non_compliant_building()] {
            for section in ["building", "plot", "structural", "location"] {
                assert!(fixture.get(section).is_some_and(Value::is_object), "{section}");
            }
        }
        assert!(minimal_building().get("location").is_none());
    }
}

#![allow(dead_code)]

use vehicle_catalog::Vehicle;

pub fn vehicle(id: &str) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        year: 2024,
        make: "Make".to_string(),
        model: "Model".to_string(),
        body_width_inches: 72.0,
        height_inches: 66.0,
        ground_clearance_inches: 7.0,
        seats: 5,
        doors: 4,
        last_updated: "2024-01-01".to_string(),
        ..Default::default()
    }
}

pub fn ids(records: &[&Vehicle]) -> Vec<String> {
    records.iter().map(|v| v.id.clone()).collect()
}

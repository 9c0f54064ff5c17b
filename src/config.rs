use crate::errors::ValidationError;
use crate::park::person::{check_age, check_csv_field, check_required};
use failure::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

pub type Id = String;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OperatorConfig {
    pub id: Id,
    pub name: String,
    pub age: i64,
    pub role: String,
    pub available: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RideConfig {
    pub id: Id,
    pub name: String,
    pub max_rider: u32, // Riders boarded per cycle, 0 is clamped to 1
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VisitorConfig {
    pub id: Id,
    pub name: String,
    pub age: i64,
    pub ticket_type: String,
    pub visit_date: String, // Free form, usually YYYY-MM-DD
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub operator: OperatorConfig,
    pub ride: RideConfig,
    #[serde(default)]
    pub visitors: Vec<VisitorConfig>,
    #[serde(default = "default_history_path")]
    pub history_path: String,
}

fn default_history_path() -> String {
    "ride_history.csv".to_string()
}

impl Default for SystemConfig {
    fn default() -> SystemConfig {
        SystemConfig {
            operator: OperatorConfig {
                id: "E001".to_string(),
                name: "Operator".to_string(),
                age: 30,
                role: "Ride Operator".to_string(),
                available: true,
            },
            ride: RideConfig {
                id: "R001".to_string(),
                name: "Roller Coaster".to_string(),
                max_rider: 2,
            },
            visitors: Vec::new(),
            history_path: default_history_path(),
        }
    }
}

fn invalid(error: String) -> Error {
    ValidationError { error }.into()
}

pub fn validate_config(config: &SystemConfig) -> Result<(), Error> {
    let operator = &config.operator;

    for (field, value) in &[("operator id", &operator.id), ("operator name", &operator.name)] {
        check_csv_field(field, value)?;
    }

    for (field, value) in &[
        ("operator role", &operator.role),
        ("ride id", &config.ride.id),
        ("ride name", &config.ride.name),
    ] {
        check_required(field, value)?;
    }

    check_age(operator.age)
        .map_err(|e| invalid(format!("operator \"{}\": {}", operator.id, e.error)))?;

    let mut s = HashSet::new();

    for visitor in config.visitors.iter() {
        if s.contains(&visitor.id) {
            return Err(invalid(format!("There is visitor id \"{}\" collision", visitor.id)));
        }

        s.insert(&visitor.id);

        for (field, value) in &[
            ("id", &visitor.id),
            ("name", &visitor.name),
            ("ticket type", &visitor.ticket_type),
            ("visit date", &visitor.visit_date),
        ] {
            check_csv_field(field, value)
                .map_err(|e| invalid(format!("visitor \"{}\": {}", visitor.id, e.error)))?;
        }

        check_age(visitor.age)
            .map_err(|e| invalid(format!("visitor \"{}\": {}", visitor.id, e.error)))?;
    }

    Ok(())
}

pub fn get_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig, Error> {
    let file = File::open(path)?;

    let config = serde_json::from_reader(file)?;

    Ok(config)
}

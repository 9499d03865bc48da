use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Drone;

/// Response containing a drone
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DroneResponse {
    pub url: String,
    pub pk: i64,
    pub name: String,
    /// Name of the drone category
    pub drone_category: String,
    pub manufacturing_date: DateTime<Utc>,
    pub has_it_competed: bool,
    pub inserted_timestamp: DateTime<Utc>,
}

/// Request payload for creating or replacing a drone
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDroneRequest {
    #[validate(length(
        min = 1,
        max = 250,
        message = "Name must be between 1 and 250 characters"
    ))]
    pub name: String,

    /// Name of an existing drone category
    #[validate(length(min = 1, message = "Drone category is required"))]
    pub drone_category: String,

    pub manufacturing_date: DateTime<Utc>,

    #[serde(default)]
    pub has_it_competed: bool,
}

/// Request payload for partially updating a drone
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDroneRequest {
    #[validate(length(min = 1, max = 250))]
    pub name: Option<String>,

    #[validate(length(min = 1))]
    pub drone_category: Option<String>,

    pub manufacturing_date: Option<DateTime<Utc>>,

    pub has_it_competed: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DroneFilter {
    /// Exact name match
    pub name: Option<String>,
    /// Exact drone category name match
    pub drone_category: Option<String>,
    pub has_it_competed: Option<bool>,
    /// Case-insensitive name prefix
    pub search: Option<String>,
    /// Comma-separated fields, `-` for descending. Accepts `name` and `manufacturing_date`.
    pub ordering: Option<String>,
}

pub fn drone_url(id: i64) -> String {
    format!("/drones/{id}/")
}

impl From<Drone> for DroneResponse {
    fn from(drone: Drone) -> Self {
        Self {
            url: drone_url(drone.id),
            pk: drone.id,
            name: drone.name,
            drone_category: drone.drone_category,
            manufacturing_date: drone.manufacturing_date,
            has_it_competed: drone.has_it_competed,
            inserted_timestamp: drone.inserted_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn drone() -> Drone {
        Drone {
            id: 9,
            name: "Atom".to_string(),
            drone_category: "Quadcopter".to_string(),
            manufacturing_date: Utc.with_ymd_and_hms(2017, 8, 18, 2, 29, 12).unwrap(),
            has_it_competed: false,
            inserted_timestamp: Utc.with_ymd_and_hms(2019, 4, 22, 18, 4, 0).unwrap(),
        }
    }

    #[test]
    fn test_has_it_competed_defaults_to_false() {
        let req: CreateDroneRequest = serde_json::from_str(
            r#"{"name": "Atom", "drone_category": "Quadcopter", "manufacturing_date": "2017-08-18T02:29:12Z"}"#,
        )
        .unwrap();
        assert!(!req.has_it_competed);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_category_is_rejected() {
        let req = UpdateDroneRequest {
            drone_category: Some(String::new()),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("drone_category"));
    }

    #[test]
    fn test_response_url() {
        assert_eq!(DroneResponse::from(drone()).url, "/drones/9/");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{Gender, Pilot};

/// Response containing a pilot and how many competitions they took part in
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PilotResponse {
    pub url: String,
    pub pk: i64,
    pub name: String,
    pub gender: String,
    pub gender_description: String,
    pub races_count: i32,
    pub inserted_timestamp: DateTime<Utc>,
    pub competitions_count: i64,
}

/// Request payload for creating or replacing a pilot
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePilotRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Name must be between 1 and 150 characters"
    ))]
    pub name: String,

    /// `M` or `F`
    #[validate(custom(function = "validate_gender"))]
    #[serde(default = "default_gender")]
    pub gender: String,

    #[validate(range(min = 0, message = "Races count must be a non-negative integer"))]
    #[serde(default)]
    pub races_count: i32,
}

/// Request payload for partially updating a pilot
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePilotRequest {
    #[validate(length(min = 1, max = 150))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_gender"))]
    pub gender: Option<String>,

    #[validate(range(min = 0))]
    pub races_count: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PilotFilter {
    /// Exact name match
    pub name: Option<String>,
    /// `M` or `F`
    pub gender: Option<String>,
    pub races_count: Option<i32>,
    /// Case-insensitive name prefix
    pub search: Option<String>,
    /// Comma-separated fields, `-` for descending. Accepts `name` and `races_count`.
    pub ordering: Option<String>,
}

fn default_gender() -> String {
    Gender::Male.code().to_string()
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    if Gender::from_code(gender).is_some() {
        Ok(())
    } else {
        let mut error = validator::ValidationError::new("invalid_gender");
        error.message = Some(format!("\"{gender}\" is not a valid choice.").into());
        Err(error)
    }
}

pub fn pilot_url(id: i64) -> String {
    format!("/pilots/{id}/")
}

impl From<Pilot> for PilotResponse {
    fn from(pilot: Pilot) -> Self {
        Self {
            url: pilot_url(pilot.id),
            pk: pilot.id,
            gender_description: pilot.gender_description().to_string(),
            name: pilot.name,
            gender: pilot.gender,
            races_count: pilot.races_count,
            inserted_timestamp: pilot.inserted_timestamp,
            competitions_count: pilot.competitions_count,
        }
    }
}

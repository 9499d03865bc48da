use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::DroneCategory;

pub const DRONE_CATEGORY_NAME_MAX_LENGTH: u64 = 250;

/// Response containing a drone category and the drones filed under it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DroneCategoryResponse {
    pub url: String,
    pub pk: i64,
    pub name: String,
    pub drones: Vec<String>,
}

/// Request payload for creating or replacing a drone category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateDroneCategoryRequest {
    #[validate(length(
        min = 1,
        max = 250,
        message = "Name must be between 1 and 250 characters"
    ))]
    pub name: String,
}

/// Request payload for partially updating a drone category
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateDroneCategoryRequest {
    #[validate(length(
        min = 1,
        max = 250,
        message = "Name must be between 1 and 250 characters"
    ))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DroneCategoryFilter {
    /// Exact name match
    pub name: Option<String>,
    /// Case-insensitive name prefix
    pub search: Option<String>,
    /// Comma-separated fields, `-` for descending. Accepts `name`.
    pub ordering: Option<String>,
}

pub fn drone_category_url(id: i64) -> String {
    format!("/drone-categories/{id}/")
}

impl From<DroneCategory> for DroneCategoryResponse {
    fn from(category: DroneCategory) -> Self {
        Self {
            url: drone_category_url(category.id),
            pk: category.id,
            name: category.name,
            drones: category.drones,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> DroneCategory {
        DroneCategory {
            id: 4,
            name: "Quadcopter".to_string(),
            drones: vec!["Atom".to_string()],
        }
    }

    #[test]
    fn test_name_length_limits() {
        let ok = CreateDroneCategoryRequest {
            name: "Hexacopter".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreateDroneCategoryRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());

        let too_long = CreateDroneCategoryRequest {
            name: "x".repeat(DRONE_CATEGORY_NAME_MAX_LENGTH as usize + 1),
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_partial_update_validates_given_name_only() {
        assert!(UpdateDroneCategoryRequest::default().validate().is_ok());

        let blank = UpdateDroneCategoryRequest {
            name: Some(String::new()),
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_response_from_model() {
        let response = DroneCategoryResponse::from(category());
        assert_eq!(response.url, "/drone-categories/4/");
        assert_eq!(response.pk, 4);
        assert_eq!(response.drones, vec!["Atom".to_string()]);
    }
}

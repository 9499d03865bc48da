use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::Competition;

/// Response containing a competition record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompetitionResponse {
    pub url: String,
    pub pk: i64,
    pub distance_in_feet: i32,
    pub date: DateTime<Utc>,
    /// Pilot name
    pub pilot: String,
    /// Drone name
    pub drone: String,
}

/// Request payload for creating or replacing a competition record
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCompetitionRequest {
    /// Name of an existing pilot
    #[validate(length(min = 1, message = "Pilot is required"))]
    pub pilot: String,

    /// Name of an existing drone
    #[validate(length(min = 1, message = "Drone is required"))]
    pub drone: String,

    #[validate(range(min = 0, message = "Distance must be a non-negative integer"))]
    pub distance_in_feet: i32,

    pub date: DateTime<Utc>,
}

/// Request payload for partially updating a competition record
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1))]
    pub pilot: Option<String>,

    #[validate(length(min = 1))]
    pub drone: Option<String>,

    #[validate(range(min = 0))]
    pub distance_in_feet: Option<i32>,

    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionFilter {
    /// Exact pilot name match
    pub pilot_name: Option<String>,
    /// Exact drone name match
    pub drone_name: Option<String>,
    pub min_distance_in_feet: Option<i32>,
    pub max_distance_in_feet: Option<i32>,
    /// Inclusive lower bound on `date`
    pub from_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `date`
    pub to_date: Option<DateTime<Utc>>,
    /// Comma-separated fields, `-` for descending. Accepts `distance_in_feet` and `date`.
    pub ordering: Option<String>,
}

impl CompetitionFilter {
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_distance_in_feet, self.max_distance_in_feet) {
            if min > max {
                return Err(
                    "min_distance_in_feet must be less than or equal to max_distance_in_feet"
                        .to_string(),
                );
            }
        }

        if let (Some(from), Some(to)) = (self.from_date, self.to_date) {
            if from > to {
                return Err("from_date must be on or before to_date".to_string());
            }
        }

        Ok(())
    }
}

pub fn competition_url(id: i64) -> String {
    format!("/competitions/{id}/")
}

impl From<Competition> for CompetitionResponse {
    fn from(competition: Competition) -> Self {
        Self {
            url: competition_url(competition.id),
            pk: competition.id,
            distance_in_feet: competition.distance_in_feet,
            date: competition.date,
            pilot: competition.pilot,
            drone: competition.drone,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn competition() -> Competition {
        Competition {
            id: 1,
            pilot: "Gaston".to_string(),
            drone: "Atom".to_string(),
            distance_in_feet: 800,
            date: Utc.with_ymd_and_hms(2017, 10, 20, 5, 3, 20).unwrap(),
        }
    }

    #[test]
    fn test_negative_distance_is_rejected() {
        let req = CreateCompetitionRequest {
            pilot: "Gaston".to_string(),
            drone: "Atom".to_string(),
            distance_in_feet: -10,
            date: Utc::now(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("distance_in_feet"));
    }

    #[test]
    fn test_filter_bounds() {
        let filter = CompetitionFilter {
            min_distance_in_feet: Some(900),
            max_distance_in_feet: Some(100),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = CompetitionFilter {
            from_date: Some(Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()),
            to_date: Some(Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(filter.validate().is_err());

        let filter = CompetitionFilter {
            min_distance_in_feet: Some(100),
            max_distance_in_feet: Some(100),
            ..Default::default()
        };
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_response_url() {
        assert_eq!(CompetitionResponse::from(competition()).url, "/competitions/1/");
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Code stored in the `pilots.gender` column.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|gender| gender.code() == code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Pilot {
    pub id: i64,
    pub name: String,
    pub gender: String,
    pub races_count: i32,
    pub inserted_timestamp: DateTime<Utc>,
    pub competitions_count: i64,
}

impl Pilot {
    pub fn gender_description(&self) -> &'static str {
        Gender::from_code(&self.gender)
            .map(|gender| gender.description())
            .unwrap_or("Unknown")
    }
}

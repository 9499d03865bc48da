use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::features;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::root::api_root,
        features::drone_categories::handlers::list_drone_categories,
        features::drone_categories::handlers::get_drone_category,
        features::drone_categories::handlers::create_drone_category,
        features::drone_categories::handlers::replace_drone_category,
        features::drone_categories::handlers::update_drone_category,
        features::drone_categories::handlers::delete_drone_category,
        features::drones::handlers::list_drones,
        features::drones::handlers::get_drone,
        features::drones::handlers::create_drone,
        features::drones::handlers::replace_drone,
        features::drones::handlers::update_drone,
        features::drones::handlers::delete_drone,
        features::pilots::handlers::list_pilots,
        features::pilots::handlers::get_pilot,
        features::pilots::handlers::create_pilot,
        features::pilots::handlers::replace_pilot,
        features::pilots::handlers::update_pilot,
        features::pilots::handlers::delete_pilot,
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::replace_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
    ),
    components(
        schemas(
            features::root::ApiRoot,
            drones_storage::dto::drone_category::CreateDroneCategoryRequest,
            drones_storage::dto::drone_category::UpdateDroneCategoryRequest,
            drones_storage::dto::drone_category::DroneCategoryResponse,
            drones_storage::dto::drone::CreateDroneRequest,
            drones_storage::dto::drone::UpdateDroneRequest,
            drones_storage::dto::drone::DroneResponse,
            drones_storage::dto::pilot::CreatePilotRequest,
            drones_storage::dto::pilot::UpdatePilotRequest,
            drones_storage::dto::pilot::PilotResponse,
            drones_storage::dto::competition::CreateCompetitionRequest,
            drones_storage::dto::competition::UpdateCompetitionRequest,
            drones_storage::dto::competition::CompetitionResponse,
            drones_storage::models::Gender,
        )
    ),
    tags(
        (name = "root", description = "API entry point"),
        (name = "drone-categories", description = "Public drone category endpoints"),
        (name = "drones", description = "Public drone endpoints"),
        (name = "pilots", description = "Token protected pilot endpoints"),
        (name = "competitions", description = "Public competition endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token_auth",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    "Authorization",
                    "Token <key>",
                ))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_collection() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/drone-categories/",
            "/drone-categories/{id}/",
            "/drones/",
            "/drones/{id}/",
            "/pilots/",
            "/pilots/{id}/",
            "/competitions/",
            "/competitions/{id}/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_declares_token_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("token_auth"));
    }
}

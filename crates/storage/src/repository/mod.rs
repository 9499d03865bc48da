pub mod auth_token;
pub mod competition;
pub mod drone;
pub mod drone_category;
pub mod pilot;

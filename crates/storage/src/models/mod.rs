mod auth_token;
mod competition;
mod drone;
mod drone_category;
mod pilot;

pub use auth_token::{AuthToken, TOKEN_KEY_LENGTH};
pub use competition::Competition;
pub use drone::Drone;
pub use drone_category::DroneCategory;
pub use pilot::{Gender, Pilot};

pub mod common;
pub mod competition;
pub mod drone;
pub mod drone_category;
pub mod pilot;

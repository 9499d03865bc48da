pub mod competitions;
pub mod drone_categories;
pub mod drones;
pub mod pilots;
pub mod root;

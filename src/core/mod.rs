pub mod geo;
pub mod map;
pub mod viewport;

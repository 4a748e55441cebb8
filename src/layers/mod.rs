pub mod tile;
pub mod vector;

pub mod draw;

pub use draw::{DrawInteraction, DrawKind, DrawSession};

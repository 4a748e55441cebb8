pub mod events;

pub use events::{InputEvent, MouseButton};

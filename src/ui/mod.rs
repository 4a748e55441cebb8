pub mod label;

#[cfg(feature = "egui")]
pub mod widget;

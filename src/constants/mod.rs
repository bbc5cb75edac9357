//! Constants for damage cost estimation

pub mod damage_classes;

pub use damage_classes::{damage_class_name, DAMAGE_CLASSES, UNKNOWN_CLASS};

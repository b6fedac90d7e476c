//! Domain layer: configuration entities, mirror jobs and value objects

pub mod entities;
pub mod value_objects;

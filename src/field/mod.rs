pub mod field_animator;
pub mod link;
pub mod particle;
pub mod particle_field;

//! Password policy: strength rules for the master password and a
//! generator for entry passwords.

pub mod generator;
pub mod strength;

pub use generator::{generate, generate_with_rng, MIN_GENERATED_LENGTH};
pub use strength::{check_strength, is_strong, MIN_LENGTH};

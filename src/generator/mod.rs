//! Password generation
//!
//! Builds passwords from the four fixed character classes, guaranteeing
//! one character of every enabled class and shuffling the result with a
//! uniform Fisher-Yates permutation.

mod charset;
pub mod password;

pub use charset::CharacterClass;
pub use password::{generate_password, generate_password_with_rng, GenerationConfig};

//! Password generation functionality
//!
//! Every enabled character class contributes one guaranteed character, the
//! remainder is filled from the combined alphabet, and the whole buffer is
//! shuffled so the guaranteed characters land in random positions.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::charset::CharacterClass;
use crate::error::{Error, Result};
use crate::{DEFAULT_PASSWORD_LENGTH, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH};

/// Options for password generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Password length
    pub length: usize,
    /// Include uppercase letters (A-Z)
    pub include_uppercase: bool,
    /// Include lowercase letters (a-z)
    pub include_lowercase: bool,
    /// Include digits (0-9)
    pub include_numbers: bool,
    /// Include symbols (!@#$%...)
    pub include_symbols: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl GenerationConfig {
    /// Check whether a class is enabled
    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.include_uppercase,
            CharacterClass::Lowercase => self.include_lowercase,
            CharacterClass::Numbers => self.include_numbers,
            CharacterClass::Symbols => self.include_symbols,
        }
    }

    /// Enabled classes in fixed order (uppercase, lowercase, numbers, symbols)
    pub fn enabled_classes(&self) -> Vec<CharacterClass> {
        CharacterClass::ALL
            .into_iter()
            .filter(|class| self.is_enabled(*class))
            .collect()
    }

    /// Concatenation of the enabled alphabets
    pub fn alphabet(&self) -> String {
        self.enabled_classes()
            .into_iter()
            .map(CharacterClass::alphabet)
            .collect()
    }

    /// Reject zero or oversized lengths and configs with no class enabled.
    ///
    /// A length below the number of enabled classes is accepted; the result
    /// is then clamped and holds only some of the guaranteed characters.
    pub fn validate(&self) -> Result<()> {
        if self.length < PASSWORD_MIN_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "password length must be at least {}",
                PASSWORD_MIN_LENGTH
            )));
        }
        if self.length > PASSWORD_MAX_LENGTH {
            return Err(Error::InvalidConfig(format!(
                "password length must be at most {}, got {}",
                PASSWORD_MAX_LENGTH, self.length
            )));
        }
        if self.enabled_classes().is_empty() {
            return Err(Error::InvalidConfig(
                "enable at least one character class".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generate a password using the thread-local CSPRNG.
///
/// # Example
/// ```
/// use opgen::generator::{generate_password, GenerationConfig};
///
/// let config = GenerationConfig { length: 12, ..Default::default() };
/// let password = generate_password(&config).unwrap();
/// assert_eq!(password.len(), 12);
/// ```
pub fn generate_password(config: &GenerationConfig) -> Result<String> {
    generate_password_with_rng(config, &mut rand::rng())
}

/// Generate a password drawing all randomness from `rng`.
pub fn generate_password_with_rng<R: Rng>(config: &GenerationConfig, rng: &mut R) -> Result<String> {
    config.validate()?;

    let classes = config.enabled_classes();
    let alphabet: Vec<char> = config.alphabet().chars().collect();
    let mut password: Vec<char> = Vec::with_capacity(config.length.max(classes.len()));

    for class in &classes {
        let chars: Vec<char> = class.alphabet().chars().collect();
        password.push(chars[rng.random_range(0..chars.len())]);
    }

    while password.len() < config.length {
        password.push(alphabet[rng.random_range(0..alphabet.len())]);
    }

    password.shuffle(rng);
    password.truncate(config.length);

    Ok(password.into_iter().collect())
}

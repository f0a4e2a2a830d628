//! Character classes a password may draw from

const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const NUMBERS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// A named, disjoint set of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    /// A-Z
    Uppercase,
    /// a-z
    Lowercase,
    /// 0-9
    Numbers,
    /// Fixed punctuation set
    Symbols,
}

impl CharacterClass {
    /// All classes in alphabet-building order
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Numbers,
        CharacterClass::Symbols,
    ];

    /// Characters belonging to this class
    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Numbers => NUMBERS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    /// Check whether `c` belongs to this class
    pub fn contains(self, c: char) -> bool {
        self.alphabet().contains(c)
    }

    /// Class of a character, if it belongs to any
    pub fn of(c: char) -> Option<CharacterClass> {
        Self::ALL.into_iter().find(|class| class.contains(c))
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharacterClass::Uppercase => write!(f, "uppercase"),
            CharacterClass::Lowercase => write!(f, "lowercase"),
            CharacterClass::Numbers => write!(f, "numbers"),
            CharacterClass::Symbols => write!(f, "symbols"),
        }
    }
}

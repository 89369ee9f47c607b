//! Symbol definitions and the standard symbol set

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A board symbol, compared by its code.
///
/// Standard symbols are `const` and borrow their code, so comparing and
/// cloning them never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(Cow<'static, str>);

impl Symbol {
    pub const HI1: Symbol = Symbol::from_static("Hi1");
    pub const HI2: Symbol = Symbol::from_static("Hi2");
    pub const HI3: Symbol = Symbol::from_static("Hi3");
    pub const HI4: Symbol = Symbol::from_static("Hi4");
    pub const LOW1: Symbol = Symbol::from_static("Low1");
    pub const LOW2: Symbol = Symbol::from_static("Low2");
    pub const LOW3: Symbol = Symbol::from_static("Low3");
    pub const LOW4: Symbol = Symbol::from_static("Low4");
    pub const SCATTER: Symbol = Symbol::from_static("Scatter");
    pub const WILD: Symbol = Symbol::from_static("Wild");
    /// Sentinel for a cell awaiting refill. Never pays.
    pub const EMPTY: Symbol = Symbol::from_static("Empty");

    /// Symbol with a static code
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Symbol with an owned code (e.g. loaded from config)
    pub fn new(code: impl Into<String>) -> Self {
        Self(Cow::Owned(code.into()))
    }

    /// Symbol code
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Is this the refill sentinel?
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&'static str> for Symbol {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

/// Symbols a mode may draw when generating or refilling a board.
///
/// No wild: it only reaches the board as a cascade seed.
pub const STANDARD_DRAW_SET: [Symbol; 9] = [
    Symbol::HI1,
    Symbol::HI2,
    Symbol::HI3,
    Symbol::HI4,
    Symbol::LOW1,
    Symbol::LOW2,
    Symbol::LOW3,
    Symbol::LOW4,
    Symbol::SCATTER,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_equality_by_code() {
        assert_eq!(Symbol::new("Hi1"), Symbol::HI1);
        assert_ne!(Symbol::HI1, Symbol::HI2);
        assert!(Symbol::new("Empty").is_empty());
        assert!(!Symbol::WILD.is_empty());
    }

    #[test]
    fn test_draw_set_excludes_specials() {
        assert!(!STANDARD_DRAW_SET.contains(&Symbol::WILD));
        assert!(!STANDARD_DRAW_SET.contains(&Symbol::EMPTY));
        assert!(STANDARD_DRAW_SET.contains(&Symbol::SCATTER));
    }

    #[test]
    fn test_symbol_serde_transparent() {
        let json = serde_json::to_string(&Symbol::LOW3).unwrap();
        assert_eq!(json, "\"Low3\"");
        let back: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Symbol::LOW3);
    }
}

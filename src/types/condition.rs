//! Two-factor experimental condition: Valence × Veracity

use serde::{Deserialize, Serialize};

/// Affect axis of the design
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Valence {
    Positive,
    Negative,
    Unknown,
}

/// Honesty axis of the design
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Veracity {
    Truth,
    Lie,
    Unknown,
}

impl Valence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Valence::Positive => "Positive",
            Valence::Negative => "Negative",
            Valence::Unknown => "Unknown",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    /// Anything unrecognised is Unknown.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "positive" => Valence::Positive,
            "negative" => Valence::Negative,
            _ => Valence::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Valence::Unknown
    }
}

impl Veracity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Veracity::Truth => "Truth",
            Veracity::Lie => "Lie",
            Veracity::Unknown => "Unknown",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "truth" => Veracity::Truth,
            "lie" => Veracity::Lie,
            _ => Veracity::Unknown,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Veracity::Unknown
    }
}

impl std::fmt::Display for Valence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Veracity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved condition of one file. Each axis resolves independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub valence: Valence,
    pub veracity: Veracity,
}

/// Wide-table column order. Fixed, independent of what was observed.
pub const CONDITION_COLUMNS: [Condition; 4] = [
    Condition::new(Valence::Positive, Veracity::Lie),
    Condition::new(Valence::Negative, Veracity::Lie),
    Condition::new(Valence::Positive, Veracity::Truth),
    Condition::new(Valence::Negative, Veracity::Truth),
];

impl Condition {
    pub const fn new(valence: Valence, veracity: Veracity) -> Self {
        Self { valence, veracity }
    }

    pub const fn unknown() -> Self {
        Self::new(Valence::Unknown, Veracity::Unknown)
    }

    /// Column label, e.g. `"Positive Lie"`
    pub fn label(&self) -> String {
        format!("{} {}", self.valence, self.veracity)
    }

    /// Inverse of [`Condition::label`]: split on the first space.
    pub fn from_label(label: &str) -> Self {
        match label.split_once(' ') {
            Some((valence, veracity)) => {
                Self::new(Valence::from_label(valence), Veracity::from_label(veracity))
            }
            None => Self::unknown(),
        }
    }

    /// Both axes resolved
    pub fn is_known(&self) -> bool {
        self.valence.is_known() && self.veracity.is_known()
    }

    /// ANSI color for terminal display
    pub fn color_code(&self) -> &'static str {
        match (self.valence, self.veracity) {
            (Valence::Unknown, _) | (_, Veracity::Unknown) => "\x1b[90m", // Gray
            (_, Veracity::Truth) => "\x1b[32m",                           // Green
            (_, Veracity::Lie) => "\x1b[33m",                             // Yellow
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.valence, self.veracity)
    }
}

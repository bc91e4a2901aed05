//! Person (node) types

use serde::{Deserialize, Serialize};

/// Identifiers at or above this value denote unknown-spouse placeholders
pub const PLACEHOLDER_ID_START: u32 = 1000;

/// Display text of placeholder persons, also the notation token for "unknown"
pub const UNKNOWN_MARKER: &str = "?";

/// Identifier of a person as written in the notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl PersonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether this id lies in the reserved unknown-spouse range
    pub fn is_placeholder(self) -> bool {
        self.0 >= PLACEHOLDER_ID_START
    }
}

impl From<u32> for PersonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person in the family graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,

    /// Name plus optional life-dates annotation, already normalized
    pub info: String,
}

impl Person {
    pub fn new(id: PersonId, info: impl Into<String>) -> Self {
        Self {
            id,
            info: info.into(),
        }
    }

    /// Synthesized stand-in for an unrecorded spouse
    pub fn placeholder(id: PersonId) -> Self {
        Self::new(id, UNKNOWN_MARKER)
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_placeholder()
    }

    /// Minted by the parser for a `?` spouse rather than declared in the source
    pub fn is_synthesized(&self) -> bool {
        self.id.is_placeholder() && self.info == UNKNOWN_MARKER
    }

    /// Display text without the parenthesized annotation
    pub fn name(&self) -> &str {
        name_part(&self.info)
    }
}

/// Text before the first `(`, trimmed
pub fn name_part(info: &str) -> &str {
    info.split('(').next().unwrap_or_default().trim()
}

/// Normalize the free text of a person line.
///
/// Whitespace runs collapse to single spaces. Without any parenthesis, a
/// trailing bare four-digit year is wrapped as `(YYYY)`.
pub fn normalize_info(raw: &str) -> String {
    let info = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if info.contains('(') {
        return info;
    }

    match info.rsplit_once(' ') {
        Some((head, year)) if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) => {
            format!("{head} ({year})")
        }
        _ => info,
    }
}

//! Relation (edge) types

use serde::{Deserialize, Serialize};

use crate::person::{PersonId, UNKNOWN_MARKER};

/// Two partners of a marriage, kept in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Couple {
    pub first: PersonId,
    pub second: PersonId,
}

impl Couple {
    pub fn new(first: PersonId, second: PersonId) -> Self {
        Self { first, second }
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.first == id || self.second == id
    }
}

/// Classification of a relation, fixed at parse time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Married,
    Childless,
    UnknownChildren,
    MixedChildren,
    ParentChild,
}

impl RelationKind {
    pub const ALL: [RelationKind; 5] = [
        Self::Married,
        Self::Childless,
        Self::UnknownChildren,
        Self::MixedChildren,
        Self::ParentChild,
    ];
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Married => "marriage with children",
            Self::Childless => "childless marriage",
            Self::UnknownChildren => "marriage with unknown children",
            Self::MixedChildren => "marriage with mixed children",
            Self::ParentChild => "single parent link",
        };
        f.write_str(label)
    }
}

/// A family relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    /// Marriage whose children are all enumerated
    Married {
        couple: Couple,
        children: Vec<PersonId>,
    },
    Childless {
        couple: Couple,
    },
    /// Children exist but are not enumerated
    UnknownChildren {
        couple: Couple,
    },
    /// Some children enumerated plus a count of unrecorded ones
    MixedChildren {
        couple: Couple,
        children: Vec<PersonId>,
        unknown: usize,
    },
    /// Loose parent/child link without a marriage
    ParentChild {
        parent: PersonId,
        child: PersonId,
    },
}

impl Relation {
    pub fn kind(&self) -> RelationKind {
        match self {
            Self::Married { .. } => RelationKind::Married,
            Self::Childless { .. } => RelationKind::Childless,
            Self::UnknownChildren { .. } => RelationKind::UnknownChildren,
            Self::MixedChildren { .. } => RelationKind::MixedChildren,
            Self::ParentChild { .. } => RelationKind::ParentChild,
        }
    }

    /// The marriage partners, `None` for single parent links
    pub fn couple(&self) -> Option<&Couple> {
        match self {
            Self::Married { couple, .. }
            | Self::Childless { couple }
            | Self::UnknownChildren { couple }
            | Self::MixedChildren { couple, .. } => Some(couple),
            Self::ParentChild { .. } => None,
        }
    }

    /// Children enumerated by id (marriage variants only)
    pub fn known_children(&self) -> &[PersonId] {
        match self {
            Self::Married { children, .. } | Self::MixedChildren { children, .. } => children,
            _ => &[],
        }
    }

    /// Count of unrecorded children; zero for variants without that portion
    pub fn unknown_children(&self) -> usize {
        match self {
            Self::MixedChildren { unknown, .. } => *unknown,
            _ => 0,
        }
    }

    pub fn total_children(&self) -> usize {
        self.known_children().len() + self.unknown_children()
    }

    /// Marriage with enumerated children, fully or partially
    pub fn is_family(&self) -> bool {
        matches!(self, Self::Married { .. } | Self::MixedChildren { .. })
    }

    /// Whether `id` is a parent (or partner) in this relation
    pub fn has_parent(&self, id: PersonId) -> bool {
        match self {
            Self::ParentChild { parent, .. } => *parent == id,
            _ => self.couple().is_some_and(|c| c.contains(id)),
        }
    }

    /// Every referenced person id in declaration order
    pub fn persons(&self) -> Vec<PersonId> {
        match self {
            Self::ParentChild { parent, child } => vec![*parent, *child],
            _ => {
                let mut ids = Vec::with_capacity(2 + self.known_children().len());
                if let Some(couple) = self.couple() {
                    ids.push(couple.first);
                    ids.push(couple.second);
                }
                ids.extend_from_slice(self.known_children());
                ids
            }
        }
    }
}

impl Relation {
    /// Notation form of the relation; partners for which `unknown` holds are written as `?`
    pub fn notation(&self, unknown: impl Fn(PersonId) -> bool) -> String {
        let Some(couple) = self.couple() else {
            return match self {
                Self::ParentChild { parent, child } => format!("{parent} => {child}"),
                _ => String::new(),
            };
        };

        let mut out = format!("{} -- ", couple.first);
        if unknown(couple.second) {
            out.push_str(UNKNOWN_MARKER);
        } else {
            out.push_str(&couple.second.to_string());
        }

        match self {
            Self::UnknownChildren { .. } => out.push_str(&format!(" ({UNKNOWN_MARKER})")),
            // A clause of empty tokens keeps the "no enumerated children" shape
            Self::Married { children, .. } if children.is_empty() => out.push_str(" (,)"),
            Self::Married { .. } | Self::MixedChildren { .. } => {
                let tokens: Vec<String> = self
                    .known_children()
                    .iter()
                    .map(ToString::to_string)
                    .chain(std::iter::repeat(UNKNOWN_MARKER.to_string()).take(self.unknown_children()))
                    .collect();
                out.push_str(&format!(" ({})", tokens.join(",")));
            }
            _ => {}
        }
        out
    }
}

/// Writes the notation form, treating every placeholder-range partner as unknown
impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.notation(PersonId::is_placeholder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn couple(a: u32, b: u32) -> Couple {
        Couple::new(PersonId(a), PersonId(b))
    }

    #[test]
    fn test_child_counts() {
        let mixed = Relation::MixedChildren {
            couple: couple(1, 2),
            children: vec![PersonId(3)],
            unknown: 2,
        };
        assert_eq!(mixed.known_children(), &[PersonId(3)]);
        assert_eq!(mixed.unknown_children(), 2);
        assert_eq!(mixed.total_children(), 3);
        assert!(mixed.is_family());

        let unknown = Relation::UnknownChildren { couple: couple(1, 2) };
        assert_eq!(unknown.total_children(), 0);
        assert!(!unknown.is_family());
    }

    #[test]
    fn test_persons_and_parents() {
        let married = Relation::Married {
            couple: couple(1, 2),
            children: vec![PersonId(3), PersonId(4)],
        };
        assert_eq!(
            married.persons(),
            vec![PersonId(1), PersonId(2), PersonId(3), PersonId(4)]
        );
        assert!(married.has_parent(PersonId(2)));
        assert!(!married.has_parent(PersonId(3)));

        let link = Relation::ParentChild {
            parent: PersonId(5),
            child: PersonId(6),
        };
        assert!(link.couple().is_none());
        assert!(link.has_parent(PersonId(5)));
        assert_eq!(link.persons(), vec![PersonId(5), PersonId(6)]);
    }

    #[test]
    fn test_notation_display() {
        let mixed = Relation::MixedChildren {
            couple: couple(1, 1000),
            children: vec![PersonId(3)],
            unknown: 2,
        };
        assert_eq!(mixed.to_string(), "1 -- ? (3,?,?)");
        assert_eq!(
            Relation::Childless { couple: couple(1, 2) }.to_string(),
            "1 -- 2"
        );
        assert_eq!(
            Relation::UnknownChildren { couple: couple(1, 2) }.to_string(),
            "1 -- 2 (?)"
        );
        assert_eq!(
            Relation::ParentChild {
                parent: PersonId(4),
                child: PersonId(9)
            }
            .to_string(),
            "4 => 9"
        );
    }

    #[test]
    fn test_notation_keeps_declared_high_partner() {
        let married = Relation::Married {
            couple: couple(1, 1000),
            children: vec![PersonId(2)],
        };
        assert_eq!(married.notation(|_| false), "1 -- 1000 (2)");
        assert_eq!(married.notation(PersonId::is_placeholder), "1 -- ? (2)");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(RelationKind::Childless.to_string(), "childless marriage");
        assert_eq!(RelationKind::ALL.len(), 5);
    }
}

//! Referential integrity checks

use serde::{Deserialize, Serialize};

use crate::graph::FamilyGraph;
use crate::person::PersonId;
use crate::relation::{Relation, RelationKind};

/// Role a missing person plays in the relation that references it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Spouse,
    Child,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Parent => "Parent",
            Self::Spouse => "Spouse",
            Self::Child => "Child",
        })
    }
}

/// A relation referencing a person that was never declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub role: Role,
    pub id: PersonId,
    pub kind: RelationKind,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}) not found among people",
            self.role, self.id, self.kind
        )
    }
}

fn partner_role(kind: RelationKind) -> Role {
    match kind {
        RelationKind::Married | RelationKind::ParentChild => Role::Parent,
        _ => Role::Spouse,
    }
}

fn referenced(relation: &Relation) -> Vec<(Role, PersonId)> {
    let kind = relation.kind();
    let mut refs = Vec::new();
    match relation {
        Relation::ParentChild { parent, child } => {
            refs.push((Role::Parent, *parent));
            refs.push((Role::Child, *child));
        }
        _ => {
            if let Some(couple) = relation.couple() {
                refs.push((partner_role(kind), couple.first));
                refs.push((partner_role(kind), couple.second));
            }
            refs.extend(relation.known_children().iter().map(|&id| (Role::Child, id)));
        }
    }
    refs
}

/// Report every dangling reference, one issue per reference
///
/// An empty result means the graph is clean. Nothing here is fatal.
pub fn validate(graph: &FamilyGraph) -> Vec<ValidationIssue> {
    let issues: Vec<ValidationIssue> = graph
        .relations()
        .iter()
        .flat_map(|relation| {
            let kind = relation.kind();
            referenced(relation)
                .into_iter()
                .filter(|(_, id)| !graph.contains(*id))
                .map(move |(role, id)| ValidationIssue { role, id, kind })
        })
        .collect();

    if !issues.is_empty() {
        tracing::warn!("Validation found {} dangling references", issues.len());
    }
    issues
}

//! Family graph model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::person::{Person, PersonId, PLACEHOLDER_ID_START};
use crate::relation::{Relation, RelationKind};

/// People and their relations, rebuilt from scratch on every parse
///
/// Persons keep declaration order; re-declaring an id replaces the text in
/// place. Relations keep file order. Only the parser mutates the graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyGraph {
    people: IndexMap<PersonId, Person>,
    relations: Vec<Relation>,
}

impl FamilyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_person(&mut self, person: Person) {
        self.people.insert(person.id, person);
    }

    pub(crate) fn push_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Mint a placeholder spouse with the smallest free id at or above 1000
    pub(crate) fn add_placeholder(&mut self) -> PersonId {
        let id = self.next_placeholder_id();
        self.insert_person(Person::placeholder(id));
        id
    }

    pub fn next_placeholder_id(&self) -> PersonId {
        let mut id = PLACEHOLDER_ID_START;
        while self.people.contains_key(&PersonId(id)) {
            id += 1;
        }
        PersonId(id)
    }

    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.people.contains_key(&id)
    }

    /// Display text of a person, or `ID <n>` when the id is dangling
    pub fn display_name(&self, id: PersonId) -> String {
        self.person(id)
            .map(|p| p.info.clone())
            .unwrap_or_else(|| format!("ID {id}"))
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn relations_of_kind(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.relations.is_empty()
    }

    /// Write the model back as notation text, persons first
    pub fn to_notation(&self) -> String {
        let mut out = String::new();
        for person in self.people().filter(|p| !p.is_synthesized()) {
            out.push_str(&format!("{} - {}\n", person.id, person.info));
        }
        if !self.relations.is_empty() {
            out.push('\n');
        }
        let synthesized = |id| self.person(id).is_some_and(Person::is_synthesized);
        for relation in &self.relations {
            out.push_str(&relation.notation(synthesized));
            out.push('\n');
        }
        out
    }

    pub fn statistics(&self) -> GraphStatistics {
        let count = |kind| self.relations_of_kind(kind).count();

        let married: HashSet<PersonId> = self
            .relations
            .iter()
            .filter_map(Relation::couple)
            .flat_map(|c| [c.first, c.second])
            .collect();

        let known_children = self
            .relations
            .iter()
            .map(|r| r.known_children().len())
            .sum();
        let unknown_children = self.relations.iter().map(Relation::unknown_children).sum();

        let with_children = count(RelationKind::Married);
        let childless = count(RelationKind::Childless);
        let unknown = count(RelationKind::UnknownChildren);
        let mixed = count(RelationKind::MixedChildren);

        GraphStatistics {
            people: self.people.len(),
            marriages_with_children: with_children,
            childless_marriages: childless,
            unknown_children_marriages: unknown,
            mixed_children_marriages: mixed,
            total_marriages: with_children + childless + unknown + mixed,
            known_children,
            unknown_children,
            single_links: count(RelationKind::ParentChild),
            married_people: married.len(),
            unmarried_people: self.people.len().saturating_sub(married.len()),
        }
    }
}

/// Aggregate counts over a family graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub people: usize,
    pub marriages_with_children: usize,
    pub childless_marriages: usize,
    pub unknown_children_marriages: usize,
    pub mixed_children_marriages: usize,
    pub total_marriages: usize,
    /// Enumerated children of plain and mixed marriages
    pub known_children: usize,
    /// Unrecorded children of mixed marriages
    pub unknown_children: usize,
    pub single_links: usize,
    /// Distinct persons appearing as a partner in any marriage
    pub married_people: usize,
    pub unmarried_people: usize,
}

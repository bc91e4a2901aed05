//! Generation buckets by birth year

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::birth_year::birth_year;
use crate::graph::FamilyGraph;
use crate::person::{Person, PersonId};

/// Fixed birth-year range used for coloring and statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Generation {
    /// Born 1920 or earlier
    Before1921,
    From1921To1940,
    From1941To1960,
    From1961To1980,
    From1981To2000,
    After2000,
    /// Placeholder persons, whatever their text says
    UnknownSpouse,
}

impl Generation {
    pub const ALL: [Generation; 7] = [
        Self::Before1921,
        Self::From1921To1940,
        Self::From1941To1960,
        Self::From1961To1980,
        Self::From1981To2000,
        Self::After2000,
        Self::UnknownSpouse,
    ];

    pub fn from_year(year: i32) -> Self {
        match year {
            ..=1920 => Self::Before1921,
            1921..=1940 => Self::From1921To1940,
            1941..=1960 => Self::From1941To1960,
            1961..=1980 => Self::From1961To1980,
            1981..=2000 => Self::From1981To2000,
            _ => Self::After2000,
        }
    }

    pub fn of(person: &Person) -> Self {
        if person.is_placeholder() {
            Self::UnknownSpouse
        } else {
            Self::from_year(birth_year(&person.info))
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Before1921 => "Born up to 1920",
            Self::From1921To1940 => "Born 1921-1940",
            Self::From1941To1960 => "Born 1941-1960",
            Self::From1961To1980 => "Born 1961-1980",
            Self::From1981To2000 => "Born 1981-2000",
            Self::After2000 => "Born after 2000",
            Self::UnknownSpouse => "Unknown spouses",
        }
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Persons grouped by generation, buckets in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBuckets {
    buckets: BTreeMap<Generation, Vec<PersonId>>,
}

impl GenerationBuckets {
    pub fn get(&self, generation: Generation) -> &[PersonId] {
        self.buckets
            .get(&generation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every bucket, including empty ones
    pub fn counts(&self) -> Vec<(Generation, usize)> {
        Generation::ALL
            .iter()
            .map(|&generation| (generation, self.get(generation).len()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Generation, &[PersonId])> {
        self.buckets.iter().map(|(g, ids)| (*g, ids.as_slice()))
    }
}

pub fn bucket_generations(graph: &FamilyGraph) -> GenerationBuckets {
    let mut buckets: BTreeMap<Generation, Vec<PersonId>> = BTreeMap::new();
    for person in graph.people() {
        buckets.entry(Generation::of(person)).or_default().push(person.id);
    }
    GenerationBuckets { buckets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_closed_ranges() {
        assert_eq!(Generation::from_year(1920), Generation::Before1921);
        assert_eq!(Generation::from_year(1921), Generation::From1921To1940);
        assert_eq!(Generation::from_year(1960), Generation::From1941To1960);
        assert_eq!(Generation::from_year(1980), Generation::From1961To1980);
        assert_eq!(Generation::from_year(2000), Generation::From1981To2000);
        assert_eq!(Generation::from_year(2001), Generation::After2000);
    }

    #[test]
    fn test_buckets() {
        let graph = parse_str(
            "1 - Old One (1900-1970)\n2 - Mid Person\n3 - Young One (2010)\n1000 - Declared (1990)\n3 -- ?",
        );
        let buckets = bucket_generations(&graph);

        assert_eq!(buckets.get(Generation::Before1921), &[PersonId(1)]);
        // No dates: counted as mid-century
        assert_eq!(buckets.get(Generation::From1941To1960), &[PersonId(2)]);
        assert_eq!(buckets.get(Generation::After2000), &[PersonId(3)]);
        // The reserved range wins over the declared year
        assert_eq!(
            buckets.get(Generation::UnknownSpouse),
            &[PersonId(1000), PersonId(1001)]
        );

        let counts = buckets.counts();
        assert_eq!(counts.len(), 7);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 5);
    }
}

//! Data-quality heuristics

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::graph::FamilyGraph;
use crate::person::PersonId;
use crate::relation::RelationKind;

/// Substring lists driving the text heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRules {
    /// Tokens meaning "dates unknown"
    #[serde(default = "default_unknown_markers")]
    pub unknown_markers: Vec<String>,

    /// Misspellings seen in real data
    #[serde(default = "default_known_typos")]
    pub known_typos: Vec<String>,
}

fn default_unknown_markers() -> Vec<String> {
    vec!["неизвестны".to_string(), "unknown".to_string()]
}

fn default_known_typos() -> Vec<String> {
    vec!["Владислававна".to_string(), "Николая".to_string()]
}

impl Default for QualityRules {
    fn default() -> Self {
        Self {
            unknown_markers: default_unknown_markers(),
            known_typos: default_known_typos(),
        }
    }
}

/// A flagged person and the text that triggered the flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub id: PersonId,
    pub text: String,
}

impl std::fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    IncompleteNames,
    UnknownDates,
    PossibleTypos,
    Isolated,
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::IncompleteNames => "Incomplete names",
            Self::UnknownDates => "Unknown dates",
            Self::PossibleTypos => "Possible typos",
            Self::Isolated => "Isolated persons",
        })
    }
}

/// Heuristic findings; placeholder persons are never flagged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIssues {
    pub incomplete_names: Vec<QualityIssue>,
    pub unknown_dates: Vec<QualityIssue>,
    pub possible_typos: Vec<QualityIssue>,
    /// Neither child nor parent of any plain marriage with children
    pub isolated: Vec<QualityIssue>,
}

impl DataIssues {
    pub fn categories(&self) -> [(IssueCategory, &[QualityIssue]); 4] {
        [
            (IssueCategory::IncompleteNames, self.incomplete_names.as_slice()),
            (IssueCategory::UnknownDates, self.unknown_dates.as_slice()),
            (IssueCategory::PossibleTypos, self.possible_typos.as_slice()),
            (IssueCategory::Isolated, self.isolated.as_slice()),
        ]
    }

    pub fn total(&self) -> usize {
        self.categories().iter().map(|(_, issues)| issues.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

pub fn find_data_issues(graph: &FamilyGraph, rules: &QualityRules) -> DataIssues {
    let mut issues = DataIssues::default();

    for person in graph.people().filter(|p| !p.is_placeholder()) {
        let name = person.name();
        let flag = |text: &str| QualityIssue {
            id: person.id,
            text: text.to_string(),
        };

        // Dates are only inspected once the name itself looks complete
        if name.split_whitespace().count() == 1 {
            issues.incomplete_names.push(flag(name));
        } else if rules
            .unknown_markers
            .iter()
            .any(|marker| !marker.is_empty() && person.info.contains(marker.as_str()))
        {
            issues.unknown_dates.push(flag(name));
        }

        if rules
            .known_typos
            .iter()
            .any(|typo| !typo.is_empty() && person.info.contains(typo.as_str()))
        {
            issues.possible_typos.push(flag(&person.info));
        }
    }

    // Only plain marriages with children count here; mixed and unknown
    // variants are ignored to stay compatible with earlier reports
    let mut connected: HashSet<PersonId> = HashSet::new();
    for relation in graph.relations_of_kind(RelationKind::Married) {
        connected.extend(relation.persons());
    }

    issues.isolated = graph
        .people()
        .filter(|p| !p.is_placeholder() && !connected.contains(&p.id))
        .map(|p| QualityIssue {
            id: p.id,
            text: p.name().to_string(),
        })
        .collect();

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn ids(issues: &[QualityIssue]) -> Vec<u32> {
        issues.iter().map(|i| i.id.get()).collect()
    }

    #[test]
    fn test_incomplete_and_unknown_dates() {
        let graph = parse_str(
            "1 - Madonna (1958)\n2 - Ivan Petrov (dates unknown)\n3 - Solo (unknown)\n4 - Anna Ivanova (1950)\n",
        );
        let issues = find_data_issues(&graph, &QualityRules::default());

        assert_eq!(ids(&issues.incomplete_names), vec![1, 3]);
        assert_eq!(issues.incomplete_names[0].text, "Madonna");
        // Person 3 is already flagged as incomplete
        assert_eq!(ids(&issues.unknown_dates), vec![2]);
        assert_eq!(issues.unknown_dates[0].to_string(), "2: Ivan Petrov");
    }

    #[test]
    fn test_known_typos() {
        let graph = parse_str("1 - Анна Владислававна (1950)\n2 - Пётр Николаевич\n");
        let issues = find_data_issues(&graph, &QualityRules::default());
        assert_eq!(ids(&issues.possible_typos), vec![1]);
        assert_eq!(issues.possible_typos[0].text, "Анна Владислававна (1950)");

        let rules = QualityRules {
            unknown_markers: vec![],
            known_typos: vec!["Николаевич".to_string()],
        };
        assert_eq!(ids(&find_data_issues(&graph, &rules).possible_typos), vec![2]);
    }

    #[test]
    fn test_isolated_only_considers_plain_marriages() {
        let graph = parse_str(
            "1 - A a\n2 - B b\n3 - C c\n4 - D d\n5 - E e\n6 - F f\n\
             1 -- 2 (3)\n4 -- 5 (6,?)\n",
        );
        let issues = find_data_issues(&graph, &QualityRules::default());
        // 4, 5 and 6 only appear in a mixed marriage
        assert_eq!(ids(&issues.isolated), vec![4, 5, 6]);
    }

    #[test]
    fn test_placeholders_are_skipped() {
        let graph = parse_str("1 - A a\n1 -- ?\n");
        let issues = find_data_issues(&graph, &QualityRules::default());
        assert_eq!(ids(&issues.isolated), vec![1]);
        assert!(issues.incomplete_names.is_empty());
        assert_eq!(issues.total(), 1);
    }
}

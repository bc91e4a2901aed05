//! Largest-family ranking

use serde::{Deserialize, Serialize};

use crate::graph::FamilyGraph;
use crate::relation::Relation;

pub const DEFAULT_TOP_FAMILIES: usize = 3;

/// A marriage with its total number of children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilySize {
    pub first_parent: String,
    pub second_parent: String,
    /// Known plus unrecorded children
    pub children: usize,
}

/// Marriages with enumerated children ranked by size, largest first
///
/// Ties keep declaration order.
pub fn largest_families(graph: &FamilyGraph, top_n: usize) -> Vec<FamilySize> {
    let mut families: Vec<FamilySize> = graph
        .relations()
        .iter()
        .filter(|r| r.is_family())
        .filter_map(|relation| {
            let couple = relation.couple()?;
            Some(FamilySize {
                first_parent: graph.display_name(couple.first),
                second_parent: graph.display_name(couple.second),
                children: relation.total_children(),
            })
        })
        .collect();

    families.sort_by(|a, b| b.children.cmp(&a.children));
    families.truncate(top_n);
    families
}

/// Total children per family relation, in declaration order
pub fn family_sizes(graph: &FamilyGraph) -> Vec<usize> {
    graph
        .relations()
        .iter()
        .filter(|r| r.is_family())
        .map(Relation::total_children)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_top_two_of_mixed_sizes() {
        // Sizes 2, 0, 5, 3
        let graph = parse_str(
            "1 - A\n2 - B\n3 - C\n4 - D\n5 - E\n6 - F\n7 - G\n8 - H\n\
             1 -- 2 (10,11)\n3 -- 4 (x)\n5 -- 6 (12,13,?,?,?)\n7 -- 8 (14,15,16)\n1 -- 3\n",
        );
        assert_eq!(family_sizes(&graph), vec![2, 0, 5, 3]);

        let top = largest_families(&graph, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].children, 5);
        assert_eq!(top[0].first_parent, "E");
        assert_eq!(top[0].second_parent, "F");
        assert_eq!(top[1].children, 3);
        assert_eq!(top[1].first_parent, "G");
    }

    #[test]
    fn test_ties_keep_declaration_order_and_fallback_names() {
        let graph = parse_str("1 - A\n1 -- 2 (5)\n3 -- 4 (6)\n");
        let top = largest_families(&graph, DEFAULT_TOP_FAMILIES);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].first_parent, "A");
        assert_eq!(top[0].second_parent, "ID 2");
        assert_eq!(top[1].first_parent, "ID 3");
    }

    #[test]
    fn test_unknown_only_marriages_are_not_ranked() {
        let graph = parse_str("1 -- 2 (?)\n3 -- 4");
        assert!(largest_families(&graph, 3).is_empty());
    }
}

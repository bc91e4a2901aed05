//! Longest line of descent

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::graph::FamilyGraph;
use crate::person::PersonId;

/// Longest parent-to-child chain found in the graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    /// Persons from the oldest ancestor down, one per generation
    pub path: Vec<PersonId>,
    pub stats: LineageStats,
}

impl Lineage {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Search statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineageStats {
    pub roots: usize,
    pub nodes_visited: usize,
    /// Children skipped because they were already on the current path
    pub cycles_skipped: usize,
}

/// Parent to children adjacency over marriages with enumerated children
struct Descent {
    children: HashMap<PersonId, Vec<PersonId>>,
    has_parent: HashSet<PersonId>,
}

impl Descent {
    fn build(graph: &FamilyGraph) -> Self {
        let mut children: HashMap<PersonId, Vec<PersonId>> = HashMap::new();
        let mut has_parent = HashSet::new();

        for relation in graph.relations().iter().filter(|r| r.is_family()) {
            let Some(couple) = relation.couple() else {
                continue;
            };
            let kids = relation.known_children();
            has_parent.extend(kids.iter().copied());
            children.entry(couple.first).or_default().extend_from_slice(kids);
            if couple.second != couple.first {
                children.entry(couple.second).or_default().extend_from_slice(kids);
            }
        }

        Self {
            children,
            has_parent,
        }
    }

    fn children_of(&self, id: PersonId) -> &[PersonId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or_default()
    }
}

/// DFS frame: a person, the next child to try and the best child path so far
struct Frame<'a> {
    person: PersonId,
    children: &'a [PersonId],
    next: usize,
    best: Vec<PersonId>,
}

impl<'a> Frame<'a> {
    fn new(person: PersonId, descent: &'a Descent) -> Self {
        Self {
            person,
            children: descent.children_of(person),
            next: 0,
            best: Vec::new(),
        }
    }
}

/// Longest simple path starting at `root`.
///
/// Persons already on the current path are skipped, so malformed data
/// with cycles terminates. Among children whose subtrees tie, the first
/// declared child wins.
fn longest_from(root: PersonId, descent: &Descent, stats: &mut LineageStats) -> Vec<PersonId> {
    let mut on_path = HashSet::from([root]);
    let mut stack = vec![Frame::new(root, descent)];

    while let Some(frame) = stack.last_mut() {
        if let Some(&child) = frame.children.get(frame.next) {
            frame.next += 1;
            if on_path.contains(&child) {
                stats.cycles_skipped += 1;
                continue;
            }
            on_path.insert(child);
            stats.nodes_visited += 1;
            stack.push(Frame::new(child, descent));
            continue;
        }

        let Some(done) = stack.pop() else {
            break;
        };
        on_path.remove(&done.person);

        let mut path = Vec::with_capacity(done.best.len() + 1);
        path.push(done.person);
        path.extend(done.best);

        match stack.last_mut() {
            Some(parent) if path.len() > parent.best.len() => parent.best = path,
            Some(_) => {}
            None => return path,
        }
    }

    vec![root]
}

/// Find the longest lineage across all roots.
///
/// Roots are persons never listed as a child of a marriage with enumerated
/// children, tried in declaration order; the first longest path wins.
pub fn longest_lineage(graph: &FamilyGraph) -> Lineage {
    let descent = Descent::build(graph);
    let mut stats = LineageStats::default();
    let mut longest: Vec<PersonId> = Vec::new();

    for root in graph.people().map(|p| p.id) {
        if descent.has_parent.contains(&root) {
            continue;
        }
        stats.roots += 1;
        stats.nodes_visited += 1;

        let path = longest_from(root, &descent, &mut stats);
        if path.len() > longest.len() {
            longest = path;
        }
    }

    tracing::debug!(
        "Lineage search over {} roots visited {} nodes, longest path {}",
        stats.roots,
        stats.nodes_visited,
        longest.len()
    );

    Lineage {
        path: longest,
        stats,
    }
}

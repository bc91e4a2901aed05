//! Notation parser
//!
//! Each trimmed line is blank, a `//` comment, a relation line or a person
//! line. The relation grammar is tried first:
//!
//! ```text
//! 1 -- 2 (3,4)     marriage with children
//! 1 -> 2           childless marriage (`--` and `->` are equivalent)
//! 1 -- 2 ()        childless marriage
//! 1 -- 2 (?)       marriage with unknown children
//! 1 -- 2 (3,?,?)   marriage with mixed children
//! 1 -- ? (5)       marriage with an unknown spouse
//! 4 => 9           single parent link
//! 1 - Jane Doe (01.02.1950-...)
//! ```
//!
//! Lines matching neither grammar are skipped without error.

use std::path::Path;

use crate::error::{Error, Result};
use crate::graph::FamilyGraph;
use crate::person::{normalize_info, Person, PersonId, UNKNOWN_MARKER};
use crate::relation::{Couple, Relation};

pub const COMMENT_MARKER: &str = "//";

/// Second operand of a relation line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spouse {
    Known(PersonId),
    /// `?`: a placeholder person is minted when the line is applied
    Unknown,
}

/// Shape of the parenthesized children clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildrenClause {
    Absent,
    Empty,
    /// Literal `(?)`: an unspecified number of children
    Unknown,
    List {
        known: Vec<PersonId>,
        unknown: usize,
    },
}

impl ChildrenClause {
    fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text == UNKNOWN_MARKER {
            return Self::Unknown;
        }
        if text.is_empty() {
            return Self::Empty;
        }

        let mut known = Vec::new();
        let mut unknown = 0;
        for token in text.split(',').map(str::trim) {
            if token == UNKNOWN_MARKER {
                unknown += 1;
            } else if let Some(id) = parse_id(token) {
                known.push(id);
            }
        }
        Self::List { known, unknown }
    }

    /// Classify the relation; decided once and never revisited
    pub fn into_relation(self, couple: Couple) -> Relation {
        match self {
            Self::Absent | Self::Empty => Relation::Childless { couple },
            Self::Unknown => Relation::UnknownChildren { couple },
            // `(?,?)` is "two unrecorded children", not "unknown children"
            Self::List { known, unknown } if unknown > 0 => Relation::MixedChildren {
                couple,
                children: known,
                unknown,
            },
            Self::List { known, .. } => Relation::Married {
                couple,
                children: known,
            },
        }
    }
}

/// One recognized line of notation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Person {
        id: PersonId,
        info: String,
    },
    Relation {
        first: PersonId,
        second: Spouse,
        children: ChildrenClause,
    },
    ParentLink {
        parent: PersonId,
        child: PersonId,
    },
}

fn parse_id(token: &str) -> Option<PersonId> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().map(PersonId)
}

/// Byte cursor over a single line
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn id(&mut self) -> Option<PersonId> {
        let rest = self.rest();
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let id = parse_id(&rest[..len])?;
        self.pos += len;
        Some(id)
    }

    /// Text up to (not including) the next `)`
    fn until_close_paren(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(')')?;
        self.pos += end;
        Some(&rest[..end])
    }
}

fn relation_line(line: &str) -> Option<Line> {
    let mut cur = Cursor::new(line);
    let first = cur.id()?;
    cur.skip_ws();
    if !(cur.eat("--") || cur.eat("->")) {
        return None;
    }
    cur.skip_ws();

    let second = if cur.eat(UNKNOWN_MARKER) {
        Spouse::Unknown
    } else {
        Spouse::Known(cur.id()?)
    };

    cur.skip_ws();
    let children = if cur.at_end() {
        ChildrenClause::Absent
    } else if cur.eat("(") {
        let text = cur.until_close_paren()?;
        if !cur.eat(")") || !cur.at_end() {
            return None;
        }
        ChildrenClause::from_text(text)
    } else {
        return None;
    };

    Some(Line::Relation {
        first,
        second,
        children,
    })
}

fn parent_link_line(line: &str) -> Option<Line> {
    let mut cur = Cursor::new(line);
    let parent = cur.id()?;
    cur.skip_ws();
    if !cur.eat("=>") {
        return None;
    }
    cur.skip_ws();
    let child = cur.id()?;
    cur.at_end().then_some(Line::ParentLink { parent, child })
}

fn person_line(line: &str) -> Option<Line> {
    let mut cur = Cursor::new(line);
    let id = cur.id()?;
    cur.skip_ws();
    if !cur.eat("-") {
        return None;
    }
    cur.skip_ws();
    let info = cur.rest().trim();
    if info.is_empty() {
        return None;
    }
    Some(Line::Person {
        id,
        info: normalize_info(info),
    })
}

/// Classify a single line; `None` for blanks, comments and unrecognized text
pub fn parse_line(line: &str) -> Option<Line> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return None;
    }
    relation_line(line)
        .or_else(|| parent_link_line(line))
        .or_else(|| person_line(line))
}

fn apply(graph: &mut FamilyGraph, line: Line) {
    match line {
        Line::Person { id, info } => graph.insert_person(Person::new(id, info)),
        Line::Relation {
            first,
            second,
            children,
        } => {
            let second = match second {
                Spouse::Known(id) => id,
                Spouse::Unknown => graph.add_placeholder(),
            };
            graph.push_relation(children.into_relation(Couple::new(first, second)));
        }
        Line::ParentLink { parent, child } => {
            graph.push_relation(Relation::ParentChild { parent, child })
        }
    }
}

/// Build a fresh family graph from notation text, strictly in line order
pub fn parse_str(source: &str) -> FamilyGraph {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut graph = FamilyGraph::new();
    let mut skipped = 0usize;

    for (index, raw) in source.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }
        match parse_line(trimmed) {
            Some(line) => apply(&mut graph, line),
            None => {
                skipped += 1;
                tracing::debug!(line = index + 1, text = trimmed, "Skipping unrecognized line");
            }
        }
    }

    tracing::debug!(
        "Parsed {} people and {} relations ({} lines skipped)",
        graph.person_count(),
        graph.relations().len(),
        skipped
    );
    graph
}

/// Read and parse a notation file
pub fn parse_file(path: impl AsRef<Path>) -> Result<FamilyGraph> {
    let path = path.as_ref();
    tracing::info!("Loading family data from {:?}", path);

    let source = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Error::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(parse_str(&source))
}

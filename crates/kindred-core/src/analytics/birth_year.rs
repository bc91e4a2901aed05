//! Birth year extraction from display text

use regex::Regex;
use std::sync::OnceLock;

/// Year assumed when the text carries no recognizable date
pub const DEFAULT_BIRTH_YEAR: i32 = 1950;

/// Date shapes in priority order, each paired with its year capture group
fn year_patterns() -> &'static [(Regex, usize)] {
    static PATTERNS: OnceLock<Vec<(Regex, usize)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"\(([0-9]{4})-[0-9]{4}\)", 1),
            (r"\(([0-9]{4})\)", 1),
            (r"\(([0-9]{2})\.([0-9]{2})\.([0-9]{4})", 3),
            (r"\(([0-9]{4})-", 1),
        ]
        .into_iter()
        .map(|(pattern, group)| {
            let re = Regex::new(pattern).expect("birth year pattern must compile");
            (re, group)
        })
        .collect()
    })
}

/// First matching date shape's year, if any
pub fn find_birth_year(info: &str) -> Option<i32> {
    year_patterns().iter().find_map(|(re, group)| {
        re.captures(info)
            .and_then(|caps| caps.get(*group))
            .and_then(|m| m.as_str().parse().ok())
    })
}

/// Birth year with the mid-century default for unknown dates
pub fn birth_year(info: &str) -> i32 {
    find_birth_year(info).unwrap_or(DEFAULT_BIRTH_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_shapes() {
        assert_eq!(birth_year("Jane (1950-2020)"), 1950);
        assert_eq!(birth_year("Jane (1950)"), 1950);
        assert_eq!(birth_year("Jane (01.01.1950-...)"), 1950);
        assert_eq!(birth_year("Jane (1931-...)"), 1931);
        assert_eq!(birth_year("Jane (12.03.1899-04.05.1970)"), 1899);
    }

    #[test]
    fn test_default_year() {
        assert_eq!(find_birth_year("Jane"), None);
        assert_eq!(birth_year("Jane"), DEFAULT_BIRTH_YEAR);
        assert_eq!(birth_year("Jane (dates unknown)"), DEFAULT_BIRTH_YEAR);
    }

    #[test]
    fn test_priority_order() {
        // A full range wins over a later single year
        assert_eq!(birth_year("Jane (1960) (1901-1980)"), 1901);
        // A single year wins over a day-month-year date
        assert_eq!(birth_year("Jane (03.04.1910) (1920)"), 1920);
    }
}

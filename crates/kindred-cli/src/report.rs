//! Plain-text report sections

use kindred_core::analytics::DataIssues;
use kindred_core::{AnalysisReport, GraphStatistics, ValidationIssue};

/// Entries listed per data-quality category before truncating
pub const MAX_LISTED: usize = 5;

/// Printed when no source file can be found
pub const MISSING_SOURCE_HELP: &str = "\
Create a source.txt file in the following format:

People:
1 - Ivanov Ivan Ivanovich (01.01.1980-...)
2 - Ivanova Maria Petrovna (02.02.1985-...)

Relations:
1 -- 2 (3,4)      marriage with children 3 and 4
1 -- 2            marriage without children
1 -- 2 (?)        marriage with unknown children
1 -- 2 (3,?,?)    marriage with known child 3 and two unknown children
1 -- ?            marriage with an unknown spouse
1 -- ? (5,6)      unknown spouse, children 5 and 6
1 -- ? (?)        unknown spouse, unknown children
1 => 5            single parent link

Lines starting with // are comments.";

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("\n{title}\n{}\n", "-".repeat(40)));
}

pub fn validation_section(issues: &[ValidationIssue]) -> String {
    let mut out = String::new();
    if issues.is_empty() {
        out.push_str("\nData passed validation\n");
        return out;
    }
    out.push_str("\nProblems found in the data:\n");
    for issue in issues {
        out.push_str(&format!("  - {issue}\n"));
    }
    out
}

pub fn data_issues_section(issues: &DataIssues) -> String {
    let mut out = String::new();
    heading(&mut out, "DATA QUALITY");
    for (category, found) in issues.categories() {
        if found.is_empty() {
            out.push_str(&format!("\n{category}: no problems found\n"));
            continue;
        }
        out.push_str(&format!("\n{category} ({}):\n", found.len()));
        for issue in found.iter().take(MAX_LISTED) {
            out.push_str(&format!("  - {issue}\n"));
        }
        if found.len() > MAX_LISTED {
            out.push_str(&format!("  ... and {} more\n", found.len() - MAX_LISTED));
        }
    }
    out
}

pub fn analysis_section(report: &AnalysisReport) -> String {
    let mut out = String::new();
    heading(&mut out, "EXTENDED ANALYSIS");

    out.push_str("\nLargest families:\n");
    for (i, family) in report.largest_families.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} and {} - {} children\n",
            i + 1,
            family.first_parent,
            family.second_parent,
            family.children
        ));
    }

    out.push_str("\nGenerations:\n");
    for generation in report.generations.iter().filter(|g| g.count > 0) {
        out.push_str(&format!("  {}: {}\n", generation.label, generation.count));
    }

    if !report.longest_lineage.is_empty() {
        out.push_str(&format!(
            "\nLongest lineage ({} generations):\n",
            report.longest_lineage.len()
        ));
        for (i, entry) in report.longest_lineage.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, entry.name));
        }
    }
    out
}

pub fn statistics_section(stats: &GraphStatistics) -> String {
    let mut out = String::new();
    heading(&mut out, "STATISTICS");
    let rows = [
        ("People", stats.people),
        ("Marriages with children", stats.marriages_with_children),
        ("Childless marriages", stats.childless_marriages),
        ("Marriages with unknown children", stats.unknown_children_marriages),
        ("Marriages with mixed children", stats.mixed_children_marriages),
        ("Total marriages", stats.total_marriages),
        ("Known children", stats.known_children),
        ("Unknown children", stats.unknown_children),
        ("Single parent links", stats.single_links),
        ("Married people", stats.married_people),
        ("Unmarried people", stats.unmarried_people),
    ];
    for (label, value) in rows {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::{analyze, parse_str, AnalysisOptions};

    #[test]
    fn test_validation_section() {
        let ok = analyze(&parse_str("1 - A B"), &AnalysisOptions::default());
        assert!(validation_section(&ok.validation).contains("passed validation"));

        let bad = analyze(&parse_str("1 - A B\n1 -- 2"), &AnalysisOptions::default());
        let text = validation_section(&bad.validation);
        assert!(text.contains("Problems found"));
        assert!(text.contains("Spouse 2 (childless marriage) not found among people"));
    }

    #[test]
    fn test_data_issues_truncated_after_five() {
        let source: String = (1..=8).map(|i| format!("{i} - Name{i}\n")).collect();
        let report = analyze(&parse_str(&source), &AnalysisOptions::default());
        let text = data_issues_section(&report.data_issues);

        assert!(text.contains("Incomplete names (8):"));
        assert!(text.contains("  - 5: Name5"));
        assert!(!text.contains("  - 6: Name6"));
        assert!(text.contains("  ... and 3 more"));
        assert!(text.contains("Possible typos: no problems found"));
    }

    #[test]
    fn test_analysis_section() {
        let graph = parse_str(
            "1 - Ivan Petrov (1920)\n2 - Maria Petrova (1922)\n3 - Oleg Petrov (1950)\n1 -- 2 (3, ?)",
        );
        let report = analyze(&graph, &AnalysisOptions::default());
        let text = analysis_section(&report);

        assert!(text.contains("  1. Ivan Petrov (1920) and Maria Petrova (1922) - 2 children"));
        assert!(text.contains("Longest lineage (2 generations):"));
        assert!(text.contains("  2. Oleg Petrov (1950)"));
        assert!(text.contains("Born up to 1920: 1"));
    }

    #[test]
    fn test_statistics_section() {
        let report = analyze(&parse_str("1 - A B\n2 - C D\n1 -- 2"), &AnalysisOptions::default());
        let text = statistics_section(&report.statistics);
        assert!(text.contains("People: 2"));
        assert!(text.contains("Childless marriages: 1"));
        assert!(text.contains("Unmarried people: 0"));
    }
}

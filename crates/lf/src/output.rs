//! Output formatting utilities for the lf CLI.
//!
//! Every command has a JSON form and a text form. Text output may be colored.

use std::collections::BTreeMap;

use labelfilter::{format_postfix, PositionedToken, Predicate};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::commands::LabelValue;

/// JSON output structure for the check command.
#[derive(Serialize)]
pub struct CheckOutput<'a> {
    pub expression: &'a str,
    pub labels: &'a [LabelValue],
    pub matched: bool,
}

/// Formats a check result as JSON.
pub fn format_check_json(
    expression: &str,
    labels: &[LabelValue],
    matched: bool,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CheckOutput {
        expression,
        labels,
        matched,
    })
}

/// Formats a check result as text.
pub fn format_check_text(matched: bool, use_colors: bool) -> String {
    match (matched, use_colors) {
        (true, true) => "true".green().to_string(),
        (false, true) => "false".red().to_string(),
        (matched, false) => matched.to_string(),
    }
}

/// A record read from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number.
    pub line: usize,
    /// The line as read, without its newline.
    pub text: String,
    /// Labels parsed from the line.
    pub labels: Vec<LabelValue>,
}

/// JSON output structure for a selected record.
#[derive(Serialize)]
pub struct RecordOutput<'a> {
    pub line: usize,
    pub labels: &'a [LabelValue],
}

/// JSON output structure for the select command.
#[derive(Serialize)]
pub struct SelectOutput<'a> {
    pub expression: &'a str,
    pub total: usize,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<Vec<RecordOutput<'a>>>,
}

/// Formats selected records as JSON.
///
/// With `count_only`, the record list is left out.
pub fn format_select_json(
    expression: &str,
    total: usize,
    selected: &[&Record],
    count_only: bool,
) -> Result<String, serde_json::Error> {
    let matched: Option<Vec<RecordOutput>> = (!count_only).then(|| {
        selected
            .iter()
            .map(|r| RecordOutput {
                line: r.line,
                labels: &r.labels,
            })
            .collect()
    });

    serde_json::to_string_pretty(&SelectOutput {
        expression,
        total,
        count: selected.len(),
        matched,
    })
}

/// Formats selected records as text, one line each.
pub fn format_select_text(selected: &[&Record]) -> String {
    let mut output = String::new();
    for record in selected {
        output.push_str(&record.text);
        output.push('\n');
    }
    output
}

/// JSON output structure for the explain command.
#[derive(Serialize)]
pub struct ExplainOutput<'a> {
    pub expression: &'a str,
    pub tokens: Vec<String>,
    pub postfix: String,
    pub tree: String,
    pub labels: Vec<LabelValue>,
    pub nodes: usize,
    pub depth: usize,
}

/// Formats an explanation as JSON.
pub fn format_explain_json(
    tokens: &[PositionedToken],
    postfix: &[PositionedToken],
    expression: &str,
    predicate: &Predicate<LabelValue>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ExplainOutput {
        expression,
        tokens: tokens.iter().map(|pt| pt.token.to_string()).collect(),
        postfix: format_postfix(postfix),
        tree: predicate.to_string(),
        labels: predicate.labels().into_iter().copied().collect(),
        nodes: predicate.node_count(),
        depth: predicate.depth(),
    })
}

/// Formats an explanation as text.
pub fn format_explain_text(
    tokens: &[PositionedToken],
    postfix: &[PositionedToken],
    expression: &str,
    predicate: &Predicate<LabelValue>,
    use_colors: bool,
) -> String {
    let token_list = tokens
        .iter()
        .map(|pt| format!("{}@{}", pt.token, pt.position))
        .collect::<Vec<_>>()
        .join(" ");

    let rows = [
        ("Expression", expression.to_string()),
        ("Tokens", token_list),
        ("Postfix", format_postfix(postfix)),
        ("Tree", predicate.to_string()),
        (
            "Size",
            format!("{} nodes, depth {}", predicate.node_count(), predicate.depth()),
        ),
    ];

    let mut output = String::new();
    for (name, value) in rows {
        let name = format!("{:<11}", format!("{name}:"));
        if use_colors {
            output.push_str(&format!("{} {}\n", name.dimmed(), value));
        } else {
            output.push_str(&format!("{} {}\n", name, value));
        }
    }
    output
}

/// JSON output structure for a saved filter.
#[derive(Serialize)]
pub struct SavedFilterOutput<'a> {
    pub name: &'a str,
    pub expression: &'a str,
}

/// Formats saved filters as JSON.
pub fn format_filters_json(filters: &BTreeMap<String, String>) -> Result<String, serde_json::Error> {
    let list: Vec<SavedFilterOutput> = filters
        .iter()
        .map(|(name, expression)| SavedFilterOutput { name, expression })
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({ "filters": list }))
}

/// Formats saved filters as a table.
pub fn format_filters_table(filters: &BTreeMap<String, String>, use_colors: bool) -> String {
    if filters.is_empty() {
        return "No saved filters.\n".to_string();
    }

    let width = filters.keys().map(|n| n.len() + 1).max().unwrap_or(0).max(5);
    let mut output = String::new();

    let header = format!("{:<width$} {}", "Name", "Expression");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (name, expression) in filters {
        let name = format!("@{name}");
        let name = format!("{name:<width$}");
        if use_colors {
            output.push_str(&format!("{} {}\n", name.cyan(), expression));
        } else {
            output.push_str(&format!("{} {}\n", name, expression));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use labelfilter::{build_tree, to_postfix, tokenize};

    fn record(line: usize, text: &str, labels: Vec<LabelValue>) -> Record {
        Record {
            line,
            text: text.to_string(),
            labels,
        }
    }

    #[test]
    fn test_check_text() {
        assert_eq!(format_check_text(true, false), "true");
        assert_eq!(format_check_text(false, false), "false");
        assert!(format_check_text(true, true).contains("true"));
    }

    #[test]
    fn test_check_json() {
        let json = format_check_json("1 & 2", &[1, 2], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matched"], true);
        assert_eq!(value["labels"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_select_text() {
        let a = record(1, "1 2", vec![1, 2]);
        let b = record(3, "2,4", vec![2, 4]);
        assert_eq!(format_select_text(&[&a, &b]), "1 2\n2,4\n");
        assert_eq!(format_select_text(&[]), "");
    }

    #[test]
    fn test_select_json() {
        let a = record(2, "5", vec![5]);
        let json = format_select_json("5", 4, &[&a], false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 4);
        assert_eq!(value["count"], 1);
        assert_eq!(value["matched"][0]["line"], 2);

        let json = format_select_json("5", 4, &[&a], true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("matched").is_none());
    }

    #[test]
    fn test_explain_text() {
        let tokens = tokenize("1|2&3").unwrap();
        let postfix = to_postfix(tokens.clone()).unwrap();
        let predicate = build_tree(postfix.clone()).unwrap();
        let text = format_explain_text(&tokens, &postfix, "1|2&3", &predicate, false);
        assert!(text.contains("Postfix:    1 2 3 & |"));
        assert!(text.contains("Tree:       (1 | (2 & 3))"));
        assert!(text.contains("Tokens:     1@0 |@1 2@2 &@3 3@4"));
    }

    #[test]
    fn test_filters_table() {
        let mut filters = BTreeMap::new();
        assert_eq!(format_filters_table(&filters, false), "No saved filters.\n");

        filters.insert("work".to_string(), "1 & 2".to_string());
        let table = format_filters_table(&filters, false);
        assert!(table.starts_with("Name"));
        assert!(table.contains("@work 1 & 2"));
    }
}

//! Command implementations for the lf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod explain;
pub mod filters;
pub mod select;

use std::env;

use labelfilter::LabelFilter;
use strsim::levenshtein;

use crate::cli::Cli;
use config::Config;

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Label type used by every command.
pub type LabelValue = i64;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Filter compilation error.
    #[error("filter error: {0}")]
    Filter(#[from] labelfilter::FilterError),

    /// A saved filter name that is not in the config.
    #[error("{}", format_unknown_filter(.name, .suggestion.as_deref()))]
    UnknownFilter {
        /// The requested name.
        name: String,
        /// A close match among the saved names.
        suggestion: Option<String>,
    },

    /// A record that could not be read as a label set.
    #[error("invalid record on line {line}: {message}")]
    Input {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// A command argument that cannot be used, such as a bad filter name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Formats the "not found" message for saved filters, optionally including a suggestion.
fn format_unknown_filter(name: &str, suggestion: Option<&str>) -> String {
    let base = format!(
        "saved filter '{}' not found. Run 'lf filters list' to see saved filters.",
        name
    );
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Loaded configuration.
    pub config: Config,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are off when `--no-color` is given, `NO_COLOR` is set, or the
    /// config disables them.
    pub fn new(cli: &Cli, config: Config) -> Self {
        let use_colors = !cli.no_color
            && env::var_os("NO_COLOR").is_none()
            && config.output.color.unwrap_or(true);
        Self {
            json_output: cli.json,
            use_colors,
            quiet: cli.quiet,
            config,
        }
    }

    /// Resolves `@name` to the saved expression; any other input is returned as is.
    pub fn resolve_expression<'a>(&'a self, input: &'a str) -> Result<&'a str> {
        let Some(name) = input.trim().strip_prefix('@') else {
            return Ok(input);
        };

        match self.config.filters.get(name) {
            Some(expression) => {
                log::debug!("using saved filter '{}': {}", name, expression);
                Ok(expression)
            }
            None => Err(CommandError::UnknownFilter {
                name: name.to_string(),
                suggestion: find_similar_name(name, self.config.filters.keys().map(String::as_str)),
            }),
        }
    }

    /// Resolves and compiles an expression argument.
    pub fn compile(&self, input: &str) -> Result<LabelFilter<LabelValue>> {
        let expression = self.resolve_expression(input)?;
        Ok(LabelFilter::new(expression)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with_filters(filters: &[(&str, &str)]) -> CommandContext {
        let mut config = Config::default();
        for (name, expr) in filters {
            config.filters.insert(name.to_string(), expr.to_string());
        }
        CommandContext {
            json_output: false,
            use_colors: false,
            quiet: false,
            config,
        }
    }

    #[test]
    fn test_resolve_plain_expression() {
        let ctx = context_with_filters(&[]);
        assert_eq!(ctx.resolve_expression("1 & 2").unwrap(), "1 & 2");
    }

    #[test]
    fn test_resolve_saved_filter() {
        let ctx = context_with_filters(&[("work", "1 & !2")]);
        assert_eq!(ctx.resolve_expression("@work").unwrap(), "1 & !2");
        assert_eq!(ctx.resolve_expression(" @work ").unwrap(), "1 & !2");
    }

    #[test]
    fn test_resolve_unknown_with_suggestion() {
        let ctx = context_with_filters(&[("work", "1")]);
        let err = ctx.resolve_expression("@wrok").unwrap_err();
        assert!(matches!(
            err,
            CommandError::UnknownFilter { ref suggestion, .. } if suggestion.as_deref() == Some("work")
        ));
        assert!(err.to_string().contains("Did you mean 'work'?"));
    }

    #[test]
    fn test_resolve_unknown_without_suggestion() {
        let ctx = context_with_filters(&[("work", "1")]);
        let err = ctx.resolve_expression("@completely-different").unwrap_err();
        assert!(!err.to_string().contains("Did you mean"));
    }

    #[test]
    fn test_compile_reports_filter_errors() {
        let ctx = context_with_filters(&[("broken", "1 2")]);
        assert!(matches!(
            ctx.compile("@broken"),
            Err(CommandError::Filter(labelfilter::FilterError::TrailingOperand { .. }))
        ));
    }

    #[test]
    fn test_find_similar_name() {
        let names = ["alerts", "billing", "work"];
        assert_eq!(
            find_similar_name("aletrs", names.iter().copied()),
            Some("alerts".to_string())
        );
        assert_eq!(find_similar_name("work", names.iter().copied()), None);
        assert_eq!(find_similar_name("zzzzzzzz", names.iter().copied()), None);
    }
}

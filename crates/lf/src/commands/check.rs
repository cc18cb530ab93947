//! Check command implementation.
//!
//! Compiles an expression and tests a single label set against it.

use super::{CommandContext, LabelValue, Result};
use crate::output::{format_check_json, format_check_text};

/// Options for the check command.
#[derive(Debug)]
pub struct CheckOptions {
    /// Expression or @name.
    pub expression: String,
    /// Labels attached to the item.
    pub labels: Vec<LabelValue>,
}

/// Executes the check command and returns whether the labels matched.
pub fn execute(ctx: &CommandContext, opts: &CheckOptions) -> Result<bool> {
    let filter = ctx.compile(&opts.expression)?;
    let matched = filter.check(&opts.labels);
    log::debug!("{:?} against {:?}: {}", filter.expression(), opts.labels, matched);

    if ctx.json_output {
        println!(
            "{}",
            format_check_json(filter.expression(), &opts.labels, matched)?
        );
    } else if !ctx.quiet {
        println!("{}", format_check_text(matched, ctx.use_colors));
    }

    Ok(matched)
}

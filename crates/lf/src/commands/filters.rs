//! Saved filter commands.
//!
//! Saved filters live in the `[filters]` table of the config file and can be
//! used by any command as `@name`.

use labelfilter::LabelFilter;

use super::config::save_config;
use super::{explain, find_similar_name, CommandContext, CommandError, LabelValue, Result};
use crate::output::{format_filters_json, format_filters_table};

/// Options for `filters add`.
#[derive(Debug)]
pub struct FilterAddOptions {
    pub name: String,
    pub expression: String,
    pub force: bool,
}

/// Checks that a name can be used after `@`.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(CommandError::InvalidArgument(format!(
            "Invalid filter name '{}': use letters, digits, '_' or '-'",
            name
        )))
    }
}

/// Builds the error for a name that is not saved.
fn unknown(ctx: &CommandContext, name: &str) -> CommandError {
    CommandError::UnknownFilter {
        name: name.to_string(),
        suggestion: find_similar_name(name, ctx.config.filters.keys().map(String::as_str)),
    }
}

/// Executes `filters list`.
pub fn execute_list(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_filters_json(&ctx.config.filters)?);
    } else {
        print!(
            "{}",
            format_filters_table(&ctx.config.filters, ctx.use_colors)
        );
    }
    Ok(())
}

/// Executes `filters show`.
pub fn execute_show(ctx: &CommandContext, name: &str) -> Result<()> {
    if !ctx.config.filters.contains_key(name) {
        return Err(unknown(ctx, name));
    }
    explain::execute(ctx, &format!("@{name}"))
}

/// Adds a filter to the config without saving it.
fn add_filter(ctx: &mut CommandContext, opts: &FilterAddOptions) -> Result<()> {
    validate_name(&opts.name)?;

    if ctx.config.filters.contains_key(&opts.name) && !opts.force {
        return Err(CommandError::InvalidArgument(format!(
            "Filter '{}' already exists. Use --force to replace it.",
            opts.name
        )));
    }

    LabelFilter::<LabelValue>::new(&opts.expression)?;
    ctx.config
        .filters
        .insert(opts.name.clone(), opts.expression.trim().to_string());
    Ok(())
}

/// Executes `filters add`.
pub fn execute_add(ctx: &mut CommandContext, opts: &FilterAddOptions) -> Result<()> {
    add_filter(ctx, opts)?;
    save_config(&ctx.config)?;

    if ctx.json_output {
        println!(
            "{}",
            serde_json::json!({ "status": "saved", "name": opts.name, "expression": opts.expression.trim() })
        );
    } else if !ctx.quiet {
        println!("Saved @{}", opts.name);
    }
    Ok(())
}

/// Executes `filters remove`.
pub fn execute_remove(ctx: &mut CommandContext, name: &str) -> Result<()> {
    if ctx.config.filters.remove(name).is_none() {
        return Err(unknown(ctx, name));
    }
    save_config(&ctx.config)?;

    if ctx.json_output {
        println!("{}", serde_json::json!({ "status": "removed", "name": name }));
    } else if !ctx.quiet {
        println!("Removed @{}", name);
    }
    Ok(())
}

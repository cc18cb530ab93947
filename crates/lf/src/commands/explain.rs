//! Explain command implementation.
//!
//! Shows each compilation stage for an expression.

use labelfilter::{build_tree, to_postfix, tokenize, PositionedToken, Predicate};

use super::{CommandContext, LabelValue, Result};
use crate::output::{format_explain_json, format_explain_text};

/// Output of every compilation stage.
struct Stages {
    tokens: Vec<PositionedToken>,
    postfix: Vec<PositionedToken>,
    predicate: Predicate<LabelValue>,
}

/// Runs the pipeline once, keeping the intermediate results.
fn compile_stages(expression: &str) -> Result<Stages> {
    let tokens = tokenize(expression)?;
    let postfix = to_postfix(tokens.clone())?;
    let predicate: Predicate<LabelValue> = build_tree(postfix.clone())?;
    Ok(Stages {
        tokens,
        postfix,
        predicate,
    })
}

/// Executes the explain command.
pub fn execute(ctx: &CommandContext, expression: &str) -> Result<()> {
    let expression = ctx.resolve_expression(expression)?;
    let stages = compile_stages(expression)?;

    if ctx.json_output {
        println!(
            "{}",
            format_explain_json(&stages.tokens, &stages.postfix, expression, &stages.predicate)?
        );
    } else {
        print!(
            "{}",
            format_explain_text(
                &stages.tokens,
                &stages.postfix,
                expression,
                &stages.predicate,
                ctx.use_colors
            )
        );
    }
    Ok(())
}

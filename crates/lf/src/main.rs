use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands, FiltersCommands};
use commands::config::{load_config, Config, ConfigSetOptions};
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                let mut error = serde_json::json!({
                    "code": error_code(&e),
                    "message": e.to_string(),
                });
                if let Some(position) = error_position(&e) {
                    error["position"] = serde_json::json!(position);
                }
                let error_json = serde_json::json!({ "error": error });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(text) => eprintln!("{text}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Installs the logger. `RUST_LOG` takes precedence over `--verbose`/`--quiet`.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> commands::Result<ExitCode> {
    // `config path` and `config init` must work even when the config file is broken.
    let config = match &cli.command {
        Some(Commands::Config {
            command: Some(ConfigCommands::Path | ConfigCommands::Init { .. }),
        }) => load_config().unwrap_or_else(|e| {
            log::warn!("{e}; using defaults");
            Config::default()
        }),
        _ => load_config()?,
    };
    let mut ctx = CommandContext::new(cli, config);

    match &cli.command {
        Some(Commands::Check {
            expression,
            labels,
            no_exit_code,
        }) => {
            let opts = commands::check::CheckOptions {
                expression: expression.clone(),
                labels: labels.clone(),
            };
            let matched = commands::check::execute(&ctx, &opts)?;
            Ok(match_exit_code(matched || *no_exit_code))
        }
        Some(Commands::Select {
            expression,
            input,
            invert,
            count,
        }) => {
            let opts = commands::select::SelectOptions {
                expression: expression.clone(),
                input: input.clone(),
                invert: *invert,
                count: *count,
            };
            commands::select::execute(&ctx, &opts)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Explain { expression }) => {
            commands::explain::execute(&ctx, expression)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Filters { command }) => {
            dispatch_filters(&mut ctx, command)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { command }) => {
            dispatch_config(&mut ctx, command)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell, &mut std::io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            if !ctx.quiet {
                println!("lf - label filter");
                println!("Use --help for usage information");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Dispatch saved filter subcommands.
fn dispatch_filters(
    ctx: &mut CommandContext,
    command: &Option<FiltersCommands>,
) -> commands::Result<()> {
    match command {
        Some(FiltersCommands::List) | None => commands::filters::execute_list(ctx),
        Some(FiltersCommands::Show { name }) => commands::filters::execute_show(ctx, name),
        Some(FiltersCommands::Add {
            name,
            expression,
            force,
        }) => {
            let opts = commands::filters::FilterAddOptions {
                name: name.clone(),
                expression: expression.clone(),
                force: *force,
            };
            commands::filters::execute_add(ctx, &opts)
        }
        Some(FiltersCommands::Remove { name }) => commands::filters::execute_remove(ctx, name),
    }
}

/// Dispatch config subcommands.
fn dispatch_config(
    ctx: &mut CommandContext,
    command: &Option<ConfigCommands>,
) -> commands::Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}

/// Exit status for a check: 0 on match, 1 otherwise.
fn match_exit_code(matched: bool) -> ExitCode {
    if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::UnknownFilter { .. } => "UNKNOWN_FILTER",
        CommandError::Input { .. } => "INPUT_ERROR",
        CommandError::InvalidArgument(_) => "INVALID_ARGUMENT",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Byte offset into the expression that a filter error points at.
fn error_position(e: &CommandError) -> Option<usize> {
    match e {
        CommandError::Filter(err) => err.position(),
        _ => None,
    }
}

/// Returns the exit code for an error.
///
/// Status 1 is reserved for "no match" from `check`.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Filter(_) | CommandError::UnknownFilter { .. } => ExitCode::from(2),
        CommandError::Input { .. } | CommandError::InvalidArgument(_) => ExitCode::from(2),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Json(_) => ExitCode::from(4),
        CommandError::Config(_) => ExitCode::from(5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn same(a: ExitCode, b: ExitCode) -> bool {
        format!("{a:?}") == format!("{b:?}")
    }

    #[test]
    fn test_error_codes() {
        let filter_err = CommandError::Filter(labelfilter::FilterError::EmptyExpression);
        assert_eq!(error_code(&filter_err), "FILTER_ERROR");
        assert!(same(error_exit_code(&filter_err), ExitCode::from(2)));

        let config_err = CommandError::Config("bad".to_string());
        assert_eq!(error_code(&config_err), "CONFIG_ERROR");
        assert!(same(error_exit_code(&config_err), ExitCode::from(5)));

        let name_err = CommandError::InvalidArgument("bad name".to_string());
        assert_eq!(error_code(&name_err), "INVALID_ARGUMENT");
        assert!(same(error_exit_code(&name_err), ExitCode::from(2)));
    }

    #[test]
    fn test_error_position() {
        let err = CommandError::Filter(labelfilter::FilterError::malformed_token('$', 2));
        assert_eq!(error_position(&err), Some(2));
        let err = CommandError::Filter(labelfilter::FilterError::EmptyExpression);
        assert_eq!(error_position(&err), None);
        assert_eq!(error_position(&CommandError::Config("x".into())), None);
    }

    #[test]
    fn test_match_exit_code() {
        assert!(same(match_exit_code(true), ExitCode::SUCCESS));
        assert!(same(match_exit_code(false), ExitCode::from(1)));
    }
}

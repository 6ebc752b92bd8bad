//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the load/derive pipeline
//! - prints tables or launches the TUI

use clap::Parser;

use crate::cli::{CategoryArgs, Command, IngredientArgs, ViewArgs};
use crate::domain::ViewConfig;
use crate::error::AppError;
use crate::ingredients;

pub mod pipeline;

/// Entry point for the `skincare` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `skincare` (and `skincare --csv data.csv`) to behave
    // like `skincare tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Overview(args) => handle_overview(args),
        Command::Category(args) => handle_category(args),
        Command::Ingredients(args) => handle_ingredients(args),
        Command::Charts(args) => handle_charts(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

pub fn view_config_from_args(args: &ViewArgs) -> ViewConfig {
    ViewConfig {
        csv_path: args.csv.clone(),
        top_n: args.top,
        histogram_bins: args.bins,
    }
}

fn handle_overview(args: ViewArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args);
    let view = pipeline::run_view(&config)?;

    println!(
        "{}",
        crate::report::format_overview(&view.dataset, &view.derived, &view.stats, config.top_n)
    );
    Ok(())
}

fn handle_category(args: CategoryArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args.view);
    let view = pipeline::run_view(&config)?;

    let summary = ingredients::analyze_category(&view.dataset, &args.category);
    println!(
        "{}",
        crate::report::format_category_summary(&summary, config.top_n)
    );
    Ok(())
}

fn handle_ingredients(args: IngredientArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args.view);
    let view = pipeline::run_view(&config)?;

    let tokens = ingredients::flatten(&view.dataset.records, args.category.as_deref());
    let freq = ingredients::frequency(&tokens);

    match freq.most_common() {
        Some((token, count)) => {
            println!("Most common ingredient: {token} ({count})");
        }
        None => println!("No ingredients found."),
    }
    println!(
        "Distinct ingredient lists: {}\n",
        ingredients::distinct_count(&view.dataset.records, args.category.as_deref())
    );
    println!(
        "{}",
        crate::report::format_frequency_table(&freq, config.top_n)
    );
    Ok(())
}

fn handle_charts(args: ViewArgs) -> Result<(), AppError> {
    let config = view_config_from_args(&args);
    let view = pipeline::run_view(&config)?;

    println!(
        "{}",
        crate::report::format_charts(&view.dataset, &view.derived, &config)
    );
    Ok(())
}

/// Rewrite argv so `skincare` defaults to `skincare tui`.
///
/// Rules:
/// - `skincare`                     -> `skincare tui`
/// - `skincare --csv data.csv ...`  -> `skincare tui --csv data.csv ...`
/// - `skincare --help/--version`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "overview" | "category" | "ingredients" | "charts" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

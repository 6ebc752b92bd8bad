//! Command-line parsing for the skincare product dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the data-transformation code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "skincare", version, about = "Skincare product listing explorer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the dataset overview (summary stats + derived columns).
    Overview(ViewArgs),
    /// Analyze one product category: count, distinct ingredient lists, top ingredients.
    Category(CategoryArgs),
    /// Print ingredient frequency counts, dataset-wide or per category.
    Ingredients(IngredientArgs),
    /// Print the chart source data (price stats, counts, histogram, flag totals).
    Charts(ViewArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same load/derive pipeline as the printing subcommands, but
    /// renders tables and charts in a terminal UI using Ratatui.
    Tui(ViewArgs),
}

/// Common options shared by every view.
#[derive(Debug, Args, Clone)]
pub struct ViewArgs {
    /// Path to the product listing CSV.
    #[arg(long, default_value = "skincare_products.csv")]
    pub csv: PathBuf,

    /// Entry limit where a view truncates (table rows, frequency entries).
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Bucket count for the package-size histogram.
    #[arg(long, default_value_t = 10)]
    pub bins: usize,
}

/// Options for the per-category analysis.
#[derive(Debug, Args)]
pub struct CategoryArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Product category to analyze (exact, case-sensitive), e.g. "Serum".
    pub category: String,
}

/// Options for the ingredient frequency view.
#[derive(Debug, Args)]
pub struct IngredientArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Restrict to one product category (exact, case-sensitive).
    #[arg(long)]
    pub category: Option<String>,
}

use clap::{Parser, Subcommand, ValueEnum};
use gamefuzz_engine::Defuzzification;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Defuzzification method selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DefuzzMethod {
    /// Discrete center of gravity over the sample points.
    Centroid,
    /// Center of gravity of the piecewise-linear output shape.
    Trapezoid,
}

impl From<DefuzzMethod> for Defuzzification {
    fn from(method: DefuzzMethod) -> Self {
        match method {
            DefuzzMethod::Centroid => Defuzzification::Centroid,
            DefuzzMethod::Trapezoid => Defuzzification::Trapezoid,
        }
    }
}

/// Command-line interface for the `gamefuzz` application.
#[derive(Debug, Parser)]
#[command(
    name = "gamefuzz",
    version,
    about = "Fuzzy game recommendations from quality, popularity and price"
)]
pub struct Cli {
    /// Sample count of the [0, 100] universe (overrides `[engine] resolution`).
    #[arg(long, global = true, env = "GAMEFUZZ_RESOLUTION", value_name = "N")]
    pub resolution: Option<usize>,
    /// Defuzzification method (overrides `[engine] defuzzification`).
    #[arg(long, global = true, env = "GAMEFUZZ_DEFUZZ", value_enum)]
    pub defuzz: Option<DefuzzMethod>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `gamefuzz` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Computes fuzzy input scores for a raw catalog export.
    Prepare {
        /// Raw catalog JSON (`{appid: details}`).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Where to write the prepared catalog.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Ranks a prepared catalog.
    Recommend {
        /// Prepared catalog JSON.
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,
        /// Raw catalog to prepare first when `--catalog` does not exist yet.
        #[arg(long, value_name = "FILE")]
        raw: Option<PathBuf>,
        /// Genre to include (repeatable, or comma-separated).
        #[arg(long = "genre", value_name = "GENRE")]
        genres: Vec<String>,
        /// Maximum price in Rupiah.
        #[arg(long, value_name = "IDR", conflicts_with = "budget_usd")]
        budget_idr: Option<f64>,
        /// Maximum price in US dollars.
        #[arg(long, value_name = "USD")]
        budget_usd: Option<f64>,
        /// Earliest release year, inclusive.
        #[arg(long, value_name = "YEAR")]
        from_year: Option<i32>,
        /// Latest release year, inclusive.
        #[arg(long, value_name = "YEAR")]
        to_year: Option<i32>,
        /// Number of games to show (overrides `[recommend] limit`).
        #[arg(long, env = "GAMEFUZZ_LIMIT", value_name = "N")]
        limit: Option<usize>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scores one set of crisp inputs.
    Score {
        /// Quality score in [0, 100].
        #[arg(long)]
        quality: f64,
        /// Popularity score in [0, 100].
        #[arg(long)]
        popularity: f64,
        /// Inverted price score in [0, 100]; 100 is free.
        #[arg(long)]
        price: f64,
        /// Shows fuzzified degrees, rule firing strengths and the centroid.
        #[arg(long, default_value_t = false)]
        explain: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Prints the active membership sets and rule table.
    Rules {
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

mod aggregate;
mod recommend;
mod stats;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "milletrec-cli")]
#[command(about = "Millet recommendation command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate the review dataset into a per-entity summary table.
    Aggregate {
        /// Review dataset path; defaults to MILLETREC_REVIEWS_PATH.
        #[arg(long)]
        reviews: Option<PathBuf>,
        /// Output summary table path.
        #[arg(long, default_value = "./data/millet_summary.jsonl")]
        out: PathBuf,
    },
    /// Score the catalog against health concerns and print the top picks.
    Recommend {
        /// Health concern, repeatable.
        #[arg(long = "concern", required = true)]
        concerns: Vec<String>,
        /// Primary health goal for the bonus rule table.
        #[arg(long)]
        goal: Option<String>,
        /// Texture preference: mentioned, not_mentioned, or any.
        #[arg(long, default_value = "any")]
        texture: String,
        /// Number of recommendations to return.
        #[arg(long, default_value_t = 3)]
        top_k: usize,
        /// Review dataset path; defaults to MILLETREC_REVIEWS_PATH.
        #[arg(long)]
        reviews: Option<PathBuf>,
        /// Skip appending this run to the recommendation log.
        #[arg(long)]
        no_log: bool,
    },
    /// Print a markdown report of per-entity review statistics.
    Stats {
        /// Restrict the report to one entity slug.
        entity: Option<String>,
        /// Review dataset path; defaults to MILLETREC_REVIEWS_PATH.
        #[arg(long)]
        reviews: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Aggregate { reviews, out } => aggregate::run(reviews.as_deref(), &out),
        Commands::Recommend {
            concerns,
            goal,
            texture,
            top_k,
            reviews,
            no_log,
        } => recommend::run(&concerns, goal, &texture, top_k, reviews.as_deref(), no_log),
        Commands::Stats { entity, reviews } => stats::run(entity.as_deref(), reviews.as_deref()),
    }
}

use clap::{Parser, Subcommand};
use heapdex::analyzers::RankConfig;
use std::{error::Error, path::PathBuf};

mod cli;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank the documents in a directory against a query
    Search {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[arg(value_name = "QUERY", required = true)]
        query: Vec<String>,

        /// Maximum number of results
        #[arg(short, default_value_t = 10)]
        k: usize,

        /// Probability of following a link when computing page ranks
        #[arg(long, default_value_t = RankConfig::default().decay)]
        decay: f64,

        /// Page rank convergence threshold
        #[arg(long, default_value_t = RankConfig::default().epsilon)]
        epsilon: f64,

        /// Maximum number of page rank passes
        #[arg(long, default_value_t = RankConfig::default().limit)]
        limit: usize,

        #[arg(long, default_value_t = false)]
        no_progress_bar: bool,
    },
    /// Print the K largest integers of a file (or stdin) in ascending order
    TopK {
        #[arg(value_name = "K")]
        k: usize,

        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
    /// Write distinct random integers, one per line
    Generate {
        #[arg(value_name = "COUNT")]
        count: usize,

        /// Values are drawn from 0..MAX
        #[arg(long, default_value_t = 1_000_000)]
        max: u64,

        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    cli::init_logging();

    match args.command {
        Command::Search {
            dir,
            query,
            k,
            decay,
            epsilon,
            limit,
            no_progress_bar,
        } => {
            let config = RankConfig {
                decay,
                epsilon,
                limit,
            };
            cli::search::search(dir, &query, k, &config, no_progress_bar)
        }
        Command::TopK { k, path } => cli::top_k::top_k(k, path),
        Command::Generate { count, max, seed } => cli::generate::generate(count, max, seed),
    }
}

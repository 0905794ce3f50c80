//! Infinite TicTacToe: connect-N on an unbounded board.
//!
//! ## Usage
//!
//! - `infinite-ttt` - Play against the computer
//! - `infinite-ttt pvp` - Two players on one terminal
//! - `infinite-ttt demo` - Watch the computer play itself
//! - `infinite-ttt bench` - Compare search depths, write a CSV report
//! - `infinite-ttt protocol` - Serve the text protocol on stdin/stdout
//!
//! Set `RUST_LOG=debug` to see per-candidate search scores.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::builder::TypedValueParser;
use clap::{Args, Parser, Subcommand};

use infinite_ttt::board::Mark;
use infinite_ttt::constants::{DEFAULT_DEPTH, DEMO_DEPTH, NODE_CANDIDATES, ROOT_CANDIDATES, WIN_LENGTH};
use infinite_ttt::modes::{self, DemoOptions, Pace};
use infinite_ttt::protocol::TextEngine;
use infinite_ttt::search::SearchConfig;

/// Infinite TicTacToe: connect-N on an unbounded board
#[derive(Parser)]
#[command(name = "infinite-ttt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    rules: RuleArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy)]
struct RuleArgs {
    /// Marks in a row needed to win
    #[arg(long, global = true, default_value_t = WIN_LENGTH, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    win_length: usize,
    /// Candidates tried at the root of a search
    #[arg(long, global = true, default_value_t = ROOT_CANDIDATES, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    root_candidates: usize,
    /// Candidates tried at inner search nodes
    #[arg(long, global = true, default_value_t = NODE_CANDIDATES, value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    node_candidates: usize,
}

impl From<RuleArgs> for SearchConfig {
    fn from(args: RuleArgs) -> Self {
        SearchConfig {
            win_length: args.win_length,
            root_candidates: args.root_candidates,
            node_candidates: args.node_candidates,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play {
        /// Your mark; X moves first
        #[arg(long, default_value = "x", value_parser = parse_mark)]
        side: Mark,
        /// Search depth of the computer
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
    },
    /// Two humans on one terminal
    Pvp,
    /// Watch the computer play against itself
    Demo {
        #[arg(long, default_value_t = DEMO_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Opening moves chosen at random
        #[arg(long, default_value_t = 2)]
        random_openings: usize,
        #[arg(long, default_value_t = 40)]
        max_moves: usize,
        #[arg(long, value_enum, default_value_t = Pace::Fast)]
        pace: Pace,
        /// Seed for the random openings
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Time the search at increasing depths
    Bench {
        #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
        max_depth: u32,
        /// CSV report path
        #[arg(long, default_value = "comparison.csv")]
        output: PathBuf,
    },
    /// Serve the text protocol on stdin/stdout
    Protocol {
        /// Depth used by `genmove` when none is given
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
    },
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    s.parse::<Mark>().map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = SearchConfig::from(cli.rules);

    let command = cli.command.unwrap_or(Commands::Play {
        side: Mark::X,
        depth: DEFAULT_DEPTH,
    });
    let mut output = io::stdout();

    match command {
        Commands::Play { side, depth } => {
            modes::human_vs_ai(&mut io::stdin().lock(), &mut output, config, side, depth)?;
        }
        Commands::Pvp => {
            modes::human_vs_human(&mut io::stdin().lock(), &mut output, config)?;
        }
        Commands::Demo {
            depth,
            random_openings,
            max_moves,
            pace,
            seed,
        } => {
            let options = DemoOptions {
                depth,
                random_openings,
                max_moves,
                pace,
                seed,
            };
            modes::demo(&mut io::stdin().lock(), &mut output, config, options)?;
        }
        Commands::Bench { max_depth, output: path } => {
            println!("=== Search depth comparison ===\n");
            let rows = modes::benchmark(config, max_depth)?;
            modes::print_benchmark(&mut output, &rows)?;

            let file = File::create(&path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            modes::write_csv(&mut BufWriter::new(file), &rows)?;
            println!("Results saved to {}", path.display());
        }
        Commands::Protocol { depth } => {
            TextEngine::with_settings(config, depth).run()?;
        }
    }
    Ok(())
}

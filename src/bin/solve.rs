use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use matefinder::{
    san,
    search::{Limits, Outcome, Solver, Strategy},
    Puzzle,
};

/// Solve a forced-mate chess puzzle.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Puzzle file: placement, side to move and move budget, one per line.
    puzzle: PathBuf,

    /// Search strategy: minimax, alphabeta, dfs, bfs or greedy.
    #[arg(short, long, default_value = "alphabeta")]
    strategy: Strategy,

    /// Abort after visiting this many nodes.
    #[arg(long)]
    max_nodes: Option<u64>,

    /// Seed for the greedy strategy's tie-breaking.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.puzzle)
        .with_context(|| format!("reading {}", args.puzzle.display()))?;
    let mut puzzle: Puzzle = text
        .parse()
        .with_context(|| format!("parsing {}", args.puzzle.display()))?;
    let turn = puzzle.turn;
    let budget = puzzle.budget;
    info!("{turn} to mate in {budget}, strategy {}", args.strategy);

    let mut solver = Solver::new(&mut puzzle.board, turn, budget).with_limits(Limits {
        max_nodes: args.max_nodes,
    });
    if let Some(seed) = args.seed {
        solver = solver.with_seed(seed);
    }

    let outcome = solver.solve(args.strategy).context("search aborted")?;
    let telemetry = solver.telemetry();

    match outcome {
        Outcome::Mate(line) => println!("{}", san::line(&line)),
        Outcome::Stalemate => println!("stalemate"),
        Outcome::NoSolution => println!("no solution within {budget} move(s)"),
    }
    println!(
        "nodes: {}  time: {:.4}s",
        telemetry.nodes,
        telemetry.elapsed.as_secs_f64()
    );

    Ok(())
}

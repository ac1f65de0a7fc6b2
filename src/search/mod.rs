//! Game-tree search for forced mates.
//!
//! Four interchangeable strategies explore the same contract: starting
//! from the solver's side, a branch is a solution iff after exactly
//! `2 * N - 1` plies (N full-move pairs, starting and ending on the
//! solver's side) the side then to move has no legal moves and its king
//! is in check. No legal moves without check is stalemate and never a
//! solution; a side running out of moves before the final ply fails the
//! branch without being an error.
//!
//! All search state is request-scoped: one [`Solver`] per invocation owns
//! the counters, limits and oracle binding, so repeated or interleaved
//! solves never alias each other. Every strategy leaves the board exactly
//! as it found it, on success, failure and limit-abort paths alike.

pub mod bfs;
pub mod dfs;
pub mod greedy;
pub mod minimax;

use std::{
    error::Error,
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use log::debug;

use crate::{
    attacks,
    board::Board,
    color::Color,
    m::MoveList,
    movegen::{self, GameEnd},
    oracle::{self, LegalityOracle, OracleError},
    san::San,
};

/// Leaf score for a mate within the budget.
pub(crate) const MATE_SCORE: i32 = 100;
/// Leaf score for anything else.
pub(crate) const NO_MATE_SCORE: i32 = -100;

/// Which algorithm explores the tree.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// Full-width minimax.
    Minimax,
    /// Minimax with alpha-beta pruning.
    AlphaBeta,
    /// Exhaustive depth-first search, first mating sequence wins.
    Dfs,
    /// Breadth-first search over serialized positions.
    Bfs,
    /// The greedy capture playout baseline.
    Greedy,
}

impl Strategy {
    /// All strategies, in this order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Minimax,
        Strategy::AlphaBeta,
        Strategy::Dfs,
        Strategy::Bfs,
        Strategy::Greedy,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alphabeta",
            Strategy::Dfs => "dfs",
            Strategy::Bfs => "bfs",
            Strategy::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error when parsing an unknown strategy name.
#[derive(Clone, Debug)]
pub struct ParseStrategyError;

impl fmt::Display for ParseStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown strategy (expected minimax, alphabeta, dfs, bfs or greedy)")
    }
}

impl Error for ParseStrategyError {}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Strategy, ParseStrategyError> {
        Ok(match s {
            "minimax" => Strategy::Minimax,
            "alphabeta" | "alpha-beta" => Strategy::AlphaBeta,
            "dfs" => Strategy::Dfs,
            "bfs" => Strategy::Bfs,
            "greedy" | "dumbo" => Strategy::Greedy,
            _ => return Err(ParseStrategyError),
        })
    }
}

/// Hard resource bounds for one search invocation.
///
/// The core has no wall-clock deadline; callers own that. The node budget
/// gives them a deterministic in-core bound instead.
#[derive(Copy, Clone, Default, Debug)]
pub struct Limits {
    /// Abort after visiting this many nodes.
    pub max_nodes: Option<u64>,
}

/// Basic performance counters for one solve.
#[allow(missing_docs)]
#[derive(Copy, Clone, Default, Debug)]
pub struct Telemetry {
    pub nodes: u64,
    pub oracle_calls: u64,
    pub elapsed: Duration,
}

/// The result of a solve.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    /// A mating line within the budget, ready for presentation.
    Mate(Vec<San>),
    /// The solver has no legal move and is not in check.
    Stalemate,
    /// No mate within the budget, or the solver is already mated.
    NoSolution,
}

/// Errors that abort a search. The board is restored before any of these
/// propagate.
#[derive(Debug)]
pub enum SearchError {
    /// The configured node budget ran out.
    NodeLimit {
        /// Nodes visited when the budget ran out.
        visited: u64,
    },
    /// The legality oracle failed to answer.
    Oracle(OracleError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NodeLimit { visited } => {
                write!(f, "node budget exhausted after {visited} nodes")
            }
            SearchError::Oracle(err) => err.fmt(f),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SearchError::Oracle(err) => Some(err),
            SearchError::NodeLimit { .. } => None,
        }
    }
}

impl From<OracleError> for SearchError {
    fn from(err: OracleError) -> SearchError {
        SearchError::Oracle(err)
    }
}

/// Request-scoped search state: the board under exploration, the solving
/// side, the move budget, and the optional oracle and limits.
pub struct Solver<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) solver: Color,
    pub(crate) budget: u32,
    pub(crate) oracle: Option<&'a dyn LegalityOracle>,
    pub(crate) limits: Limits,
    pub(crate) seed: Option<u64>,
    pub(crate) telemetry: Telemetry,
}

impl fmt::Debug for Solver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("solver", &self.solver)
            .field("budget", &self.budget)
            .field("limits", &self.limits)
            .field("telemetry", &self.telemetry)
            .finish_non_exhaustive()
    }
}

impl<'a> Solver<'a> {
    /// Creates a solver for one invocation: `solver` is to move and must
    /// mate within `budget` full-move pairs.
    pub fn new(board: &'a mut Board, solver: Color, budget: u32) -> Solver<'a> {
        Solver {
            board,
            solver,
            budget,
            oracle: None,
            limits: Limits::default(),
            seed: None,
            telemetry: Telemetry::default(),
        }
    }

    /// Reconciles every generated move list against this oracle.
    #[must_use]
    pub fn with_oracle(mut self, oracle: &'a dyn LegalityOracle) -> Solver<'a> {
        self.oracle = Some(oracle);
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Solver<'a> {
        self.limits = limits;
        self
    }

    /// Seeds the greedy strategy's tie-breaking for reproducible playouts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Solver<'a> {
        self.seed = Some(seed);
        self
    }

    /// Counters for the most recent [`solve`](Solver::solve).
    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    /// Runs the chosen strategy to completion.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on node-budget exhaustion or oracle
    /// failure; the board is restored either way.
    pub fn solve(&mut self, strategy: Strategy) -> Result<Outcome, SearchError> {
        let start = Instant::now();
        debug!(
            "solving with {strategy}: {} to mate in {}",
            self.solver, self.budget
        );
        let result = self.dispatch(strategy);
        self.telemetry.elapsed = start.elapsed();
        if let Ok(outcome) = &result {
            debug!(
                "{strategy} visited {} nodes in {:?}: {}",
                self.telemetry.nodes,
                self.telemetry.elapsed,
                match outcome {
                    Outcome::Mate(_) => "mate found",
                    Outcome::Stalemate => "stalemate",
                    Outcome::NoSolution => "no solution",
                }
            );
        }
        result
    }

    fn dispatch(&mut self, strategy: Strategy) -> Result<Outcome, SearchError> {
        match self.game_end(self.solver)? {
            GameEnd::Stalemate => return Ok(Outcome::Stalemate),
            GameEnd::Checkmate => {
                debug!("side to move is already checkmated");
                return Ok(Outcome::NoSolution);
            }
            GameEnd::Ongoing => {}
        }
        if self.budget == 0 {
            return Ok(Outcome::NoSolution);
        }
        match strategy {
            Strategy::Minimax => minimax::search(self, false),
            Strategy::AlphaBeta => minimax::search(self, true),
            Strategy::Dfs => dfs::search(self),
            Strategy::Bfs => bfs::search(self),
            Strategy::Greedy => greedy::search(self),
        }
    }

    /// Total plies below the root: N pairs starting and ending on the
    /// solver's side.
    pub(crate) fn max_ply(&self) -> u32 {
        2 * self.budget - 1
    }

    /// Counts a visited node against the budget.
    pub(crate) fn visit(&mut self) -> Result<(), SearchError> {
        self.telemetry.nodes += 1;
        if let Some(max) = self.limits.max_nodes {
            if self.telemetry.nodes > max {
                return Err(SearchError::NodeLimit {
                    visited: self.telemetry.nodes,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn legal_moves(&mut self, turn: Color) -> Result<MoveList, SearchError> {
        legal_moves_on(&mut *self.board, self.oracle, &mut self.telemetry, turn)
    }

    pub(crate) fn game_end(&mut self, turn: Color) -> Result<GameEnd, SearchError> {
        game_end_on(&mut *self.board, self.oracle, &mut self.telemetry, turn)
    }

    /// Leaf test: is the side to move checkmated?
    pub(crate) fn is_mated(&mut self, turn: Color) -> Result<bool, SearchError> {
        Ok(self.game_end(turn)? == GameEnd::Checkmate)
    }
}

/// Oracle-reconciled legal moves for any board, not just the solver's own.
/// BFS rebuilds positions from snapshots and shares this plumbing.
pub(crate) fn legal_moves_on(
    board: &mut Board,
    oracle: Option<&dyn LegalityOracle>,
    telemetry: &mut Telemetry,
    turn: Color,
) -> Result<MoveList, SearchError> {
    let mut moves = movegen::legal_moves(board, turn);
    if let Some(oracle) = oracle {
        telemetry.oracle_calls += 1;
        let authoritative = oracle.legal_moves(&board.placement(), turn)?;
        oracle::reconcile(board, &mut moves, &authoritative);
    }
    Ok(moves)
}

pub(crate) fn game_end_on(
    board: &mut Board,
    oracle: Option<&dyn LegalityOracle>,
    telemetry: &mut Telemetry,
    turn: Color,
) -> Result<GameEnd, SearchError> {
    let moves = legal_moves_on(board, oracle, telemetry, turn)?;
    Ok(if !moves.is_empty() {
        GameEnd::Ongoing
    } else if attacks::king_in_check(board, turn) {
        GameEnd::Checkmate
    } else {
        GameEnd::Stalemate
    })
}

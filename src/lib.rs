//! A library for solving forced-mate chess puzzles.
//!
//! Given a starting position, a side to move and a budget of N full-move
//! pairs, the solver finds a sequence of moves reaching checkmate within
//! the budget, or reports that none exists. Four interchangeable
//! strategies explore the tree (minimax, minimax with alpha-beta pruning,
//! exhaustive DFS, BFS), plus a greedy capture-value baseline.
//!
//! The supported rule subset deliberately omits castling, en passant,
//! pawn double-steps, promotion and the draw clocks; an external
//! [legality oracle](oracle::LegalityOracle) can be attached to repair
//! the generator's answers where that matters.
//!
//! # Examples
//!
//! Solve a back-rank mate in one:
//!
//! ```
//! use matefinder::{
//!     san,
//!     search::{Outcome, Solver, Strategy},
//!     Puzzle,
//! };
//!
//! let mut puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1".parse()?;
//! let turn = puzzle.turn;
//! let budget = puzzle.budget;
//!
//! let mut solver = Solver::new(&mut puzzle.board, turn, budget);
//! match solver.solve(Strategy::AlphaBeta)? {
//!     Outcome::Mate(line) => assert_eq!(san::line(&line), "1. Ra8#"),
//!     other => panic!("expected a mate, got {other:?}"),
//! }
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

mod board;
mod color;
mod m;
mod role;
mod square;

pub mod attacks;
pub mod fen;
pub mod movegen;
pub mod oracle;
pub mod puzzle;
pub mod san;
pub mod search;
pub mod uci;

pub use board::{Applied, ApplyError, Board, PieceId, PositionError, PositionErrorKinds, Undo};
pub use color::{Color, ParseColorError};
pub use m::{Move, MoveList};
pub use puzzle::{Puzzle, PuzzleError};
pub use role::{Piece, Role};
pub use square::{ParseSquareError, Square};

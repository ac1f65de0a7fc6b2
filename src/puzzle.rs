//! The three-line puzzle input format.
//!
//! A puzzle file carries the board placement (8 `/`-separated rank
//! strings, rank 8 first, digits for runs of empty squares, uppercase for
//! white), the side to move (`w` or `b`) and the move budget in full-move
//! pairs, one field per line.
//!
//! # Examples
//!
//! ```
//! use matefinder::{Color, Puzzle};
//!
//! let puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1".parse()?;
//! assert_eq!(puzzle.turn, Color::White);
//! assert_eq!(puzzle.budget, 1);
//! # Ok::<_, matefinder::PuzzleError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use btoi::btoi;

use crate::{
    board::{Board, PositionError},
    color::Color,
    fen::{self, ParseFenError},
};

/// Errors for puzzle text that cannot be used.
#[derive(Debug)]
pub enum PuzzleError {
    /// A required line is absent.
    MissingField(&'static str),
    /// The placement line is malformed.
    Fen(ParseFenError),
    /// The placement does not describe a queryable position.
    Position(PositionError),
    /// The side to move is not `w` or `b`.
    InvalidTurn,
    /// The move budget is not a positive integer.
    InvalidBudget,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::MissingField(field) => write!(f, "missing {field} line"),
            PuzzleError::Fen(err) => err.fmt(f),
            PuzzleError::Position(err) => err.fmt(f),
            PuzzleError::InvalidTurn => f.write_str("invalid side to move"),
            PuzzleError::InvalidBudget => f.write_str("invalid move budget"),
        }
    }
}

impl Error for PuzzleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PuzzleError::Fen(err) => Some(err),
            PuzzleError::Position(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseFenError> for PuzzleError {
    fn from(err: ParseFenError) -> PuzzleError {
        PuzzleError::Fen(err)
    }
}

impl From<PositionError> for PuzzleError {
    fn from(err: PositionError) -> PuzzleError {
        PuzzleError::Position(err)
    }
}

/// A parsed, validated puzzle: position, side to move, move budget.
#[derive(Clone, Debug)]
pub struct Puzzle {
    /// The starting position.
    pub board: Board,
    /// The solving side.
    pub turn: Color,
    /// Full-move pairs to mate within.
    pub budget: u32,
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(text: &str) -> Result<Puzzle, PuzzleError> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
        let placement = lines
            .next()
            .ok_or(PuzzleError::MissingField("board placement"))?;
        let turn_line = lines
            .next()
            .ok_or(PuzzleError::MissingField("side to move"))?;
        let budget_line = lines.next().ok_or(PuzzleError::MissingField("move budget"))?;

        let board = Board::from_pieces(fen::parse_placement(placement)?)?;
        let turn = match turn_line {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(PuzzleError::InvalidTurn),
        };
        let budget: u32 =
            btoi(budget_line.as_bytes()).map_err(|_| PuzzleError::InvalidBudget)?;
        if budget == 0 {
            return Err(PuzzleError::InvalidBudget);
        }

        Ok(Puzzle {
            board,
            turn,
            budget,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_three_fields() {
        let puzzle: Puzzle = "6k1/8/6K1/8/8/8/8/R7\nw\n1\n".parse().expect("valid puzzle");
        assert_eq!(puzzle.turn, Color::White);
        assert_eq!(puzzle.budget, 1);
        assert_eq!(puzzle.board.placement(), "6k1/8/6K1/8/8/8/8/R7");
    }

    #[test]
    fn test_rejects_bad_fields() {
        assert!(matches!(
            "6k1/8/6K1/8/8/8/8/R7\nw".parse::<Puzzle>(),
            Err(PuzzleError::MissingField(_))
        ));
        assert!(matches!(
            "6k1/8/6K1/8/8/8/8/R7\nx\n1".parse::<Puzzle>(),
            Err(PuzzleError::InvalidTurn)
        ));
        assert!(matches!(
            "6k1/8/6K1/8/8/8/8/R7\nw\n0".parse::<Puzzle>(),
            Err(PuzzleError::InvalidBudget)
        ));
        assert!(matches!(
            "6k1/8/6K1/8/8/8/8/8\nw\n1".parse::<Puzzle>(),
            Err(PuzzleError::Position(_))
        ));
    }
}

//! Parse and write the board-placement field of Forsyth-Edwards notation.
//!
//! Only the placement field and the side to move exist in this rule
//! subset; castling rights, en passant squares and move clocks have no
//! meaning here and are not parsed.
//!
//! # Examples
//!
//! ```
//! use matefinder::{fen::Fen, Color};
//!
//! let fen: Fen = "6k1/8/6K1/8/8/8/8/R7 w".parse()?;
//! assert_eq!(fen.turn, Color::White);
//!
//! let board = fen.into_board()?;
//! assert_eq!(board.placement(), "6k1/8/6K1/8/8/8/8/R7");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::{Board, PositionError},
    color::Color,
    role::Piece,
    square::Square,
};

/// Errors that can occur when parsing a placement string.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParseFenError {
    /// The placement field is malformed.
    InvalidBoard,
    /// The side to move is not `w` or `b`.
    InvalidTurn,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidBoard => "invalid board placement",
            ParseFenError::InvalidTurn => "invalid side to move",
        })
    }
}

impl Error for ParseFenError {}

/// Parses an already-split rank list, rank 8 first, into piece placements.
///
/// Digits are runs of empty squares, letters are pieces (uppercase white).
/// Each rank must account for exactly 8 files.
///
/// # Errors
///
/// Returns [`ParseFenError::InvalidBoard`] for a wrong rank count, an
/// unknown character or a rank that does not sum to 8 files.
pub fn from_ranks<S: AsRef<str>>(ranks: &[S]) -> Result<Vec<(Piece, Square)>, ParseFenError> {
    if ranks.len() != 8 {
        return Err(ParseFenError::InvalidBoard);
    }

    let mut pieces = Vec::new();
    for (i, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - i as i8;
        let mut file = 0i8;
        for ch in rank_str.as_ref().chars() {
            if let Some(run) = ch.to_digit(10) {
                if !(1..=8).contains(&run) {
                    return Err(ParseFenError::InvalidBoard);
                }
                file += run as i8;
            } else if let Some(piece) = Piece::from_char(ch) {
                let square =
                    Square::from_coords(file, rank).ok_or(ParseFenError::InvalidBoard)?;
                pieces.push((piece, square));
                file += 1;
            } else {
                return Err(ParseFenError::InvalidBoard);
            }
        }
        if file != 8 {
            return Err(ParseFenError::InvalidBoard);
        }
    }
    Ok(pieces)
}

/// Parses a full placement string such as `6k1/8/6K1/8/8/8/8/R7`.
///
/// # Errors
///
/// As [`from_ranks`].
pub fn parse_placement(placement: &str) -> Result<Vec<(Piece, Square)>, ParseFenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    from_ranks(&ranks)
}

/// A parsed placement plus side to move.
#[derive(Clone, Debug)]
pub struct Fen {
    pieces: Vec<(Piece, Square)>,
    /// The side to move. Defaults to white when the field is absent.
    pub turn: Color,
}

impl Fen {
    /// Validates the placement into a [`Board`].
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] if the placement is not a queryable
    /// position.
    pub fn into_board(self) -> Result<Board, PositionError> {
        Board::from_pieces(self.pieces)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split_ascii_whitespace();
        let board_part = parts.next().ok_or(ParseFenError::InvalidBoard)?;
        let pieces = parse_placement(board_part)?;

        let turn = match parts.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
            None => Color::White,
        };

        Ok(Fen { pieces, turn })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_roundtrip() {
        for placement in [
            "6k1/8/6K1/8/8/8/8/R7",
            "7k/8/5K2/8/8/8/1Q6/8",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        ] {
            let board = Board::from_pieces(parse_placement(placement).expect("valid placement"))
                .expect("legal position");
            assert_eq!(board.placement(), placement);
        }
    }

    #[test]
    fn test_rejects_malformed_placements() {
        assert!(parse_placement("8/8/8/8/8/8/8").is_err());
        assert!(parse_placement("9/8/8/8/8/8/8/8").is_err());
        assert!(parse_placement("4k4/8/8/8/8/8/8/4K3").is_err());
        assert!(parse_placement("4x3/8/8/8/8/8/8/4K3").is_err());
    }

    #[test]
    fn test_fen_turn() {
        let fen: Fen = "6k1/8/6K1/8/8/8/8/R7 b".parse().expect("valid fen");
        assert_eq!(fen.turn, Color::Black);
        let fen: Fen = "6k1/8/6K1/8/8/8/8/R7".parse().expect("valid fen");
        assert_eq!(fen.turn, Color::White);
        assert!("6k1/8/6K1/8/8/8/8/R7 x".parse::<Fen>().is_err());
    }
}

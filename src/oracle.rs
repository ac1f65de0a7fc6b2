//! The external legality oracle boundary.
//!
//! The hand-written generator is a performance-oriented approximation; an
//! oracle, when one is configured, is the authority on legality. Before
//! any move list reaches the search it is reconciled against the oracle's
//! answer: moves the generator missed are added, moves it over-produced
//! are stripped. Divergence is repaired silently and logged at debug
//! level; only transport failure is an error.

use std::{collections::HashMap, error::Error, fmt};

use log::{debug, warn};

use crate::{
    board::Board,
    color::Color,
    m::{Move, MoveList},
    uci::Uci,
};

/// Failure to obtain an oracle verdict.
#[derive(Debug)]
pub struct OracleError {
    message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> OracleError {
        OracleError {
            message: message.into(),
        }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "legality oracle failed: {}", self.message)
    }
}

impl Error for OracleError {}

/// An external authority on fully-legal moves for a position.
///
/// Addressed purely by the serialized placement and the side to move;
/// answers in coordinate notation.
pub trait LegalityOracle {
    /// The legal moves for the given placement and side to move.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] if no verdict could be obtained.
    fn legal_moves(&self, placement: &str, turn: Color) -> Result<Vec<Uci>, OracleError>;
}

/// Reconciles generated moves against the oracle's authoritative list, in
/// place.
///
/// Origin pieces for added moves are resolved by square lookup on the
/// current board; an oracle move whose origin square is empty means the
/// two sides disagree about the position itself and is skipped with a
/// warning.
pub fn reconcile(board: &Board, generated: &mut MoveList, authoritative: &[Uci]) {
    for &uci in authoritative {
        if generated
            .iter()
            .any(|m| m.from == uci.from && m.to == uci.to)
        {
            continue;
        }
        let Some(piece) = board.piece_at(uci.from) else {
            warn!("oracle move {uci} has no piece on its origin square");
            continue;
        };
        debug!("generator missed {uci}, adding from oracle");
        generated.push(Move {
            piece,
            role: board.piece(piece).role,
            from: uci.from,
            to: uci.to,
            capture: board.piece_at(uci.to).map(|id| board.piece(id).role),
        });
    }

    generated.retain(|m| {
        let keep = authoritative
            .iter()
            .any(|u| u.from == m.from && u.to == m.to);
        if !keep {
            debug!("generator over-produced {}, stripping", Uci::from(*m));
        }
        keep
    });
}

/// A fixed-table oracle for tests and offline replays.
#[derive(Default, Debug)]
pub struct TableOracle {
    moves: HashMap<(String, Color), Vec<Uci>>,
}

impl TableOracle {
    pub fn new() -> TableOracle {
        TableOracle::default()
    }

    /// Records the oracle's answer for one position.
    pub fn insert(&mut self, placement: &str, turn: Color, moves: Vec<Uci>) {
        self.moves.insert((placement.to_owned(), turn), moves);
    }
}

impl LegalityOracle for TableOracle {
    fn legal_moves(&self, placement: &str, turn: Color) -> Result<Vec<Uci>, OracleError> {
        self.moves
            .get(&(placement.to_owned(), turn))
            .cloned()
            .ok_or_else(|| OracleError::new(format!("no verdict recorded for {placement} {turn}")))
    }
}

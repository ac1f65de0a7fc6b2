use std::{
    error::Error,
    fmt,
    ops::{Deref, DerefMut},
};

use bitflags::bitflags;

use crate::{
    color::Color,
    role::{Piece, Role},
    square::Square,
};

/// Stable handle to a piece in a [`Board`]'s piece table.
///
/// Two handles are equal iff they denote the same piece allocation. This is
/// the identity relation used for mutation and capture restoration; "is
/// some piece standing on this square" is the deliberately weaker relation
/// answered by [`Board::piece_at`]. The two must never be conflated: two
/// rooks of one color are interchangeable to an occupancy query and
/// distinct to an undo record.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PieceId(usize);

#[derive(Copy, Clone, Debug)]
struct Slot {
    piece: Piece,
    square: Square,
    alive: bool,
}

bitflags! {
    /// Reasons a piece placement cannot form a queryable position.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces at all.
        const EMPTY_BOARD = 1 << 0;
        /// A side has no king.
        const MISSING_KING = 1 << 1;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 2;
        /// Two pieces share a square in the setup.
        const OVERLAPPING_PIECES = 1 << 3;
    }
}

/// Error when a setup does not describe a queryable position.
#[derive(Clone, Debug)]
pub struct PositionError {
    kinds: PositionErrorKinds,
}

impl PositionError {
    /// Every defect found in the setup.
    pub fn kinds(&self) -> PositionErrorKinds {
        self.kinds
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal position: {:?}", self.kinds)
    }
}

impl Error for PositionError {}

/// Error for an `apply` that no generated move can produce.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ApplyError {
    /// The piece to move has been captured.
    DeadPiece,
    /// Origin and destination are the same square.
    SameSquare,
    /// The destination holds a piece of the mover's own color.
    FriendlyOccupant,
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ApplyError::DeadPiece => "piece to move is captured",
            ApplyError::SameSquare => "move to its own square",
            ApplyError::FriendlyOccupant => "destination holds a friendly piece",
        })
    }
}

impl Error for ApplyError {}

/// Record of one [`Board::apply`], sufficient to restore the prior state.
///
/// Each recursion level owns the undo record for the apply it performed;
/// capture state is never shared between levels, so nested applies and
/// reverts can interleave freely as long as each level reverts before
/// returning.
#[derive(Debug, PartialEq)]
pub struct Undo {
    piece: PieceId,
    from: Square,
    to: Square,
    captured: Option<PieceId>,
}

impl Undo {
    /// The piece captured by the move, if any.
    pub fn captured(&self) -> Option<PieceId> {
        self.captured
    }
}

/// The set of pieces on the board, plus derived occupancy and king
/// bookkeeping.
///
/// A board is constructed once from a setup and then destructively mutated
/// in place by [`apply`](Board::apply) and restored by
/// [`revert`](Board::revert) as a search explores and backtracks. The
/// `occupied` list is kept exactly equal to the multiset of live piece
/// squares; a divergence is an internal-consistency failure, not a
/// recoverable condition.
#[derive(Clone, Debug)]
pub struct Board {
    slots: Vec<Slot>,
    occupied: Vec<Square>,
    kings: [PieceId; 2],
}

impl Board {
    /// Builds a board from piece placements, validating that it is
    /// queryable: non-empty, no shared squares, exactly one king per side.
    ///
    /// # Errors
    ///
    /// Returns a [`PositionError`] carrying every defect found.
    pub fn from_pieces<I>(pieces: I) -> Result<Board, PositionError>
    where
        I: IntoIterator<Item = (Piece, Square)>,
    {
        let mut slots = Vec::new();
        let mut occupied = Vec::new();
        for (piece, square) in pieces {
            slots.push(Slot {
                piece,
                square,
                alive: true,
            });
            occupied.push(square);
        }

        let mut kinds = PositionErrorKinds::empty();
        if slots.is_empty() {
            kinds |= PositionErrorKinds::EMPTY_BOARD;
        }

        let mut sorted = occupied.clone();
        sorted.sort();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            kinds |= PositionErrorKinds::OVERLAPPING_PIECES;
        }

        let mut kings = [None, None];
        for (i, slot) in slots.iter().enumerate() {
            if slot.piece.role != Role::King {
                continue;
            }
            let king = &mut kings[slot.piece.color as usize];
            if king.is_some() {
                kinds |= PositionErrorKinds::TOO_MANY_KINGS;
            } else {
                *king = Some(PieceId(i));
            }
        }
        if kings.iter().any(Option::is_none) {
            kinds |= PositionErrorKinds::MISSING_KING;
        }

        if !kinds.is_empty() {
            return Err(PositionError { kinds });
        }

        Ok(Board {
            slots,
            occupied,
            kings: [
                kings[0].expect("validated king"),
                kings[1].expect("validated king"),
            ],
        })
    }

    /// The piece behind a handle.
    pub fn piece(&self, id: PieceId) -> Piece {
        self.slots[id.0].piece
    }

    /// The square a piece stands on, or `None` if it has been captured.
    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        let slot = &self.slots[id.0];
        slot.alive.then_some(slot.square)
    }

    /// The piece standing on a square, if any. This is the weak
    /// position-equality relation; see [`PieceId`].
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.slots
            .iter()
            .position(|slot| slot.alive && slot.square == square)
            .map(PieceId)
    }

    /// The king of a side. Kings are never capturable, so the handle is
    /// always live.
    pub fn king_of(&self, color: Color) -> PieceId {
        self.kings[color as usize]
    }

    /// The square the side's king stands on.
    pub fn king_square(&self, color: Color) -> Square {
        self.slots[self.king_of(color).0].square
    }

    /// Handles of all live pieces of one side.
    pub fn ids(&self, color: Color) -> impl Iterator<Item = PieceId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, slot)| slot.alive && slot.piece.color == color)
            .map(|(i, _)| PieceId(i))
    }

    /// All live pieces with their handles and squares.
    pub fn live(&self) -> impl Iterator<Item = (PieceId, Piece, Square)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(i, slot)| (PieceId(i), slot.piece, slot.square))
    }

    /// The occupied-squares multiset.
    pub fn occupied(&self) -> &[Square] {
        &self.occupied
    }

    /// Whether some piece stands on the square.
    pub fn is_occupied(&self, square: Square) -> bool {
        self.occupied.contains(&square)
    }

    /// Moves a piece, capturing any enemy occupant of the destination.
    ///
    /// # Errors
    ///
    /// Returns an [`ApplyError`] for a dead mover, a same-square move or a
    /// friendly occupant. The generator never produces such moves, so a
    /// caller seeing one has broken the apply/revert contract upstream.
    pub fn apply(&mut self, id: PieceId, to: Square) -> Result<Undo, ApplyError> {
        let from = match self.square_of(id) {
            Some(square) => square,
            None => return Err(ApplyError::DeadPiece),
        };
        if from == to {
            return Err(ApplyError::SameSquare);
        }

        let captured = self.piece_at(to);
        if let Some(victim) = captured {
            if self.slots[victim.0].piece.color == self.slots[id.0].piece.color {
                return Err(ApplyError::FriendlyOccupant);
            }
            self.slots[victim.0].alive = false;
            self.remove_occupied(to);
        }

        self.remove_occupied(from);
        self.slots[id.0].square = to;
        self.occupied.push(to);
        debug_assert!(self.occupancy_consistent());

        Ok(Undo {
            piece: id,
            from,
            to,
            captured,
        })
    }

    /// The exact inverse of the matching [`apply`](Board::apply): the
    /// piece returns to its origin and any captured piece rejoins the
    /// board on the destination square.
    pub fn revert(&mut self, undo: Undo) {
        let Undo {
            piece,
            from,
            to,
            captured,
        } = undo;

        self.remove_occupied(to);
        self.slots[piece.0].square = from;
        self.occupied.push(from);

        if let Some(victim) = captured {
            debug_assert_eq!(self.slots[victim.0].square, to);
            self.slots[victim.0].alive = true;
            self.occupied.push(to);
        }
        debug_assert!(self.occupancy_consistent());
    }

    /// Applies a move and returns a guard that reverts it when dropped,
    /// guaranteeing restoration on every exit path.
    ///
    /// # Errors
    ///
    /// As [`apply`](Board::apply).
    pub fn apply_scoped(&mut self, id: PieceId, to: Square) -> Result<Applied<'_>, ApplyError> {
        let undo = self.apply(id, to)?;
        Ok(Applied {
            board: self,
            undo: Some(undo),
        })
    }

    /// Whether the occupancy multiset matches the live piece squares.
    /// A `false` means the apply/revert contract was broken somewhere on
    /// the call stack.
    pub fn occupancy_consistent(&self) -> bool {
        let mut live: Vec<Square> = self
            .slots
            .iter()
            .filter(|slot| slot.alive)
            .map(|slot| slot.square)
            .collect();
        let mut occupied = self.occupied.clone();
        live.sort();
        occupied.sort();
        live == occupied
    }

    /// The placement serialized rank-major from rank 8 down, with runs of
    /// empty squares as digits and ranks separated by `/`. Round-trips
    /// through [`crate::fen::parse_placement`].
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(20);
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(id) => {
                        if empty > 0 {
                            out.push(char::from_digit(empty, 10).expect("run of at most 8"));
                            empty = 0;
                        }
                        out.push(self.piece(id).char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from_digit(empty, 10).expect("run of at most 8"));
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out
    }

    fn remove_occupied(&mut self, square: Square) {
        let i = self
            .occupied
            .iter()
            .position(|&s| s == square)
            .expect("occupied square missing from occupancy set");
        self.occupied.swap_remove(i);
    }
}

/// Guard over a board with one move applied; dropping it reverts the move.
#[derive(Debug)]
pub struct Applied<'a> {
    board: &'a mut Board,
    undo: Option<Undo>,
}

impl Applied<'_> {
    /// The piece captured by the applied move, if any.
    pub fn captured(&self) -> Option<PieceId> {
        self.undo.as_ref().and_then(Undo::captured)
    }
}

impl Deref for Applied<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.board.revert(undo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_placement;

    fn board(placement: &str) -> Board {
        Board::from_pieces(parse_placement(placement).expect("valid placement"))
            .expect("legal position")
    }

    #[test]
    fn test_apply_revert_roundtrip() {
        let mut board = board("6k1/8/6K1/8/8/8/8/R7");
        let before = board.placement();
        let rook = board.piece_at(Square::new(0, 0)).expect("rook on a1");

        let undo = board.apply(rook, Square::new(0, 7)).expect("legal apply");
        assert_eq!(board.square_of(rook), Some(Square::new(0, 7)));
        assert!(board.occupancy_consistent());

        board.revert(undo);
        assert_eq!(board.placement(), before);
        assert!(board.occupancy_consistent());
    }

    #[test]
    fn test_capture_and_restore() {
        let mut board = board("4k3/8/8/3r4/8/3R4/8/4K3");
        let before = board.placement();
        let white_rook = board.piece_at(Square::new(3, 2)).expect("rook on d3");
        let black_rook = board.piece_at(Square::new(3, 4)).expect("rook on d5");

        let undo = board
            .apply(white_rook, Square::new(3, 4))
            .expect("legal capture");
        assert_eq!(undo.captured(), Some(black_rook));
        assert_eq!(board.square_of(black_rook), None);
        assert_eq!(board.piece_at(Square::new(3, 4)), Some(white_rook));

        board.revert(undo);
        assert_eq!(board.placement(), before);
        assert_eq!(board.square_of(black_rook), Some(Square::new(3, 4)));
    }

    #[test]
    fn test_scoped_apply_reverts_on_drop() {
        let mut board = board("6k1/8/6K1/8/8/8/8/R7");
        let before = board.placement();
        let rook = board.piece_at(Square::new(0, 0)).expect("rook on a1");

        {
            let applied = board
                .apply_scoped(rook, Square::new(0, 7))
                .expect("legal apply");
            assert_eq!(applied.piece_at(Square::new(0, 7)), Some(rook));
        }
        assert_eq!(board.placement(), before);
    }

    #[test]
    fn test_identity_vs_occupancy() {
        let board = board("4k3/8/8/8/8/8/8/RR2K3");
        let a1 = board.piece_at(Square::new(0, 0)).expect("rook on a1");
        let b1 = board.piece_at(Square::new(1, 0)).expect("rook on b1");
        // Same piece value, distinct identities.
        assert_eq!(board.piece(a1), board.piece(b1));
        assert_ne!(a1, b1);
    }

    #[test]
    fn test_apply_errors() {
        let mut board = board("4k3/8/8/8/8/8/8/RR2K3");
        let a1 = board.piece_at(Square::new(0, 0)).expect("rook on a1");
        assert_eq!(
            board.apply(a1, Square::new(0, 0)),
            Err(ApplyError::SameSquare)
        );
        assert_eq!(
            board.apply(a1, Square::new(1, 0)),
            Err(ApplyError::FriendlyOccupant)
        );
    }

    #[test]
    fn test_setup_validation() {
        let no_white_king = parse_placement("4k3/8/8/8/8/8/8/R7").expect("valid placement");
        let err = Board::from_pieces(no_white_king).expect_err("missing king");
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));

        let two_queens_one_square = vec![
            (Piece::from_char('K').expect("piece"), Square::new(4, 0)),
            (Piece::from_char('k').expect("piece"), Square::new(4, 7)),
            (Piece::from_char('Q').expect("piece"), Square::new(3, 3)),
            (Piece::from_char('q').expect("piece"), Square::new(3, 3)),
        ];
        let err = Board::from_pieces(two_queens_one_square).expect_err("overlap");
        assert!(err.kinds().contains(PositionErrorKinds::OVERLAPPING_PIECES));

        let err = Board::from_pieces(Vec::new()).expect_err("empty");
        assert!(err.kinds().contains(PositionErrorKinds::EMPTY_BOARD));
        assert!(err.kinds().contains(PositionErrorKinds::MISSING_KING));
    }
}

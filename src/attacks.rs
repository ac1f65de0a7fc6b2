//! Attack-set computation.
//!
//! For check detection and king-move restriction the generator needs to
//! know every square the opposing side attacks. Attacks are projected at
//! query time by walking each piece's direction table over the occupancy:
//! sliders run until blocked, knights and pawns take one step, and pawn
//! attacks are the capture diagonals only. Kings are excluded; king
//! adjacency is a separate rule in the generator.

use crate::{
    board::{Board, PieceId},
    color::Color,
    role::Role,
    square::Square,
};

/// A set of squares, one bit per square.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn add(&mut self, square: Square) {
        self.0 |= 1 << bit(square);
    }

    #[inline]
    pub fn contains(self, square: Square) -> bool {
        self.0 & (1 << bit(square)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

#[inline]
fn bit(square: Square) -> u32 {
    (square.rank() * 8 + square.file()) as u32
}

/// Every square one side attacks, plus the attacked squares that are
/// occupied, with their attackers. The latter is what check detection
/// consumes: a king is in check iff its square appears there.
#[derive(Clone, Debug)]
pub struct AttackMap {
    /// All squares some piece of the attacking side reaches.
    pub attacked: SquareSet,
    /// (attacker, square) pairs for attacked squares that hold a piece.
    pub attacked_occupied: Vec<(PieceId, Square)>,
}

impl AttackMap {
    /// Projects the attacks of every non-king piece of `attacker`.
    pub fn compute(board: &Board, attacker: Color) -> AttackMap {
        let mut map = AttackMap {
            attacked: SquareSet::EMPTY,
            attacked_occupied: Vec::new(),
        };

        for (id, piece, from) in board.live() {
            if piece.color != attacker || piece.role == Role::King {
                continue;
            }
            for &(df, dr) in piece.role.deltas(attacker) {
                let mut square = from;
                while let Some(next) = square.offset(df, dr) {
                    map.attacked.add(next);
                    if board.is_occupied(next) {
                        map.attacked_occupied.push((id, next));
                        break;
                    }
                    if !piece.role.is_slider() {
                        break;
                    }
                    square = next;
                }
            }
        }
        map
    }

    /// The pieces attacking `square`, among the attacked occupied squares.
    pub fn attackers_of(&self, square: Square) -> impl Iterator<Item = PieceId> + '_ {
        self.attacked_occupied
            .iter()
            .filter(move |&&(_, sq)| sq == square)
            .map(|&(id, _)| id)
    }
}

/// The pieces currently giving check to `side`'s king.
pub fn checkers(board: &Board, side: Color) -> Vec<PieceId> {
    let king = board.king_square(side);
    AttackMap::compute(board, !side)
        .attackers_of(king)
        .collect()
}

/// Recomputes whether `side`'s king square is attacked.
pub fn king_in_check(board: &Board, side: Color) -> bool {
    !checkers(board, side).is_empty()
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
    fn test_slider_blocked_by_occupant() {
        // Rook on a1, own king on a4: a2 and a3 attacked, a4 recorded as an
        // attacked occupant, a5 and beyond unreached.
        let board = board("4k3/8/8/8/K7/8/8/R7");
        let map = AttackMap::compute(&board, Color::White);
        assert!(map.attacked.contains(Square::new(0, 1)));
        assert!(map.attacked.contains(Square::new(0, 2)));
        assert!(map.attacked.contains(Square::new(0, 3)));
        assert!(!map.attacked.contains(Square::new(0, 4)));
        let king = board.king_square(Color::White);
        assert_eq!(map.attackers_of(king).count(), 1);
    }

    #[test]
    fn test_pawn_attacks_diagonals_only() {
        let board = board("4k3/8/8/8/8/3P4/8/4K3");
        let map = AttackMap::compute(&board, Color::White);
        assert!(map.attacked.contains(Square::new(2, 3)));
        assert!(map.attacked.contains(Square::new(4, 3)));
        assert!(!map.attacked.contains(Square::new(3, 3)));
    }

    #[test]
    fn test_check_detection() {
        let board = board("4k3/8/8/8/8/4R3/8/6K1");
        assert!(king_in_check(&board, Color::Black));
        assert!(!king_in_check(&board, Color::White));
        assert_eq!(checkers(&board, Color::Black).len(), 1);
    }
}

//! The greedy capture heuristic ("dumbo").
//!
//! Not a tree search: at each ply it takes a legal move capturing the
//! highest-value enemy piece, breaking ties uniformly at random, and a
//! uniformly random legal move when no capture exists. A weak baseline
//! for either side, not a guaranteed solver.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    board::{Board, Undo},
    color::Color,
    m::{Move, MoveList},
    movegen::{self, GameEnd},
    role::Role,
    san,
};

use super::{Outcome, SearchError, Solver};

/// Picks one greedy move for the side to move, or `None` if it has no
/// legal moves.
pub fn greedy_move<R: Rng>(board: &mut Board, turn: Color, rng: &mut R) -> Option<Move> {
    let moves = movegen::legal_moves(board, turn);
    pick(&moves, rng)
}

fn pick<R: Rng>(moves: &MoveList, rng: &mut R) -> Option<Move> {
    if moves.is_empty() {
        return None;
    }
    let value = |m: &Move| m.capture.and_then(Role::value);
    match moves.iter().filter_map(value).max() {
        Some(best) => {
            let captures: Vec<Move> = moves
                .iter()
                .filter(|m| value(m) == Some(best))
                .copied()
                .collect();
            Some(captures[rng.random_range(0..captures.len())])
        }
        None => Some(moves[rng.random_range(0..moves.len())]),
    }
}

pub(crate) fn search(s: &mut Solver<'_>) -> Result<Outcome, SearchError> {
    match s.seed {
        Some(seed) => run(s, &mut StdRng::seed_from_u64(seed)),
        None => run(s, &mut rand::rng()),
    }
}

fn run<R: Rng>(s: &mut Solver<'_>, rng: &mut R) -> Result<Outcome, SearchError> {
    let mut undos: Vec<Undo> = Vec::new();
    let result = playout(s, rng, &mut undos);
    for undo in undos.into_iter().rev() {
        s.board.revert(undo);
    }
    result
}

fn playout<R: Rng>(
    s: &mut Solver<'_>,
    rng: &mut R,
    undos: &mut Vec<Undo>,
) -> Result<Outcome, SearchError> {
    let mut line = Vec::new();
    let mut turn = s.solver;

    for _ in 0..s.max_ply() {
        s.visit()?;
        let moves = s.legal_moves(turn)?;
        let Some(m) = pick(&moves, rng) else {
            return Ok(Outcome::NoSolution);
        };
        undos.push(s.board.apply(m.piece, m.to).expect("legal move applies"));
        line.push(m);
        turn = !turn;
    }

    Ok(if s.game_end(turn)? == GameEnd::Checkmate {
        Outcome::Mate(san::annotate(&line))
    } else {
        Outcome::NoSolution
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_placement;
    use crate::square::Square;

    #[test]
    fn test_prefers_the_most_valuable_capture() {
        // The d3 rook can take either the d5 queen or the a3 pawn.
        let mut board = Board::from_pieces(
            parse_placement("4k3/8/8/3q4/8/p2R4/8/4K3").expect("valid placement"),
        )
        .expect("legal position");

        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let m = greedy_move(&mut board, Color::White, &mut rng).expect("has moves");
            assert_eq!(m.capture, Some(Role::Queen));
            assert_eq!(m.to, Square::new(3, 4));
        }
    }

    #[test]
    fn test_random_move_when_no_capture() {
        let mut board = Board::from_pieces(
            parse_placement("4k3/8/8/8/8/8/8/R3K3").expect("valid placement"),
        )
        .expect("legal position");
        let mut rng = StdRng::seed_from_u64(7);
        let m = greedy_move(&mut board, Color::White, &mut rng).expect("has moves");
        assert_eq!(m.capture, None);
    }
}

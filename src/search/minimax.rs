//! Minimax over the mate objective, with optional alpha-beta pruning.
//!
//! Leaves score `+100` for a mate at the budget and `-100` otherwise.
//! Solver plies maximize, opponent plies minimize. With only two leaf
//! values the alpha-beta window prunes soundly: both variants return the
//! same optimal score, though not necessarily the same line.

use crate::{color::Color, m::Move, san};

use super::{Outcome, SearchError, Solver, MATE_SCORE, NO_MATE_SCORE};

pub(crate) fn search(s: &mut Solver<'_>, prune: bool) -> Result<Outcome, SearchError> {
    let mut path = Vec::new();
    let window = prune.then_some((i32::MIN, i32::MAX));
    let (score, line) = node(s, 0, s.solver, window, &mut path)?;
    Ok(match line {
        Some(line) if score == MATE_SCORE => Outcome::Mate(san::annotate(&line)),
        _ => Outcome::NoSolution,
    })
}

fn node(
    s: &mut Solver<'_>,
    ply: u32,
    turn: Color,
    window: Option<(i32, i32)>,
    path: &mut Vec<Move>,
) -> Result<(i32, Option<Vec<Move>>), SearchError> {
    s.visit()?;
    if ply == s.max_ply() {
        return Ok(if s.is_mated(turn)? {
            (MATE_SCORE, Some(path.clone()))
        } else {
            (NO_MATE_SCORE, None)
        });
    }

    let moves = s.legal_moves(turn)?;
    if moves.is_empty() {
        // Out of moves before the final ply, mate-too-early included:
        // the branch is not a solution.
        return Ok((NO_MATE_SCORE, None));
    }

    let maximizing = turn == s.solver;
    let (mut alpha, mut beta) = window.unwrap_or((i32::MIN, i32::MAX));
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_line = None;

    for m in moves {
        path.push(m);
        let undo = s.board.apply(m.piece, m.to).expect("legal move applies");
        let result = node(s, ply + 1, !turn, window.map(|_| (alpha, beta)), path);
        s.board.revert(undo);
        path.pop();
        let (score, line) = result?;

        if maximizing {
            if score > best_score {
                best_score = score;
                best_line = line;
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_line = line;
            }
            beta = beta.min(best_score);
        }
        if window.is_some() && beta <= alpha {
            break;
        }
    }

    Ok((best_score, best_line))
}

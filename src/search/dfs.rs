//! Exhaustive depth-first search.
//!
//! Explores moves in generator order, applying and immediately recursing,
//! backtracking on any branch that fails to reach a mate by the budget.
//! Returns the first mating sequence encountered: order-dependent, not
//! score-optimal.

use crate::{color::Color, m::Move, san};

use super::{Outcome, SearchError, Solver};

pub(crate) fn search(s: &mut Solver<'_>) -> Result<Outcome, SearchError> {
    let mut path = Vec::new();
    Ok(if descend(s, 0, s.solver, &mut path)? {
        Outcome::Mate(san::annotate(&path))
    } else {
        Outcome::NoSolution
    })
}

fn descend(
    s: &mut Solver<'_>,
    ply: u32,
    turn: Color,
    path: &mut Vec<Move>,
) -> Result<bool, SearchError> {
    s.visit()?;
    if ply == s.max_ply() {
        return s.is_mated(turn);
    }

    for m in s.legal_moves(turn)? {
        path.push(m);
        let undo = s.board.apply(m.piece, m.to).expect("legal move applies");
        let found = descend(s, ply + 1, !turn, path);
        s.board.revert(undo);
        match found {
            Ok(true) => return Ok(true),
            Ok(false) => {
                path.pop();
            }
            Err(err) => return Err(err),
        }
    }
    Ok(false)
}

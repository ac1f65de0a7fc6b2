//! Breadth-first search over serialized positions.
//!
//! Explores level by level with an explicit queue of (placement, line,
//! depth, side to move) entries. Each position is rebuilt from its
//! serialized snapshot instead of being restored by incremental reverts,
//! and expansions are deduplicated per level by placement so transposed
//! positions are expanded once. The solver's own board is only read for
//! the root snapshot and never mutated.

use std::collections::{HashSet, VecDeque};

use crate::{board::Board, color::Color, fen, m::Move, movegen::GameEnd, san};

use super::{game_end_on, legal_moves_on, Outcome, SearchError, Solver};

struct Entry {
    placement: String,
    line: Vec<Move>,
    ply: u32,
    turn: Color,
}

pub(crate) fn search(s: &mut Solver<'_>) -> Result<Outcome, SearchError> {
    let max_ply = s.max_ply();
    let mut queue: VecDeque<Entry> = VecDeque::new();
    let mut expanded: HashSet<(String, u32)> = HashSet::new();

    queue.push_back(Entry {
        placement: s.board.placement(),
        line: Vec::new(),
        ply: 0,
        turn: s.solver,
    });

    while let Some(entry) = queue.pop_front() {
        s.visit()?;
        let mut board = rebuild(&entry.placement);

        if entry.ply == max_ply {
            let end = game_end_on(&mut board, s.oracle, &mut s.telemetry, entry.turn)?;
            if end == GameEnd::Checkmate {
                return Ok(Outcome::Mate(san::annotate(&entry.line)));
            }
            continue;
        }

        if !expanded.insert((entry.placement, entry.ply)) {
            continue;
        }

        let moves = legal_moves_on(&mut board, s.oracle, &mut s.telemetry, entry.turn)?;
        for m in moves {
            let undo = board.apply(m.piece, m.to).expect("legal move applies");
            let placement = board.placement();
            board.revert(undo);

            let mut line = entry.line.clone();
            line.push(m);
            queue.push_back(Entry {
                placement,
                line,
                ply: entry.ply + 1,
                turn: !entry.turn,
            });
        }
    }

    Ok(Outcome::NoSolution)
}

fn rebuild(placement: &str) -> Board {
    Board::from_pieces(fen::parse_placement(placement).expect("serialized placement parses"))
        .expect("serialized position is queryable")
}

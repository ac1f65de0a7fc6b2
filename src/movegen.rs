//! Legal move generation for the supported rule subset.
//!
//! Generation runs in two passes. The first enumerates pseudo-legal
//! candidates per piece rule: pawns advance one square onto emptiness and
//! capture on their forward diagonals, knights and kings step through
//! fixed offset tables, sliders run until blocked with capture-or-stop on
//! the first occupant. King candidates are additionally restricted to
//! squares outside the opponent's attack set and not adjacent to the
//! opponent king. The second pass verifies king safety by simulation:
//! each candidate is applied, the opponent's attacks recomputed, and the
//! move reverted. A candidate survives iff the mover's king ends
//! unattacked. The simulation runs for every candidate, in check or not,
//! so pins and retreats along a checking ray are rejected without help
//! from the legality oracle.
//!
//! Castling, en passant, pawn double-steps and promotion are not part of
//! the rule subset and are never generated.

use crate::{
    attacks::{self, AttackMap},
    board::{Board, PieceId},
    color::Color,
    m::{Move, MoveList},
    role::Role,
};

/// How a position stands for the side to move.
///
/// Checkmate and stalemate are jointly determined by the emptiness of the
/// legal move list and the check flag, and are mutually exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameEnd {
    /// No legal moves, king in check.
    Checkmate,
    /// No legal moves, king not in check.
    Stalemate,
    /// At least one legal move.
    Ongoing,
}

/// Generates the legal moves for `turn`.
///
/// Takes the board mutably for the safety simulation; on return the board
/// is exactly as it was.
pub fn legal_moves(board: &mut Board, turn: Color) -> MoveList {
    let attack = AttackMap::compute(board, !turn);

    let mut candidates = MoveList::new();
    let movers: Vec<PieceId> = board.ids(turn).collect();
    for id in movers {
        piece_candidates(board, id, &attack, &mut candidates);
    }

    let enemy_king = board.king_square(!turn);
    let mut legal = MoveList::new();
    for m in candidates {
        // A destination on the enemy king square is an artifact of the
        // capture loops and never a legal move.
        if m.to == enemy_king {
            continue;
        }
        if leaves_king_safe(board, &m, turn) {
            legal.push(m);
        }
    }
    legal
}

fn piece_candidates(board: &Board, id: PieceId, attack: &AttackMap, out: &mut MoveList) {
    let piece = board.piece(id);
    let from = board.square_of(id).expect("candidate mover is live");

    match piece.role {
        Role::Pawn => {
            if let Some(to) = from.offset(0, piece.color.pawn_dir()) {
                if board.piece_at(to).is_none() {
                    out.push(Move {
                        piece: id,
                        role: piece.role,
                        from,
                        to,
                        capture: None,
                    });
                }
            }
            for &(df, dr) in piece.role.deltas(piece.color) {
                let Some(to) = from.offset(df, dr) else {
                    continue;
                };
                if let Some(victim) = board.piece_at(to) {
                    let target = board.piece(victim);
                    if target.color != piece.color && target.role != Role::King {
                        out.push(Move {
                            piece: id,
                            role: piece.role,
                            from,
                            to,
                            capture: Some(target.role),
                        });
                    }
                }
            }
        }
        Role::King => {
            let enemy_king = board.king_square(!piece.color);
            for &(df, dr) in piece.role.deltas(piece.color) {
                let Some(to) = from.offset(df, dr) else {
                    continue;
                };
                if to.distance(enemy_king) <= 1 || attack.attacked.contains(to) {
                    continue;
                }
                match board.piece_at(to) {
                    None => out.push(Move {
                        piece: id,
                        role: piece.role,
                        from,
                        to,
                        capture: None,
                    }),
                    Some(victim) => {
                        let target = board.piece(victim);
                        if target.color != piece.color && target.role != Role::King {
                            out.push(Move {
                                piece: id,
                                role: piece.role,
                                from,
                                to,
                                capture: Some(target.role),
                            });
                        }
                    }
                }
            }
        }
        role => {
            for &(df, dr) in role.deltas(piece.color) {
                let mut square = from;
                loop {
                    let Some(to) = square.offset(df, dr) else {
                        break;
                    };
                    match board.piece_at(to) {
                        None => {
                            out.push(Move {
                                piece: id,
                                role,
                                from,
                                to,
                                capture: None,
                            });
                            if !role.is_slider() {
                                break;
                            }
                            square = to;
                        }
                        Some(victim) => {
                            let target = board.piece(victim);
                            if target.color != piece.color && target.role != Role::King {
                                out.push(Move {
                                    piece: id,
                                    role,
                                    from,
                                    to,
                                    capture: Some(target.role),
                                });
                            }
                            break;
                        }
                    }
                }
            }
        }
    }
}

fn leaves_king_safe(board: &mut Board, m: &Move, turn: Color) -> bool {
    let applied = board
        .apply_scoped(m.piece, m.to)
        .expect("candidate move applies");
    !attacks::king_in_check(&applied, turn)
}

/// Classifies the position for the side to move.
pub fn game_end(board: &mut Board, turn: Color) -> GameEnd {
    if !legal_moves(board, turn).is_empty() {
        GameEnd::Ongoing
    } else if attacks::king_in_check(board, turn) {
        GameEnd::Checkmate
    } else {
        GameEnd::Stalemate
    }
}

/// Counts legal move paths of a given length.
///
/// Useful for comparing, testing and debugging move generation
/// correctness.
pub fn perft(board: &mut Board, turn: Color, depth: u32) -> u64 {
    if depth == 0 {
        1
    } else {
        let moves = legal_moves(board, turn);
        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| {
                    let undo = board.apply(m.piece, m.to).expect("legal move applies");
                    let nodes = perft(board, !turn, depth - 1);
                    board.revert(undo);
                    nodes
                })
                .sum()
        }
    }
}

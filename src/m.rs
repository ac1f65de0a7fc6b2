use std::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{board::PieceId, role::Role, square::Square};

/// A move as the search manipulates it: which piece goes where.
///
/// The `piece` handle identifies the moving piece on the board that
/// generated the move; `role`, `from`, `to` and `capture` are the
/// coordinate facts a reporter needs. Notation lives in [`crate::san`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub piece: PieceId,
    pub role: Role,
    pub from: Square,
    pub to: Square,
    pub capture: Option<Role>,
}

impl Move {
    /// Checks if the move is a capture.
    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.role != Role::Pawn {
            f.write_char(self.role.upper_char())?;
        }
        write!(
            f,
            "{}{}{}",
            self.from,
            if self.capture.is_some() { 'x' } else { '-' },
            self.to
        )
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but large enough to hold the legal moves of
/// any position in the supported rule subset.
pub type MoveList = ArrayVec<Move, 256>;

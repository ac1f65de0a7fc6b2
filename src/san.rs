//! Write reported moves in algebraic notation.
//!
//! The reporter is a presentation layer: a [`San`] is derived from a
//! chosen search move after the fact and is never used as a search key.
//!
//! # Examples
//!
//! ```
//! use matefinder::{san::San, Role, Square};
//!
//! let san = San {
//!     role: Role::Rook,
//!     to: Square::new(0, 7),
//!     from_file: None,
//!     capture: false,
//!     checkmate: true,
//! };
//! assert_eq!(san.to_string(), "Ra8#");
//! ```

use std::fmt::{self, Write as _};

use crate::{m::Move, role::Role, square::Square};

/// A reported move: piece role, destination, optional origin file (shown
/// for pawn captures), capture flag and checkmate flag.
#[allow(missing_docs)]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct San {
    pub role: Role,
    pub to: Square,
    /// Origin file, 0-indexed; present only for pawn captures (`exd5`).
    pub from_file: Option<i8>,
    pub capture: bool,
    pub checkmate: bool,
}

impl San {
    /// Builds the notation for a search move. `checkmate` marks the final
    /// move of a mating line.
    pub fn from_move(m: &Move, checkmate: bool) -> San {
        San {
            role: m.role,
            to: m.to,
            from_file: (m.role == Role::Pawn && m.is_capture()).then(|| m.from.file()),
            capture: m.is_capture(),
            checkmate,
        }
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.role != Role::Pawn {
            f.write_char(self.role.upper_char())?;
        } else if let Some(file) = self.from_file {
            f.write_char((b'a' + file as u8) as char)?;
        }
        if self.capture {
            f.write_char('x')?;
        }
        write!(f, "{}", self.to)?;
        if self.checkmate {
            f.write_char('#')?;
        }
        Ok(())
    }
}

/// Annotates a chosen line, marking its final move as the mate.
pub fn annotate(line: &[Move]) -> Vec<San> {
    line.iter()
        .enumerate()
        .map(|(i, m)| San::from_move(m, i + 1 == line.len()))
        .collect()
}

/// Renders a line as numbered full-move pairs: `1. Kg6 Kg8 2. Qb8#`.
pub fn line(moves: &[San]) -> String {
    let mut out = String::new();
    for (i, m) in moves.iter().enumerate() {
        if i % 2 == 0 {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}. ", i / 2 + 1);
        } else {
            out.push(' ');
        }
        let _ = write!(out, "{m}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn san(role: Role, to: Square, from_file: Option<i8>, capture: bool, mate: bool) -> San {
        San {
            role,
            to,
            from_file,
            capture,
            checkmate: mate,
        }
    }

    #[test]
    fn test_notation_forms() {
        assert_eq!(
            san(Role::Pawn, Square::new(4, 3), None, false, false).to_string(),
            "e4"
        );
        assert_eq!(
            san(Role::Pawn, Square::new(3, 4), Some(4), true, false).to_string(),
            "exd5"
        );
        assert_eq!(
            san(Role::Knight, Square::new(6, 4), None, false, false).to_string(),
            "Ng5"
        );
        assert_eq!(
            san(Role::Queen, Square::new(1, 7), None, true, true).to_string(),
            "Qxb8#"
        );
    }

    #[test]
    fn test_numbered_line() {
        let moves = vec![
            san(Role::King, Square::new(6, 5), None, false, false),
            san(Role::King, Square::new(6, 7), None, false, false),
            san(Role::Queen, Square::new(1, 7), None, false, true),
        ];
        assert_eq!(line(&moves), "1. Kg6 Kg8 2. Qb8#");
    }
}

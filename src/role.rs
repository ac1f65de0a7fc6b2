// This file is part of the matefinder library.
// Copyright (C) 2024-2026 the matefinder developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use crate::color::Color;

/// Piece types: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
///
/// Each role carries its movement data: a direction table and whether the
/// role slides along its directions or takes a single step.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Role {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl Role {
    /// Gets the piece type from its English letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use matefinder::Role;
    ///
    /// assert_eq!(Role::from_char('K'), Some(Role::King));
    /// assert_eq!(Role::from_char('n'), Some(Role::Knight));
    /// assert_eq!(Role::from_char('X'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Role> {
        match ch {
            'P' | 'p' => Some(Role::Pawn),
            'N' | 'n' => Some(Role::Knight),
            'B' | 'b' => Some(Role::Bishop),
            'R' | 'r' => Some(Role::Rook),
            'Q' | 'q' => Some(Role::Queen),
            'K' | 'k' => Some(Role::King),
            _ => None,
        }
    }

    /// Gets a [`Piece`] of the given color.
    #[inline]
    pub const fn of(self, color: Color) -> Piece {
        Piece { color, role: self }
    }

    /// Gets the lowercase English letter for the piece type.
    pub const fn char(self) -> char {
        match self {
            Role::Pawn => 'p',
            Role::Knight => 'n',
            Role::Bishop => 'b',
            Role::Rook => 'r',
            Role::Queen => 'q',
            Role::King => 'k',
        }
    }

    /// Gets the uppercase English letter for the piece type.
    pub const fn upper_char(self) -> char {
        match self {
            Role::Pawn => 'P',
            Role::Knight => 'N',
            Role::Bishop => 'B',
            Role::Rook => 'R',
            Role::Queen => 'Q',
            Role::King => 'K',
        }
    }

    /// Movement directions as (file, rank) deltas.
    ///
    /// For pawns these are the two capture diagonals of the given color;
    /// the quiet advance is a separate rule. All other roles ignore the
    /// color.
    pub fn deltas(self, color: Color) -> &'static [(i8, i8)] {
        match self {
            Role::Pawn => color.fold(&WHITE_PAWN_CAPTURES, &BLACK_PAWN_CAPTURES),
            Role::Knight => &KNIGHT_DELTAS,
            Role::Bishop => &BISHOP_DIRS,
            Role::Rook => &ROOK_DIRS,
            Role::Queen | Role::King => &QUEEN_DIRS,
        }
    }

    /// Whether the role slides along its directions until blocked. Pawns,
    /// knights and kings take exactly one step instead.
    pub const fn is_slider(self) -> bool {
        matches!(self, Role::Bishop | Role::Rook | Role::Queen)
    }

    /// Standard material value, used by the greedy capture heuristic.
    /// The king has no capture value.
    pub const fn value(self) -> Option<u32> {
        match self {
            Role::Pawn => Some(1),
            Role::Knight | Role::Bishop => Some(3),
            Role::Rook => Some(5),
            Role::Queen => Some(9),
            Role::King => None,
        }
    }

    /// `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, and `King`, in this
    /// order.
    pub const ALL: [Role; 6] = [
        Role::Pawn,
        Role::Knight,
        Role::Bishop,
        Role::Rook,
        Role::Queen,
        Role::King,
    ];
}

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const QUEEN_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

const WHITE_PAWN_CAPTURES: [(i8, i8); 2] = [(1, 1), (-1, 1)];

const BLACK_PAWN_CAPTURES: [(i8, i8); 2] = [(1, -1), (-1, -1)];

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The FEN letter: uppercase for white, lowercase for black.
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }

    /// Gets a piece from its FEN letter.
    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order() {
        assert!(Role::Pawn < Role::Knight);
        assert!(Role::Queen < Role::King);
    }

    #[test]
    fn test_piece_char_roundtrip() {
        for role in Role::ALL {
            for color in Color::ALL {
                let piece = role.of(color);
                assert_eq!(Piece::from_char(piece.char()), Some(piece));
            }
        }
    }

    #[test]
    fn test_movement_tables() {
        assert!(Role::Queen.is_slider());
        assert!(!Role::King.is_slider());
        assert_eq!(Role::Knight.deltas(Color::White).len(), 8);
        assert_eq!(Role::Pawn.deltas(Color::Black), &[(1, -1), (-1, -1)]);
        assert_eq!(Role::King.value(), None);
        assert_eq!(Role::Queen.value(), Some(9));
    }
}

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

//! Parse and write moves in plain coordinate (UCI-style) notation.
//!
//! This is the language of the legality oracle boundary: four characters,
//! origin file and rank then destination file and rank, with files `a`-`h`
//! and ranks `1`-`8`. The 1-indexed notation ranks map onto the crate's
//! 0-indexed internal ranks through [`crate::square::Square`]'s parsing
//! and formatting.
//!
//! # Examples
//!
//! ```
//! use matefinder::{uci::Uci, Square};
//!
//! let uci: Uci = "a1a8".parse()?;
//! assert_eq!(uci.from, Square::new(0, 0));
//! assert_eq!(uci.to, Square::new(0, 7));
//! assert_eq!(uci.to_string(), "a1a8");
//! # Ok::<_, matefinder::uci::ParseUciError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{m::Move, square::Square};

/// Error when parsing an invalid coordinate move.
#[derive(Clone, Debug)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// A move in coordinate notation: origin and destination square.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        let bytes = uci.as_bytes();
        if bytes.len() != 4 {
            return Err(ParseUciError);
        }
        Ok(Uci {
            from: Square::from_ascii(&bytes[0..2]).map_err(|_| ParseUciError)?,
            to: Square::from_ascii(&bytes[2..4]).map_err(|_| ParseUciError)?,
        })
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci {
            from: m.from,
            to: m.to,
        }
    }
}

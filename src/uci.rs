// This file is part of the chessgrid library.
// Copyright (C) 2017-2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
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

//! Parse and write moves in Universal Chess Interface representation.
//!
//! # Examples
//!
//! Parsing moves:
//!
//! ```
//! use chessgrid::{Move, Role, Square};
//!
//! let m: Move = "b7b8n".parse()?;
//! assert_eq!(m, Move::new(Square::B7, Square::B8).with_promotion(Role::Knight));
//! # Ok::<_, chessgrid::uci::ParseMoveError>(())
//! ```
//!
//! Engines usually write castling as the king moving two squares. In the
//! context of a position, such moves can be converted to the king-onto-rook
//! encoding used by this crate:
//!
//! ```
//! use chessgrid::{Move, Position};
//!
//! let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse()?;
//! let m: Move = "e1g1".parse()?;
//! assert_eq!(m.normalize_castling(&pos).to_string(), "e1h1");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    m::Move,
    position::Position,
    role::Role,
    square::{File, Square},
};

/// Error when parsing an invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci move")
    }
}

impl Error for ParseMoveError {}

impl Move {
    /// Parses a move like `e2e4` or `e7e8q`. The promotion letter must be
    /// lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMoveError`] if the text is not 4 or 5 characters, a
    /// square name is invalid, or the promotion letter is not one of `q`,
    /// `r`, `b`, `n`.
    pub fn from_ascii(uci: &[u8]) -> Result<Move, ParseMoveError> {
        if uci.len() != 4 && uci.len() != 5 {
            return Err(ParseMoveError);
        }

        let from = Square::from_ascii(&uci[0..2]).map_err(|_| ParseMoveError)?;
        let to = Square::from_ascii(&uci[2..4]).map_err(|_| ParseMoveError)?;

        let promotion = match uci.get(4) {
            None => None,
            Some(&ch) => Some(promotion_from_char(char::from(ch)).ok_or(ParseMoveError)?),
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }

    /// Converts standard castling notation like `e1g1` to the king-onto-rook
    /// encoding, if the king of the side to move stands on the e-file of
    /// its back rank in `pos`.
    ///
    /// `e1g1` becomes `e1h1` unless the side to move holds a castling right
    /// on the g-file itself, and `e1c1` becomes `e1a1` unless there is a
    /// right on the c-file. Likewise for black. Everything else is returned
    /// unchanged.
    #[must_use]
    pub fn normalize_castling(self, pos: &Position) -> Move {
        let color = pos.turn();
        let backrank = color.backrank();

        if self.is_promotion()
            || self.from != Square::from_coords(File::E, backrank)
            || self.to.rank() != backrank
            || pos.board().piece_at(self.from) != Some(color.king())
        {
            return self;
        }

        let corner = match self.to.file() {
            File::G => File::H,
            File::C => File::A,
            _ => return self,
        };

        if pos.castles().has(color, self.to.file()) {
            return self;
        }

        Move::new(self.from, Square::from_coords(corner, backrank))
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(uci: &str) -> Result<Move, ParseMoveError> {
        Move::from_ascii(uci.as_bytes())
    }
}

impl Position {
    /// Converts engine-style castling text like `e1g1` to the king-onto-rook
    /// encoding, see [`Move::normalize_castling()`]. Text that is not a
    /// well-formed move is returned unchanged.
    pub fn normalize_uci(&self, uci: &str) -> String {
        match uci.parse::<Move>() {
            Ok(m) => m.normalize_castling(self).to_string(),
            Err(_) => uci.to_owned(),
        }
    }
}

pub(crate) fn promotion_from_char(ch: char) -> Option<Role> {
    match ch {
        'q' => Some(Role::Queen),
        'r' => Some(Role::Rook),
        'b' => Some(Role::Bishop),
        'n' => Some(Role::Knight),
        _ => None,
    }
}

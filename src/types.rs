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

use std::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Uppercase letter for white pieces, lowercase for black pieces.
    pub const fn char(self) -> char {
        self.color.fold_wb(self.role.upper_char(), self.role.char())
    }

    pub const fn from_char(ch: char) -> Option<Piece> {
        match Role::from_char(ch) {
            Some(role) => Some(role.of(Color::from_white(ch.is_ascii_uppercase()))),
            None => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

/// `Standard` or `Chess960`.
///
/// A position counts as standard chess if all castling rights are on the
/// a- and h-files and every side holding a right has its king on the e-file.
/// This only decides how castling rights and castling moves are presented;
/// move generation is the same in both modes.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum CastlingMode {
    #[default]
    Standard,
    Chess960,
}

impl CastlingMode {
    pub const fn from_standard(standard: bool) -> CastlingMode {
        if standard {
            CastlingMode::Standard
        } else {
            CastlingMode::Chess960
        }
    }

    pub const fn is_standard(self) -> bool {
        matches!(self, CastlingMode::Standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::from_char('Q'), Some(Color::White.queen()));
        assert_eq!(Piece::from_char('n'), Some(Color::Black.knight()));
        assert_eq!(Piece::from_char('x'), None);
        assert_eq!(Color::Black.pawn().char(), 'p');
        assert_eq!(Color::White.king().to_string(), "K");
    }

    #[test]
    fn test_size() {
        assert_eq!(std::mem::size_of::<Option<Piece>>(), 2);
    }
}

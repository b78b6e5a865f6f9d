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

use arrayvec::ArrayVec;

use crate::{role::Role, square::Square};

/// A move from one square to another, with an optional promotion.
///
/// Castling is encoded as the king moving onto its own rook, so `e1h1` is
/// white castling kingside in standard chess.
///
/// # Examples
///
/// ```
/// use chessgrid::{Move, Role, Square};
///
/// let m = Move::new(Square::E7, Square::E8).with_promotion(Role::Queen);
/// assert_eq!(m.to_string(), "e7e8q");
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[must_use]
    #[inline]
    pub const fn with_promotion(self, role: Role) -> Move {
        Move {
            promotion: Some(role),
            ..self
        }
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            fmt::Write::write_char(f, role.char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough for the legal moves of any position that can be
/// constructed. FEN parsing rejects material that promotions could not
/// produce. The most legal moves known for such material is 218.
pub type MoveList = ArrayVec<Move, 256>;

/// Pseudo-legal moves of a single piece: at most 27 for a queen, 12 for a
/// pawn, or the king steps plus one castling move per rook.
pub(crate) type PieceMoves = ArrayVec<Move, 32>;

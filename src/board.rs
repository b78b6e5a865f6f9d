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

use std::fmt::{self, Write as _};

use crate::{
    attacks,
    color::{ByColor, Color},
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// [`Piece`] positions on a board.
///
/// A plain 64 cell grid, with the king squares cached.
///
/// # Examples
///
/// ```
/// use chessgrid::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Color::Black.king()));
/// assert_eq!(board.king_of(Color::White), Some(Square::E1));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Option<Piece>; 64],
    kings: ByColor<Option<Square>>,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        Board::from_back_rank([
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ])
    }

    pub const fn empty() -> Board {
        Board {
            cells: [None; 64],
            kings: ByColor {
                white: None,
                black: None,
            },
        }
    }

    /// A starting position with the given pieces on both back ranks,
    /// mirrored for black, and pawns in front of them.
    pub fn from_back_rank(roles: [Role; 8]) -> Board {
        let mut board = Board::empty();
        for (file, role) in File::ALL.into_iter().zip(roles) {
            for color in Color::ALL {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                board.set_piece_at(Square::from_coords(file, color.pawn_rank()), color.pawn());
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.cells[sq.index()].is_some()
    }

    /// The square of the king of `color`. If there are multiple kings, the
    /// one placed last.
    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.kings[color]
    }

    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.remove_piece_at(sq);
        if piece.role == Role::King {
            self.kings[piece.color] = Some(sq);
        }
        self.cells[sq.index()] = Some(piece);
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.cells[sq.index()].take();
        if let Some(Piece {
            color,
            role: Role::King,
        }) = piece
        {
            if self.kings[color] == Some(sq) {
                self.kings[color] = None;
            }
        }
        piece
    }

    /// Iterates over all occupied squares, from `a1` to `h8`.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Number of pieces of the given kind.
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(piece)).count()
    }

    /// Tests if `sq` is attacked by any piece of color `by`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        attacks::is_attacked(self, sq, by)
    }

    /// The board part of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(64 + 7);

        for rank in Rank::ALL.into_iter().rev() {
            let mut empty = 0u8;

            for file in File::ALL {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }

            if rank > Rank::First {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                f.write_char(
                    self.piece_at(Square::from_coords(file, rank))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_at() {
        let board = Board::new();
        assert_eq!(board.piece_at(Square::A2), Some(Color::White.pawn()));
        assert_eq!(board.piece_at(Square::B1), Some(Color::White.knight()));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert_eq!(board.piece_at(Square::E4), None);
    }

    #[test]
    fn test_set_piece_at() {
        let mut board = Board::new();
        board.set_piece_at(Square::A3, Color::White.pawn());
        assert_eq!(board.piece_at(Square::A3), Some(Color::White.pawn()));
        assert_eq!(board.count(Color::White.pawn()), 9);
    }

    #[test]
    fn test_king_cache() {
        let mut board = Board::new();
        assert_eq!(board.remove_piece_at(Square::E1), Some(Color::White.king()));
        assert_eq!(board.king_of(Color::White), None);
        board.set_piece_at(Square::G1, Color::White.king());
        assert_eq!(board.king_of(Color::White), Some(Square::G1));
        board.set_piece_at(Square::G1, Color::Black.queen());
        assert_eq!(board.king_of(Color::White), None);
    }

    #[test]
    fn test_board_fen() {
        assert_eq!(
            Board::new().board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(Board::empty().board_fen(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_debug() {
        let mut board = Board::empty();
        board.set_piece_at(Square::H1, Color::White.king());
        let debug = format!("{board:?}");
        assert!(debug.ends_with(". . . . . . . K\n"));
    }
}

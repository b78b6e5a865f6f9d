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

//! Castling rights in terms of rook files.
//!
//! Rights are stored per color and file of the castling rook, so that
//! Chess960 starting positions need no special treatment. Standard `KQkq`
//! tokens are resolved against the board when parsing.
//!
//! # Examples
//!
//! ```
//! use chessgrid::{Board, CastlingRights, Color, File};
//!
//! let rights = CastlingRights::resolve(&Board::new(), "KQkq")?;
//! assert!(rights.has(Color::White, File::H));
//! assert!(rights.has(Color::Black, File::A));
//! assert_eq!(rights.to_string(), "AHah");
//! # Ok::<_, chessgrid::fen::ParseFenError>(())
//! ```

use std::fmt::{self, Write as _};

use bitflags::bitflags;

use crate::{
    board::Board,
    color::Color,
    fen::ParseFenError,
    square::{File, Square},
    types::CastlingMode,
};

bitflags! {
    /// A set of castling rights, one flag per color and rook file.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct CastlingRights: u16 {
        const WHITE_A = 1 << 0;
        const WHITE_B = 1 << 1;
        const WHITE_C = 1 << 2;
        const WHITE_D = 1 << 3;
        const WHITE_E = 1 << 4;
        const WHITE_F = 1 << 5;
        const WHITE_G = 1 << 6;
        const WHITE_H = 1 << 7;
        const BLACK_A = 1 << 8;
        const BLACK_B = 1 << 9;
        const BLACK_C = 1 << 10;
        const BLACK_D = 1 << 11;
        const BLACK_E = 1 << 12;
        const BLACK_F = 1 << 13;
        const BLACK_G = 1 << 14;
        const BLACK_H = 1 << 15;

        const WHITE = 0x00ff;
        const BLACK = 0xff00;

        /// Rights of the standard starting position.
        const STANDARD = Self::WHITE_A.bits()
            | Self::WHITE_H.bits()
            | Self::BLACK_A.bits()
            | Self::BLACK_H.bits();
    }
}

impl CastlingRights {
    /// The flag for a rook of `color` on `file`.
    #[inline]
    pub const fn flag(color: Color, file: File) -> CastlingRights {
        CastlingRights::from_bits_retain(1 << (file as u16 + color.fold_wb(0, 8)))
    }

    #[inline]
    pub const fn of_color(color: Color) -> CastlingRights {
        color.fold_wb(CastlingRights::WHITE, CastlingRights::BLACK)
    }

    #[inline]
    pub fn has(self, color: Color, file: File) -> bool {
        self.contains(CastlingRights::flag(color, file))
    }

    /// Rook files with castling rights for `color`, from the a-file to the
    /// h-file.
    pub fn files(self, color: Color) -> impl DoubleEndedIterator<Item = File> {
        File::ALL
            .into_iter()
            .filter(move |&file| self.has(color, file))
    }

    /// Removes all rights of `color`, as when its king moves.
    #[inline]
    pub fn discard_color(&mut self, color: Color) {
        self.remove(CastlingRights::of_color(color));
    }

    /// Removes the right of a rook of `color` that leaves or is captured
    /// on `sq`.
    #[inline]
    pub fn discard_rook(&mut self, color: Color, sq: Square) {
        if sq.rank() == color.backrank() {
            self.remove(CastlingRights::flag(color, sq.file()));
        }
    }

    /// Resolves a FEN castling token like `KQkq`, `HAha` or `-` against the
    /// piece placement.
    ///
    /// Rights are only granted to a side whose king stands on its back rank.
    /// `K` and `Q` resolve to the corner rook if there is one, otherwise to
    /// the first rook found scanning outward from the king. File letters
    /// resolve to the rook on that file. Letters without a matching rook are
    /// silently dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError::CastlingSpec`] if the token contains
    /// characters other than `KQkq`, `A`-`H`, `a`-`h` and `-`.
    pub fn resolve(board: &Board, token: &str) -> Result<CastlingRights, ParseFenError> {
        if let Some(ch) = token
            .chars()
            .find(|ch| !matches!(ch, 'K' | 'Q' | 'k' | 'q' | 'A'..='H' | 'a'..='h' | '-'))
        {
            return Err(ParseFenError::CastlingSpec(ch));
        }

        let mut rights = CastlingRights::empty();

        for color in Color::ALL {
            let backrank = color.backrank();
            let Some(king) = board.king_of(color).filter(|king| king.rank() == backrank) else {
                continue;
            };

            let is_rook = |file: File| {
                board.piece_at(Square::from_coords(file, backrank)) == Some(color.rook())
            };

            for ch in token.chars() {
                if ch == '-' || ch.is_ascii_uppercase() != color.is_white() {
                    continue;
                }

                let file = match ch.to_ascii_lowercase() {
                    'k' => Some(File::H)
                        .filter(|&file| is_rook(file))
                        .or_else(|| {
                            File::ALL[king.file().index() + 1..]
                                .iter()
                                .copied()
                                .find(|&file| is_rook(file))
                        }),
                    'q' => Some(File::A)
                        .filter(|&file| is_rook(file))
                        .or_else(|| {
                            File::ALL[..king.file().index()]
                                .iter()
                                .rev()
                                .copied()
                                .find(|&file| is_rook(file))
                        }),
                    letter => File::from_char(letter).filter(|&file| is_rook(file)),
                };

                if let Some(file) = file {
                    rights.insert(CastlingRights::flag(color, file));
                }
            }
        }

        Ok(rights)
    }

    /// Decides whether the rights look like standard chess: only corner
    /// rooks, and the king of each side holding a right on the e-file.
    pub fn castling_mode(self, board: &Board) -> CastlingMode {
        let standard = CastlingRights::STANDARD.contains(self)
            && Color::ALL.into_iter().all(|color| {
                self.intersection(CastlingRights::of_color(color)).is_empty()
                    || board.king_of(color) == Some(Square::from_coords(File::E, color.backrank()))
            });

        CastlingMode::from_standard(standard)
    }

    /// The castling field of a FEN.
    ///
    /// In [`CastlingMode::Standard`] the rights are written as `KQkq`,
    /// otherwise as rook files like `HAha`.
    pub fn fen_token(self, mode: CastlingMode) -> String {
        let mut token = String::with_capacity(4);

        for color in Color::ALL {
            if mode.is_standard() {
                for file in self.files(color).rev() {
                    let ch = match file {
                        File::H => 'K',
                        File::A => 'Q',
                        _ => file.upper_char(),
                    };
                    token.push(color.fold_wb(ch, ch.to_ascii_lowercase()));
                }
            } else {
                for file in self.files(color) {
                    token.push(color.fold_wb(file.upper_char(), file.char()));
                }
            }
        }

        if token.is_empty() {
            token.push('-');
        }

        token
    }
}

impl fmt::Display for CastlingRights {
    /// Writes the rook files in the order `ABCDEFGHabcdefgh`, or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }

        for color in Color::ALL {
            for file in self.files(color) {
                f.write_char(color.fold_wb(file.upper_char(), file.char()))?;
            }
        }

        Ok(())
    }
}

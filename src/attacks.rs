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

//! Attack detection by walking sliders outward from the attacked square.
//!
//! # Examples
//!
//! ```
//! use chessgrid::{attacks, Board, Color, Square};
//!
//! let board = Board::new();
//! assert!(attacks::is_attacked(&board, Square::F3, Color::White));
//! assert!(!attacks::is_attacked(&board, Square::E4, Color::White));
//! ```

use crate::{
    board::Board,
    color::Color,
    deltas::{self, Slider},
    role::Role,
    square::Square,
    types::Piece,
};

/// Finds the first piece on a slider, with its distance in steps.
fn first_piece(board: &Board, sq: Square, slider: Slider) -> Option<(usize, Piece)> {
    for (steps, &(df, dr)) in slider.iter().enumerate() {
        let target = sq.offset(df, dr)?;
        if let Some(piece) = board.piece_at(target) {
            return Some((steps + 1, piece));
        }
    }
    None
}

/// Tests if `sq` is attacked by any piece of color `by`.
///
/// The square itself may be occupied by anything, including a piece of
/// color `by`.
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    for slider in deltas::ROOK {
        if let Some((steps, piece)) = first_piece(board, sq, slider) {
            if piece.color == by
                && (matches!(piece.role, Role::Rook | Role::Queen)
                    || (steps == 1 && piece.role == Role::King))
            {
                return true;
            }
        }
    }

    let pawn_rank = -by.forward();

    for slider in deltas::BISHOP {
        if let Some((steps, piece)) = first_piece(board, sq, slider) {
            if piece.color == by
                && (matches!(piece.role, Role::Bishop | Role::Queen)
                    || (steps == 1 && piece.role == Role::King)
                    || (steps == 1 && piece.role == Role::Pawn && slider[0].1 == pawn_rank))
            {
                return true;
            }
        }
    }

    deltas::KNIGHT.iter().any(|slider| {
        let (df, dr) = slider[0];
        sq.offset(df, dr)
            .is_some_and(|from| board.piece_at(from) == Some(by.knight()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(pieces: &[(Square, Piece)]) -> Board {
        let mut board = Board::empty();
        for &(sq, piece) in pieces {
            board.set_piece_at(sq, piece);
        }
        board
    }

    #[test]
    fn test_pawn_attacks_follow_direction() {
        let board = board_with(&[(Square::E4, Color::White.pawn())]);
        assert!(is_attacked(&board, Square::D5, Color::White));
        assert!(is_attacked(&board, Square::F5, Color::White));
        assert!(!is_attacked(&board, Square::D3, Color::White));
        assert!(!is_attacked(&board, Square::E5, Color::White));

        let board = board_with(&[(Square::E4, Color::Black.pawn())]);
        assert!(is_attacked(&board, Square::D3, Color::Black));
        assert!(!is_attacked(&board, Square::D5, Color::Black));
    }

    #[test]
    fn test_sliders_are_blocked() {
        let board = board_with(&[
            (Square::A1, Color::Black.rook()),
            (Square::D1, Color::White.knight()),
            (Square::H8, Color::Black.bishop()),
        ]);
        assert!(is_attacked(&board, Square::C1, Color::Black));
        assert!(is_attacked(&board, Square::D1, Color::Black));
        assert!(!is_attacked(&board, Square::E1, Color::Black));
        assert!(is_attacked(&board, Square::A1, Color::Black));
        assert!(!is_attacked(&board, Square::H7, Color::Black));
    }

    #[test]
    fn test_king_and_knight_attacks() {
        let board = board_with(&[
            (Square::E1, Color::White.king()),
            (Square::G1, Color::White.knight()),
        ]);
        assert!(is_attacked(&board, Square::E2, Color::White));
        assert!(!is_attacked(&board, Square::E3, Color::White));
        assert!(is_attacked(&board, Square::F3, Color::White));
        assert!(is_attacked(&board, Square::H3, Color::White));
        assert!(!is_attacked(&board, Square::G3, Color::White));
    }
}

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

//! Chess960 starting positions, numbered 0 to 959 in Scharnagl order.
//!
//! # Examples
//!
//! ```
//! use chessgrid::chess960;
//!
//! assert_eq!(chess960::arrangement_string(518), "RNBQKBNR");
//! assert_eq!(
//!     chess960::fen(0),
//!     "bbqnnrkr/pppppppp/8/8/8/8/PPPPPPPP/BBQNNRKR w FHfh - 0 1"
//! );
//! ```

use std::num::NonZeroU32;

use crate::{
    board::Board,
    castling::CastlingRights,
    color::Color,
    position::Position,
    role::Role,
    square::File,
};

/// Number of distinct starting positions.
pub const COUNT: u32 = 960;

const FIRST_KNIGHT: [usize; 10] = [0, 0, 0, 0, 1, 1, 1, 2, 2, 3];
const SECOND_KNIGHT: [usize; 10] = [0, 1, 2, 3, 1, 2, 3, 2, 3, 3];

/// Gets the back rank arrangement of starting position `n`, from the
/// a-file to the h-file.
///
/// Any `n` is accepted. Negative numbers count like their absolute value,
/// and everything is taken modulo 960.
pub fn arrangement(n: i64) -> [Role; 8] {
    let n = (n.unsigned_abs() % u64::from(COUNT)) as usize;

    let mut slots: [Option<Role>; 8] = [None; 8];

    slots[(n / 4 % 4) * 2] = Some(Role::Bishop);
    slots[(n % 4) * 2 + 1] = Some(Role::Bishop);

    insert(&mut slots, n / 16 % 6, Role::Queen);
    insert(&mut slots, FIRST_KNIGHT[n / 96], Role::Knight);
    insert(&mut slots, SECOND_KNIGHT[n / 96], Role::Knight);

    for role in [Role::Rook, Role::King, Role::Rook] {
        insert(&mut slots, 0, role);
    }

    slots.map(|slot| slot.unwrap_or(Role::Pawn))
}

/// Puts `role` into the empty slot with the given index, counting only
/// empty slots.
fn insert(slots: &mut [Option<Role>; 8], index: usize, role: Role) {
    if let Some(slot) = slots.iter_mut().filter(|slot| slot.is_none()).nth(index) {
        *slot = Some(role);
    }
}

/// The arrangement of starting position `n` as uppercase letters, like
/// `RNBQKBNR`.
pub fn arrangement_string(n: i64) -> String {
    arrangement(n).iter().map(|role| role.upper_char()).collect()
}

/// The FEN of starting position `n`, with both rooks' castling rights.
pub fn fen(n: i64) -> String {
    position(n).fen()
}

/// Starting position `n`.
pub fn position(n: i64) -> Position {
    let roles = arrangement(n);
    let board = Board::from_back_rank(roles);

    let mut castles = CastlingRights::empty();
    for (file, role) in File::ALL.into_iter().zip(roles) {
        if role == Role::Rook {
            for color in Color::ALL {
                castles.insert(CastlingRights::flag(color, file));
            }
        }
    }

    Position::from_parts(board, Color::White, castles, 0, NonZeroU32::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn is_castleable(roles: &[Role; 8]) -> bool {
        let mut order = roles
            .iter()
            .filter(|role| matches!(role, Role::Rook | Role::King));
        matches!(
            (order.next(), order.next(), order.next()),
            (Some(Role::Rook), Some(Role::King), Some(Role::Rook))
        )
    }

    #[test]
    fn test_known_arrangements() {
        assert_eq!(arrangement_string(0), "BBQNNRKR");
        assert_eq!(arrangement_string(518), "RNBQKBNR");
        assert_eq!(arrangement_string(959), "RKRNNQBB");
        assert_eq!(arrangement_string(-518), "RNBQKBNR");
        assert_eq!(arrangement_string(960 + 518), "RNBQKBNR");
    }

    #[test]
    fn test_all_arrangements_are_valid() {
        let mut seen = std::collections::HashSet::new();

        for n in 0..i64::from(COUNT) {
            let roles = arrangement(n);
            let count = |role: Role| roles.iter().filter(|r| **r == role).count();
            assert_eq!(count(Role::Bishop), 2, "{n}");
            assert_eq!(count(Role::Knight), 2, "{n}");
            assert_eq!(count(Role::Rook), 2, "{n}");
            assert_eq!(count(Role::Queen), 1, "{n}");
            assert_eq!(count(Role::King), 1, "{n}");

            let bishops: Vec<Square> = File::ALL
                .into_iter()
                .zip(roles)
                .filter(|(_, role)| *role == Role::Bishop)
                .map(|(file, _)| Square::from_coords(file, Color::White.backrank()))
                .collect();
            assert_ne!(bishops[0].is_light(), bishops[1].is_light(), "{n}");

            assert!(is_castleable(&roles), "{n}");
            assert!(seen.insert(roles), "{n}");
        }
    }

    #[test]
    fn test_fen() {
        assert_eq!(
            fen(518),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah - 0 1"
        );
        assert_eq!(
            fen(959),
            "rkrnnqbb/pppppppp/8/8/8/8/PPPPPPPP/RKRNNQBB w ACac - 0 1"
        );
    }

    #[test]
    fn test_position() {
        let pos = position(518);
        assert_eq!(pos, Position::new());

        for n in [0, 1, 100, 959] {
            let pos = position(n);
            assert_eq!(pos.fen().parse::<Position>(), Ok(pos.clone()), "{n}");
            assert_eq!(pos.movegen().len(), pos.nice_movegen().len());
        }
    }
}

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

//! Movement offsets for each piece type, grouped into sliders.
//!
//! A slider is an ordered list of `(file, rank)` offsets from an origin
//! square. Walking a slider stops at the first offset that leaves the board
//! or runs into a piece, so no later offset needs to be tried.
//!
//! # Examples
//!
//! ```
//! use chessgrid::{deltas, Color};
//!
//! assert_eq!(deltas::sliders(Color::White.rook()).len(), 4);
//! assert_eq!(deltas::sliders(Color::Black.queen()).len(), 8);
//! assert!(deltas::sliders(Color::White.king()).is_empty());
//! ```

use crate::{
    color::ByColor,
    role::Role,
    types::Piece,
};

/// Offset of `(files, ranks)`.
pub type Delta = (i8, i8);

/// Ordered offsets from a square, walked until blocked.
pub type Slider = &'static [Delta];

const fn ray(step: Delta) -> [Delta; 7] {
    let mut ray = [(0, 0); 7];
    let mut i = 0;
    while i < 7 {
        let n = i as i8 + 1;
        ray[i] = (step.0 * n, step.1 * n);
        i += 1;
    }
    ray
}

const NORTH: [Delta; 7] = ray((0, 1));
const EAST: [Delta; 7] = ray((1, 0));
const SOUTH: [Delta; 7] = ray((0, -1));
const WEST: [Delta; 7] = ray((-1, 0));
const NORTH_EAST: [Delta; 7] = ray((1, 1));
const SOUTH_EAST: [Delta; 7] = ray((1, -1));
const SOUTH_WEST: [Delta; 7] = ray((-1, -1));
const NORTH_WEST: [Delta; 7] = ray((-1, 1));

/// Sliders along ranks and files.
pub static ROOK: [Slider; 4] = [&NORTH, &EAST, &SOUTH, &WEST];

/// Sliders along diagonals.
pub static BISHOP: [Slider; 4] = [&NORTH_EAST, &SOUTH_EAST, &SOUTH_WEST, &NORTH_WEST];

pub static QUEEN: [Slider; 8] = [
    &NORTH_EAST,
    &SOUTH_EAST,
    &SOUTH_WEST,
    &NORTH_WEST,
    &NORTH,
    &EAST,
    &SOUTH,
    &WEST,
];

pub static KNIGHT: [Slider; 8] = [
    &[(1, 2)],
    &[(-2, 1)],
    &[(-1, -2)],
    &[(2, -1)],
    &[(-1, 2)],
    &[(2, 1)],
    &[(1, -2)],
    &[(-2, -1)],
];

/// Pawn sliders: the push first, then both captures.
///
/// The second push step is only available from the pawn's starting rank,
/// which the move generator checks.
pub static PAWN: ByColor<[Slider; 3]> = ByColor {
    white: [&[(0, 1), (0, 2)], &[(-1, 1)], &[(1, 1)]],
    black: [&[(0, -1), (0, -2)], &[(-1, -1)], &[(1, -1)]],
};

/// Unit steps of the king. Castling is not part of any table.
pub static KING: [Delta; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Gets the sliders of a piece. Kings have none.
pub fn sliders(piece: Piece) -> &'static [Slider] {
    match piece.role {
        Role::Pawn => PAWN.get(piece.color),
        Role::Knight => &KNIGHT,
        Role::Bishop => &BISHOP,
        Role::Rook => &ROOK,
        Role::Queen => &QUEEN,
        Role::King => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rays_run_to_the_edge() {
        for slider in QUEEN {
            assert_eq!(slider.len(), 7);
            let (df, dr) = slider[0];
            assert_eq!(slider[6], (df * 7, dr * 7));
        }
    }

    #[test]
    fn test_knight_offsets_are_distinct() {
        let mut offsets: Vec<Delta> = KNIGHT.iter().map(|slider| slider[0]).collect();
        offsets.sort_unstable();
        offsets.dedup();
        assert_eq!(offsets.len(), 8);
        assert!(offsets
            .iter()
            .all(|(df, dr)| df.abs() + dr.abs() == 3 && *df != 0 && *dr != 0));
    }

    #[test]
    fn test_pawn_directions() {
        assert_eq!(PAWN.white[0], &[(0, 1), (0, 2)]);
        assert_eq!(PAWN.black[2], &[(1, -1)]);
    }
}

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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use chessgrid::{perft, Position};
//!
//! let pos = Position::new();
//! assert_eq!(perft(&pos, 1), 20);
//! assert_eq!(perft(&pos, 2), 400);
//! assert_eq!(perft(&pos, 3), 8902);
//! ```

use std::{num::NonZeroUsize, panic};

use crossbeam::channel;

use crate::{m::Move, position::Position};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness and performance.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.movegen();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .iter()
                .map(|m| perft(&pos.play_unchecked(m), depth - 1))
                .sum()
        }
    }
}

/// Perft of a root move, as reported by [`divide()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DivideEntry {
    pub m: Move,
    /// The move as rendered by [`Position::nice_string()`].
    pub nice: String,
    pub nodes: u64,
}

/// Like [`perft()`], but also reports the perft of each child for
/// debugging, in move generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<DivideEntry> {
    if depth < 1 {
        return Vec::new();
    }

    pos.movegen()
        .iter()
        .map(|m| {
            let nodes = perft(&pos.play_unchecked(m), depth - 1);
            let nice = pos.nice_string(m);
            tracing::info!(uci = %m, %nice, nodes, "divide");
            DivideEntry { m: *m, nice, nodes }
        })
        .collect()
}

/// Like [`perft()`], but distributes the root moves over a fixed number of
/// worker threads.
pub fn parallel_perft(pos: &Position, depth: u32, threads: NonZeroUsize) -> u64 {
    if depth <= 1 {
        return perft(pos, depth);
    }

    let moves = pos.movegen();
    let (tx, rx) = channel::bounded::<Move>(threads.get());

    let result = crossbeam::scope(|scope| {
        let workers: Vec<_> = (0..threads.get())
            .map(|_| {
                let rx = rx.clone();
                scope.spawn(move |_| {
                    rx.iter()
                        .map(|m| perft(&pos.play_unchecked(&m), depth - 1))
                        .sum::<u64>()
                })
            })
            .collect();
        drop(rx);

        for m in moves {
            if tx.send(m).is_err() {
                break;
            }
        }
        drop(tx);

        workers
            .into_iter()
            .map(|worker| worker.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .sum::<u64>()
    });

    let nodes = result.unwrap_or_else(|err| panic::resume_unwind(err));
    tracing::info!(depth, threads = threads.get(), nodes, "parallel perft");
    nodes
}

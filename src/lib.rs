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

//! Mailbox chess positions with legal move generation, for standard chess
//! and Chess960.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chessgrid::Position;
//!
//! let pos = Position::new();
//! assert_eq!(pos.movegen().len(), 20);
//! ```
//!
//! Play moves, given in UCI notation with castling as the king moving onto
//! its own rook:
//!
//! ```
//! use chessgrid::Position;
//!
//! let pos = Position::new().play_sequence(&["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"])?;
//! assert_eq!(pos.illegal("e1h1"), None);
//! assert_eq!(pos.nice_movegen().iter().filter(|m| *m == "O-O").count(), 1);
//! # Ok::<_, chessgrid::IllegalMoveError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use chessgrid::Position;
//!
//! let pos = Position::new();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert!(!pos.insufficient_material());
//! ```
//!
//! Also supports [FEN](fen), [SAN](san), [UCI](uci) and
//! [Chess960](chess960) starting positions.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//!
//! # Logging
//!
//! Diagnostics are emitted as [`tracing`](https://docs.rs/tracing) events.
//! The library never installs a subscriber.

#![warn(missing_debug_implementations)]

mod castling_side;
mod color;
mod m;
mod perft;
mod position;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod castling;
pub mod chess960;
pub mod deltas;
pub mod fen;
pub mod san;
pub mod uci;

pub use board::Board;
pub use castling::CastlingRights;
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
pub use m::{Move, MoveList};
pub use perft::{divide, parallel_perft, perft, DivideEntry};
pub use position::{IllegalMoveError, IllegalReason, Position};
pub use role::Role;
pub use square::{File, ParseSquareError, Rank, Square};
pub use types::{CastlingMode, Piece};

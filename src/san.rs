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

//! Read and write Standard Algebraic Notation.
//!
//! # Examples
//!
//! Writing moves for display:
//!
//! ```
//! use chessgrid::{Move, Position, Square};
//!
//! let pos = Position::new();
//! assert_eq!(pos.nice_string(&Move::new(Square::G1, Square::F3)), "Nf3");
//! assert_eq!(pos.nice_string(&Move::new(Square::E4, Square::E5)), "??");
//! ```
//!
//! Reading moves as found in PGN files, which are often sloppy:
//!
//! ```
//! use chessgrid::{Move, Position, Square};
//!
//! let pos = Position::new();
//! assert_eq!(pos.parse_san("1.Nf3!?")?, Move::new(Square::G1, Square::F3));
//! assert_eq!(pos.parse_san("e2-e4")?, Move::new(Square::E2, Square::E4));
//! # Ok::<_, chessgrid::san::SanError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    castling_side::CastlingSide,
    m::{Move, MoveList},
    position::Position,
    role::Role,
    square::{File, Rank, Square},
};

/// Error when parsing a syntactially invalid SAN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSanError;

impl fmt::Display for ParseSanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid san")
    }
}

impl Error for ParseSanError {}

/// `IllegalSan` or `AmbiguousSan`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SanError {
    /// Standard algebraic notation does not match a legal move.
    IllegalSan,
    /// Standard algebraic notation matches multiple legal moves.
    AmbiguousSan,
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            SanError::IllegalSan => "illegal san",
            SanError::AmbiguousSan => "ambiguous san",
        })
    }
}

impl Error for SanError {}

/// A move in Standard Algebraic Notation.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum San {
    Normal {
        role: Role,
        file: Option<File>,
        rank: Option<Rank>,
        capture: bool,
        to: Square,
        promotion: Option<Role>,
    },
    Castle(CastlingSide),
}

impl San {
    /// Parses a SAN. Ignores a possible check or checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(mut san: &[u8]) -> Result<San, ParseSanError> {
        if san.ends_with(b"#") || san.ends_with(b"+") {
            san = &san[0..(san.len() - 1)];
        }

        if san == b"O-O" {
            return Ok(San::Castle(CastlingSide::KingSide));
        } else if san == b"O-O-O" {
            return Ok(San::Castle(CastlingSide::QueenSide));
        }

        let mut chars = san.iter().copied();

        let ch = chars.next().ok_or(ParseSanError)?;
        let (role, next) = if ch.is_ascii_uppercase() {
            (
                Role::from_char(char::from(ch)).ok_or(ParseSanError)?,
                chars.next().ok_or(ParseSanError)?,
            )
        } else {
            (Role::Pawn, ch)
        };

        let (file, next) = if let Some(file) = File::from_char(char::from(next)) {
            (Some(file), chars.next().ok_or(ParseSanError)?)
        } else {
            (None, next)
        };

        let (rank, next) = if let Some(rank) = Rank::from_char(char::from(next)) {
            (Some(rank), chars.next())
        } else {
            (None, Some(next))
        };

        let (capture, file, rank, to, next) = match next {
            Some(b'x') => {
                let to = target(&mut chars)?;
                (true, file, rank, to, chars.next())
            }
            Some(b'=') => {
                let to =
                    Square::from_coords(file.ok_or(ParseSanError)?, rank.ok_or(ParseSanError)?);
                (false, None, None, to, Some(b'='))
            }
            Some(next) => {
                let to_file = File::from_char(char::from(next)).ok_or(ParseSanError)?;
                let to_rank = chars
                    .next()
                    .and_then(|ch| Rank::from_char(char::from(ch)))
                    .ok_or(ParseSanError)?;
                (
                    false,
                    file,
                    rank,
                    Square::from_coords(to_file, to_rank),
                    chars.next(),
                )
            }
            None => {
                let to =
                    Square::from_coords(file.ok_or(ParseSanError)?, rank.ok_or(ParseSanError)?);
                (false, None, None, to, None)
            }
        };

        let promotion = match next {
            Some(b'=') => Some(
                chars
                    .next()
                    .and_then(|r| Role::from_char(char::from(r)))
                    .ok_or(ParseSanError)?,
            ),
            Some(_) => return Err(ParseSanError),
            None => None,
        };

        if chars.next().is_some() {
            return Err(ParseSanError);
        }

        Ok(San::Normal {
            role,
            file,
            rank,
            capture,
            to,
            promotion,
        })
    }

    /// Parses sloppy notation as found in the wild: move numbers like `12.`
    /// or `12...`, annotations like `!?`, capture and check markers, `0-0`
    /// for castling, dashes between squares, and promotions without `=`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if nothing resembling a move is left after
    /// cleaning up.
    pub fn from_ascii_lenient(san: &[u8]) -> Result<San, ParseSanError> {
        let san = match san.iter().rposition(|&ch| ch == b'.') {
            Some(dot) => &san[dot + 1..],
            None => san,
        };

        let mut cleaned: Vec<u8> = san
            .iter()
            .copied()
            .filter(|ch| !matches!(ch, b'x' | b'+' | b'#' | b'!' | b'?'))
            .map(|ch| if ch == b'0' { b'O' } else { ch })
            .collect();

        if cleaned.eq_ignore_ascii_case(b"O-O") {
            return Ok(San::Castle(CastlingSide::KingSide));
        } else if cleaned.eq_ignore_ascii_case(b"O-O-O") {
            return Ok(San::Castle(CastlingSide::QueenSide));
        }

        cleaned.retain(|&ch| ch != b'-');

        match cleaned.as_slice() {
            [.., b'=', promotion] => {
                let promotion = promotion.to_ascii_uppercase();
                cleaned.truncate(cleaned.len() - 1);
                cleaned.push(promotion);
            }
            [.., promotion @ (b'Q' | b'R' | b'B' | b'N' | b'q' | b'r' | b'b' | b'n')]
                if cleaned.len() > 2 =>
            {
                let promotion = promotion.to_ascii_uppercase();
                cleaned.truncate(cleaned.len() - 1);
                cleaned.extend([b'=', promotion]);
            }
            _ => (),
        }

        San::from_ascii(&cleaned)
    }

    /// Converts a move to Standard Algebraic Notation, disambiguated
    /// against the legal moves of `pos`.
    ///
    /// If three or more pieces of the same kind can reach the target square,
    /// the full origin square is given. If exactly two can, the origin file
    /// is given, or the rank if both share the same file.
    pub fn from_move(pos: &Position, m: &Move) -> San {
        San::disambiguate(pos, m, &pos.movegen())
    }

    fn disambiguate(pos: &Position, m: &Move, moves: &MoveList) -> San {
        let board = pos.board();
        let Some(piece) = board.piece_at(m.from) else {
            return San::Normal {
                role: Role::Pawn,
                file: None,
                rank: None,
                capture: false,
                to: m.to,
                promotion: m.promotion,
            };
        };

        if piece.role == Role::King && board.color_at(m.to) == Some(piece.color) {
            return San::Castle(CastlingSide::of_rook(m.from, m.to));
        }

        if piece.role == Role::Pawn {
            let capture = m.from.file() != m.to.file();
            return San::Normal {
                role: Role::Pawn,
                file: capture.then(|| m.from.file()),
                rank: None,
                capture,
                to: m.to,
                promotion: m.promotion,
            };
        }

        let mut sources = moves
            .iter()
            .filter(|c| c.to == m.to && board.piece_at(c.from) == Some(piece))
            .map(|c| c.from);

        let (file, rank) = match (sources.next(), sources.next(), sources.next()) {
            (Some(_), Some(_), Some(_)) => (true, true),
            (Some(a), Some(b), None) if a.file() == b.file() => (false, true),
            (Some(_), Some(_), None) => (true, false),
            _ => (false, false),
        };

        San::Normal {
            role: piece.role,
            file: file.then(|| m.from.file()),
            rank: rank.then(|| m.from.rank()),
            capture: board.is_occupied(m.to),
            to: m.to,
            promotion: None,
        }
    }

    /// Tries to convert the `San` to a legal move in the context of a
    /// position.
    ///
    /// The capture marker is not checked. A pawn move without origin file
    /// or rank is only matched against pushes on the target file.
    ///
    /// # Errors
    ///
    /// Returns [`SanError`] if there is no unique matching legal move.
    pub fn to_move(&self, pos: &Position) -> Result<Move, SanError> {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                to,
                promotion,
                ..
            } => {
                let board = pos.board();
                let mut legals = pos.movegen();
                legals.retain(|m| {
                    m.to == to
                        && board.role_at(m.from) == Some(role)
                        && pos.castling_side(m).is_none()
                        && m.promotion == promotion
                        && match (file, rank) {
                            (None, None) if role == Role::Pawn => m.from.file() == to.file(),
                            _ => {
                                file.map_or(true, |f| f == m.from.file())
                                    && rank.map_or(true, |r| r == m.from.rank())
                            }
                        }
                });
                match legals.as_slice() {
                    [] => Err(SanError::IllegalSan),
                    [m] => Ok(*m),
                    _ => Err(SanError::AmbiguousSan),
                }
            }
            San::Castle(side) => pos.castling_move(side).ok_or(SanError::IllegalSan),
        }
    }
}

fn target(chars: &mut impl Iterator<Item = u8>) -> Result<Square, ParseSanError> {
    let file = chars
        .next()
        .and_then(|ch| File::from_char(char::from(ch)))
        .ok_or(ParseSanError)?;
    let rank = chars
        .next()
        .and_then(|ch| Rank::from_char(char::from(ch)))
        .ok_or(ParseSanError)?;
    Ok(Square::from_coords(file, rank))
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<San, ParseSanError> {
        San::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for San {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            San::Normal {
                role,
                file,
                rank,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    write!(f, "{}", role.upper_char())?;
                }
                if let Some(file) = file {
                    write!(f, "{}", file.char())?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank.char())?;
                }
                if capture {
                    write!(f, "x")?;
                }
                write!(f, "{to}")?;
                if let Some(promotion) = promotion {
                    write!(f, "={}", promotion.upper_char())?;
                }
                Ok(())
            }
            San::Castle(side) => f.write_str(side.san()),
        }
    }
}

/// Check (`+`) or checkmate (`#`) suffix.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Suffix {
    Check,
    Checkmate,
}

impl Suffix {
    pub const fn char(self) -> char {
        match self {
            Suffix::Check => '+',
            Suffix::Checkmate => '#',
        }
    }

    pub const fn from_char(ch: char) -> Option<Suffix> {
        match ch {
            '+' => Some(Suffix::Check),
            '#' => Some(Suffix::Checkmate),
            _ => None,
        }
    }

    pub fn from_position(pos: &Position) -> Option<Suffix> {
        if !pos.is_check() {
            None
        } else if pos.no_moves() {
            Some(Suffix::Checkmate)
        } else {
            Some(Suffix::Check)
        }
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A [`San`] and possible check and checkmate suffixes.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct SanPlus {
    pub san: San,
    pub suffix: Option<Suffix>,
}

impl SanPlus {
    /// Parses a SAN and possible check and checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSanError`] if `san` is not syntactically valid.
    pub fn from_ascii(san: &[u8]) -> Result<SanPlus, ParseSanError> {
        San::from_ascii(san).map(|result| SanPlus {
            san: result,
            suffix: san
                .last()
                .copied()
                .and_then(|ch| Suffix::from_char(char::from(ch))),
        })
    }

    /// Converts a move to Standard Algebraic Notation including possible
    /// check and checkmate suffixes. The suffix is only determined for
    /// legal moves.
    pub fn from_move(pos: &Position, m: &Move) -> SanPlus {
        let moves = pos.movegen();
        SanPlus {
            san: San::disambiguate(pos, m, &moves),
            suffix: if moves.contains(m) {
                Suffix::from_position(&pos.play_unchecked(m))
            } else {
                None
            },
        }
    }
}

impl FromStr for SanPlus {
    type Err = ParseSanError;

    fn from_str(san: &str) -> Result<SanPlus, ParseSanError> {
        SanPlus::from_ascii(san.as_bytes())
    }
}

impl fmt::Display for SanPlus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.san)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl Position {
    /// Renders a move for humans, like `Nbd2`, `exd6`, `e8=Q+` or `O-O#`.
    ///
    /// Returns `??` if there is no piece on the origin square.
    pub fn nice_string(&self, m: &Move) -> String {
        if self.board().is_occupied(m.from) {
            SanPlus::from_move(self, m).to_string()
        } else {
            "??".to_owned()
        }
    }

    /// All legal moves, rendered with [`nice_string()`](Position::nice_string).
    pub fn nice_movegen(&self) -> Vec<String> {
        self.movegen()
            .iter()
            .map(|m| self.nice_string(m))
            .collect()
    }

    /// Finds the legal move described by sloppy algebraic notation.
    ///
    /// # Errors
    ///
    /// Returns [`SanError::IllegalSan`] if the text does not describe a
    /// legal move, or [`SanError::AmbiguousSan`] if it matches several.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        San::from_ascii_lenient(san.as_bytes())
            .map_err(|_| SanError::IllegalSan)?
            .to_move(self)
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    fn setup_fen(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_size() {
        assert!(mem::size_of::<San>() <= 8);
        assert!(mem::size_of::<SanPlus>() <= 8);
    }

    #[test]
    fn test_read_write() {
        for san in &[
            "a1", "a8", "h1", "h8", "e4", "b6", "e4=Q", "f1=N#", "hxg7", "bxc1", "axe4", "bxc1+",
            "bxa8=R+", "Nf3", "Ba5", "Qh8", "Kh1", "Ba5", "Bba5", "N2c4", "Red3", "d1=N", "Ra1a8",
            "O-O", "O-O-O+",
        ] {
            let result = san.parse::<SanPlus>().expect("valid san").to_string();
            assert_eq!(*san, result, "read {} write {}", san, result);
        }
    }

    #[test]
    fn test_invalid() {
        for san in ["", "N", "Nf", "e9", "Nf3x", "e8=", "e4e5e6", "Xe4"] {
            assert_eq!(san.parse::<San>(), Err(ParseSanError), "{san}");
        }
    }

    #[test]
    fn test_nice_string() {
        let pos = Position::new();
        assert_eq!(pos.nice_string(&Move::new(Square::E2, Square::E4)), "e4");
        assert_eq!(pos.nice_string(&Move::new(Square::B1, Square::C3)), "Nc3");

        let pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(pos.nice_string(&Move::new(Square::E1, Square::H1)), "O-O");
        assert_eq!(pos.nice_string(&Move::new(Square::E1, Square::A1)), "O-O-O");
        assert_eq!(pos.nice_string(&Move::new(Square::A1, Square::A8)), "Rxa8+");
    }

    #[test]
    fn test_nice_string_disambiguation() {
        // Two knights reach d2 from different files.
        let pos = setup_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(pos.nice_string(&Move::new(Square::B1, Square::D2)), "Nbd2");

        // Two rooks on the same file.
        let pos = setup_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(pos.nice_string(&Move::new(Square::A1, Square::A3)), "R1a3");

        // Three queens reach e5 along a rank, a file and a diagonal.
        let pos = setup_fen("8/1k6/8/Q7/8/8/7K/Q3Q3 w - - 0 1");
        assert_eq!(pos.nice_string(&Move::new(Square::A5, Square::E5)), "Qa5e5");
        assert_eq!(pos.nice_string(&Move::new(Square::A1, Square::E5)), "Qa1e5");
        assert_eq!(pos.nice_string(&Move::new(Square::E1, Square::E5)), "Qe1e5");
        assert_eq!(pos.parse_san("Qa1e5"), Ok(Move::new(Square::A1, Square::E5)));

        // Only one of them reaches e5.
        let pos = setup_fen("4k3/8/8/Q7/8/8/Q3K3/7Q w - - 0 1");
        assert_eq!(pos.nice_string(&Move::new(Square::A5, Square::E5)), "Qe5+");
    }

    #[test]
    fn test_nice_string_pawns() {
        let pos = setup_fen("3r3k/2P5/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(pos.nice_string(&Move::new(Square::E5, Square::D6)), "exd6");
        assert_eq!(
            pos.nice_string(&Move::new(Square::C7, Square::D8).with_promotion(Role::Queen)),
            "cxd8=Q+"
        );
        assert_eq!(
            pos.nice_string(&Move::new(Square::C7, Square::C8).with_promotion(Role::Knight)),
            "c8=N"
        );
    }

    #[test]
    fn test_nice_string_mate() {
        let pos = Position::new()
            .play_sequence(&["f2f3", "e7e5", "g2g4"])
            .expect("legal moves");
        assert_eq!(pos.nice_string(&Move::new(Square::D8, Square::H4)), "Qh4#");
        assert_eq!(pos.nice_string(&Move::new(Square::A3, Square::A4)), "??");
    }

    #[test]
    fn test_nice_movegen() {
        let moves = Position::new().nice_movegen();
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&"Na3".to_owned()));
        assert!(moves.contains(&"h4".to_owned()));
    }

    #[test]
    fn test_parse_san_lenient() {
        let pos = Position::new();
        for (san, uci) in [
            ("e4", "e2e4"),
            ("1.e4", "e2e4"),
            ("Pe4", "e2e4"),
            ("e2-e4", "e2e4"),
            ("Nf3!!", "g1f3"),
            ("Ng1f3", "g1f3"),
            ("Ngf3", "g1f3"),
        ] {
            assert_eq!(pos.parse_san(san).map(|m| m.to_string()).as_deref(), Ok(uci), "{san}");
        }

        assert_eq!(pos.parse_san("Nd2"), Err(SanError::IllegalSan));
        assert_eq!(pos.parse_san("Ke2"), Err(SanError::IllegalSan));
        assert_eq!(pos.parse_san("garbage"), Err(SanError::IllegalSan));
        assert_eq!(pos.parse_san(""), Err(SanError::IllegalSan));
    }

    #[test]
    fn test_parse_san_castling() {
        let pos = setup_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        assert_eq!(pos.parse_san("12...O-O"), Ok(Move::new(Square::E8, Square::H8)));
        assert_eq!(pos.parse_san("0-0-0"), Ok(Move::new(Square::E8, Square::A8)));
        assert_eq!(pos.parse_san("o-o+"), Ok(Move::new(Square::E8, Square::H8)));
        // The king moving onto the rook is not a normal move.
        assert_eq!(pos.parse_san("Kh8"), Err(SanError::IllegalSan));
        assert_eq!(Position::new().parse_san("O-O"), Err(SanError::IllegalSan));
    }

    #[test]
    fn test_parse_san_ambiguous() {
        let pos = setup_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(pos.parse_san("Nd2"), Err(SanError::AmbiguousSan));
        assert_eq!(pos.parse_san("Nbd2"), Ok(Move::new(Square::B1, Square::D2)));
        assert_eq!(pos.parse_san("Nfxd2"), Ok(Move::new(Square::F1, Square::D2)));
    }

    #[test]
    fn test_parse_san_pawns() {
        // A pawn move without origin file is a push, never a capture.
        let pos = setup_fen("4k3/8/5p2/4P3/8/8/8/4K3 w - - 0 1");
        assert_eq!(pos.parse_san("f6"), Err(SanError::IllegalSan));
        assert_eq!(pos.parse_san("exf6"), Ok(Move::new(Square::E5, Square::F6)));
        assert_eq!(pos.parse_san("ef6"), Ok(Move::new(Square::E5, Square::F6)));

        let pos = setup_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        let promotion = Move::new(Square::B7, Square::B8).with_promotion(Role::Queen);
        assert_eq!(pos.parse_san("b8=Q"), Ok(promotion));
        assert_eq!(pos.parse_san("b8Q"), Ok(promotion));
        assert_eq!(pos.parse_san("b8=q+"), Ok(promotion));
        assert_eq!(pos.parse_san("b8"), Err(SanError::IllegalSan));
    }

    #[test]
    fn test_nice_string_parses_back() {
        let pos = setup_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        for m in pos.movegen() {
            let nice = pos.nice_string(&m);
            assert_eq!(pos.parse_san(&nice), Ok(m), "{nice}");
        }
    }
}

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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! Castling rights are always written as rook files (`AHah`), which works
//! for Chess960 and standard chess alike. Use
//! [`Position::friendly_fen()`] for the traditional `KQkq` form.
//!
//! # Examples
//!
//! ```
//! use chessgrid::{Position, Square};
//!
//! let pos: Position = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".parse()?;
//! assert_eq!(pos.board().piece_at(Square::E4), Some(chessgrid::Color::White.pawn()));
//! assert_eq!(pos.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b AHah - 0 1");
//! assert_eq!(pos.friendly_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1");
//! # Ok::<_, chessgrid::fen::ParseFenError>(())
//! ```
//!
//! Missing trailing fields are filled in with defaults:
//!
//! ```
//! use chessgrid::Position;
//!
//! let pos: Position = "4k3/8/8/8/8/8/8/4K2R".parse()?;
//! assert_eq!(pos.fen(), "4k3/8/8/8/8/8/8/4K2R w - - 0 1");
//! # Ok::<_, chessgrid::fen::ParseFenError>(())
//! ```

use std::{error::Error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::Board,
    castling::CastlingRights,
    color::Color,
    position::Position,
    role::Role,
    square::{File, Rank, Square},
    types::Piece,
};

/// Longest accepted FEN, in bytes.
const MAX_FEN_LEN: usize = 200;

/// Error when parsing an invalid or illegal FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    /// More than 200 bytes of input.
    TooLong,
    /// No fields, or more than 6.
    TokenCount,
    /// The board field does not have exactly 8 rows.
    RowCount,
    /// A row does not describe exactly 8 squares.
    RowLength,
    /// Unrecognized character in the board field.
    UnknownPiece(char),
    /// A pawn on the first or eighth rank.
    PawnOnBackRank,
    /// The active color is neither `w` nor `b`.
    ActiveColor,
    /// Not exactly one king of this color.
    KingCount(Color),
    /// More pawns and pieces of this color than promotions could produce:
    /// over 16 in total, over 8 pawns, or more promoted pieces than
    /// missing pawns.
    TooMuchMaterial(Color),
    /// Unrecognized character in the castling field.
    CastlingSpec(char),
    /// Halfmove clock or move number is not a valid number.
    NumericField,
    /// The side not to move is in check.
    CheckConstraint,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseFenError::TooLong => f.write_str("invalid fen: too long"),
            ParseFenError::TokenCount => f.write_str("invalid fen: token count"),
            ParseFenError::RowCount => f.write_str("invalid fen: board row count"),
            ParseFenError::RowLength => f.write_str("invalid fen: row length"),
            ParseFenError::UnknownPiece(ch) => write!(f, "invalid fen: unknown piece {ch:?}"),
            ParseFenError::PawnOnBackRank => f.write_str("invalid fen: pawn on back rank"),
            ParseFenError::ActiveColor => f.write_str("invalid fen: active player"),
            ParseFenError::KingCount(color) => write!(f, "invalid fen: number of {color} kings"),
            ParseFenError::TooMuchMaterial(color) => {
                write!(f, "invalid fen: too much {color} material")
            }
            ParseFenError::CastlingSpec(ch) => {
                write!(f, "invalid fen: castling character {ch:?}")
            }
            ParseFenError::NumericField => f.write_str("invalid fen: halfmoves or fullmoves"),
            ParseFenError::CheckConstraint => f.write_str("invalid fen: non-mover's king in check"),
        }
    }
}

impl Error for ParseFenError {}

impl Board {
    /// Parses the board part of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`. A single trailing `/`
    /// is tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the row structure is invalid, a character
    /// is not recognized, or a pawn stands on a back rank.
    pub fn from_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
        let board_fen = board_fen.strip_suffix(b"/").unwrap_or(board_fen);

        let rows: Vec<&[u8]> = board_fen.split(|&ch| ch == b'/').collect();
        if rows.len() != 8 {
            return Err(ParseFenError::RowCount);
        }

        let mut board = Board::empty();

        for (row, rank) in rows.into_iter().zip(Rank::ALL.into_iter().rev()) {
            let mut file = 0u8;

            for (i, &ch) in row.iter().enumerate() {
                if file >= 8 {
                    return Err(ParseFenError::RowLength);
                }

                if (b'1'..=b'8').contains(&ch) {
                    file += ch - b'0';
                    continue;
                }

                let piece = Piece::from_char(char::from(ch))
                    .ok_or_else(|| ParseFenError::UnknownPiece(decode_char(&row[i..])))?;
                if piece.role == Role::Pawn && (rank == Rank::First || rank == Rank::Eighth) {
                    return Err(ParseFenError::PawnOnBackRank);
                }

                let sq = Square::from_coords(File::new(file).ok_or(ParseFenError::RowLength)?, rank);
                board.set_piece_at(sq, piece);
                file += 1;
            }

            if file != 8 {
                return Err(ParseFenError::RowLength);
            }
        }

        Ok(board)
    }
}

/// The first character of `bytes`, which may be a multi-byte UTF-8
/// sequence.
fn decode_char(bytes: &[u8]) -> char {
    String::from_utf8_lossy(&bytes[..bytes.len().min(4)])
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Tests if the material of `color` fits into a standard set of 16, where
/// every piece beyond the initial set must be a promoted pawn.
fn is_promotable_material(board: &Board, color: Color) -> bool {
    let count = |role: Role| board.count(Piece { color, role });
    let pawns = count(Role::Pawn);
    let promoted = count(Role::Queen).saturating_sub(1)
        + count(Role::Rook).saturating_sub(2)
        + count(Role::Bishop).saturating_sub(2)
        + count(Role::Knight).saturating_sub(2);
    board.pieces().filter(|(_, piece)| piece.color == color).count() <= 16
        && pawns <= 8
        && pawns + promoted <= 8
}

impl Position {
    /// Parses and validates a FEN.
    ///
    /// Tabs and line breaks count as spaces. Missing trailing fields default
    /// to `w - - 0 1`. An en passant square is only kept if the side to move
    /// can legally capture onto it.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the text is malformed or describes an
    /// illegal position.
    pub fn from_fen(fen: &str) -> Result<Position, ParseFenError> {
        Position::parse_fen(fen).map_err(|err| {
            tracing::debug!(%fen, %err, "rejected fen");
            err
        })
    }

    fn parse_fen(fen: &str) -> Result<Position, ParseFenError> {
        if fen.len() > MAX_FEN_LEN {
            return Err(ParseFenError::TooLong);
        }

        let tokens: Vec<&str> = fen.split_ascii_whitespace().collect();
        if tokens.is_empty() || tokens.len() > 6 {
            return Err(ParseFenError::TokenCount);
        }
        let field = |i: usize, default: &'static str| tokens.get(i).copied().unwrap_or(default);

        let board = Board::from_board_fen(tokens[0].as_bytes())?;

        let turn = match field(1, "w") {
            "w" | "W" => Color::White,
            "b" | "B" => Color::Black,
            _ => return Err(ParseFenError::ActiveColor),
        };

        for color in Color::ALL {
            if board.count(color.king()) != 1 {
                return Err(ParseFenError::KingCount(color));
            }
            if !is_promotable_material(&board, color) {
                return Err(ParseFenError::TooMuchMaterial(color));
            }
        }

        let halfmoves =
            btoi::btou::<u32>(field(4, "0").as_bytes()).map_err(|_| ParseFenError::NumericField)?;
        let fullmoves = btoi::btou::<u32>(field(5, "1").as_bytes())
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(ParseFenError::NumericField)?;

        let castles = CastlingRights::resolve(&board, field(2, "-"))?;

        let mut pos = Position::from_parts(board, turn, castles, halfmoves, fullmoves);

        if let Ok(ep_square) = field(3, "-").to_ascii_lowercase().parse::<Square>() {
            pos.set_ep_square(ep_square);
        }

        let them = !turn;
        if pos
            .board()
            .king_of(them)
            .is_some_and(|king| pos.attacked(king, turn))
        {
            return Err(ParseFenError::CheckConstraint);
        }

        Ok(pos)
    }

    /// The FEN of the position, with castling rights as rook files.
    pub fn fen(&self) -> String {
        format!("{} {} {}", self.epd(), self.halfmoves(), self.fullmoves())
    }

    /// The FEN of the position, with `KQkq` castling rights if the position
    /// looks like standard chess.
    pub fn friendly_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.board().board_fen(),
            self.turn().char(),
            self.castles().fen_token(self.mode()),
            ep_field(self.ep_square()),
            self.halfmoves(),
            self.fullmoves()
        )
    }

    /// The FEN without halfmove clock and move number.
    pub fn epd(&self) -> String {
        format!(
            "{} {} {} {}",
            self.board().board_fen(),
            self.turn().char(),
            self.castles(),
            ep_field(self.ep_square())
        )
    }
}

fn ep_field(ep_square: Option<Square>) -> String {
    ep_square.map_or_else(|| "-".to_owned(), |sq| sq.to_string())
}

impl FromStr for Position {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Position, ParseFenError> {
        Position::from_fen(fen)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CastlingMode;

    fn parse(fen: &str) -> Result<Position, ParseFenError> {
        fen.parse()
    }

    #[test]
    fn test_starting_position() {
        let pos = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("valid fen");
        assert_eq!(pos, Position::new());
        assert_eq!(pos.mode(), CastlingMode::Standard);
        assert_eq!(
            pos.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah - 0 1"
        );
        assert_eq!(
            pos.friendly_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(pos.epd(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w AHah -");
    }

    #[test]
    fn test_whitespace_and_defaults() {
        let pos = parse("  rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/\tW\nKQkq  ")
            .expect("valid fen");
        assert_eq!(pos, Position::new());

        let pos = parse("4k3/8/8/8/8/8/8/4K3 b").expect("valid fen");
        assert_eq!(pos.turn(), Color::Black);
        assert_eq!(pos.fullmoves().get(), 1);
    }

    #[test]
    fn test_errors() {
        let cases: &[(&str, ParseFenError)] = &[
            ("", ParseFenError::TokenCount),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1 x", ParseFenError::TokenCount),
            ("4k3/8/8/8/8/8/4K3 w - - 0 1", ParseFenError::RowCount),
            ("4k3/8/8/8/8/8/8/4K3//", ParseFenError::RowCount),
            ("4k3/8/8/8/8/8/8/4K4", ParseFenError::RowLength),
            ("4k3/8/8/8/8/8/8/4K2", ParseFenError::RowLength),
            ("4k3/8/8/8/8/8/8/8K3R", ParseFenError::RowLength),
            ("4k3/8/8/8/8/8/8/4K2X", ParseFenError::UnknownPiece('X')),
            ("4k3/8/8/8/8/8/8/0K7", ParseFenError::UnknownPiece('0')),
            ("4k3/8/8/8/8/8/8/3\u{e9}K3", ParseFenError::UnknownPiece('\u{e9}')),
            ("4k2P/8/8/8/8/8/8/4K3", ParseFenError::PawnOnBackRank),
            ("4k3/8/8/8/8/8/8/p3K3", ParseFenError::PawnOnBackRank),
            ("4k3/8/8/8/8/8/8/4K3 x", ParseFenError::ActiveColor),
            ("4k3/8/8/8/8/8/8/8 w", ParseFenError::KingCount(Color::White)),
            ("4k3/8/8/8/8/8/8/3KK3 w", ParseFenError::KingCount(Color::White)),
            ("8/8/8/8/8/8/8/4K3 w", ParseFenError::KingCount(Color::Black)),
            (
                "QQQQQQrk/Q4Qpp/Q5QQ/Q6Q/Q6Q/Q1Q1Q2Q/Q6Q/nQ1QKQQQ w - - 0 1",
                ParseFenError::TooMuchMaterial(Color::White),
            ),
            ("4k3/8/8/8/8/8/PPPPPPPP/QQ2K3 w", ParseFenError::TooMuchMaterial(Color::White)),
            ("rrrk4/pppppppp/8/8/8/8/8/4K3 w", ParseFenError::TooMuchMaterial(Color::Black)),
            ("4k3/8/8/8/8/8/8/4K3 w - - x 1", ParseFenError::NumericField),
            ("4k3/8/8/8/8/8/8/4K3 w - - -1 1", ParseFenError::NumericField),
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 0", ParseFenError::NumericField),
            ("4k3/8/8/8/8/8/8/4K3 w KQ1 - 0 1", ParseFenError::CastlingSpec('1')),
            ("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1", ParseFenError::CheckConstraint),
            ("4k3/8/8/8/8/8/8/4K2r b - - 0 1", ParseFenError::CheckConstraint),
        ];

        for (fen, err) in cases {
            assert_eq!(parse(fen).as_ref().err(), Some(err), "{fen}");
        }
    }

    #[test]
    fn test_promoted_material() {
        // Seven pawns and a second queen.
        assert!(parse("4k3/8/8/8/8/8/PPPPPPP1/QQ2K3 w - - 0 1").is_ok());
        // Nine queens and no pawns.
        let pos = parse("R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1")
            .expect("valid fen");
        assert_eq!(pos.movegen().len(), 218);
    }

    #[test]
    fn test_non_ascii_piece() {
        let err = parse("4k3/8/8/8/8/8/8/3\u{e9}K3 w - - 0 1").expect_err("unknown piece");
        assert_eq!(err.to_string(), "invalid fen: unknown piece '\u{e9}'");
    }

    #[test]
    fn test_too_long() {
        let fen = format!("4k3/8/8/8/8/8/8/4K3 w - - 0 1{}", " ".repeat(200));
        assert_eq!(parse(&fen), Err(ParseFenError::TooLong));
    }

    #[test]
    fn test_check_constraint_only_for_side_not_to_move() {
        // White is in check and to move, which is fine.
        let pos = parse("4k3/8/8/8/8/8/8/4K2r w - - 0 1").expect("valid fen");
        assert!(pos.is_check());
    }

    #[test]
    fn test_ep_square_kept_only_if_capturable() {
        let pos = parse("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
            .expect("valid fen");
        assert_eq!(pos.ep_square(), Some(Square::D6));
        assert_eq!(
            pos.fen(),
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w AHah d6 0 3"
        );

        let pos = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .expect("valid fen");
        assert_eq!(pos.ep_square(), None);

        // Unparsable en passant squares are dropped too.
        let pos = parse("4k3/8/8/8/8/8/8/4K3 w - z9 0 1").expect("valid fen");
        assert_eq!(pos.ep_square(), None);

        // Uppercase is fine.
        let pos = parse("4k3/8/8/3pP3/8/8/8/4K3 w - D6 0 2").expect("valid fen");
        assert_eq!(pos.ep_square(), Some(Square::D6));
    }

    #[test]
    fn test_chess960_castling() {
        let pos = parse("bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9")
            .expect("valid fen");
        assert_eq!(pos.mode(), CastlingMode::Chess960);
        assert_eq!(pos.castles().to_string(), "FHfh");
        assert_eq!(
            pos.fen(),
            "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w FHfh - 2 9"
        );
        assert_eq!(pos.friendly_fen(), pos.fen());
    }

    #[test]
    fn test_round_trip_after_moves() {
        let mut pos = Position::new();
        for uci in ["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7", "e1h1", "c5c4", "d2d4"] {
            pos = pos.play_uci(uci).expect("legal move");
            let reparsed = parse(&pos.fen()).expect("valid fen");
            assert_eq!(reparsed, pos);
            assert_eq!(reparsed.fen(), pos.fen());
        }
        assert_eq!(pos.ep_square(), Some(Square::D3));
        assert_eq!(
            pos.friendly_fen(),
            "rn1qkbnr/pp1bpppp/3p4/1B6/2pPP3/5N2/PPP2PPP/RNBQ1RK1 b kq d3 0 5"
        );
    }

    #[test]
    fn test_board_fen() {
        let board = Board::from_board_fen(b"8/8/8/8/8/8/8/8").expect("valid board");
        assert_eq!(board, Board::empty());
        assert_eq!(Board::new().board_fen(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }
}

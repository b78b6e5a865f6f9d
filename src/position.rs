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

use std::{error::Error, fmt, num::NonZeroU32};

use crate::{
    board::Board,
    castling::CastlingRights,
    castling_side::CastlingSide,
    color::Color,
    deltas,
    m::{Move, MoveList, PieceMoves},
    role::Role,
    square::{File, Rank, Square},
    types::{CastlingMode, Piece},
    uci::promotion_from_char,
};

/// Reason why a move is not legal in a position.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum IllegalReason {
    /// Move text is not 4 or 5 characters long.
    BadLength,
    /// A square name in the move text is invalid.
    OffBoard,
    /// The origin square does not hold a piece of the side to move.
    WrongColorSource,
    /// The target square holds a piece of the side to move.
    SameColor,
    /// King onto own rook, but the right to castle with that rook is gone.
    NoCastlingRight,
    /// Pieces stand in the way of the castling king or rook.
    CastlingBlocked,
    /// The king would castle out of, across, or into an attacked square.
    CastlingThroughCheck,
    /// A pawn reaching the last rank without a promotion piece.
    MissingPromotion,
    /// A promotion piece given for a move that is not a pawn promotion.
    UnexpectedPromotion,
    /// The promotion letter is not one of `q`, `r`, `b`, `n`.
    InvalidPromotion,
    /// The piece cannot move like that.
    NotPseudoLegal,
    /// The move would leave the own king attacked.
    KingInCheck,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IllegalReason::BadLength => "bad string length",
            IllegalReason::OffBoard => "off board",
            IllegalReason::WrongColorSource => "wrong color source",
            IllegalReason::SameColor => "source and destination have same color",
            IllegalReason::NoCastlingRight => "lost the right to castle",
            IllegalReason::CastlingBlocked => "castling blocked",
            IllegalReason::CastlingThroughCheck => "cannot castle through check",
            IllegalReason::MissingPromotion => "move requires a promotion piece",
            IllegalReason::UnexpectedPromotion => "unexpected promotion piece",
            IllegalReason::InvalidPromotion => "invalid promotion piece",
            IllegalReason::NotPseudoLegal => "not even pseudolegal",
            IllegalReason::KingInCheck => "leaves king in check",
        })
    }
}

/// Error when trying to play an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalMoveError {
    uci: String,
    reason: IllegalReason,
}

impl IllegalMoveError {
    /// The rejected move, as given.
    pub fn uci(&self) -> &str {
        &self.uci
    }

    pub fn reason(&self) -> IllegalReason {
        self.reason
    }
}

impl fmt::Display for IllegalMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}: {}", self.uci, self.reason)
    }
}

impl Error for IllegalMoveError {}

/// A legal chess or Chess960 position.
///
/// Positions are immutable. Playing a move returns a new position.
///
/// # Examples
///
/// ```
/// use chessgrid::{Position, Square};
///
/// let pos = Position::new();
/// assert_eq!(pos.movegen().len(), 20);
///
/// let pos = pos.play_uci("e2e4")?;
/// assert_eq!(pos.ep_square(), None); // no pawn could capture
/// assert_eq!(pos.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b AHah - 0 1");
/// # Ok::<_, chessgrid::IllegalMoveError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    turn: Color,
    castles: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: NonZeroU32,
    mode: CastlingMode,
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

/// Positions compare equal if board, side to move, castling rights,
/// en passant square and both clocks are equal. The [`CastlingMode`] is
/// only a presentation hint and not compared.
impl PartialEq for Position {
    fn eq(&self, other: &Position) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.castles == other.castles
            && self.ep_square == other.ep_square
            && self.halfmoves == other.halfmoves
            && self.fullmoves == other.fullmoves
    }
}

impl Eq for Position {}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position {
            board: Board::new(),
            turn: Color::White,
            castles: CastlingRights::STANDARD,
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
            mode: CastlingMode::Standard,
        }
    }

    /// Assembles a position from parts that were already validated.
    /// The castling mode is derived from the rights and the board.
    pub(crate) fn from_parts(
        board: Board,
        turn: Color,
        castles: CastlingRights,
        halfmoves: u32,
        fullmoves: NonZeroU32,
    ) -> Position {
        let mode = castles.castling_mode(&board);
        Position {
            board,
            turn,
            castles,
            ep_square: None,
            halfmoves,
            fullmoves,
            mode,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castles(&self) -> CastlingRights {
        self.castles
    }

    /// The en passant target square. Only set if the side to move can
    /// legally capture en passant.
    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Number of half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Current move number. Starts at 1 and is increased after every black
    /// move.
    #[inline]
    pub fn fullmoves(&self) -> NonZeroU32 {
        self.fullmoves
    }

    #[inline]
    pub fn mode(&self) -> CastlingMode {
        self.mode
    }

    /// Tests if `sq` is attacked by any piece of color `by`.
    #[inline]
    pub fn attacked(&self, sq: Square, by: Color) -> bool {
        self.board.is_attacked(sq, by)
    }

    /// Tests if the king of the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board
            .king_of(self.turn)
            .is_some_and(|king| self.attacked(king, !self.turn))
    }

    /// Generates all legal moves.
    pub fn movegen(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.board.pieces() {
            if piece.color == self.turn {
                let mut candidates = PieceMoves::new();
                self.pseudo_legal_from(from, piece, &mut candidates);
                moves.extend(candidates.into_iter().filter(|m| self.is_safe(m)));
            }
        }
        moves
    }

    /// Tests if the side to move has no legal moves.
    pub fn no_moves(&self) -> bool {
        !self
            .board
            .pieces()
            .filter(|(_, piece)| piece.color == self.turn)
            .any(|(from, piece)| {
                let mut candidates = PieceMoves::new();
                self.pseudo_legal_from(from, piece, &mut candidates);
                candidates.iter().any(|m| self.is_safe(m))
            })
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.no_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.no_moves()
    }

    /// Tests for a dead position by material: no pawns, rooks or queens,
    /// and at most one knight or bishop on the board.
    pub fn insufficient_material(&self) -> bool {
        let mut minors = 0;
        for (_, piece) in self.board.pieces() {
            match piece.role {
                Role::King => (),
                Role::Knight | Role::Bishop => minors += 1,
                Role::Pawn | Role::Rook | Role::Queen => return false,
            }
        }
        minors < 2
    }

    /// The move number prefix for the next move in PGN style, like `12.`
    /// with white to move or `12...` with black to move.
    pub fn next_number_string(&self) -> String {
        match self.turn {
            Color::White => format!("{}.", self.fullmoves),
            Color::Black => format!("{}...", self.fullmoves),
        }
    }

    /// The side of a castling move, or `None` if `m` is not castling.
    pub fn castling_side(&self, m: &Move) -> Option<CastlingSide> {
        (self.board.piece_at(m.from) == Some(self.turn.king())
            && self.board.piece_at(m.to) == Some(self.turn.rook()))
        .then(|| CastlingSide::of_rook(m.from, m.to))
    }

    /// Finds a legal castling move to the given side.
    pub fn castling_move(&self, side: CastlingSide) -> Option<Move> {
        let king = self.board.king_of(self.turn)?;
        let mut candidates = PieceMoves::new();
        self.pseudo_legal_from(king, self.turn.king(), &mut candidates);
        candidates
            .into_iter()
            .find(|m| self.castling_side(m) == Some(side) && self.is_safe(m))
    }

    /// Checks move text like `e2e4`, `e7e8q` or `e1h1` for legality.
    ///
    /// Returns `None` exactly if the move is contained in
    /// [`movegen()`](Position::movegen).
    ///
    /// # Examples
    ///
    /// ```
    /// use chessgrid::{IllegalReason, Position};
    ///
    /// let pos = Position::new();
    /// assert_eq!(pos.illegal("e2e4"), None);
    /// assert_eq!(pos.illegal("e2e5"), Some(IllegalReason::NotPseudoLegal));
    /// assert_eq!(pos.illegal("e7e5"), Some(IllegalReason::WrongColorSource));
    /// assert_eq!(pos.illegal("e1h1"), Some(IllegalReason::CastlingBlocked));
    /// ```
    pub fn illegal(&self, uci: &str) -> Option<IllegalReason> {
        self.to_move(uci).err()
    }

    /// Parses move text and checks it for legality.
    ///
    /// # Errors
    ///
    /// Returns the first reason why the move is not legal.
    pub fn to_move(&self, uci: &str) -> Result<Move, IllegalReason> {
        let bytes = uci.as_bytes();
        if bytes.len() != 4 && bytes.len() != 5 {
            return Err(IllegalReason::BadLength);
        }

        let from = Square::from_ascii(&bytes[0..2]).map_err(|_| IllegalReason::OffBoard)?;
        let to = Square::from_ascii(&bytes[2..4]).map_err(|_| IllegalReason::OffBoard)?;
        let promotion = match bytes.get(4) {
            None => None,
            Some(&ch) => Some(
                promotion_from_char(char::from(ch)).ok_or(IllegalReason::InvalidPromotion)?,
            ),
        };

        let m = Move {
            from,
            to,
            promotion,
        };

        match self.diagnose(&m) {
            Some(reason) => Err(reason),
            None => Ok(m),
        }
    }

    /// Plays a legal move.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if the move is not contained in
    /// [`movegen()`](Position::movegen). The position is unchanged in any
    /// case.
    pub fn play(&self, m: &Move) -> Result<Position, IllegalMoveError> {
        match self.diagnose(m) {
            None => Ok(self.play_unchecked(m)),
            Some(reason) => Err(self.reject(m.to_string(), reason)),
        }
    }

    /// Parses and plays a move like `e2e4`.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalMoveError`] if the text does not name a legal move.
    pub fn play_uci(&self, uci: &str) -> Result<Position, IllegalMoveError> {
        match self.to_move(uci) {
            Ok(m) => Ok(self.play_unchecked(&m)),
            Err(reason) => Err(self.reject(uci.to_owned(), reason)),
        }
    }

    /// Plays a sequence of moves in UCI notation.
    ///
    /// # Errors
    ///
    /// Returns the error of the first move that is not legal in its
    /// position.
    pub fn play_sequence<S: AsRef<str>>(&self, moves: &[S]) -> Result<Position, IllegalMoveError> {
        let mut pos = self.clone();
        for uci in moves {
            pos = pos.play_uci(uci.as_ref())?;
        }
        Ok(pos)
    }

    /// Finds the first move of a sequence that is not legal, with the
    /// reason.
    pub fn sequence_illegal<S: AsRef<str>>(&self, moves: &[S]) -> Option<IllegalMoveError> {
        self.play_sequence(moves).err()
    }

    fn reject(&self, uci: String, reason: IllegalReason) -> IllegalMoveError {
        tracing::trace!(%uci, %reason, fen = %self, "illegal move");
        IllegalMoveError { uci, reason }
    }

    /// Finds the reason why a move is not legal, or `None` if it is legal.
    fn diagnose(&self, m: &Move) -> Option<IllegalReason> {
        let Some(piece) = self
            .board
            .piece_at(m.from)
            .filter(|piece| piece.color == self.turn)
        else {
            return Some(IllegalReason::WrongColorSource);
        };

        match self.board.piece_at(m.to) {
            Some(target) if target == self.turn.rook() && piece.role == Role::King => {
                if m.is_promotion() {
                    return Some(IllegalReason::UnexpectedPromotion);
                }
                if let Some(reason) = self.castling_obstacle(m.from, m.to) {
                    return Some(reason);
                }
            }
            Some(target) if target.color == self.turn => return Some(IllegalReason::SameColor),
            _ => (),
        }

        if piece.role == Role::Pawn && m.to.rank() == (!self.turn).backrank() {
            if !m.promotion.is_some_and(|role| Role::PROMOTIONS.contains(&role)) {
                return Some(IllegalReason::MissingPromotion);
            }
        } else if m.is_promotion() {
            return Some(IllegalReason::UnexpectedPromotion);
        }

        let mut candidates = PieceMoves::new();
        self.pseudo_legal_from(m.from, piece, &mut candidates);
        if !candidates.contains(m) {
            Some(IllegalReason::NotPseudoLegal)
        } else if !self.is_safe(m) {
            Some(IllegalReason::KingInCheck)
        } else {
            None
        }
    }

    /// Tests that a pseudo-legal move does not leave the own king attacked.
    fn is_safe(&self, m: &Move) -> bool {
        let after = self.play_unchecked(m);
        match after.board.king_of(self.turn) {
            Some(king) => !after.attacked(king, after.turn),
            None => true,
        }
    }

    fn pseudo_legal_from(&self, from: Square, piece: Piece, moves: &mut PieceMoves) {
        match piece.role {
            Role::King => self.gen_king_moves(from, moves),
            Role::Pawn => self.gen_pawn_moves(from, moves),
            _ => {
                for slider in deltas::sliders(piece) {
                    for &(df, dr) in *slider {
                        let Some(to) = from.offset(df, dr) else {
                            break;
                        };
                        match self.board.color_at(to) {
                            Some(color) if color == piece.color => break,
                            Some(_) => {
                                moves.push(Move::new(from, to));
                                break;
                            }
                            None => moves.push(Move::new(from, to)),
                        }
                    }
                }
            }
        }
    }

    fn gen_pawn_moves(&self, from: Square, moves: &mut PieceMoves) {
        let us = self.turn;
        let [push, captures @ ..] = deltas::PAWN.get(us);

        for (steps, &(df, dr)) in push.iter().enumerate() {
            if steps > 0 && from.rank() != us.pawn_rank() {
                break;
            }
            match from.offset(df, dr) {
                Some(to) if !self.board.is_occupied(to) => push_pawn_move(moves, us, from, to),
                _ => break,
            }
        }

        for slider in captures {
            let (df, dr) = slider[0];
            if let Some(to) = from.offset(df, dr) {
                if self.board.color_at(to) == Some(!us) || self.ep_square == Some(to) {
                    push_pawn_move(moves, us, from, to);
                }
            }
        }
    }

    fn gen_king_moves(&self, from: Square, moves: &mut PieceMoves) {
        for &(df, dr) in &deltas::KING {
            if let Some(to) = from.offset(df, dr) {
                if self.board.color_at(to) != Some(self.turn) {
                    moves.push(Move::new(from, to));
                }
            }
        }

        let backrank = self.turn.backrank();
        for file in self.castles.files(self.turn) {
            let rook = Square::from_coords(file, backrank);
            if self.castling_obstacle(from, rook).is_none() {
                moves.push(Move::new(from, rook));
            }
        }
    }

    /// Checks the castling conditions for the king on `king` and its rook on
    /// `rook`, except that the king may still end up in check because the
    /// rook moved away.
    fn castling_obstacle(&self, king: Square, rook: Square) -> Option<IllegalReason> {
        let us = self.turn;
        let backrank = us.backrank();

        if king.rank() != backrank || rook.rank() != backrank {
            return Some(IllegalReason::NotPseudoLegal);
        }

        if !self.castles.has(us, rook.file())
            || self.board.piece_at(rook) != Some(us.rook())
            || self.board.piece_at(king) != Some(us.king())
        {
            return Some(IllegalReason::NoCastlingRight);
        }

        let side = CastlingSide::of_rook(king, rook);

        for file in files_between(king.file(), side.king_to_file()) {
            let sq = Square::from_coords(file, backrank);
            if self.attacked(sq, !us) {
                return Some(IllegalReason::CastlingThroughCheck);
            }
            if sq != king && sq != rook && self.board.is_occupied(sq) {
                return Some(IllegalReason::CastlingBlocked);
            }
        }

        for file in files_between(rook.file(), side.rook_to_file()) {
            let sq = Square::from_coords(file, backrank);
            if sq != king && sq != rook && self.board.is_occupied(sq) {
                return Some(IllegalReason::CastlingBlocked);
            }
        }

        None
    }

    /// Plays a pseudo-legal move without checking it.
    pub(crate) fn play_unchecked(&self, m: &Move) -> Position {
        let us = self.turn;
        let mut board = self.board.clone();
        let mut castles = self.castles;

        let Some(piece) = board.remove_piece_at(m.from) else {
            return self.clone();
        };
        let target = board.piece_at(m.to);

        let is_castle = piece.role == Role::King && target == Some(us.rook());
        let is_en_passant =
            piece.role == Role::Pawn && m.from.file() != m.to.file() && target.is_none();
        let is_capture = !is_castle && (target.is_some() || is_en_passant);

        match piece.role {
            Role::King => castles.discard_color(us),
            Role::Rook => castles.discard_rook(us, m.from),
            _ => (),
        }
        if let Some(Piece {
            color,
            role: Role::Rook,
        }) = target
        {
            castles.discard_rook(color, m.to);
        }

        if is_castle {
            let side = CastlingSide::of_rook(m.from, m.to);
            board.remove_piece_at(m.to);
            board.set_piece_at(side.rook_to(us), us.rook());
            board.set_piece_at(side.king_to(us), piece);
        } else {
            if is_en_passant {
                board.remove_piece_at(Square::from_coords(m.to.file(), m.from.rank()));
            }
            board.set_piece_at(m.to, m.promotion.map_or(piece, |role| role.of(us)));
        }

        let mut child = Position {
            board,
            turn: !us,
            castles,
            ep_square: None,
            halfmoves: if is_capture || piece.role == Role::Pawn {
                0
            } else {
                self.halfmoves.saturating_add(1)
            },
            fullmoves: match us {
                Color::White => self.fullmoves,
                Color::Black => self.fullmoves.saturating_add(1),
            },
            mode: self.mode,
        };

        if piece.role == Role::Pawn && m.from.rank().index().abs_diff(m.to.rank().index()) == 2 {
            if let Some(ep_square) = m.from.offset(0, us.forward()) {
                child.set_ep_square(ep_square);
            }
        }

        child
    }

    /// Sets the en passant square, but only if the side to move has a
    /// legal en passant capture onto it.
    pub(crate) fn set_ep_square(&mut self, sq: Square) {
        let us = self.turn;

        if sq.rank() != Rank::Sixth.relative_to(us) || self.board.is_occupied(sq) {
            return;
        }

        let (Some(pawn), Some(origin)) = (sq.offset(0, -us.forward()), sq.offset(0, us.forward()))
        else {
            return;
        };
        if self.board.piece_at(pawn) != Some((!us).pawn()) || self.board.is_occupied(origin) {
            return;
        }

        let capturable = [-1, 1]
            .into_iter()
            .filter_map(|df| pawn.offset(df, 0))
            .filter(|&from| self.board.piece_at(from) == Some(us.pawn()))
            .any(|from| self.is_safe(&Move::new(from, sq)));

        if capturable {
            self.ep_square = Some(sq);
        }
    }
}

fn push_pawn_move(moves: &mut PieceMoves, us: Color, from: Square, to: Square) {
    if to.rank() == (!us).backrank() {
        for role in Role::PROMOTIONS {
            moves.push(Move::new(from, to).with_promotion(role));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Files from `a` to `b`, both included, in either direction.
fn files_between(a: File, b: File) -> impl Iterator<Item = File> {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    File::ALL[low.index()..=high.index()].iter().copied()
}

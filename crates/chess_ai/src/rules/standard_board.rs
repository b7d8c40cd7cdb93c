//! Standard chess rules backed by `shakmaty`
//!
//! Keeps a stack of prior positions for undo and a Zobrist history for
//! threefold-repetition detection.

use super::{MoveFilter, RulesEngine};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{ChessMove, Color, MoveFlags, Piece, PieceKind, Square, UciMove};
use shakmaty::fen::Fen;
use shakmaty::zobrist::Zobrist64;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Role};
use tracing::trace;

/// Halfmove clock value at which the fifty-move rule applies
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Standard chess position with make/undo history
#[derive(Debug, Clone)]
pub struct StandardBoard {
    pos: Chess,
    undo_stack: Vec<Chess>,
    /// Hash of every position reached so far, current position last
    hashes: Vec<Zobrist64>,
}

impl Default for StandardBoard {
    fn default() -> Self {
        Self::startpos()
    }
}

impl StandardBoard {
    /// The standard starting position
    pub fn startpos() -> Self {
        Self::from_chess(Chess::default())
    }

    /// Parse a position from FEN
    ///
    /// # Errors
    ///
    /// `InvalidFen` when the string does not parse, `InvalidPosition` when it
    /// parses but is not a legal chess position.
    pub fn from_fen(fen: &str) -> ChessEngineResult<Self> {
        let parsed: Fen = fen.trim().parse().map_err(|e| ChessEngineError::InvalidFen {
            fen: fen.to_string(),
            message: format!("{e}"),
        })?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| ChessEngineError::InvalidPosition {
                message: format!("{e}"),
            })?;
        Ok(Self::from_chess(pos))
    }

    fn from_chess(pos: Chess) -> Self {
        let hash = pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
        Self {
            pos,
            undo_stack: Vec::new(),
            hashes: vec![hash],
        }
    }

    /// Resolve long algebraic notation against the legal moves
    ///
    /// # Errors
    ///
    /// `InvalidMoveNotation` for malformed strings, `IllegalMove` when the
    /// move is well formed but not legal here.
    pub fn parse_move(&self, uci: &str) -> ChessEngineResult<ChessMove> {
        let wanted: UciMove = uci.parse()?;
        self.legal_moves(MoveFilter::From(wanted.from))
            .into_iter()
            .find(|mv| wanted.matches(mv))
            .ok_or_else(|| ChessEngineError::IllegalMove {
                uci: uci.to_string(),
                fen: self.serialize(),
            })
    }

    /// Number of moves applied since construction
    pub fn ply_count(&self) -> usize {
        self.undo_stack.len()
    }

    fn repetitions(&self) -> usize {
        match self.hashes.last() {
            Some(current) => self.hashes.iter().filter(|h| *h == current).count(),
            None => 0,
        }
    }

    fn convert_move(&self, m: &Move) -> ChessMove {
        match *m {
            Move::Castle { king, rook } => {
                let king_sq = to_square(king);
                let rook_sq = to_square(rook);
                let dest_file = if rook_sq.file() > king_sq.file() { 6 } else { 2 };
                ChessMove {
                    from: king_sq,
                    to: Square::from_index_masked(king_sq.rank() * 8 + dest_file),
                    piece: PieceKind::King,
                    promotion: None,
                    captured: None,
                    flags: MoveFlags {
                        castle: true,
                        en_passant: false,
                    },
                }
            }
            _ => {
                let to = to_square(m.to());
                ChessMove {
                    from: m.from().map(to_square).unwrap_or(to),
                    to,
                    piece: to_kind(m.role()),
                    promotion: m.promotion().map(to_kind),
                    captured: m.capture().map(to_kind),
                    flags: MoveFlags {
                        castle: false,
                        en_passant: m.is_en_passant(),
                    },
                }
            }
        }
    }

    fn find_legal(&self, mv: &ChessMove) -> Option<Move> {
        self.pos.legal_moves().into_iter().find(|m| {
            let candidate = self.convert_move(m);
            candidate.from == mv.from && candidate.to == mv.to && candidate.promotion == mv.promotion
        })
    }

    fn move_gives_check(&self, m: &Move) -> bool {
        let mut after = self.pos.clone();
        after.play_unchecked(m.clone());
        after.is_check()
    }
}

impl RulesEngine for StandardBoard {
    fn legal_moves(&self, filter: MoveFilter) -> Vec<ChessMove> {
        let moves = self.pos.legal_moves();
        match filter {
            MoveFilter::All => moves.iter().map(|m| self.convert_move(m)).collect(),
            MoveFilter::From(square) => moves
                .iter()
                .map(|m| self.convert_move(m))
                .filter(|mv| mv.from == square)
                .collect(),
            MoveFilter::Tactical => moves
                .iter()
                .filter(|m| m.is_capture() || m.is_promotion() || self.move_gives_check(m))
                .map(|m| self.convert_move(m))
                .collect(),
        }
    }

    fn apply_move(&mut self, mv: &ChessMove) -> ChessEngineResult<()> {
        let Some(m) = self.find_legal(mv) else {
            return Err(ChessEngineError::IllegalMove {
                uci: mv.to_string(),
                fen: self.serialize(),
            });
        };
        trace!(mv = %mv, "apply");
        self.undo_stack.push(self.pos.clone());
        self.pos.play_unchecked(m);
        self.hashes
            .push(self.pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal));
        Ok(())
    }

    fn undo_move(&mut self) -> ChessEngineResult<()> {
        let previous = self.undo_stack.pop().ok_or(ChessEngineError::UndoWithoutMove)?;
        self.pos = previous;
        self.hashes.pop();
        Ok(())
    }

    fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.pos.is_stalemate()
            || self.pos.is_insufficient_material()
            || self.pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
            || self.repetitions() >= 3
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn side_to_move(&self) -> Color {
        from_color(self.pos.turn())
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pos
            .board()
            .piece_at(from_square(square))
            .map(|p| Piece::new(from_color(p.color), to_kind(p.role)))
    }

    fn attackers(&self, square: Square, by: Color) -> u32 {
        let board = self.pos.board();
        board
            .attacks_to(from_square(square), into_color(by), board.occupied())
            .count() as u32
    }

    fn gives_check(&self, mv: &ChessMove) -> bool {
        self.find_legal(mv)
            .is_some_and(|m| self.move_gives_check(&m))
    }

    fn serialize(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }
}

fn to_square(sq: shakmaty::Square) -> Square {
    Square::from_index_masked(u32::from(sq) as u8)
}

fn from_square(sq: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(sq.index()))
}

fn to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn from_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

fn into_color(color: Color) -> shakmaty::Color {
    match color {
        Color::White => shakmaty::Color::White,
        Color::Black => shakmaty::Color::Black,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn play(board: &mut StandardBoard, uci: &str) {
        let mv = board.parse_move(uci).unwrap();
        board.apply_move(&mv).unwrap();
    }

    #[test]
    fn test_startpos_has_twenty_moves() {
        let board = StandardBoard::startpos();
        assert_eq!(board.legal_moves(MoveFilter::All).len(), 20);
        assert_eq!(board.side_to_move(), Color::White);
        assert_eq!(board.serialize(), START_FEN);
    }

    #[test]
    fn test_apply_undo_restores_fen() {
        let mut board = StandardBoard::startpos();
        play(&mut board, "e2e4");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_ne!(board.serialize(), START_FEN);

        board.undo_move().unwrap();
        assert_eq!(board.serialize(), START_FEN);
        assert_eq!(board.ply_count(), 0);
    }

    #[test]
    fn test_illegal_move_rejected() {
        let mut board = StandardBoard::startpos();
        let err = board.parse_move("e2e5").unwrap_err();
        assert!(matches!(err, ChessEngineError::IllegalMove { .. }));

        let mut mv = board.parse_move("e2e4").unwrap();
        mv.to = "e6".parse().unwrap();
        assert!(board.apply_move(&mv).is_err());
        assert_eq!(board.serialize(), START_FEN, "Rejected move must not change the position");
    }

    #[test]
    fn test_undo_without_move_is_error() {
        let mut board = StandardBoard::startpos();
        assert_eq!(board.undo_move(), Err(ChessEngineError::UndoWithoutMove));
    }

    #[test]
    fn test_invalid_fen_rejected() {
        assert!(matches!(
            StandardBoard::from_fen("not a fen"),
            Err(ChessEngineError::InvalidFen { .. })
        ));
        // Both kings missing
        assert!(StandardBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
    }

    #[test]
    fn test_castle_destination_is_king_square() {
        let board =
            StandardBoard::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<_> = board
            .legal_moves(MoveFilter::From(Square::E1))
            .into_iter()
            .filter(|m| m.is_castle())
            .collect();
        assert_eq!(castles.len(), 2);
        assert!(castles.iter().any(|m| m.to == Square::G1));
        assert!(castles.iter().any(|m| m.to == Square::C1));

        let mut board = board;
        play(&mut board, "e1g1");
        assert_eq!(
            board.piece_at("f1".parse().unwrap()),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
    }

    #[test]
    fn test_en_passant_flag_and_capture() {
        let board =
            StandardBoard::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = board.parse_move("e5d6").unwrap();
        assert!(ep.flags.en_passant);
        assert_eq!(ep.captured, Some(PieceKind::Pawn));
    }

    #[test]
    fn test_draw_detection() {
        let stalemate = StandardBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stalemate.is_draw());
        assert!(!stalemate.is_checkmate());

        let bare_kings = StandardBoard::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
        assert!(bare_kings.is_draw());

        let fifty = StandardBoard::from_fen("4k3/8/8/8/8/8/R7/4K3 w - - 100 80").unwrap();
        assert!(fifty.is_draw());
    }

    #[test]
    fn test_threefold_repetition() {
        let mut board = StandardBoard::startpos();
        for _ in 0..2 {
            play(&mut board, "g1f3");
            play(&mut board, "g8f6");
            play(&mut board, "f3g1");
            play(&mut board, "f6g8");
        }
        assert!(board.is_draw(), "Start position reached three times");

        board.undo_move().unwrap();
        assert!(!board.is_draw());
    }

    #[test]
    fn test_checkmate_detection() {
        let mated = StandardBoard::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(mated.is_checkmate());
        assert!(mated.is_check());
        assert!(mated.legal_moves(MoveFilter::All).is_empty());
    }

    #[test]
    fn test_attackers_and_gives_check() {
        let board = StandardBoard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let mate = board.parse_move("a1a8").unwrap();
        assert!(board.gives_check(&mate));
        let quiet = board.parse_move("a1a2").unwrap();
        assert!(!board.gives_check(&quiet));

        assert_eq!(board.attackers("a5".parse().unwrap(), Color::White), 1);
        assert_eq!(board.attackers("a5".parse().unwrap(), Color::Black), 0);
    }

    #[test]
    fn test_tactical_filter() {
        let board = StandardBoard::from_fen("6k1/5ppp/8/8/8/8/1q1R4/6K1 w - - 0 1").unwrap();
        let tactical = board.legal_moves(MoveFilter::Tactical);
        assert!(tactical.iter().any(|m| m.to_string() == "d2b2"));
        assert!(tactical.iter().any(|m| m.to_string() == "d2d8"), "Back-rank check");
        assert!(tactical.iter().all(|m| m.is_capture() || board.gives_check(m)));
    }

    #[test]
    fn test_board_snapshot_layout() {
        let board = StandardBoard::startpos();
        let snapshot = board.board_snapshot();
        assert_eq!(snapshot[0][4], Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(snapshot[7][3], Some(Piece::new(Color::Black, PieceKind::Queen)));
        assert_eq!(snapshot[3][3], None);
    }
}

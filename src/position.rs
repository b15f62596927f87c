//! Position adapter: wraps the shakmaty rules engine behind the small query/
//! mutate surface the tactic engine needs.
//!
//! All legality questions are delegated to shakmaty. Castling is reported and
//! accepted as a king move to its castled square (g/c file), which is how the
//! board UI expresses it.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, Move, Piece, Position, Role, Square,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
    #[error("no legal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("unplayable solution move '{0}'")]
    UnplayableSan(String),
}

/// A legal destination square for a selected piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub square: Square,
    /// True if moving here requires choosing a promotion piece.
    pub requires_promotion: bool,
}

/// A move that was applied to the board.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    /// Short algebraic notation, without check/mate suffixes.
    pub san: String,
    pub from: Square,
    pub to: Square,
}

/// The live board. Exclusively mutated by the tactic engine.
#[derive(Debug, Clone)]
pub struct Board {
    chess: Chess,
    history: Vec<(Square, Square)>,
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| PositionError::InvalidFen(fen.to_string()))?;
        let chess = parsed
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|_| PositionError::InvalidFen(fen.to_string()))?;
        Ok(Self {
            chess,
            history: Vec::new(),
        })
    }

    /// Replace the current position. Clears the move history.
    pub fn load(&mut self, fen: &str) -> Result<(), PositionError> {
        *self = Board::from_fen(fen)?;
        Ok(())
    }

    /// Serialize the current position as FEN.
    pub fn snapshot(&self) -> String {
        Fen::from_position(&self.chess, EnPassantMode::Legal).to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.chess.turn()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.chess.board().piece_at(square)
    }

    pub fn history_last_move(&self) -> Option<(Square, Square)> {
        self.history.last().copied()
    }

    /// Legal destinations for the piece on `from`. Empty if the square is
    /// empty or holds a piece of the side not to move. Promotion variants of
    /// the same destination collapse into a single entry.
    pub fn legal_destinations(&self, from: Square) -> Vec<Destination> {
        let mut out: Vec<Destination> = Vec::new();
        for m in &self.chess.legal_moves() {
            let (move_from, move_to) = move_endpoints(m);
            if move_from != from {
                continue;
            }
            let requires_promotion = matches!(
                m,
                Move::Normal {
                    promotion: Some(_),
                    ..
                }
            );
            if let Some(existing) = out.iter_mut().find(|d| d.square == move_to) {
                existing.requires_promotion |= requires_promotion;
            } else {
                out.push(Destination {
                    square: move_to,
                    requires_promotion,
                });
            }
        }
        out
    }

    /// Apply the legal move from `from` to `to`. For promoting moves the
    /// given role is used; for everything else it is ignored.
    pub fn apply(
        &mut self,
        from: Square,
        to: Square,
        promotion: Role,
    ) -> Result<AppliedMove, PositionError> {
        let legals = self.chess.legal_moves();
        let chosen = legals
            .iter()
            .find(|m| {
                let (move_from, move_to) = move_endpoints(m);
                if (move_from, move_to) != (from, to) {
                    return false;
                }
                match m {
                    Move::Normal {
                        promotion: Some(p), ..
                    } => *p == promotion,
                    _ => true,
                }
            })
            .cloned()
            .ok_or(PositionError::IllegalMove { from, to })?;
        Ok(self.play(&chosen))
    }

    /// Transcribe a solution move's SAN text onto the board and apply it.
    /// Tolerates check/mate/annotation suffixes (`+`, `#`, `!`, `?`).
    pub fn apply_san(&mut self, text: &str) -> Result<AppliedMove, PositionError> {
        let trimmed = text.trim().trim_end_matches(['!', '?']);
        let parsed: SanPlus = trimmed
            .parse()
            .map_err(|_| PositionError::UnplayableSan(text.to_string()))?;
        let m = parsed
            .san
            .to_move(&self.chess)
            .map_err(|_| PositionError::UnplayableSan(text.to_string()))?;
        Ok(self.play(&m))
    }

    fn play(&mut self, m: &Move) -> AppliedMove {
        let san = San::from_move(&self.chess, *m).to_string();
        let (from, to) = move_endpoints(m);
        self.chess.play_unchecked(*m);
        self.history.push((from, to));
        AppliedMove { san, from, to }
    }
}

/// From/to squares of a move as the UI understands them: castling is the
/// king stepping to the g or c file.
fn move_endpoints(m: &Move) -> (Square, Square) {
    match m {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            (*king, Square::from_coords(file, king.rank()))
        }
        _ => (m.from().unwrap_or_else(|| m.to()), m.to()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_from_fen_start_position() {
        let board = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board.side_to_move(), Color::White);
        assert!(board.history_last_move().is_none());
    }

    #[test]
    fn test_from_fen_rejects_garbage() {
        assert!(Board::from_fen("not a fen").is_err());
    }

    #[test]
    fn test_legal_destinations_pawn() {
        let board = Board::from_fen(START_FEN).unwrap();
        let dests = board.legal_destinations(Square::E2);
        assert_eq!(dests.len(), 2);
        assert!(dests.iter().any(|d| d.square == Square::E3));
        assert!(dests.iter().any(|d| d.square == Square::E4));
        assert!(dests.iter().all(|d| !d.requires_promotion));
    }

    #[test]
    fn test_legal_destinations_empty_for_wrong_side() {
        let board = Board::from_fen(START_FEN).unwrap();
        // Black piece while white is to move
        assert!(board.legal_destinations(Square::E7).is_empty());
        // Empty square
        assert!(board.legal_destinations(Square::E4).is_empty());
    }

    #[test]
    fn test_apply_produces_san() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        let applied = board.apply(Square::G1, Square::F3, Role::Queen).unwrap();
        assert_eq!(applied.san, "Nf3");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.history_last_move(), Some((Square::G1, Square::F3)));
    }

    #[test]
    fn test_apply_rejects_illegal_move() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        let err = board.apply(Square::E2, Square::E5, Role::Queen);
        assert!(matches!(err, Err(PositionError::IllegalMove { .. })));
    }

    #[test]
    fn test_apply_san_tolerates_suffixes() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        let applied = board.apply_san("Nf3!?").unwrap();
        assert_eq!(applied.san, "Nf3");
        let applied = board.apply_san("Nf6").unwrap();
        assert_eq!(applied.san, "Nf6");
    }

    #[test]
    fn test_apply_san_rejects_unplayable() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        assert!(matches!(
            board.apply_san("Qh5"),
            Err(PositionError::UnplayableSan(_))
        ));
        assert!(matches!(
            board.apply_san("???"),
            Err(PositionError::UnplayableSan(_))
        ));
    }

    #[test]
    fn test_promotion_destination_flagged() {
        let board = Board::from_fen("5q1k/4P3/8/8/8/3Q4/8/4K3 w - - 0 1").unwrap();
        let dests = board.legal_destinations(Square::E7);
        let push = dests.iter().find(|d| d.square == Square::E8).unwrap();
        let capture = dests.iter().find(|d| d.square == Square::F8).unwrap();
        assert!(push.requires_promotion);
        assert!(capture.requires_promotion);
    }

    #[test]
    fn test_apply_promotion_role() {
        let mut board = Board::from_fen("5q1k/4P3/8/8/8/3Q4/8/4K3 w - - 0 1").unwrap();
        let applied = board.apply(Square::E7, Square::F8, Role::Queen).unwrap();
        assert_eq!(applied.san, "exf8=Q");
    }

    #[test]
    fn test_castle_reported_as_king_destination() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let dests = board.legal_destinations(Square::E1);
        assert!(dests.iter().any(|d| d.square == Square::G1));
        let applied = board.apply(Square::E1, Square::G1, Role::Queen).unwrap();
        assert_eq!(applied.san, "O-O");
        assert_eq!(applied.from, Square::E1);
        assert_eq!(applied.to, Square::G1);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        board.apply(Square::E2, Square::E4, Role::Queen).unwrap();
        let fen = board.snapshot();
        board.apply(Square::E7, Square::E5, Role::Queen).unwrap();
        board.load(&fen).unwrap();
        assert_eq!(board.snapshot(), fen);
        assert_eq!(board.side_to_move(), Color::Black);
        assert!(board.history_last_move().is_none());
    }
}

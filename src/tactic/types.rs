//! Tactic records and session state.

use std::collections::VecDeque;

use serde::Deserialize;
use shakmaty::{Color, File, Rank, Role, Square};

use crate::position::{Board, Destination, PositionError};

/// Promotion pieces in picker order.
pub const PROMOTION_ROLES: [Role; 4] = [Role::Queen, Role::Rook, Role::Bishop, Role::Knight];

/// One recorded solution move. The engine reads only the primary move text;
/// the rest is carried through from the PGN record.
#[derive(Debug, Clone, Deserialize)]
pub struct SolutionMove {
    /// SAN text as recorded, possibly with check/mate/annotation suffixes
    /// (e.g. "Qxf7#", "Nc7+", "Rb8!").
    #[serde(rename = "move")]
    pub text: String,
    #[serde(default)]
    pub move_number: Option<u32>,
    #[serde(default)]
    pub ravs: Option<Vec<Variation>>,
    #[serde(default)]
    pub comments: Option<Vec<String>>,
}

/// A recursive alternative line (PGN RAV). Display-only.
#[derive(Debug, Clone, Deserialize)]
pub struct Variation {
    pub moves: Vec<SolutionMove>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// One tactic record: a position plus the recorded continuation, with
/// optional PGN headers carried for display.
#[derive(Debug, Clone, Deserialize)]
pub struct Tactic {
    pub fen: String,
    pub pgn: Vec<SolutionMove>,
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub white: Option<String>,
    #[serde(default)]
    pub black: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
}

/// Where the session is in the tactic's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Player is choosing a piece or a destination
    AwaitingSelection,
    /// A promoting move is chosen; the piece is not
    AwaitingPromotionChoice,
    /// Correct move played; scripted reply is pending
    AwaitingOpponentReply,
    /// Remaining line is being auto-played
    ShowingSolution,
    /// Whole line played by the player
    TacticSolved,
    /// Line over without a solve (solution shown or data fault)
    TacticExhausted,
}

/// Transient status-bar feedback after a judged move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFeedback {
    Correct,
    Wrong,
}

/// A selected origin square with its precomputed legal destinations.
#[derive(Debug, Clone)]
pub struct Selection {
    pub from: Square,
    pub destinations: Vec<Destination>,
}

/// A move held open while the player picks a promotion piece.
#[derive(Debug, Clone, Copy)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// What a scheduled action will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    OpponentReply,
    Rollback,
    SolutionStep,
}

/// The single outstanding scheduled action. Fires when `ticks_remaining`
/// reaches zero, and only if its generation still matches the session's.
#[derive(Debug, Clone, Copy)]
pub struct PendingAction {
    pub kind: PendingKind,
    pub ticks_remaining: u32,
    pub generation: u64,
}

/// Active tactic session (transient, not saved).
#[derive(Debug, Clone)]
pub struct TacticSession {
    pub tactic: Tactic,
    pub board: Board,
    /// Always a suffix of `tactic.pgn`
    pub remaining_solution: VecDeque<SolutionMove>,
    /// SAN of every accepted move, player and scripted alike
    pub played_log: Vec<String>,
    pub player_color: Color,

    // Selection/promotion flow
    pub selection: Option<Selection>,
    pub pending_promotion: Option<PendingPromotion>,

    // Progress
    pub status: SessionStatus,
    pub feedback: Option<MoveFeedback>,
    pub feedback_ticks: u32,
    /// FEN taken just before every player attempt
    pub rollback_snapshot: String,

    // Scheduling
    pub pending_action: Option<PendingAction>,
    /// Bumped by every state-resetting operation
    pub generation: u64,

    // Display
    pub cursor: Square,
    pub promotion_cursor: usize,
}

impl TacticSession {
    pub fn new(tactic: Tactic) -> Result<Self, PositionError> {
        let board = Board::from_fen(&tactic.fen)?;
        let remaining_solution: VecDeque<SolutionMove> = tactic.pgn.iter().cloned().collect();
        let status = if remaining_solution.is_empty() {
            SessionStatus::TacticSolved
        } else {
            SessionStatus::AwaitingSelection
        };
        let snapshot = board.snapshot();
        let player_color = board.side_to_move();

        Ok(Self {
            tactic,
            board,
            remaining_solution,
            played_log: Vec::new(),
            player_color,
            selection: None,
            pending_promotion: None,
            status,
            feedback: None,
            feedback_ticks: 0,
            rollback_snapshot: snapshot,
            pending_action: None,
            generation: 0,
            cursor: Square::E4,
            promotion_cursor: 0,
        })
    }

    pub fn move_cursor(&mut self, dx: i8, dy: i8) {
        let file = (u32::from(self.cursor.file()) as i8 + dx).clamp(0, 7);
        let rank = (u32::from(self.cursor.rank()) as i8 + dy).clamp(0, 7);
        self.cursor = Square::from_coords(File::new(file as u32), Rank::new(rank as u32));
    }

    /// How many moves of the line have been consumed.
    pub fn consumed(&self) -> usize {
        self.tactic.pgn.len() - self.remaining_solution.len()
    }

    /// The move the player (or the playback) must produce next.
    pub fn expected_next(&self) -> Option<&SolutionMove> {
        self.remaining_solution.front()
    }
}

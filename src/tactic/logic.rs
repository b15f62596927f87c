//! Tactic session logic: input dispatch, move judgment, scheduled opponent
//! replies, rollback, solution playback, and retry.
//!
//! All operations are free functions over `&mut TacticSession`. The session
//! holds at most one scheduled action; `tick` advances it once per 100 ms.
//! Operations that reset state bump the session generation so that an action
//! scheduled against the old state fires into the void.

use shakmaty::Role;

use super::types::{
    MoveFeedback, PendingAction, PendingKind, PendingPromotion, Selection, SessionStatus, Tactic,
    TacticSession, PROMOTION_ROLES,
};
use crate::constants::{FEEDBACK_TICKS, OPPONENT_REPLY_TICKS, ROLLBACK_TICKS, SOLUTION_STEP_TICKS};
use crate::position::{AppliedMove, Board, PositionError};

/// Input actions for the trainer (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerInput {
    Up,
    Down,
    Left,
    Right,
    Select,       // Enter - select piece or confirm move/promotion
    Cancel,       // Esc - clear selection or abandon promotion
    ShowSolution, // s
    Retry,        // r
}

/// Process player input. Returns false if the input was swallowed.
pub fn process_input(session: &mut TacticSession, input: TrainerInput) -> bool {
    // Honored in every state
    match input {
        TrainerInput::Retry => {
            retry(session);
            return true;
        }
        TrainerInput::ShowSolution => {
            request_solution(session);
            return true;
        }
        _ => {}
    }

    // Block board input while a wrong move sits on the board awaiting rollback
    if session.feedback == Some(MoveFeedback::Wrong) {
        return false;
    }

    match session.status {
        SessionStatus::AwaitingSelection => {
            match input {
                TrainerInput::Up => session.move_cursor(0, 1),
                TrainerInput::Down => session.move_cursor(0, -1),
                TrainerInput::Left => session.move_cursor(-1, 0),
                TrainerInput::Right => session.move_cursor(1, 0),
                TrainerInput::Select => process_select(session),
                TrainerInput::Cancel => session.selection = None,
                _ => {}
            }
            true
        }
        SessionStatus::AwaitingPromotionChoice => {
            match input {
                TrainerInput::Left => {
                    session.promotion_cursor =
                        (session.promotion_cursor + PROMOTION_ROLES.len() - 1)
                            % PROMOTION_ROLES.len();
                }
                TrainerInput::Right => {
                    session.promotion_cursor =
                        (session.promotion_cursor + 1) % PROMOTION_ROLES.len();
                }
                TrainerInput::Select => {
                    choose_promotion(session, PROMOTION_ROLES[session.promotion_cursor]);
                }
                TrainerInput::Cancel => cancel_promotion(session),
                _ => {}
            }
            true
        }
        _ => false,
    }
}

fn process_select(session: &mut TacticSession) {
    let cursor = session.cursor;
    if let Some(sel) = &session.selection {
        if sel.destinations.iter().any(|d| d.square == cursor) {
            let from = sel.from;
            attempt_move(session, from, cursor);
            return;
        }
    }
    select_square(session, cursor);
}

/// Select the piece on `square`. Clears the selection if the square is empty
/// or holds a piece of the side not to move.
pub fn select_square(session: &mut TacticSession, square: shakmaty::Square) {
    if session.status != SessionStatus::AwaitingSelection {
        return;
    }
    let destinations = session.board.legal_destinations(square);
    if destinations.is_empty() {
        session.selection = None;
    } else {
        session.selection = Some(Selection {
            from: square,
            destinations,
        });
    }
}

/// Attempt the move from `from` to `to`. A pair with no legal move between
/// them is a silent no-op. A promoting pair parks the move and waits for a
/// piece choice; everything else is applied and judged.
pub fn attempt_move(session: &mut TacticSession, from: shakmaty::Square, to: shakmaty::Square) {
    if session.status != SessionStatus::AwaitingSelection
        || session.feedback == Some(MoveFeedback::Wrong)
    {
        return;
    }
    let Some(dest) = session
        .board
        .legal_destinations(from)
        .into_iter()
        .find(|d| d.square == to)
    else {
        return;
    };

    session.selection = None;
    if dest.requires_promotion {
        session.pending_promotion = Some(PendingPromotion { from, to });
        session.promotion_cursor = 0;
        session.status = SessionStatus::AwaitingPromotionChoice;
        return;
    }
    play_attempt(session, from, to, Role::Queen);
}

/// Resolve a parked promotion with the chosen piece.
pub fn choose_promotion(session: &mut TacticSession, role: Role) {
    if session.status != SessionStatus::AwaitingPromotionChoice {
        return;
    }
    let Some(pending) = session.pending_promotion.take() else {
        return;
    };
    session.status = SessionStatus::AwaitingSelection;
    play_attempt(session, pending.from, pending.to, role);
}

/// Abandon a parked promotion. The board is untouched; the player is back to
/// choosing a piece.
pub fn cancel_promotion(session: &mut TacticSession) {
    if session.status != SessionStatus::AwaitingPromotionChoice {
        return;
    }
    session.pending_promotion = None;
    session.selection = None;
    session.status = SessionStatus::AwaitingSelection;
}

/// Snapshot the position, apply the player's move, and judge it.
fn play_attempt(
    session: &mut TacticSession,
    from: shakmaty::Square,
    to: shakmaty::Square,
    promotion: Role,
) {
    session.rollback_snapshot = session.board.snapshot();
    match session.board.apply(from, to, promotion) {
        Ok(applied) => judge_move(session, applied),
        Err(PositionError::IllegalMove { .. }) => {
            // Destinations were computed from the same position
            debug_assert!(false, "destination list out of sync with board");
        }
        Err(_) => unreachable!("apply reports only IllegalMove"),
    }
}

/// Compare the applied move against the head of the remaining line. The
/// recorded text must contain the applied SAN; suffixes like `#` and `!`
/// live on the recorded side.
fn judge_move(session: &mut TacticSession, applied: AppliedMove) {
    let Some(expected) = session.remaining_solution.front() else {
        debug_assert!(false, "player move judged with no line left");
        return;
    };

    if expected.text.contains(&applied.san) {
        session.remaining_solution.pop_front();
        session.played_log.push(applied.san);
        session.feedback = Some(MoveFeedback::Correct);
        session.feedback_ticks = FEEDBACK_TICKS;
        if session.remaining_solution.is_empty() {
            session.status = SessionStatus::TacticSolved;
            session.pending_action = None;
        } else {
            session.status = SessionStatus::AwaitingOpponentReply;
            schedule(session, PendingKind::OpponentReply, OPPONENT_REPLY_TICKS);
        }
    } else {
        // Wrong move stays on the board for the feedback window, then the
        // scheduled rollback restores the snapshot
        session.feedback = Some(MoveFeedback::Wrong);
        session.feedback_ticks = ROLLBACK_TICKS;
        schedule(session, PendingKind::Rollback, ROLLBACK_TICKS);
    }
}

/// Give up on guessing: auto-play the remaining line step by step, ending in
/// `TacticExhausted`.
pub fn request_solution(session: &mut TacticSession) {
    match session.status {
        SessionStatus::AwaitingSelection
        | SessionStatus::AwaitingPromotionChoice
        | SessionStatus::AwaitingOpponentReply => {}
        _ => return,
    }
    cancel_pending(session);

    // An unjudged wrong move must not leak into the playback
    if session.feedback == Some(MoveFeedback::Wrong) {
        restore_snapshot(session);
    }
    session.selection = None;
    session.pending_promotion = None;
    session.feedback = None;
    session.feedback_ticks = 0;

    if session.remaining_solution.is_empty() {
        session.status = SessionStatus::TacticExhausted;
        return;
    }
    session.status = SessionStatus::ShowingSolution;
    schedule(session, PendingKind::SolutionStep, SOLUTION_STEP_TICKS);
}

/// Restart the current tactic from its initial position.
pub fn retry(session: &mut TacticSession) {
    cancel_pending(session);
    let fen = session.tactic.fen.clone();
    if session.board.load(&fen).is_err() {
        debug_assert!(false, "tactic FEN no longer parses");
        session.status = SessionStatus::TacticExhausted;
        return;
    }
    session.remaining_solution = session.tactic.pgn.iter().cloned().collect();
    session.played_log.clear();
    session.selection = None;
    session.pending_promotion = None;
    session.feedback = None;
    session.feedback_ticks = 0;
    session.rollback_snapshot = session.board.snapshot();
    session.promotion_cursor = 0;
    session.status = if session.remaining_solution.is_empty() {
        SessionStatus::TacticSolved
    } else {
        SessionStatus::AwaitingSelection
    };
}

/// Swap in a new tactic. A record whose FEN does not parse is rejected
/// before any session state is touched, so the current tactic keeps running.
pub fn load_tactic(session: &mut TacticSession, tactic: Tactic) -> Result<(), PositionError> {
    let board = Board::from_fen(&tactic.fen)?;
    cancel_pending(session);
    session.remaining_solution = tactic.pgn.iter().cloned().collect();
    session.rollback_snapshot = board.snapshot();
    session.player_color = board.side_to_move();
    session.board = board;
    session.tactic = tactic;
    session.played_log.clear();
    session.selection = None;
    session.pending_promotion = None;
    session.feedback = None;
    session.feedback_ticks = 0;
    session.promotion_cursor = 0;
    session.status = if session.remaining_solution.is_empty() {
        SessionStatus::TacticSolved
    } else {
        SessionStatus::AwaitingSelection
    };
    Ok(())
}

/// Advance the session by one tick: count down feedback and the outstanding
/// scheduled action. An action whose generation no longer matches is dropped
/// without firing.
pub fn tick(session: &mut TacticSession) {
    if session.feedback_ticks > 0 {
        session.feedback_ticks -= 1;
        if session.feedback_ticks == 0 && session.feedback == Some(MoveFeedback::Correct) {
            session.feedback = None;
        }
    }

    let due = match session.pending_action.as_mut() {
        Some(action) => {
            action.ticks_remaining = action.ticks_remaining.saturating_sub(1);
            action.ticks_remaining == 0
        }
        None => return,
    };
    if !due {
        return;
    }
    let Some(action) = session.pending_action.take() else {
        return;
    };
    if action.generation != session.generation {
        return;
    }
    match action.kind {
        PendingKind::OpponentReply => fire_opponent_reply(session),
        PendingKind::Rollback => fire_rollback(session),
        PendingKind::SolutionStep => fire_solution_step(session),
    }
}

fn schedule(session: &mut TacticSession, kind: PendingKind, ticks: u32) {
    session.pending_action = Some(PendingAction {
        kind,
        ticks_remaining: ticks,
        generation: session.generation,
    });
}

/// Invalidate whatever is scheduled. Bumping the generation also kills an
/// action that was already taken off the queue but not yet applied.
fn cancel_pending(session: &mut TacticSession) {
    session.generation += 1;
    session.pending_action = None;
}

fn fire_opponent_reply(session: &mut TacticSession) {
    if !play_scripted_move(session) {
        return;
    }
    session.status = if session.remaining_solution.is_empty() {
        SessionStatus::TacticSolved
    } else {
        SessionStatus::AwaitingSelection
    };
}

fn fire_rollback(session: &mut TacticSession) {
    restore_snapshot(session);
    session.feedback = None;
    session.feedback_ticks = 0;
    session.selection = None;
    session.status = SessionStatus::AwaitingSelection;
}

fn fire_solution_step(session: &mut TacticSession) {
    if !play_scripted_move(session) {
        return;
    }
    if session.remaining_solution.is_empty() {
        session.status = SessionStatus::TacticExhausted;
    } else {
        schedule(session, PendingKind::SolutionStep, SOLUTION_STEP_TICKS);
    }
}

/// Pop the next recorded move and transcribe it onto the board. A move that
/// does not fit the position is a data defect; the session degrades to
/// `TacticExhausted`.
fn play_scripted_move(session: &mut TacticSession) -> bool {
    let Some(expected) = session.remaining_solution.pop_front() else {
        debug_assert!(false, "scripted move fired with no line left");
        session.status = SessionStatus::TacticExhausted;
        return false;
    };
    match session.board.apply_san(&expected.text) {
        Ok(applied) => {
            session.played_log.push(applied.san);
            true
        }
        Err(_) => {
            debug_assert!(false, "unplayable recorded move {:?}", expected.text);
            session.status = SessionStatus::TacticExhausted;
            session.pending_action = None;
            false
        }
    }
}

fn restore_snapshot(session: &mut TacticSession) {
    let snapshot = session.rollback_snapshot.clone();
    // The snapshot came from the board's own serializer
    if session.board.load(&snapshot).is_err() {
        debug_assert!(false, "rollback snapshot no longer parses");
        session.status = SessionStatus::TacticExhausted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactic::types::SolutionMove;
    use shakmaty::Square;

    fn tactic(fen: &str, line: &[&str]) -> Tactic {
        Tactic {
            fen: fen.to_string(),
            pgn: line
                .iter()
                .map(|text| SolutionMove {
                    text: text.to_string(),
                    move_number: None,
                    ravs: None,
                    comments: None,
                })
                .collect(),
            event: None,
            white: None,
            black: None,
            result: None,
        }
    }

    fn session(fen: &str, line: &[&str]) -> TacticSession {
        TacticSession::new(tactic(fen, line)).unwrap()
    }

    const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - - 0 1";
    const LADDER: &str = "7k/8/8/8/8/8/R7/1R5K w - - 0 1";
    const PROMO: &str = "5q1k/4P3/8/8/8/3Q4/8/4K3 w - - 0 1";

    fn tick_n(session: &mut TacticSession, n: u32) {
        for _ in 0..n {
            tick(session);
        }
    }

    #[test]
    fn test_select_square_on_own_piece() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        select_square(&mut s, Square::E1);
        let sel = s.selection.as_ref().unwrap();
        assert_eq!(sel.from, Square::E1);
        assert!(sel.destinations.iter().any(|d| d.square == Square::E8));
    }

    #[test]
    fn test_select_square_clears_on_empty_or_enemy() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        select_square(&mut s, Square::E1);
        select_square(&mut s, Square::D4);
        assert!(s.selection.is_none());
        select_square(&mut s, Square::E1);
        select_square(&mut s, Square::G8);
        assert!(s.selection.is_none());
    }

    #[test]
    fn test_correct_final_move_solves() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        attempt_move(&mut s, Square::E1, Square::E8);
        assert_eq!(s.status, SessionStatus::TacticSolved);
        assert_eq!(s.feedback, Some(MoveFeedback::Correct));
        assert_eq!(s.played_log, vec!["Re8".to_string()]);
        assert!(s.remaining_solution.is_empty());
        assert!(s.pending_action.is_none());
    }

    #[test]
    fn test_correct_move_schedules_opponent_reply() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        attempt_move(&mut s, Square::A2, Square::A7);
        assert_eq!(s.status, SessionStatus::AwaitingOpponentReply);
        let action = s.pending_action.unwrap();
        assert_eq!(action.kind, PendingKind::OpponentReply);

        // Board input is dead while the reply is pending
        assert!(!process_input(&mut s, TrainerInput::Select));

        tick_n(&mut s, crate::constants::OPPONENT_REPLY_TICKS);
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert_eq!(s.played_log, vec!["Ra7".to_string(), "Kg8".to_string()]);
        assert_eq!(s.remaining_solution.len(), 1);

        attempt_move(&mut s, Square::B1, Square::B8);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_wrong_move_rolls_back() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        let initial = s.board.snapshot();
        attempt_move(&mut s, Square::E1, Square::E7);
        assert_eq!(s.feedback, Some(MoveFeedback::Wrong));
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert_ne!(s.board.snapshot(), initial);
        // Not logged, not consumed
        assert!(s.played_log.is_empty());
        assert_eq!(s.remaining_solution.len(), 1);
        // Input dead during the feedback window
        assert!(!process_input(&mut s, TrainerInput::Up));

        tick_n(&mut s, crate::constants::ROLLBACK_TICKS);
        assert_eq!(s.board.snapshot(), initial);
        assert!(s.feedback.is_none());
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert!(process_input(&mut s, TrainerInput::Up));

        // Still solvable after the rollback
        attempt_move(&mut s, Square::E1, Square::E8);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_illegal_pair_is_noop() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        attempt_move(&mut s, Square::E1, Square::D4);
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert!(s.feedback.is_none());
        assert!(s.played_log.is_empty());
    }

    #[test]
    fn test_promotion_flow() {
        let mut s = session(PROMO, &["exf8=Q#"]);
        attempt_move(&mut s, Square::E7, Square::F8);
        assert_eq!(s.status, SessionStatus::AwaitingPromotionChoice);
        let pending = s.pending_promotion.unwrap();
        assert_eq!((pending.from, pending.to), (Square::E7, Square::F8));
        // Board untouched while the picker is open
        assert!(s.board.piece_at(Square::E7).is_some());

        choose_promotion(&mut s, Role::Queen);
        assert_eq!(s.status, SessionStatus::TacticSolved);
        assert_eq!(s.played_log, vec!["exf8=Q".to_string()]);
    }

    #[test]
    fn test_promotion_wrong_piece_is_wrong_move() {
        let mut s = session(PROMO, &["exf8=Q#"]);
        let initial = s.board.snapshot();
        attempt_move(&mut s, Square::E7, Square::F8);
        choose_promotion(&mut s, Role::Knight);
        assert_eq!(s.feedback, Some(MoveFeedback::Wrong));
        tick_n(&mut s, crate::constants::ROLLBACK_TICKS);
        assert_eq!(s.board.snapshot(), initial);
    }

    #[test]
    fn test_promotion_cancel() {
        let mut s = session(PROMO, &["exf8=Q#"]);
        attempt_move(&mut s, Square::E7, Square::F8);
        cancel_promotion(&mut s);
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert!(s.pending_promotion.is_none());
        assert!(s.played_log.is_empty());
        assert_eq!(s.remaining_solution.len(), 1);
    }

    #[test]
    fn test_promotion_picker_input() {
        let mut s = session(PROMO, &["exf8=Q#"]);
        attempt_move(&mut s, Square::E7, Square::F8);
        assert_eq!(s.promotion_cursor, 0);
        process_input(&mut s, TrainerInput::Right);
        assert_eq!(s.promotion_cursor, 1);
        process_input(&mut s, TrainerInput::Left);
        process_input(&mut s, TrainerInput::Left);
        assert_eq!(s.promotion_cursor, PROMOTION_ROLES.len() - 1);
        process_input(&mut s, TrainerInput::Right);
        process_input(&mut s, TrainerInput::Select);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_request_solution_plays_out_line() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        request_solution(&mut s);
        assert_eq!(s.status, SessionStatus::ShowingSolution);
        tick_n(&mut s, crate::constants::SOLUTION_STEP_TICKS);
        assert_eq!(s.played_log.len(), 1);
        assert_eq!(s.status, SessionStatus::ShowingSolution);
        tick_n(&mut s, crate::constants::SOLUTION_STEP_TICKS * 2);
        assert_eq!(
            s.played_log,
            vec!["Ra7".to_string(), "Kg8".to_string(), "Rb8".to_string()]
        );
        assert_eq!(s.status, SessionStatus::TacticExhausted);
    }

    #[test]
    fn test_request_solution_discards_unjudged_wrong_move() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        let initial = s.board.snapshot();
        attempt_move(&mut s, Square::E1, Square::E7);
        request_solution(&mut s);
        // Wrong move rolled back before playback starts
        assert_eq!(s.board.snapshot(), initial);
        tick_n(&mut s, crate::constants::SOLUTION_STEP_TICKS);
        assert_eq!(s.played_log, vec!["Re8".to_string()]);
        assert_eq!(s.status, SessionStatus::TacticExhausted);
    }

    #[test]
    fn test_request_solution_ignored_when_over() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        attempt_move(&mut s, Square::E1, Square::E8);
        request_solution(&mut s);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_retry_restores_initial_state() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        let initial = s.board.snapshot();
        attempt_move(&mut s, Square::A2, Square::A7);
        tick_n(&mut s, crate::constants::OPPONENT_REPLY_TICKS);
        assert_eq!(s.played_log.len(), 2);

        retry(&mut s);
        assert_eq!(s.board.snapshot(), initial);
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert!(s.played_log.is_empty());
        assert_eq!(s.remaining_solution.len(), 3);
        assert!(s.pending_action.is_none());
    }

    #[test]
    fn test_retry_cancels_pending_rollback() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        let initial = s.board.snapshot();
        attempt_move(&mut s, Square::E1, Square::E7);
        retry(&mut s);
        assert_eq!(s.board.snapshot(), initial);
        // Ticks past the old deadline must not fire the stale rollback
        tick_n(&mut s, crate::constants::ROLLBACK_TICKS * 2);
        assert_eq!(s.board.snapshot(), initial);
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
    }

    #[test]
    fn test_retry_cancels_pending_opponent_reply() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        attempt_move(&mut s, Square::A2, Square::A7);
        retry(&mut s);
        tick_n(&mut s, crate::constants::OPPONENT_REPLY_TICKS * 2);
        // No scripted Kg8 against the reset board
        assert!(s.played_log.is_empty());
        assert_eq!(s.remaining_solution.len(), 3);
    }

    #[test]
    fn test_load_tactic_replaces_session() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        attempt_move(&mut s, Square::A2, Square::A7);

        load_tactic(&mut s, tactic(BACK_RANK, &["Re8#"])).unwrap();
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
        assert!(s.played_log.is_empty());
        assert_eq!(s.remaining_solution.len(), 1);

        // The old tactic's scheduled reply is dead
        tick_n(&mut s, crate::constants::OPPONENT_REPLY_TICKS * 2);
        assert!(s.played_log.is_empty());

        attempt_move(&mut s, Square::E1, Square::E8);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_load_tactic_bad_fen_keeps_current_session() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        let before = s.board.snapshot();
        assert!(load_tactic(&mut s, tactic("garbage", &["e4"])).is_err());
        assert_eq!(s.board.snapshot(), before);
        assert_eq!(s.tactic.fen, BACK_RANK);
        assert_eq!(s.remaining_solution.len(), 1);
    }

    #[test]
    fn test_correct_feedback_fades() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        attempt_move(&mut s, Square::A2, Square::A7);
        assert_eq!(s.feedback, Some(MoveFeedback::Correct));
        tick_n(&mut s, crate::constants::FEEDBACK_TICKS);
        assert!(s.feedback.is_none());
    }

    #[test]
    fn test_black_to_move_tactic() {
        let mut s = session("6k1/5ppp/8/8/8/8/r4PPP/6K1 b - - 0 1", &["Ra1#"]);
        assert_eq!(s.player_color, shakmaty::Color::Black);
        attempt_move(&mut s, Square::A2, Square::A1);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_process_input_select_flow() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        s.cursor = Square::E1;
        process_input(&mut s, TrainerInput::Select);
        assert!(s.selection.is_some());
        s.cursor = Square::E8;
        process_input(&mut s, TrainerInput::Select);
        assert_eq!(s.status, SessionStatus::TacticSolved);
    }

    #[test]
    fn test_process_input_cancel_clears_selection() {
        let mut s = session(BACK_RANK, &["Re8#"]);
        select_square(&mut s, Square::E1);
        process_input(&mut s, TrainerInput::Cancel);
        assert!(s.selection.is_none());
    }

    #[test]
    fn test_process_input_retry_always_works() {
        let mut s = session(LADDER, &["Ra7", "Kg8", "Rb8#"]);
        request_solution(&mut s);
        tick_n(&mut s, crate::constants::SOLUTION_STEP_TICKS * 3);
        assert_eq!(s.status, SessionStatus::TacticExhausted);
        assert!(process_input(&mut s, TrainerInput::Retry));
        assert_eq!(s.status, SessionStatus::AwaitingSelection);
    }
}

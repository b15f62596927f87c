//! Keyboard input mapping for the trainer screen.
//!
//! Translates crossterm key events into UI-agnostic inputs so the engine
//! never sees terminal types.

use crossterm::event::{KeyCode, KeyEvent};

use crate::tactic::TrainerInput;

/// What a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    /// Forwarded to the tactic engine
    Trainer(TrainerInput),
    /// Load a fresh random tactic
    NextTactic,
    Quit,
    /// Unbound key
    None,
}

pub fn map_key(key: KeyEvent) -> AppInput {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppInput::Trainer(TrainerInput::Up),
        KeyCode::Down | KeyCode::Char('j') => AppInput::Trainer(TrainerInput::Down),
        KeyCode::Left | KeyCode::Char('h') => AppInput::Trainer(TrainerInput::Left),
        KeyCode::Right | KeyCode::Char('l') => AppInput::Trainer(TrainerInput::Right),
        KeyCode::Enter | KeyCode::Char(' ') => AppInput::Trainer(TrainerInput::Select),
        KeyCode::Esc => AppInput::Trainer(TrainerInput::Cancel),
        KeyCode::Char('s') | KeyCode::Char('S') => AppInput::Trainer(TrainerInput::ShowSolution),
        KeyCode::Char('r') | KeyCode::Char('R') => AppInput::Trainer(TrainerInput::Retry),
        KeyCode::Char('n') | KeyCode::Char('N') => AppInput::NextTactic,
        KeyCode::Char('q') | KeyCode::Char('Q') => AppInput::Quit,
        _ => AppInput::None,
    }
}

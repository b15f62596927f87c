//! Terminal UI for the trainer. Tightly coupled to ratatui; the engine never
//! sees these types.

pub mod board_scene;
pub mod game_common;

use ratatui::Frame;

use crate::tactic::TacticSession;

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, session: &TacticSession) {
    let area = frame.size();
    board_scene::render_board_scene(frame, area, session);
}

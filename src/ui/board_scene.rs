//! Tactic board UI rendering.

use super::game_common::{
    create_game_layout, render_info_panel_frame, render_result_banner, render_status_bar,
    render_waiting_status_bar, GameResultType,
};
use crate::tactic::types::PROMOTION_ROLES;
use crate::tactic::{MoveFeedback, SessionStatus, TacticSession};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use shakmaty::{Piece, Role, Square};

/// Render the trainer scene.
pub fn render_board_scene(frame: &mut Frame, area: Rect, session: &TacticSession) {
    // Content: 1 for progress + 1 for title + 18 for board = 20
    let layout = create_game_layout(frame, area, " Tactics ", Color::LightGreen, 20, 26);

    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress line
            Constraint::Length(1), // Tactic title
            Constraint::Min(18),   // Board
        ])
        .split(layout.content);

    render_progress(frame, content_chunks[0], session);
    render_tactic_title(frame, content_chunks[1], session);
    render_board(frame, content_chunks[2], session);
    render_status(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session);

    match session.status {
        SessionStatus::TacticSolved => render_result_banner(
            frame,
            content_chunks[2],
            GameResultType::Solved,
            "SOLVED!",
            "You found the whole line",
            "[R] Retry  [N] Next  [Q] Quit",
        ),
        SessionStatus::TacticExhausted => render_result_banner(
            frame,
            content_chunks[2],
            GameResultType::Exhausted,
            "LINE OVER",
            "The solution has been played out",
            "[R] Retry  [N] Next  [Q] Quit",
        ),
        _ => {}
    }
}

fn render_progress(frame: &mut Frame, area: Rect, session: &TacticSession) {
    let to_play = if session.player_color == shakmaty::Color::White {
        "White"
    } else {
        "Black"
    };
    let spans = vec![
        Span::styled(
            format!("{} to play ", to_play),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "Line: {}/{}",
                session.consumed(),
                session.tactic.pgn.len()
            ),
            Style::default().fg(Color::LightGreen),
        ),
    ];
    let text = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(text, area);
}

fn render_tactic_title(frame: &mut Frame, area: Rect, session: &TacticSession) {
    let Some(event) = &session.tactic.event else {
        return;
    };
    let text = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", event),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(text, area);
}

fn render_board(frame: &mut Frame, area: Rect, session: &TacticSession) {
    let cell_width: u16 = 5;
    let board_width: u16 = 3 + (cell_width * 8) + 1;
    let board_height: u16 = 18;

    let x_offset = area.x + (area.width.saturating_sub(board_width)) / 2;
    let y_offset = area.y + (area.height.saturating_sub(board_height)) / 2;

    let border_color = Color::Rgb(80, 80, 80);
    let from_move_color = Color::Rgb(180, 140, 80);
    let to_move_color = Color::Rgb(255, 255, 100);

    let last_move = session.board.history_last_move();
    let get_highlight_color = |sq: Square| -> Option<Color> {
        let (from, to) = last_move?;
        if sq == from {
            Some(from_move_color)
        } else if sq == to {
            Some(to_move_color)
        } else {
            None
        }
    };

    // Top border
    let mut top_border = String::from("  \u{250C}");
    for i in 0..8 {
        top_border.push_str("\u{2500}\u{2500}\u{2500}\u{2500}");
        if i < 7 {
            top_border.push('\u{252C}');
        }
    }
    top_border.push('\u{2510}');
    let top = Paragraph::new(top_border).style(Style::default().fg(border_color));
    frame.render_widget(top, Rect::new(x_offset, y_offset, board_width, 1));

    for rank in (0..8u8).rev() {
        let row_index = 7 - rank;
        let y = y_offset + 1 + (row_index as u16 * 2);
        let rank_label = format!("{} ", rank + 1);

        let label = Paragraph::new(rank_label).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(label, Rect::new(x_offset, y, 2, 1));

        let left_border = Paragraph::new("\u{2502}").style(Style::default().fg(border_color));
        frame.render_widget(left_border, Rect::new(x_offset + 2, y, 1, 1));

        for file in 0..8u8 {
            let x = x_offset + 3 + (file as u16 * cell_width);
            let sq = square_at(file, rank);

            let is_cursor = session.cursor == sq;
            let is_selected = session.selection.as_ref().is_some_and(|s| s.from == sq);
            let is_legal_destination = session
                .selection
                .as_ref()
                .is_some_and(|s| s.destinations.iter().any(|d| d.square == sq));
            let highlight_color = get_highlight_color(sq);
            let is_from_square = highlight_color == Some(from_move_color);
            let is_last_move = highlight_color.is_some();

            let piece = session.board.piece_at(sq);

            let (content, fg_color) = if is_cursor {
                let color = if is_last_move {
                    if is_from_square {
                        from_move_color
                    } else {
                        to_move_color
                    }
                } else {
                    piece.map(glyph_color).unwrap_or(Color::Rgb(100, 100, 100))
                };
                match piece {
                    Some(p) => (format!("[{}]", piece_glyph(p)), color),
                    None if is_legal_destination => {
                        (" \u{25C6}  ".to_string(), Color::Rgb(200, 100, 200))
                    }
                    None => (" \u{25A1}  ".to_string(), color),
                }
            } else if is_selected {
                match piece {
                    Some(p) => (format!("<{}>", piece_glyph(p)), Color::Rgb(100, 200, 100)),
                    None => ("    ".to_string(), Color::Reset),
                }
            } else if is_legal_destination {
                match piece {
                    Some(p) => (format!(" {}  ", piece_glyph(p)), glyph_color(p)),
                    None => (" \u{00B7}  ".to_string(), Color::Rgb(200, 100, 200)),
                }
            } else if is_last_move {
                let move_color = if is_from_square {
                    from_move_color
                } else {
                    to_move_color
                };
                match piece {
                    Some(p) => (format!(" {}  ", piece_glyph(p)), move_color),
                    None if is_from_square => (" \u{00B7}  ".to_string(), from_move_color),
                    None => ("    ".to_string(), Color::Reset),
                }
            } else {
                match piece {
                    Some(p) => (format!(" {}  ", piece_glyph(p)), glyph_color(p)),
                    None => ("    ".to_string(), Color::Reset),
                }
            };

            let style = Style::default().fg(fg_color);
            let square = Paragraph::new(content).style(style);
            frame.render_widget(square, Rect::new(x, y, 4, 1));

            let sep = Paragraph::new("\u{2502}").style(Style::default().fg(border_color));
            frame.render_widget(sep, Rect::new(x + 4, y, 1, 1));
        }

        if rank > 0 {
            let mut sep_line = String::from("  \u{251C}");
            for file in 0..8 {
                sep_line.push_str("\u{2500}\u{2500}\u{2500}\u{2500}");
                if file < 7 {
                    sep_line.push('\u{253C}');
                }
            }
            sep_line.push('\u{2524}');
            let sep = Paragraph::new(sep_line).style(Style::default().fg(border_color));
            frame.render_widget(sep, Rect::new(x_offset, y + 1, board_width, 1));
        }
    }

    // Bottom border
    let mut bottom_border = String::from("  \u{2514}");
    for i in 0..8 {
        bottom_border.push_str("\u{2500}\u{2500}\u{2500}\u{2500}");
        if i < 7 {
            bottom_border.push('\u{2534}');
        }
    }
    bottom_border.push('\u{2518}');
    let bottom = Paragraph::new(bottom_border).style(Style::default().fg(border_color));
    frame.render_widget(bottom, Rect::new(x_offset, y_offset + 16, board_width, 1));

    // File labels
    let files = "   A    B    C    D    E    F    G    H";
    let file_labels = Paragraph::new(files).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        file_labels,
        Rect::new(x_offset, y_offset + 17, board_width, 1),
    );
}

fn render_status(frame: &mut Frame, area: Rect, session: &TacticSession) {
    match session.status {
        SessionStatus::AwaitingOpponentReply => {
            render_waiting_status_bar(frame, area, "Opponent responds...");
            return;
        }
        SessionStatus::ShowingSolution => {
            render_waiting_status_bar(frame, area, "Playing the solution...");
            return;
        }
        SessionStatus::AwaitingPromotionChoice => {
            render_promotion_picker(frame, area, session);
            return;
        }
        SessionStatus::TacticSolved | SessionStatus::TacticExhausted => {
            render_status_bar(
                frame,
                area,
                "",
                Color::White,
                &[("[R]", "Retry"), ("[N]", "Next"), ("[Q]", "Quit")],
            );
            return;
        }
        SessionStatus::AwaitingSelection => {}
    }

    match session.feedback {
        Some(MoveFeedback::Correct) => {
            render_status_bar(frame, area, "Correct!", Color::Green, &[]);
            return;
        }
        Some(MoveFeedback::Wrong) => {
            render_status_bar(frame, area, "Wrong move", Color::Red, &[]);
            return;
        }
        None => {}
    }

    let (status_text, status_color) = if session.selection.is_some() {
        ("Select destination", Color::Cyan)
    } else {
        ("Find the best move", Color::White)
    };

    let controls: &[(&str, &str)] = if session.selection.is_some() {
        &[
            ("[Arrows]", "Move"),
            ("[Enter]", "Confirm"),
            ("[Esc]", "Cancel"),
        ]
    } else {
        &[
            ("[Enter]", "Select"),
            ("[S]", "Solution"),
            ("[R]", "Retry"),
            ("[N]", "Next"),
            ("[Q]", "Quit"),
        ]
    };

    render_status_bar(frame, area, status_text, status_color, controls);
}

fn render_promotion_picker(frame: &mut Frame, area: Rect, session: &TacticSession) {
    if area.height < 1 {
        return;
    }

    let mut spans = vec![Span::styled(
        "Promote to: ",
        Style::default().fg(Color::Cyan),
    )];
    for (i, role) in PROMOTION_ROLES.iter().enumerate() {
        let name = role_name(*role);
        let style = if i == session.promotion_cursor {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if i == session.promotion_cursor {
            format!("[{}]", name)
        } else {
            format!(" {} ", name)
        };
        spans.push(Span::styled(text, style));
    }

    let picker = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(picker, Rect { height: 1, ..area });

    if area.height >= 2 {
        let controls = Paragraph::new(Line::from(vec![
            Span::styled("[\u{2190}/\u{2192}]", Style::default().fg(Color::White)),
            Span::styled(" Choose  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Enter]", Style::default().fg(Color::White)),
            Span::styled(" Confirm  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Esc]", Style::default().fg(Color::White)),
            Span::styled(" Cancel", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(
            controls,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &TacticSession) {
    let inner = render_info_panel_frame(frame, area);

    let mut lines = vec![Line::from(Span::styled(
        "TACTIC",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];

    if let (Some(white), Some(black)) = (&session.tactic.white, &session.tactic.black) {
        lines.push(Line::from(Span::styled(
            format!("{} - {}", white, black),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(result) = &session.tactic.result {
        lines.push(Line::from(vec![
            Span::styled("Result: ", Style::default().fg(Color::DarkGray)),
            Span::styled(result.clone(), Style::default().fg(Color::White)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("You play: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if session.player_color == shakmaty::Color::White {
                "White"
            } else {
                "Black"
            },
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Line: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", session.consumed(), session.tactic.pgn.len()),
            Style::default().fg(Color::White),
        ),
    ]));

    if !session.played_log.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Moves",
            Style::default().fg(Color::DarkGray),
        )));
        lines.extend(played_move_lines(session));
    }

    let text = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(text, inner);
}

/// Format the accepted moves as numbered pairs, starting from the side the
/// tactic's position has to move.
fn played_move_lines(session: &TacticSession) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut moves = session.played_log.iter();
    let mut number = 1u32;

    if session.player_color == shakmaty::Color::Black {
        if let Some(first) = moves.next() {
            lines.push(Line::from(Span::styled(
                format!("{}... {}", number, first),
                Style::default().fg(Color::White),
            )));
            number += 1;
        }
    }

    while let Some(first) = moves.next() {
        let text = match moves.next() {
            Some(second) => format!("{}. {} {}", number, first, second),
            None => format!("{}. {}", number, first),
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::White),
        )));
        number += 1;
    }

    lines
}

fn square_at(file: u8, rank: u8) -> Square {
    Square::from_coords(
        shakmaty::File::new(file as u32),
        shakmaty::Rank::new(rank as u32),
    )
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::Queen => "Queen",
        Role::Rook => "Rook",
        Role::Bishop => "Bishop",
        Role::Knight => "Knight",
        Role::Pawn => "Pawn",
        Role::King => "King",
    }
}

/// Piece glyph for a square. White pieces use the filled glyphs, which read
/// better on dark terminals.
fn piece_glyph(piece: Piece) -> char {
    match (piece.color, piece.role) {
        (shakmaty::Color::White, Role::King) => '\u{265A}',
        (shakmaty::Color::White, Role::Queen) => '\u{265B}',
        (shakmaty::Color::White, Role::Rook) => '\u{265C}',
        (shakmaty::Color::White, Role::Bishop) => '\u{265D}',
        (shakmaty::Color::White, Role::Knight) => '\u{265E}',
        (shakmaty::Color::White, Role::Pawn) => '\u{265F}',
        (shakmaty::Color::Black, Role::King) => '\u{2654}',
        (shakmaty::Color::Black, Role::Queen) => '\u{2655}',
        (shakmaty::Color::Black, Role::Rook) => '\u{2656}',
        (shakmaty::Color::Black, Role::Bishop) => '\u{2657}',
        (shakmaty::Color::Black, Role::Knight) => '\u{2658}',
        (shakmaty::Color::Black, Role::Pawn) => '\u{2659}',
    }
}

fn glyph_color(piece: Piece) -> Color {
    if piece.color == shakmaty::Color::White {
        Color::White
    } else {
        Color::Rgb(140, 140, 140)
    }
}

//! Frame projection: session state to plain text lines.
//!
//! Kept free of terminal I/O so frames can be asserted on in tests. Each
//! board cell renders as two characters; the HUD shows scores, the
//! remaining piece pool with its selection keys and a per-phase message.

use vs_tetris_core::{Board, GameSession};
use vs_tetris_types::{Cell, GameMode, GamePhase, PieceKind, BOARD_COLS, BOARD_ROWS};

/// Two-character glyph for one board cell.
fn cell_glyph(cell: Cell) -> &'static str {
    match cell {
        Cell::Empty => "  ",
        Cell::Filled(PieceKind::I) => "@@",
        Cell::Filled(PieceKind::T) => "##",
        Cell::Filled(PieceKind::J) => "$$",
        Cell::Filled(PieceKind::L) => "%%",
        Cell::Filled(PieceKind::S) => "&&",
        Cell::Filled(PieceKind::Z) => "**",
        Cell::Filled(PieceKind::O) => "++",
        Cell::Ghost => "()",
        Cell::Clearing => "><",
        Cell::Collision => "!!",
    }
}

/// Render one board (with frame) as `BOARD_ROWS + 2` lines.
fn board_lines(board: &Board) -> Vec<String> {
    let inner = BOARD_COLS * 2;
    let mut lines = Vec::with_capacity(BOARD_ROWS + 2);
    lines.push(format!("+{}+", "-".repeat(inner)));
    for row in 0..BOARD_ROWS {
        let mut line = String::with_capacity(inner + 2);
        line.push('|');
        for col in 0..BOARD_COLS {
            let cell = board
                .get(row as i8, col as i8)
                .unwrap_or(Cell::Empty);
            line.push_str(cell_glyph(cell));
        }
        line.push('|');
        lines.push(line);
    }
    lines.push(format!("+{}+", "-".repeat(inner)));
    lines
}

/// Celebration line for 1..=4 simultaneous clears.
fn cleared_message(lines: usize) -> &'static str {
    match lines {
        1 => "line!",
        2 => "double!!",
        3 => "triple!!!",
        _ => "!! TETRIS !!",
    }
}

/// The status line shown under the boards for the current phase.
fn status_line(session: &GameSession) -> String {
    let versus = session.mode().is_versus();
    let player = session.current_player() + 1;
    match session.phase() {
        GamePhase::Choose => {
            if versus {
                format!("player {player}: choose a piece (i t j l s z o)")
            } else {
                "choose a piece (i t j l s z o)".to_string()
            }
        }
        GamePhase::Place => "h/l or arrows: move   r: rotate   j: drop".to_string(),
        GamePhase::Cleared => format!(
            "{}  (press any key)",
            cleared_message(session.lines_cleared())
        ),
        GamePhase::Lose => match session.winner() {
            Some(winner) => format!("player {player} is buried - player {} wins!", winner + 1),
            None => "game over".to_string(),
        },
        GamePhase::Win => {
            if versus {
                match session.winner() {
                    Some(winner) => format!("all pieces used - player {} wins!", winner + 1),
                    None => "all pieces used - it's a draw!".to_string(),
                }
            } else {
                "all pieces used - you win!".to_string()
            }
        }
    }
}

/// Remaining-pieces line, e.g. `i x20  t x20  ...`.
fn pool_line(session: &GameSession) -> String {
    PieceKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "{} x{:02}",
                kind.as_char(),
                session.pieces_left()[kind.index()]
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Project the whole session into a text frame.
pub fn render_frame(session: &GameSession) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("  =*= v s - t e t r i s =*=".to_string());
    lines.push(String::new());

    match session.mode() {
        GameMode::Singleplayer => {
            let board = board_lines(&session.display_board(0));
            let hud = [
                format!("score: {:>5}", session.score(0)),
                String::new(),
                pool_line(session),
            ];
            for (i, line) in board.iter().enumerate() {
                let extra = hud.get(i.wrapping_sub(1)).map(String::as_str).unwrap_or("");
                lines.push(format!("{line}   {extra}"));
            }
        }
        GameMode::VsPlayer | GameMode::VsAi => {
            let left = board_lines(&session.display_board(0));
            let right = board_lines(&session.display_board(1));
            let marker = |p: usize| {
                if session.current_player() == p && !session.is_over() {
                    ">"
                } else {
                    " "
                }
            };
            lines.push(format!(
                "{} player 1  score {:>4}     {} {}  score {:>4}",
                marker(0),
                session.score(0),
                marker(1),
                if session.mode() == GameMode::VsAi {
                    "computer"
                } else {
                    "player 2"
                },
                session.score(1),
            ));
            for (l, r) in left.iter().zip(right.iter()) {
                lines.push(format!("{l}   {r}"));
            }
            lines.push(pool_line(session));
        }
    }

    lines.push(String::new());
    lines.push(status_line(session));
    lines.push("q: quit".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use vs_tetris_types::{GameAction, GameMode};

    #[test]
    fn frame_contains_board_and_pool() {
        let session = GameSession::new(GameMode::Singleplayer, 1);
        let frame = render_frame(&session);

        assert!(frame.iter().any(|l| l.contains("i x20")));
        assert!(frame.iter().any(|l| l.contains("choose a piece")));
        // 15 board rows plus frame are present.
        let border = format!("+{}+", "-".repeat(BOARD_COLS * 2));
        assert_eq!(frame.iter().filter(|l| l.starts_with(&border)).count(), 2);
    }

    #[test]
    fn versus_frame_shows_both_boards_and_turn_marker() {
        let session = GameSession::new(GameMode::VsAi, 1);
        let frame = render_frame(&session);

        assert!(frame.iter().any(|l| l.contains("computer")));
        assert!(frame.iter().any(|l| l.starts_with("> player 1")));
    }

    #[test]
    fn cleared_frame_shows_celebration() {
        let mut session = GameSession::new(GameMode::Singleplayer, 1);
        // Complete the bottom row with an I piece dropped into the gap.
        for col in 0..(BOARD_COLS as i8 - 1) {
            session
                .board_mut(0)
                .set(BOARD_ROWS as i8 - 1, col, Cell::Filled(PieceKind::Z));
        }
        session.step(GameAction::Choose(PieceKind::I));
        for _ in 0..BOARD_COLS {
            session.step(GameAction::MoveRight);
        }
        session.step(GameAction::Drop);
        assert_eq!(session.phase(), GamePhase::Cleared);

        let frame = render_frame(&session);
        assert!(frame.iter().any(|l| l.contains("line!")));
        assert!(frame.iter().any(|l| l.contains("><")));
    }

    #[test]
    fn every_cell_value_has_a_two_char_glyph() {
        let mut cells = vec![Cell::Empty, Cell::Ghost, Cell::Clearing, Cell::Collision];
        cells.extend(PieceKind::ALL.map(Cell::Filled));
        for cell in cells {
            assert_eq!(cell_glyph(cell).chars().count(), 2);
        }
    }
}

//! Keyboard input: phase-coherent key mapping and the human action source.
//!
//! The mapping is a pure function from (phase, key) to action, so a key
//! can never produce an action the session would reject: piece letters
//! only work while choosing, movement keys only while placing, and any
//! key acknowledges a pending line clear.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use vs_tetris_core::{ActionSource, GameSession};
use vs_tetris_types::{GameAction, GamePhase, PieceKind};

/// Map a key to an action valid in the given phase.
pub fn map_key(phase: GamePhase, code: KeyCode) -> Option<GameAction> {
    match phase {
        GamePhase::Choose => match code {
            KeyCode::Char(c) => PieceKind::from_char(c).map(GameAction::Choose),
            _ => None,
        },
        GamePhase::Place => match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::MoveLeft),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),
            KeyCode::Up | KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Rotate),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char(' ') => {
                Some(GameAction::Drop)
            }
            _ => None,
        },
        // Any key acknowledges the cleared lines.
        GamePhase::Cleared => Some(GameAction::FinishClearing),
        GamePhase::Lose | GamePhase::Win => None,
    }
}

/// Whether this key asks to leave the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Human player action source.
///
/// Blocks for the first action of a frame, then drains whatever key
/// events are already queued and ends the frame with `QueueEmpty` so the
/// board is redrawn between bursts of input.
pub struct HumanInput {
    yielded_this_frame: bool,
    quit: bool,
}

impl HumanInput {
    pub fn new() -> Self {
        Self {
            yielded_this_frame: false,
            quit: false,
        }
    }

    /// Whether the player asked to quit (or the input channel broke).
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl Default for HumanInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionSource for HumanInput {
    fn next_action(&mut self, session: &GameSession) -> GameAction {
        loop {
            if self.yielded_this_frame {
                // Only consume events that are already pending; a frame
                // ends as soon as the queue runs dry.
                match event::poll(Duration::ZERO) {
                    Ok(true) => {}
                    Ok(false) => {
                        self.yielded_this_frame = false;
                        return GameAction::QueueEmpty;
                    }
                    Err(_) => {
                        self.quit = true;
                        return GameAction::QueueEmpty;
                    }
                }
            }

            let Ok(ev) = event::read() else {
                self.quit = true;
                return GameAction::QueueEmpty;
            };
            let Event::Key(key) = ev else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if should_quit(key) {
                self.quit = true;
                return GameAction::QueueEmpty;
            }
            if let Some(action) = map_key(session.phase(), key.code) {
                self.yielded_this_frame = true;
                return action;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_keys_select_pieces() {
        for kind in PieceKind::ALL {
            assert_eq!(
                map_key(GamePhase::Choose, KeyCode::Char(kind.as_char())),
                Some(GameAction::Choose(kind))
            );
        }
        assert_eq!(map_key(GamePhase::Choose, KeyCode::Char('x')), None);
        assert_eq!(map_key(GamePhase::Choose, KeyCode::Left), None);
    }

    #[test]
    fn place_keys_move_rotate_drop() {
        assert_eq!(
            map_key(GamePhase::Place, KeyCode::Char('h')),
            Some(GameAction::MoveLeft)
        );
        assert_eq!(
            map_key(GamePhase::Place, KeyCode::Char('l')),
            Some(GameAction::MoveRight)
        );
        assert_eq!(
            map_key(GamePhase::Place, KeyCode::Char('r')),
            Some(GameAction::Rotate)
        );
        assert_eq!(
            map_key(GamePhase::Place, KeyCode::Char('j')),
            Some(GameAction::Drop)
        );
        // Piece letters that are also movement keys must not leak the
        // Choose meaning into the Place phase.
        assert_eq!(
            map_key(GamePhase::Place, KeyCode::Char('i')),
            None
        );
    }

    #[test]
    fn any_key_acknowledges_cleared() {
        assert_eq!(
            map_key(GamePhase::Cleared, KeyCode::Enter),
            Some(GameAction::FinishClearing)
        );
        assert_eq!(
            map_key(GamePhase::Cleared, KeyCode::Char('x')),
            Some(GameAction::FinishClearing)
        );
    }

    #[test]
    fn terminal_phases_accept_nothing() {
        assert_eq!(map_key(GamePhase::Lose, KeyCode::Enter), None);
        assert_eq!(map_key(GamePhase::Win, KeyCode::Char('j')), None);
    }

    #[test]
    fn quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('j'))));
    }
}

//! Key mapping and soft-drop hold tracking for terminal environments.
//!
//! Terminals often do not emit key release events, so the "soft drop held"
//! signal uses a timeout: while Down keeps arriving (presses or repeats) the
//! hold stays active, and it releases shortly after the key stream stops.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map keyboard input to game actions.
pub fn map_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SoftDrop),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

// Without release events, a single tap must not read as a sustained hold.
const HOLD_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks whether the soft-drop key is being held.
#[derive(Debug, Clone)]
pub struct SoftDropHold {
    held: bool,
    last_press: Instant,
    release_timeout_ms: u32,
}

impl SoftDropHold {
    pub fn new() -> Self {
        Self {
            held: false,
            last_press: Instant::now(),
            release_timeout_ms: HOLD_RELEASE_TIMEOUT_MS,
        }
    }

    #[cfg(test)]
    fn with_timeout_ms(timeout_ms: u32) -> Self {
        Self {
            release_timeout_ms: timeout_ms,
            ..Self::new()
        }
    }

    /// Record a mapped action; a soft drop press (or repeat) refreshes the
    /// hold window.
    pub fn note_action(&mut self, action: GameAction) {
        if action == GameAction::SoftDrop {
            self.held = true;
            self.last_press = Instant::now();
        }
    }

    /// Record a key release event, for terminals that do send them.
    pub fn note_release(&mut self, code: KeyCode) {
        if matches!(
            code,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S')
        ) {
            self.held = false;
        }
    }

    /// Whether soft drop is currently held, auto-releasing after the timeout.
    pub fn is_held(&mut self) -> bool {
        if self.held && self.last_press.elapsed().as_millis() as u32 > self.release_timeout_ms {
            self.held = false;
        }
        self.held
    }
}

impl Default for SoftDropHold {
    fn default() -> Self {
        Self::new()
    }
}

//! Game state module - the session controller
//!
//! Owns the board, active piece, piece queue, and session counters, and
//! sequences collision checks, locking, line clearing, scoring, and spawning
//! on each command. Blocked moves and rotations are ordinary no-ops; the only
//! terminal condition is game over, which accepts nothing but a reset.

use crate::core::board::{Board, RowClears};
use crate::core::pieces::{fits, merge, rotated_with_kicks, ActivePiece};
use crate::core::rng::PieceQueue;
use crate::core::scoring;
use crate::types::{GameAction, PieceKind};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    queue: PieceQueue,
    score: u32,
    highscore: u32,
    level: u32,
    lines: u32,
    /// Rows cleared by the most recent lock (0..=4), reset every drop cycle.
    last_cleared: u32,
    game_over: bool,
    paused: bool,
    /// Cleared-row events from the most recent lock, drained by the caller.
    row_events: RowClears,
}

impl GameState {
    /// Create a new session with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed),
            score: 0,
            highscore: 0,
            level: 1,
            lines: 0,
            last_cleared: 0,
            game_over: false,
            paused: false,
            row_events: RowClears::new(),
        };
        state.spawn_next();
        state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn last_cleared(&self) -> u32 {
        self.last_cleared
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    /// Upcoming pieces, front first.
    pub fn next_pieces(&self) -> &[PieceKind] {
        self.queue.preview()
    }

    /// Seed the session's best score from persistence.
    pub fn set_highscore(&mut self, highscore: u32) {
        self.highscore = highscore;
    }

    /// Apply a command from the input layer.
    ///
    /// Returns whether the command had an effect. After game over only
    /// `Reset` is accepted; while paused only `Pause` and `Reset` are.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Reset {
            return false;
        }
        if self.paused && !matches!(action, GameAction::Pause | GameAction::Reset) {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => {
                self.advance_fall();
                true
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Clock-driven gravity step. Returns true when the piece locked.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over {
            return false;
        }
        self.advance_fall()
    }

    /// Try to shift the active piece horizontally. No-op when blocked.
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if fits(&self.board, &active.matrix, active.x + dx, active.y) {
            self.active = Some(ActivePiece {
                x: active.x + dx,
                ..active
            });
            return true;
        }

        false
    }

    /// Try to rotate the active piece, with the three-point kick fallback.
    /// Matrix and anchor are unchanged when every kick position collides.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        match rotated_with_kicks(&self.board, &active) {
            Some((matrix, x)) => {
                self.active = Some(ActivePiece {
                    matrix,
                    x,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Move the piece down one row, locking it when the move is blocked.
    /// Returns true when the piece locked.
    fn advance_fall(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if fits(&self.board, &active.matrix, active.x, active.y + 1) {
            self.active = Some(ActivePiece {
                y: active.y + 1,
                ..active
            });
            false
        } else {
            self.lock_active();
            true
        }
    }

    /// Drop the active piece to its resting row and lock it once.
    fn hard_drop(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        let mut y = active.y;
        while fits(&self.board, &active.matrix, active.x, y + 1) {
            y += 1;
        }
        self.active = Some(ActivePiece { y, ..active });
        self.lock_active();
    }

    /// Merge the active piece, clear full rows, update score/level, and
    /// spawn the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        merge(&mut self.board, &active);

        let cleared = self.board.clear_full_rows();
        let count = cleared.len() as u32;
        self.row_events = cleared;
        self.last_cleared = count;
        self.lines += count;
        // Points use the level in effect when the rows were cleared.
        self.score += scoring::score_for_clear(count, self.level);
        self.level = scoring::level_for_lines(self.lines);

        self.spawn_next();
    }

    /// Pop the next piece from the queue and place it at spawn. A blocked
    /// spawn ends the session.
    fn spawn_next(&mut self) {
        let kind = self.queue.pop();
        let piece = ActivePiece::spawn(kind);

        if !fits(&self.board, &piece.matrix, piece.x, piece.y) {
            self.game_over = true;
            self.highscore = self.highscore.max(self.score);
        }

        // Keep the blocking piece visible for the game-over screen.
        self.active = Some(piece);
    }

    /// Take the cleared-row events from the most recent lock.
    pub fn take_row_clears(&mut self) -> RowClears {
        std::mem::take(&mut self.row_events)
    }

    /// Row where the active piece would rest if dropped straight down.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while fits(&self.board, &active.matrix, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Restore the session to its initial state.
    ///
    /// The grid empties, counters return to their starting values, and a
    /// fresh piece spawns. The highscore and the RNG sequence carry over.
    pub fn reset(&mut self) {
        self.queue = PieceQueue::with_lookahead(self.queue.rng_state(), self.queue.lookahead());
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.last_cleared = 0;
        self.game_over = false;
        self.paused = false;
        self.row_events.clear();
        self.spawn_next();
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    #[cfg(test)]
    pub(crate) fn force_stats(&mut self, score: u32, level: u32, lines: u32, last_cleared: u32) {
        self.score = score;
        self.level = level;
        self.lines = lines;
        self.last_cleared = last_cleared;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::shape;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn state_with_piece(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.set_active(ActivePiece::spawn(kind));
        state
    }

    #[test]
    fn test_new_session() {
        let state = GameState::new(12345);

        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.last_cleared(), 0);
        assert!(!state.game_over());
        assert!(!state.paused());
        assert!(state.active().is_some());
        assert_eq!(state.next_pieces().len(), 3);
    }

    #[test]
    fn test_try_move_within_bounds() {
        let mut state = state_with_piece(PieceKind::T);
        let initial_x = state.active().unwrap().x;

        assert!(state.try_move(1));
        assert_eq!(state.active().unwrap().x, initial_x + 1);

        assert!(state.try_move(-1));
        assert_eq!(state.active().unwrap().x, initial_x);
    }

    #[test]
    fn test_move_blocked_at_wall_is_noop() {
        let mut state = state_with_piece(PieceKind::O);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1) {
                moved += 1;
            }
        }
        // O spawns at x=4; exactly 4 moves reach the wall.
        assert_eq!(moved, 4);
        assert_eq!(state.active().unwrap().x, 0);
    }

    #[test]
    fn test_rotate_replaces_matrix() {
        let mut state = state_with_piece(PieceKind::T);
        let before = state.active().unwrap().matrix;

        assert!(state.try_rotate());
        assert_eq!(state.active().unwrap().matrix, before.rotated());
    }

    #[test]
    fn test_blocked_rotation_keeps_matrix_and_anchor() {
        let mut state = state_with_piece(PieceKind::I);
        // Vertical I in a one-column well at x=4.
        let vertical = shape(PieceKind::I).rotated();
        state.set_active(ActivePiece {
            kind: PieceKind::I,
            matrix: vertical,
            x: 4,
            y: 10,
        });
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 {
                for y in 10..14 {
                    state.board_mut().set(x, y, Some(PieceKind::O));
                }
            }
        }

        assert!(!state.try_rotate());
        let active = state.active().unwrap();
        assert_eq!(active.matrix, vertical);
        assert_eq!(active.x, 4);
    }

    #[test]
    fn test_soft_drop_moves_down_one_row() {
        let mut state = state_with_piece(PieceKind::T);
        let initial_y = state.active().unwrap().y;

        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active().unwrap().y, initial_y + 1);
    }

    #[test]
    fn test_tick_is_gravity() {
        let mut state = state_with_piece(PieceKind::T);
        let initial_y = state.active().unwrap().y;

        assert!(!state.tick());
        assert_eq!(state.active().unwrap().y, initial_y + 1);
    }

    #[test]
    fn test_tick_locks_and_spawns_at_the_floor() {
        let mut state = state_with_piece(PieceKind::O);

        // Ride gravity all the way down; the final tick locks.
        let mut locked = false;
        for _ in 0..=BOARD_HEIGHT {
            if state.tick() {
                locked = true;
                break;
            }
        }
        assert!(locked);

        // The piece merged at the floor and a new one spawned at the top.
        assert!(state.board().is_filled(4, BOARD_HEIGHT as i8 - 1));
        assert!(state.board().is_filled(5, BOARD_HEIGHT as i8 - 1));
        assert_eq!(state.active().unwrap().y, 0);
    }

    #[test]
    fn test_hard_drop_scenario_i_piece() {
        // Empty grid, I-piece at anchor (3, 0), hard drop.
        let mut state = state_with_piece(PieceKind::I);
        assert_eq!(state.active().unwrap().x, 3);

        state.apply_action(GameAction::HardDrop);

        // Resting anchor row was height-1; columns 3..=6 of the bottom row
        // are filled, the row is not full, so nothing cleared.
        let bottom = BOARD_HEIGHT as i8 - 1;
        for x in 3..=6 {
            assert!(state.board().is_filled(x, bottom));
        }
        assert!(!state.board().is_filled(2, bottom));
        assert!(!state.board().is_filled(7, bottom));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.last_cleared(), 0);
    }

    #[test]
    fn test_notch_drop_clears_two_rows() {
        let mut state = state_with_piece(PieceKind::O);
        let bottom = BOARD_HEIGHT as i8 - 1;

        // Fill the bottom two rows except a two-wide notch for the O piece.
        for x in 0..BOARD_WIDTH as i8 {
            if x != 4 && x != 5 {
                state.board_mut().set(x, bottom, Some(PieceKind::I));
                state.board_mut().set(x, bottom - 1, Some(PieceKind::I));
            }
        }

        // O spawns at x=4, exactly over the notch.
        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.last_cleared(), 2);
        assert_eq!(state.lines(), 2);
        assert_eq!(state.score(), 2 * 100 * 1);

        let events = state.take_row_clears();
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|ev| ev.y == bottom as usize));
        // Fill-tags mix the garbage rows' I tags with the dropped O.
        assert!(events[0].fills.contains(&PieceKind::O));

        // Events are drained once.
        assert!(state.take_row_clears().is_empty());
    }

    #[test]
    fn test_single_gap_row_clear_scores_100_times_level() {
        let mut state = state_with_piece(PieceKind::I);
        let bottom = BOARD_HEIGHT as i8 - 1;

        // Fill the bottom row except columns 3..=6, then drop the I into it.
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                state.board_mut().set(x, bottom, Some(PieceKind::L));
            }
        }

        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.last_cleared(), 1);
        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
        // The bottom row emptied back out.
        assert!(!state.board().is_row_full(bottom as usize));
    }

    #[test]
    fn test_level_uses_pre_update_value_for_scoring() {
        let mut state = state_with_piece(PieceKind::I);
        state.force_stats(0, 1, 9, 0);
        let bottom = BOARD_HEIGHT as i8 - 1;
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..=6).contains(&x) {
                state.board_mut().set(x, bottom, Some(PieceKind::L));
            }
        }

        state.apply_action(GameAction::HardDrop);

        // The clear was scored at level 1, then the level advanced.
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_four_line_clear() {
        let mut state = state_with_piece(PieceKind::I);
        let vertical = shape(PieceKind::I).rotated();
        state.set_active(ActivePiece {
            kind: PieceKind::I,
            matrix: vertical,
            x: 9,
            y: 0,
        });

        // Four bottom rows full except the last column.
        for y in (BOARD_HEIGHT - 4) as i8..BOARD_HEIGHT as i8 {
            for x in 0..9 {
                state.board_mut().set(x, y, Some(PieceKind::J));
            }
        }

        state.apply_action(GameAction::HardDrop);

        assert_eq!(state.last_cleared(), 4);
        assert_eq!(state.lines(), 4);
        assert_eq!(state.score(), 400);
        assert_eq!(state.take_row_clears().len(), 4);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut state = state_with_piece(PieceKind::O);

        // Block the spawn columns without completing any row.
        for x in 3..=6 {
            for y in 0..=1 {
                state.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }

        state.apply_action(GameAction::HardDrop);
        assert!(state.game_over());

        // Nothing but reset is accepted now.
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(!state.tick());
    }

    #[test]
    fn test_game_over_promotes_highscore() {
        let mut state = state_with_piece(PieceKind::O);
        state.set_highscore(150);
        state.force_stats(900, 1, 0, 0);
        for x in 3..=6 {
            for y in 0..=1 {
                state.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }

        state.apply_action(GameAction::HardDrop);

        assert!(state.game_over());
        assert_eq!(state.highscore(), 900);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = state_with_piece(PieceKind::O);
        state.set_highscore(500);
        state.force_stats(1234, 3, 27, 2);
        for x in 3..=6 {
            for y in 0..=1 {
                state.board_mut().set(x, y, Some(PieceKind::Z));
            }
        }
        state.apply_action(GameAction::HardDrop);
        assert!(state.game_over());

        assert!(state.apply_action(GameAction::Reset));

        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.last_cleared(), 0);
        assert!(!state.game_over());
        assert!(!state.paused());
        assert!(state.active().is_some());
        // The best score promoted at game over survives the reset.
        assert_eq!(state.highscore(), 1234);
        // The grid is fully empty below the fresh spawn.
        let occupied = state
            .board()
            .cells()
            .iter()
            .filter(|cell| cell.is_some())
            .count();
        assert_eq!(occupied, 0);
    }

    #[test]
    fn test_pause_gates_everything_but_pause_and_reset() {
        let mut state = state_with_piece(PieceKind::T);
        assert!(state.apply_action(GameAction::Pause));
        assert!(state.paused());

        let y = state.active().unwrap().y;
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.tick());
        assert_eq!(state.active().unwrap().y, y);

        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.paused());
    }

    #[test]
    fn test_ghost_y_tracks_resting_row() {
        let mut state = state_with_piece(PieceKind::O);
        // O is 2 rows tall: rests with its anchor at height-2.
        assert_eq!(state.ghost_y(), Some(BOARD_HEIGHT as i8 - 2));

        // Garbage below raises the resting row.
        state.board_mut().set(4, 10, Some(PieceKind::I));
        assert_eq!(state.ghost_y(), Some(8));
    }

    #[test]
    fn test_score_and_lines_monotonic_over_commands() {
        let mut state = GameState::new(424242);
        let mut prev_score = 0;
        let mut prev_lines = 0;

        let commands = [
            GameAction::MoveLeft,
            GameAction::Rotate,
            GameAction::SoftDrop,
            GameAction::MoveRight,
            GameAction::HardDrop,
        ];

        for i in 0..200 {
            state.apply_action(commands[i % commands.len()]);
            assert!(state.score() >= prev_score);
            assert!(state.lines() >= prev_lines);
            assert_eq!(state.level(), state.lines() / 10 + 1);
            prev_score = state.score();
            prev_lines = state.lines();
            if state.game_over() {
                break;
            }
        }
    }
}

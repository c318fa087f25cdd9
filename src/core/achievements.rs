//! Achievement tracker
//!
//! Achievements are predicates polled against the session state. Unlocking is
//! one-way; `check_all` reports each unlock exactly once so the caller can
//! show a one-time notification. The tracker is owned by the runner, not the
//! session, and therefore survives resets.

use arrayvec::ArrayVec;

use crate::core::GameState;

/// A single achievement: display strings, an unlock predicate, and the
/// one-way unlocked flag.
#[derive(Debug, Clone)]
pub struct Achievement {
    pub name: &'static str,
    pub description: &'static str,
    predicate: fn(&GameState) -> bool,
    unlocked: bool,
}

impl Achievement {
    fn new(name: &'static str, description: &'static str, predicate: fn(&GameState) -> bool) -> Self {
        Self {
            name,
            description,
            predicate,
            unlocked: false,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }
}

/// Number of defined achievements.
pub const ACHIEVEMENT_COUNT: usize = 3;

/// Tracks which achievements have been earned this run.
#[derive(Debug, Clone)]
pub struct AchievementTracker {
    entries: [Achievement; ACHIEVEMENT_COUNT],
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self {
            entries: [
                Achievement::new("First Thousand", "Score 1,000 points", |state| {
                    state.score() >= 1000
                }),
                Achievement::new("Quad Clear", "Clear four lines at once", |state| {
                    state.last_cleared() == 4
                }),
                Achievement::new("Up to Speed", "Reach level 10", |state| state.level() >= 10),
            ],
        }
    }

    /// Evaluate every locked achievement against the session state.
    ///
    /// Returns the indices of achievements that unlocked on this call;
    /// already-unlocked achievements are never re-reported.
    pub fn check_all(&mut self, state: &GameState) -> ArrayVec<usize, ACHIEVEMENT_COUNT> {
        let mut newly_unlocked = ArrayVec::new();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if !entry.unlocked && (entry.predicate)(state) {
                entry.unlocked = true;
                newly_unlocked.push(index);
            }
        }
        newly_unlocked
    }

    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }
}

impl Default for AchievementTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_locked_initially() {
        let tracker = AchievementTracker::new();
        assert_eq!(tracker.entries().len(), ACHIEVEMENT_COUNT);
        assert!(tracker.entries().iter().all(|entry| !entry.is_unlocked()));
    }

    #[test]
    fn test_nothing_unlocks_on_fresh_state() {
        let state = GameState::new(1);
        let mut tracker = AchievementTracker::new();
        assert!(tracker.check_all(&state).is_empty());
    }

    #[test]
    fn test_score_achievement_unlocks_once() {
        let mut state = GameState::new(1);
        let mut tracker = AchievementTracker::new();

        state.force_stats(1000, 1, 0, 0);
        let unlocked = tracker.check_all(&state);
        assert_eq!(unlocked.as_slice(), &[0]);
        assert_eq!(tracker.entries()[0].name, "First Thousand");
        assert!(tracker.entries()[0].is_unlocked());

        // Still satisfied, but never re-reported.
        assert!(tracker.check_all(&state).is_empty());
    }

    #[test]
    fn test_quad_clear_achievement() {
        let mut state = GameState::new(1);
        let mut tracker = AchievementTracker::new();

        state.force_stats(400, 1, 4, 3);
        assert!(tracker.check_all(&state).is_empty());

        state.force_stats(400, 1, 4, 4);
        assert_eq!(tracker.check_all(&state).as_slice(), &[1]);
    }

    #[test]
    fn test_level_achievement() {
        let mut state = GameState::new(1);
        let mut tracker = AchievementTracker::new();

        state.force_stats(0, 9, 89, 0);
        assert!(tracker.check_all(&state).is_empty());

        state.force_stats(0, 10, 90, 0);
        assert_eq!(tracker.check_all(&state).as_slice(), &[2]);
    }

    #[test]
    fn test_multiple_unlocks_in_one_check() {
        let mut state = GameState::new(1);
        let mut tracker = AchievementTracker::new();

        state.force_stats(5000, 10, 90, 4);
        let unlocked = tracker.check_all(&state);
        assert_eq!(unlocked.as_slice(), &[0, 1, 2]);
        assert!(tracker.entries().iter().all(|entry| entry.is_unlocked()));
    }

    #[test]
    fn test_unlocks_survive_session_reset() {
        let mut state = GameState::new(1);
        let mut tracker = AchievementTracker::new();

        state.force_stats(1500, 1, 0, 0);
        assert_eq!(tracker.check_all(&state).len(), 1);

        state.reset();
        assert!(tracker.check_all(&state).is_empty());
        assert!(tracker.entries()[0].is_unlocked());
    }
}

//! Terminal runner (default binary).
//!
//! Owns the clock and the I/O loop: polls crossterm events, applies gravity
//! at the level-derived cadence (with the soft-drop override while the key
//! is held), feeds cleared-row events into the particle field, polls
//! achievements, and persists the highscore when a session ends.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{scoring, AchievementTracker, GameState};
use blockfall::input::{map_key_event, should_quit, SoftDropHold};
use blockfall::persist;
use blockfall::term::{GameView, ParticleField, TerminalRenderer, Viewport};
use blockfall::types::{ACHIEVEMENT_FLASH_MS, SOFT_DROP_FALL_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5eed)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let highscore_path = PathBuf::from(persist::HIGHSCORE_FILE);
    let mut saved_highscore = persist::load_highscore(&highscore_path);

    let seed = clock_seed();
    let mut state = GameState::new(seed);
    state.set_highscore(saved_highscore);

    let view = GameView::default();
    let mut tracker = AchievementTracker::new();
    let mut particles = ParticleField::new(seed ^ 0x9e37_79b9);
    let mut soft_drop = SoftDropHold::new();

    let mut last_fall = Instant::now();
    let mut last_frame = Instant::now();
    let mut banner: Option<(&'static str, u32)> = None;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(
            &state,
            &tracker,
            &particles,
            banner.map(|(name, _)| name),
            Viewport::new(w, h),
        );
        term.draw(&fb)?;

        // Input.
        if event::poll(Duration::from_millis(TICK_MS as u64))? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            save_if_beaten(&highscore_path, &state, &mut saved_highscore)?;
                            return Ok(());
                        }
                        if let Some(action) = map_key_event(key) {
                            soft_drop.note_action(action);
                            state.apply_action(action);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Auto-repeat only refreshes the held soft drop;
                        // gravity does the repeating.
                        if let Some(action) = map_key_event(key) {
                            soft_drop.note_action(action);
                        }
                    }
                    KeyEventKind::Release => {
                        soft_drop.note_release(key.code);
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity at the level cadence, or the fast cadence while soft drop
        // is held.
        let mut interval = scoring::fall_interval_ms(state.level());
        if soft_drop.is_held() {
            interval = interval.min(SOFT_DROP_FALL_MS);
        }
        if last_fall.elapsed().as_millis() as u32 >= interval {
            last_fall = Instant::now();
            state.tick();
        }

        // Cleared rows burst into particles.
        for clear in state.take_row_clears() {
            particles.spawn_row(&clear);
        }
        particles.step();

        // Achievements are polled while the session is live.
        if !state.game_over() && !state.paused() {
            for index in tracker.check_all(&state) {
                banner = Some((tracker.entries()[index].name, ACHIEVEMENT_FLASH_MS));
            }
        }

        let frame_ms = last_frame.elapsed().as_millis() as u32;
        last_frame = Instant::now();
        banner = banner.and_then(|(name, ttl)| {
            if ttl > frame_ms {
                Some((name, ttl - frame_ms))
            } else {
                None
            }
        });

        if state.game_over() {
            save_if_beaten(&highscore_path, &state, &mut saved_highscore)?;
        }
    }
}

fn save_if_beaten(
    path: &std::path::Path,
    state: &GameState,
    saved: &mut u32,
) -> Result<()> {
    let best = state.highscore().max(state.score());
    if best > *saved {
        persist::save_highscore(path, best)?;
        *saved = best;
    }
    Ok(())
}

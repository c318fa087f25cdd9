//! Terminal rendering module.
//!
//! A small, game-oriented rendering layer: the view draws into a plain
//! framebuffer (no widget/layout library), and the renderer flushes it to a
//! crossterm-backed terminal. Keeping the view pure makes it unit-testable
//! while `core` stays free of any presentation concern.

pub mod effects;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use effects::{Particle, ParticleField};
pub use fb::{FrameBuffer, Glyph, Rgb, TextStyle};
pub use game_view::{kind_color, GameView, Viewport};
pub use renderer::TerminalRenderer;

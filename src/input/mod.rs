//! Input module - keyboard mapping and held-key tracking

pub mod handler;

pub use handler::{map_key_event, should_quit, SoftDropHold};

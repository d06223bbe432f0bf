//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock values injected through `TickInput`, never read ambiently
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod button;
pub mod problem;
pub mod state;
pub mod tick;

pub use button::Button;
pub use problem::{generate, max_operand};
pub use state::{
    Feedback, MenuAction, MusicTrack, Problem, ProblemKind, Screen, Session, SimEvent,
    SoundEffect,
};
pub use tick::{TickInput, tick};

//! Math Master - a mouse-driven arithmetic quiz game
//!
//! Core modules:
//! - `sim`: Deterministic game core (state machine, problem generation, buttons)
//! - `renderer`: Scene construction and the Canvas2D backend
//! - `audio`: Click/music playback with silent degradation on missing assets
//! - `config`: Immutable screen layout and palette

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod renderer;
pub mod sim;

/// Game rule constants
pub mod consts {
    /// Canvas dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Target frame rate for the cooperative loop
    pub const FRAME_RATE: u32 = 60;

    /// Health at the start of a run; a wrong answer or timeout costs one
    pub const START_HEALTH: u8 = 3;

    /// Per-problem time limit at level 1, and its floor as levels shrink it
    pub const START_TIME_LIMIT_SECS: f32 = 15.0;
    pub const MIN_TIME_LIMIT_SECS: f32 = 5.0;
    pub const TIME_LIMIT_STEP_SECS: f32 = 1.0;

    /// Points per correct answer
    pub const POINTS_PER_CORRECT: u32 = 10;

    /// Level up on every Nth correct answer (running total, not a streak)
    pub const CORRECT_PER_LEVEL: u32 = 2;

    /// How long the chosen answer box shows green/red before the next problem
    pub const FEEDBACK_DWELL_MS: f64 = 500.0;

    /// Random distractor samples before falling back to increments
    pub const MAX_DISTRACTOR_SAMPLES: u32 = 64;
}

//! Session state and core quiz types
//!
//! Everything the state machine mutates lives here. Deterministic given the
//! seed and the injected clock values fed to `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::button::Button;
use super::problem;
use crate::config::Layout;
use crate::consts::*;

/// Current screen of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Start / options / quit buttons
    MainMenu,
    /// Pick which operator the problems use
    ProblemTypeSelect,
    /// Active quiz round
    Playing,
    /// Run ended, waiting for acknowledge
    GameOver,
}

/// Arithmetic operator the problems are built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl ProblemKind {
    /// Selection-screen order (matches the operator box layout)
    pub const ALL: [ProblemKind; 4] = [
        ProblemKind::Add,
        ProblemKind::Sub,
        ProblemKind::Mul,
        ProblemKind::Div,
    ];

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            ProblemKind::Add => "+",
            ProblemKind::Sub => "-",
            ProblemKind::Mul => "×",
            ProblemKind::Div => "÷",
        }
    }
}

/// One generated question with its shuffled answer choices
///
/// `options` always holds 4 distinct strings, exactly one of which equals
/// `answer`. Replaced wholesale on regeneration, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub question: String,
    pub answer: String,
    pub options: [String; 4],
}

/// Post-answer display state while the chosen box shows green/red
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    /// Index of the clicked answer box; `None` for timeouts
    pub chosen: Option<usize>,
    pub correct: bool,
    /// Injected clock value when the answer resolved
    pub started_ms: f64,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Accepted press on a button or box
    Click,
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Gameplay,
    GameOver,
}

/// Side effects requested by the sim, dispatched by the platform layer
///
/// The sim never talks to the audio service or the process directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Sound(SoundEffect),
    /// Stop whatever is playing and loop this track
    Music(MusicTrack),
    /// Terminate the game loop
    Quit,
}

/// Actions bound to the main-menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Options,
    Quit,
}

/// Complete per-run game state
///
/// Exactly one `Session` exists per run. A problem is present at all times
/// (generated at construction) so the options invariant holds
/// unconditionally; the menu screens simply never display it.
#[derive(Debug, Clone)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub screen: Screen,
    pub kind: ProblemKind,
    pub level: u32,
    pub score: u32,
    pub health: u8,
    /// Running total of correct answers; deliberately not reset by misses
    pub correct_count: u32,
    /// Seconds allowed per problem
    pub time_limit: f32,
    /// Seconds left on the current problem, recomputed from the clock
    pub remaining: f32,
    pub problem: Problem,
    /// Injected clock value when the current problem was issued
    pub problem_started_ms: f64,
    pub feedback: Option<Feedback>,
    pub menu_buttons: [Button<MenuAction>; 3],
    pub(crate) rng: Pcg32,
}

impl Session {
    /// Create a fresh session on the main menu
    pub fn new(seed: u64, layout: &Layout) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let kind = ProblemKind::Add;
        let problem = problem::generate(kind, 1, &mut rng);
        Self {
            seed,
            screen: Screen::MainMenu,
            kind,
            level: 1,
            score: 0,
            health: START_HEALTH,
            correct_count: 0,
            time_limit: START_TIME_LIMIT_SECS,
            remaining: START_TIME_LIMIT_SECS,
            problem,
            problem_started_ms: 0.0,
            feedback: None,
            menu_buttons: [
                Button::new(layout.menu_start, "Старт", MenuAction::Start),
                Button::new(layout.menu_options, "Опции", MenuAction::Options),
                Button::new(layout.menu_quit, "Выход", MenuAction::Quit),
            ],
            rng,
        }
    }

    /// Reset run variables for a new game and issue the first problem
    pub fn reset(&mut self, now_ms: f64) {
        self.level = 1;
        self.score = 0;
        self.health = START_HEALTH;
        self.correct_count = 0;
        self.time_limit = START_TIME_LIMIT_SECS;
        self.next_problem(now_ms);
    }

    /// Replace the current problem, rebase the timer, clear feedback
    pub fn next_problem(&mut self, now_ms: f64) {
        self.problem = problem::generate(self.kind, self.level, &mut self.rng);
        self.remaining = self.time_limit;
        self.problem_started_ms = now_ms;
        self.feedback = None;
    }

    /// Time-bar fill fraction, clamped at empty
    pub fn time_fraction(&self) -> f32 {
        (self.remaining / self.time_limit).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(7, &Layout::default());
        assert_eq!(session.screen, Screen::MainMenu);
        assert_eq!(session.kind, ProblemKind::Add);
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.health, START_HEALTH);
        assert_eq!(session.time_limit, START_TIME_LIMIT_SECS);
        assert!(session.feedback.is_none());
    }

    #[test]
    fn test_next_problem_rebases_timer_and_clears_feedback() {
        let mut session = Session::new(7, &Layout::default());
        session.feedback = Some(Feedback {
            chosen: Some(2),
            correct: false,
            started_ms: 1000.0,
        });
        session.remaining = 1.5;
        session.next_problem(5000.0);
        assert_eq!(session.problem_started_ms, 5000.0);
        assert_eq!(session.remaining, session.time_limit);
        assert!(session.feedback.is_none());
    }

    #[test]
    fn test_time_fraction_clamps_at_zero() {
        let mut session = Session::new(7, &Layout::default());
        session.remaining = -3.0;
        assert_eq!(session.time_fraction(), 0.0);
        session.remaining = session.time_limit;
        assert_eq!(session.time_fraction(), 1.0);
    }

    #[test]
    fn test_sessions_with_same_seed_generate_same_problem() {
        let layout = Layout::default();
        let a = Session::new(99, &layout);
        let b = Session::new(99, &layout);
        assert_eq!(a.problem, b.problem);
    }
}

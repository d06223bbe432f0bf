//! Per-frame state machine tick
//!
//! One call per frame advances the whole game. All timing flows in through
//! `TickInput::now_ms` (never read from the wall clock here), so a fixed
//! clock source reproduces a session exactly.

use glam::Vec2;

use super::state::{
    Feedback, MenuAction, MusicTrack, Screen, Session, SimEvent, SoundEffect,
};
use crate::config::Layout;
use crate::consts::*;

/// Input snapshot for a single tick
///
/// `pointer_down` / `pointer_up` / `acknowledge` are one-shot edge events;
/// the platform layer clears them after the tick consumes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Current pointer position
    pub pointer: Vec2,
    pub pointer_down: bool,
    pub pointer_up: bool,
    /// Game-over acknowledge key (Space)
    pub acknowledge: bool,
    /// Injected wall-clock milliseconds
    pub now_ms: f64,
}

/// Advance the session by one tick, returning requested side effects
pub fn tick(session: &mut Session, input: &TickInput, layout: &Layout) -> Vec<SimEvent> {
    let mut events = Vec::new();
    match session.screen {
        Screen::MainMenu => tick_menu(session, input, &mut events),
        Screen::ProblemTypeSelect => tick_type_select(session, input, layout, &mut events),
        Screen::Playing => tick_playing(session, input, layout, &mut events),
        Screen::GameOver => tick_game_over(session, input, &mut events),
    }
    events
}

fn tick_menu(session: &mut Session, input: &TickInput, events: &mut Vec<SimEvent>) {
    if input.pointer_down {
        for button in &mut session.menu_buttons {
            if button.pointer_down(input.pointer) {
                events.push(SimEvent::Sound(SoundEffect::Click));
            }
        }
    }
    if input.pointer_up {
        let mut fired = None;
        for button in &mut session.menu_buttons {
            if let Some(action) = button.pointer_up(input.pointer) {
                fired = Some(action);
            }
        }
        match fired {
            Some(MenuAction::Start) => {
                session.reset(input.now_ms);
                session.screen = Screen::Playing;
                events.push(SimEvent::Music(MusicTrack::Gameplay));
                log::info!("session started (seed {}, kind {:?})", session.seed, session.kind);
            }
            Some(MenuAction::Options) => {
                session.screen = Screen::ProblemTypeSelect;
                // Menu music restarts explicitly, matching the stop/play pair
                events.push(SimEvent::Music(MusicTrack::Menu));
            }
            Some(MenuAction::Quit) => events.push(SimEvent::Quit),
            None => {}
        }
    }
}

fn tick_type_select(
    session: &mut Session,
    input: &TickInput,
    layout: &Layout,
    events: &mut Vec<SimEvent>,
) {
    if !input.pointer_down {
        return;
    }
    for (i, region) in layout.operator_hit.iter().enumerate() {
        if region.contains(input.pointer) {
            events.push(SimEvent::Sound(SoundEffect::Click));
            session.kind = super::state::ProblemKind::ALL[i];
            session.screen = Screen::MainMenu;
            events.push(SimEvent::Music(MusicTrack::Menu));
            log::info!("problem kind set to {:?}", session.kind);
            break;
        }
    }
}

fn tick_playing(
    session: &mut Session,
    input: &TickInput,
    layout: &Layout,
    events: &mut Vec<SimEvent>,
) {
    match session.feedback {
        None => {
            let elapsed_secs = (input.now_ms - session.problem_started_ms) / 1000.0;
            session.remaining = session.time_limit - elapsed_secs as f32;
            if session.remaining < 0.0 {
                // Timeout counts as a wrong answer with no chosen box
                resolve_answer(session, None, false, input.now_ms, events);
            } else if input.pointer_down {
                for (i, region) in layout.answer_boxes.iter().enumerate() {
                    if region.contains(input.pointer) {
                        events.push(SimEvent::Sound(SoundEffect::Click));
                        let correct = session.problem.options[i] == session.problem.answer;
                        resolve_answer(session, Some(i), correct, input.now_ms, events);
                        break;
                    }
                }
            }
        }
        Some(feedback) => {
            if input.now_ms - feedback.started_ms > FEEDBACK_DWELL_MS {
                session.next_problem(input.now_ms);
            }
        }
    }
}

fn tick_game_over(session: &mut Session, input: &TickInput, events: &mut Vec<SimEvent>) {
    if input.acknowledge {
        session.screen = Screen::MainMenu;
        events.push(SimEvent::Music(MusicTrack::Menu));
    }
}

/// Apply scoring/health rules for an answered (or timed-out) problem
fn resolve_answer(
    session: &mut Session,
    chosen: Option<usize>,
    correct: bool,
    now_ms: f64,
    events: &mut Vec<SimEvent>,
) {
    if correct {
        session.score += POINTS_PER_CORRECT;
        session.correct_count += 1;
        if session.correct_count % CORRECT_PER_LEVEL == 0 {
            session.level += 1;
            session.time_limit =
                (session.time_limit - TIME_LIMIT_STEP_SECS).max(MIN_TIME_LIMIT_SECS);
            log::info!(
                "level up: {} (time limit {:.0}s)",
                session.level,
                session.time_limit
            );
        }
        session.feedback = Some(Feedback {
            chosen,
            correct: true,
            started_ms: now_ms,
        });
    } else {
        session.health = session.health.saturating_sub(1);
        if session.health == 0 {
            session.screen = Screen::GameOver;
            events.push(SimEvent::Music(MusicTrack::GameOver));
            log::info!("game over (score {})", session.score);
        } else {
            session.feedback = Some(Feedback {
                chosen,
                correct: false,
                started_ms: now_ms,
            });
        }
    }
}

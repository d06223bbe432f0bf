//! Scene construction
//!
//! Maps the current session to a flat list of draw commands. Pure read of
//! the state; no game logic belongs here. The platform backend decides how
//! the commands reach the screen.

use glam::Vec2;

use crate::config::{Color, GameConfig, Rect, Theme};
use crate::consts::SCREEN_WIDTH;
use crate::sim::{Button, MenuAction, Screen, Session};

const FONT_LARGE: f32 = 50.0;
const FONT_MED: f32 = 36.0;
const FONT_SMALL: f32 = 24.0;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Anchor at the top-left corner
    Left,
    /// Anchor at the center
    Center,
}

/// Preloaded images the backend may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
}

/// One drawing operation for the external rendering service
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(Color),
    /// Scaled image blit; skipped by the backend when the asset is missing
    Sprite { sprite: Sprite, rect: Rect },
    FillRect { rect: Rect, color: Color, radius: f32 },
    StrokeRect { rect: Rect, color: Color, width: f32, radius: f32 },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Text { text: String, pos: Vec2, size: f32, color: Color, align: Align },
}

/// Build the draw list for the current frame
pub fn build_scene(session: &Session, cfg: &GameConfig, pointer: Vec2) -> Vec<DrawCmd> {
    let theme = &cfg.theme;
    let mut cmds = vec![
        DrawCmd::Clear(theme.background),
        DrawCmd::Sprite {
            sprite: Sprite::Background,
            rect: cfg.layout.screen,
        },
    ];

    match session.screen {
        Screen::MainMenu => menu_scene(session, cfg, &mut cmds),
        Screen::ProblemTypeSelect => type_select_scene(cfg, pointer, &mut cmds),
        Screen::Playing => playing_scene(session, cfg, &mut cmds),
        Screen::GameOver => game_over_scene(session, cfg, &mut cmds),
    }
    cmds
}

fn centered(text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) -> DrawCmd {
    DrawCmd::Text {
        text: text.into(),
        pos: Vec2::new(x, y),
        size,
        color,
        align: Align::Center,
    }
}

fn label(text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) -> DrawCmd {
    DrawCmd::Text {
        text: text.into(),
        pos: Vec2::new(x, y),
        size,
        color,
        align: Align::Left,
    }
}

fn menu_scene(session: &Session, cfg: &GameConfig, cmds: &mut Vec<DrawCmd>) {
    cmds.push(centered(
        "Math Master",
        SCREEN_WIDTH / 2.0,
        100.0,
        FONT_LARGE,
        cfg.theme.text,
    ));
    for button in &session.menu_buttons {
        bevel_button(cmds, &cfg.theme, button);
    }
}

fn type_select_scene(cfg: &GameConfig, pointer: Vec2, cmds: &mut Vec<DrawCmd>) {
    cmds.push(centered(
        "Выберите арифметический знак",
        SCREEN_WIDTH / 2.0,
        100.0,
        FONT_LARGE,
        cfg.theme.text,
    ));

    // Hover follows the hit regions, drawing follows the draw regions
    let hovered = cfg
        .layout
        .operator_hit
        .iter()
        .position(|r| r.contains(pointer));

    for (i, rect) in cfg.layout.operator_draw.iter().enumerate() {
        let color = if hovered == Some(i) {
            cfg.theme.box_hover
        } else {
            cfg.theme.box_idle
        };
        cmds.push(DrawCmd::FillRect {
            rect: *rect,
            color,
            radius: 0.0,
        });
        let center = rect.center();
        cmds.push(centered(
            crate::sim::ProblemKind::ALL[i].symbol(),
            center.x,
            center.y,
            FONT_LARGE,
            cfg.theme.text,
        ));
    }
}

fn playing_scene(session: &Session, cfg: &GameConfig, cmds: &mut Vec<DrawCmd>) {
    let theme = &cfg.theme;
    cmds.push(label(
        format!("Уровень: {}", session.level),
        50.0,
        50.0,
        FONT_SMALL,
        theme.text,
    ));
    cmds.push(label(
        format!("Балл: {}", session.score),
        50.0,
        80.0,
        FONT_SMALL,
        theme.text,
    ));
    cmds.push(label(
        format!("Здоровье: {}", session.health),
        50.0,
        110.0,
        FONT_SMALL,
        theme.text_danger,
    ));
    cmds.push(centered(
        session.problem.question.clone(),
        SCREEN_WIDTH / 2.0,
        200.0,
        FONT_LARGE,
        theme.text,
    ));

    time_bar(session, cfg, cmds);

    for (i, rect) in cfg.layout.answer_boxes.iter().enumerate() {
        let color = match session.feedback {
            Some(feedback) if feedback.chosen == Some(i) => {
                if feedback.correct {
                    theme.box_correct
                } else {
                    theme.box_wrong
                }
            }
            _ => theme.box_idle,
        };
        cmds.push(DrawCmd::FillRect {
            rect: *rect,
            color,
            radius: 0.0,
        });
        let center = rect.center();
        cmds.push(centered(
            session.problem.options[i].clone(),
            center.x,
            center.y,
            FONT_MED,
            theme.text,
        ));
    }
}

fn time_bar(session: &Session, cfg: &GameConfig, cmds: &mut Vec<DrawCmd>) {
    let bar = cfg.layout.time_bar;
    cmds.push(DrawCmd::StrokeRect {
        rect: bar,
        color: cfg.theme.time_bar_border,
        width: 2.0,
        radius: 0.0,
    });
    cmds.push(DrawCmd::FillRect {
        rect: Rect::new(bar.x, bar.y, bar.w * session.time_fraction(), bar.h),
        color: cfg.theme.time_bar_fill,
        radius: 0.0,
    });
    cmds.push(centered(
        format!("{}", session.remaining.max(0.0) as i32),
        bar.x + bar.w + 30.0,
        bar.y,
        FONT_SMALL,
        cfg.theme.text,
    ));
}

fn game_over_scene(session: &Session, cfg: &GameConfig, cmds: &mut Vec<DrawCmd>) {
    let theme = &cfg.theme;
    cmds.push(centered(
        "Игра окончена",
        SCREEN_WIDTH / 2.0,
        200.0,
        FONT_LARGE,
        theme.text_danger,
    ));
    cmds.push(centered(
        format!("Ваш балл: {}", session.score),
        SCREEN_WIDTH / 2.0,
        300.0,
        FONT_MED,
        theme.text,
    ));
    cmds.push(centered(
        "Нажмите ПРОБЕЛ для выхода",
        SCREEN_WIDTH / 2.0,
        400.0,
        FONT_SMALL,
        theme.text,
    ));
}

/// 3D-beveled button: drop shadow, vertical gradient in two halves, white
/// highlight line, border, centered label. Pressed state darkens the
/// gradient and nudges content 2px down-right.
fn bevel_button(cmds: &mut Vec<DrawCmd>, theme: &Theme, button: &Button<MenuAction>) {
    let pressed = button.is_pressed();
    let (top, bottom) = if pressed {
        (theme.button_top_pressed, theme.button_bottom_pressed)
    } else {
        (theme.button_top, theme.button_bottom)
    };
    let offset = if pressed { 2.0 } else { 0.0 };
    let shadow_offset = 4.0;

    let rect = button.rect.offset(offset, offset);

    cmds.push(DrawCmd::FillRect {
        rect: button.rect.offset(offset + shadow_offset, offset + shadow_offset),
        color: theme.button_shadow,
        radius: 10.0,
    });

    // Row-by-row vertical gradient, brighter upper half
    let top_half = (rect.h / 2.0) as i32;
    let h = rect.h as i32;
    for i in 0..top_half {
        let t = i as f32 / (top_half - 1) as f32;
        gradient_row(cmds, rect, i, top.lerp(bottom, t * 0.5));
    }
    for i in top_half..h {
        let t = (i - top_half) as f32 / (h - top_half - 1) as f32;
        gradient_row(cmds, rect, i, bottom.lerp(theme.button_deep, t * 0.5));
    }

    cmds.push(DrawCmd::Line {
        from: Vec2::new(rect.x, rect.y),
        to: Vec2::new(rect.x + rect.w, rect.y),
        color: theme.button_highlight,
        width: 2.0,
    });
    cmds.push(DrawCmd::StrokeRect {
        rect,
        color: theme.button_border,
        width: 2.0,
        radius: 10.0,
    });

    let center = rect.center();
    cmds.push(centered(
        button.label,
        center.x,
        center.y,
        FONT_MED,
        theme.text,
    ));
}

fn gradient_row(cmds: &mut Vec<DrawCmd>, rect: Rect, row: i32, color: Color) {
    let y = rect.y + row as f32;
    cmds.push(DrawCmd::Line {
        from: Vec2::new(rect.x, y),
        to: Vec2::new(rect.x + rect.w, y),
        color,
        width: 1.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Layout;
    use crate::sim::{tick, Feedback, TickInput};

    fn setup() -> (Session, GameConfig) {
        let cfg = GameConfig::default();
        (Session::new(4242, &cfg.layout), cfg)
    }

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn start(session: &mut Session, layout: &Layout) {
        let p = layout.menu_start.center();
        tick(
            session,
            &TickInput {
                pointer: p,
                pointer_down: true,
                ..Default::default()
            },
            layout,
        );
        tick(
            session,
            &TickInput {
                pointer: p,
                pointer_up: true,
                ..Default::default()
            },
            layout,
        );
    }

    #[test]
    fn test_menu_scene_has_title_and_button_labels() {
        let (session, cfg) = setup();
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        let texts = texts(&cmds);
        assert!(texts.contains(&"Math Master"));
        assert!(texts.contains(&"Старт"));
        assert!(texts.contains(&"Опции"));
        assert!(texts.contains(&"Выход"));
    }

    #[test]
    fn test_scene_starts_with_clear_and_background() {
        let (session, cfg) = setup();
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        assert_eq!(cmds[0], DrawCmd::Clear(cfg.theme.background));
        assert!(matches!(
            cmds[1],
            DrawCmd::Sprite {
                sprite: Sprite::Background,
                ..
            }
        ));
    }

    #[test]
    fn test_type_select_hover_recolors_box() {
        let (mut session, cfg) = setup();
        session.screen = Screen::ProblemTypeSelect;

        // Pointer inside the hit region of the second operator
        let pointer = cfg.layout.operator_hit[1].center();
        let cmds = build_scene(&session, &cfg, pointer);
        let fills: Vec<Color> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 4);
        assert_eq!(fills[1], cfg.theme.box_hover);
        assert_eq!(fills[0], cfg.theme.box_idle);
        assert_eq!(fills[2], cfg.theme.box_idle);
    }

    #[test]
    fn test_playing_scene_shows_question_and_options() {
        let (mut session, cfg) = setup();
        start(&mut session, &cfg.layout);
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        let texts = texts(&cmds);
        assert!(texts.contains(&session.problem.question.as_str()));
        for option in &session.problem.options {
            assert!(texts.contains(&option.as_str()));
        }
        assert!(texts.contains(&"Уровень: 1"));
        assert!(texts.contains(&"Балл: 0"));
        assert!(texts.contains(&"Здоровье: 3"));
    }

    #[test]
    fn test_time_bar_fill_fraction() {
        let (mut session, cfg) = setup();
        start(&mut session, &cfg.layout);
        session.remaining = session.time_limit / 2.0;
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);

        let bar = cfg.layout.time_bar;
        let fill = cmds.iter().find_map(|c| match c {
            DrawCmd::FillRect { rect, color, .. } if *color == cfg.theme.time_bar_fill => {
                Some(*rect)
            }
            _ => None,
        });
        let fill = fill.expect("time bar fill present");
        assert_eq!(fill.w, bar.w / 2.0);

        // Expired timer clamps at an empty bar
        session.remaining = -1.0;
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        let fill = cmds
            .iter()
            .find_map(|c| match c {
                DrawCmd::FillRect { rect, color, .. } if *color == cfg.theme.time_bar_fill => {
                    Some(*rect)
                }
                _ => None,
            })
            .expect("time bar fill present");
        assert_eq!(fill.w, 0.0);
    }

    #[test]
    fn test_feedback_recolors_only_chosen_box() {
        let (mut session, cfg) = setup();
        start(&mut session, &cfg.layout);
        session.feedback = Some(Feedback {
            chosen: Some(2),
            correct: false,
            started_ms: 0.0,
        });

        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        let box_fills: Vec<Color> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::FillRect { rect, color, .. }
                    if cfg.layout.answer_boxes.contains(rect) =>
                {
                    Some(*color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(box_fills.len(), 4);
        assert_eq!(box_fills[2], cfg.theme.box_wrong);
        for (i, fill) in box_fills.iter().enumerate() {
            if i != 2 {
                assert_eq!(*fill, cfg.theme.box_idle);
            }
        }
    }

    #[test]
    fn test_game_over_scene_shows_final_score() {
        let (mut session, cfg) = setup();
        session.screen = Screen::GameOver;
        session.score = 120;
        let cmds = build_scene(&session, &cfg, Vec2::ZERO);
        let texts = texts(&cmds);
        assert!(texts.contains(&"Игра окончена"));
        assert!(texts.contains(&"Ваш балл: 120"));
        assert!(texts.contains(&"Нажмите ПРОБЕЛ для выхода"));
    }

    #[test]
    fn test_pressed_button_uses_darkened_gradient() {
        let (mut session, cfg) = setup();
        let p = cfg.layout.menu_start.center();
        tick(
            &mut session,
            &TickInput {
                pointer: p,
                pointer_down: true,
                ..Default::default()
            },
            &cfg.layout,
        );
        assert!(session.menu_buttons[0].is_pressed());

        let cmds = build_scene(&session, &cfg, p);
        // First gradient row of the pressed button starts from the pressed
        // top color (t = 0 keeps the lerp endpoint exact)
        let first_row = cmds.iter().find_map(|c| match c {
            DrawCmd::Line { color, width, .. } if *width == 1.0 => Some(*color),
            _ => None,
        });
        assert_eq!(first_row, Some(cfg.theme.button_top_pressed));
    }
}

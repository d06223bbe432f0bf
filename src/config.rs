//! Immutable layout and palette configuration
//!
//! All fixed screen regions and colors live here and are injected into the
//! sim and renderer at construction. Nothing in this module is mutable at
//! runtime.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned screen rectangle (top-left origin, pixels)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Hit test with inclusive edges
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub const fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// sRGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation toward `other`, truncating like integer math
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// CSS color string for the canvas backend
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const ORANGE: Color = Color::rgb(255, 165, 0);

/// Fixed screen regions (800x600 canvas)
///
/// The operator boxes keep the original quirk of rendering at y=250 while
/// hit-testing at y=300.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub screen: Rect,
    pub menu_start: Rect,
    pub menu_options: Rect,
    pub menu_quit: Rect,
    /// Operator-select boxes as drawn
    pub operator_draw: [Rect; 4],
    /// Operator-select boxes as hit-tested
    pub operator_hit: [Rect; 4],
    pub answer_boxes: [Rect; 4],
    pub time_bar: Rect,
}

impl Default for Layout {
    fn default() -> Self {
        let op = |x: f32, y: f32| Rect::new(x, y, 100.0, 100.0);
        let answer = |x: f32| Rect::new(x, 300.0, 80.0, 80.0);
        Self {
            screen: Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
            menu_start: Rect::new(300.0, 200.0, 200.0, 60.0),
            menu_options: Rect::new(300.0, 300.0, 200.0, 60.0),
            menu_quit: Rect::new(300.0, 400.0, 200.0, 60.0),
            operator_draw: [op(100.0, 250.0), op(250.0, 250.0), op(400.0, 250.0), op(550.0, 250.0)],
            operator_hit: [op(100.0, 300.0), op(250.0, 300.0), op(400.0, 300.0), op(550.0, 300.0)],
            answer_boxes: [answer(200.0), answer(320.0), answer(440.0), answer(560.0)],
            time_bar: Rect::new(600.0, 50.0, 150.0, 20.0),
        }
    }
}

/// Color palette
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_danger: Color,
    pub box_idle: Color,
    pub box_hover: Color,
    pub box_correct: Color,
    pub box_wrong: Color,
    pub time_bar_fill: Color,
    pub time_bar_border: Color,
    /// Beveled button gradient, idle
    pub button_top: Color,
    pub button_bottom: Color,
    /// Beveled button gradient, pressed
    pub button_top_pressed: Color,
    pub button_bottom_pressed: Color,
    /// Lower-half gradient target
    pub button_deep: Color,
    pub button_border: Color,
    pub button_highlight: Color,
    pub button_shadow: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::rgb(200, 200, 200),
            text: BLACK,
            text_danger: RED,
            box_idle: ORANGE,
            box_hover: GREEN,
            box_correct: GREEN,
            box_wrong: RED,
            time_bar_fill: GREEN,
            time_bar_border: BLACK,
            button_top: Color::rgb(200, 220, 255),
            button_bottom: Color::rgb(150, 170, 220),
            button_top_pressed: Color::rgb(170, 190, 235),
            button_bottom_pressed: Color::rgb(120, 140, 190),
            button_deep: Color::rgb(100, 100, 150),
            button_border: Color::rgb(40, 40, 80),
            button_highlight: WHITE,
            button_shadow: Color::rgb(50, 50, 50),
        }
    }
}

/// Complete immutable game configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct GameConfig {
    pub layout: Layout,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_inclusive_edges() {
        let r = Rect::new(100.0, 300.0, 100.0, 100.0);
        assert!(r.contains(Vec2::new(100.0, 300.0)));
        assert!(r.contains(Vec2::new(200.0, 400.0)));
        assert!(r.contains(Vec2::new(150.0, 350.0)));
        assert!(!r.contains(Vec2::new(99.9, 350.0)));
        assert!(!r.contains(Vec2::new(150.0, 400.1)));
    }

    #[test]
    fn test_layout_matches_fixed_contract() {
        let layout = Layout::default();
        let xs: Vec<f32> = layout.answer_boxes.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![200.0, 320.0, 440.0, 560.0]);
        for r in &layout.answer_boxes {
            assert_eq!((r.y, r.w, r.h), (300.0, 80.0, 80.0));
        }
        let op_xs: Vec<f32> = layout.operator_hit.iter().map(|r| r.x).collect();
        assert_eq!(op_xs, vec![100.0, 250.0, 400.0, 550.0]);
        assert_eq!(layout.time_bar, Rect::new(600.0, 50.0, 150.0, 20.0));
    }

    #[test]
    fn test_color_lerp_endpoints() {
        let a = Color::rgb(200, 220, 255);
        let b = Color::rgb(150, 170, 220);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Color::rgb(175, 195, 237));
    }
}

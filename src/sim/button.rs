//! Clickable button widget
//!
//! Rectangular hit test plus a two-phase press protocol, independent of
//! game state: pointer-down inside bounds arms the button, pointer-up fires
//! the bound action iff the pointer is still inside. The caller plays the
//! click sound when a press is accepted.

use glam::Vec2;

use crate::config::Rect;

/// A pressable screen button bound to an action
#[derive(Debug, Clone)]
pub struct Button<A: Copy> {
    pub rect: Rect,
    pub label: &'static str,
    action: A,
    pressed: bool,
}

impl<A: Copy> Button<A> {
    pub fn new(rect: Rect, label: &'static str, action: A) -> Self {
        Self {
            rect,
            label,
            action,
            pressed: false,
        }
    }

    /// Pointer-down: arms the button when the press lands inside bounds.
    /// Returns true when armed so the caller can play the click sound.
    pub fn pointer_down(&mut self, pointer: Vec2) -> bool {
        let hit = self.rect.contains(pointer);
        if hit {
            self.pressed = true;
        }
        hit
    }

    /// Pointer-up: fires the bound action exactly once iff the button was
    /// armed and the pointer is still inside bounds. Pressed state resets
    /// regardless of the hit outcome.
    pub fn pointer_up(&mut self, pointer: Vec2) -> Option<A> {
        let fired = self.pressed && self.rect.contains(pointer);
        self.pressed = false;
        fired.then_some(self.action)
    }

    /// Pure function of the current pointer position; no side effects
    pub fn hovered(&self, pointer: Vec2) -> bool {
        self.rect.contains(pointer)
    }

    /// Pressed visual state for rendering
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button<u8> {
        Button::new(Rect::new(300.0, 200.0, 200.0, 60.0), "ok", 1)
    }

    const INSIDE: Vec2 = Vec2::new(400.0, 230.0);
    const OUTSIDE: Vec2 = Vec2::new(10.0, 10.0);

    #[test]
    fn test_press_and_release_inside_fires_once() {
        let mut b = button();
        assert!(b.pointer_down(INSIDE));
        assert!(b.is_pressed());
        assert_eq!(b.pointer_up(INSIDE), Some(1));
        assert!(!b.is_pressed());
        // A second release without a press fires nothing
        assert_eq!(b.pointer_up(INSIDE), None);
    }

    #[test]
    fn test_press_inside_release_outside_does_not_fire() {
        let mut b = button();
        assert!(b.pointer_down(INSIDE));
        assert_eq!(b.pointer_up(OUTSIDE), None);
        assert!(!b.is_pressed());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let mut b = button();
        assert!(!b.pointer_down(OUTSIDE));
        assert!(!b.is_pressed());
        assert_eq!(b.pointer_up(INSIDE), None);
    }

    #[test]
    fn test_hover_is_pure() {
        let b = button();
        assert!(b.hovered(INSIDE));
        assert!(!b.hovered(OUTSIDE));
        assert!(!b.is_pressed());
    }
}

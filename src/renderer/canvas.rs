//! Canvas2D backend
//!
//! Executes the draw-command list against a `CanvasRenderingContext2d`.
//! Image assets are optional handles; a sprite whose image never loaded is
//! simply skipped, leaving the themed clear color visible.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{Align, DrawCmd, Sprite};
use crate::config::Rect;

pub struct CanvasBackend {
    ctx: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
}

impl CanvasBackend {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            background: load_image("images/menu_background.png"),
        })
    }

    /// Whether the background image is ready to blit
    pub fn is_loaded(&self, sprite: Sprite) -> bool {
        let image = match sprite {
            Sprite::Background => &self.background,
        };
        image
            .as_ref()
            .map(|img| img.complete() && img.natural_width() > 0)
            .unwrap_or(false)
    }

    /// Draw one frame
    pub fn render(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            match cmd {
                DrawCmd::Clear(color) => {
                    let canvas = self.ctx.canvas();
                    let (w, h) = canvas
                        .as_ref()
                        .map(|c| (c.width() as f64, c.height() as f64))
                        .unwrap_or((0.0, 0.0));
                    self.ctx.set_fill_style_str(&color.css());
                    self.ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawCmd::Sprite { sprite, rect } => self.draw_sprite(*sprite, *rect),
                DrawCmd::FillRect { rect, color, radius } => {
                    self.ctx.set_fill_style_str(&color.css());
                    self.rect_path(*rect, f64::from(*radius));
                    self.ctx.fill();
                }
                DrawCmd::StrokeRect { rect, color, width, radius } => {
                    self.ctx.set_stroke_style_str(&color.css());
                    self.ctx.set_line_width(f64::from(*width));
                    self.rect_path(*rect, f64::from(*radius));
                    self.ctx.stroke();
                }
                DrawCmd::Line { from, to, color, width } => {
                    self.ctx.set_stroke_style_str(&color.css());
                    self.ctx.set_line_width(f64::from(*width));
                    self.ctx.begin_path();
                    self.ctx.move_to(f64::from(from.x), f64::from(from.y));
                    self.ctx.line_to(f64::from(to.x), f64::from(to.y));
                    self.ctx.stroke();
                }
                DrawCmd::Text { text, pos, size, color, align } => {
                    self.ctx.set_fill_style_str(&color.css());
                    self.ctx.set_font(&format!("{size}px Arial"));
                    match align {
                        Align::Center => {
                            self.ctx.set_text_align("center");
                            self.ctx.set_text_baseline("middle");
                        }
                        Align::Left => {
                            self.ctx.set_text_align("left");
                            self.ctx.set_text_baseline("top");
                        }
                    }
                    let _ = self
                        .ctx
                        .fill_text(text, f64::from(pos.x), f64::from(pos.y));
                }
            }
        }
    }

    fn draw_sprite(&self, sprite: Sprite, rect: Rect) {
        if !self.is_loaded(sprite) {
            return;
        }
        let image = match sprite {
            Sprite::Background => &self.background,
        };
        if let Some(img) = image {
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                f64::from(rect.x),
                f64::from(rect.y),
                f64::from(rect.w),
                f64::from(rect.h),
            );
        }
    }

    /// Trace a rectangle path, optionally with rounded corners
    fn rect_path(&self, rect: Rect, radius: f64) {
        let (x, y, w, h) = (
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.w),
            f64::from(rect.h),
        );
        self.ctx.begin_path();
        if radius <= 0.0 {
            self.ctx.rect(x, y, w, h);
            return;
        }
        let r = radius.min(w / 2.0).min(h / 2.0);
        self.ctx.move_to(x + r, y);
        let _ = self.ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = self.ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = self.ctx.arc_to(x, y + h, x, y, r);
        let _ = self.ctx.arc_to(x, y, x + w, y, r);
        self.ctx.close_path();
    }
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    match HtmlImageElement::new() {
        Ok(img) => {
            img.set_src(src);
            Some(img)
        }
        Err(_) => {
            log::warn!("failed to create image element for {src}");
            None
        }
    }
}

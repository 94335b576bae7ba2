//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{DrawList, Shape, colors, css_color};
use crate::error::InitError;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Backing store size in device pixels
    pub size: (u32, u32),
    /// Device pixels per CSS pixel
    scale: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, InitError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| InitError::RendererUnavailable {
                reason: format!("{e:?}"),
            })?
            .ok_or_else(|| InitError::RendererUnavailable {
                reason: "2d context not supported".into(),
            })?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| InitError::RendererUnavailable {
                reason: "unexpected context type".into(),
            })?;
        let size = (canvas.width(), canvas.height());
        Ok(Self {
            canvas,
            ctx,
            size,
            scale: 1.0,
        })
    }

    /// Resize to `css_width` x `css_height`, backed by `dpr` device pixels each
    pub fn resize(&mut self, css_width: f32, css_height: f32, dpr: f64) {
        let new_width = (css_width as f64 * dpr) as u32;
        let new_height = (css_height as f64 * dpr) as u32;
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.scale = dpr;
            self.canvas.set_width(new_width);
            self.canvas.set_height(new_height);
        }
    }

    /// Paint a frame; shapes are in CSS pixels
    pub fn render(&self, list: &DrawList) {
        let ctx = &self.ctx;
        let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, self.size.0 as f64, self.size.1 as f64);
        let _ = ctx.set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);

        for shape in &list.shapes {
            match shape {
                Shape::Line { from, to, color, width } => {
                    ctx.set_stroke_style_str(&css_color(*color));
                    ctx.set_line_width(*width as f64);
                    ctx.begin_path();
                    ctx.move_to(from.x as f64, from.y as f64);
                    ctx.line_to(to.x as f64, to.y as f64);
                    ctx.stroke();
                }
                Shape::Circle { center, radius, color, label } => {
                    ctx.set_fill_style_str(&css_color(*color));
                    ctx.begin_path();
                    if let Err(e) = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU) {
                        log::warn!("arc failed: {:?}", e);
                        continue;
                    }
                    ctx.fill();

                    if let Some(text) = label {
                        ctx.set_fill_style_str(&css_color(colors::LABEL));
                        ctx.set_font("bold 16px sans-serif");
                        ctx.set_text_align("center");
                        ctx.set_text_baseline("middle");
                        let _ = ctx.fill_text(text, center.x as f64, center.y as f64);
                    }
                }
            }
        }
    }
}

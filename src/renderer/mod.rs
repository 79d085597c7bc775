//! Canvas 2D presentation
//!
//! Consumes a read-only snapshot of the game state each frame and draws it.
//! Emits nothing back into the simulation.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::GameState;

const COURT_FILL: &str = "#0b2f1f";
const LINE_COLOR: &str = "#d8f3dc";
const OBJECT_COLOR: &str = "#f2fff4";

/// Canvas renderer bound to one 2D context
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
}

impl Renderer {
    /// Bind to a canvas, sizing it to the court
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        canvas.set_width(COURT_WIDTH as u32);
        canvas.set_height(COURT_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one frame: court, paddles, ball, score line
    pub fn render(&self, state: &GameState) {
        self.draw_court();
        self.draw_objects(state);
        self.draw_ui(state);
    }

    fn draw_court(&self) {
        let ctx = &self.ctx;
        let w = COURT_WIDTH as f64;
        let h = COURT_HEIGHT as f64;

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(COURT_FILL);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_stroke_style_str(LINE_COLOR);
        ctx.set_line_width(4.0);
        ctx.stroke_rect(2.0, 2.0, w - 4.0, h - 4.0);

        // Dashed center line
        let dash = js_sys::Array::of2(&JsValue::from_f64(14.0), &JsValue::from_f64(14.0));
        ctx.set_line_dash(&dash).ok();
        ctx.begin_path();
        ctx.move_to(w / 2.0, 12.0);
        ctx.line_to(w / 2.0, h - 12.0);
        ctx.stroke();
        ctx.set_line_dash(&js_sys::Array::new()).ok();

        // Center circle and spot
        ctx.begin_path();
        ctx.arc(w / 2.0, h / 2.0, 54.0, 0.0, std::f64::consts::TAU)
            .ok();
        ctx.stroke();

        ctx.set_fill_style_str(LINE_COLOR);
        ctx.begin_path();
        ctx.arc(w / 2.0, h / 2.0, 5.0, 0.0, std::f64::consts::TAU)
            .ok();
        ctx.fill();
    }

    fn draw_objects(&self, state: &GameState) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(OBJECT_COLOR);

        for rect in [state.left_paddle.rect(), state.right_paddle.rect()] {
            ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        }

        ctx.begin_path();
        ctx.arc(
            state.ball.pos.x as f64,
            state.ball.pos.y as f64,
            BALL_RADIUS as f64,
            0.0,
            std::f64::consts::TAU,
        )
        .ok();
        ctx.fill();
    }

    fn draw_ui(&self, state: &GameState) {
        let ctx = &self.ctx;
        let w = COURT_WIDTH as f64;

        ctx.set_fill_style_str(OBJECT_COLOR);
        ctx.set_font("bold 44px Segoe UI, sans-serif");
        ctx.set_text_align("center");
        let score = format!("{} : {}", state.left_score, state.right_score);
        ctx.fill_text(&score, w / 2.0, 54.0).ok();

        ctx.set_font("20px Segoe UI, sans-serif");
        if state.paused {
            ctx.fill_text("PAUSED", w / 2.0, 85.0).ok();
        } else if state.serving() {
            ctx.fill_text("Serve...", w / 2.0, 85.0).ok();
        }
    }
}

//! Canvas 2D renderer for the browser host

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::game::{Outcome, Renderer};
use crate::sim::{Frame, Square};

const BACKGROUND: &str = "black";
const PLAYER_COLOR: &str = "red";
const ENEMY_COLOR: &str = "blue";
const COLLECTABLE_COLOR: &str = "yellow";
const TEXT_COLOR: &str = "white";
const SCORE_FONT: &str = "24px Arial";
const BANNER_FONT: &str = "bold 32px Arial";
const HINT_FONT: &str = "16px Arial";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn fill_square(&self, square: &Square) {
        let size = square.size as f64;
        self.ctx
            .fill_rect(square.pos.x as f64, square.pos.y as f64, size, size);
    }

    fn text(&self, text: &str, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.fill_text(text, x, y)
    }

    /// Overlay the end-of-game message on top of the last frame
    pub fn draw_banner(&self, outcome: Outcome) {
        let (headline, score) = match outcome {
            Outcome::Win { score } => ("You Win!", score),
            Outcome::Loss { score } => ("Game Over!", score),
        };
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;

        self.ctx.set_fill_style_str("rgba(0, 0, 0, 0.6)");
        self.ctx.fill_rect(0.0, cy - 50.0, self.width, 100.0);

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_text_align("center");
        self.ctx.set_font(BANNER_FONT);
        let drawn = self
            .text(headline, cx, cy - 5.0)
            .and_then(|_| {
                self.ctx.set_font(HINT_FONT);
                self.text(&format!("Score: {} - press Space to play again", score), cx, cy + 30.0)
            });
        if let Err(e) = drawn {
            log::warn!("Banner draw failed: {:?}", e);
        }
        self.ctx.set_text_align("start");
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame) {
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx
            .fill_rect(0.0, 0.0, frame.field.x as f64, frame.field.y as f64);

        self.ctx.set_fill_style_str(PLAYER_COLOR);
        self.fill_square(&frame.player);

        self.ctx.set_fill_style_str(ENEMY_COLOR);
        for enemy in &frame.enemies {
            self.fill_square(enemy);
        }

        self.ctx.set_fill_style_str(COLLECTABLE_COLOR);
        for collectable in &frame.collectables {
            self.fill_square(collectable);
        }

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_font(SCORE_FONT);
        if let Err(e) = self.text(&format!("Score: {}", frame.score), 10.0, 30.0) {
            log::warn!("Score draw failed: {:?}", e);
        }
    }
}

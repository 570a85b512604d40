//! Coin-pile rendering
//!
//! Rasterizes generated coin layouts with tiny-skia. Layout calculation
//! (in [`crate::domain::pile`]) is kept separate from rendering so the
//! geometry stays testable without touching pixels; this module only
//! turns finished token lists into a pixmap.

use thiserror::Error;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::domain::core::Rgb;
use crate::domain::pile::{CANVAS_SIZE, Coin};
use crate::domain::vault::VaultTheme;

/// Rendered canvas edge length in pixels
pub const CANVAS_PIXELS: u32 = CANVAS_SIZE as u32;

/// Height of the stone floor strip along the bottom edge
const FLOOR_HEIGHT: f32 = 64.0;
const FLOOR_COLOR: Rgb = Rgb::from_u32(0x2c1e12);

/// Coin body half-extents, before per-coin scaling
const COIN_RX: f32 = 7.0;
const COIN_RY: f32 = 4.5;
const OUTLINE_WIDTH: f32 = 0.4;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Failed to construct coin geometry")]
    PathConstructionFailed,
}

/// Rasterizes coin piles onto a fixed-size canvas
#[derive(Debug, Default)]
pub struct PileRenderer;

impl PileRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders a coin pile over the theme's backdrop
    ///
    /// # Arguments
    /// * `coins` - Generated tokens, drawn in order (later tokens on top)
    /// * `theme` - Supplies the background color; coin colors come from
    ///   the tokens themselves
    ///
    /// # Returns
    /// An opaque 400x400 pixmap, or RenderError if allocation fails
    pub fn render(&self, coins: &[Coin], theme: &VaultTheme) -> Result<Pixmap, RenderError> {
        let mut pixmap = Pixmap::new(CANVAS_PIXELS, CANVAS_PIXELS)
            .ok_or(RenderError::PixmapCreationFailed)?;

        pixmap.fill(to_skia(theme.background, 255));
        self.render_floor(&mut pixmap);
        self.render_coins(&mut pixmap, coins)?;

        Ok(pixmap)
    }

    /// Draws the stone floor strip the pile rests on
    fn render_floor(&self, pixmap: &mut Pixmap) {
        let Some(rect) = Rect::from_xywh(
            0.0,
            CANVAS_SIZE - FLOOR_HEIGHT,
            CANVAS_SIZE,
            FLOOR_HEIGHT,
        ) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia(FLOOR_COLOR, 255));
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn render_coins(&self, pixmap: &mut Pixmap, coins: &[Coin]) -> Result<(), RenderError> {
        if coins.is_empty() {
            return Ok(());
        }

        // The body and highlight paths are shared by every coin; only the
        // transform changes per token.
        let body = oval_path(-COIN_RX, -COIN_RY, COIN_RX * 2.0, COIN_RY * 2.0)
            .ok_or(RenderError::PathConstructionFailed)?;
        let highlight =
            oval_path(-4.0, -2.2, 5.0, 2.4).ok_or(RenderError::PathConstructionFailed)?;

        let mut body_paint = Paint::default();
        body_paint.anti_alias = true;

        let mut outline_paint = Paint::default();
        outline_paint.anti_alias = true;
        outline_paint.set_color(Color::from_rgba8(0, 0, 0, 51));
        let outline = Stroke {
            width: OUTLINE_WIDTH,
            ..Stroke::default()
        };

        let mut highlight_paint = Paint::default();
        highlight_paint.anti_alias = true;
        highlight_paint.set_color(Color::from_rgba8(255, 255, 255, 102));

        for coin in coins {
            let transform = Transform::from_translate(coin.x, coin.y)
                .pre_concat(Transform::from_rotate(coin.rotation))
                .pre_concat(Transform::from_scale(coin.scale, coin.scale));

            body_paint.set_color(to_skia(coin.color, 255));
            pixmap.fill_path(&body, &body_paint, FillRule::Winding, transform, None);
            pixmap.stroke_path(&body, &outline_paint, &outline, transform, None);
            pixmap.fill_path(&highlight, &highlight_paint, FillRule::Winding, transform, None);
        }

        Ok(())
    }
}

/// Builds an axis-aligned oval path
fn oval_path(x: f32, y: f32, w: f32, h: f32) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    builder.push_oval(Rect::from_xywh(x, y, w, h)?);
    builder.finish()
}

/// Converts a domain color to a tiny-skia color with explicit alpha
fn to_skia(color: Rgb, alpha: u8) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, alpha)
}

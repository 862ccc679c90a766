//! Software compositor for the banner scene
//!
//! Text layers are rasterised once, with their effects baked in. Each frame
//! only copies the static backdrop and draws the sprites at the node's
//! current scale and opacity, so per-frame cost is independent of the blur.

pub mod text;

use crate::font::FontChoice;
use crate::scene::{Node, NodeId, NodeKind, Scene};
use crate::style::Rgba;
use anyhow::{anyhow, Result};
use cosmic_text::{FontSystem, SwashCache};
use std::collections::HashMap;
use tiny_skia::{
    BlendMode, Color, FilterQuality, GradientStop, LinearGradient, Paint, Pixmap, PixmapPaint,
    Point, Rect, SpreadMode, Transform,
};

pub struct Renderer {
    canvas: Pixmap,
    backdrop: Pixmap,
    sprites: HashMap<NodeId, Pixmap>,
}

impl Renderer {
    /// Prepare a `width` x `height` canvas and pre-render every layer of `scene`
    pub fn new(
        scene: &Scene,
        font: &FontChoice,
        font_system: &mut FontSystem,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let canvas = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("Invalid canvas size {}x{}", width, height))?;
        let mut backdrop = canvas.clone();
        let mut sprites = HashMap::new();
        let mut cache = SwashCache::new();

        for node in scene.nodes() {
            match &node.kind {
                NodeKind::Strip { height, stops } => draw_strip(&mut backdrop, *height, stops),
                NodeKind::Text { .. } => {
                    match build_sprite(node, scene.text(), font, font_system, &mut cache) {
                        Some(sprite) => {
                            sprites.insert(node.id, sprite);
                        }
                        None => tracing::warn!("Nothing to draw for {:?}", node.id),
                    }
                }
            }
        }

        tracing::debug!("Renderer ready: {}x{}, {} text layers", width, height, sprites.len());

        Ok(Renderer {
            canvas,
            backdrop,
            sprites,
        })
    }

    /// Composite the scene at its current animation state
    pub fn render(&mut self, scene: &Scene) -> &Pixmap {
        self.canvas.data_mut().copy_from_slice(self.backdrop.data());

        for node in scene.nodes() {
            if let Some(sprite) = self.sprites.get(&node.id) {
                draw_sprite(&mut self.canvas, sprite, node.scale, node.opacity);
            }
        }

        &self.canvas
    }
}

fn build_sprite(
    node: &Node,
    text: &str,
    font: &FontChoice,
    font_system: &mut FontSystem,
    cache: &mut SwashCache,
) -> Option<Pixmap> {
    let NodeKind::Text { font_size, color } = node.kind else {
        return None;
    };

    // Room for the effect to spread past the glyphs
    let padding = (node.effect.spread() * 2.0).ceil() as u32 + 2;

    let mut sprite = text::rasterize(
        font_system,
        cache,
        text,
        font.family(),
        font_size,
        color,
        padding,
    )?;
    text::apply_effect(&mut sprite, &node.effect);
    Some(sprite)
}

fn to_color(c: &Rgba) -> Color {
    Color::from_rgba8(c[0], c[1], c[2], c[3])
}

/// Full-width strip, centred vertically, with a horizontal gradient
fn draw_strip(target: &mut Pixmap, strip_height: f32, stops: &[(f32, Rgba); 4]) {
    let (width, height) = (target.width() as f32, target.height() as f32);
    let top = (height - strip_height) / 2.0;

    let Some(rect) = Rect::from_xywh(0.0, top, width, strip_height) else {
        return;
    };

    let stops = stops
        .iter()
        .map(|(pos, c)| GradientStop::new(*pos, to_color(c)))
        .collect();

    let Some(shader) = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(width, 0.0),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    ) else {
        return;
    };

    let paint = Paint {
        shader,
        anti_alias: false,
        ..Paint::default()
    };
    target.fill_rect(rect, &paint, Transform::identity(), None);
}

/// Draw `sprite` centred on `target`, scaled about its own centre
fn draw_sprite(target: &mut Pixmap, sprite: &Pixmap, scale: f32, opacity: f32) {
    if opacity <= 0.0 || scale <= 0.0 {
        return;
    }

    let (cx, cy) = (target.width() as f32 / 2.0, target.height() as f32 / 2.0);
    let (sw, sh) = (sprite.width() as f32, sprite.height() as f32);

    let transform = Transform::from_translate(cx, cy)
        .pre_scale(scale, scale)
        .pre_translate(-sw / 2.0, -sh / 2.0);

    let paint = PixmapPaint {
        opacity: opacity.min(1.0),
        blend_mode: BlendMode::SourceOver,
        quality: FilterQuality::Bilinear,
    };
    target.draw_pixmap(0, 0, sprite.as_ref(), &paint, transform, None);
}

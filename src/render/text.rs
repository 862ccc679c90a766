//! Text layer rasterisation and effects

use crate::scene::Effect;
use crate::style::Rgba;
use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{imageops, RgbaImage};
use tiny_skia::{
    BlendMode, FilterQuality, IntSize, Paint, Pixmap, PixmapPaint, Rect, Transform,
};

const LINE_HEIGHT: f32 = 1.2;

/// Lay out `text` and draw it into a new pixmap with `padding` on every side
pub fn rasterize(
    font_system: &mut FontSystem,
    cache: &mut SwashCache,
    text: &str,
    family: Family<'_>,
    font_size: f32,
    color: Rgba,
    padding: u32,
) -> Option<Pixmap> {
    let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT);
    let mut buffer = Buffer::new(font_system, metrics);
    buffer.set_size(font_system, None, None);
    buffer.set_text(font_system, text, Attrs::new().family(family), Shaping::Advanced);
    buffer.shape_until_scroll(font_system, false);

    let mut line_width: f32 = 0.0;
    let mut lines = 0usize;
    for run in buffer.layout_runs() {
        line_width = line_width.max(run.line_w);
        lines += 1;
    }
    let text_height = lines.max(1) as f32 * metrics.line_height;

    let width = line_width.ceil() as u32 + padding * 2;
    let height = text_height.ceil() as u32 + padding * 2;
    let mut pixmap = Pixmap::new(width.max(1), height.max(1))?;

    let [r, g, b, a] = color;
    let offset = Transform::from_translate(padding as f32, padding as f32);
    let mut paint = Paint {
        anti_alias: false,
        ..Paint::default()
    };

    buffer.draw(
        font_system,
        cache,
        cosmic_text::Color::rgb(r, g, b),
        |x, y, w, h, glyph| {
            // Mask glyphs carry coverage in alpha, scale it by the layer alpha
            let alpha = (glyph.a() as u32 * a as u32 / 255) as u8;
            if alpha == 0 {
                return;
            }
            let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) else {
                return;
            };
            paint.set_color_rgba8(glyph.r(), glyph.g(), glyph.b(), alpha);
            pixmap.fill_rect(rect, &paint, offset, None);
        },
    );

    Some(pixmap)
}

/// Apply a layer effect to a rasterised text sprite
pub fn apply_effect(sprite: &mut Pixmap, effect: &Effect) {
    match *effect {
        Effect::None => {}
        Effect::Blur { radius } => {
            if let Some(blurred) = blurred(sprite, radius) {
                *sprite = blurred;
            }
        }
        Effect::DropShadow { color, radius } => {
            let Some(mut shadow) = tinted(sprite, color) else {
                return;
            };
            if let Some(blurred) = blurred(&shadow, radius) {
                shadow = blurred;
            }

            // text over its shadow
            let paint = PixmapPaint {
                opacity: 1.0,
                blend_mode: BlendMode::SourceOver,
                quality: FilterQuality::Nearest,
            };
            shadow.draw_pixmap(0, 0, sprite.as_ref(), &paint, Transform::identity(), None);
            *sprite = shadow;
        }
    }
}

/// Gaussian blur whose kernel reaches `radius` pixels (three standard deviations)
fn blurred(sprite: &Pixmap, radius: f32) -> Option<Pixmap> {
    if radius <= 0.0 {
        return None;
    }
    let (width, height) = (sprite.width(), sprite.height());
    let image = RgbaImage::from_raw(width, height, sprite.data().to_vec())?;
    let blurred = imageops::blur(&image, radius / 3.0);
    Pixmap::from_vec(blurred.into_raw(), IntSize::from_wh(width, height)?)
}

/// Alpha mask of `sprite` filled with `color`
fn tinted(sprite: &Pixmap, color: Rgba) -> Option<Pixmap> {
    let mut shadow = Pixmap::new(sprite.width(), sprite.height())?;
    shadow.fill(tiny_skia::Color::from_rgba8(color[0], color[1], color[2], color[3]));

    let mask = tiny_skia::Mask::from_pixmap(sprite.as_ref(), tiny_skia::MaskType::Alpha);
    shadow.apply_mask(&mask);
    Some(shadow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite_with_block(size: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(size, size).unwrap();
        let s = size as usize;
        let data = pixmap.data_mut();
        for y in s / 2 - 2..s / 2 + 3 {
            for x in s / 2 - 2..s / 2 + 3 {
                let i = (y * s + x) * 4;
                data[i..i + 4].copy_from_slice(&[218, 165, 32, 255]);
            }
        }
        pixmap
    }

    #[test]
    fn test_drop_shadow_keeps_text_on_top() {
        let mut sprite = sprite_with_block(31);
        apply_effect(
            &mut sprite,
            &Effect::DropShadow { color: [0, 0, 0, 255], radius: 8.0 },
        );

        let centre = sprite.pixel(15, 15).unwrap();
        assert_eq!(
            (centre.red(), centre.green(), centre.blue(), centre.alpha()),
            (218, 165, 32, 255)
        );

        // dark halo just outside the glyph
        let halo = sprite.pixel(19, 15).unwrap();
        assert!(halo.alpha() > 0);
        assert_eq!((halo.red(), halo.green(), halo.blue()), (0, 0, 0));
    }

    #[test]
    fn test_blur_effect_softens_edges() {
        let mut sprite = sprite_with_block(41);
        apply_effect(&mut sprite, &Effect::Blur { radius: 15.0 });
        assert!(sprite.pixel(20, 20).unwrap().alpha() < 255);
        assert!(sprite.pixel(25, 20).unwrap().alpha() > 0);
        assert_eq!(sprite.pixel(0, 0).unwrap().alpha(), 0);

        // symmetric about the block centre
        let left = sprite.pixel(16, 20).unwrap().alpha() as i32;
        let right = sprite.pixel(24, 20).unwrap().alpha() as i32;
        assert!((left - right).abs() <= 1);
    }

    #[test]
    fn test_blur_keeps_colour_within_alpha() {
        let mut sprite = sprite_with_block(31);
        apply_effect(&mut sprite, &Effect::Blur { radius: 6.0 });

        for px in sprite.pixels() {
            assert!(px.red() <= px.alpha() && px.green() <= px.alpha() && px.blue() <= px.alpha());
        }
    }

    #[test]
    fn test_no_effect_is_untouched() {
        let mut sprite = sprite_with_block(11);
        let before = sprite.clone();
        apply_effect(&mut sprite, &Effect::None);
        assert_eq!(sprite, before);
    }

    #[test]
    fn test_rasterize_pads_every_side() {
        let mut font_system = FontSystem::new();
        let mut cache = SwashCache::new();

        let sprite = rasterize(
            &mut font_system,
            &mut cache,
            "YOU DIED",
            Family::Name("Times New Roman"),
            72.0,
            [218, 165, 32, 255],
            18,
        )
        .unwrap();

        assert!(sprite.width() >= 36);
        assert!(sprite.height() >= 36 + 72);

        // nothing is drawn into the padding band
        let top_band = sprite.width() as usize * 10;
        assert!(sprite.pixels().iter().take(top_band).all(|px| px.alpha() == 0));
    }
}

use cosmic_text::{Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::font::{
    BUILTIN_GLYPH_HEIGHT, BUILTIN_GLYPH_SPACING, BUILTIN_GLYPH_WIDTH, FontChoice, ScalableFont,
    builtin_glyph,
};
use crate::icon::blend;

#[derive(Debug, Error)]
pub enum TextError {
    /// Shaping succeeded but rasterization produced no visible pixels,
    /// e.g. the selected face has no outlines for the label.
    #[error("label produced no visible glyphs")]
    NothingRendered,
    #[error("glyph {0:?} missing from the built-in font")]
    UnsupportedGlyph(char),
}

/// Draws `label` in white, centered on the square raster. The label's pixel
/// bounding box under the chosen font decides the placement, so the result
/// is centered regardless of the font's bearings.
pub fn draw_label(
    img: &mut RgbaImage,
    choice: FontChoice,
    label: &str,
    font_px: f32,
) -> Result<(), TextError> {
    match choice {
        FontChoice::Scalable(font) => draw_scalable(img, font, label, font_px),
        FontChoice::Builtin => draw_builtin(img, label),
    }
}

fn draw_scalable(
    img: &mut RgbaImage,
    font: ScalableFont,
    label: &str,
    font_px: f32,
) -> Result<(), TextError> {
    let size = img.width();
    let mut font_system = FontSystem::new_with_locale_and_db(String::from("en-US"), font.db);
    let mut cache = SwashCache::new();

    let mut buffer = Buffer::new(&mut font_system, Metrics::new(font_px, font_px * 1.2));
    // Bounds generous enough that a two-character label never wraps.
    let canvas = (size.max(32) * 2) as f32;
    buffer.set_size(&mut font_system, Some(canvas), Some(canvas));
    let attrs = Attrs::new().family(Family::Name(&font.family));
    buffer.set_text(&mut font_system, label, attrs, Shaping::Advanced);
    buffer.shape_until_scroll(&mut font_system, false);

    let white = Color::rgba(255, 255, 255, 255);

    // First pass measures the coverage bounding box.
    let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
    buffer.draw(&mut font_system, &mut cache, white, |x, y, w, h, color| {
        if color.a() == 0 || w == 0 || h == 0 {
            return;
        }
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x + w as i32 - 1);
        max_y = max_y.max(y + h as i32 - 1);
    });
    if min_x > max_x {
        return Err(TextError::NothingRendered);
    }

    // Second pass blends shifted so the box lands on the center.
    let dx = (size as i32 - (max_x - min_x + 1)) / 2 - min_x;
    let dy = (size as i32 - (max_y - min_y + 1)) / 2 - min_y;
    buffer.draw(&mut font_system, &mut cache, white, |x, y, w, h, color| {
        if color.a() == 0 {
            return;
        }
        let src = [color.r(), color.g(), color.b(), color.a()];
        for row in 0..h as i32 {
            for col in 0..w as i32 {
                let px = x + col + dx;
                let py = y + row + dy;
                if px >= 0 && py >= 0 && (px as u32) < size && (py as u32) < size {
                    blend(img.get_pixel_mut(px as u32, py as u32), src);
                }
            }
        }
    });
    Ok(())
}

/// Fixed-size bitmap rendering, one image pixel per glyph cell. The glyphs
/// do not scale with the icon, matching a non-scalable default font.
fn draw_builtin(img: &mut RgbaImage, label: &str) -> Result<(), TextError> {
    let size = img.width() as i32;
    let glyphs = label
        .chars()
        .map(|c| builtin_glyph(c).ok_or(TextError::UnsupportedGlyph(c)))
        .collect::<Result<Vec<_>, _>>()?;
    if glyphs.is_empty() {
        return Err(TextError::NothingRendered);
    }

    let count = glyphs.len() as i32;
    let total_w = count * BUILTIN_GLYPH_WIDTH as i32 + (count - 1) * BUILTIN_GLYPH_SPACING as i32;
    let x0 = (size - total_w) / 2;
    let y0 = (size - BUILTIN_GLYPH_HEIGHT as i32) / 2;

    for (i, rows) in glyphs.iter().enumerate() {
        let gx = x0 + i as i32 * (BUILTIN_GLYPH_WIDTH + BUILTIN_GLYPH_SPACING) as i32;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..BUILTIN_GLYPH_WIDTH {
                if bits & (1 << (BUILTIN_GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let px = gx + col as i32;
                let py = y0 + row as i32;
                if px >= 0 && py >= 0 && px < size && py < size {
                    img.put_pixel(px as u32, py as u32, Rgba([255, 255, 255, 255]));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;

    #[test]
    fn unsupported_builtin_glyph_is_an_error() {
        let mut img = RgbaImage::from_pixel(32, 32, Rgba([0, 0, 0, 255]));
        let err = draw_label(&mut img, FontChoice::Builtin, "OK", 11.2).unwrap_err();
        assert!(matches!(err, TextError::UnsupportedGlyph('O')));
    }

    #[test]
    fn builtin_label_lights_up_center_pixels() {
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        draw_label(&mut img, FontChoice::Builtin, "AI", 22.4).unwrap();
        let lit = img.pixels().filter(|p| p.0[0] == 255).count();
        assert!(lit > 10, "expected the bitmap label to be drawn, lit={lit}");
        // Nothing outside the 5x7 band may be touched.
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(32, 10), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn scalable_label_renders_when_a_system_font_exists() {
        // Exercised only on machines where a candidate font is present;
        // the builtin path is covered unconditionally above.
        if let FontChoice::Scalable(f) = font::select() {
            let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
            draw_label(&mut img, FontChoice::Scalable(f), "AI", 22.4).unwrap();
            assert!(img.pixels().any(|p| p.0[0] > 200));
        }
    }
}

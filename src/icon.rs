use std::fs;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, Rgba, RgbaImage};
use thiserror::Error;

use crate::font;
use crate::text;

/// The two-character label drawn on every icon.
pub const LABEL: &str = "AI";

/// Default background, #1890ff.
pub const BACKGROUND: Rgba<u8> = Rgba([24, 144, 255, 255]);

/// Label font size as a fraction of the icon edge.
const LABEL_SCALE: f32 = 0.35;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Everything a single render call needs. Immutable once constructed.
#[derive(Debug, Clone, Copy)]
pub struct IconSpec {
    pub size: u32,
    pub background: Rgba<u8>,
    pub border: bool,
}

impl IconSpec {
    pub fn new(size: u32) -> Self {
        Self { size, background: BACKGROUND, border: false }
    }

    pub fn with_border(size: u32) -> Self {
        Self { size, background: BACKGROUND, border: true }
    }
}

#[derive(Debug, Error)]
pub enum IconError {
    #[error("invalid icon size {0}px (must be at least 1)")]
    InvalidSize(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] image::ImageError),
}

/// Renders one icon: background fill, optional rounded-rectangle border,
/// centered label. Font selection is re-evaluated on every call. If label
/// rendering fails the circle glyph is substituted and the error consumed,
/// so a well-formed size always yields a finished raster.
pub fn render(spec: IconSpec) -> Result<RgbaImage, IconError> {
    if spec.size == 0 {
        return Err(IconError::InvalidSize(spec.size));
    }
    let mut img = RgbaImage::from_pixel(spec.size, spec.size, spec.background);
    if spec.border {
        draw_border(&mut img);
    }
    let font_px = spec.size as f32 * LABEL_SCALE;
    if let Err(e) = text::draw_label(&mut img, font::select(), LABEL, font_px) {
        log::warn!("label rendering failed ({e}), drawing fallback glyph");
        draw_fallback_glyph(&mut img);
    }
    Ok(img)
}

/// Writes the raster as an RGBA PNG with best-compression encoding,
/// creating missing parent directories.
pub fn write_icon(img: &RgbaImage, path: &Path) -> Result<(), IconError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let writer = BufWriter::new(fs::File::create(path)?);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), image::ColorType::Rgba8)?;
    Ok(())
}

/// White rounded-rectangle outline, inset size/10, corner radius size/5,
/// stroke size/40 growing inward.
fn draw_border(img: &mut RgbaImage) {
    let size = img.width();
    let margin = (size / 10) as f32;
    let radius = (size / 5) as f32;
    let stroke = (size / 40).max(1) as f32;
    let (x0, y0) = (margin, margin);
    let (x1, y1) = (size as f32 - margin, size as f32 - margin);
    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let outer = in_rounded_rect(px, py, x0, y0, x1, y1, radius);
            let inner = in_rounded_rect(
                px,
                py,
                x0 + stroke,
                y0 + stroke,
                x1 - stroke,
                y1 - stroke,
                (radius - stroke).max(0.0),
            );
            if outer && !inner {
                img.put_pixel(x, y, WHITE);
            }
        }
    }
}

/// Recovery glyph for a failed label: translucent white disc of radius
/// size/4 with a solid white outline of stroke size/20 growing inward.
pub(crate) fn draw_fallback_glyph(img: &mut RgbaImage) {
    let size = img.width();
    let center = size as f32 / 2.0;
    let radius = (size / 4) as f32;
    let stroke = (size / 20).max(1) as f32;
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius {
                continue;
            }
            if dist >= radius - stroke {
                img.put_pixel(x, y, WHITE);
            } else {
                blend(img.get_pixel_mut(x, y), [255, 255, 255, 200]);
            }
        }
    }
}

/// Rounded-rectangle membership for a point, rect [x0,y0]..[x1,y1] with
/// corner radius r. Degenerate rects (x1 <= x0) contain nothing.
fn in_rounded_rect(px: f32, py: f32, x0: f32, y0: f32, x1: f32, y1: f32, r: f32) -> bool {
    if px < x0 || px > x1 || py < y0 || py > y1 {
        return false;
    }
    let r = r.min((x1 - x0) / 2.0).min((y1 - y0) / 2.0).max(0.0);
    let cx = if px < x0 + r {
        x0 + r
    } else if px > x1 - r {
        x1 - r
    } else {
        return true;
    };
    let cy = if py < y0 + r {
        y0 + r
    } else if py > y1 - r {
        y1 - r
    } else {
        return true;
    };
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/// Straight-alpha source-over compositing in integer math.
pub(crate) fn blend(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as u32;
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = Rgba(src);
        return;
    }
    let da = dst.0[3] as u32;
    let out_a = sa + da * (255 - sa) / 255;
    for i in 0..3 {
        let s = src[i] as u32;
        let d = dst.0[i] as u32;
        let num = s * sa * 255 + d * da * (255 - sa);
        dst.0[i] = (num / (out_a * 255)) as u8;
    }
    dst.0[3] = out_a as u8;
}

use std::path::Path;

use cosmic_text::fontdb;

/// Candidate font files for the icon label, tried in order. Paths that do
/// not exist on the current machine simply fail to load and the next one is
/// tried; the bare file names at the end resolve against the working
/// directory.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "arial.ttf",
    "DejaVuSans-Bold.ttf",
];

/// A scalable font accepted from the candidate list: a database holding
/// exactly that file, plus the family name to request when shaping.
pub struct ScalableFont {
    pub db: fontdb::Database,
    pub family: String,
}

/// Outcome of the fallback chain. `Builtin` is the guaranteed terminal
/// case, so selection itself can never fail.
pub enum FontChoice {
    Scalable(ScalableFont),
    Builtin,
}

/// Walks [`FONT_CANDIDATES`] and returns the first font that loads.
pub fn select() -> FontChoice {
    select_from(FONT_CANDIDATES)
}

pub fn select_from(candidates: &[&str]) -> FontChoice {
    for path in candidates {
        match load_candidate(Path::new(path)) {
            Some(font) => {
                log::debug!("label font: {} ({})", path, font.family);
                return FontChoice::Scalable(font);
            }
            None => log::debug!("font candidate not usable: {path}"),
        }
    }
    log::debug!("no candidate font loaded, using built-in bitmap font");
    FontChoice::Builtin
}

fn load_candidate(path: &Path) -> Option<ScalableFont> {
    let mut db = fontdb::Database::new();
    db.load_font_file(path).ok()?;
    // A file that read fine but did not parse contributes no faces.
    let family = db
        .faces()
        .next()
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())?;
    Some(ScalableFont { db, family })
}

pub const BUILTIN_GLYPH_WIDTH: u32 = 5;
pub const BUILTIN_GLYPH_HEIGHT: u32 = 7;
pub const BUILTIN_GLYPH_SPACING: u32 = 1;

/// Fixed-size 5x7 bitmap glyphs, one row per byte, bit 4 = leftmost column.
/// Covers the label repertoire only.
pub fn builtin_glyph(c: char) -> Option<[u8; BUILTIN_GLYPH_HEIGHT as usize]> {
    match c {
        'A' => Some([
            0b01110, //
            0b10001, //
            0b10001, //
            0b11111, //
            0b10001, //
            0b10001, //
            0b10001, //
        ]),
        'I' => Some([
            0b01110, //
            0b00100, //
            0b00100, //
            0b00100, //
            0b00100, //
            0b00100, //
            0b01110, //
        ]),
        _ => None,
    }
}

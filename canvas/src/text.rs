use std::path::Path;

use fontdue::{Font, FontSettings};
use harness::{AssetLoadError, Color, FontId};
use log::debug;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Fonts registered under face names.
#[derive(Default)]
pub(crate) struct FontBook {
    faces: Vec<(String, Font)>,
}

impl FontBook {
    /// Loads a font file; a face name that is already taken gets the new
    /// font.
    pub fn load(&mut self, name: &str, path: &Path) -> Result<FontId, AssetLoadError> {
        let bytes = std::fs::read(path).map_err(|source| AssetLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| AssetLoadError::Font {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("loaded font '{name}' from {}", path.display());

        if let Some(id) = self.find(name) {
            self.faces[id.0].1 = font;
            return Ok(id);
        }
        self.faces.push((name.to_string(), font));
        Ok(FontId(self.faces.len() - 1))
    }

    pub fn find(&self, name: &str) -> Option<FontId> {
        self.faces.iter().position(|(n, _)| n == name).map(FontId)
    }

    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.faces.get(id.0).map(|(_, f)| f)
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }
}

/// Horizontal advance of `text` at `px`, kerning included.
pub(crate) fn measure(font: &Font, px: f32, text: &str) -> f32 {
    let mut pen = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            pen += font.horizontal_kern(p, ch, px).unwrap_or(0.0);
        }
        pen += font.metrics(ch, px).advance_width;
        prev = Some(ch);
    }
    pen
}

/// Ascent and descent (negative) at `px`.
pub(crate) fn vertical_extent(font: &Font, px: f32) -> (f32, f32) {
    match font.horizontal_line_metrics(px) {
        Some(m) => (m.ascent, m.descent),
        None => (px, 0.0),
    }
}

/// Draws `text` with its baseline starting at `origin`, device space.
/// Returns the advance in device pixels.
pub(crate) fn draw(target: &mut Pixmap, font: &Font, px: f32, origin: (f32, f32), text: &str, color: Color) -> f32 {
    let premul = [color.r * color.a, color.g * color.a, color.b * color.a, color.a];
    let baseline = origin.1.round() as i32;

    let mut pen = 0.0;
    let mut prev = None;
    for ch in text.chars() {
        if let Some(p) = prev {
            pen += font.horizontal_kern(p, ch, px).unwrap_or(0.0);
        }
        let (metrics, coverage) = font.rasterize(ch, px);
        if let Some(glyph) = glyph_pixmap(metrics.width, metrics.height, &coverage, premul) {
            let x = (origin.0 + pen).round() as i32 + metrics.xmin;
            let y = baseline - (metrics.height as i32 + metrics.ymin);
            target.draw_pixmap(x, y, glyph.as_ref(), &PixmapPaint::default(), Transform::identity(), None);
        }
        pen += metrics.advance_width;
        prev = Some(ch);
    }
    pen
}

fn glyph_pixmap(width: usize, height: usize, coverage: &[u8], premul: [f32; 4]) -> Option<Pixmap> {
    // whitespace has no bitmap
    let mut glyph = Pixmap::new(width as u32, height as u32)?;
    for (px, &cov) in glyph.data_mut().chunks_exact_mut(4).zip(coverage) {
        for (dst, c) in px.iter_mut().zip(premul) {
            *dst = (c.clamp(0.0, 1.0) * cov as f32).round() as u8;
        }
    }
    Some(glyph)
}

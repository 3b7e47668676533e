//! A drawing context that draws nothing and remembers every call.
//!
//! Useful to exercise render callbacks without a window or a rasterizer.

use std::io;
use std::path::{Path, PathBuf};

use crate::drawing::{DrawingContext, FontId, FramePixels, ImageFlags, ImageId, LineCap, LineJoin, Paint};
use crate::error::{AssetLoadError, DrawingError};

#[derive(Debug, Default)]
pub struct RecordingContext {
    pub calls: Vec<String>,
    /// When set, every asset load fails as if the file did not exist.
    pub missing_assets: bool,
    fonts: Vec<String>,
    images: Vec<PathBuf>,
    face: Option<FontId>,
    size: f32,
    in_frame: bool,
}

impl RecordingContext {
    pub fn new() -> RecordingContext {
        RecordingContext {
            size: 16.0,
            ..Default::default()
        }
    }

    pub fn with_missing_assets() -> RecordingContext {
        RecordingContext {
            missing_assets: true,
            ..RecordingContext::new()
        }
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }

    fn check_frame(&self) -> Result<(), DrawingError> {
        if self.in_frame {
            Ok(())
        } else {
            Err(DrawingError::NotInFrame)
        }
    }

    fn missing(path: &Path) -> AssetLoadError {
        AssetLoadError::Io {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        }
    }

    fn advance(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.5
    }
}

impl DrawingContext for RecordingContext {
    fn begin_frame(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<(), DrawingError> {
        self.in_frame = true;
        self.record(format!("begin_frame {width} {height} {pixel_ratio}"));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DrawingError> {
        self.check_frame()?;
        self.in_frame = false;
        self.record("end_frame".to_string());
        Ok(())
    }

    fn frame_pixels(&self) -> Option<FramePixels<'_>> {
        None
    }

    fn reset(&mut self) {
        self.fonts.clear();
        self.images.clear();
        self.face = None;
        self.in_frame = false;
        self.record("reset".to_string());
    }

    fn save(&mut self) {
        self.record("save".to_string());
    }

    fn restore(&mut self) {
        self.record("restore".to_string());
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.record(format!("translate {x} {y}"));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.record(format!("scale {x} {y}"));
    }

    fn rotate(&mut self, angle: f32) {
        self.record(format!("rotate {angle}"));
    }

    fn reset_transform(&mut self) {
        self.record("reset_transform".to_string());
    }

    fn global_alpha(&mut self, alpha: f32) {
        self.record(format!("global_alpha {alpha}"));
    }

    fn begin_path(&mut self) {
        self.record("begin_path".to_string());
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.record(format!("move_to {x} {y}"));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.record(format!("line_to {x} {y}"));
    }

    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.record(format!("bezier_to {c1x} {c1y} {c2x} {c2y} {x} {y}"));
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.record(format!("quad_to {cx} {cy} {x} {y}"));
    }

    fn close_path(&mut self) {
        self.record("close_path".to_string());
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.record(format!("rect {x} {y} {w} {h}"));
    }

    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        self.record(format!("rounded_rect {x} {y} {w} {h} {r}"));
    }

    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        self.record(format!("ellipse {cx} {cy} {rx} {ry}"));
    }

    fn fill_paint(&mut self, paint: Paint) {
        self.record(format!("fill_paint {paint:?}"));
    }

    fn stroke_paint(&mut self, paint: Paint) {
        self.record(format!("stroke_paint {paint:?}"));
    }

    fn stroke_width(&mut self, width: f32) {
        self.record(format!("stroke_width {width}"));
    }

    fn line_cap(&mut self, cap: LineCap) {
        self.record(format!("line_cap {cap:?}"));
    }

    fn line_join(&mut self, join: LineJoin) {
        self.record(format!("line_join {join:?}"));
    }

    fn fill(&mut self) -> Result<(), DrawingError> {
        self.check_frame()?;
        self.record("fill".to_string());
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), DrawingError> {
        self.check_frame()?;
        self.record("stroke".to_string());
        Ok(())
    }

    fn create_font(&mut self, name: &str, path: &Path) -> Result<FontId, AssetLoadError> {
        if self.missing_assets {
            return Err(Self::missing(path));
        }
        self.record(format!("create_font {name} {}", path.display()));
        self.fonts.push(name.to_string());
        Ok(FontId(self.fonts.len() - 1))
    }

    fn font_face(&mut self, name: &str) -> Result<(), DrawingError> {
        let id = self
            .fonts
            .iter()
            .rposition(|f| f == name)
            .ok_or_else(|| DrawingError::UnknownFont(name.to_string()))?;
        self.face = Some(FontId(id));
        self.record(format!("font_face {name}"));
        Ok(())
    }

    fn font_size(&mut self, size: f32) {
        self.size = size;
        self.record(format!("font_size {size}"));
    }

    fn text(&mut self, x: f32, y: f32, text: &str) -> Result<f32, DrawingError> {
        self.check_frame()?;
        if self.face.is_none() {
            return Err(DrawingError::NoFont);
        }
        self.record(format!("text {x} {y} {text}"));
        Ok(x + self.advance(text))
    }

    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> Result<[f32; 4], DrawingError> {
        if self.face.is_none() {
            return Err(DrawingError::NoFont);
        }
        Ok([x, y - self.size, x + self.advance(text), y])
    }

    fn create_image(&mut self, path: &Path, flags: ImageFlags) -> Result<ImageId, AssetLoadError> {
        if self.missing_assets {
            return Err(Self::missing(path));
        }
        self.record(format!("create_image {} {flags:?}", path.display()));
        self.images.push(path.to_path_buf());
        Ok(ImageId(self.images.len() - 1))
    }

    fn image_size(&self, image: ImageId) -> Option<(u32, u32)> {
        self.images.get(image.0).map(|_| (1, 1))
    }
}

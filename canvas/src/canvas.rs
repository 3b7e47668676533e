use std::path::Path;

use harness::drawing::{LineCap, LineJoin};
use harness::{
    AssetLoadError, DrawingContext, DrawingError, FontId, FramePixels, ImageFlags, ImageId, Paint,
};
use log::{debug, warn};
use tiny_skia::{FillRule, Pixmap, Stroke, Transform};

use crate::image::{load_image, Image};
use crate::paint::{shader, text_color};
use crate::path::PathData;
use crate::text::{self, FontBook};
use crate::xform::Xform;

const MAX_STATES: usize = 32;

#[derive(Debug, Clone)]
struct State {
    xform: Xform,
    // paint plus the transform current when it was set
    fill: (Paint, Xform),
    stroke: (Paint, Xform),
    stroke_width: f32,
    line_cap: LineCap,
    line_join: LineJoin,
    miter_limit: f32,
    alpha: f32,
    font: Option<FontId>,
    font_size: f32,
}

impl State {
    fn new(base: Xform) -> State {
        State {
            xform: base,
            fill: (Paint::Solid(harness::Color::WHITE), base),
            stroke: (Paint::Solid(harness::Color::BLACK), base),
            stroke_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            alpha: 1.0,
            font: None,
            font_size: 16.0,
        }
    }
}

/// Software drawing context rendering into a framebuffer sized pixmap.
pub struct Canvas {
    target: Option<Pixmap>,
    in_frame: bool,
    base: Xform,
    states: Vec<State>,
    path: PathData,
    fonts: FontBook,
    images: Vec<Image>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas {
            target: None,
            in_frame: false,
            base: Xform::IDENTITY,
            states: vec![State::new(Xform::IDENTITY)],
            path: PathData::default(),
            fonts: FontBook::default(),
            images: Vec::new(),
        }
    }

    fn state(&self) -> &State {
        // the stack always holds the base state
        &self.states[self.states.len() - 1]
    }

    fn state_mut(&mut self) -> &mut State {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    fn check_frame(&self) -> Result<(), DrawingError> {
        if self.in_frame && self.target.is_some() {
            Ok(())
        } else {
            Err(DrawingError::NotInFrame)
        }
    }

    fn current_font(&self) -> Result<&fontdue::Font, DrawingError> {
        let id = self.state().font.ok_or(DrawingError::NoFont)?;
        self.fonts.get(id).ok_or(DrawingError::NoFont)
    }

    fn xform_mut(&mut self, local: Xform) {
        self.state_mut().xform.premultiply(&local);
    }
}

fn sk_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn sk_line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

impl DrawingContext for Canvas {
    fn begin_frame(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<(), DrawingError> {
        let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        let fw = ((width.max(1) as f32 * ratio).round() as u32).max(1);
        let fh = ((height.max(1) as f32 * ratio).round() as u32).max(1);

        let reuse = matches!(&self.target, Some(t) if t.width() == fw && t.height() == fh);
        if reuse {
            if let Some(target) = self.target.as_mut() {
                target.fill(tiny_skia::Color::TRANSPARENT);
            }
        } else {
            debug!("canvas target {fw}x{fh}");
            let target = Pixmap::new(fw, fh)
                .ok_or_else(|| DrawingError::Surface(format!("cannot allocate {fw}x{fh} pixmap")))?;
            self.target = Some(target);
        }

        self.base = Xform::scale(ratio, ratio);
        self.states.clear();
        self.states.push(State::new(self.base));
        self.path.clear();
        self.in_frame = true;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DrawingError> {
        if !self.in_frame {
            return Err(DrawingError::NotInFrame);
        }
        self.in_frame = false;
        Ok(())
    }

    fn frame_pixels(&self) -> Option<FramePixels<'_>> {
        self.target.as_ref().map(|t| FramePixels {
            width: t.width(),
            height: t.height(),
            data: t.data(),
        })
    }

    fn reset(&mut self) {
        self.target = None;
        self.in_frame = false;
        self.base = Xform::IDENTITY;
        self.states = vec![State::new(Xform::IDENTITY)];
        self.path.clear();
        self.fonts.clear();
        self.images.clear();
    }

    fn save(&mut self) {
        if self.states.len() >= MAX_STATES {
            warn!("state stack full, save ignored");
            return;
        }
        let top = self.state().clone();
        self.states.push(top);
    }

    fn restore(&mut self) {
        if self.states.len() > 1 {
            self.states.pop();
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.xform_mut(Xform::translate(x, y));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.xform_mut(Xform::scale(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.xform_mut(Xform::rotate(angle));
    }

    fn reset_transform(&mut self) {
        let base = self.base;
        self.state_mut().xform = base;
    }

    fn global_alpha(&mut self, alpha: f32) {
        self.state_mut().alpha = alpha.clamp(0.0, 1.0);
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let xf = self.state().xform;
        self.path.move_to(&xf, x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let xf = self.state().xform;
        self.path.line_to(&xf, x, y);
    }

    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let xf = self.state().xform;
        self.path.cubic_to(&xf, c1x, c1y, c2x, c2y, x, y);
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        let xf = self.state().xform;
        self.path.quad_to(&xf, cx, cy, x, y);
    }

    fn close_path(&mut self) {
        self.path.close();
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let xf = self.state().xform;
        self.path.rect(&xf, x, y, w, h);
    }

    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32) {
        let xf = self.state().xform;
        self.path.rounded_rect(&xf, x, y, w, h, r);
    }

    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32) {
        let xf = self.state().xform;
        self.path.ellipse(&xf, cx, cy, rx, ry);
    }

    fn fill_paint(&mut self, paint: Paint) {
        let state = self.state_mut();
        state.fill = (paint, state.xform);
    }

    fn stroke_paint(&mut self, paint: Paint) {
        let state = self.state_mut();
        state.stroke = (paint, state.xform);
    }

    fn stroke_width(&mut self, width: f32) {
        self.state_mut().stroke_width = width.max(0.0);
    }

    fn line_cap(&mut self, cap: LineCap) {
        self.state_mut().line_cap = cap;
    }

    fn line_join(&mut self, join: LineJoin) {
        self.state_mut().line_join = join;
    }

    fn fill(&mut self) -> Result<(), DrawingError> {
        self.check_frame()?;
        let Some(path) = self.path.to_path() else {
            return Ok(());
        };
        let state = &self.states[self.states.len() - 1];
        let (paint, paint_xf) = &state.fill;
        let sk_paint = tiny_skia::Paint {
            shader: shader(paint, paint_xf, state.alpha, &self.images)?,
            anti_alias: true,
            ..tiny_skia::Paint::default()
        };
        if let Some(target) = self.target.as_mut() {
            target.fill_path(&path, &sk_paint, FillRule::Winding, Transform::identity(), None);
        }
        Ok(())
    }

    fn stroke(&mut self) -> Result<(), DrawingError> {
        self.check_frame()?;
        let Some(path) = self.path.to_path() else {
            return Ok(());
        };
        let state = &self.states[self.states.len() - 1];
        let (paint, paint_xf) = &state.stroke;
        let sk_paint = tiny_skia::Paint {
            shader: shader(paint, paint_xf, state.alpha, &self.images)?,
            anti_alias: true,
            ..tiny_skia::Paint::default()
        };
        let stroke = Stroke {
            width: state.stroke_width * state.xform.average_scale(),
            miter_limit: state.miter_limit,
            line_cap: sk_line_cap(state.line_cap),
            line_join: sk_line_join(state.line_join),
            dash: None,
        };
        if let Some(target) = self.target.as_mut() {
            target.stroke_path(&path, &sk_paint, &stroke, Transform::identity(), None);
        }
        Ok(())
    }

    fn create_font(&mut self, name: &str, path: &Path) -> Result<FontId, AssetLoadError> {
        self.fonts.load(name, path)
    }

    fn font_face(&mut self, name: &str) -> Result<(), DrawingError> {
        let id = self
            .fonts
            .find(name)
            .ok_or_else(|| DrawingError::UnknownFont(name.to_string()))?;
        self.state_mut().font = Some(id);
        Ok(())
    }

    fn font_size(&mut self, size: f32) {
        self.state_mut().font_size = size.max(0.0);
    }

    fn text(&mut self, x: f32, y: f32, s: &str) -> Result<f32, DrawingError> {
        self.check_frame()?;
        let state = &self.states[self.states.len() - 1];
        let scale = state.xform.average_scale();
        let px = state.font_size * scale;
        let origin = state.xform.apply(x, y);
        let color = text_color(&state.fill.0);
        let color = color.with_alpha(color.a * state.alpha);

        let font = state
            .font
            .and_then(|id| self.fonts.get(id))
            .ok_or(DrawingError::NoFont)?;
        let advance = match self.target.as_mut() {
            Some(target) => text::draw(target, font, px, origin, s, color),
            None => 0.0,
        };
        if scale > 0.0 {
            Ok(x + advance / scale)
        } else {
            Ok(x)
        }
    }

    fn text_bounds(&mut self, x: f32, y: f32, s: &str) -> Result<[f32; 4], DrawingError> {
        let state = self.state();
        let scale = state.xform.average_scale();
        if scale <= 0.0 {
            return Ok([x, y, x, y]);
        }
        let px = state.font_size * scale;
        let font = self.current_font()?;
        let advance = text::measure(font, px, s) / scale;
        let (ascent, descent) = text::vertical_extent(font, px);
        Ok([x, y - ascent / scale, x + advance, y - descent / scale])
    }

    fn create_image(&mut self, path: &Path, flags: ImageFlags) -> Result<ImageId, AssetLoadError> {
        let image = load_image(path, flags)?;
        self.images.push(image);
        Ok(ImageId(self.images.len() - 1))
    }

    fn image_size(&self, image: ImageId) -> Option<(u32, u32)> {
        self.images.get(image.0).map(Image::size)
    }
}

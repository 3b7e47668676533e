//! The vector graphics API render callbacks draw with.
//!
//! The call style follows the classic immediate-mode canvas: set state,
//! build a path, then `fill` or `stroke` it. Everything here is the
//! contract only, the rasterizing engine lives behind the trait.

use std::path::Path;

use crate::error::{AssetLoadError, DrawingError};
use crate::math::Vec2;

/// Straight (not premultiplied) RGBA color, each channel in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Color {
        Color { a, ..self }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ImageId(pub usize);

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ImageFlags {
    pub repeat: bool,
    pub flip_y: bool,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// How a fill or stroke is colored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        start: Vec2,
        end: Vec2,
        inner: Color,
        outer: Color,
    },
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: Color,
        outer: Color,
    },
    /// `image` stretched over the rectangle at `origin` of `size`, rotated
    /// by `angle` radians around `origin`.
    Image {
        image: ImageId,
        origin: Vec2,
        size: Vec2,
        angle: f32,
        alpha: f32,
    },
}

impl Paint {
    pub fn linear_gradient(sx: f32, sy: f32, ex: f32, ey: f32, inner: Color, outer: Color) -> Paint {
        Paint::LinearGradient {
            start: Vec2::new(sx, sy),
            end: Vec2::new(ex, ey),
            inner,
            outer,
        }
    }

    pub fn radial_gradient(cx: f32, cy: f32, inr: f32, outr: f32, inner: Color, outer: Color) -> Paint {
        Paint::RadialGradient {
            center: Vec2::new(cx, cy),
            inner_radius: inr,
            outer_radius: outr,
            inner,
            outer,
        }
    }

    pub fn image_pattern(ox: f32, oy: f32, w: f32, h: f32, angle: f32, image: ImageId, alpha: f32) -> Paint {
        Paint::Image {
            image,
            origin: Vec2::new(ox, oy),
            size: Vec2::new(w, h),
            angle,
            alpha,
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Paint {
        Paint::Solid(c)
    }
}

/// Premultiplied RGBA8 pixels of a finished frame, row 0 at the top.
#[derive(Debug, Copy, Clone)]
pub struct FramePixels<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

pub trait DrawingContext {
    // frame

    /// Starts a frame for a `width` x `height` window; `pixel_ratio` is the
    /// framebuffer/window scale.
    fn begin_frame(&mut self, width: u32, height: u32, pixel_ratio: f32) -> Result<(), DrawingError>;
    fn end_frame(&mut self) -> Result<(), DrawingError>;
    /// Pixels of the last finished frame, for contexts that render off-screen.
    fn frame_pixels(&self) -> Option<FramePixels<'_>>;
    /// Drops every resource the context holds. Called once before the
    /// context is released.
    fn reset(&mut self);

    // state

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    /// Rotation in radians.
    fn rotate(&mut self, angle: f32);
    fn reset_transform(&mut self);
    fn global_alpha(&mut self, alpha: f32);

    // paths

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn bezier_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32);
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32);
    fn close_path(&mut self);
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32);
    fn ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32);

    fn circle(&mut self, cx: f32, cy: f32, r: f32) {
        self.ellipse(cx, cy, r, r);
    }

    // paint

    fn fill_paint(&mut self, paint: Paint);
    fn stroke_paint(&mut self, paint: Paint);
    fn stroke_width(&mut self, width: f32);
    fn line_cap(&mut self, cap: LineCap);
    fn line_join(&mut self, join: LineJoin);

    fn fill_color(&mut self, color: Color) {
        self.fill_paint(Paint::Solid(color));
    }

    fn stroke_color(&mut self, color: Color) {
        self.stroke_paint(Paint::Solid(color));
    }

    fn fill(&mut self) -> Result<(), DrawingError>;
    fn stroke(&mut self) -> Result<(), DrawingError>;

    // text

    /// Loads the font at `path` and registers it under the face `name`.
    fn create_font(&mut self, name: &str, path: &Path) -> Result<FontId, AssetLoadError>;
    fn font_face(&mut self, name: &str) -> Result<(), DrawingError>;
    fn font_size(&mut self, size: f32);
    /// Draws `text` with its baseline starting at `(x, y)`, returns the x
    /// position after the last glyph.
    fn text(&mut self, x: f32, y: f32, text: &str) -> Result<f32, DrawingError>;
    /// `[xmin, ymin, xmax, ymax]` of `text` laid out as [`DrawingContext::text`] would.
    fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> Result<[f32; 4], DrawingError>;

    // images

    fn create_image(&mut self, path: &Path, flags: ImageFlags) -> Result<ImageId, AssetLoadError>;
    fn image_size(&self, image: ImageId) -> Option<(u32, u32)>;
}

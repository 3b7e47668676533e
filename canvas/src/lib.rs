//! CPU implementation of [`harness::DrawingContext`].
//!
//! Paths and paints are rasterized with `tiny-skia`, glyphs with `fontdue`
//! and images are decoded with `stb_image`. Each frame is rendered into a
//! premultiplied RGBA pixmap the size of the framebuffer, which the window
//! then presents.

mod canvas;
mod image;
mod paint;
mod path;
mod text;
mod xform;

pub use canvas::Canvas;
pub use xform::Xform;

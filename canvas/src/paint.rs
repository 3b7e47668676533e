use harness::{Color, DrawingError, Paint};
use tiny_skia::{
    FilterQuality, GradientStop, LinearGradient, Pattern, Point, RadialGradient, Shader,
    SpreadMode,
};

use crate::image::Image;
use crate::xform::Xform;

/// `color` with its alpha scaled by `alpha`, out of range channels clamped.
pub(crate) fn sk_color(color: Color, alpha: f32) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0),
        color.g.clamp(0.0, 1.0),
        color.b.clamp(0.0, 1.0),
        (color.a * alpha).clamp(0.0, 1.0),
    )
    .unwrap_or(tiny_skia::Color::BLACK)
}

/// The color text is drawn with for a given fill paint.
pub(crate) fn text_color(paint: &Paint) -> Color {
    match *paint {
        Paint::Solid(c) => c,
        Paint::LinearGradient { inner, .. } | Paint::RadialGradient { inner, .. } => inner,
        Paint::Image { alpha, .. } => Color::WHITE.with_alpha(alpha),
    }
}

fn point(v: harness::Vec2) -> Point {
    Point::from_xy(v.x, v.y)
}

/// Builds the shader for `paint`; `xform` is the transform that was current
/// when the paint was set.
pub(crate) fn shader<'a>(
    paint: &Paint,
    xform: &Xform,
    alpha: f32,
    images: &'a [Image],
) -> Result<Shader<'a>, DrawingError> {
    let shader = match *paint {
        Paint::Solid(c) => Shader::SolidColor(sk_color(c, alpha)),
        Paint::LinearGradient {
            start,
            end,
            inner,
            outer,
        } => {
            let stops = vec![
                GradientStop::new(0.0, sk_color(inner, alpha)),
                GradientStop::new(1.0, sk_color(outer, alpha)),
            ];
            LinearGradient::new(point(start), point(end), stops, SpreadMode::Pad, xform.to_transform())
                .unwrap_or(Shader::SolidColor(sk_color(inner, alpha)))
        }
        Paint::RadialGradient {
            center,
            inner_radius,
            outer_radius,
            inner,
            outer,
        } => {
            let outer_radius = outer_radius.max(f32::EPSILON);
            let t = (inner_radius / outer_radius).clamp(0.0, 1.0);
            let stops = vec![
                GradientStop::new(0.0, sk_color(inner, alpha)),
                GradientStop::new(t, sk_color(inner, alpha)),
                GradientStop::new(1.0, sk_color(outer, alpha)),
            ];
            let c = point(center);
            RadialGradient::new(c, c, outer_radius, stops, SpreadMode::Pad, xform.to_transform())
                .unwrap_or(Shader::SolidColor(sk_color(outer, alpha)))
        }
        Paint::Image {
            image,
            origin,
            size,
            angle,
            alpha: image_alpha,
        } => {
            let img = images.get(image.0).ok_or(DrawingError::UnknownImage(image))?;
            let (iw, ih) = img.size();
            let mut local = *xform;
            local.premultiply(&Xform::translate(origin.x, origin.y));
            local.premultiply(&Xform::rotate(angle));
            local.premultiply(&Xform::scale(size.x / iw as f32, size.y / ih as f32));
            let spread = if img.repeat {
                SpreadMode::Repeat
            } else {
                SpreadMode::Pad
            };
            Pattern::new(
                img.pixmap.as_ref(),
                spread,
                FilterQuality::Bilinear,
                (image_alpha * alpha).clamp(0.0, 1.0),
                local.to_transform(),
            )
        }
    };
    Ok(shader)
}

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline(always)]
    pub fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    #[inline(always)]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline(always)]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline(always)]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    #[inline(always)]
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Vec2 {
        Vec2 { x, y }
    }
}

/// Area of the framebuffer the GL viewport covers, in framebuffer pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Viewport for a window of `width` x `height` units given the live
    /// window and framebuffer metrics.
    ///
    /// Each axis is scaled by its own framebuffer/window ratio, so on
    /// high-DPI displays the result tracks the framebuffer rather than the
    /// window size. Both input and output are clamped to at least 1.
    pub fn scaled(width: u32, height: u32, window: (u32, u32), framebuffer: (u32, u32)) -> Viewport {
        let sx = axis_scale(framebuffer.0, window.0);
        let sy = axis_scale(framebuffer.1, window.1);
        Viewport {
            width: scale_clamped(width, sx),
            height: scale_clamped(height, sy),
        }
    }
}

fn axis_scale(framebuffer: u32, window: u32) -> f32 {
    if window == 0 {
        return 1.0;
    }
    framebuffer as f32 / window as f32
}

fn scale_clamped(v: u32, scale: f32) -> u32 {
    let v = v.max(1) as f32 * scale;
    (v.round() as u32).max(1)
}

/// 2D affine transform `[a, b, c, d, e, f]` mapping
/// `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Xform(pub [f32; 6]);

impl Default for Xform {
    fn default() -> Self {
        Xform::IDENTITY
    }
}

impl Xform {
    pub const IDENTITY: Xform = Xform([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    pub fn translate(tx: f32, ty: f32) -> Xform {
        Xform([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    pub fn scale(sx: f32, sy: f32) -> Xform {
        Xform([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    pub fn rotate(angle: f32) -> Xform {
        let (sn, cs) = angle.sin_cos();
        Xform([cs, sn, -sn, cs, 0.0, 0.0])
    }

    /// `self` applied after `inner`.
    pub fn then_after(&self, inner: &Xform) -> Xform {
        let [a, b, c, d, e, f] = self.0;
        let [oa, ob, oc, od, oe, of] = inner.0;
        Xform([
            a * oa + c * ob,
            b * oa + d * ob,
            a * oc + c * od,
            b * oc + d * od,
            a * oe + c * of + e,
            b * oe + d * of + f,
        ])
    }

    /// Makes `local` act first, in the coordinate space of `self`.
    pub fn premultiply(&mut self, local: &Xform) {
        *self = self.then_after(local);
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (a * x + c * y + e, b * x + d * y + f)
    }

    pub fn average_scale(&self) -> f32 {
        let [a, b, c, d, _, _] = self.0;
        let sx = (a * a + b * b).sqrt();
        let sy = (c * c + d * d).sqrt();
        (sx + sy) * 0.5
    }

    pub fn to_transform(&self) -> tiny_skia::Transform {
        let [a, b, c, d, e, f] = self.0;
        tiny_skia::Transform::from_row(a, b, c, d, e, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4
    }

    #[test]
    fn translate_then_scale() {
        let mut xf = Xform::scale(2.0, 2.0);
        xf.premultiply(&Xform::translate(5.0, 1.0));
        // translation happens in the scaled space
        assert!(close(xf.apply(0.0, 0.0), (10.0, 2.0)));
        assert!(close(xf.apply(1.0, 1.0), (12.0, 4.0)));
    }

    #[test]
    fn rotation_quarter_turn() {
        let xf = Xform::rotate(std::f32::consts::FRAC_PI_2);
        assert!(close(xf.apply(1.0, 0.0), (0.0, 1.0)));
        assert!((xf.average_scale() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn average_scale_of_uneven_scale() {
        assert_eq!(Xform::scale(2.0, 4.0).average_scale(), 3.0);
        assert_eq!(Xform::IDENTITY.average_scale(), 1.0);
    }
}

use crate::xform::Xform;

// cubic handle length of a unit quarter circle
const KAPPA90: f32 = 0.552_284_8;

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Cmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32),
    CubicTo(f32, f32, f32, f32, f32, f32),
    Close,
}

/// Current path, points already in device space.
#[derive(Debug, Default, Clone)]
pub(crate) struct PathData {
    cmds: Vec<Cmd>,
}

impl PathData {
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[Cmd] {
        &self.cmds
    }

    pub fn move_to(&mut self, xf: &Xform, x: f32, y: f32) {
        let (x, y) = xf.apply(x, y);
        self.cmds.push(Cmd::MoveTo(x, y));
    }

    pub fn line_to(&mut self, xf: &Xform, x: f32, y: f32) {
        let (x, y) = xf.apply(x, y);
        self.cmds.push(Cmd::LineTo(x, y));
    }

    pub fn quad_to(&mut self, xf: &Xform, cx: f32, cy: f32, x: f32, y: f32) {
        let (cx, cy) = xf.apply(cx, cy);
        let (x, y) = xf.apply(x, y);
        self.cmds.push(Cmd::QuadTo(cx, cy, x, y));
    }

    pub fn cubic_to(&mut self, xf: &Xform, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        let (c1x, c1y) = xf.apply(c1x, c1y);
        let (c2x, c2y) = xf.apply(c2x, c2y);
        let (x, y) = xf.apply(x, y);
        self.cmds.push(Cmd::CubicTo(c1x, c1y, c2x, c2y, x, y));
    }

    pub fn close(&mut self) {
        self.cmds.push(Cmd::Close);
    }

    pub fn rect(&mut self, xf: &Xform, x: f32, y: f32, w: f32, h: f32) {
        self.move_to(xf, x, y);
        self.line_to(xf, x, y + h);
        self.line_to(xf, x + w, y + h);
        self.line_to(xf, x + w, y);
        self.close();
    }

    pub fn rounded_rect(&mut self, xf: &Xform, x: f32, y: f32, w: f32, h: f32, r: f32) {
        if r < 0.1 {
            self.rect(xf, x, y, w, h);
            return;
        }
        let rx = r.min(w.abs() * 0.5) * w.signum();
        let ry = r.min(h.abs() * 0.5) * h.signum();
        let k = 1.0 - KAPPA90;

        self.move_to(xf, x, y + ry);
        self.line_to(xf, x, y + h - ry);
        self.cubic_to(xf, x, y + h - ry * k, x + rx * k, y + h, x + rx, y + h);
        self.line_to(xf, x + w - rx, y + h);
        self.cubic_to(xf, x + w - rx * k, y + h, x + w, y + h - ry * k, x + w, y + h - ry);
        self.line_to(xf, x + w, y + ry);
        self.cubic_to(xf, x + w, y + ry * k, x + w - rx * k, y, x + w - rx, y);
        self.line_to(xf, x + rx, y);
        self.cubic_to(xf, x + rx * k, y, x, y + ry * k, x, y + ry);
        self.close();
    }

    pub fn ellipse(&mut self, xf: &Xform, cx: f32, cy: f32, rx: f32, ry: f32) {
        let kx = rx * KAPPA90;
        let ky = ry * KAPPA90;

        self.move_to(xf, cx - rx, cy);
        self.cubic_to(xf, cx - rx, cy + ky, cx - kx, cy + ry, cx, cy + ry);
        self.cubic_to(xf, cx + kx, cy + ry, cx + rx, cy + ky, cx + rx, cy);
        self.cubic_to(xf, cx + rx, cy - ky, cx + kx, cy - ry, cx, cy - ry);
        self.cubic_to(xf, cx - kx, cy - ry, cx - rx, cy - ky, cx - rx, cy);
        self.close();
    }

    /// `None` when the path has nothing to draw.
    pub fn to_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = tiny_skia::PathBuilder::new();
        for cmd in &self.cmds {
            match *cmd {
                Cmd::MoveTo(x, y) => pb.move_to(x, y),
                Cmd::LineTo(x, y) => pb.line_to(x, y),
                Cmd::QuadTo(cx, cy, x, y) => pb.quad_to(cx, cy, x, y),
                Cmd::CubicTo(c1x, c1y, c2x, c2y, x, y) => pb.cubic_to(c1x, c1y, c2x, c2y, x, y),
                Cmd::Close => pb.close(),
            }
        }
        pb.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_transformed_when_added() {
        let mut path = PathData::default();
        path.move_to(&Xform::translate(10.0, 0.0), 1.0, 1.0);
        path.line_to(&Xform::scale(2.0, 2.0), 1.0, 1.0);
        assert_eq!(path.commands(), &[Cmd::MoveTo(11.0, 1.0), Cmd::LineTo(2.0, 2.0)]);
    }

    #[test]
    fn small_radius_falls_back_to_rect() {
        let mut rounded = PathData::default();
        rounded.rounded_rect(&Xform::IDENTITY, 0.0, 0.0, 10.0, 10.0, 0.05);
        let mut plain = PathData::default();
        plain.rect(&Xform::IDENTITY, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(rounded.commands(), plain.commands());
    }

    #[test]
    fn rounded_rect_radius_is_clamped_to_half_size() {
        let mut path = PathData::default();
        path.rounded_rect(&Xform::IDENTITY, 0.0, 0.0, 10.0, 4.0, 50.0);
        assert_eq!(path.commands()[0], Cmd::MoveTo(0.0, 2.0));
        assert_eq!(path.commands().len(), 10);
        let bounds = path.to_path().unwrap().bounds();
        assert_eq!((bounds.width(), bounds.height()), (10.0, 4.0));
    }

    #[test]
    fn ellipse_bounds() {
        let mut path = PathData::default();
        path.ellipse(&Xform::IDENTITY, 50.0, 50.0, 20.0, 10.0);
        let bounds = path.to_path().unwrap().bounds();
        assert_eq!(bounds.left(), 30.0);
        assert_eq!(bounds.right(), 70.0);
        assert_eq!(bounds.top(), 40.0);
        assert_eq!(bounds.bottom(), 60.0);
    }

    #[test]
    fn empty_path_has_nothing_to_draw() {
        let path = PathData::default();
        assert!(path.is_empty());
        assert!(path.to_path().is_none());
    }
}

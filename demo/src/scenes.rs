//! Render callbacks for the demo binary.

use std::path::PathBuf;

use harness::{
    AssetLoadError, Color, DrawingContext, DrawingError, FrameInfo, ImageFlags, ImageId, Paint,
    Render,
};
use log::{debug, warn};

const TEXT: &str = "Hello World - vector graphics from Rust.";
const SUBMODULE_TEXT: &str = "Hello World - From submodule";

// face name, file under the asset directory
const FONTS: [(&str, &str); 4] = [
    ("light", "Roboto-Light.ttf"),
    ("regular", "Roboto-Regular.ttf"),
    ("bold", "Roboto-Bold.ttf"),
    ("sans", "Roboto-Regular.ttf"),
];
const IMAGE: &str = "image2.jpg";

/// What to do when a font or image cannot be loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssetPolicy {
    /// Log a warning and draw without it.
    Fallback,
    /// Abort start-up.
    Strict,
}

pub struct DemoScene {
    assets: PathBuf,
    policy: AssetPolicy,
    faces: Vec<&'static str>,
    image: Option<ImageId>,
}

impl DemoScene {
    pub fn new(assets: PathBuf, policy: AssetPolicy) -> DemoScene {
        DemoScene {
            assets,
            policy,
            faces: Vec::new(),
            image: None,
        }
    }

    fn tolerate(&self, err: AssetLoadError) -> Result<(), AssetLoadError> {
        match self.policy {
            AssetPolicy::Strict => Err(err),
            AssetPolicy::Fallback => {
                warn!("{}, drawing without it", err);
                Ok(())
            }
        }
    }

    /// Selects `name`, or the first face that did load. Returns false when
    /// no face is available at all.
    fn select_face(&self, vg: &mut dyn DrawingContext, name: &str) -> Result<bool, DrawingError> {
        let face = if self.faces.iter().any(|f| *f == name) {
            name
        } else {
            match self.faces.first() {
                Some(face) => *face,
                None => return Ok(false),
            }
        };
        vg.font_face(face)?;
        Ok(true)
    }

    fn label(
        &self,
        vg: &mut dyn DrawingContext,
        face: &str,
        size: f32,
        color: Color,
        (x, y): (f32, f32),
        text: &str,
    ) -> Result<(), DrawingError> {
        if !self.select_face(vg, face)? {
            return Ok(());
        }
        vg.font_size(size);
        vg.fill_color(color);
        vg.text(x, y, text)?;
        Ok(())
    }

    fn draw_shapes(&self, vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
        vg.begin_path();
        vg.rounded_rect(10.0, 10.0, 490.0, 290.0, 5.0);
        vg.fill_color(Color::rgba(1.0, 0.0, 0.0, 0.8));
        vg.fill()?;

        vg.fill_color(Color::rgba(0.0, 1.0, 0.0, 0.8));
        vg.stroke_color(Color::rgba(0.0, 0.4, 0.7, 0.9));
        vg.stroke_width(2.0);
        vg.begin_path();
        vg.move_to(100.0, 100.0);
        for i in 0..100 {
            let t = i as f32 * 0.1;
            vg.line_to(t * 5.0, 2.0 * t + t.sin() * 100.0);
        }
        vg.fill()?;
        vg.stroke()
    }

    fn draw_image(&self, vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
        let Some(image) = self.image else {
            return Ok(());
        };
        let Some((iw, ih)) = vg.image_size(image) else {
            return Err(DrawingError::UnknownImage(image));
        };
        let (x, y, w) = (520.0, 10.0, 300.0);
        let h = w * ih as f32 / iw.max(1) as f32;

        vg.begin_path();
        vg.rounded_rect(x, y, w, h, 5.0);
        vg.fill_paint(Paint::image_pattern(x, y, w, h, 0.0, image, 1.0));
        vg.fill()?;
        vg.stroke_color(Color::rgba(0.0, 0.0, 0.0, 0.5));
        vg.stroke_width(1.0);
        vg.stroke()
    }

    fn draw_cursor(&self, vg: &mut dyn DrawingContext, frame: &FrameInfo) -> Result<(), DrawingError> {
        let c = frame.cursor;
        vg.begin_path();
        vg.circle(c.x, c.y, 12.0);
        vg.fill_paint(Paint::radial_gradient(
            c.x,
            c.y,
            2.0,
            12.0,
            Color::rgba(1.0, 1.0, 1.0, 0.9),
            Color::TRANSPARENT,
        ));
        vg.fill()
    }
}

impl Render for DemoScene {
    fn load(&mut self, vg: &mut dyn DrawingContext) -> Result<(), AssetLoadError> {
        // ids from an earlier context mean nothing to this one
        self.faces.clear();
        self.image = None;
        for (name, file) in FONTS {
            match vg.create_font(name, &self.assets.join(file)) {
                Ok(_) => self.faces.push(name),
                Err(e) => self.tolerate(e)?,
            }
        }
        match vg.create_image(&self.assets.join(IMAGE), ImageFlags::default()) {
            Ok(image) => self.image = Some(image),
            Err(e) => self.tolerate(e)?,
        }
        debug!(
            "loaded faces {:?} and {} image(s) from {}",
            self.faces,
            self.image.iter().count(),
            self.assets.display()
        );
        Ok(())
    }

    fn render(&mut self, frame: &FrameInfo, vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
        self.draw_shapes(vg)?;
        self.label(vg, "light", 24.0, Color::rgba(1.0, 0.0, 1.0, 1.0), (15.0, 230.0), SUBMODULE_TEXT)?;

        self.label(vg, "bold", 24.0, Color::rgba(0.0, 0.0, 0.0, 0.9), (15.0, 30.0), TEXT)?;
        self.label(vg, "regular", 24.0, Color::WHITE, (15.0, 50.0), TEXT)?;
        self.label(vg, "light", 24.0, Color::rgba(0.0, 1.0, 0.2, 1.0), (15.0, 70.0), TEXT)?;

        self.draw_image(vg)?;
        self.draw_cursor(vg, frame)?;

        let fps = format!("{:.1} fps", frame.fps);
        let x = frame.width as f32 - 110.0;
        self.label(vg, "sans", 14.0, Color::BLACK, (x, 20.0), &fps)
    }
}

/// A thousand horizontal lines, each slightly wider than the last.
#[derive(Debug, Default)]
pub struct LinesScene {
    pub origin: (f32, f32),
}

impl Render for LinesScene {
    fn render(&mut self, _frame: &FrameInfo, vg: &mut dyn DrawingContext) -> Result<(), DrawingError> {
        let (x, mut y) = self.origin;
        vg.stroke_color(Color::BLACK);
        for i in 0..1000 {
            vg.stroke_width((i as f32 + 0.05) * 0.1);
            vg.begin_path();
            vg.move_to(x, y);
            vg.line_to(x + 1000.0, y);
            vg.stroke()?;
            y += 1.0;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use harness::recording::RecordingContext;
    use harness::Vec2;

    use super::*;

    fn frame() -> FrameInfo {
        FrameInfo {
            width: 1000,
            height: 600,
            pixel_ratio: 1.0,
            cursor: Vec2::new(40.0, 50.0),
            frame: 1,
            dt: Duration::from_millis(16),
            elapsed: Duration::from_millis(16),
            fps: 60.0,
        }
    }

    fn render_once(scene: &mut impl Render, vg: &mut RecordingContext) -> Result<(), DrawingError> {
        vg.begin_frame(1000, 600, 1.0)?;
        scene.render(&frame(), vg)?;
        vg.end_frame()
    }

    #[test]
    fn demo_draws_everything_with_assets() {
        let mut vg = RecordingContext::new();
        let mut scene = DemoScene::new(PathBuf::from("assets"), AssetPolicy::Strict);
        scene.load(&mut vg).unwrap();
        assert_eq!(vg.count("create_font"), 4);
        assert_eq!(vg.count("create_image"), 1);

        render_once(&mut scene, &mut vg).unwrap();
        assert_eq!(vg.count("rounded_rect 10 10 490 290 5"), 1);
        assert_eq!(vg.count("line_to"), 100);
        assert_eq!(vg.count("text "), 5);
        assert_eq!(vg.count("text 15 230 Hello World - From submodule"), 1);
        assert_eq!(vg.count("text 890 20 60.0 fps"), 1);
        assert_eq!(vg.count("fill_paint Image"), 1);
        assert_eq!(vg.count("ellipse 40 50 12 12"), 1);
    }

    #[test]
    fn polyline_follows_the_curve() {
        let mut vg = RecordingContext::new();
        let mut scene = DemoScene::new(PathBuf::from("assets"), AssetPolicy::Fallback);
        render_once(&mut scene, &mut vg).unwrap();

        let start = vg.calls.iter().position(|c| c == "move_to 100 100").unwrap();
        assert_eq!(vg.calls[start + 1], "line_to 0 0");
        assert_eq!(vg.calls[start + 101], "fill");
        assert_eq!(vg.calls[start + 102], "stroke");
    }

    #[test]
    fn missing_assets_fall_back() {
        let mut vg = RecordingContext::with_missing_assets();
        let mut scene = DemoScene::new(PathBuf::from("nowhere"), AssetPolicy::Fallback);
        scene.load(&mut vg).unwrap();

        render_once(&mut scene, &mut vg).unwrap();
        assert_eq!(vg.count("text "), 0);
        assert_eq!(vg.count("fill_paint Image"), 0);
        assert_eq!(vg.calls.iter().filter(|c| *c == "fill").count(), 3);
    }

    #[test]
    fn missing_assets_are_fatal_when_strict() {
        let mut vg = RecordingContext::with_missing_assets();
        let mut scene = DemoScene::new(PathBuf::from("nowhere"), AssetPolicy::Strict);
        let err = scene.load(&mut vg).unwrap_err();
        assert_eq!(err.path(), PathBuf::from("nowhere").join("Roboto-Light.ttf").as_path());
    }

    #[test]
    fn text_uses_first_loaded_face_when_one_is_missing() {
        let mut vg = RecordingContext::new();
        vg.create_font("regular", &PathBuf::from("r.ttf")).unwrap();
        let scene = DemoScene {
            assets: PathBuf::new(),
            policy: AssetPolicy::Fallback,
            faces: vec!["regular"],
            image: None,
        };
        vg.begin_frame(10, 10, 1.0).unwrap();
        scene
            .label(&mut vg, "bold", 24.0, Color::BLACK, (1.0, 2.0), "x")
            .unwrap();
        assert_eq!(vg.count("font_face regular"), 1);
        assert_eq!(vg.count("text 1 2 x"), 1);
    }

    #[test]
    fn reloading_forgets_assets_of_the_previous_context() {
        let mut scene = DemoScene::new(PathBuf::from("assets"), AssetPolicy::Fallback);
        scene.load(&mut RecordingContext::new()).unwrap();
        scene.load(&mut RecordingContext::new()).unwrap();
        assert_eq!(scene.faces.len(), 4);

        let mut vg = RecordingContext::with_missing_assets();
        scene.load(&mut vg).unwrap();
        assert!(scene.faces.is_empty());
        assert_eq!(scene.image, None);

        render_once(&mut scene, &mut vg).unwrap();
        assert_eq!(vg.count("text "), 0);
        assert_eq!(vg.count("fill_paint Image"), 0);
    }

    #[test]
    fn lines_widen() {
        let mut vg = RecordingContext::new();
        render_once(&mut LinesScene::default(), &mut vg).unwrap();
        assert_eq!(vg.count("move_to"), 1000);
        assert_eq!(vg.calls.iter().filter(|c| *c == "stroke").count(), 1000);
        assert_eq!(vg.count("stroke_width"), 1000);
        assert_eq!(vg.count("line_to 1000 999"), 1);
    }
}

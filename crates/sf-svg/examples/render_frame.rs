//! Render a couple of animated frames into an SVG surface and print the
//! resulting markup.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p sf-svg --example render_frame
//! ```

use kurbo::{Point, Rect, Size};
use sf_core::typography::{font_size_scaler_for_box, truncate_to_width};
use sf_core::{Document, FontUpdate, WidthEstimator};
use sf_svg::{FormError, Player, PointShape, SurfaceConfig, SurfaceTarget, SvgForm, SvgSurface};
use std::f64::consts::TAU;

/// A ring of dots turning around the middle of the surface.
struct Orbit {
    center: Point,
    radius: f64,
    dots: usize,
}

impl Player for Orbit {
    fn resize(&mut self, bound: Size) {
        self.center = Point::new(bound.width / 2.0, bound.height / 2.0);
        self.radius = bound.width.min(bound.height) / 3.0;
    }

    fn animate(&mut self, form: &mut SvgForm<'_>, time: f64, _: f64) -> Result<(), FormError> {
        let turn = time / 1000.0;
        form.set_stroke(false, None, None, None).set_fill("#0af");
        for i in 0..self.dots {
            let angle = turn + TAU * i as f64 / self.dots as f64;
            let p = self.center + kurbo::Vec2::from_angle(angle) * self.radius;
            form.point(p, 3.0, &PointShape::Circle)?;
        }
        form.set_stroke("#333", Some(1.5), None, None)
            .set_fill(false)
            .arc(self.center, self.radius * 1.2, turn, turn + TAU / 3.0, false)?;
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SurfaceConfig::from_json(r##"{ "background": "#fff", "width": 240, "height": 160 }"##)?;
    let mut surface = SvgSurface::new(Document::new(), SurfaceTarget::Default, &config)?;
    surface.add(Box::new(Orbit {
        center: Point::ZERO,
        radius: 0.0,
        dots: 6,
    }));

    // A caption sized to a box and cut to fit its width.
    let caption_box = Rect::new(8.0, 130.0, 232.0, 152.0);
    let size = font_size_scaler_for_box(Rect::new(0.0, 0.0, 1.0, 20.0), 0.7, true)(caption_box);
    let estimator = WidthEstimator::calibrate(|s| s.chars().count() as f64 * size * 0.55);
    let (caption, _) = truncate_to_width(
        |s| estimator.estimate(s),
        "an orbit of six dots, one arc, and a caption that is far too long",
        caption_box.width(),
        "…",
    );

    let mut form = surface.get_form();
    for frame in 0..2 {
        let time = f64::from(frame) * 16.0;
        form.play_frame(time, 16.0)?;
    }
    form.set_group_scope("caption", None);
    form.set_font_size(size, FontUpdate::default())
        .set_fill("#222")
        .set_stroke(false, None, None, None)
        .text(Point::new(caption_box.x0, caption_box.y1), &caption)?
        .log("2 frames")?;

    println!("{}", surface.to_svg_string());
    Ok(())
}

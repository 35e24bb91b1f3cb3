//! Stateless draw functions.
//!
//! Each function takes a surface and a [`DrawContext`], finds or creates the
//! element named by the context's current id inside the current group, and
//! writes its geometry, class list and inline style. [`SvgForm`](crate::SvgForm)
//! calls these after advancing its id; they can also be called directly, in
//! which case ids fall back to the surface's `p-{n}` sequence.

use crate::error::FormError;
use crate::form::DrawContext;
use crate::space::SvgSurface;
use kurbo::Point;
use sf_core::geom::{bound_radian, bounding_box, fmt_num, point_at_angle, points_string};
use sf_core::{DomNode, Namespace, NodeIndex, Style};
use std::f64::consts::PI;

/// The id the next element drawn with `ctx` gets: the context's current id,
/// or a fresh `p-{n}` from the surface's dom id sequence.
pub fn get_id(surface: &SvgSurface, ctx: &DrawContext) -> String {
    match &ctx.current_id {
        Some(id) => id.clone(),
        None => format!("p-{}", surface.dom_ids.next_id()),
    }
}

/// `pts-svgform pts-{shape}`, then the scope class and custom class if set.
pub fn class_for(ctx: &DrawContext, shape: &str) -> String {
    let mut class = format!("pts-svgform pts-{shape}");
    for extra in [ctx.scope_class.as_deref(), ctx.current_class.as_deref()]
        .into_iter()
        .flatten()
        .filter(|c| !c.is_empty())
    {
        class.push(' ');
        class.push_str(extra);
    }
    class
}

/// Write `style` as the element's inline `style` attribute.
pub fn apply_style(
    surface: &mut SvgSurface,
    elem: NodeIndex,
    style: &Style,
) -> Result<(), FormError> {
    surface
        .document_mut()
        .set_attribute(elem, "style", style.to_inline())?;
    Ok(())
}

/// Find or create the `tag` element for the context's current id and stamp
/// its class list.
fn element_for(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    tag: &str,
    shape: &str,
) -> Result<NodeIndex, FormError> {
    let id = get_id(surface, ctx);
    let parent = ctx.group.unwrap_or_else(|| surface.root());

    let existing = surface.document().get_element_by_id(&id);
    let elem = match existing {
        Some(idx) if surface.document().node(idx).and_then(DomNode::tag) == Some(tag) => idx,
        Some(idx) => {
            log::debug!("#{id} changes shape to <{tag}>");
            surface
                .document_mut()
                .replace_element(idx, tag, Namespace::Svg)?
        }
        None => surface.svg_element(parent, tag, &id)?,
    };
    surface
        .document_mut()
        .set_attribute(elem, "class", class_for(ctx, shape))?;
    Ok(elem)
}

/// Set geometry attributes, then the inline style.
fn finish<const N: usize>(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    elem: NodeIndex,
    attrs: [(&str, String); N],
) -> Result<NodeIndex, FormError> {
    surface.document_mut().set_attributes(elem, attrs)?;
    apply_style(surface, elem, &ctx.style)?;
    Ok(elem)
}

/// Fewer than two points draws nothing.
fn enough_points(points: &[Point], op: &str) -> bool {
    if points.len() < 2 {
        log::warn!("{op}: need at least 2 points, got {}", points.len());
        return false;
    }
    true
}

// ─── Shapes ──────────────────────────────────────────────────────────────

pub fn circle(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    center: Point,
    radius: f64,
) -> Result<NodeIndex, FormError> {
    let elem = element_for(surface, ctx, "circle", "circle")?;
    finish(
        surface,
        ctx,
        elem,
        [
            ("cx", fmt_num(center.x)),
            ("cy", fmt_num(center.y)),
            ("r", fmt_num(radius)),
        ],
    )
}

/// An arc path from `start` to `end` (radians, wrapped into `[0, 2π)`).
/// `cc` draws counter-clockwise.
pub fn arc(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    center: Point,
    radius: f64,
    start: f64,
    end: f64,
    cc: bool,
) -> Result<NodeIndex, FormError> {
    let (start, end) = (bound_radian(start), bound_radian(end));
    let from = point_at_angle(center, start, radius);
    let to = point_at_angle(center, end, radius);
    let large_arc = (end - start > PI) ^ cc;
    let sweep = if cc { 0 } else { 1 };

    let r = fmt_num(radius);
    let d = format!(
        "M {} {} A {r} {r} 0 {} {sweep} {} {}",
        fmt_num(from.x),
        fmt_num(from.y),
        u8::from(large_arc),
        fmt_num(to.x),
        fmt_num(to.y),
    );

    let elem = element_for(surface, ctx, "path", "arc")?;
    finish(surface, ctx, elem, [("d", d)])
}

/// An axis-aligned square centered on `center`.
pub fn square(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    center: Point,
    half: f64,
) -> Result<NodeIndex, FormError> {
    let elem = element_for(surface, ctx, "rect", "square")?;
    finish(
        surface,
        ctx,
        elem,
        [
            ("x", fmt_num(center.x - half)),
            ("y", fmt_num(center.y - half)),
            ("width", fmt_num(half * 2.0)),
            ("height", fmt_num(half * 2.0)),
        ],
    )
}

/// A `line` for two points, a `polyline` for more.
pub fn line(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    points: &[Point],
) -> Result<Option<NodeIndex>, FormError> {
    if !enough_points(points, "line") {
        return Ok(None);
    }
    if let [a, b] = points {
        let elem = element_for(surface, ctx, "line", "line")?;
        let elem = finish(
            surface,
            ctx,
            elem,
            [
                ("x1", fmt_num(a.x)),
                ("y1", fmt_num(a.y)),
                ("x2", fmt_num(b.x)),
                ("y2", fmt_num(b.y)),
            ],
        )?;
        return Ok(Some(elem));
    }
    poly(surface, ctx, points, "polyline").map(Some)
}

/// A closed `polygon`.
pub fn polygon(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    points: &[Point],
) -> Result<Option<NodeIndex>, FormError> {
    if !enough_points(points, "polygon") {
        return Ok(None);
    }
    poly(surface, ctx, points, "polygon").map(Some)
}

fn poly(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    points: &[Point],
    tag: &str,
) -> Result<NodeIndex, FormError> {
    let elem = element_for(surface, ctx, tag, "polygon")?;
    finish(surface, ctx, elem, [("points", points_string(points))])
}

/// The bounding box of all `points` as a `rect`.
pub fn rect(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    points: &[Point],
) -> Result<Option<NodeIndex>, FormError> {
    if !enough_points(points, "rect") {
        return Ok(None);
    }
    let Some(bbox) = bounding_box(points) else {
        return Ok(None);
    };
    let elem = element_for(surface, ctx, "rect", "rect")?;
    finish(
        surface,
        ctx,
        elem,
        [
            ("x", fmt_num(bbox.x0)),
            ("y", fmt_num(bbox.y0)),
            ("width", fmt_num(bbox.width())),
            ("height", fmt_num(bbox.height())),
        ],
    )
    .map(Some)
}

/// Text anchored at `at`. The element never receives pointer events and
/// carries the context's font in its inline style.
pub fn text(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    at: Point,
    content: &str,
) -> Result<NodeIndex, FormError> {
    let elem = element_for(surface, ctx, "text", "text")?;
    let mut style = ctx.style.to_inline();
    if !ctx.font.is_empty() {
        if !style.is_empty() {
            style.push(';');
        }
        style.push_str("font: ");
        style.push_str(&ctx.font);
    }

    let doc = surface.document_mut();
    doc.set_attributes(
        elem,
        [
            ("pointer-events", "none".to_string()),
            ("x", fmt_num(at.x)),
            ("y", fmt_num(at.y)),
            ("dx", "0".to_string()),
            ("dy", "0".to_string()),
            ("style", style),
        ],
    )?;
    doc.set_text(elem, content)?;
    Ok(elem)
}

// ─── Points ──────────────────────────────────────────────────────────────

/// Renders a single point marker. Implement this to add marker shapes
/// beyond [`PointShape`].
pub trait PointRenderer {
    fn render(
        &self,
        surface: &mut SvgSurface,
        ctx: &DrawContext,
        center: Point,
        radius: f64,
    ) -> Result<NodeIndex, FormError>;
}

/// The built-in point markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointShape {
    #[default]
    Square,
    Circle,
}

impl PointRenderer for PointShape {
    fn render(
        &self,
        surface: &mut SvgSurface,
        ctx: &DrawContext,
        center: Point,
        radius: f64,
    ) -> Result<NodeIndex, FormError> {
        match self {
            Self::Square => square(surface, ctx, center, radius),
            Self::Circle => circle(surface, ctx, center, radius),
        }
    }
}

pub fn point(
    surface: &mut SvgSurface,
    ctx: &DrawContext,
    center: Point,
    radius: f64,
    shape: &dyn PointRenderer,
) -> Result<NodeIndex, FormError> {
    shape.render(surface, ctx, center, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceConfig;
    use crate::space::SurfaceTarget;
    use pretty_assertions::assert_eq;
    use sf_core::{Document, IdSequence};

    fn surface() -> SvgSurface {
        SvgSurface::with_id_sequences(
            Document::new(),
            SurfaceTarget::Default,
            &SurfaceConfig::default(),
            IdSequence::new(),
            IdSequence::starting_at(40),
        )
        .unwrap()
    }

    fn ctx(id: &str) -> DrawContext {
        DrawContext {
            current_id: Some(id.to_string()),
            ..DrawContext::default()
        }
    }

    #[test]
    fn fallback_ids_come_from_the_dom_sequence() {
        let s = surface();
        let c = DrawContext::default();
        assert_eq!(get_id(&s, &c), "p-40");
        assert_eq!(get_id(&s, &c), "p-41");
        assert_eq!(get_id(&s, &ctx("g-3")), "g-3");
    }

    #[test]
    fn class_list_order() {
        let mut c = ctx("x");
        assert_eq!(class_for(&c, "circle"), "pts-svgform pts-circle");
        c.scope_class = Some("item-2".into());
        c.current_class = Some("hot".into());
        assert_eq!(class_for(&c, "circle"), "pts-svgform pts-circle item-2 hot");
    }

    #[test]
    fn square_geometry() {
        let mut s = surface();
        let e = square(&mut s, &ctx("sq"), Point::new(10.0, 10.0), 5.0).unwrap();
        let doc = s.document();
        assert_eq!(doc.node(e).unwrap().tag(), Some("rect"));
        for (name, value) in [("x", "5"), ("y", "5"), ("width", "10"), ("height", "10")] {
            assert_eq!(doc.attribute(e, name), Some(value), "{name}");
        }
    }

    #[test]
    fn half_circle_arc_path() {
        let mut s = surface();
        let e = arc(&mut s, &ctx("a"), Point::ZERO, 10.0, 0.0, PI, false).unwrap();
        assert_eq!(s.document().attribute(e, "d"), Some("M 10 0 A 10 10 0 0 1 -10 0"));
    }

    #[test]
    fn counter_clockwise_arc_flips_flags() {
        let mut s = surface();
        let e = arc(&mut s, &ctx("a"), Point::ZERO, 10.0, 0.0, PI / 2.0, true).unwrap();
        assert_eq!(s.document().attribute(e, "d"), Some("M 10 0 A 10 10 0 1 0 0 10"));
    }

    #[test]
    fn short_point_sets_are_skipped() {
        let mut s = surface();
        let one = [Point::new(1.0, 1.0)];
        assert_eq!(line(&mut s, &ctx("l"), &one).unwrap(), None);
        assert_eq!(polygon(&mut s, &ctx("p"), &[]).unwrap(), None);
        assert_eq!(rect(&mut s, &ctx("r"), &one).unwrap(), None);
        assert!(s.document().children(s.root()).is_empty());
    }

    #[test]
    fn rect_spans_every_point() {
        let mut s = surface();
        let pts = [
            Point::new(4.0, 9.0),
            Point::new(1.0, 2.0),
            Point::new(7.0, 5.0),
        ];
        let e = rect(&mut s, &ctx("r"), &pts).unwrap().unwrap();
        let doc = s.document();
        assert_eq!(doc.attribute(e, "x"), Some("1"));
        assert_eq!(doc.attribute(e, "y"), Some("2"));
        assert_eq!(doc.attribute(e, "width"), Some("6"));
        assert_eq!(doc.attribute(e, "height"), Some("7"));
    }

    #[test]
    fn text_carries_font_and_content() {
        let mut s = surface();
        let mut c = ctx("t");
        c.font = "14px/1.5 sans-serif".into();
        let e = text(&mut s, &c, Point::new(3.0, 4.0), "hi <there>").unwrap();
        let doc = s.document();
        assert_eq!(doc.attribute(e, "pointer-events"), Some("none"));
        assert_eq!(doc.attribute(e, "dx"), Some("0"));
        assert_eq!(doc.node(e).unwrap().text.as_deref(), Some("hi <there>"));
        assert_eq!(
            sf_core::css::declaration_value(doc.attribute(e, "style").unwrap(), "font"),
            Some("14px/1.5 sans-serif".to_string())
        );
    }

    #[test]
    fn text_font_survives_semicolons_in_paint() {
        let mut s = surface();
        let mut c = ctx("t");
        c.style.fill = "url(data:image/png;base64,AAAA)".into();
        c.font = "bold 12px/1.5 Inter".into();
        let e = text(&mut s, &c, Point::ZERO, "ok").unwrap();
        let style = s.document().attribute(e, "style").unwrap();
        assert!(style.starts_with("fill: url(data:image/png;base64,AAAA);"));
        assert!(style.ends_with(";font: bold 12px/1.5 Inter"));
    }

    #[test]
    fn point_shapes_delegate() {
        let mut s = surface();
        let sq = point(&mut s, &ctx("a"), Point::ZERO, 5.0, &PointShape::Square).unwrap();
        let ci = point(&mut s, &ctx("b"), Point::ZERO, 5.0, &PointShape::Circle).unwrap();
        assert_eq!(s.document().node(sq).unwrap().tag(), Some("rect"));
        assert_eq!(s.document().node(ci).unwrap().tag(), Some("circle"));
        assert_eq!(s.document().attribute(ci, "r"), Some("5"));
    }
}

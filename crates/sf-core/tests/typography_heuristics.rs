//! Integration tests: typography heuristics and inline styles (sf-core).

use kurbo::Rect;
use pretty_assertions::assert_eq;
use sf_core::css::parse_declarations;
use sf_core::typography::{
    font_size_scaler_for_box, font_size_scaler_for_threshold, truncate_to_width, wrap_to_width,
};
use sf_core::{Clamp, Style, StyleKey, StyleValue, WidthEstimator};

/// A proportional-ish measurer standing in for a real font.
fn sans(s: &str) -> f64 {
    s.chars()
        .map(|c| match c {
            'M' | 'W' => 11.0,
            'i' | 'l' | '.' | ',' => 3.0,
            ' ' => 4.0,
            c if c.is_uppercase() => 9.0,
            _ => 7.0,
        })
        .sum()
}

const SAMPLES: [&str; 5] = [
    "",
    "Hello, World.",
    "illusion",
    "MMMMMM",
    "ünïcödé ✓",
];

// ─── Estimation ─────────────────────────────────────────────────────────

#[test]
fn estimate_is_length_times_weighted_average() {
    let est = WidthEstimator::calibrate(sans);
    let avg = 0.06 * sans("M") + 0.8 * sans("n") + 0.14 * sans(".");
    for s in SAMPLES {
        let expected = s.chars().count() as f64 * avg;
        assert!(
            (est.estimate(s) - expected).abs() < 1e-9,
            "estimate for {s:?}"
        );
    }
}

#[test]
fn estimator_doubles_as_a_measurer() {
    let est = WidthEstimator::calibrate(sans);
    let (cut, kept) = truncate_to_width(|s| est.estimate(s), "a fairly long caption", 60.0, "…");
    assert!(cut.ends_with('…'));
    assert!(kept < "a fairly long caption".chars().count());
}

// ─── Truncation ─────────────────────────────────────────────────────────

#[test]
fn truncate_is_identity_when_text_fits() {
    for s in SAMPLES {
        let len = s.chars().count();
        assert_eq!(
            truncate_to_width(sans, s, sans(s), "..."),
            (s.to_string(), len)
        );
    }
}

#[test]
fn truncate_never_grows_the_kept_prefix() {
    for s in SAMPLES {
        for max in [0.0, 5.0, 20.0, 40.0] {
            let len = s.chars().count();
            let (out, kept) = truncate_to_width(sans, s, max, "");
            assert!(kept <= len, "{s:?} @ {max}");
            assert!(out.chars().count() <= len, "{s:?} @ {max}");
            assert!(s.starts_with(&out), "{s:?} @ {max}");
        }
    }
}

#[test]
fn wrapped_lines_fit() {
    let text = "Typography is the art and technique of arranging type";
    let lines = wrap_to_width(sans, text, 90.0);
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(sans(line) <= 90.0, "{line:?} overflows");
    }
    assert_eq!(lines.join(" "), text);
}

// ─── Scaling ────────────────────────────────────────────────────────────

#[test]
fn box_scaler_is_proportional() {
    let scale = font_size_scaler_for_box(Rect::new(0.0, 0.0, 200.0, 30.0), 0.6, true);
    assert!((scale(Rect::new(0.0, 0.0, 200.0, 30.0)) - 18.0).abs() < 1e-12);
    assert!((scale(Rect::new(10.0, 10.0, 50.0, 70.0)) - 36.0).abs() < 1e-12);
}

#[test]
fn threshold_scaler_directions() {
    let values = [10.0, 50.0, 100.0, 400.0];
    let free = font_size_scaler_for_threshold(100.0, Clamp::Free);
    let shrink = font_size_scaler_for_threshold(100.0, Clamp::ShrinkOnly);
    let grow = font_size_scaler_for_threshold(100.0, Clamp::GrowOnly);
    for v in values {
        assert!(shrink(16.0, v) <= 16.0);
        assert!(grow(16.0, v) >= 16.0);
        assert_eq!(free(16.0, v), 16.0 * v / 100.0);
    }
}

// ─── Inline styles ──────────────────────────────────────────────────────

#[test]
fn unfilled_style_keeps_stroke_only() {
    let mut style = Style::default();
    style.set(StyleKey::Filled, StyleValue::Flag(false)).unwrap();
    style.set_by_name("fill", "#f00".into()).unwrap();
    style.set_by_name("stroke", "#000".into()).unwrap();

    let inline = style.to_inline();
    let decls = parse_declarations(&inline).unwrap();
    let fill: Vec<_> = decls.iter().filter(|d| d.name == "fill").collect();
    assert_eq!(fill.len(), 1);
    assert_eq!(fill[0].value, "none");
    assert!(!inline.contains("#f00"));
    assert!(decls.iter().any(|d| d.name == "stroke" && d.value == "#000"));
}

#[test]
fn parser_reads_back_every_serialized_key() {
    let style = Style {
        stroke_width: 2.5,
        ..Style::default()
    };
    let decls = parse_declarations(&style.to_inline()).unwrap();
    let names: Vec<_> = decls.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["fill", "stroke", "stroke-width", "stroke-linejoin", "stroke-linecap"]
    );
    assert_eq!(decls[2].value, "2.5");
}

//! Typography heuristics: cheap text-width estimation, truncation, wrapping,
//! and font-size scaling.
//!
//! Everything here is pure. Functions that need real text widths take a
//! `measure` callback (`&str -> width`) which must be deterministic; the
//! estimator calls it a handful of times up front so that later estimates
//! are O(1).

use kurbo::Rect;

/// Calibration strings: a wide glyph, a typical lowercase glyph, punctuation.
pub const DEFAULT_SAMPLES: [&str; 3] = ["M", "n", "."];

/// How often each sample class shows up in ordinary text.
pub const DEFAULT_DISTRIBUTION: [f64; 3] = [0.06, 0.8, 0.14];

// ─── Width estimation ────────────────────────────────────────────────────

/// A calibrated average glyph width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthEstimator {
    avg: f64,
}

impl WidthEstimator {
    /// Calibrate with [`DEFAULT_SAMPLES`] and [`DEFAULT_DISTRIBUTION`].
    pub fn calibrate(measure: impl Fn(&str) -> f64) -> Self {
        Self::calibrate_with(measure, &DEFAULT_SAMPLES, &DEFAULT_DISTRIBUTION)
    }

    /// Measure each sample once and weight the widths by `distribution`.
    ///
    /// `samples` and `distribution` must have the same length.
    pub fn calibrate_with(
        measure: impl Fn(&str) -> f64,
        samples: &[&str],
        distribution: &[f64],
    ) -> Self {
        debug_assert_eq!(
            samples.len(),
            distribution.len(),
            "one weight per calibration sample"
        );
        let avg = samples
            .iter()
            .zip(distribution)
            .map(|(s, w)| measure(*s) * w)
            .sum();
        Self { avg }
    }

    pub fn from_average(avg: f64) -> Self {
        Self { avg }
    }

    pub fn average_width(&self) -> f64 {
        self.avg
    }

    /// Estimated width of `text`: character count times the average width.
    pub fn estimate(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.avg
    }
}

// ─── Truncation & wrapping ───────────────────────────────────────────────

/// Shorten `text` so it fits `max_width`, appending `tail` when cut.
///
/// Returns the new string and the number of characters kept from `text`.
/// Widths are assumed proportional to character count. Text whose measured
/// width is zero, negative or not finite counts as already fitting.
pub fn truncate_to_width(
    measure: impl Fn(&str) -> f64,
    text: &str,
    max_width: f64,
    tail: &str,
) -> (String, usize) {
    let len = text.chars().count();
    let width = measure(text);
    if !(width.is_finite() && width > 0.0) {
        return (text.to_string(), len);
    }

    let trim = (len as f64 * (max_width / width).min(1.0)).floor() as usize;
    if trim < len {
        let trim = trim.saturating_sub(tail.chars().count());
        let mut out: String = text.chars().take(trim).collect();
        out.push_str(tail);
        (out, trim)
    } else {
        (text.to_string(), len)
    }
}

/// Greedy word wrap: pack whitespace-separated words into lines no wider
/// than `max_width`. A word that cannot fit a line on its own is truncated.
pub fn wrap_to_width(measure: impl Fn(&str) -> f64, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if measure(word) <= max_width {
            current = word.to_string();
        } else {
            let (cut, kept) = truncate_to_width(&measure, word, max_width, "");
            if kept > 0 {
                lines.push(cut);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ─── Font scaling ────────────────────────────────────────────────────────

/// Build a font-size function that follows a box's height (or width).
///
/// The returned function maps a new box to `ratio * h * (new_extent / h)`,
/// where `h` is the extent of `reference`.
pub fn font_size_scaler_for_box(
    reference: Rect,
    ratio: f64,
    by_height: bool,
) -> impl Fn(Rect) -> f64 {
    let extent = move |r: Rect| if by_height { r.height() } else { r.width() };
    let h = extent(reference);
    let base = ratio * h;
    move |next: Rect| {
        if h == 0.0 {
            ratio * extent(next)
        } else {
            base * (extent(next) / h)
        }
    }
}

/// Clamping applied by [`font_size_scaler_for_threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clamp {
    /// Scale freely in both directions.
    #[default]
    Free,
    /// Never exceed the default size.
    ShrinkOnly,
    /// Never go below the default size.
    GrowOnly,
}

impl Clamp {
    /// Map a signed direction: negative shrinks only, positive grows only.
    pub fn from_direction(direction: f64) -> Self {
        if direction < 0.0 {
            Self::ShrinkOnly
        } else if direction > 0.0 {
            Self::GrowOnly
        } else {
            Self::Free
        }
    }
}

/// Build a font-size function scaling `default_size` by `value / threshold`.
pub fn font_size_scaler_for_threshold(threshold: f64, clamp: Clamp) -> impl Fn(f64, f64) -> f64 {
    move |default_size: f64, value: f64| {
        let d = default_size * value / threshold;
        match clamp {
            Clamp::Free => d,
            Clamp::ShrinkOnly => d.min(default_size),
            Clamp::GrowOnly => d.max(default_size),
        }
    }
}

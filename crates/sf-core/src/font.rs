use crate::geom::fmt_num;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A font description that derives a CSS `font` shorthand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub size: f64,
    pub family: String,
    /// CSS weight keyword or number, empty for the inherited weight.
    pub weight: String,
    /// CSS font style (`italic`, `oblique`), empty for normal.
    pub style: String,
    pub line_height: f64,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
            weight: String::new(),
            style: String::new(),
            line_height: 1.5,
        }
    }

    /// The shorthand `"{style} {weight} {size}px/{line_height} {family}"`,
    /// with empty parts left out.
    pub fn value(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if !self.style.is_empty() {
            parts.push(self.style.clone());
        }
        if !self.weight.is_empty() {
            parts.push(self.weight.clone());
        }
        parts.push(format!(
            "{}px/{}",
            fmt_num(self.size),
            fmt_num(self.line_height)
        ));
        parts.push(self.family.clone());
        parts.join(" ")
    }

    /// Overwrite the size and whichever optional fields `update` carries.
    pub fn apply(&mut self, size: f64, update: FontUpdate) {
        self.size = size;
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(style) = update.style {
            self.style = style;
        }
        if let Some(line_height) = update.line_height {
            self.line_height = line_height;
        }
        if let Some(family) = update.family {
            self.family = family;
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(14.0, "sans-serif")
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

/// Optional font fields for a selective update; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontUpdate {
    pub weight: Option<String>,
    pub style: Option<String>,
    pub line_height: Option<f64>,
    pub family: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_value_omits_empty_parts() {
        assert_eq!(Font::default().value(), "14px/1.5 sans-serif");
    }

    #[test]
    fn full_shorthand() {
        let font = Font {
            weight: "bold".into(),
            style: "italic".into(),
            line_height: 1.2,
            ..Font::new(12.0, "Inter")
        };
        assert_eq!(font.to_string(), "italic bold 12px/1.2 Inter");
    }

    #[test]
    fn apply_only_overwrites_given_fields() {
        let mut font = Font::new(11.0, "serif");
        font.apply(
            18.0,
            FontUpdate {
                weight: Some("600".into()),
                ..FontUpdate::default()
            },
        );
        assert_eq!(font.size, 18.0);
        assert_eq!(font.weight, "600");
        assert_eq!(font.family, "serif");
        assert_eq!(font.line_height, 1.5);
    }
}

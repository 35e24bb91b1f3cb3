//! Drawing style record and its inline `style` serialization.
//!
//! The style is a fixed schema: seven keys, no more. Typed setters cover the
//! common path; [`Style::set_by_name`] accepts dynamic keys and rejects
//! anything outside the schema.

use crate::error::StyleError;
use crate::geom::fmt_num;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ─── Stroke enums ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeJoin {
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(StyleError::InvalidValue {
                key: StyleKey::StrokeLinejoin.as_str(),
                expected: "one of miter, round, bevel",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(StyleError::InvalidValue {
                key: StyleKey::StrokeLinecap.as_str(),
                expected: "one of butt, round, square",
            }),
        }
    }
}

// ─── Keys & values ───────────────────────────────────────────────────────

/// The closed set of style keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Filled,
    Stroked,
    Fill,
    Stroke,
    StrokeWidth,
    StrokeLinejoin,
    StrokeLinecap,
}

impl StyleKey {
    /// Every key, in serialization order.
    pub const ALL: [StyleKey; 7] = [
        Self::Filled,
        Self::Stroked,
        Self::Fill,
        Self::Stroke,
        Self::StrokeWidth,
        Self::StrokeLinejoin,
        Self::StrokeLinecap,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filled => "filled",
            Self::Stroked => "stroked",
            Self::Fill => "fill",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "stroke-width",
            Self::StrokeLinejoin => "stroke-linejoin",
            Self::StrokeLinecap => "stroke-linecap",
        }
    }

    /// `filled` and `stroked` are switches, never emitted as CSS.
    pub fn is_flag(self) -> bool {
        matches!(self, Self::Filled | Self::Stroked)
    }
}

impl FromStr for StyleKey {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StyleError::UnknownKey(s.to_string()))
    }
}

/// A value for a dynamically keyed style update.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Flag(bool),
    Text(String),
    Number(f64),
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

// ─── Style ───────────────────────────────────────────────────────────────

/// The drawing style consulted by every draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Style {
    pub filled: bool,
    pub stroked: bool,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub stroke_linejoin: StrokeJoin,
    pub stroke_linecap: StrokeCap,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            filled: true,
            stroked: true,
            fill: "#f03".into(),
            stroke: "#fff".into(),
            stroke_width: 1.0,
            stroke_linejoin: StrokeJoin::Bevel,
            stroke_linecap: StrokeCap::Square,
        }
    }
}

impl Style {
    /// Set one key. The value kind must match the key.
    pub fn set(&mut self, key: StyleKey, value: StyleValue) -> Result<(), StyleError> {
        let mismatch = |expected| StyleError::InvalidValue {
            key: key.as_str(),
            expected,
        };
        match (key, value) {
            (StyleKey::Filled, StyleValue::Flag(v)) => self.filled = v,
            (StyleKey::Stroked, StyleValue::Flag(v)) => self.stroked = v,
            (StyleKey::Filled | StyleKey::Stroked, _) => return Err(mismatch("a boolean")),
            (StyleKey::Fill, StyleValue::Text(v)) => self.fill = v,
            (StyleKey::Stroke, StyleValue::Text(v)) => self.stroke = v,
            (StyleKey::Fill | StyleKey::Stroke, _) => return Err(mismatch("a color string")),
            (StyleKey::StrokeWidth, StyleValue::Number(v)) => self.stroke_width = v,
            (StyleKey::StrokeWidth, _) => return Err(mismatch("a number")),
            (StyleKey::StrokeLinejoin, StyleValue::Text(v)) => self.stroke_linejoin = v.parse()?,
            (StyleKey::StrokeLinecap, StyleValue::Text(v)) => self.stroke_linecap = v.parse()?,
            (StyleKey::StrokeLinejoin | StyleKey::StrokeLinecap, _) => {
                return Err(mismatch("a keyword string"));
            }
        }
        Ok(())
    }

    /// Set a key given by name; unknown names fail with [`StyleError::UnknownKey`].
    pub fn set_by_name(&mut self, key: &str, value: StyleValue) -> Result<(), StyleError> {
        self.set(key.parse()?, value)
    }

    pub fn get(&self, key: StyleKey) -> StyleValue {
        match key {
            StyleKey::Filled => StyleValue::Flag(self.filled),
            StyleKey::Stroked => StyleValue::Flag(self.stroked),
            StyleKey::Fill => StyleValue::Text(self.fill.clone()),
            StyleKey::Stroke => StyleValue::Text(self.stroke.clone()),
            StyleKey::StrokeWidth => StyleValue::Number(self.stroke_width),
            StyleKey::StrokeLinejoin => StyleValue::Text(self.stroke_linejoin.as_css().into()),
            StyleKey::StrokeLinecap => StyleValue::Text(self.stroke_linecap.as_css().into()),
        }
    }

    /// CSS text of a non-flag key, `None` when the value is empty or zero.
    fn css_value(&self, key: StyleKey) -> Option<String> {
        match self.get(key) {
            StyleValue::Flag(_) => None,
            StyleValue::Text(t) if t.is_empty() => None,
            StyleValue::Text(t) => Some(t),
            StyleValue::Number(n) if n == 0.0 || n.is_nan() => None,
            StyleValue::Number(n) => Some(fmt_num(n)),
        }
    }

    /// Serialize into a single inline `style` attribute value.
    ///
    /// Disabled fill or stroke is forced to `none`, and the matching
    /// `fill*` / `stroke*` keys are left out.
    pub fn to_inline(&self) -> String {
        let mut decls: Vec<String> = Vec::with_capacity(StyleKey::ALL.len());
        if !self.filled {
            decls.push("fill: none".into());
        }
        if !self.stroked {
            decls.push("stroke: none".into());
        }
        for key in StyleKey::ALL {
            if key.is_flag() {
                continue;
            }
            let name = key.as_str();
            if (!self.filled && name.starts_with("fill"))
                || (!self.stroked && name.starts_with("stroke"))
            {
                continue;
            }
            if let Some(value) = self.css_value(key) {
                decls.push(format!("{name}: {value}"));
            }
        }
        decls.join(";")
    }
}

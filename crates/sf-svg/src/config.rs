//! Surface configuration.

use crate::error::ConfigError;
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Configuration for [`SvgSurface::new`](crate::SvgSurface::new).
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface id used when no target element is given. Derived element ids
    /// are `{id}_container` and `{id}_svg`. Default: **`pts`**.
    pub id: String,

    /// Background color written onto the container at construction.
    /// Default: none (the container style is left alone).
    pub background: Option<String>,

    /// Initial width; together with `height` triggers one resize on
    /// construction.
    pub width: Option<f64>,

    pub height: Option<f64>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            id: "pts".into(),
            background: None,
            width: None,
            height: None,
        }
    }
}

impl SurfaceConfig {
    /// Parse a JSON config.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] when the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The initial bound, when both dimensions are configured.
    pub fn initial_bound(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SurfaceConfig::from_json("{}").unwrap(), SurfaceConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let cfg = SurfaceConfig::from_json(r#"{ "width": 320, "height": 200 }"#).unwrap();
        assert_eq!(cfg.id, "pts");
        assert_eq!(cfg.initial_bound(), Some(Size::new(320.0, 200.0)));
    }

    #[test]
    fn one_dimension_is_not_a_bound() {
        let cfg = SurfaceConfig {
            width: Some(10.0),
            ..SurfaceConfig::default()
        };
        assert_eq!(cfg.initial_bound(), None);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(SurfaceConfig::from_json(r#"{ "width": "wide" }"#).is_err());
    }
}

pub mod css;
pub mod dom;
pub mod error;
pub mod font;
pub mod geom;
pub mod id;
pub mod style;
pub mod typography;

pub use dom::{Document, DomNode, Namespace, NodeKind, SVG_NS};
pub use error::{DomError, StyleError};
pub use font::{Font, FontUpdate};
pub use id::{ElementId, IdSequence};
pub use style::{StrokeCap, StrokeJoin, Style, StyleKey, StyleValue};
pub use typography::{Clamp, WidthEstimator};

// Re-export petgraph types so downstream crates don't need a direct dependency
pub use petgraph::graph::NodeIndex;

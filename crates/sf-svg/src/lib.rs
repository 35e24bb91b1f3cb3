pub mod config;
pub mod draw;
pub mod error;
pub mod form;
pub mod markup;
pub mod player;
pub mod space;

pub use config::SurfaceConfig;
pub use draw::{PointRenderer, PointShape};
pub use error::{ConfigError, FormError, SurfaceError};
pub use form::{DrawContext, SvgForm, Toggle};
pub use markup::to_markup;
pub use player::{AnimateId, Player};
pub use space::{SurfaceTarget, SvgSurface};

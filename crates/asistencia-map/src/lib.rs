//! Keeps a map render surface in step with the ranked provider list.
//!
//! The [`MapSyncEngine`] owns the surface and every marker on it. A
//! [`DirectorySession`] owns the directory state and drives the engine.

pub mod engine;
pub mod error;
pub mod headless;
mod registry;
pub mod session;
pub mod style;
pub mod surface;

pub use engine::{EngineConfig, MapSyncEngine};
pub use error::MapError;
pub use headless::{HeadlessSurface, SurfaceOp};
pub use session::DirectorySession;
pub use style::{popup_text, MarkerStyle};
pub use surface::{CircleMarker, Intent, MarkerHandle, RenderSurface, SurfaceEvent};

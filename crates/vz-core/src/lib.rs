//! VZ (Video Zoom) — hold-to-zoom/pan control core.
//!
//! Host-agnostic state machines for keyboard-chord recognition, edge-
//! triggered shortcut routing, input smoothing, and the per-element
//! zoom/pan controller. All DOM contact goes through the [`ZoomSurface`]
//! trait; the `vz-wasm` crate provides the browser implementation.

pub mod chord;
pub mod config;
pub mod controller;
pub mod key;
pub mod registry;
pub mod router;
pub mod smooth;

pub use chord::{ChordTracker, KeyChord};
pub use config::ZoomConfig;
pub use controller::{SurfaceRect, ZoomPanController, ZoomSurface};
pub use key::KeyToken;
pub use registry::ControllerRegistry;
pub use router::ShortcutRouter;
pub use smooth::{PointSmoother, SmoothingBuffer};

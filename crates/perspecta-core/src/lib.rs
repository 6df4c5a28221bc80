//! Perspecta core: the homography drag demo without any platform code.
//!
//! A [`ShapeRegistry`] holds the rest geometry. The [`InputTracker`] turns
//! pointer events into a drag. [`Homography`] derives one transform from the
//! dragged shape and applies it to the whole scene, and the [`Compositor`]
//! paints the result into an RGB canvas. [`Session`] wires them together.

pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod homography;
pub mod layout;
pub mod raster;
pub mod registry;
pub mod session;
pub mod tracker;

pub use compositor::Compositor;
pub use config::{SceneConfig, Style};
pub use error::{Degeneracy, HomographyError};
pub use geometry::DisplayedGeometry;
pub use homography::Homography;
pub use layout::{GridLayout, fixed_layout, hue_palette, jittered_grid};
pub use registry::{Quad, Shape, ShapeRegistry, ShapeSpec};
pub use session::Session;
pub use tracker::{DragState, InputTracker, PointerEvent, PointerKind};

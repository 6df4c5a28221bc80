//! Coordinate and geometry types shared across the engine and the scene core.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//!
//! Window events arrive in logical pixels; the scene works in canvas pixels.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;

//! Paint model shared between the compositor and the presentation layer.
//!
//! Colors are straight 8-bit sRGB triples, matching the 3-channel canvas the
//! scene composites into. Conversion to GPU clear colors happens at the edge.

pub mod color;

pub use color::Color;

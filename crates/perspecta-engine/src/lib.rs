//! Perspecta engine crate.
//!
//! This crate owns the platform + GPU runtime pieces: the winit event loop, the
//! wgpu surface, input translation, and presentation of CPU-composited frames.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;

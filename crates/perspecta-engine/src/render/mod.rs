//! GPU presentation.
//!
//! Frames are composited on the CPU; the GPU only uploads the finished canvas
//! and stretches it over the window.

mod canvas;
mod ctx;

pub use canvas::{CanvasImage, CanvasRenderer};
pub use ctx::{RenderCtx, RenderTarget};

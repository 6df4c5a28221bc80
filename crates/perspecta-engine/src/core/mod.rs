//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application layer, and provides a consistent per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};

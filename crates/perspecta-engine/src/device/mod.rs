//! GPU device + surface management.
//!
//! Responsibilities:
//! - create the wgpu Instance/Adapter/Device/Queue for a window
//! - create and configure the Surface (swapchain)
//! - acquire frames and hand out an encoder + view for rendering

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;

//! Error type shared by the whole crate.

use thiserror::Error;

/// Errors surfaced by yule3d.
///
/// Most failures in a greeting card are cosmetic and get logged rather than
/// returned; the variants here cover the operations a caller can act on.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid link: {0}")]
    Url(#[from] url::ParseError),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("No suitable graphics adapter: {0}")]
    Adapter(String),

    #[error("Device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Invalid lifecycle transition from {from:?} to {to:?}")]
    Lifecycle {
        from: crate::window::LifecycleState,
        to: crate::window::LifecycleState,
    },
}

/// Result alias used by fallible yule3d operations.
pub type Result<T> = std::result::Result<T, Error>;

//! The global wgpu context shared by every renderer of the card.

pub use self::context::Context;

#[allow(clippy::module_inception)]
mod context;

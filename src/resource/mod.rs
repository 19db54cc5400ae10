//! GPU resources and the ledger accounting for them.

pub use self::dynamic_buffer::DynamicUniformBuffer;
pub use self::gpu_mesh::{GpuMesh, MeshVertex};
pub use self::ledger::{ResourceId, ResourceKind, ResourceLedger};
pub use self::render_target::{create_depth, OffscreenBuffers, RenderTarget};
pub use self::target_slot::TargetSlot;

mod dynamic_buffer;
mod gpu_mesh;
mod ledger;
mod render_target;
mod target_slot;

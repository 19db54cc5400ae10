//! Structures responsible for drawing the scene graph.

pub use self::mesh_renderer::MeshRenderer;
pub use self::point_renderer::PointRenderer;
pub use self::renderer::{RenderContext, Renderer3d};

mod mesh_renderer;
mod point_renderer;
mod renderer;

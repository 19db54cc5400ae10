//! Procedural generation of the meshes the greeting scene is made of.

pub use self::cuboid::{cuboid, unit_cuboid};
pub use self::frustum::{cone, cylinder, frustum};
pub use self::ground::{undulating_ground, GroundWaves, GROUND_SIZE, GROUND_SUBDIVISIONS};
pub use self::render_mesh::RenderMesh;
pub use self::sphere::sphere;
pub use self::star::{extruded_star, star_outline, StarSettings};
pub use self::starfield::{starfield, STARFIELD_COUNT, STARFIELD_RADII};

mod cuboid;
mod frustum;
mod ground;
mod render_mesh;
mod sphere;
mod star;
mod starfield;
pub mod utils;

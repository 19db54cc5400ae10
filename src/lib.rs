/*!
# yule3d

A New Year greeting card built around a procedural 3D tree.

The tree is made of stacked cones on a trunk, dressed with ornaments placed
ring by ring, a spiral garland of blinking bulbs and a glowing star. It stands
on a gently undulating snowy ground under a starfield, is lit by a small rig of
lights and is rendered through a bloom pass.

Around it sit the card widgets: an envelope that opens on the first tap and
starts the music, accumulating snow that can be wiped away, confetti, an
editable message stored on disk, and a shareable link carrying the greeting.

Everything but the window and the GPU passes is a plain model that can be
driven and tested without a display:

```no_run
use rand::rngs::StdRng;
use rand::SeedableRng;
use yule3d::prelude::*;

let ledger = ResourceLedger::new();
let mut rng = StdRng::seed_from_u64(2025);
let params = SceneParameters::new(420, 380, 1.0, true);

let mut mount = Mount::new(params, &mut rng, &ledger)?;
for _ in 0..60 {
    let _ = mount.frame(1.0 / 60.0)?;
}
// Or let the mount time its frames itself.
let _ = mount.tick()?;

// The frame loop is cancelled before anything is released.
let released = mount.unmount();
assert!(released > 0);
assert_eq!(ledger.total_live(), 0);
# Ok::<(), yule3d::Error>(())
```

Some controls are handled by the card window:

* `left click + drag`: orbit around the tree.
* `scroll` or pinch: zoom in / zoom out, within limits.
* `click` or `space`: toggle the spin speed.
* `right click` or `shift + click`: wipe the snow.
* `e`: open the envelope, `f`: confetti, `h`: Santa, `m`: music, `s`: share.
*/

#![allow(clippy::module_inception)]
#![allow(clippy::too_many_arguments)]

pub use glamx;

pub mod animation;
pub mod camera;
pub mod card;
pub mod color;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod light;
pub mod post_processing;
pub mod procedural;
pub mod renderer;
pub mod resource;
pub mod scene;
pub mod tree;
pub mod window;

pub use crate::error::{Error, Result};

pub mod prelude {
    pub use crate::animation::*;
    pub use crate::camera::*;
    pub use crate::card::*;
    pub use crate::color::*;
    pub use crate::config::AppConfig;
    pub use crate::context::*;
    pub use crate::event::*;
    pub use crate::light::*;
    pub use crate::post_processing::*;
    pub use crate::renderer::*;
    pub use crate::resource::*;
    pub use crate::scene::*;
    pub use crate::tree::*;
    pub use crate::window::*;
    pub use glamx::{Mat4, Quat, Vec2, Vec3, Vec4};
}

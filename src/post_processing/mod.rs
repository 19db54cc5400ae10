//! Post processing effects.

pub use self::bloom::{Bloom, BloomSettings};
pub use self::post_processing_effect::{PostProcessingContext, PostProcessingEffect};

mod bloom;
mod post_processing_effect;

/// The inputs of one mounted tree scene.
///
/// Immutable for the life of a scene: changing any of them means rebuilding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParameters {
    width: u32,
    height: u32,
    scale: f32,
    interactive: bool,
}

impl Default for SceneParameters {
    fn default() -> Self {
        SceneParameters::new(340, 320, 1.0, false)
    }
}

impl SceneParameters {
    /// Creates the parameters of a scene.
    ///
    /// Zero sizes are clamped to one pixel, and a non-positive or non-finite
    /// scale falls back to 1.
    pub fn new(width: u32, height: u32, scale: f32, interactive: bool) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("Invalid tree scale {}, using 1.0 instead.", scale);
            1.0
        };

        SceneParameters {
            width: width.max(1),
            height: height.max(1),
            scale,
            interactive,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn interactive(&self) -> bool {
        self.interactive
    }

    /// Width over height of the rendered surface.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// The same parameters for a surface of a new size.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        SceneParameters {
            width: width.max(1),
            height: height.max(1),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_inputs_are_clamped() {
        let params = SceneParameters::new(0, 0, -2.0, true);
        assert_eq!((params.width(), params.height()), (1, 1));
        assert_eq!(params.scale(), 1.0);
        assert!(params.interactive());
        assert_eq!(params.aspect(), 1.0);
    }

    #[test]
    fn test_resized_keeps_the_rest() {
        let params = SceneParameters::new(420, 380, 1.5, false).resized(800, 400);
        assert_eq!(params.aspect(), 2.0);
        assert_eq!(params.scale(), 1.5);
    }
}

use super::RenderMesh;
use glamx::Vec3;
use rand::Rng;

/// Number of stars in the default starfield.
pub const STARFIELD_COUNT: usize = 400;
/// Radial range of the shell the stars are sampled in.
pub const STARFIELD_RADII: (f32, f32) = (20.0, 60.0);

/// Samples `count` stars over a spherical shell, squashed and lifted so that
/// most of them sit above the horizon.
pub fn starfield<R: Rng + ?Sized>(count: usize, rng: &mut R) -> RenderMesh {
    let (rmin, rmax) = STARFIELD_RADII;
    let coords = (0..count)
        .map(|_| {
            let r = rng.random_range(rmin..rmax);
            let theta = rng.random_range(0.0..std::f32::consts::TAU);
            let phi = rng.random_range(0.0..std::f32::consts::PI);
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * (0.6 * phi.cos() + 0.2),
                r * phi.sin() * theta.sin(),
            )
        })
        .collect();

    RenderMesh::points(coords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_starfield_stays_in_its_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = starfield(STARFIELD_COUNT, &mut rng);

        assert!(stars.is_point_cloud());
        assert_eq!(stars.coords.len(), STARFIELD_COUNT);

        for s in &stars.coords {
            let horizontal = (s.x * s.x + s.z * s.z).sqrt();
            assert!(horizontal < STARFIELD_RADII.1);
            // The vertical squash keeps every star above -0.4 r.
            assert!(s.y > -0.4 * STARFIELD_RADII.1);
        }
    }
}

//! Soil strata and ground particles.

use rand::Rng;

/// Fraction of surface height where the ground begins.
pub const SURFACE_FRACTION: f32 = 0.65;

/// Lower boundaries of the five strata, as fractions of surface height.
/// Ordered surface to bedrock; must stay monotonically increasing so each
/// stratum occludes the one below it when drawn in order.
pub const STRATUM_FRACTIONS: [f32; 5] = [0.65, 0.75, 0.85, 0.95, 1.0];

const STRATUM_COLORS: [[u8; 4]; 5] = [
    [60, 100, 140, 77],
    [50, 80, 120, 89],
    [40, 70, 110, 102],
    [30, 60, 100, 115],
    [20, 50, 90, 128],
];

/// Surface area (px^2) per ground particle.
const AREA_PER_PARTICLE: f32 = 10_000.0;

/// One stratum. `y` is the pixel height of its lower boundary.
#[derive(Clone, Copy, Debug)]
pub struct SoilLayer {
    pub y: f32,
    pub color: [u8; 4],
}

/// A ground particle. `base_y` is the permanent rest coordinate; only the
/// displayed position oscillates around it.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f32,
    pub base_y: f32,
    pub radius: f32,
    pub color: [u8; 4],
    pub phase: f32,
}

/// Builds the five fixed strata for a surface of the given height.
pub fn strata(height: f32) -> Vec<SoilLayer> {
    STRATUM_FRACTIONS
        .iter()
        .zip(STRATUM_COLORS)
        .map(|(&fraction, color)| SoilLayer {
            y: height * fraction,
            color,
        })
        .collect()
}

/// Scatters particles through the ground band.
///
/// The count follows the surface area (one particle per 10,000 px^2),
/// positions are uniform within the band, and the color darkens with
/// depth (see [`particle_color`]).
pub fn scatter(width: f32, height: f32, rng: &mut impl Rng) -> Vec<Particle> {
    let count = (width * height / AREA_PER_PARTICLE).floor() as usize;
    let band_top = height * SURFACE_FRACTION;
    let band_height = height * (1.0 - SURFACE_FRACTION);

    (0..count)
        .map(|_| {
            let y = band_top + rng.random_range(0.0..band_height);
            Particle {
                x: rng.random_range(0.0..width),
                base_y: y,
                radius: rng.random_range(0.0..2.0) + 0.5,
                color: particle_color(y, height, rng),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            }
        })
        .collect()
}

/// Color for a particle resting at `y`: brightness decreases linearly
/// with depth through the band, alpha gets a small random jitter.
pub fn particle_color(y: f32, height: f32, rng: &mut impl Rng) -> [u8; 4] {
    let ratio = (y - height * SURFACE_FRACTION) / (height * (1.0 - SURFACE_FRACTION));
    let brightness = 150.0 - ratio * 50.0;
    let alpha = rng.random_range(0.4..0.7);
    [
        brightness as u8,
        (brightness + 30.0) as u8,
        (brightness + 60.0) as u8,
        (alpha * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn strata_are_five_with_increasing_boundaries() {
        let layers = strata(600.0);
        assert_eq!(layers.len(), 5);
        for pair in layers.windows(2) {
            assert!(pair[0].y < pair[1].y);
        }
        // The last boundary is the surface bottom.
        assert_eq!(layers[4].y, 600.0);
        assert_eq!(layers[0].y, 600.0 * SURFACE_FRACTION);
    }

    #[test]
    fn particle_count_follows_surface_area() {
        let mut rng = StdRng::seed_from_u64(7);
        let particles = scatter(1024.0, 600.0, &mut rng);
        assert_eq!(particles.len(), (1024.0 * 600.0 / 10_000.0) as usize);
    }

    #[test]
    fn particles_stay_inside_the_ground_band() {
        let mut rng = StdRng::seed_from_u64(7);
        for p in scatter(800.0, 600.0, &mut rng) {
            assert!(p.base_y >= 600.0 * SURFACE_FRACTION);
            assert!(p.base_y <= 600.0);
            assert!(p.x >= 0.0 && p.x <= 800.0);
            assert!(p.radius >= 0.5 && p.radius <= 2.5);
        }
    }

    #[test]
    fn particle_color_darkens_with_depth() {
        let mut rng = StdRng::seed_from_u64(7);
        let shallow = particle_color(600.0 * SURFACE_FRACTION, 600.0, &mut rng);
        let deep = particle_color(600.0, 600.0, &mut rng);
        assert!(shallow[0] > deep[0], "deeper particles should be darker");
        assert_eq!(shallow[0], 150);
        assert!(deep[0] <= 100);
    }

    #[test]
    fn zero_area_surface_yields_no_particles() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(scatter(0.0, 600.0, &mut rng).is_empty());
    }
}

//! Transient seismic waves.
//!
//! Waves are born probabilistically each step, travel rightward through
//! the ground, fade out, and are pruned once invisible or off-surface.
//! This is the only collection in the scene with unbounded, self-pruning
//! membership.

use rand::Rng;

/// Depth of the wave guide as a fraction of surface height.
const WAVE_DEPTH_FRACTION: f32 = 0.82;

/// Margin past the right edge before an off-surface wave is pruned.
const EXIT_MARGIN: f32 = 100.0;

/// One propagating wave. `front_x` is the leading-edge position; the
/// trail behind it is drawn as a sinusoid of `wavelength` / `amplitude`.
#[derive(Clone, Copy, Debug)]
pub struct SeismicWave {
    pub front_x: f32,
    pub y: f32,
    pub amplitude: f32,
    pub wavelength: f32,
    pub speed: f32,
    pub opacity: f32,
}

impl SeismicWave {
    /// Spawns a fresh wave at the left edge of a surface of the given
    /// height, with randomized amplitude, wavelength and speed.
    pub fn spawn(height: f32, rng: &mut impl Rng) -> Self {
        Self {
            front_x: 0.0,
            y: height * WAVE_DEPTH_FRACTION,
            amplitude: rng.random_range(15.0..25.0),
            wavelength: rng.random_range(80.0..120.0),
            speed: rng.random_range(3.0..5.0),
            opacity: 1.0,
        }
    }

    /// Advances the leading edge and decays opacity by one fixed step.
    pub fn advance(&mut self, opacity_decay: f32) {
        self.front_x += self.speed;
        self.opacity -= opacity_decay;
    }

    /// True once the wave is fully faded or has left the surface.
    pub fn expired(&self, width: f32) -> bool {
        self.opacity <= 0.0 || self.front_x > width + EXIT_MARGIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawn_starts_at_left_edge_fully_opaque() {
        let mut rng = StdRng::seed_from_u64(1);
        let wave = SeismicWave::spawn(600.0, &mut rng);
        assert_eq!(wave.front_x, 0.0);
        assert_eq!(wave.opacity, 1.0);
        assert_eq!(wave.y, 600.0 * 0.82);
        assert!(wave.amplitude >= 15.0 && wave.amplitude <= 25.0);
        assert!(wave.wavelength >= 80.0 && wave.wavelength <= 120.0);
        assert!(wave.speed >= 3.0 && wave.speed <= 5.0);
    }

    #[test]
    fn opacity_strictly_decreases_every_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wave = SeismicWave::spawn(600.0, &mut rng);
        let mut prev = wave.opacity;
        for _ in 0..100 {
            wave.advance(0.002);
            assert!(wave.opacity < prev);
            prev = wave.opacity;
        }
    }

    #[test]
    fn every_wave_expires_within_a_bounded_number_of_steps() {
        let mut rng = StdRng::seed_from_u64(9);
        // Opacity alone forces expiry after ceil(1.0 / decay) steps, no
        // matter how wide the surface is.
        let bound = (1.0_f32 / 0.002).ceil() as usize + 1;
        for _ in 0..16 {
            let mut wave = SeismicWave::spawn(600.0, &mut rng);
            let mut steps = 0;
            while !wave.expired(f32::MAX) {
                wave.advance(0.002);
                steps += 1;
                assert!(steps <= bound, "wave survived past the decay bound");
            }
        }
    }

    #[test]
    fn waves_expire_when_leaving_a_narrow_surface() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut wave = SeismicWave::spawn(600.0, &mut rng);
        // Fast-forward the front past the exit margin.
        wave.front_x = 300.0 + 100.0 + 1.0;
        assert!(wave.expired(300.0));
        assert!(!wave.expired(1000.0));
    }
}

//! Surface buildings and underground tunnels.

use glam::Vec2;
use rand::Rng;

use crate::soil::SURFACE_FRACTION;

/// Horizontal tiling slot reserved for each building.
pub const BUILDING_SLOT: f32 = 250.0;

/// Maximum random offset of a building inside its slot.
const SLOT_JITTER: f32 = 50.0;

/// A building standing on the ground surface. `sway_rate` drives an
/// independent oscillation so buildings sway asynchronously.
#[derive(Clone, Copy, Debug)]
pub struct Building {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub sway_rate: f32,
}

/// An underground tunnel cross-section. Two fixed shape variants.
#[derive(Clone, Copy, Debug)]
pub enum Tunnel {
    /// Circular bored (shield) tunnel.
    Bored { center: Vec2, radius: f32 },
    /// Rectangular cut-and-cover tunnel.
    CutAndCover { center: Vec2, width: f32, height: f32 },
}

/// Generates one building per 250 px slot of surface width.
///
/// Each building is jittered up to 50 px inside its slot; width and
/// height are randomized within fixed ranges. Regenerating produces an
/// entirely new random skyline.
pub fn buildings(width: f32, height: f32, rng: &mut impl Rng) -> Vec<Building> {
    let surface_y = height * SURFACE_FRACTION;
    let count = (width / BUILDING_SLOT).floor() as usize;

    (0..count)
        .map(|i| {
            let x = 100.0 + i as f32 * BUILDING_SLOT + rng.random_range(0.0..SLOT_JITTER);
            let w = rng.random_range(40.0..70.0);
            let h = rng.random_range(60.0..140.0);
            Building {
                x,
                y: surface_y - h,
                width: w,
                height: h,
                sway_rate: rng.random_range(0.02..0.03),
            }
        })
        .collect()
}

/// The two fixed tunnels. Positions are relative to the surface size and
/// never randomized.
pub fn tunnels(width: f32, height: f32) -> Vec<Tunnel> {
    vec![
        Tunnel::Bored {
            center: Vec2::new(width * 0.3, height * 0.78),
            radius: 35.0,
        },
        Tunnel::CutAndCover {
            center: Vec2::new(width * 0.7, height * 0.74),
            width: 60.0,
            height: 45.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn building_count_is_one_per_slot() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(buildings(1024.0, 600.0, &mut rng).len(), 4);
        assert_eq!(buildings(2500.0, 600.0, &mut rng).len(), 10);
        assert!(buildings(200.0, 600.0, &mut rng).is_empty());
    }

    #[test]
    fn buildings_stand_on_the_surface() {
        let mut rng = StdRng::seed_from_u64(3);
        for b in buildings(1024.0, 600.0, &mut rng) {
            // Base of the building sits on the ground line.
            assert!((b.y + b.height - 600.0 * SURFACE_FRACTION).abs() < 1e-3);
            assert!(b.width >= 40.0 && b.width <= 70.0);
            assert!(b.height >= 60.0 && b.height <= 140.0);
            assert!(b.sway_rate >= 0.02 && b.sway_rate <= 0.03);
        }
    }

    #[test]
    fn buildings_stay_inside_their_slots() {
        let mut rng = StdRng::seed_from_u64(11);
        for (i, b) in buildings(2000.0, 600.0, &mut rng).iter().enumerate() {
            let slot_start = 100.0 + i as f32 * BUILDING_SLOT;
            assert!(b.x >= slot_start && b.x <= slot_start + 50.0);
        }
    }

    #[test]
    fn tunnels_are_exactly_two_fixed_shapes() {
        let list = tunnels(1000.0, 600.0);
        assert_eq!(list.len(), 2);

        match list[0] {
            Tunnel::Bored { center, radius } => {
                assert_eq!(center, Vec2::new(1000.0 * 0.3, 600.0 * 0.78));
                assert_eq!(radius, 35.0);
            }
            _ => panic!("first tunnel should be bored"),
        }
        match list[1] {
            Tunnel::CutAndCover { center, width, height } => {
                assert_eq!(center, Vec2::new(1000.0 * 0.7, 600.0 * 0.74));
                assert_eq!(width, 60.0);
                assert_eq!(height, 45.0);
            }
            _ => panic!("second tunnel should be cut-and-cover"),
        }
    }
}

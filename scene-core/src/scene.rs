//! The aggregate scene model.
//!
//! [`Scene`] owns every entity collection plus the cursor and the frame
//! counter. It is mutated from exactly two places: [`Scene::regenerate`]
//! rebuilds all generated collections for a new layout, and
//! [`Scene::step`] advances the per-frame state. Rendering only reads.

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::config::Config;
use crate::layout::Layout;
use crate::network::Network;
use crate::soil::{self, Particle, SoilLayer};
use crate::structures::{self, Building, Tunnel};
use crate::waves::SeismicWave;

/// All drawable state for one surface.
///
/// ### Fields
/// - `surface` - Size the collections were generated for; zero until the
///   first valid [`Scene::regenerate`].
/// - `soil`, `buildings`, `tunnels`, `particles` - Regenerated wholesale
///   on resize, untouched by [`Scene::step`].
/// - `waves` - Self-pruning; grows and shrinks every step.
/// - `network` - Fixed topology, stepped signal ticks and activations.
/// - `cursor` - Present only while the pointer is over the surface.
/// - `frame` - Monotonic time base for every animation phase.
#[derive(Debug, Default)]
pub struct Scene {
    pub surface: Vec2,
    pub soil: Vec<SoilLayer>,
    pub buildings: Vec<Building>,
    pub tunnels: Vec<Tunnel>,
    pub particles: Vec<Particle>,
    pub waves: Vec<SeismicWave>,
    pub network: Network,
    pub cursor: Option<Vec2>,
    pub frame: u64,
}

impl Scene {
    /// An empty scene with no surface. Harmless to step or draw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards and rebuilds every generated collection for `size`.
    ///
    /// Each generator is idempotent given the same layout and size; no
    /// incremental patching happens, so a rebuild on resize produces an
    /// entirely new random population. A degenerate size (any
    /// non-positive component) clears the scene instead of producing
    /// malformed entities.
    ///
    /// The frame counter and in-flight waves survive a rebuild: time
    /// never restarts, and waves are pruned naturally against the new
    /// width.
    pub fn regenerate(&mut self, layout: &Layout, size: Vec2, rng: &mut impl Rng) {
        if size.x <= 0.0 || size.y <= 0.0 {
            self.surface = Vec2::ZERO;
            self.soil.clear();
            self.buildings.clear();
            self.tunnels.clear();
            self.particles.clear();
            self.waves.clear();
            self.network = Network::empty();
            return;
        }

        self.surface = size;
        self.soil = soil::strata(size.y);
        self.buildings = structures::buildings(size.x, size.y, rng);
        self.tunnels = structures::tunnels(size.x, size.y);
        self.particles = soil::scatter(size.x, size.y, rng);
        self.network = Network::build(layout, rng);

        debug!(
            "scene regenerated: {}x{} scale {:.2}, {} buildings, {} particles",
            size.x,
            size.y,
            layout.scale,
            self.buildings.len(),
            self.particles.len(),
        );
    }

    /// Advances the per-frame state by one tick.
    ///
    /// This is the only place the two intentionally persistent states
    /// move: seismic waves (position and opacity) and edge signal ticks.
    /// Node activations are refreshed here as a pure function of the new
    /// time base; everything else is derived at draw time. Finally the
    /// frame counter increments.
    pub fn step(&mut self, cfg: &Config, rng: &mut impl Rng) {
        if self.surface.x > 0.0 && self.surface.y > 0.0 {
            if rng.random_bool(cfg.wave_birth_probability) {
                self.waves.push(SeismicWave::spawn(self.surface.y, rng));
            }
            for wave in &mut self.waves {
                wave.advance(cfg.wave_opacity_decay);
            }
            let width = self.surface.x;
            self.waves.retain(|wave| !wave.expired(width));

            self.network.advance_signals();
            self.network.update_activations(self.frame as f32);
        }

        self.frame += 1;
    }

    /// Frame counter as the float time base used by animation phases.
    #[inline]
    pub fn time(&self) -> f32 {
        self.frame as f32
    }

    /// Pixel height of the ground line for the current surface.
    #[inline]
    pub fn ground_y(&self) -> f32 {
        self.surface.y * soil::SURFACE_FRACTION
    }
}

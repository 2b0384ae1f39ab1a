//! Interactive viewer for the geotechnical / neural-network scene,
//! built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the scene state and
//! implements [`eframe::App`] to drive the animation loop: one render
//! pass per frame, then one scene step, then a repaint request — the
//! repaint request is the re-schedule, so pausing simply stops asking.

use std::path::Path;

use eframe::App;
use glam::Vec2;
use scene_core::{
    config::Config, debounce::ResizeDebouncer, layout::Layout, scene::Scene,
};

use crate::render::{self, FrameContext};
use crate::stats::CitationStats;

/// Main application state.
///
/// [`Viewer`] glues together:
/// - The scene core: [`Scene`], [`Layout`], [`Config`], [`ResizeDebouncer`].
/// - The animation scheduler (repaint chaining, gated on `animating`).
/// - Surface-size tracking and pointer tracking.
///
/// The typical per-frame update is:
/// 1. Handle input (pause toggle, pointer position).
/// 2. Track the surface size; a settled resize re-resolves the layout
///    and regenerates the scene wholesale.
/// 3. Render the frame, step the scene, request the next repaint.
///
/// ### Fields
/// - `scene` - All drawable state.
/// - `layout` - Resolution of the current surface size.
/// - `cfg` - Runtime tunables (debounce delay, wave parameters).
/// - `rng` - Randomness source handed to every generator.
/// - `debouncer` - Coalesces resize bursts into single rebuilds.
/// - `seen` - Last surface size observed, zero before the first frame.
/// - `animating` - Whether the repaint chain is running.
/// - `stats` - Citation numbers for the corner caption.
pub struct Viewer {
    scene: Scene,
    layout: Layout,
    cfg: Config,

    rng: rand::rngs::ThreadRng,

    debouncer: ResizeDebouncer,
    seen: Vec2,
    animating: bool,

    stats: CitationStats,
}

impl Viewer {
    /// Creates a viewer with an empty scene.
    ///
    /// The scene stays empty until the first frame reports a valid
    /// surface size; construction alone schedules nothing.
    pub fn new() -> Self {
        let cfg = Config::default();
        Self {
            scene: Scene::new(),
            layout: Layout::resolve(1024.0, 600.0),
            cfg,
            rng: rand::rng(),
            debouncer: ResizeDebouncer::new(cfg.resize_debounce),
            seen: Vec2::ZERO,
            animating: true,
            stats: CitationStats::load(Path::new("citation-stats.json")),
        }
    }

    /// Re-resolves the layout and regenerates the scene for `size`.
    fn relayout(&mut self, size: Vec2) {
        self.layout = Layout::resolve_size(size);
        self.scene.regenerate(&self.layout, size, &mut self.rng);
    }

    /// Tracks the surface size at time `now`.
    ///
    /// The first valid size rebuilds immediately; every later change is
    /// debounced so a drag-resize burst settles into exactly one
    /// rebuild, using the final dimensions.
    fn track_surface(&mut self, size: Vec2, now: f64) {
        if size != self.seen {
            if self.seen == Vec2::ZERO {
                self.relayout(size);
            } else {
                self.debouncer.observe(size, now);
            }
            self.seen = size;
        }

        if let Some(settled) = self.debouncer.poll(now) {
            self.relayout(settled);
        }
    }

    /// Whether the scene currently has a drawable surface.
    fn has_surface(&self) -> bool {
        self.scene.surface.x > 0.0 && self.scene.surface.y > 0.0
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.animating = !self.animating;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let now = ctx.input(|i| i.time);

                self.track_surface(Vec2::new(rect.width(), rect.height()), now);

                // Pointer position overwrites the cursor unconditionally;
                // leaving the surface clears it.
                self.scene.cursor = response
                    .hover_pos()
                    .map(|p| Vec2::new(p.x - rect.left(), p.y - rect.top()));

                let painter = ui.painter_at(rect);
                let frame_ctx = FrameContext {
                    layout: &self.layout,
                    scene: &self.scene,
                    stats: &self.stats,
                    origin: rect.min,
                };
                render::paint_frame(&painter, &frame_ctx);

                // Advance and chain the next frame. Without a surface
                // there is nothing to animate, so no repaint is
                // scheduled and the loop stays idle.
                if self.animating && self.has_surface() {
                    self.scene.step(&self.cfg, &mut self.rng);
                    ctx.request_repaint();
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_has_an_empty_idle_scene() {
        let viewer = Viewer::new();
        assert!(!viewer.has_surface());
        assert!(viewer.scene.soil.is_empty());
        assert!(viewer.scene.buildings.is_empty());
        assert_eq!(viewer.scene.frame, 0);
        assert!(viewer.animating);
    }

    #[test]
    fn first_valid_size_rebuilds_immediately() {
        let mut viewer = Viewer::new();
        viewer.track_surface(Vec2::new(1024.0, 600.0), 0.0);

        assert!(viewer.has_surface());
        assert_eq!(viewer.scene.surface, Vec2::new(1024.0, 600.0));
        assert_eq!(viewer.layout.scale, 1.0);
        assert_eq!(viewer.scene.soil.len(), 5);
    }

    #[test]
    fn resize_burst_settles_into_one_rebuild_with_final_size() {
        let mut viewer = Viewer::new();
        viewer.track_surface(Vec2::new(1024.0, 600.0), 0.0);
        let baseline: Vec<f32> = viewer.scene.buildings.iter().map(|b| b.x).collect();

        // Ten sizes inside one debounce window: nothing rebuilds yet.
        for i in 1..=10 {
            let size = Vec2::new(1024.0 + i as f32 * 100.0, 600.0);
            viewer.track_surface(size, i as f64 * 0.01);
            assert_eq!(viewer.scene.surface, Vec2::new(1024.0, 600.0));
        }
        assert_eq!(
            baseline,
            viewer.scene.buildings.iter().map(|b| b.x).collect::<Vec<_>>()
        );

        // After the quiet period the last size wins.
        viewer.track_surface(Vec2::new(2024.0, 600.0), 0.5);
        assert_eq!(viewer.scene.surface, Vec2::new(2024.0, 600.0));
        assert_eq!(viewer.scene.buildings.len(), 8);
    }

    #[test]
    fn degenerate_surface_leaves_the_scene_empty() {
        let mut viewer = Viewer::new();
        viewer.track_surface(Vec2::new(0.0, 0.0), 0.0);

        assert!(!viewer.has_surface());
        assert!(viewer.scene.soil.is_empty());
    }

    #[test]
    fn shrinking_back_regenerates_against_the_new_width() {
        let mut viewer = Viewer::new();
        viewer.track_surface(Vec2::new(2048.0, 1200.0), 0.0);
        assert_eq!(viewer.layout.scale, 2.0);

        viewer.track_surface(Vec2::new(1024.0, 600.0), 1.0);
        viewer.track_surface(Vec2::new(1024.0, 600.0), 1.5);
        assert_eq!(viewer.layout.scale, 1.0);
        assert_eq!(viewer.scene.surface, Vec2::new(1024.0, 600.0));
    }
}

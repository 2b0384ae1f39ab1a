//! The per-frame renderer.
//!
//! [`paint_frame`] draws the whole scene in a fixed back-to-front order;
//! later passes occlude earlier ones where they overlap. Rendering is a
//! pure read: every animated quantity is a function of the frame counter
//! and per-entity stored phase, and nothing here mutates the scene.

use egui::{Color32, CornerRadius, Mesh, Painter, Pos2, Rect, Shape, Stroke, StrokeKind};
use glam::Vec2;
use scene_core::layout::Layout;
use scene_core::network::EdgeKind;
use scene_core::scene::Scene;
use scene_core::structures::Tunnel;

use crate::panels;
use crate::stats::CitationStats;

/// Immutable inputs for one rendered frame.
///
/// Drawing routines receive everything through this context so rendering
/// has no hidden dependency on ambient state.
pub struct FrameContext<'a> {
    pub layout: &'a Layout,
    pub scene: &'a Scene,
    pub stats: &'a CitationStats,
    /// Top-left corner of the drawing surface in screen space.
    pub origin: Pos2,
}

impl FrameContext<'_> {
    /// Converts a surface-space position to screen-space.
    #[inline]
    pub fn at(&self, p: Vec2) -> Pos2 {
        Pos2::new(self.origin.x + p.x, self.origin.y + p.y)
    }

    #[inline]
    pub fn xy(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(self.origin.x + x, self.origin.y + y)
    }

    /// Frame counter as the float time base.
    #[inline]
    pub fn time(&self) -> f32 {
        self.scene.time()
    }
}

/// Draws one frame in the fixed order: background, grid, soil,
/// particles, seismic waves, tunnels, buildings, network, input panels,
/// output panels, statistics caption, cursor effect.
///
/// A scene without a valid surface draws nothing.
pub fn paint_frame(painter: &Painter, ctx: &FrameContext) {
    let size = ctx.scene.surface;
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    paint_background(painter, ctx);
    paint_grid(painter, ctx);
    paint_soil(painter, ctx);
    paint_particles(painter, ctx);
    paint_waves(painter, ctx);
    paint_tunnels(painter, ctx);
    paint_buildings(painter, ctx);
    paint_network(painter, ctx);
    panels::paint_input_quadrants(painter, ctx);
    panels::paint_output(painter, ctx);
    panels::paint_stats_caption(painter, ctx);
    paint_cursor_effect(painter, ctx);
}

fn rgba(c: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

/// Triangulates the band between a sampled top edge and a flat bottom
/// into a mesh. egui has no concave-polygon fill, so wavy-topped strata
/// are built as quad strips.
pub(crate) fn ribbon_mesh(top: &[Pos2], bottom_y: f32, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for pair in top.windows(2) {
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(pair[0], color);
        mesh.colored_vertex(pair[1], color);
        mesh.colored_vertex(Pos2::new(pair[1].x, bottom_y), color);
        mesh.colored_vertex(Pos2::new(pair[0].x, bottom_y), color);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    mesh
}

/// Vertical three-stop gradient across the whole surface.
fn paint_background(painter: &Painter, ctx: &FrameContext) {
    let size = ctx.scene.surface;
    let stops = [
        (0.0, Color32::from_rgb(10, 22, 40)),
        (0.65, Color32::from_rgb(15, 30, 50)),
        (1.0, Color32::from_rgb(5, 15, 30)),
    ];

    let mut mesh = Mesh::default();
    for pair in stops.windows(2) {
        let (top_f, top_color) = pair[0];
        let (bottom_f, bottom_color) = pair[1];
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(ctx.xy(0.0, size.y * top_f), top_color);
        mesh.colored_vertex(ctx.xy(size.x, size.y * top_f), top_color);
        mesh.colored_vertex(ctx.xy(size.x, size.y * bottom_f), bottom_color);
        mesh.colored_vertex(ctx.xy(0.0, size.y * bottom_f), bottom_color);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(Shape::mesh(mesh));
}

/// Analysis-mesh overlay over the ground band.
fn paint_grid(painter: &Painter, ctx: &FrameContext) {
    const SPACING: f32 = 50.0;
    let size = ctx.scene.surface;
    let top = ctx.scene.ground_y();
    let stroke = Stroke::new(1.0, rgba([0, 150, 255, 20]));

    let mut x = 0.0;
    while x < size.x {
        painter.line_segment([ctx.xy(x, top), ctx.xy(x, size.y)], stroke);
        x += SPACING;
    }
    let mut y = top;
    while y < size.y {
        painter.line_segment([ctx.xy(0.0, y), ctx.xy(size.x, y)], stroke);
        y += SPACING;
    }
}

/// Strata drawn top-down; each stratum's wavy upper boundary is
/// perturbed per column and the fill runs down to its own boundary,
/// occluding the stratum below.
fn paint_soil(painter: &Painter, ctx: &FrameContext) {
    const COLUMN: f32 = 20.0;
    let size = ctx.scene.surface;
    let time = ctx.time();

    for (i, layer) in ctx.scene.soil.iter().enumerate() {
        let top_y = if i == 0 {
            ctx.scene.ground_y()
        } else {
            ctx.scene.soil[i - 1].y
        };

        let mut top = Vec::new();
        let mut x = 0.0;
        while x <= size.x + COLUMN {
            let wave = ((x + time * 30.0) * 0.01).sin() * 3.0;
            top.push(ctx.xy(x, top_y + wave));
            x += COLUMN;
        }

        painter.add(Shape::mesh(ribbon_mesh(
            &top,
            ctx.origin.y + layer.y,
            rgba(layer.color),
        )));
    }
}

/// Ground particles oscillating around their rest coordinate.
fn paint_particles(painter: &Painter, ctx: &FrameContext) {
    let time = ctx.time();
    for particle in &ctx.scene.particles {
        let offset = (time * 0.05 + particle.phase).sin() * 2.0;
        painter.circle_filled(
            ctx.xy(particle.x, particle.base_y + offset),
            particle.radius,
            rgba(particle.color),
        );
    }
}

/// Seismic wave trails behind each leading edge.
fn paint_waves(painter: &Painter, ctx: &FrameContext) {
    const SAMPLE: f32 = 5.0;
    for wave in &ctx.scene.waves {
        let alpha = (wave.opacity * 0.6 * 255.0).clamp(0.0, 255.0) as u8;
        let stroke = Stroke::new(2.0, Color32::from_rgba_unmultiplied(0, 200, 255, alpha));

        let mut points = Vec::new();
        let mut x = 0.0;
        while x < wave.front_x {
            let y = wave.y
                + ((x - wave.front_x) / wave.wavelength * std::f32::consts::TAU).sin()
                    * wave.amplitude;
            points.push(ctx.xy(x, y));
            x += SAMPLE;
        }
        if points.len() >= 2 {
            painter.add(Shape::line(points, stroke));
        }
    }
}

fn paint_tunnels(painter: &Painter, ctx: &FrameContext) {
    for tunnel in &ctx.scene.tunnels {
        match *tunnel {
            Tunnel::Bored { center, radius } => {
                let c = ctx.at(center);
                painter.circle_filled(c, radius, rgba([30, 50, 80, 230]));
                painter.circle_stroke(c, radius - 5.0, Stroke::new(3.0, rgba([100, 150, 200, 204])));
                painter.circle_filled(c, radius - 8.0, rgba([20, 40, 70, 242]));

                // Lining segment joints.
                let stroke = Stroke::new(1.0, rgba([80, 130, 180, 153]));
                for i in 0..8 {
                    let angle = i as f32 / 8.0 * std::f32::consts::TAU;
                    let dir = Vec2::new(angle.cos(), angle.sin());
                    painter.line_segment(
                        [
                            ctx.at(center + dir * (radius - 8.0)),
                            ctx.at(center + dir * radius),
                        ],
                        stroke,
                    );
                }
            }
            Tunnel::CutAndCover {
                center,
                width,
                height,
            } => {
                let rect = Rect::from_center_size(ctx.at(center), egui::vec2(width, height));
                painter.rect_filled(rect, CornerRadius::ZERO, rgba([30, 50, 80, 230]));
                painter.rect_stroke(
                    rect,
                    CornerRadius::ZERO,
                    Stroke::new(4.0, rgba([100, 150, 200, 204])),
                    StrokeKind::Middle,
                );
                painter.rect_filled(rect.shrink(5.0), CornerRadius::ZERO, rgba([20, 40, 70, 242]));
            }
        }
    }
}

/// Shears a surface-space point horizontally around a pivot row.
fn shear_x(p: Vec2, pivot_y: f32, factor: f32) -> Vec2 {
    Vec2::new(p.x + factor * (p.y - pivot_y), p.y)
}

/// Buildings with their asynchronous seismic sway. The shear factor is
/// proportional to building height so tall buildings lean further at the
/// top while every base stays planted on the ground line.
fn paint_buildings(painter: &Painter, ctx: &FrameContext) {
    let time = ctx.time();

    for building in &ctx.scene.buildings {
        let sway = (time * building.sway_rate).sin() * 8.0;
        let factor = sway / building.height;
        let base_y = building.y + building.height;

        let corner = |dx: f32, dy: f32| {
            ctx.at(shear_x(
                Vec2::new(building.x + dx, building.y + dy),
                base_y,
                factor,
            ))
        };

        // Body with a left-to-right tonal gradient.
        let left = Color32::from_rgba_unmultiplied(100, 150, 200, 179);
        let right = Color32::from_rgba_unmultiplied(70, 120, 170, 179);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(corner(0.0, 0.0), left);
        mesh.colored_vertex(corner(building.width, 0.0), right);
        mesh.colored_vertex(corner(building.width, building.height), right);
        mesh.colored_vertex(corner(0.0, building.height), left);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(mesh));

        // Windows, sheared with the body.
        let window_fill = rgba([200, 230, 255, 128]);
        let rows = (building.height / 20.0).floor() as usize;
        let cols = (building.width / 15.0).floor() as usize;
        for row in 0..rows {
            for col in 0..cols {
                let wx = 5.0 + col as f32 * 15.0;
                let wy = 10.0 + row as f32 * 20.0;
                let quad = vec![
                    corner(wx, wy),
                    corner(wx + 8.0, wy),
                    corner(wx + 8.0, wy + 12.0),
                    corner(wx, wy + 12.0),
                ];
                painter.add(Shape::convex_polygon(
                    quad,
                    window_fill,
                    Stroke::NONE,
                ));
            }
        }

        // Outline.
        painter.add(Shape::closed_line(
            vec![
                corner(0.0, 0.0),
                corner(building.width, 0.0),
                corner(building.width, building.height),
                corner(0.0, building.height),
            ],
            Stroke::new(1.0, rgba([150, 200, 255, 128])),
        ));
    }
}

/// Samples the quadratic curve used for skip edges.
fn quadratic_points(from: Pos2, control: Pos2, to: Pos2, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            Pos2::new(
                u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
                u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
            )
        })
        .collect()
}

fn lerp_pos(a: Pos2, b: Pos2, t: f32) -> Pos2 {
    Pos2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
}

/// Network edges (with their traveling signal highlight) then nodes.
fn paint_network(painter: &Painter, ctx: &FrameContext) {
    let network = &ctx.scene.network;

    for edge in &network.edges {
        let from = ctx.at(network.node(edge.from).pos);
        let to = ctx.at(network.node(edge.to).pos);
        let phase = edge.signal_phase();
        let head = (phase - 0.15).max(0.0);
        let tail = (phase + 0.15).min(1.0);

        match edge.kind {
            EdgeKind::Dense => {
                painter.line_segment([from, to], Stroke::new(1.0, rgba([0, 150, 255, 31])));
                painter.line_segment(
                    [lerp_pos(from, to, head), lerp_pos(from, to, tail)],
                    Stroke::new(1.0, rgba([0, 255, 200, 255])),
                );
            }
            EdgeKind::Skip => {
                // Curved, dashed, with the highlight riding the curve.
                let control = Pos2::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0 - 30.0);
                let points = quadratic_points(from, control, to, 16);
                painter.extend(Shape::dashed_line(
                    &points,
                    Stroke::new(1.5, rgba([180, 100, 255, 26])),
                    5.0,
                    5.0,
                ));

                let start = (head * 16.0) as usize;
                let end = ((tail * 16.0).ceil() as usize).min(16);
                if end > start {
                    painter.add(Shape::line(
                        points[start..=end].to_vec(),
                        Stroke::new(1.5, rgba([255, 150, 255, 204])),
                    ));
                }
            }
        }
    }

    let last = network.layers.len().saturating_sub(1);
    for (layer_index, layer) in network.layers.iter().enumerate() {
        for node in layer {
            let p = ctx.at(node.pos);

            // Outer glow pulsing with the activation.
            let glow_alpha = (node.activation * 0.4 * 255.0) as u8;
            painter.circle_filled(
                p,
                node.radius + 6.0,
                Color32::from_rgba_unmultiplied(0, 200, 255, glow_alpha),
            );

            let fill = if layer_index == 0 {
                rgba([100, 180, 255, 242])
            } else if layer_index == last {
                rgba([50, 255, 150, 242])
            } else {
                rgba([0, 200, 255, 242])
            };
            painter.circle_filled(p, node.radius, fill);

            // Inner highlight.
            painter.circle_filled(
                Pos2::new(p.x - 3.0, p.y - 3.0),
                node.radius * 0.35,
                Color32::from_rgba_unmultiplied(255, 255, 255, 128),
            );
        }
    }
}

/// Displacement rings and arrows around the cursor, drawn only while the
/// pointer is below the ground band.
fn paint_cursor_effect(painter: &Painter, ctx: &FrameContext) {
    let Some(cursor) = ctx.scene.cursor else {
        return;
    };
    if cursor.y <= ctx.scene.ground_y() {
        return;
    }

    let center = ctx.at(cursor);
    let time = ctx.time();

    for r in [20.0_f32, 40.0, 60.0, 80.0] {
        let alpha = ((0.3 - r * 0.003) * 255.0).max(0.0) as u8;
        painter.circle_stroke(
            center,
            r,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(0, 200, 255, alpha)),
        );
    }

    let length = 30.0 + (time * 0.1).sin() * 10.0;
    let stroke = Stroke::new(2.0, rgba([0, 200, 255, 102]));
    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        let dir = Vec2::new(angle.cos(), angle.sin());
        painter.line_segment(
            [ctx.at(cursor + dir * 20.0), ctx.at(cursor + dir * length)],
            stroke,
        );
    }
}

//! Panel sub-scenes: the four input quadrants, the output accuracy
//! gauge, the analysis text feed and the flow particles tying them to
//! the network. None of these persist entities — every shape is
//! computed from the layout anchors and the frame counter at draw time.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Rect, Shape, Stroke, StrokeKind};

use crate::render::{FrameContext, ribbon_mesh};

/// Quadrant artwork is authored at this edge length and scaled to fit.
const QUADRANT_ART_SIZE: f32 = 210.0;

/// Messages cycled by the analysis feed.
const FEED_LINES: [&str; 8] = [
    "Analyzing seismic data...",
    "Processing ground response...",
    "Computing structural safety...",
    "Evaluating soil properties...",
    "Running ML prediction...",
    "Validating results...",
    "Optimizing parameters...",
    "Generating report...",
];

/// Frames for one full feed cycle across all lines.
const FEED_CYCLE: u64 = 500;

fn rgba(c: [u8; 4]) -> Color32 {
    Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3])
}

/// Deterministic pseudo-random value in `[0, 1)` from an arbitrary seed.
/// Keeps flickering speckle reproducible for a given frame.
fn hash01(seed: f32) -> f32 {
    (seed.sin() * 43758.547).fract().abs()
}

// ---------------------------------------------------------------------
// Input quadrants
// ---------------------------------------------------------------------

/// Draws the 2x2 grid of input visualizations left of the network, then
/// the particle flow feeding the input layer.
pub fn paint_input_quadrants(painter: &Painter, ctx: &FrameContext) {
    let scale = ctx.layout.scale;
    let quadrant = 100.0 * scale;
    let gap = 6.0 * scale;
    let cx = ctx.layout.anchors.input_x;
    let cy = ctx.layout.content_center_y();

    const OFFSETS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];

    for (i, (dx, dy)) in OFFSETS.iter().enumerate() {
        let qx = cx + dx * (quadrant / 2.0 + gap / 2.0);
        let qy = cy + dy * (quadrant / 2.0 + gap / 2.0);

        let rect = Rect::from_center_size(ctx.xy(qx, qy), egui::vec2(quadrant, quadrant));
        painter.rect_filled(rect, CornerRadius::ZERO, rgba([0, 50, 100, 153]));
        painter.rect_stroke(
            rect,
            CornerRadius::ZERO,
            Stroke::new(2.0, rgba([0, 191, 255, 128])),
            StrokeKind::Middle,
        );

        match i {
            0 => structural_response(painter, ctx, qx, qy, quadrant),
            1 => response_spectrum(painter, ctx, qx, qy, quadrant),
            2 => ground_profile(painter, ctx, qx, qy, quadrant),
            _ => hazard_curve(painter, ctx, qx, qy, quadrant),
        }
    }

    paint_flow(
        painter,
        ctx,
        ctx.xy(cx + quadrant + 20.0 * scale, cy),
        0,
        [0, 200, 255],
    );
}

/// Miniature building with vibration fronts on both sides.
fn structural_response(painter: &Painter, ctx: &FrameContext, x: f32, y: f32, size: f32) {
    let scale = ctx.layout.scale;
    let ss = size / QUADRANT_ART_SIZE;
    let time = ctx.time();

    let width = 60.0 * ss;
    let height = 110.0 * ss;
    let sway = (time * 0.08).sin() * 12.0 * ss;
    let pivot = y + 20.0 * ss;
    let factor = sway / height;

    let corner = |px: f32, py: f32| ctx.xy(px + factor * (py - pivot), py);

    // Building body, sheared around the pivot row.
    painter.add(Shape::convex_polygon(
        vec![
            corner(x - width / 2.0, y - height / 2.0),
            corner(x + width / 2.0, y - height / 2.0),
            corner(x + width / 2.0, y + height / 2.0),
            corner(x - width / 2.0, y + height / 2.0),
        ],
        rgba([100, 180, 255, 204]),
        Stroke::NONE,
    ));

    // Window grid, sheared with the body.
    let window_fill = rgba([200, 230, 255, 153]);
    for row in 0..7 {
        for col in 0..4 {
            let wx = x - 24.0 * ss + col as f32 * 14.0 * ss;
            let wy = y - 48.0 * ss + row as f32 * 15.0 * ss;
            painter.add(Shape::convex_polygon(
                vec![
                    corner(wx, wy),
                    corner(wx + 10.0 * ss, wy),
                    corner(wx + 10.0 * ss, wy + 11.0 * ss),
                    corner(wx, wy + 11.0 * ss),
                ],
                window_fill,
                Stroke::NONE,
            ));
        }
    }

    // Vibration fronts.
    let stroke = Stroke::new((3.0 * scale).max(1.0), rgba([0, 255, 200, 153]));
    for i in 0..6 {
        let line_y = y - 50.0 * ss + i as f32 * 20.0 * ss;
        let wave = (time * 0.1 + i as f32).sin() * 7.0 * ss;
        painter.line_segment(
            [
                ctx.xy(x - 85.0 * ss, line_y + wave),
                ctx.xy(x - 45.0 * ss, line_y - wave),
            ],
            stroke,
        );
        painter.line_segment(
            [
                ctx.xy(x + 45.0 * ss, line_y + wave),
                ctx.xy(x + 85.0 * ss, line_y - wave),
            ],
            stroke,
        );
    }
}

/// Damped-oscillation spectrum curve over fixed axes.
fn response_spectrum(painter: &Painter, ctx: &FrameContext, x: f32, y: f32, size: f32) {
    let scale = ctx.layout.scale;
    let ss = size / QUADRANT_ART_SIZE;
    let time = ctx.time();
    let axis_y = y + 5.0 * ss;

    let points: Vec<Pos2> = (0..=100)
        .map(|i| {
            let t = i as f32 / 100.0;
            let amplitude = (-t * 2.0).exp() * (t * 10.0 + time * 0.05).sin() * 60.0 * ss;
            ctx.xy(x - 75.0 * ss + t * 150.0 * ss, axis_y - amplitude)
        })
        .collect();
    painter.add(Shape::line(
        points,
        Stroke::new((2.5 * scale).max(2.0), rgba([0, 255, 200, 230])),
    ));

    let axis_stroke = Stroke::new((1.5 * scale).max(1.0), rgba([255, 255, 255, 102]));
    painter.line_segment(
        [ctx.xy(x - 78.0 * ss, axis_y), ctx.xy(x + 78.0 * ss, axis_y)],
        axis_stroke,
    );
    painter.line_segment(
        [
            ctx.xy(x - 78.0 * ss, y + 70.0 * ss),
            ctx.xy(x - 78.0 * ss, y - 70.0 * ss),
        ],
        axis_stroke,
    );
}

/// Four miniature strata with drifting boundaries and flickering specks.
fn ground_profile(painter: &Painter, ctx: &FrameContext, x: f32, y: f32, size: f32) {
    let scale = ctx.layout.scale;
    let ss = size / QUADRANT_ART_SIZE;
    let time = ctx.time();

    const STRATA: [[u8; 4]; 4] = [
        [100, 150, 200, 179],
        [80, 130, 180, 179],
        [60, 110, 160, 179],
        [40, 90, 140, 179],
    ];

    let layer_height = 42.0 * ss;
    for (i, color) in STRATA.iter().enumerate() {
        let top_y = y - 70.0 * ss + i as f32 * layer_height;

        let mut top = Vec::new();
        let mut px = 0.0;
        while px <= 170.0 * ss {
            let wave = ((px + time * 2.0 + i as f32 * 20.0) * 0.1).sin() * 5.0 * ss;
            top.push(ctx.xy(x - 85.0 * ss + px, top_y + wave));
            px += 4.0;
        }

        painter.add(Shape::mesh(ribbon_mesh(
            &top,
            ctx.origin.y + top_y + layer_height,
            rgba(*color),
        )));
    }

    // Flickering soil specks; positions are hashed from (index, frame)
    // so a repeated frame reproduces exactly.
    let speck = rgba([150, 200, 255, 128]);
    let radius = (3.0 * scale).max(1.5);
    for i in 0..25 {
        let px = x - 75.0 * ss + hash01(i as f32 * 12.9898 + time) * 150.0 * ss;
        let py = y - 60.0 * ss + hash01(i as f32 * 7.1234 + time * 1.3) * 145.0 * ss;
        painter.circle_filled(ctx.xy(px, py), radius, speck);
    }
}

/// Exceedance-probability style curve with a filled underside.
fn hazard_curve(painter: &Painter, ctx: &FrameContext, x: f32, y: f32, size: f32) {
    let scale = ctx.layout.scale;
    let ss = size / QUADRANT_ART_SIZE;
    let time = ctx.time();

    let points: Vec<Pos2> = (0..=120)
        .map(|i| {
            let t = i as f32 / 120.0;
            let cy = y - 75.0 * ss
                + t.sqrt() * 125.0 * ss
                + (time * 0.05 + t * 5.0).sin() * 5.0 * ss;
            ctx.xy(x - 85.0 * ss + t * 170.0 * ss, cy)
        })
        .collect();

    painter.add(Shape::mesh(ribbon_mesh(
        &points,
        ctx.origin.y + y + 70.0 * ss,
        rgba([0, 150, 255, 51]),
    )));
    painter.add(Shape::line(
        points,
        Stroke::new((3.5 * scale).max(2.0), rgba([100, 200, 255, 230])),
    ));

    let axis_stroke = Stroke::new((2.0 * scale).max(1.0), rgba([255, 255, 255, 102]));
    painter.line_segment(
        [
            ctx.xy(x - 88.0 * ss, y + 75.0 * ss),
            ctx.xy(x + 88.0 * ss, y + 75.0 * ss),
        ],
        axis_stroke,
    );
    painter.line_segment(
        [
            ctx.xy(x - 88.0 * ss, y + 75.0 * ss),
            ctx.xy(x - 88.0 * ss, y - 85.0 * ss),
        ],
        axis_stroke,
    );
}

// ---------------------------------------------------------------------
// Output side
// ---------------------------------------------------------------------

/// Draws the accuracy gauge, the flow from the output layer into it, and
/// (when the surface is wide enough) the analysis text feed.
pub fn paint_output(painter: &Painter, ctx: &FrameContext) {
    let scale = ctx.layout.scale;
    let time = ctx.time();
    let outer = 45.0 * scale;
    let inner = 32.0 * scale;
    let cx = ctx.layout.anchors.output_x - ctx.layout.band.section_width * 0.2;
    let cy = ctx.layout.content_center_y();
    let center = ctx.xy(cx, cy);

    // Pulsing outer ring.
    let pulse = (time * 0.05).sin() * 8.0;
    painter.circle_stroke(
        center,
        outer + pulse,
        Stroke::new(5.0, rgba([50, 255, 150, 77])),
    );

    // Accuracy arc from twelve o'clock.
    let accuracy = 0.95 + (time * 0.02).sin() * 0.03;
    let segments = 64;
    let arc: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2
                + accuracy * std::f32::consts::TAU * i as f32 / segments as f32;
            Pos2::new(
                center.x + angle.cos() * outer,
                center.y + angle.sin() * outer,
            )
        })
        .collect();
    painter.add(Shape::line(arc, Stroke::new(10.0, rgba([50, 255, 150, 230]))));

    painter.circle_filled(center, inner, rgba([0, 50, 80, 204]));

    let value_font = (30.0 * scale).clamp(24.0, 42.0);
    painter.text(
        center,
        Align2::CENTER_CENTER,
        format!("{}%", (accuracy * 100.0).round() as i32),
        FontId::proportional(value_font),
        rgba([50, 255, 150, 255]),
    );

    let label_font = (24.0 * scale).clamp(20.0, 28.0);
    painter.text(
        ctx.xy(cx, cy + outer + 20.0 * scale),
        Align2::CENTER_CENTER,
        "Accuracy",
        FontId::proportional(label_font),
        rgba([50, 255, 150, 230]),
    );

    paint_flow(
        painter,
        ctx,
        ctx.xy(cx - 40.0 * scale, cy),
        ctx.scene.network.layers.len().saturating_sub(1),
        [50, 255, 150],
    );

    // Text feed, omitted for the frame when it would clip the edge.
    let feed_x = ctx.layout.anchors.output_x + ctx.layout.band.section_width * 0.15;
    let feed_width = 140.0 * scale;
    if feed_box_fits(feed_x, feed_width, ctx.scene.surface.x) {
        paint_text_feed(painter, ctx, feed_x, cy - 80.0 * scale);
    }
}

/// Whether the feed box at `center_x` fits inside the surface width.
pub fn feed_box_fits(center_x: f32, box_width: f32, surface_width: f32) -> bool {
    center_x + box_width / 2.0 < surface_width - 10.0
}

/// Typing progress for the feed at a given frame: the index of the line
/// being typed and how many of its characters are visible.
pub fn feed_progress(frame: u64, line_len: usize) -> (usize, usize) {
    let line_time = FEED_CYCLE as f32 / FEED_LINES.len() as f32;
    let cycle_pos = (frame % FEED_CYCLE) as f32;
    let line_index = ((cycle_pos / line_time) as usize).min(FEED_LINES.len() - 1);
    let time_in_line = cycle_pos - line_index as f32 * line_time;

    // Overshoot past the line length gives a short hold on each line.
    let chars = (time_in_line / line_time * (line_len as f32 + 10.0)) as usize;
    (line_index, chars.min(line_len))
}

/// Console-style feed: finished lines dimmed, the current line typed out
/// character by character with a blinking cursor.
fn paint_text_feed(painter: &Painter, ctx: &FrameContext, center_x: f32, top_y: f32) {
    let scale = ctx.layout.scale;
    let frame = ctx.scene.frame;

    let box_width = 140.0 * scale;
    let box_height = 160.0 * scale;
    let rect = Rect::from_min_size(
        ctx.xy(center_x - box_width / 2.0, top_y),
        egui::vec2(box_width, box_height),
    );
    painter.rect_filled(rect, CornerRadius::same(10), rgba([0, 40, 70, 179]));
    painter.rect_stroke(
        rect,
        CornerRadius::same(10),
        Stroke::new(2.0, rgba([0, 191, 255, 102])),
        StrokeKind::Middle,
    );

    let font = FontId::monospace((12.0 * scale).clamp(11.0, 16.0));
    let line_height = (18.0 * scale).clamp(16.0, 22.0);
    let text_x = rect.left() + 12.0;
    let text_y = rect.top() + 14.0;

    let (current, _) = feed_progress(frame, 0);
    for (i, line) in FEED_LINES.iter().enumerate().take(current + 1) {
        let (color, text) = if i == current {
            let (_, chars) = feed_progress(frame, line.len());
            let mut text = line[..chars].to_string();
            // Blinking caret while the line is still being typed.
            if (frame / 15) % 2 == 0 && chars < line.len() {
                text.push('|');
            }
            (rgba([0, 255, 200, 255]), text)
        } else {
            (rgba([150, 200, 230, 204]), (*line).to_string())
        };

        painter.text(
            Pos2::new(text_x, text_y + i as f32 * line_height),
            Align2::LEFT_TOP,
            text,
            font.clone(),
            color,
        );
    }

    painter.text(
        Pos2::new(
            rect.right() - 10.0 * scale,
            rect.bottom() - 10.0 * scale,
        ),
        Align2::RIGHT_BOTTOM,
        "AI",
        FontId::proportional((14.0 * scale).max(9.0)),
        rgba([0, 191, 255, 230]),
    );
}

/// Particle flow between an anchor point and every node of one network
/// layer. Used input-side (into layer 0) and output-side (out of the
/// last layer).
fn paint_flow(painter: &Painter, ctx: &FrameContext, anchor: Pos2, layer: usize, tint: [u8; 3]) {
    let time = ctx.time();
    let scale = ctx.layout.scale;
    let Some(nodes) = ctx.scene.network.layers.get(layer) else {
        return;
    };

    let line_stroke = Stroke::new(1.0, rgba([tint[0], tint[1], tint[2], 38]));
    const PARTICLES: usize = 4;

    for (i, node) in nodes.iter().enumerate() {
        let node_pos = ctx.at(node.pos);

        for p in 0..PARTICLES {
            let t = (time * 0.02 + p as f32 / PARTICLES as f32 + i as f32 * 0.1).fract();
            let pos = Pos2::new(
                anchor.x + (node_pos.x - anchor.x) * t,
                anchor.y + (node_pos.y - anchor.y) * t,
            );
            let alpha = ((1.0 - t * 0.7) * 255.0) as u8;
            painter.circle_filled(
                pos,
                2.0 * scale,
                Color32::from_rgba_unmultiplied(tint[0], tint[1], tint[2], alpha),
            );
        }

        painter.line_segment([anchor, node_pos], line_stroke);
    }
}

// ---------------------------------------------------------------------
// Statistics caption
// ---------------------------------------------------------------------

/// Small citation caption in the bottom-right corner.
pub fn paint_stats_caption(painter: &Painter, ctx: &FrameContext) {
    let size = ctx.scene.surface;
    painter.text(
        ctx.xy(size.x - 12.0, size.y - 10.0),
        Align2::RIGHT_BOTTOM,
        format!(
            "{} citations / h-index {}",
            ctx.stats.citations, ctx.stats.h_index
        ),
        FontId::proportional(12.0),
        rgba([150, 200, 230, 140]),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_starts_on_the_first_line_with_nothing_typed() {
        let (line, chars) = feed_progress(0, 25);
        assert_eq!(line, 0);
        assert_eq!(chars, 0);
    }

    #[test]
    fn feed_walks_every_line_within_one_cycle() {
        let mut seen = Vec::new();
        for frame in 0..FEED_CYCLE {
            let (line, _) = feed_progress(frame, 25);
            if seen.last() != Some(&line) {
                seen.push(line);
            }
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn feed_wraps_back_to_the_first_line() {
        let (line, chars) = feed_progress(FEED_CYCLE, 25);
        assert_eq!(line, 0);
        assert_eq!(chars, 0);
    }

    #[test]
    fn typed_characters_grow_monotonically_within_a_line() {
        let mut prev = 0;
        for frame in 0..62 {
            let (line, chars) = feed_progress(frame, 25);
            assert_eq!(line, 0);
            assert!(chars >= prev);
            assert!(chars <= 25);
            prev = chars;
        }
        // The hold overshoot pins the line at full length before the
        // feed moves on.
        assert_eq!(prev, 25);
    }

    #[test]
    fn feed_box_fits_only_with_margin_to_spare() {
        assert!(feed_box_fits(800.0, 140.0, 1024.0));
        // Right edge exactly at the margin does not fit.
        assert!(!feed_box_fits(944.0, 140.0, 1024.0));
        assert!(!feed_box_fits(1200.0, 140.0, 1024.0));
    }

    #[test]
    fn speck_hash_is_deterministic_and_bounded() {
        for i in 0..100 {
            let a = hash01(i as f32 * 12.9898 + 7.0);
            let b = hash01(i as f32 * 12.9898 + 7.0);
            assert_eq!(a, b);
            assert!((0.0..1.0).contains(&a));
        }
    }
}

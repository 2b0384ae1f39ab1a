//! The layered network graph.
//!
//! Nodes live in a per-layer arena and are addressed by
//! [`NodeRef`] (layer, index) pairs; edges store index pairs, never node
//! references. The topology is a fixed constant — resizing only moves
//! geometry, it never changes layer count, node counts or edge sets.

use glam::Vec2;
use rand::Rng;

use crate::layout::Layout;
use crate::types::NodeRef;

/// Node counts per layer, input to output.
pub const LAYER_SIZES: [usize; 7] = [4, 6, 10, 12, 10, 6, 4];

/// Steps for an edge signal to travel its edge once. The phase
/// `tick / SIGNAL_PERIOD` lives in `[0, 1)` and wraps exactly.
pub const SIGNAL_PERIOD: u32 = 64;

// Geometry at the 1024x600 baseline, multiplied by the layout scale.
const NETWORK_WIDTH: f32 = 252.0;
const NODE_RADIUS: f32 = 9.0;
const LAYER_HEIGHT: f32 = 270.0;

#[derive(Clone, Copy, Debug)]
pub struct NetworkNode {
    pub pos: Vec2,
    pub radius: f32,
    pub activation: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Adjacent-layer connection, part of the dense bipartite set.
    Dense,
    /// Same-index connection two layers ahead.
    Skip,
}

/// A directed edge between two arena slots, carrying the phase of its
/// traveling signal highlight.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub from: NodeRef,
    pub to: NodeRef,
    pub kind: EdgeKind,
    pub signal_tick: u32,
}

impl Edge {
    /// Signal position along the edge in `[0, 1)`.
    pub fn signal_phase(&self) -> f32 {
        self.signal_tick as f32 / SIGNAL_PERIOD as f32
    }
}

#[derive(Clone, Debug, Default)]
pub struct Network {
    pub layers: Vec<Vec<NetworkNode>>,
    pub edges: Vec<Edge>,
}

impl Network {
    /// An empty graph, used before the first layout is known.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the fixed seven-layer topology positioned from `layout`.
    ///
    /// Node coordinates, radii and both edge sets are recomputed from
    /// scratch; nothing from a previous build survives. Initial
    /// activations and signal ticks are randomized so the animation does
    /// not start in lockstep.
    pub fn build(layout: &Layout, rng: &mut impl Rng) -> Self {
        let scale = layout.scale;
        let width = NETWORK_WIDTH * scale;
        let node_radius = NODE_RADIUS * scale;
        let layer_height = (LAYER_HEIGHT * scale).min(layout.band.height * 0.85);

        let start_x = layout.anchors.network_x - width / 2.0;
        let start_y = layout.content_center_y() - layer_height / 2.0;

        let layers: Vec<Vec<NetworkNode>> = LAYER_SIZES
            .iter()
            .enumerate()
            .map(|(l, &count)| {
                let x = start_x + width * (l as f32 / (LAYER_SIZES.len() - 1) as f32);
                let spacing = layer_height / (count as f32 + 1.0);
                (0..count)
                    .map(|i| NetworkNode {
                        pos: Vec2::new(x, start_y + spacing * (i as f32 + 1.0)),
                        radius: node_radius,
                        activation: rng.random::<f32>(),
                    })
                    .collect()
            })
            .collect();

        let mut edges = Vec::new();

        // Dense set: every node to every node of the next layer.
        for l in 0..LAYER_SIZES.len() - 1 {
            for i in 0..LAYER_SIZES[l] {
                for j in 0..LAYER_SIZES[l + 1] {
                    edges.push(Edge {
                        from: NodeRef { layer: l, index: i },
                        to: NodeRef { layer: l + 1, index: j },
                        kind: EdgeKind::Dense,
                        signal_tick: rng.random_range(0..SIGNAL_PERIOD),
                    });
                }
            }
        }

        // Sparser skip set: same index, two layers ahead.
        for l in 0..LAYER_SIZES.len() - 2 {
            for i in 0..LAYER_SIZES[l].min(LAYER_SIZES[l + 2]) {
                edges.push(Edge {
                    from: NodeRef { layer: l, index: i },
                    to: NodeRef { layer: l + 2, index: i },
                    kind: EdgeKind::Skip,
                    signal_tick: rng.random_range(0..SIGNAL_PERIOD),
                });
            }
        }

        Self { layers, edges }
    }

    /// Looks up a node by arena reference.
    ///
    /// ### Panics
    /// Panics if `node` does not address a slot in this graph.
    #[inline]
    pub fn node(&self, node: NodeRef) -> &NetworkNode {
        &self.layers[node.layer][node.index]
    }

    /// Advances every edge signal by one tick, wrapping at the period.
    pub fn advance_signals(&mut self) {
        for edge in &mut self.edges {
            edge.signal_tick = (edge.signal_tick + 1) % SIGNAL_PERIOD;
        }
    }

    /// Recomputes every node activation for the given time base.
    /// Stateless: the value depends only on time and node position.
    pub fn update_activations(&mut self, time: f32) {
        for layer in &mut self.layers {
            for node in layer.iter_mut() {
                node.activation = activation(time, node.pos);
            }
        }
    }
}

/// Activation pulse for a node at `pos`: a sinusoid of time and position,
/// mapped into `[0, 1]`.
#[inline]
pub fn activation(time: f32, pos: Vec2) -> f32 {
    0.5 + 0.5 * (time * 0.05 + pos.x * 0.1 + pos.y * 0.1).sin()
}

/// Index of a node in the network arena.
///
/// Nodes are stored per layer, so a reference is a (layer, index) pair.
/// It is only meaningful within the lifetime of a given
/// [`crate::network::Network`] instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeRef {
    pub layer: usize,
    pub index: usize,
}

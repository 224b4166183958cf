use alloc::collections::BTreeMap;

use crate::id::{NodeId, StationId};

/// Flow leaving a node, keyed by the node the cargo originates from and then
/// by the next hop it is sent to.
pub type FlowMap = BTreeMap<NodeId, BTreeMap<NodeId, u32>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub station: StationId,
    /// Cargo produced at this node per period.
    pub supply: u32,
    /// Whether this node accepts cargo.
    pub acceptance: bool,
    pub xy: (u32, u32),
    pub flows: FlowMap,
}

impl Node {
    pub fn new(station: StationId, supply: u32, acceptance: bool, xy: (u32, u32)) -> Self {
        Self {
            station,
            supply,
            acceptance,
            xy,
            flows: FlowMap::new(),
        }
    }

    /// Flow of cargo from `origin` that this node forwards to `via`.
    pub fn flow_via(&self, origin: NodeId, via: NodeId) -> u32 {
        self.flows
            .get(&origin)
            .and_then(|hops| hops.get(&via))
            .copied()
            .unwrap_or_default()
    }

    pub(crate) fn add_flow(&mut self, origin: NodeId, via: NodeId, flow: u32) {
        *self
            .flows
            .entry(origin)
            .or_default()
            .entry(via)
            .or_default() += flow;
    }
}

use alloc::vec;
use alloc::vec::Vec;
use core::iter;

use crate::error::Error;
use crate::id::{NodeId, StationId};
use crate::node::Node;
use crate::settings::LinkGraphSettings;

/// A directed link between two nodes of a component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edge {
    /// Maximum flow the link can carry.
    pub capacity: u32,
    /// Flow currently assigned to the link.
    pub flow: u32,
    pub distance: u32,
    /// Demand from the edge's source to its target, as calculated.
    pub demand: u32,
    /// Part of `demand` that has not been routed yet.
    pub unsatisfied_demand: u32,
    /// Next target in the source node's adjacency chain.
    pub next_edge: Option<NodeId>,
}

impl Edge {
    /// Share of the capacity that may be filled when at most `saturation`
    /// percent of the link is to be used.
    pub fn saturated_capacity(&self, saturation: u32) -> u32 {
        let share = u64::from(self.capacity) * u64::from(saturation) / 100;
        u32::try_from(share).unwrap_or(self.capacity)
    }
}

/// A connected part of the link graph, solved as one unit.
///
/// Edges are stored as a dense matrix so that the demand between every pair of
/// nodes has a slot. The edges that are actual links (non-zero capacity) are
/// additionally chained per source node through [`Edge::next_edge`].
#[derive(Clone, Debug, Default)]
pub struct LinkGraphComponent {
    settings: LinkGraphSettings,
    nodes: Vec<Node>,
    edges: Vec<Vec<Edge>>,
    first_edge: Vec<Option<NodeId>>,
}

impl LinkGraphComponent {
    pub fn new(settings: LinkGraphSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn settings(&self) -> &LinkGraphSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut LinkGraphSettings {
        &mut self.settings
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        for row in &mut self.edges {
            row.push(Edge::default());
        }
        self.nodes.push(node);
        self.edges.push(vec![Edge::default(); self.nodes.len()]);
        self.first_edge.push(None);
        self.nodes.len() - 1
    }

    /// Adds `capacity` to the link from `from` to `to`, creating it if needed.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: u32) -> Result<(), Error> {
        self.check_pair(from, to)?;

        let is_new = self.edges[from][to].capacity == 0;
        let edge = &mut self.edges[from][to];
        edge.capacity = edge.capacity.saturating_add(capacity);
        if is_new && edge.capacity > 0 {
            edge.next_edge = self.first_edge[from];
            self.first_edge[from] = Some(to);
        }
        Ok(())
    }

    pub fn set_demand(&mut self, from: NodeId, to: NodeId, demand: u32) -> Result<(), Error> {
        self.check_pair(from, to)?;

        let edge = &mut self.edges[from][to];
        edge.demand = demand;
        edge.unsatisfied_demand = demand;
        Ok(())
    }

    pub fn set_supply(&mut self, node: NodeId, supply: u32) -> Result<(), Error> {
        let size = self.size();
        let node = self.nodes.get_mut(node).ok_or(Error::NodeOutOfRange { node, size })?;
        node.supply = supply;
        Ok(())
    }

    pub fn set_distance(&mut self, from: NodeId, to: NodeId, distance: u32) -> Result<(), Error> {
        self.check_pair(from, to)?;
        self.edges[from][to].distance = distance;
        Ok(())
    }

    /// Sets the distance of every node pair to the manhattan distance of the
    /// nodes' coordinates.
    pub fn calculate_distances(&mut self) {
        for i in 0..self.size() {
            for j in 0..i {
                let (x1, y1) = self.nodes[i].xy;
                let (x2, y2) = self.nodes[j].xy;
                let distance = x1.abs_diff(x2).saturating_add(y1.abs_diff(y2));
                self.edges[i][j].distance = distance;
                self.edges[j][i].distance = distance;
            }
        }
    }

    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> &mut Node {
        &mut self.nodes[node]
    }

    /// Returns the edge from `from` to `to`.
    ///
    /// Panics if either node is out of range.
    pub fn edge(&self, from: NodeId, to: NodeId) -> &Edge {
        &self.edges[from][to]
    }

    pub fn edge_mut(&mut self, from: NodeId, to: NodeId) -> &mut Edge {
        &mut self.edges[from][to]
    }

    pub fn first_edge(&self, from: NodeId) -> Option<NodeId> {
        self.first_edge[from]
    }

    /// Walks the adjacency chain of `from`, yielding each link's target and edge.
    pub fn edges_from(&self, from: NodeId) -> impl Iterator<Item = (NodeId, &Edge)> + '_ {
        let mut next = self.first_edge[from];
        iter::from_fn(move || {
            let to = next?;
            let edge = &self.edges[from][to];
            next = edge.next_edge;
            Some((to, edge))
        })
    }

    pub fn total_unsatisfied_demand(&self) -> u64 {
        self.edges
            .iter()
            .flatten()
            .map(|edge| u64::from(edge.unsatisfied_demand))
            .sum()
    }

    pub fn station_of(&self, node: NodeId) -> StationId {
        self.nodes[node].station
    }

    fn check_pair(&self, from: NodeId, to: NodeId) -> Result<(), Error> {
        let size = self.size();
        if from >= size {
            Err(Error::NodeOutOfRange { node: from, size })
        } else if to >= size {
            Err(Error::NodeOutOfRange { node: to, size })
        } else if from == to {
            Err(Error::EdgeToSelf(from))
        } else {
            Ok(())
        }
    }
}

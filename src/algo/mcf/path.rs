use alloc::vec::Vec;
use core::cmp::min;

use crate::component::LinkGraphComponent;
use crate::id::NodeId;

/// A node of the path tree built by one Dijkstra run.
///
/// Paths live in a [`PathVector`] indexed by graph node, so the parent link is
/// an index into the same vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Path {
    pub(crate) node: NodeId,
    pub(crate) parent: Option<NodeId>,
    /// Bottleneck of spare capacity between the source and this node.
    pub(crate) capacity: i64,
    pub(crate) distance: u64,
    pub(crate) flow: u32,
    pub(crate) hops: u32,
    pub(crate) num_children: u32,
    /// Creation sequence number, unique among all paths of a [`PathVector`].
    pub(crate) seq: u64,
}

impl Path {
    pub(crate) fn new(node: NodeId, seq: u64, source: bool) -> Self {
        Self {
            node,
            parent: None,
            capacity: if source { i64::MAX } else { i64::MIN },
            distance: if source { 0 } else { u64::MAX },
            flow: 0,
            hops: 0,
            num_children: 0,
            seq,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    pub fn distance(&self) -> u64 {
        self.distance
    }

    pub fn flow(&self) -> u32 {
        self.flow
    }

    pub fn hops(&self) -> u32 {
        self.hops
    }

    pub fn num_children(&self) -> u32 {
        self.num_children
    }
}

/// Per-source scratch space holding one [`Path`] per graph node.
#[derive(Clone, Debug, Default)]
pub struct PathVector {
    source: NodeId,
    paths: Vec<Option<Path>>,
    next_seq: u64,
}

impl PathVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all paths and creates a fresh unreachable path for every node,
    /// except `source`, which becomes the root.
    pub fn reset(&mut self, size: usize, source: NodeId) {
        self.source = source;
        self.paths.clear();
        self.paths.reserve(size);
        for node in 0..size {
            let seq = self.next_seq;
            self.next_seq += 1;
            self.paths.push(Some(Path::new(node, seq, node == source)));
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&Path> {
        self.paths.get(node).and_then(Option::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> + '_ {
        self.paths.iter().flatten()
    }

    /// Re-parents the path of `node` onto the path of `base`, extended by a
    /// link of spare capacity `capacity` and length `distance`.
    pub(crate) fn fork(&mut self, node: NodeId, base: NodeId, capacity: i64, distance: u64) {
        let Some(&base_path) = self.get(base) else {
            return;
        };
        let old_parent = match self.paths[node].as_mut() {
            Some(path) => {
                path.capacity = min(base_path.capacity, capacity);
                path.distance = base_path.distance.saturating_add(distance);
                path.hops = base_path.hops + 1;
                path.parent.replace(base)
            }
            None => return,
        };
        if old_parent != Some(base) {
            if let Some(old) = old_parent.and_then(|p| self.paths[p].as_mut()) {
                old.num_children -= 1;
            }
            if let Some(parent) = self.paths[base].as_mut() {
                parent.num_children += 1;
            }
        }
    }

    fn unfork(&mut self, node: NodeId) {
        let parent = self.paths[node].as_mut().and_then(|path| path.parent.take());
        if let Some(parent) = parent.and_then(|p| self.paths[p].as_mut()) {
            parent.num_children -= 1;
        }
    }

    /// Pushes up to `flow` units along the path from the source to `node`,
    /// updating edge flows and the per-node flow maps on the way.
    ///
    /// Each edge on the way limits the flow to its usable spare capacity. With
    /// `positive_cap` set, only the short path saturation share of an edge's
    /// capacity is usable; otherwise the full capacity is. Returns the flow
    /// actually pushed, which is zero if `node` is not reachable from the
    /// source or an edge on the way has no usable capacity left.
    pub(crate) fn add_flow(
        &mut self,
        node: NodeId,
        flow: u32,
        component: &mut LinkGraphComponent,
        positive_cap: bool,
    ) -> u32 {
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(n) = current {
            chain.push(n);
            current = self.get(n).and_then(Path::parent);
        }
        if chain.last() != Some(&self.source) || chain.len() < 2 {
            return 0;
        }

        let saturation = component.settings().short_path_saturation;
        let mut flow = flow;
        for hop in chain.windows(2) {
            let edge = component.edge(hop[1], hop[0]);
            let usable = if positive_cap {
                edge.saturated_capacity(saturation)
            } else {
                edge.capacity
            };
            if usable <= edge.flow {
                return 0;
            }
            flow = min(flow, usable - edge.flow);
        }

        let origin = self.source;
        for hop in chain.windows(2) {
            let (to, from) = (hop[0], hop[1]);
            component.edge_mut(from, to).flow += flow;
            component.node_mut(from).add_flow(origin, to, flow);
        }
        for n in chain {
            if let Some(path) = self.paths[n].as_mut() {
                path.flow += flow;
            }
        }
        flow
    }

    /// Trims every branch that carries no flow, from the leaves upwards.
    ///
    /// A path survives only if it has positive flow or is still the parent
    /// of another path. Returns the number of paths removed.
    pub(crate) fn cleanup(&mut self) -> usize {
        let mut removed = 0;
        for node in 0..self.paths.len() {
            let mut current = Some(node);
            while let Some(n) = current {
                let Some(path) = self.paths[n] else {
                    break;
                };
                if path.flow != 0 {
                    break;
                }
                self.unfork(n);
                if path.num_children == 0 {
                    self.paths[n] = None;
                    removed += 1;
                }
                current = path.parent;
            }
        }
        removed
    }

    pub(crate) fn clear(&mut self) {
        self.paths.clear();
    }
}

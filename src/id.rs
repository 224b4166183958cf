/// Index of a node inside a [`LinkGraphComponent`](crate::LinkGraphComponent).
pub type NodeId = usize;

/// Identifier of a station in the surrounding transport network.
pub type StationId = u32;

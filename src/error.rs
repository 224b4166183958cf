use displaydoc::Display;

use crate::id::{NodeId, StationId};

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// Invalid MCF accuracy {0}, expected a value of at least 1
    InvalidAccuracy(u32),
    /// Invalid short path saturation {0}%, expected a percentage between 1 and 100
    InvalidSaturation(u32),
    /// Invalid iteration ceiling for the second MCF pass, expected a positive value
    InvalidIterationCeiling,
    /// Invalid edge from node {0} to itself
    EdgeToSelf(NodeId),
    /// Node {node} is out of range for a component of {size} nodes
    NodeOutOfRange { node: NodeId, size: usize },
    /// Unknown station {0}
    UnknownStation(StationId),
    /// Invalid link from station {0} to itself
    LinkToSelf(StationId),
    /// Multi-commodity flow did not converge after {iterations} iterations, {unsatisfied} units of demand left
    NotConverged { iterations: u32, unsatisfied: u64 },
}

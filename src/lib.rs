#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod component;
pub mod demands;
pub mod error;
pub mod id;
pub mod job;
pub mod linkgraph;
pub mod node;
pub mod settings;

pub use algo::mcf::{McfFirstPass, McfSecondPass, MultiCommodityFlow};
pub use component::{Edge, LinkGraphComponent};
pub use demands::DemandCalculator;
pub use error::Error;
pub use id::{NodeId, StationId};
pub use job::LinkGraphJob;
pub use linkgraph::{link_flows, LinkFlow, LinkGraph, Station};
pub use node::{FlowMap, Node};
pub use settings::LinkGraphSettings;

/// A step of the link graph calculation, run over one component at a time.
///
/// Handlers mutate the component in place; a job runs its handlers in order
/// and stops at the first error.
pub trait ComponentHandler {
    fn run(&mut self, component: &mut LinkGraphComponent) -> Result<(), Error>;
}

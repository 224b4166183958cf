//! Multi-commodity flow solver.
//!
//! The solver runs in two passes over a component. The first pass saturates
//! the shortest paths between every pair of nodes with demand, the second one
//! routes what is left over the widest paths among the links already in use.
//! Demand is pushed in quanta of `unsatisfied_demand / accuracy` so that it is
//! spread over several paths instead of saturating the first one found.

pub mod annotation;
pub mod dijkstra;
pub mod first_pass;
pub mod path;
pub mod second_pass;

use core::cmp::max;

pub use annotation::{Annotation, CapacityAnnotation, DistanceAnnotation};
pub use dijkstra::dijkstra;
pub use first_pass::McfFirstPass;
pub use path::{Path, PathVector};
pub use second_pass::McfSecondPass;

use crate::component::LinkGraphComponent;
use crate::error::Error;
use crate::id::NodeId;

/// State shared by both passes for the duration of one run.
#[derive(Debug)]
pub struct MultiCommodityFlow {
    paths: PathVector,
    accuracy: u32,
}

impl MultiCommodityFlow {
    /// Prepares a run over `component`, rejecting invalid settings.
    pub fn new(component: &LinkGraphComponent) -> Result<Self, Error> {
        let settings = component.settings();
        settings.validate()?;

        Ok(Self {
            paths: PathVector::new(),
            accuracy: settings.mcf_accuracy,
        })
    }

    /// The configured accuracy.
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    pub fn paths(&self) -> &PathVector {
        &self.paths
    }

    pub fn dijkstra<A: Annotation>(
        &mut self,
        component: &LinkGraphComponent,
        from: NodeId,
        max_hops: u32,
        create_new_paths: bool,
    ) {
        dijkstra::<A>(component, from, &mut self.paths, max_hops, create_new_paths);
    }

    /// Pushes a quantum of the demand from the current source to `dest` along
    /// the best known path and returns the flow that was accepted.
    pub fn push_flow(
        &mut self,
        component: &mut LinkGraphComponent,
        dest: NodeId,
        accuracy: u32,
        positive_cap: bool,
    ) -> u32 {
        let source = self.paths.source();
        let demand = component.edge(source, dest).unsatisfied_demand;
        if demand == 0 {
            return 0;
        }

        let quantum = max(demand / accuracy, 1);
        let flow = self.paths.add_flow(dest, quantum, component, positive_cap);
        if flow > 0 {
            component.edge_mut(source, dest).unsatisfied_demand -= flow;
            log::trace!("pushed {flow} of {demand} from {source} to {dest}");
        }
        flow
    }

    /// Trims the paths that ended up without flow and releases the rest.
    pub fn cleanup_paths(&mut self) {
        let removed = self.paths.cleanup();
        log::trace!(
            "trimmed {removed} of {} paths from source {}",
            self.paths.len(),
            self.paths.source()
        );
        self.paths.clear();
    }
}

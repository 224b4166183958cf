use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use itertools::iproduct;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};

use crate::component::LinkGraphComponent;
use crate::error::Error;
use crate::id::{NodeId, StationId};
use crate::job::LinkGraphJob;
use crate::node::Node;
use crate::settings::LinkGraphSettings;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub supply: u32,
    pub acceptance: bool,
    pub xy: (u32, u32),
}

/// Solved state of one edge, addressed by station.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkFlow {
    pub from: StationId,
    pub to: StationId,
    pub capacity: u32,
    pub flow: u32,
    pub demand: u32,
    pub unsatisfied_demand: u32,
}

/// The whole transport network for one cargo.
#[derive(Clone, Debug, Default)]
pub struct LinkGraph {
    settings: LinkGraphSettings,
    stations: BTreeMap<StationId, Station>,
    links: BTreeMap<(StationId, StationId), u32>,
}

impl LinkGraph {
    pub fn new(settings: LinkGraphSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &LinkGraphSettings {
        &self.settings
    }

    pub fn add_station(&mut self, id: StationId, station: Station) {
        self.stations.insert(id, station);
    }

    /// Adds a directed link, accumulating the capacity of repeated links.
    pub fn add_link(&mut self, from: StationId, to: StationId, capacity: u32) -> Result<(), Error> {
        if from == to {
            return Err(Error::LinkToSelf(from));
        }
        for station in [from, to] {
            if !self.stations.contains_key(&station) {
                return Err(Error::UnknownStation(station));
            }
        }
        let entry = self.links.entry((from, to)).or_default();
        *entry = entry.saturating_add(capacity);
        Ok(())
    }

    /// Splits the linked stations into connected components.
    ///
    /// Each component starts at the lowest station id not covered yet and
    /// numbers its nodes in breadth-first order. Stations without links are
    /// not part of any component.
    pub fn components(&self) -> Result<Vec<LinkGraphComponent>, Error> {
        let graph: UnGraphMap<StationId, ()> = self
            .links
            .keys()
            .map(|&(from, to)| (from, to, ()))
            .collect();

        let mut visited = BTreeSet::new();
        let mut components = Vec::new();
        for &start in self.stations.keys() {
            if visited.contains(&start) || !graph.contains_node(start) {
                continue;
            }

            let mut component = LinkGraphComponent::new(self.settings);
            let mut index: BTreeMap<StationId, NodeId> = BTreeMap::new();
            let mut bfs = Bfs::new(&graph, start);
            while let Some(id) = bfs.next(&graph) {
                visited.insert(id);
                let station = self.stations.get(&id).ok_or(Error::UnknownStation(id))?;
                let node = component.add_node(Node::new(
                    id,
                    station.supply,
                    station.acceptance,
                    station.xy,
                ));
                index.insert(id, node);
            }

            component.calculate_distances();
            for (&(from, to), &capacity) in &self.links {
                if let (Some(&from), Some(&to)) = (index.get(&from), index.get(&to)) {
                    component.add_edge(from, to, capacity)?;
                }
            }

            log::debug!(
                "component from station {start}: {} nodes",
                component.size()
            );
            components.push(component);
        }
        Ok(components)
    }

    /// Runs demand calculation and both flow passes on every component.
    ///
    /// Components are solved in order and the first failing one aborts the
    /// whole solve, discarding the flows of the components solved before it.
    pub fn solve(&self) -> Result<Vec<LinkFlow>, Error> {
        let mut flows = Vec::new();
        for component in self.components()? {
            let mut job = LinkGraphJob::with_default_handlers(component);
            job.run()?;
            flows.extend(link_flows(job.component()));
        }
        flows.sort();

        log::info!(
            "solved {} links, {} units routed, {} units unsatisfied",
            flows.len(),
            flows.iter().map(|f| u64::from(f.flow)).sum::<u64>(),
            flows
                .iter()
                .map(|f| u64::from(f.unsatisfied_demand))
                .sum::<u64>()
        );
        Ok(flows)
    }
}

/// Every edge of `component` that is a link or carries demand.
pub fn link_flows(component: &LinkGraphComponent) -> Vec<LinkFlow> {
    let size = component.size();
    iproduct!(0..size, 0..size)
        .filter(|(from, to)| from != to)
        .filter_map(|(from, to)| {
            let edge = component.edge(from, to);
            (edge.capacity > 0 || edge.demand > 0).then(|| LinkFlow {
                from: component.station_of(from),
                to: component.station_of(to),
                capacity: edge.capacity,
                flow: edge.flow,
                demand: edge.demand,
                unsatisfied_demand: edge.unsatisfied_demand,
            })
        })
        .collect()
}

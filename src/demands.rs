use alloc::vec::Vec;

use itertools::iproduct;

use crate::component::LinkGraphComponent;
use crate::error::Error;
use crate::id::NodeId;
use crate::ComponentHandler;

/// Spreads the supply of every node evenly over the other accepting nodes.
///
/// What cannot be divided evenly goes one unit at a time to the accepting
/// nodes with the lowest indices.
#[derive(Clone, Copy, Debug, Default)]
pub struct DemandCalculator;

impl ComponentHandler for DemandCalculator {
    fn run(&mut self, component: &mut LinkGraphComponent) -> Result<(), Error> {
        let size = component.size();
        for (from, to) in iproduct!(0..size, 0..size).filter(|(from, to)| from != to) {
            component.set_demand(from, to, 0)?;
        }

        let accepting: Vec<NodeId> = (0..size)
            .filter(|&node| component.node(node).acceptance)
            .collect();

        let mut total: u64 = 0;
        for from in 0..size {
            let supply = component.node(from).supply;
            let targets: Vec<NodeId> = accepting.iter().copied().filter(|&to| to != from).collect();
            if supply == 0 || targets.is_empty() {
                continue;
            }

            let count = u32::try_from(targets.len()).unwrap_or(u32::MAX);
            let share = supply / count;
            let remainder = supply % count;
            for (i, to) in (0..count).zip(targets) {
                let demand = share + u32::from(i < remainder);
                if demand > 0 {
                    component.set_demand(from, to, demand)?;
                    total += u64::from(demand);
                }
            }
        }

        log::debug!(
            "assigned {total} units of demand across {} accepting nodes",
            accepting.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::settings::LinkGraphSettings;

    fn component(nodes: &[(u32, bool)]) -> LinkGraphComponent {
        let mut component = LinkGraphComponent::new(LinkGraphSettings::default());
        for (station, (supply, acceptance)) in nodes.iter().enumerate() {
            component.add_node(Node::new(station as u32, *supply, *acceptance, (0, 0)));
        }
        component
    }

    #[test]
    fn splits_supply_evenly() {
        let mut component = component(&[(10, false), (0, true), (0, true)]);
        DemandCalculator.run(&mut component).unwrap();

        assert_eq!(component.edge(0, 1).demand, 5);
        assert_eq!(component.edge(0, 2).unsatisfied_demand, 5);
        assert_eq!(component.total_unsatisfied_demand(), 10);
    }

    #[test]
    fn remainder_goes_to_lowest_indices() {
        let mut component = component(&[(0, true), (11, true), (0, true), (0, true)]);
        DemandCalculator.run(&mut component).unwrap();

        assert_eq!(component.edge(1, 0).demand, 4);
        assert_eq!(component.edge(1, 2).demand, 4);
        assert_eq!(component.edge(1, 3).demand, 3);
        assert_eq!(component.edge(1, 1).demand, 0);
    }

    #[test]
    fn small_supply_reaches_only_the_first_targets() {
        let mut component = component(&[(2, false), (0, true), (0, true), (0, true)]);
        DemandCalculator.run(&mut component).unwrap();

        assert_eq!(component.edge(0, 1).demand, 1);
        assert_eq!(component.edge(0, 2).demand, 1);
        assert_eq!(component.edge(0, 3).demand, 0);
    }

    #[test]
    fn no_acceptors_means_no_demand() {
        let mut component = component(&[(10, false), (7, false)]);
        DemandCalculator.run(&mut component).unwrap();
        assert_eq!(component.total_unsatisfied_demand(), 0);
    }

    #[test]
    fn recalculation_replaces_old_demand() {
        let mut component = component(&[(6, true), (0, true)]);
        DemandCalculator.run(&mut component).unwrap();
        DemandCalculator.run(&mut component).unwrap();
        assert_eq!(component.edge(0, 1).demand, 6);
        assert_eq!(component.total_unsatisfied_demand(), 6);
    }
}

use num_traits::checked_pow;

use crate::algo::mcf::annotation::DistanceAnnotation;
use crate::algo::mcf::MultiCommodityFlow;
use crate::component::LinkGraphComponent;
use crate::error::Error;
use crate::ComponentHandler;

/// First pass: saturate the shortest paths.
///
/// Path length is limited to the iteration number, so the first iterations
/// only use direct links. While `size ^ hops` stays below the configured
/// accuracy it is used as the accuracy instead, which makes the early,
/// short-range iterations coarse.
#[derive(Clone, Copy, Debug, Default)]
pub struct McfFirstPass;

impl ComponentHandler for McfFirstPass {
    fn run(&mut self, component: &mut LinkGraphComponent) -> Result<(), Error> {
        let mut mcf = MultiCommodityFlow::new(component)?;
        let size = component.size();
        let max_accuracy = mcf.accuracy();
        let mut accuracy = max_accuracy;
        let mut demand_left = true;
        let mut decrease_accuracy = true;
        let mut hops: u32 = 0;
        let mut pushed: u64 = 0;

        while demand_left && (hops as usize) < size {
            demand_left = false;
            if decrease_accuracy {
                accuracy = max_accuracy;
                match checked_pow(size, hops as usize) {
                    Some(coarse) if coarse < accuracy as usize => accuracy = coarse as u32,
                    _ => decrease_accuracy = false,
                }
            }
            hops += 1;

            for source in 0..size {
                mcf.dijkstra::<DistanceAnnotation>(component, source, hops, true);

                for dest in 0..size {
                    if component.edge(source, dest).unsatisfied_demand == 0 {
                        continue;
                    }
                    let reachable = mcf
                        .paths()
                        .get(dest)
                        .map_or(false, |path| path.capacity() > 0);
                    if reachable {
                        pushed += u64::from(mcf.push_flow(component, dest, accuracy, true));
                    }
                    if component.edge(source, dest).unsatisfied_demand > 0 {
                        demand_left = true;
                    }
                }
                mcf.cleanup_paths();
            }

            log::debug!(
                "first pass: {hops} hops at accuracy {accuracy}, {} demand left",
                component.total_unsatisfied_demand()
            );
            if accuracy > 1 {
                accuracy -= 1;
            }
        }

        log::info!(
            "first pass routed {pushed} units in {hops} iterations, {} left",
            component.total_unsatisfied_demand()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::mcf::McfSecondPass;
    use crate::node::Node;
    use crate::settings::LinkGraphSettings;

    fn line(capacities: &[u32]) -> LinkGraphComponent {
        let mut component = LinkGraphComponent::new(LinkGraphSettings::default());
        for station in 0..=capacities.len() {
            component.add_node(Node::new(station as u32, 0, true, (station as u32, 0)));
        }
        component.calculate_distances();
        for (from, capacity) in capacities.iter().enumerate() {
            component.add_edge(from, from + 1, *capacity).unwrap();
        }
        component
    }

    #[test]
    fn routes_demand_over_single_link() {
        let mut component = line(&[50]);
        component.set_demand(0, 1, 30).unwrap();
        McfFirstPass.run(&mut component).unwrap();

        assert_eq!(component.edge(0, 1).flow, 30);
        assert_eq!(component.edge(0, 1).unsatisfied_demand, 0);
    }

    #[test]
    fn routes_over_multiple_hops() {
        let mut component = line(&[20, 20, 20]);
        component.set_demand(0, 3, 12).unwrap();
        McfFirstPass.run(&mut component).unwrap();

        // three hops are first allowed in the last two iterations, which push
        // one unit each at accuracy 16 and 15
        for from in 0..3 {
            assert_eq!(component.edge(from, from + 1).flow, 2);
        }
        assert_eq!(component.edge(0, 3).unsatisfied_demand, 10);
        assert_eq!(component.node(1).flow_via(0, 2), 2);

        McfSecondPass.run(&mut component).unwrap();
        for from in 0..3 {
            assert_eq!(component.edge(from, from + 1).flow, 12);
        }
        assert_eq!(component.edge(0, 3).unsatisfied_demand, 0);
        assert_eq!(component.node(1).flow_via(0, 2), 12);
    }

    #[test]
    fn saturated_short_link_diverts_to_detour() {
        //   0 --10--> 1    (distance 4)
        //   0 --100--> 2 --100--> 1    (distance 5 + 5)
        let mut component = LinkGraphComponent::new(LinkGraphSettings::default());
        for (station, xy) in [(0, 0), (4, 0), (2, 3)].into_iter().enumerate() {
            component.add_node(Node::new(station as u32, 0, true, xy));
        }
        component.calculate_distances();
        for (from, to, capacity) in [(0, 1, 10), (0, 2, 100), (2, 1, 100)] {
            component.add_edge(from, to, capacity).unwrap();
        }
        component.settings_mut().short_path_saturation = 50;
        component.set_demand(0, 1, 30).unwrap();

        McfFirstPass.run(&mut component).unwrap();
        assert_eq!(component.edge(0, 1).flow, 5);
        assert_eq!(component.edge(0, 2).flow, 9);
        assert_eq!(component.edge(2, 1).flow, 9);
        assert_eq!(component.edge(0, 1).unsatisfied_demand, 16);

        McfSecondPass.run(&mut component).unwrap();
        assert_eq!(component.edge(0, 1).flow, 5);
        assert_eq!(component.edge(2, 1).flow, 25);
        assert_eq!(component.edge(0, 1).unsatisfied_demand, 0);
    }

    #[test]
    fn stops_at_capacity() {
        let mut component = line(&[8]);
        component.set_demand(0, 1, 30).unwrap();
        McfFirstPass.run(&mut component).unwrap();

        assert_eq!(component.edge(0, 1).flow, 8);
        assert_eq!(component.edge(0, 1).unsatisfied_demand, 22);
    }

    #[test]
    fn respects_short_path_saturation() {
        let mut component = line(&[100]);
        component.settings_mut().short_path_saturation = 60;
        component.set_demand(0, 1, 90).unwrap();
        McfFirstPass.run(&mut component).unwrap();

        assert_eq!(component.edge(0, 1).flow, 60);
        assert_eq!(component.edge(0, 1).unsatisfied_demand, 30);
    }

    #[test]
    fn rejects_invalid_settings() {
        let mut component = line(&[10]);
        component.settings_mut().mcf_accuracy = 0;
        assert_eq!(
            McfFirstPass.run(&mut component),
            Err(Error::InvalidAccuracy(0))
        );
    }
}

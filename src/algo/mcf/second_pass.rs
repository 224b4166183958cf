use crate::algo::mcf::annotation::CapacityAnnotation;
use crate::algo::mcf::MultiCommodityFlow;
use crate::component::LinkGraphComponent;
use crate::error::Error;
use crate::ComponentHandler;

/// Second pass: route the remaining demand over the widest paths made of links
/// that already carry flow.
///
/// The pass ends when all demand is routed or when a whole iteration could not
/// push anything, in which case the rest cannot be routed over the links in
/// use. Reaching the configured iteration ceiling while still making progress
/// is reported as [`Error::NotConverged`].
#[derive(Clone, Copy, Debug, Default)]
pub struct McfSecondPass;

impl ComponentHandler for McfSecondPass {
    fn run(&mut self, component: &mut LinkGraphComponent) -> Result<(), Error> {
        let mut mcf = MultiCommodityFlow::new(component)?;
        let size = component.size();
        let max_hops = u32::try_from(size).unwrap_or(u32::MAX);
        let max_iterations = component.settings().max_second_pass_iterations;
        let mut accuracy = mcf.accuracy();
        let mut demand_left = true;
        let mut iterations: u32 = 0;
        let mut total: u64 = 0;

        while demand_left {
            if iterations == max_iterations {
                let unsatisfied = component.total_unsatisfied_demand();
                log::warn!(
                    "second pass gave up after {iterations} iterations, {unsatisfied} demand left"
                );
                return Err(Error::NotConverged {
                    iterations,
                    unsatisfied,
                });
            }
            iterations += 1;
            demand_left = false;
            let mut pushed: u64 = 0;

            for source in 0..size {
                mcf.dijkstra::<CapacityAnnotation>(component, source, max_hops, false);

                for dest in 0..size {
                    if component.edge(source, dest).unsatisfied_demand == 0 {
                        continue;
                    }
                    pushed += u64::from(mcf.push_flow(component, dest, accuracy, false));
                    if component.edge(source, dest).unsatisfied_demand > 0 {
                        demand_left = true;
                    }
                }
                mcf.cleanup_paths();
            }

            total += pushed;
            log::debug!(
                "second pass: iteration {iterations} at accuracy {accuracy} pushed {pushed}"
            );
            if demand_left && pushed == 0 {
                log::warn!(
                    "second pass stalled, {} demand cannot be routed",
                    component.total_unsatisfied_demand()
                );
                break;
            }
            if accuracy > 1 {
                accuracy -= 1;
            }
        }

        log::info!("second pass routed {total} units in {iterations} iterations");
        Ok(())
    }
}

use alloc::collections::BTreeSet;

use crate::algo::mcf::annotation::Annotation;
use crate::algo::mcf::path::PathVector;
use crate::component::LinkGraphComponent;
use crate::id::NodeId;

/// Builds the tree of best paths from `from` to every node of the component.
///
/// Only links with positive capacity are followed, and with
/// `create_new_paths` unset only those already carrying flow. With
/// `create_new_paths` set, a link's spare capacity is measured against the
/// short path saturation share of its capacity, the same share pushes in the
/// first pass are limited to. Paths are not extended beyond `max_hops` links.
/// A node may be improved again after it has left the frontier, in which case
/// it is queued once more.
pub fn dijkstra<A: Annotation>(
    component: &LinkGraphComponent,
    from: NodeId,
    paths: &mut PathVector,
    max_hops: u32,
    create_new_paths: bool,
) {
    let size = component.size();
    let saturation = component.settings().short_path_saturation;
    paths.reset(size, from);

    let mut annos: BTreeSet<(A::Key, NodeId)> =
        paths.iter().map(|path| (A::key(path), path.node())).collect();

    while let Some((_, node)) = annos.pop_first() {
        let Some(&base) = paths.get(node) else {
            continue;
        };
        if base.hops() == max_hops {
            continue;
        }

        for (to, edge) in component.edges_from(node) {
            if edge.capacity == 0 || !(create_new_paths || edge.flow > 0) {
                continue;
            }
            let usable = if create_new_paths {
                edge.saturated_capacity(saturation)
            } else {
                edge.capacity
            };
            let capacity = i64::from(usable) - i64::from(edge.flow);
            let distance = u64::from(edge.distance);
            let Some(dest) = paths.get(to) else {
                continue;
            };
            if A::is_better(dest, &base, capacity, distance) {
                annos.remove(&(A::key(dest), to));
                paths.fork(to, node, capacity, distance);
                if let Some(dest) = paths.get(to) {
                    annos.insert((A::key(dest), to));
                }
            }
        }
    }
}

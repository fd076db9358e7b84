//! Bubble detection and removal: divergent paths that re-converge, kept to one arm.

use std::collections::{HashMap, HashSet};

use crate::graph::DeBruijnGraph;

/// Follows an unambiguous arm starting at `start` (a successor of `root`),
/// aborting (returning `None`) if a cycle back into the arm is hit or the
/// arm grows past `threshold` hops.
fn bubble_arm(graph: &DeBruijnGraph, root: u32, start: u32, threshold: usize) -> Option<Vec<u32>> {
    let mut path = vec![start];
    let mut visited: HashSet<u32> = HashSet::from([root, start]);
    let mut current = start;

    loop {
        if path.len() > threshold {
            return None;
        }
        let successors = graph.successors(current);
        if successors.len() != 1 {
            break;
        }
        let next = successors[0];
        if visited.contains(&next) {
            return None; // cycle inside the arm aborts it
        }
        let predecessors = graph.predecessors(next);
        if predecessors.len() != 1 || predecessors[0] != current {
            break;
        }
        path.push(next);
        visited.insert(next);
        current = next;
    }

    (path.len() <= threshold).then_some(path)
}

/// For each node with >= 2 successors, follows every arm and groups arms by
/// the convergence node they terminate at. Returns, per branch node, the
/// full `[branch, ...arm, convergence]` paths of every arm *beyond* the
/// first encountered for a given convergence node (the ones to delete).
///
/// Arms are visited in `G+`'s adjacency order, which [`DeBruijnGraph::rebuild`]
/// fixes to lexicographic k-mer order — so "first encountered" is
/// equivalent to "arm whose k-mer is lexicographically smallest", a
/// deterministic stand-in for the source's insertion-order tie-break.
pub fn find_bubble_arms(graph: &DeBruijnGraph, threshold: usize) -> Vec<Vec<u32>> {
    let mut arms_to_remove = Vec::new();

    for branch in 0..graph.node_count() as u32 {
        let successors = graph.successors(branch);
        if successors.len() < 2 {
            continue;
        }

        let mut convergence: HashMap<u32, u32> = HashMap::new();
        for &s in successors {
            let Some(arm) = bubble_arm(graph, branch, s, threshold) else {
                continue;
            };
            let last = *arm.last().unwrap();
            let succ_of_last = graph.successors(last);
            if succ_of_last.len() != 1 {
                continue; // no single convergence candidate for this arm
            }
            let convergence_node = succ_of_last[0];

            if convergence.contains_key(&convergence_node) {
                let mut full = Vec::with_capacity(arm.len() + 2);
                full.push(branch);
                full.extend_from_slice(&arm);
                full.push(convergence_node);
                arms_to_remove.push(full);
            } else {
                convergence.insert(convergence_node, s);
            }
        }
    }

    arms_to_remove
}

/// Deletes every non-kept bubble arm's k-mers from `M`, then rebuilds the graph.
pub fn remove_bubbles(graph: &mut DeBruijnGraph, threshold: usize) {
    let arms = find_bubble_arms(graph, threshold);
    for arm in &arms {
        let seq = graph.assemble_sequence(arm);
        graph.remove_sequence_kmers(&seq);
    }
    log::debug!("removed {} bubble arms (threshold {threshold})", arms.len());
    graph.rebuild();
}

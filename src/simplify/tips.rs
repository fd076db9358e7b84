//! Tip detection and removal: short dead-end branches rooted at a junction.

use std::collections::HashSet;

use crate::graph::DeBruijnGraph;

fn is_tip(graph: &DeBruijnGraph, path: &[u32], threshold: usize) -> bool {
    if path.is_empty() || path.len() >= threshold {
        return false;
    }
    let last = *path.last().unwrap();
    graph.successors(last).is_empty()
}

/// Enumerates candidate seeds as nodes with no predecessor, plus successors
/// of branching nodes; for each seed not yet visited, builds its simple path
/// and records it if it's a tip. Branch-rooted dead ends are recorded with
/// the branch node prepended.
pub fn find_all_tips(graph: &DeBruijnGraph, threshold: usize) -> Vec<Vec<u32>> {
    let mut tips = Vec::new();
    let mut visited: HashSet<u32> = HashSet::new();

    // Dead-end branches hanging off a junction: the case that matters in
    // practice, since a junction node's own simple path never extends past
    // itself (it has >1 successor), so it can never itself be a tip.
    for node in 0..graph.node_count() as u32 {
        let successors = graph.successors(node);
        if successors.len() <= 1 {
            continue;
        }
        for &succ in successors {
            if visited.contains(&succ) {
                continue;
            }
            let path = graph.simple_path_from_id(succ);
            if is_tip(graph, &path, threshold) {
                let mut full = Vec::with_capacity(path.len() + 1);
                full.push(node);
                full.extend_from_slice(&path);
                visited.extend(path.iter().copied());
                tips.push(full);
            }
        }
    }

    // Dead-end paths starting at a node with no predecessor at all.
    for node in 0..graph.node_count() as u32 {
        if visited.contains(&node) || graph.successors(node).is_empty() {
            continue;
        }
        if !graph.predecessors(node).is_empty() {
            continue;
        }
        let path = graph.simple_path_from_id(node);
        if is_tip(graph, &path, threshold) {
            visited.extend(path.iter().copied());
            tips.push(path);
        }
    }

    tips
}

/// For every detected tip, reconstitutes its k-mers and deletes them from
/// `M`, then rebuilds the graph, preserving I1-I4.
pub fn remove_tips(graph: &mut DeBruijnGraph, threshold: usize) {
    let tips = find_all_tips(graph, threshold);
    for tip in &tips {
        let seq = graph.assemble_sequence(tip);
        graph.remove_sequence_kmers(&seq);
    }
    log::debug!("removed {} tips (threshold {threshold})", tips.len());
    graph.rebuild();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::KmerCounts;

    fn counts(pairs: &[(&str, u32)]) -> KmerCounts {
        pairs.iter().map(|&(k, c)| (k.into(), c)).collect()
    }

    #[test]
    fn detects_and_removes_short_tip() {
        // ATG-TGG, with GG branching into two symmetric length-1 dead ends
        // GA and GT: both are tips and both get removed.
        let mut graph = DeBruijnGraph::new(
            3,
            counts(&[("ATG", 1), ("TGG", 1), ("GGA", 1), ("GGT", 1)]),
        )
        .unwrap();
        remove_tips(&mut graph, 3);
        assert_eq!(graph.kmer_count(), 2);
        assert!(!graph.has_kmer("GGA"));
        assert!(!graph.has_kmer("GGT"));
        let at = graph.node_id("AT").unwrap();
        let path = graph.simple_path_from_id(at);
        assert_eq!(graph.assemble_sequence(&path), "ATGG");
    }

    #[test]
    fn tip_longer_than_threshold_is_kept() {
        let mut graph =
            DeBruijnGraph::new(3, counts(&[("ATG", 1), ("TGC", 1), ("GCA", 1), ("CAA", 1)]))
                .unwrap();
        let before = graph.kmer_count();
        remove_tips(&mut graph, 3);
        assert_eq!(graph.kmer_count(), before);
    }

    #[test]
    fn idempotent_on_second_call() {
        let mut graph = DeBruijnGraph::new(
            3,
            counts(&[("ATG", 1), ("TGG", 1), ("GGA", 1), ("GGT", 1)]),
        )
        .unwrap();
        remove_tips(&mut graph, 3);
        let after_first = graph.kmer_count();
        remove_tips(&mut graph, 3);
        assert_eq!(graph.kmer_count(), after_first);
    }
}

//! Maximal non-branching path extension ("unitig" walking) over a [`DeBruijnGraph`].

use std::collections::HashSet;

use super::DeBruijnGraph;

impl DeBruijnGraph {
    /// Builds the k-mer that backs the edge `from -> to` so its presence in
    /// `M` can be checked before stepping onto it.
    fn edge_kmer(&self, from: u32, to: u32) -> String {
        let mut kmer = String::with_capacity(self.k());
        kmer.push_str(self.node_str(from));
        kmer.push(
            self.node_str(to)
                .as_bytes()
                .last()
                .copied()
                .unwrap_or(b'?') as char,
        );
        kmer
    }

    /// Starting from node `start`, advances while the path is unambiguous in
    /// both directions and the backing k-mer is still present in `M`. Stops
    /// on the first violation, on revisiting a node already in the path, or
    /// when the backing k-mer has been removed from `M`.
    pub fn extend_forward(&self, start: u32) -> Vec<u32> {
        let mut path = vec![start];
        let mut visited: HashSet<u32> = HashSet::from([start]);
        let mut current = start;

        loop {
            let successors = self.successors(current);
            if successors.len() != 1 {
                break;
            }
            let next = successors[0];
            if visited.contains(&next) {
                break;
            }
            let predecessors = self.predecessors(next);
            if predecessors.len() != 1 || predecessors[0] != current {
                break;
            }
            if !self.has_kmer(&self.edge_kmer(current, next)) {
                break;
            }
            path.push(next);
            visited.insert(next);
            current = next;
        }

        path
    }

    /// Symmetric to [`Self::extend_forward`] over `G-`. Does not include `start`.
    pub fn extend_backward(&self, start: u32) -> Vec<u32> {
        let mut path = Vec::new();
        let mut visited: HashSet<u32> = HashSet::from([start]);
        let mut current = start;

        loop {
            let predecessors = self.predecessors(current);
            if predecessors.len() != 1 {
                break;
            }
            let prev = predecessors[0];
            if visited.contains(&prev) {
                break;
            }
            let successors_of_prev = self.successors(prev);
            if successors_of_prev.len() != 1 || successors_of_prev[0] != current {
                break;
            }
            if !self.has_kmer(&self.edge_kmer(prev, current)) {
                break;
            }
            path.insert(0, prev);
            visited.insert(prev);
            current = prev;
        }

        path
    }

    /// `extend_backward(id) ++ extend_forward(id)`: the maximal non-branching
    /// path through `id`.
    pub fn simple_path_from_id(&self, id: u32) -> Vec<u32> {
        let mut path = self.extend_backward(id);
        path.extend(self.extend_forward(id));
        path
    }

    /// Same as [`Self::simple_path_from_id`], but looked up by node string.
    /// Returns an empty path if `node` never appeared in any k-mer.
    pub fn simple_path(&self, node: &str) -> Vec<u32> {
        match self.node_id(node) {
            Some(id) => self.simple_path_from_id(id),
            None => Vec::new(),
        }
    }

    /// `path[0] + Σ path[i][-1]` for `i >= 1`; empty string for an empty path.
    pub fn assemble_sequence(&self, path: &[u32]) -> String {
        let Some((&first, rest)) = path.split_first() else {
            return String::new();
        };
        let mut seq = String::from(self.node_str(first));
        for &id in rest {
            let node = self.node_str(id);
            seq.push(node.as_bytes().last().copied().unwrap_or(b'?') as char);
        }
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::super::{DeBruijnGraph, KmerCounts};

    fn counts(pairs: &[(&str, u32)]) -> KmerCounts {
        pairs.iter().map(|&(k, c)| (k.into(), c)).collect()
    }

    #[test]
    fn linear_graph_assembles_whole_sequence() {
        let graph =
            DeBruijnGraph::new(3, counts(&[("ATG", 1), ("TGG", 1), ("GGC", 1), ("GCA", 1)]))
                .unwrap();
        let at = graph.node_id("AT").unwrap();
        let path = graph.simple_path_from_id(at);
        assert_eq!(graph.assemble_sequence(&path), "ATGGCA");
    }

    #[test]
    fn branch_point_stops_forward_extension() {
        // TG -> GG and TG -> GT: AT-TG-GG-GA and a tip TG-GT.
        let graph = DeBruijnGraph::new(
            3,
            counts(&[("ATG", 1), ("TGG", 1), ("GGA", 1), ("TGT", 1)]),
        )
        .unwrap();
        let tg = graph.node_id("TG").unwrap();
        // TG itself has two successors, so extend_forward from TG can't advance.
        assert_eq!(graph.extend_forward(tg), vec![tg]);
        let gt = graph.node_id("GT").unwrap();
        assert_eq!(graph.extend_backward(gt), Vec::<u32>::new());
    }

    #[test]
    fn cycle_guard_terminates_repeat() {
        // "ATATAT" at k=3: ATA:2, TAT:1 -> node AT <-> TA cycle.
        let graph = DeBruijnGraph::new(3, counts(&[("ATA", 2), ("TAT", 1)])).unwrap();
        let at = graph.node_id("AT").unwrap();
        let path = graph.simple_path_from_id(at);
        // Must terminate, and every distinct k-mer is covered exactly once.
        let seq = graph.assemble_sequence(&path);
        assert!(seq == "ATAT" || seq == "TATA");
    }

    #[test]
    fn unknown_node_yields_empty_path() {
        let graph = DeBruijnGraph::new(3, counts(&[("ATG", 1)])).unwrap();
        assert_eq!(graph.simple_path("ZZ"), Vec::<u32>::new());
    }
}

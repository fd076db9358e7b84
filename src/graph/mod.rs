//! The de Bruijn graph: forward/reverse adjacency derived from a k-mer count map.
//!
//! `DeBruijnGraph` owns the k-mer multiset `M` and the two adjacency indexes
//! `G+`/`G-` that are always kept consistent with it. Simplification passes
//! ([`crate::simplify`]) mutate `M` directly and call [`DeBruijnGraph::rebuild`]
//! to restore I1-I4; they never touch `G+`/`G-` by hand.

mod interner;
mod path;

use std::collections::HashMap;

use crate::error::{AssemblerError, EmptyKmerSetSnafu, InvalidParameterSnafu};
use interner::NodeInterner;
use snafu::ensure;

/// The k-mer multiset `M`: k-mer string to count.
pub type KmerCounts = HashMap<Box<str>, u32>;

pub struct DeBruijnGraph {
    k: usize,
    kmers: KmerCounts,
    interner: NodeInterner,
    forward: Vec<Vec<u32>>,
    reverse: Vec<Vec<u32>>,
}

impl DeBruijnGraph {
    /// Builds a graph over `kmers`, rejecting `k < 2` and an empty k-mer set
    /// up front so that callers never have to special-case those later.
    pub fn new(k: usize, kmers: KmerCounts) -> Result<Self, AssemblerError> {
        ensure!(
            k >= 2,
            InvalidParameterSnafu {
                reason: format!("k must be >= 2, got {k}"),
            }
        );
        ensure!(!kmers.is_empty(), EmptyKmerSetSnafu);

        let mut graph = DeBruijnGraph {
            k,
            kmers,
            interner: NodeInterner::new(),
            forward: Vec::new(),
            reverse: Vec::new(),
        };
        graph.rebuild();
        Ok(graph)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn kmer_count(&self) -> usize {
        self.kmers.len()
    }

    pub fn node_count(&self) -> usize {
        self.interner.len()
    }

    pub fn kmers(&self) -> &KmerCounts {
        &self.kmers
    }

    pub fn has_kmer(&self, kmer: &str) -> bool {
        self.kmers.contains_key(kmer)
    }

    pub fn node_id(&self, node: &str) -> Option<u32> {
        self.interner.lookup(node)
    }

    pub fn node_str(&self, id: u32) -> &str {
        self.interner.get(id)
    }

    pub fn successors(&self, id: u32) -> &[u32] {
        self.forward.get(id as usize).map_or(&[], Vec::as_slice)
    }

    pub fn predecessors(&self, id: u32) -> &[u32] {
        self.reverse.get(id as usize).map_or(&[], Vec::as_slice)
    }

    /// Removes a single k-mer from `M`. Does not rebuild `G+`/`G-`: callers
    /// that mutate the graph structurally are responsible for calling
    /// [`Self::rebuild`] once they are done (see I4).
    pub fn remove_kmer(&mut self, kmer: &str) -> bool {
        self.kmers.remove(kmer).is_some()
    }

    /// Removes every k-mer derivable from `seq` (i.e. `seq[i..i+k]`) from `M`.
    pub fn remove_sequence_kmers(&mut self, seq: &str) {
        if seq.len() < self.k {
            return;
        }
        for i in 0..=(seq.len() - self.k) {
            self.kmers.remove(&seq[i..i + self.k]);
        }
    }

    /// Fully rebuilds `G+`/`G-` from the current `M`, restoring I1-I3.
    ///
    /// K-mers are visited in lexicographic order so that node adjacency
    /// lists are built deterministically: this is what fixes the bubble
    /// arm-selection tie-break ("keep the first encountered arm") to a
    /// reproducible rule instead of hash-iteration order.
    pub fn rebuild(&mut self) {
        self.interner.clear();
        self.forward.clear();
        self.reverse.clear();

        let mut keys: Vec<&str> = self.kmers.keys().map(Box::as_ref).collect();
        keys.sort_unstable();

        for kmer in keys {
            let prefix = &kmer[..self.k - 1];
            let suffix = &kmer[1..];
            let p = self.interner.intern(prefix);
            let s = self.interner.intern(suffix);
            self.ensure_capacity((p.max(s) as usize) + 1);
            self.forward[p as usize].push(s);
            self.reverse[s as usize].push(p);
        }
    }

    fn ensure_capacity(&mut self, len: usize) {
        if self.forward.len() < len {
            self.forward.resize(len, Vec::new());
            self.reverse.resize(len, Vec::new());
        }
    }
}

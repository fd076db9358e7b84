//! K-mer counting and abundance filtering over a stream of reads.

use std::path::Path;

use crate::error::AssemblerError;
use crate::graph::KmerCounts;

/// Counts k-mers of length `k` across `reads`. A read shorter than `k`
/// contributes nothing; identical k-mers from different reads sum. Reads
/// that failed to decode are logged and skipped (non-fatal, per
/// `MalformedInput`'s propagation policy).
pub fn count_kmers<I>(reads: I, k: usize) -> KmerCounts
where
    I: IntoIterator<Item = Result<String, AssemblerError>>,
{
    let mut counts = KmerCounts::new();
    for read in reads {
        match read {
            Ok(seq) => count_kmers_in_read(&seq, k, &mut counts),
            Err(err) => log::warn!("skipping malformed record: {err}"),
        }
    }
    counts
}

fn count_kmers_in_read(seq: &str, k: usize, counts: &mut KmerCounts) {
    if seq.len() < k {
        return;
    }
    for i in 0..=(seq.len() - k) {
        let kmer = &seq[i..i + k];
        *counts.entry(kmer.into()).or_insert(0) += 1;
    }
}

/// Keeps exactly the entries with count >= `threshold`. Pure function;
/// does not touch any graph state.
pub fn filter_by_abundance(counts: &KmerCounts, threshold: u32) -> KmerCounts {
    counts
        .iter()
        .filter(|&(_, &c)| c >= threshold)
        .map(|(k, &c)| (k.clone(), c))
        .collect()
}

/// Convenience wrapper that opens `path`, reads it via [`crate::reader::open_reads`]
/// and counts its k-mers in one call.
pub fn count_kmers_in_file(path: &Path, k: usize) -> Result<KmerCounts, AssemblerError> {
    let reads = crate::reader::open_reads(path)?;
    Ok(count_kmers(reads, k))
}

//! Optional k-mer abundance histogram: count value -> number of distinct k-mers.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::graph::KmerCounts;

pub type Histogram = BTreeMap<u32, u64>;

/// Builds a mapping from count value to the number of distinct k-mers with
/// that count.
pub fn build_histogram(kmers: &KmerCounts) -> Histogram {
    let mut hist = Histogram::new();
    for &count in kmers.values() {
        *hist.entry(count).or_insert(0) += 1;
    }
    hist
}

/// Renders the histogram as a two-column, tab-separated table
/// (`count\tnum_distinct_kmers`), ascending by count.
pub fn write_histogram<W: Write>(hist: &Histogram, out: &mut W) -> io::Result<()> {
    for (count, distinct) in hist {
        writeln!(out, "{count}\t{distinct}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_counts_by_multiplicity() {
        let kmers: KmerCounts = [("ATG", 4), ("TGC", 5), ("GCA", 4)]
            .into_iter()
            .map(|(k, c)| (k.into(), c))
            .collect();
        let hist = build_histogram(&kmers);
        assert_eq!(hist[&4], 2);
        assert_eq!(hist[&5], 1);
    }

    #[test]
    fn renders_tab_separated_ascending_table() {
        let mut hist = Histogram::new();
        hist.insert(5, 1);
        hist.insert(2, 3);
        let mut out = Vec::new();
        write_histogram(&hist, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2\t3\n5\t1\n");
    }
}

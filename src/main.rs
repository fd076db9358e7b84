use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;

use debruijn_asm::cli::Args;
use debruijn_asm::graph::DeBruijnGraph;
use debruijn_asm::{assemble, histogram, kmer, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate()?;
    logging::init(args.resolve_log_level()?);

    log::info!("counting {}-mers from {}", args.kmer_size, args.reads.display());
    let mut kmers = kmer::count_kmers_in_file(&args.reads, args.kmer_size)
        .with_context(|| format!("failed to read {}", args.reads.display()))?;
    log::info!("counted {} distinct k-mers", kmers.len());

    if args.kmer_hist {
        let hist = histogram::build_histogram(&kmers);
        let stdout = io::stdout();
        histogram::write_histogram(&hist, &mut stdout.lock())
            .context("failed to write k-mer histogram")?;
    }

    if let Some(threshold) = args.kmer_filter {
        kmers = kmer::filter_by_abundance(&kmers, threshold);
        log::info!("{} k-mers remain after filtering at >= {threshold}", kmers.len());
    }

    if args.assemble {
        let mut graph = DeBruijnGraph::new(args.kmer_size, kmers)?;
        let output_path = args
            .output
            .as_ref()
            .expect("validated: --assemble requires --output");
        let file = File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        let mut out = BufWriter::new(file);
        let n = assemble::get_all_contigs(
            &mut graph,
            &mut out,
            args.tip_threshold,
            args.bubble_threshold,
        )?;
        out.flush().context("failed to flush output FASTA")?;
        log::info!("wrote {n} contigs to {}", output_path.display());
    }

    Ok(())
}

//! Command-line surface: flag parsing plus the cross-flag validation the
//! parser itself cannot express.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::error::{AssemblerError, InvalidParameterSnafu};
use snafu::ensure;

/// A de novo genome assembler built around a de Bruijn graph.
#[derive(Debug, Parser)]
#[command(name = "debruijn-asm", version, about)]
pub struct Args {
    /// Input reads, FASTA or FASTQ, optionally gzip-compressed.
    #[arg(short, long, value_name = "PATH")]
    pub reads: PathBuf,

    /// K-mer length (must be >= 2).
    #[arg(short, long, value_name = "K")]
    pub kmer_size: usize,

    /// Drop k-mers with count below this threshold before building the graph.
    #[arg(long = "kmer-filter", short = 'f', value_name = "T")]
    pub kmer_filter: Option<u32>,

    /// Write a tab-separated k-mer abundance histogram to stdout.
    #[arg(long = "kmer-hist", short = 'H')]
    pub kmer_hist: bool,

    /// Run graph simplification and contig extraction.
    #[arg(short, long)]
    pub assemble: bool,

    /// Tips shorter than this many nodes are removed.
    #[arg(long = "tip-threshold", short = 't', default_value_t = 3)]
    pub tip_threshold: usize,

    /// Bubble arms longer than this many hops are left alone.
    #[arg(long = "bubble-threshold", short = 'b', default_value_t = 50)]
    pub bubble_threshold: usize,

    /// Output FASTA path (required when `--assemble` is set); must end in `.fa`/`.fasta`.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Logging verbosity: trace, debug, info, warn, error, or off.
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Raise log verbosity one step per occurrence; overridden by an explicit `--log-level`.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Cross-flag checks the derive can't express on its own. Must run
    /// before any file is opened.
    pub fn validate(&self) -> Result<(), AssemblerError> {
        ensure!(
            self.kmer_size >= 2,
            InvalidParameterSnafu {
                reason: format!("--kmer-size must be >= 2, got {}", self.kmer_size),
            }
        );
        if let Some(t) = self.kmer_filter {
            ensure!(
                t >= 1,
                InvalidParameterSnafu {
                    reason: "--kmer-filter must be >= 1".to_string(),
                }
            );
        }
        if self.assemble {
            let Some(output) = &self.output else {
                return InvalidParameterSnafu {
                    reason: "--assemble requires --output".to_string(),
                }
                .fail();
            };
            let ext = output
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default()
                .to_ascii_lowercase();
            ensure!(
                ext == "fa" || ext == "fasta",
                InvalidParameterSnafu {
                    reason: format!(
                        "--output must end in .fa or .fasta, got \"{}\"",
                        output.display()
                    ),
                }
            );
        }
        Ok(())
    }

    /// Resolves the effective log level: an explicit `--log-level` wins
    /// outright; otherwise `-v`/`-vv` raises verbosity one step at a time
    /// from `info`.
    pub fn resolve_log_level(&self) -> Result<LevelFilter, AssemblerError> {
        if self.log_level.eq_ignore_ascii_case("info") && self.verbose > 0 {
            return Ok(bump(LevelFilter::Info, self.verbose));
        }
        parse_level(&self.log_level)
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, AssemblerError> {
    match raw.to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::Trace),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" => Ok(LevelFilter::Off),
        other => InvalidParameterSnafu {
            reason: format!("unrecognized --log-level \"{other}\""),
        }
        .fail(),
    }
}

fn bump(level: LevelFilter, steps: u8) -> LevelFilter {
    const LADDER: [LevelFilter; 5] = [
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
        LevelFilter::Trace,
        LevelFilter::Trace,
    ];
    let start = LADDER.iter().position(|&l| l == level).unwrap_or(0);
    LADDER[(start + steps as usize).min(LADDER.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            reads: PathBuf::from("reads.fa"),
            kmer_size: 21,
            kmer_filter: None,
            kmer_hist: false,
            assemble: false,
            tip_threshold: 3,
            bubble_threshold: 50,
            output: None,
            log_level: "info".to_string(),
            verbose: 0,
        }
    }

    #[test]
    fn rejects_kmer_size_below_two() {
        let mut args = base_args();
        args.kmer_size = 1;
        assert!(matches!(
            args.validate().unwrap_err(),
            AssemblerError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn assemble_without_output_is_rejected() {
        let mut args = base_args();
        args.assemble = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn assemble_with_wrong_output_extension_is_rejected() {
        let mut args = base_args();
        args.assemble = true;
        args.output = Some(PathBuf::from("out.txt"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn assemble_with_fasta_output_is_accepted() {
        let mut args = base_args();
        args.assemble = true;
        args.output = Some(PathBuf::from("out.fasta"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn explicit_log_level_wins_over_verbose() {
        let mut args = base_args();
        args.log_level = "warn".to_string();
        args.verbose = 2;
        assert_eq!(args.resolve_log_level().unwrap(), LevelFilter::Warn);
    }

    #[test]
    fn verbose_steps_raise_level_from_info() {
        let mut args = base_args();
        args.verbose = 1;
        assert_eq!(args.resolve_log_level().unwrap(), LevelFilter::Debug);
        args.verbose = 2;
        assert_eq!(args.resolve_log_level().unwrap(), LevelFilter::Trace);
    }
}

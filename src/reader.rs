//! The read iterator: a lazy, finite, non-restartable sequence of nucleotide
//! strings decoded from one FASTA or FASTQ file, gzip-compressed or not.
//!
//! Quality scores are discarded. Any other extension fails fast with
//! [`AssemblerError::UnsupportedFormat`]; a record that fails to decode is
//! surfaced as [`AssemblerError::MalformedInput`] without ending the stream.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bio::io::{fasta, fastq};
use snafu::ResultExt;

use crate::error::{AssemblerError, IoSnafu, UnsupportedFormatSnafu};

const FASTA_EXTENSIONS: &[&str] = &["fasta", "fna", "fa"];
const FASTQ_EXTENSIONS: &[&str] = &["fastq", "fq"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Fasta,
    Fastq,
}

/// Determines the format and gzip-ness of `path` from its extension(s),
/// mirroring `megagfa`'s dispatch-on-extension approach.
fn classify(path: &Path) -> Result<(Format, bool), AssemblerError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let (stem, gzipped) = match name.strip_suffix(".gz") {
        Some(stem) => (stem, true),
        None => (name, false),
    };
    let ext = Path::new(stem)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if FASTA_EXTENSIONS.contains(&ext.as_str()) {
        Ok((Format::Fasta, gzipped))
    } else if FASTQ_EXTENSIONS.contains(&ext.as_str()) {
        Ok((Format::Fastq, gzipped))
    } else {
        UnsupportedFormatSnafu { path }.fail()
    }
}

type BoxedBufRead = Box<dyn std::io::BufRead>;

fn open_buf_read(path: &Path, gzipped: bool) -> Result<BoxedBufRead, AssemblerError> {
    let file = File::open(path).context(IoSnafu { path })?;
    if gzipped {
        Ok(Box::new(BufReader::new(flate2::read::MultiGzDecoder::new(
            file,
        ))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

enum Records {
    Fasta(fasta::Records<BoxedBufRead>),
    Fastq(fastq::Records<BoxedBufRead>),
}

/// A lazy, finite, non-restartable sequence of decoded read sequences.
pub struct ReadIterator {
    path: Box<Path>,
    records: Records,
}

impl Iterator for ReadIterator {
    type Item = Result<String, AssemblerError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.records {
            Records::Fasta(records) => records.next().map(|r| {
                r.map(|rec| String::from_utf8_lossy(rec.seq()).into_owned())
                    .map_err(|e| AssemblerError::MalformedInput {
                        path: self.path.to_path_buf(),
                        reason: e.to_string(),
                    })
            }),
            Records::Fastq(records) => records.next().map(|r| {
                r.map(|rec| String::from_utf8_lossy(rec.seq()).into_owned())
                    .map_err(|e| AssemblerError::MalformedInput {
                        path: self.path.to_path_buf(),
                        reason: e.to_string(),
                    })
            }),
        }
    }
}

/// Opens `path` and returns a lazy iterator over its decoded read sequences.
pub fn open_reads(path: &Path) -> Result<ReadIterator, AssemblerError> {
    let (format, gzipped) = classify(path)?;
    let buf_read = open_buf_read(path, gzipped)?;
    let records = match format {
        Format::Fasta => Records::Fasta(fasta::Reader::new(buf_read).records()),
        Format::Fastq => Records::Fastq(fastq::Reader::new(buf_read).records()),
    };
    Ok(ReadIterator {
        path: Box::from(path),
        records,
    })
}

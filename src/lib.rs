//! A de novo genome assembler built around a de Bruijn graph.
//!
//! The engine (`graph`, `simplify`, `assemble`, `kmer`, `reader`,
//! `histogram`) is single-threaded and synchronous; `cli`/`logging` are the
//! ambient layer that turns it into a runnable binary.

pub mod assemble;
pub mod cli;
pub mod error;
pub mod graph;
pub mod histogram;
pub mod kmer;
pub mod logging;
pub mod reader;
pub mod simplify;

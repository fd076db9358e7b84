//! Typed error taxonomy shared across the crate.

use std::path::PathBuf;

use snafu::Snafu;

/// Errors the core engine and its CLI collaborator must distinguish.
///
/// Fatal variants are surfaced to the user with a non-zero exit code;
/// [`AssemblerError::MalformedInput`] is recoverable and only ever logged.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AssemblerError {
    #[snafu(display("Unsupported input format: \"{}\"", path.display()))]
    UnsupportedFormat { path: PathBuf },

    #[snafu(display("Invalid parameter: {reason}"))]
    InvalidParameter { reason: String },

    #[snafu(display("No k-mers remain after counting/filtering"))]
    EmptyKmerSet,

    #[snafu(display("I/O error on \"{}\"", path.display()))]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Malformed record in \"{}\": {reason}", path.display()))]
    MalformedInput { path: PathBuf, reason: String },
}
